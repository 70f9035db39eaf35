//! Table builders for rich output.
//!
//! Each builder returns a `rich_rust` renderable; the caller hands it to
//! [`OutputContext::render`](super::OutputContext::render). Cell text comes
//! from [`crate::format`] so rich and plain output never disagree.

mod comparison;
mod config;
mod cost;
mod curve;
mod sweep;

pub use comparison::{SIGNIFICANCE_LEVEL, comparison_table};
pub use config::config_table;
pub use cost::{CostTable, fit_panel};
pub use curve::CurveTable;
pub use sweep::SweepTable;

use crate::format::{ABSENT, format_value};
use crate::output::Theme;
use rich_rust::prelude::*;

/// Right-aligned numeric column.
fn number_column(header: &str) -> Column {
    Column::new(header).justify(JustifyMethod::Right).min_width(8)
}

/// Cell for an optional statistic; absent values are dimmed.
fn optional_cell(value: Option<f64>, theme: &Theme) -> Cell {
    value.map_or_else(
        || Cell::new(Text::styled(ABSENT, theme.dimmed.clone())),
        |v| Cell::new(Text::new(format_value(v))),
    )
}

fn titled_table(title: &str, style: Style, theme: &Theme) -> Table {
    Table::new()
        .box_style(theme.box_style)
        .border_style(theme.panel_border.clone())
        .title(Text::styled(title, style))
}
