use super::{number_column, titled_table};
use crate::format::{CostEntry, cost_title, fit_summary, format_value};
use crate::output::Theme;
use rich_rust::prelude::*;

/// Per-dimensionality elapsed time of one algorithm.
pub struct CostTable<'a> {
    entry: &'a CostEntry,
    benchmarks: usize,
    theme: &'a Theme,
}

impl<'a> CostTable<'a> {
    #[must_use]
    pub const fn new(entry: &'a CostEntry, benchmarks: usize, theme: &'a Theme) -> Self {
        Self {
            entry,
            benchmarks,
            theme,
        }
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let title_style = self.theme.algorithm_style(self.entry.tag.algorithm);
        let title = cost_title(self.entry, self.benchmarks);
        let mut table = titled_table(&title, title_style, self.theme);

        for header in ["dims", "n", "mean", "std"] {
            table = table.with_column(number_column(header));
        }

        for row in &self.entry.per_dimension {
            table.add_row(Row::new(vec![
                Cell::new(Text::styled(&row.dims.to_string(), self.theme.emphasis.clone())),
                Cell::new(Text::new(row.n.to_string())),
                Cell::new(Text::new(format_value(row.mean))),
                Cell::new(Text::new(format_value(row.std))),
            ]));
        }

        table
    }
}

/// Fitted `time ~ dims` line under a cost table.
#[must_use]
pub fn fit_panel(entry: &CostEntry, theme: &Theme) -> Panel {
    Panel::from_text(&fit_summary(entry))
        .title(Text::styled("fit", theme.panel_title.clone()))
        .box_style(theme.box_style)
        .border_style(theme.panel_border.clone())
}
