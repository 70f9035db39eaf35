use crate::config::AnalysisConfig;
use crate::format::config_rows;
use crate::output::Theme;
use rich_rust::prelude::*;

/// Resolved settings as a key/value table.
#[must_use]
pub fn config_table(config: &AnalysisConfig, theme: &Theme) -> Table {
    let mut table = Table::new()
        .box_style(theme.box_style)
        .border_style(theme.panel_border.clone())
        .title(Text::styled("Configuration", theme.panel_title.clone()));

    table = table
        .with_column(Column::new("Key").min_width(16).max_width(30))
        .with_column(Column::new("Value").min_width(12).max_width(50));

    for (key, value) in config_rows(config) {
        let key_cell = Cell::new(Text::styled(key, theme.emphasis.clone()));
        let value_cell = Cell::new(Text::new(value));
        table.add_row(Row::new(vec![key_cell, value_cell]));
    }

    table
}
