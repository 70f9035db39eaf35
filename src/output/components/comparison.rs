use super::{number_column, titled_table};
use crate::format::{ComparisonDocument, comparison_title, format_value, method_label};
use crate::output::Theme;
use rich_rust::prelude::*;

/// p-values below this are highlighted.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// One row per test that was run; degenerate results are flagged.
#[must_use]
pub fn comparison_table(doc: &ComparisonDocument, theme: &Theme) -> Table {
    let title_style = theme.algorithm_style(doc.algorithm.algorithm);
    let mut table = titled_table(&comparison_title(doc), title_style, theme)
        .with_column(Column::new("test").min_width(12))
        .with_column(number_column("statistic"))
        .with_column(number_column("p-value"))
        .with_column(Column::new("method").min_width(10));

    for result in doc.comparison.report.tests() {
        let method_style = if result.degenerate {
            theme.warning.clone()
        } else {
            theme.dimmed.clone()
        };
        table.add_row(Row::new(vec![
            Cell::new(Text::styled(&result.kind.to_string(), theme.emphasis.clone())),
            Cell::new(Text::new(format_value(result.statistic))),
            Cell::new(Text::styled(
                &format_value(result.p_value),
                theme.p_value_style(result.p_value, SIGNIFICANCE_LEVEL),
            )),
            Cell::new(Text::styled(&method_label(result), method_style)),
        ]));
    }

    if !doc.paired {
        table.add_row(Row::new(vec![
            Cell::new(Text::styled("signed-rank", theme.muted.clone())),
            Cell::new(Text::styled("-", theme.dimmed.clone())),
            Cell::new(Text::styled("-", theme.dimmed.clone())),
            Cell::new(Text::styled("skipped (unpaired)", theme.muted.clone())),
        ]));
    }

    table
}
