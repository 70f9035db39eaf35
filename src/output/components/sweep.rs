use super::{number_column, optional_cell, titled_table};
use crate::format::{SweepDocument, axis_label, sweep_title};
use crate::output::Theme;
use rich_rust::prelude::*;

/// Terminal values across a dims or shift sweep.
pub struct SweepTable<'a> {
    doc: &'a SweepDocument,
    theme: &'a Theme,
}

impl<'a> SweepTable<'a> {
    #[must_use]
    pub const fn new(doc: &'a SweepDocument, theme: &'a Theme) -> Self {
        Self { doc, theme }
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let title_style = self.theme.algorithm_style(self.doc.algorithm.algorithm);
        let mut table = titled_table(&sweep_title(self.doc), title_style, self.theme);

        table = table.with_column(number_column(axis_label(self.doc.axis)));
        for header in ["n", "median", "err_lo", "err_hi"] {
            table = table.with_column(number_column(header));
        }

        for point in &self.doc.points {
            table.add_row(Row::new(vec![
                Cell::new(Text::styled(
                    &point.sweep_value.to_string(),
                    self.theme.emphasis.clone(),
                )),
                Cell::new(Text::new(point.n.to_string())),
                optional_cell(point.median, self.theme),
                optional_cell(point.err_lo, self.theme),
                optional_cell(point.err_hi, self.theme),
            ]));
        }

        table
    }
}
