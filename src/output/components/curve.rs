use super::{number_column, optional_cell, titled_table};
use crate::format::{CurveDocument, curve_sample_indices, curve_title};
use crate::output::Theme;
use rich_rust::prelude::*;

/// Summary curve at 1-2-5 evaluation steps, titled in the algorithm's color.
pub struct CurveTable<'a> {
    doc: &'a CurveDocument,
    theme: &'a Theme,
}

impl<'a> CurveTable<'a> {
    #[must_use]
    pub const fn new(doc: &'a CurveDocument, theme: &'a Theme) -> Self {
        Self { doc, theme }
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let title_style = self.theme.algorithm_style(self.doc.algorithm.algorithm);
        let mut table = titled_table(&curve_title(self.doc), title_style, self.theme);

        for header in ["evaluation", "n", "median", "p0", "p25", "p75", "p100"] {
            table = table.with_column(number_column(header));
        }

        for point in curve_sample_indices(self.doc.cap)
            .into_iter()
            .filter_map(|idx| self.doc.curve.at(idx))
        {
            let q = point.quantiles;
            let n_style = if point.n == 0 {
                self.theme.dimmed.clone()
            } else {
                Style::new()
            };
            table.add_row(Row::new(vec![
                Cell::new(Text::new(point.evaluation.to_string())),
                Cell::new(Text::styled(&point.n.to_string(), n_style)),
                optional_cell(q.map(|q| q.median), self.theme),
                optional_cell(q.map(|q| q.p0), self.theme),
                optional_cell(q.map(|q| q.p25), self.theme),
                optional_cell(q.map(|q| q.p75), self.theme),
                optional_cell(q.map(|q| q.p100), self.theme),
            ]));
        }

        table
    }
}
