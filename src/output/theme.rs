//! Theme and color definitions for rich output.

use crate::model::Algorithm;
use rich_rust::r#box::ROUNDED;
use rich_rust::prelude::*;

/// Named color, or the terminal default if the name does not parse.
fn color_style(name: &str) -> Style {
    Color::parse(name).map_or_else(|_| Style::new(), |c| Style::new().color(c))
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub emphasis: Style,
    pub dimmed: Style,
    pub muted: Style,
    pub warning: Style,
    pub significant: Style,

    // Algorithms, in their chart colors
    pub fireworks: Style,
    pub plant_propagation: Style,

    pub panel_title: Style,
    pub panel_border: Style,

    pub box_style: &'static BoxChars,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            emphasis: Style::new().bold(),
            dimmed: Style::new().dim(),
            muted: color_style("bright_black"),
            warning: color_style("yellow").bold(),
            significant: color_style("green").bold(),

            fireworks: color_style(Algorithm::Fireworks.color()).bold(),
            plant_propagation: color_style(Algorithm::PlantPropagation.color()).bold(),

            panel_title: Style::new().bold(),
            panel_border: color_style("bright_black"),

            box_style: &ROUNDED,
        }
    }
}

impl Theme {
    /// Chart color of the algorithm, so tables match the rendered figures.
    #[must_use]
    pub fn algorithm_style(&self, algorithm: Algorithm) -> Style {
        match algorithm {
            Algorithm::Fireworks => self.fireworks.clone(),
            Algorithm::PlantPropagation => self.plant_propagation.clone(),
        }
    }

    /// Style for a p-value: highlighted below `alpha`.
    #[must_use]
    pub fn p_value_style(&self, p_value: f64, alpha: f64) -> Style {
        if p_value < alpha {
            self.significant.clone()
        } else {
            Style::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_styles_build() {
        let theme = Theme::default();
        for alg in Algorithm::ALL {
            let _ = theme.algorithm_style(alg);
        }
    }
}
