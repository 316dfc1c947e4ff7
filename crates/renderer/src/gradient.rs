//! Score-to-color mapping.
//!
//! Scores are normalized into [0, 1] over their display range and looked up on
//! a piecewise-linear color ramp. The default ramp has three anchors:
//!
//! | position | color     |            |
//! |----------|-----------|------------|
//! | 0.0      | `#ef4444` | red        |
//! | 0.5      | `#eab308` | yellow     |
//! | 1.0      | `#22c55e` | green      |

use card_common::{Color, ScoreRange};

pub const ANCHOR_LOW: Color = Color::rgb(239, 68, 68);
pub const ANCHOR_MID: Color = Color::rgb(234, 179, 8);
pub const ANCHOR_HIGH: Color = Color::rgb(34, 197, 94);

/// A color stop on a score gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Normalized position in [0, 1]
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Piecewise-linear color ramp over normalized score positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGradient {
    stops: Vec<GradientStop>,
}

impl Default for ScoreGradient {
    fn default() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, ANCHOR_LOW),
                GradientStop::new(0.5, ANCHOR_MID),
                GradientStop::new(1.0, ANCHOR_HIGH),
            ],
        }
    }
}

impl ScoreGradient {
    /// Build a gradient from stops in strictly ascending position order.
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, String> {
        if stops.len() < 2 {
            return Err("Gradient must have at least 2 color stops".to_string());
        }
        for stop in &stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(format!(
                    "Stop position {} is outside [0, 1]",
                    stop.position
                ));
            }
        }
        for i in 1..stops.len() {
            if stops[i].position <= stops[i - 1].position {
                return Err("Color stops must be in ascending position order".to_string());
            }
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at a normalized position. Positions outside the stops clamp.
    pub fn color_at(&self, position: f32) -> Color {
        // `new` and `default` guarantee at least two stops.
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];

        if position.is_nan() || position <= first.position {
            return first.color;
        }
        if position >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if position <= high.position {
                let t = (position - low.position) / (high.position - low.position);
                return low.color.lerp(&high.color, t);
            }
        }

        last.color
    }

    pub fn color_for_score(&self, score: f32, range: ScoreRange) -> Color {
        self.color_at(gradient_position(score, range))
    }
}

/// Normalized position of a score along the gradient, clamped to [0, 1].
///
/// Non-decreasing in `score`.
pub fn gradient_position(score: f32, range: ScoreRange) -> f32 {
    range.normalize(score)
}

/// Map a score to its badge color using the default three-point ramp.
pub fn color_for_score(score: f32, range: ScoreRange) -> Color {
    ScoreGradient::default().color_for_score(score, range)
}
