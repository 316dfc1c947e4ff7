//! Review card rendering.
//!
//! Composites a [`card_common::ReviewCardRequest`] and an optional cover
//! bitmap into a finished RGBA card:
//! - Score color ramp
//! - Landscape and portrait layouts
//! - Wrapped, truncated text with embedded fonts
//! - Platform branding footer
//! - Indexed/RGBA PNG encoding

pub mod branding;
pub mod card;
pub mod gradient;
pub mod layout;
pub mod png;
pub mod shapes;
pub mod style;
pub mod text;

pub use card::{fit_cover, render, render_with_style, RenderedCard};
pub use gradient::{color_for_score, gradient_position, ScoreGradient};
pub use style::{CardStyle, StyleError};
