//! Card layout style configuration.
//!
//! Sizes are given for a reference card whose shorter side is
//! `reference_size` pixels (the classic 1200x675 card) and scale linearly
//! with the actual canvas.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout constants for a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Shorter canvas side the sizes below are tuned for
    pub reference_size: f32,
    /// Outer padding in pixels
    pub padding: f32,
    /// Landscape: maximum cover width as a fraction of the card width
    pub cover_width_ratio: f32,
    /// Portrait: cover band height as a fraction of the card height
    pub cover_height_ratio: f32,
    /// Corner radius of the cover / placeholder
    pub cover_corner_radius: f32,
    pub title_font_size: f32,
    pub score_font_size: f32,
    pub review_font_size: f32,
    pub label_font_size: f32,
    pub platform_font_size: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
    /// Maximum number of title lines before truncation
    pub title_max_lines: usize,
    /// Inner padding of the score badge
    pub badge_padding: f32,
    /// Size of the platform glyph in the footer
    pub platform_logo_size: f32,
    /// Label drawn inside the placeholder when no cover is available
    pub placeholder_text: String,
    /// Whether to draw the content label ("GAME REVIEW") above the title
    pub show_content_label: bool,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            reference_size: 675.0,
            padding: 40.0,
            cover_width_ratio: 0.25,
            cover_height_ratio: 0.42,
            cover_corner_radius: 15.0,
            title_font_size: 48.0,
            score_font_size: 40.0,
            review_font_size: 24.0,
            label_font_size: 16.0,
            platform_font_size: 20.0,
            line_spacing: 1.3,
            title_max_lines: 2,
            badge_padding: 14.0,
            platform_logo_size: 32.0,
            placeholder_text: "No Cover".to_string(),
            show_content_label: true,
        }
    }
}

impl CardStyle {
    /// Load a style from a JSON or YAML file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StyleError::IoError(e.to_string()))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let style = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };
        style.validate()?;
        Ok(style)
    }

    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        serde_json::from_str(json).map_err(|e| StyleError::ParseError(e.to_string()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, StyleError> {
        serde_yaml::from_str(yaml).map_err(|e| StyleError::ParseError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        let positive = [
            ("reference_size", self.reference_size),
            ("title_font_size", self.title_font_size),
            ("score_font_size", self.score_font_size),
            ("review_font_size", self.review_font_size),
            ("label_font_size", self.label_font_size),
            ("platform_font_size", self.platform_font_size),
            ("line_spacing", self.line_spacing),
            ("platform_logo_size", self.platform_logo_size),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(StyleError::ValidationError(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("cover_width_ratio", self.cover_width_ratio),
            ("cover_height_ratio", self.cover_height_ratio),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(StyleError::ValidationError(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.padding < 0.0 || self.badge_padding < 0.0 || self.cover_corner_radius < 0.0 {
            return Err(StyleError::ValidationError(
                "padding and radii must not be negative".to_string(),
            ));
        }

        if self.title_max_lines == 0 {
            return Err(StyleError::ValidationError(
                "title_max_lines must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Scale factor for a `width` x `height` canvas.
    pub fn scale_for(&self, width: u32, height: u32) -> f32 {
        let shorter = width.min(height) as f32;
        (shorter / self.reference_size).clamp(0.2, 4.0)
    }
}

/// Style-related errors.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
