//! Request, batch and override loading.
//!
//! Request files are YAML or JSON (chosen by extension, YAML otherwise).
//! Relative cover paths inside a file resolve against the file's directory.

use std::path::{Path, PathBuf};

use card_common::{
    CardResult, ContentType, CoverRef, PaletteOverrides, PaletteRef, Platform, ReviewCardRequest,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CardgenError, Result};

/// One card in a batch file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchEntry {
    /// Output path; defaults to a name derived from the title
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub request: ReviewCardRequest,
}

/// Load a single request file.
pub fn load_request(path: &Path) -> Result<ReviewCardRequest> {
    let content = read_file(path)?;
    parse_request(path, &content)
}

/// Parse request file `content` as if it had been read from `path`.
pub fn parse_request(path: &Path, content: &str) -> Result<ReviewCardRequest> {
    let mut request: ReviewCardRequest = parse_file(path, content)?;
    resolve_cover(&mut request, base_dir(path));
    debug!(path = %path.display(), title = %request.title, "Loaded request file");
    Ok(request)
}

/// Load a batch file: a list of `{ output, request }` entries.
///
/// Relative output and cover paths resolve against the batch file's directory.
pub fn load_batch(path: &Path) -> Result<Vec<BatchEntry>> {
    let content = read_file(path)?;
    let mut entries: Vec<BatchEntry> = parse_file(path, &content)?;
    let base = base_dir(path);
    for entry in &mut entries {
        resolve_cover(&mut entry.request, base);
        if let Some(output) = entry.output.as_mut() {
            if output.is_relative() {
                *output = base.join(&output);
            }
        }
    }
    debug!(path = %path.display(), entries = entries.len(), "Loaded batch file");
    Ok(entries)
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CardgenError::read(path, e))
}

fn parse_file<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        serde_json::from_str(content).map_err(|e| CardgenError::parse(path, e))
    } else {
        serde_yaml::from_str(content).map_err(|e| CardgenError::parse(path, e))
    }
}

fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn resolve_cover(request: &mut ReviewCardRequest, base: &Path) {
    if let Some(CoverRef::Path(cover)) = request.cover.as_mut() {
        if cover.is_relative() {
            *cover = base.join(&cover);
        }
    }
}

/// Request fields given on the command line. Anything set here wins over the
/// request file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverrides {
    pub title: Option<String>,
    pub score: Option<f32>,
    pub review_text: Option<String>,
    pub content_type: Option<ContentType>,
    pub platform: Option<Platform>,
    pub username: Option<String>,
    pub palette: Option<String>,
    pub colors: PaletteOverrides,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub corner_radius: Option<u32>,
    pub cover: Option<String>,
}

impl RequestOverrides {
    /// Apply the overrides on top of `base`.
    ///
    /// Fails with `UnknownPalette` when a palette name is given that is not
    /// a built-in.
    pub fn apply(self, mut base: ReviewCardRequest) -> CardResult<ReviewCardRequest> {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(score) = self.score {
            base.score = score;
        }
        if let Some(text) = self.review_text {
            base.review_text = text;
        }
        if let Some(content_type) = self.content_type {
            base.content_type = content_type;
        }
        if let Some(platform) = self.platform {
            base.platform = platform;
        }
        if let Some(username) = self.username {
            base.platform_username = Some(username);
        }
        if let Some(name) = self.palette.as_deref() {
            base.palette = PaletteRef::from_name(name)?;
        }
        if !self.colors.is_empty() {
            base.palette = self.colors.apply(base.palette);
        }
        if let Some(width) = self.width {
            base.width = width;
        }
        if let Some(height) = self.height {
            base.height = height;
        }
        if let Some(radius) = self.corner_radius {
            base.corner_radius = radius;
        }
        if let Some(cover) = self.cover.as_deref() {
            base.cover = Some(CoverRef::parse(cover));
        }
        Ok(base)
    }

    /// Build a request from flags alone. Title and score have no sensible
    /// default, so both must be given.
    pub fn into_request(self) -> Result<ReviewCardRequest> {
        let title = self
            .title
            .clone()
            .ok_or(CardgenError::MissingArgument("--title"))?;
        let score = self.score.ok_or(CardgenError::MissingArgument("--score"))?;
        let base = ReviewCardRequest::builder(title, score).build();
        Ok(self.apply(base)?)
    }
}

/// Default file name for a card: the title's alphanumerics, spaces, `-` and
/// `_`, with spaces turned into underscores, plus `_review.png`.
///
/// Falls back to `review_card.png` when nothing usable is left.
pub fn default_output_name(title: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = safe.trim();
    if safe.is_empty() {
        "review_card.png".to_string()
    } else {
        format!("{}_review.png", safe.replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_common::{BuiltinPalette, Color};

    #[test]
    fn test_default_output_name() {
        assert_eq!(default_output_name("OMORI"), "OMORI_review.png");
        assert_eq!(default_output_name("Elden Ring"), "Elden_Ring_review.png");
        assert_eq!(
            default_output_name("Baldur's Gate 3: Act II"),
            "Baldurs_Gate_3_Act_II_review.png"
        );
        assert_eq!(default_output_name("  ??? "), "review_card.png");
        assert_eq!(default_output_name(""), "review_card.png");
    }

    #[test]
    fn test_overrides_win() {
        let base = ReviewCardRequest::builder("Old", 3.0).build();
        let overrides = RequestOverrides {
            title: Some("New".into()),
            score: Some(8.0),
            palette: Some("ocean".into()),
            width: Some(800),
            ..Default::default()
        };
        let req = overrides.apply(base).unwrap();
        assert_eq!(req.title, "New");
        assert_eq!(req.score, 8.0);
        assert_eq!(req.width, 800);
        assert_eq!(req.palette, PaletteRef::Builtin(BuiltinPalette::Ocean));
    }

    #[test]
    fn test_color_overrides_customize_palette() {
        let overrides = RequestOverrides {
            title: Some("Stardew Valley".into()),
            score: Some(9.0),
            palette: Some("Forest".into()),
            colors: PaletteOverrides {
                accent: Some(Color::rgb(255, 0, 0)),
                ..Default::default()
            },
            ..Default::default()
        };
        let req = overrides.into_request().unwrap();
        let palette = card_common::resolve(&req.palette);
        assert_eq!(palette.accent, Color::rgb(255, 0, 0));
        assert_eq!(
            palette.background,
            BuiltinPalette::Forest.palette().background
        );
    }

    #[test]
    fn test_unknown_palette_override_fails() {
        let overrides = RequestOverrides {
            title: Some("Stardew Valley".into()),
            score: Some(9.0),
            palette: Some("Neon".into()),
            ..Default::default()
        };
        assert!(matches!(
            overrides.into_request(),
            Err(CardgenError::Card(card_common::CardError::UnknownPalette(_)))
        ));
    }

    #[test]
    fn test_flags_alone_need_title_and_score() {
        let title_only = RequestOverrides {
            title: Some("Hades".into()),
            ..Default::default()
        };
        let err = title_only.into_request().unwrap_err();
        assert!(matches!(err, CardgenError::MissingArgument("--score")));
        assert!(err.is_user_error());

        let score_only = RequestOverrides {
            score: Some(7.5),
            ..Default::default()
        };
        assert!(matches!(
            score_only.into_request(),
            Err(CardgenError::MissingArgument("--title"))
        ));

        let both = RequestOverrides {
            title: Some("Hades".into()),
            score: Some(7.5),
            ..Default::default()
        };
        let req = both.into_request().unwrap();
        assert_eq!((req.title.as_str(), req.score), ("Hades", 7.5));
    }
}
