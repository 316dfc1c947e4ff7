//! Review card request model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{CardError, CardResult};
use crate::palette::PaletteRef;

/// Largest accepted width or height in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Category of reviewed media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Game,
    Movie,
    Anime,
    /// Anything else; uses the generic layout.
    #[serde(other)]
    Generic,
}

impl ContentType {
    /// Label shown above the title.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Game => "GAME REVIEW",
            ContentType::Movie => "MOVIE REVIEW",
            ContentType::Anime => "ANIME REVIEW",
            ContentType::Generic => "REVIEW",
        }
    }

    /// Cover aspect ratio as width / height.
    pub fn cover_aspect(&self) -> f32 {
        match self {
            ContentType::Game => 3.0 / 4.0,
            ContentType::Movie | ContentType::Anime => 2.0 / 3.0,
            ContentType::Generic => 1.0,
        }
    }
}

impl FromStr for ContentType {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to [`ContentType::Generic`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "game" | "games" => ContentType::Game,
            "movie" | "film" => ContentType::Movie,
            "anime" => ContentType::Anime,
            _ => ContentType::Generic,
        })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentType::Game => "game",
            ContentType::Movie => "movie",
            ContentType::Anime => "anime",
            ContentType::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// Review platform whose branding may appear in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    None,
    Backloggd,
    Letterboxd,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::None => "None",
            Platform::Backloggd => "Backloggd",
            Platform::Letterboxd => "Letterboxd",
        }
    }
}

impl FromStr for Platform {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Platform::None),
            "backloggd" => Ok(Platform::Backloggd),
            "letterboxd" => Ok(Platform::Letterboxd),
            _ => Err(CardError::UnknownPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name().to_lowercase())
    }
}

/// Where a cover image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CoverRef {
    Url(String),
    Path(PathBuf),
}

impl CoverRef {
    /// `http://` and `https://` sources are URLs, everything else is a path.
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CoverRef::Url(source.to_string())
        } else {
            CoverRef::Path(PathBuf::from(source))
        }
    }
}

impl From<String> for CoverRef {
    fn from(source: String) -> Self {
        CoverRef::parse(&source)
    }
}

impl From<CoverRef> for String {
    fn from(cover: CoverRef) -> Self {
        cover.to_string()
    }
}

impl fmt::Display for CoverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverRef::Url(url) => f.write_str(url),
            CoverRef::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Valid score display range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 0.0, max: 10.0 }
    }
}

impl ScoreRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: f32) -> bool {
        !score.is_nan() && score >= self.min && score <= self.max
    }

    /// Position of `score` within the range, clamped to [0, 1].
    ///
    /// NaN maps to 0. A degenerate range (max <= min) maps to 0.5.
    pub fn normalize(&self, score: f32) -> f32 {
        let span = self.max - self.min;
        if !(span > 0.0) {
            return 0.5;
        }
        if score.is_nan() {
            return 0.0;
        }
        ((score - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Default values used when a request leaves fields unset.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    pub width: u32,
    pub height: u32,
    pub corner_radius: u32,
    pub palette: PaletteRef,
    pub content_type: ContentType,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 675,
            corner_radius: 20,
            palette: PaletteRef::default(),
            content_type: ContentType::Game,
        }
    }
}

fn default_width() -> u32 {
    RequestDefaults::default().width
}
fn default_height() -> u32 {
    RequestDefaults::default().height
}
fn default_corner_radius() -> u32 {
    RequestDefaults::default().corner_radius
}

/// Everything needed to render one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCardRequest {
    #[serde(default)]
    pub title: String,

    pub score: f32,

    #[serde(default)]
    pub review_text: String,

    #[serde(default)]
    pub content_type: ContentType,

    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub platform_username: Option<String>,

    #[serde(default)]
    pub palette: PaletteRef,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_corner_radius")]
    pub corner_radius: u32,

    #[serde(default)]
    pub cover: Option<CoverRef>,

    #[serde(default)]
    pub score_range: ScoreRange,
}

impl ReviewCardRequest {
    /// Start a request using [`RequestDefaults::default`].
    pub fn builder(title: impl Into<String>, score: f32) -> ReviewCardRequestBuilder {
        Self::builder_with(&RequestDefaults::default(), title, score)
    }

    /// Start a request from explicit defaults.
    pub fn builder_with(
        defaults: &RequestDefaults,
        title: impl Into<String>,
        score: f32,
    ) -> ReviewCardRequestBuilder {
        ReviewCardRequestBuilder {
            request: ReviewCardRequest {
                title: title.into(),
                score,
                review_text: String::new(),
                content_type: defaults.content_type,
                platform: Platform::None,
                platform_username: None,
                palette: defaults.palette.clone(),
                width: defaults.width,
                height: defaults.height,
                corner_radius: defaults.corner_radius,
                cover: None,
                score_range: ScoreRange::default(),
            },
        }
    }

    /// Check dimensions and score. Runs before any rendering work.
    pub fn validate(&self) -> CardResult<()> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_DIMENSION
            || self.height > MAX_DIMENSION
        {
            return Err(CardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if !self.score_range.contains(self.score) {
            return Err(CardError::InvalidScore {
                score: self.score,
                min: self.score_range.min,
                max: self.score_range.max,
            });
        }

        Ok(())
    }

    /// Platform and handle to show in the footer, if branding applies.
    pub fn branding(&self) -> Option<(Platform, &str)> {
        if self.platform == Platform::None {
            return None;
        }
        let username = self.platform_username.as_deref()?.trim();
        let username = username.trim_start_matches('@');
        if username.is_empty() {
            return None;
        }
        Some((self.platform, username))
    }
}

/// Builder for [`ReviewCardRequest`].
#[derive(Debug, Clone)]
pub struct ReviewCardRequestBuilder {
    request: ReviewCardRequest,
}

impl ReviewCardRequestBuilder {
    pub fn review_text(mut self, text: impl Into<String>) -> Self {
        self.request.review_text = text.into();
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.request.content_type = content_type;
        self
    }

    pub fn platform(mut self, platform: Platform, username: impl Into<String>) -> Self {
        self.request.platform = platform;
        self.request.platform_username = Some(username.into());
        self
    }

    pub fn palette(mut self, palette: PaletteRef) -> Self {
        self.request.palette = palette;
        self
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.request.width = width;
        self.request.height = height;
        self
    }

    pub fn corner_radius(mut self, radius: u32) -> Self {
        self.request.corner_radius = radius;
        self
    }

    pub fn cover(mut self, cover: CoverRef) -> Self {
        self.request.cover = Some(cover);
        self
    }

    pub fn score_range(mut self, range: ScoreRange) -> Self {
        self.request.score_range = range;
        self
    }

    pub fn build(self) -> ReviewCardRequest {
        self.request
    }
}
