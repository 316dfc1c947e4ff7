//! Common test fixtures for review card tests.
//!
//! Requests here mirror the cards people actually make: a portrait Backloggd
//! share card, the classic landscape card and a Letterboxd movie card.

use card_common::{
    BuiltinPalette, ContentType, CoverRef, PaletteRef, Platform, ReviewCardRequest,
};

/// Review text long enough to need wrapping and truncation on any card.
pub const LONG_REVIEW: &str = "A hauntingly beautiful RPG that sneaks up on you. \
    What starts as a whimsical dream world slowly peels back into something raw, \
    sad and honest about guilt and the friends we push away. The soundtrack is \
    incredible, the art is unforgettable, and the ending stayed with me for days. \
    Some of the side areas drag and the combat never really evolves, but none of \
    that matters when the story lands the way it does. Play it blind if you can.";

/// Portrait Backloggd card: OMORI, 9.0, "Bakuretsu Dark", 1080x1350, radius 24.
pub fn omori_request() -> ReviewCardRequest {
    ReviewCardRequest::builder("OMORI", 9.0)
        .review_text("A hauntingly beautiful RPG...")
        .content_type(ContentType::Game)
        .platform(Platform::Backloggd, "demo")
        .palette(PaletteRef::Builtin(BuiltinPalette::BakuretsuDark))
        .dimensions(1080, 1350)
        .corner_radius(24)
        .build()
}

/// Classic 1200x675 landscape card without branding.
pub fn classic_request() -> ReviewCardRequest {
    ReviewCardRequest::builder("Elden Ring", 9.5)
        .review_text(LONG_REVIEW)
        .palette(PaletteRef::Builtin(BuiltinPalette::MidnightBlue))
        .build()
}

/// Landscape Letterboxd movie card.
pub fn movie_request() -> ReviewCardRequest {
    ReviewCardRequest::builder("Perfect Days", 8.5)
        .review_text("Quiet, patient and warm.")
        .content_type(ContentType::Movie)
        .platform(Platform::Letterboxd, "cinephile")
        .palette(PaletteRef::Builtin(BuiltinPalette::Sunset))
        .build()
}

/// Small card for quick tests; renders in a few milliseconds.
pub fn small_request(score: f32) -> ReviewCardRequest {
    ReviewCardRequest::builder("Celeste", score)
        .review_text("Tight controls and a kind heart.")
        .dimensions(320, 180)
        .corner_radius(12)
        .build()
}

/// Request that points at a cover URL.
pub fn request_with_cover(url: &str) -> ReviewCardRequest {
    ReviewCardRequest::builder("Hollow Knight", 9.0)
        .cover(CoverRef::parse(url))
        .dimensions(600, 340)
        .build()
}

/// YAML request file equivalent to [`omori_request`].
pub const SAMPLE_REQUEST_YAML: &str = r#"title: OMORI
score: 9.0
review_text: A hauntingly beautiful RPG...
content_type: game
platform: backloggd
platform_username: demo
palette: Bakuretsu Dark
width: 1080
height: 1350
corner_radius: 24
"#;

/// JSON request file with custom palette colors.
pub const SAMPLE_REQUEST_JSON: &str = r##"{
  "title": "Frieren",
  "score": 9.5,
  "review_text": "Gentle, melancholic and funny.",
  "content_type": "anime",
  "palette": {
    "background": "#101820",
    "accent": "#f2aa4c",
    "text_primary": "#ffffff",
    "text_secondary": "#b0b8c0"
  },
  "width": 800,
  "height": 450
}"##;

/// Batch file with two valid entries and one invalid (zero width) entry.
pub const SAMPLE_BATCH_YAML: &str = r#"- output: omori.png
  request:
    title: OMORI
    score: 9.0
    width: 540
    height: 675
- output: celeste.png
  request:
    title: Celeste
    score: 8.5
    palette: forest
    width: 400
    height: 225
- output: broken.png
  request:
    title: Broken
    score: 5
    width: 0
    height: 200
"#;

/// Style override file.
pub const SAMPLE_STYLE_YAML: &str = r#"padding: 24
title_font_size: 56
title_max_lines: 3
placeholder_text: "No Art"
"#;
