//! Tests for the review card request model.

use card_common::{
    BuiltinPalette, CardError, ContentType, CoverRef, PaletteRef, Platform, RequestDefaults,
    ReviewCardRequest, ScoreRange,
};

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_zero_width_is_invalid() {
    let req = ReviewCardRequest::builder("OMORI", 9.0)
        .dimensions(0, 1350)
        .build();
    match req.validate() {
        Err(CardError::InvalidDimensions { width, height }) => {
            assert_eq!(width, 0);
            assert_eq!(height, 1350);
        }
        other => panic!("expected InvalidDimensions, got {:?}", other),
    }
}

#[test]
fn test_zero_height_is_invalid() {
    let req = ReviewCardRequest::builder("OMORI", 9.0)
        .dimensions(1080, 0)
        .build();
    assert!(matches!(
        req.validate(),
        Err(CardError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_oversized_canvas_is_invalid() {
    let req = ReviewCardRequest::builder("Huge", 5.0)
        .dimensions(100_000, 100)
        .build();
    assert!(req.validate().is_err());
}

#[test]
fn test_score_bounds() {
    for score in [0.0, 5.5, 10.0] {
        let req = ReviewCardRequest::builder("t", score).build();
        assert!(req.validate().is_ok(), "score {} should be valid", score);
    }
    for score in [-0.5, 10.5, f32::NAN] {
        let req = ReviewCardRequest::builder("t", score).build();
        assert!(
            matches!(req.validate(), Err(CardError::InvalidScore { .. })),
            "score {} should be invalid",
            score
        );
    }
}

#[test]
fn test_custom_score_range() {
    let req = ReviewCardRequest::builder("t", 4.5)
        .score_range(ScoreRange::new(0.0, 5.0))
        .build();
    assert!(req.validate().is_ok());
}

#[test]
fn test_empty_title_is_valid() {
    let req = ReviewCardRequest::builder("", 7.0).build();
    assert!(req.validate().is_ok());
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_builder_uses_explicit_defaults() {
    let defaults = RequestDefaults {
        width: 1080,
        height: 1350,
        corner_radius: 24,
        palette: PaletteRef::Builtin(BuiltinPalette::Sunset),
        content_type: ContentType::Anime,
    };
    let req = ReviewCardRequest::builder_with(&defaults, "Frieren", 9.5).build();
    assert_eq!((req.width, req.height), (1080, 1350));
    assert_eq!(req.corner_radius, 24);
    assert_eq!(req.content_type, ContentType::Anime);
    assert_eq!(req.palette, PaletteRef::Builtin(BuiltinPalette::Sunset));
}

#[test]
fn test_default_builder_matches_original_card_size() {
    let req = ReviewCardRequest::builder("Elden Ring", 9.5).build();
    assert_eq!((req.width, req.height, req.corner_radius), (1200, 675, 20));
    assert_eq!(req.platform, Platform::None);
    assert!(req.cover.is_none());
}

// ============================================================================
// Request files
// ============================================================================

#[test]
fn test_deserialize_yaml_request() {
    let yaml = r#"
title: OMORI
score: 9.0
review_text: A hauntingly beautiful RPG...
content_type: game
platform: backloggd
platform_username: demo
palette: Bakuretsu Dark
width: 1080
height: 1350
corner_radius: 24
cover: https://example.com/omori.jpg
"#;
    let req: ReviewCardRequest = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(req.title, "OMORI");
    assert_eq!(req.platform, Platform::Backloggd);
    assert_eq!(req.branding(), Some((Platform::Backloggd, "demo")));
    assert_eq!(
        req.cover,
        Some(CoverRef::Url("https://example.com/omori.jpg".into()))
    );
    assert!(req.validate().is_ok());
}

#[test]
fn test_deserialize_minimal_json_request() {
    let req: ReviewCardRequest = serde_json::from_str(r#"{"score": 6}"#).unwrap();
    assert_eq!(req.title, "");
    assert_eq!((req.width, req.height), (1200, 675));
    assert_eq!(req.palette, PaletteRef::default());
    assert_eq!(req.score_range, ScoreRange::default());
}

#[test]
fn test_deserialize_unknown_palette_fails() {
    let err = serde_json::from_str::<ReviewCardRequest>(r#"{"score": 6, "palette": "Neon"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Unknown palette"));
}
