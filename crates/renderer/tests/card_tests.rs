//! Integration tests for card rendering.
//!
//! Covers the share-card scenarios end to end: layout regions, badge color,
//! branding, placeholder, rounded corners and determinism.

use card_common::{
    resolve, BuiltinPalette, CardError, Color, ContentType, PaletteRef, Platform,
    ReviewCardRequest,
};
use image::{Rgba, RgbaImage};
use renderer::branding::{BACKLOGGD_PURPLE, LETTERBOXD_ORANGE};
use renderer::gradient::color_for_score;
use renderer::layout::CardLayout;
use renderer::shapes::Region;
use renderer::{render, render_with_style, CardStyle};
use test_utils::{
    classic_request, count_pixels, count_pixels_in, gradient_cover, movie_request, omori_request,
    small_request, solid_cover,
};

fn near(p: &Rgba<u8>, c: Color, tolerance: u8) -> bool {
    p[0].abs_diff(c.r) <= tolerance
        && p[1].abs_diff(c.g) <= tolerance
        && p[2].abs_diff(c.b) <= tolerance
        && p[3] == 255
}

fn count_near(img: &RgbaImage, region: Region, color: Color, tolerance: u8) -> usize {
    let mut count = 0;
    for y in region.y.max(0) as u32..(region.bottom().max(0) as u32).min(img.height()) {
        for x in region.x.max(0) as u32..(region.right().max(0) as u32).min(img.width()) {
            if near(img.get_pixel(x, y), color, tolerance) {
                count += 1;
            }
        }
    }
    count
}

fn layout_for(req: &ReviewCardRequest) -> CardLayout {
    CardLayout::compute(
        req.width,
        req.height,
        req.content_type,
        req.branding().is_some(),
        &CardStyle::default(),
    )
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_omori_share_card() {
    let req = omori_request();
    let card = render(&req, None).unwrap();
    let img = card.image();
    assert_eq!(img.dimensions(), (1080, 1350));

    let layout = layout_for(&req);
    let canvas = layout.canvas();

    // Badge text is drawn in the mapped score color, which leans green at 9/10
    let badge_color = color_for_score(9.0, req.score_range);
    assert!(badge_color.g > badge_color.r);
    assert!(count_near(img, canvas, badge_color, 6) > 20);

    // Title glyphs in white inside the text column
    assert!(count_near(img, layout.text, Color::white(), 6) > 50);

    // Backloggd glyph in the footer
    let footer = layout.footer.expect("branded card has a footer");
    assert!(count_near(img, footer, BACKLOGGD_PURPLE, 0) > 100);
}

#[test]
fn test_classic_landscape_card() {
    let req = classic_request();
    let card = render(&req, Some(&gradient_cover(300, 400))).unwrap();
    assert_eq!((card.width(), card.height()), (1200, 675));

    let layout = layout_for(&req);
    assert!(layout.cover.right() < layout.text.x);
    assert!(layout.footer.is_none());
}

#[test]
fn test_letterboxd_footer() {
    let req = movie_request();
    let card = render(&req, None).unwrap();
    let footer = layout_for(&req).footer.unwrap();
    assert!(count_near(card.image(), footer, LETTERBOXD_ORANGE, 0) > 10);
    assert_eq!(count_pixels(card.image(), BACKLOGGD_PURPLE.to_array()), 0);
}

#[test]
fn test_missing_username_hides_footer() {
    let req = ReviewCardRequest::builder("OMORI", 9.0)
        .platform(Platform::Backloggd, "")
        .dimensions(600, 340)
        .build();
    let card = render(&req, None).unwrap();
    assert_eq!(count_pixels(card.image(), BACKLOGGD_PURPLE.to_array()), 0);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_zero_width_fails_before_rendering() {
    let req = ReviewCardRequest::builder("OMORI", 9.0)
        .dimensions(0, 1350)
        .build();
    assert!(matches!(
        render(&req, None),
        Err(CardError::InvalidDimensions { width: 0, height: 1350 })
    ));
}

#[test]
fn test_score_out_of_range_fails() {
    let req = ReviewCardRequest::builder("Too Good", 11.0).build();
    assert!(matches!(
        render(&req, None),
        Err(CardError::InvalidScore { .. })
    ));
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_output_matches_requested_size() {
    for (w, h) in [(1, 1), (2, 300), (300, 2), (64, 64), (320, 180), (500, 900)] {
        let req = ReviewCardRequest::builder("Size", 5.0)
            .review_text("Some words to wrap")
            .platform(Platform::Letterboxd, "sizes")
            .dimensions(w, h)
            .build();
        let card = render(&req, Some(&solid_cover(50, 50, [200, 0, 0]))).unwrap();
        assert_eq!((card.width(), card.height()), (w, h));
    }
}

#[test]
fn test_rounded_corners_are_transparent() {
    let req = omori_request();
    let card = render(&req, None).unwrap();
    let img = card.image();
    let (w, h) = img.dimensions();
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert_eq!(img.get_pixel(x, y)[3], 0, "corner ({}, {}) should be clear", x, y);
    }

    let bg = Rgba(resolve(&req.palette).background.to_array());
    assert_eq!(img.get_pixel(w / 2, 2), &bg);
    assert_eq!(img.get_pixel(2, h / 2), &bg);
}

#[test]
fn test_zero_radius_keeps_square_corners() {
    let req = ReviewCardRequest::builder("Square", 5.0)
        .dimensions(200, 120)
        .corner_radius(0)
        .build();
    let card = render(&req, None).unwrap();
    assert_eq!(card.image().get_pixel(0, 0)[3], 255);
}

#[test]
fn test_generic_content_uses_square_cover() {
    let req = ReviewCardRequest::builder("Podcast", 7.0)
        .content_type(ContentType::Generic)
        .build();
    let layout = layout_for(&req);
    assert_eq!(layout.cover.width, layout.cover.height);
    render(&req, None).unwrap();
}

// ============================================================================
// Cover and placeholder
// ============================================================================

#[test]
fn test_cover_fills_cover_region() {
    let req = classic_request();
    let card = render(&req, Some(&solid_cover(120, 90, [200, 30, 30]))).unwrap();
    let cover = layout_for(&req).cover;
    let cx = (cover.x + cover.width as i32 / 2) as u32;
    let cy = (cover.y + cover.height as i32 / 2) as u32;
    assert_eq!(card.image().get_pixel(cx, cy), &Rgba([200, 30, 30, 255]));
}

#[test]
fn test_sliver_cover_fills_cover_region() {
    let req = classic_request();
    let card = render(&req, Some(&solid_cover(1, 4000, [30, 160, 30]))).unwrap();
    let cover = layout_for(&req).cover;
    let filled = count_pixels_in(
        card.image(),
        [30, 160, 30, 255],
        cover.x as u32,
        cover.y as u32,
        cover.width,
        cover.height,
    );
    assert!(filled > (cover.width * cover.height) as usize * 9 / 10);
}

#[test]
fn test_placeholder_when_no_cover() {
    let req = classic_request();
    let card = render(&req, None).unwrap();
    let palette = resolve(&req.palette);
    let fill = palette.background.lerp(&palette.accent, 0.25);
    let cover = layout_for(&req).cover;
    let filled = count_pixels_in(
        card.image(),
        fill.to_array(),
        cover.x as u32,
        cover.y as u32,
        cover.width,
        cover.height,
    );
    // Most of the placeholder is the tinted fill; the rest is the label
    assert!(filled > (cover.width * cover.height) as usize / 2);
}

#[test]
fn test_empty_cover_bitmap_uses_placeholder() {
    let req = small_request(6.0);
    let empty = RgbaImage::new(0, 0);
    assert_eq!(render(&req, Some(&empty)).unwrap(), render(&req, None).unwrap());
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_empty_title_and_review_render_blank() {
    let req = ReviewCardRequest::builder("", 5.0)
        .palette(PaletteRef::Builtin(BuiltinPalette::BakuretsuDark))
        .build();
    let card = render(&req, None).unwrap();
    let layout = layout_for(&req);
    assert_eq!(count_near(card.image(), layout.text, Color::white(), 40), 0);
}

#[test]
fn test_style_can_hide_content_label() {
    let req = ReviewCardRequest::builder("", 5.0)
        .palette(PaletteRef::Builtin(BuiltinPalette::BakuretsuDark))
        .dimensions(2400, 1350)
        .build();
    let accent = resolve(&req.palette).accent;
    let layout = layout_for(&req);

    let with_label = render(&req, None).unwrap();
    assert!(count_near(with_label.image(), layout.text, accent, 10) > 0);

    let style = CardStyle {
        show_content_label: false,
        ..Default::default()
    };
    let without_label = render_with_style(&req, None, &style).unwrap();
    assert_eq!(count_near(without_label.image(), layout.text, accent, 10), 0);
}

#[test]
fn test_long_review_stops_above_footer() {
    let mut req = movie_request();
    req.review_text = test_utils::LONG_REVIEW.repeat(12);
    let card = render(&req, None).unwrap();
    let layout = layout_for(&req);
    let footer = layout.footer.expect("movie card has a footer");
    let secondary = resolve(&req.palette).text_secondary;

    // The review is drawn in the text column
    assert!(count_near(card.image(), layout.text, secondary, 30) > 0);

    // and nothing of it spills into the gap above the footer
    let gap = Region::new(
        layout.text.x,
        layout.text.bottom(),
        layout.text.width,
        (footer.y - layout.text.bottom()).max(0) as u32,
    );
    assert!(gap.height > 0);
    assert_eq!(count_near(card.image(), gap, secondary, 30), 0);
}

#[test]
fn test_text_past_the_fold_is_not_drawn() {
    let mut short = movie_request();
    short.review_text = test_utils::LONG_REVIEW.repeat(12);
    let mut long = short.clone();
    long.review_text = test_utils::LONG_REVIEW.repeat(20);
    assert_eq!(render(&short, None).unwrap(), render(&long, None).unwrap());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_render_is_deterministic() {
    let req = classic_request();
    let cover = gradient_cover(280, 420);
    let a = render(&req, Some(&cover)).unwrap();
    let b = render(&req, Some(&cover)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.encode_png().unwrap(), b.encode_png().unwrap());
}

#[test]
fn test_palettes_change_background() {
    let mut backgrounds = std::collections::HashSet::new();
    for builtin in BuiltinPalette::ALL {
        let req = ReviewCardRequest::builder("Palette", 5.0)
            .palette(PaletteRef::Builtin(builtin))
            .dimensions(200, 120)
            .build();
        let card = render(&req, None).unwrap();
        backgrounds.insert(card.image().get_pixel(100, 2).0);
    }
    assert_eq!(backgrounds.len(), BuiltinPalette::ALL.len());
}
