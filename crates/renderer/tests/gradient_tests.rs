//! Tests for score-to-color mapping.

use card_common::{Color, ScoreRange};
use renderer::gradient::{
    color_for_score, gradient_position, GradientStop, ScoreGradient, ANCHOR_HIGH, ANCHOR_LOW,
    ANCHOR_MID,
};
use test_utils::{assert_approx_eq, assert_color_close};

fn max_channel_diff(a: Color, b: Color) -> u8 {
    a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
}

// ============================================================================
// Monotonicity and continuity
// ============================================================================

#[test]
fn test_position_is_monotonic() {
    let range = ScoreRange::default();
    let mut previous = gradient_position(-2.0, range);
    for step in -20..=120 {
        let score = step as f32 * 0.1;
        let position = gradient_position(score, range);
        assert!(
            position >= previous,
            "position decreased at score {}: {} < {}",
            score,
            position,
            previous
        );
        assert!((0.0..=1.0).contains(&position));
        previous = position;
    }
}

#[test]
fn test_adjacent_scores_give_close_colors() {
    let range = ScoreRange::default();
    for step in 0..100 {
        let a = color_for_score(step as f32 * 0.1, range);
        let b = color_for_score((step + 1) as f32 * 0.1, range);
        assert!(
            max_channel_diff(a, b) <= 5,
            "jump between {:?} and {:?} at step {}",
            a,
            b,
            step
        );
    }
}

// ============================================================================
// Anchors and ranges
// ============================================================================

#[test]
fn test_anchor_scores() {
    let range = ScoreRange::default();
    assert_eq!(color_for_score(0.0, range), ANCHOR_LOW);
    assert_eq!(color_for_score(5.0, range), ANCHOR_MID);
    assert_eq!(color_for_score(10.0, range), ANCHOR_HIGH);
}

#[test]
fn test_quarter_points_blend_neighbours() {
    let range = ScoreRange::default();
    assert_color_close!(
        color_for_score(2.5, range),
        ANCHOR_LOW.lerp(&ANCHOR_MID, 0.5),
        1
    );
    assert_color_close!(
        color_for_score(7.5, range),
        ANCHOR_MID.lerp(&ANCHOR_HIGH, 0.5),
        1
    );
}

#[test]
fn test_custom_range_normalizes() {
    let five_star = ScoreRange::new(0.0, 5.0);
    assert_eq!(color_for_score(5.0, five_star), ANCHOR_HIGH);
    assert_eq!(color_for_score(2.5, five_star), ANCHOR_MID);
    assert_approx_eq!(gradient_position(4.0, five_star), 0.8, 1e-6);

    let hundred = ScoreRange::new(0.0, 100.0);
    assert_eq!(
        color_for_score(90.0, hundred),
        color_for_score(9.0, ScoreRange::default())
    );
}

#[test]
fn test_degenerate_range_maps_to_mid() {
    let range = ScoreRange::new(3.0, 3.0);
    assert_eq!(color_for_score(3.0, range), ANCHOR_MID);
    assert_eq!(color_for_score(100.0, range), ANCHOR_MID);
}

// ============================================================================
// Custom gradients
// ============================================================================

#[test]
fn test_two_stop_gradient() {
    let gradient = ScoreGradient::new(vec![
        GradientStop::new(0.0, Color::rgb(0, 0, 0)),
        GradientStop::new(1.0, Color::rgb(200, 100, 0)),
    ])
    .unwrap();
    assert_eq!(gradient.color_at(0.5), Color::rgb(100, 50, 0));
    assert_eq!(
        gradient.color_for_score(10.0, ScoreRange::default()),
        Color::rgb(200, 100, 0)
    );
}

#[test]
fn test_stops_not_spanning_full_range_clamp() {
    let gradient = ScoreGradient::new(vec![
        GradientStop::new(0.2, Color::rgb(10, 10, 10)),
        GradientStop::new(0.8, Color::rgb(90, 90, 90)),
    ])
    .unwrap();
    assert_eq!(gradient.color_at(0.0), Color::rgb(10, 10, 10));
    assert_eq!(gradient.color_at(1.0), Color::rgb(90, 90, 90));
    assert_eq!(gradient.color_at(0.5), Color::rgb(50, 50, 50));
}

#[test]
fn test_default_gradient_has_three_stops() {
    let gradient = ScoreGradient::default();
    let positions: Vec<f32> = gradient.stops().iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0.0, 0.5, 1.0]);
}
