//! Shared test helpers for the review card crates.
//!
//! Pulled in as a dev-dependency. Provides sample requests (the OMORI portrait
//! card among them), request/batch/style file contents, synthetic covers,
//! temp directories and tolerance assertions for floats and colors.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Assert two numbers are within `tolerance` of each other, e.g. gradient
/// positions or layout scale factors.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (l, r, tol) = ($left as f64, $right as f64, $tolerance as f64);
        if (l - r).abs() > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{}`,\n right: `{}`,\n tolerance: `{}`",
                l, r, tol
            );
        }
    }};
}

/// Assert that two colors differ by at most `tolerance` in every channel.
///
/// ```ignore
/// use card_common::Color;
/// use test_utils::assert_color_close;
///
/// assert_color_close!(Color::rgb(10, 20, 30), Color::rgb(11, 19, 30), 2);
/// ```
#[macro_export]
macro_rules! assert_color_close {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: [u8; 4] = $left.to_array();
        let right: [u8; 4] = $right.to_array();
        let tolerance: u8 = $tolerance;
        for (l, r) in left.iter().zip(right.iter()) {
            if l.abs_diff(*r) > tolerance {
                panic!(
                    "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n tolerance: `{}`",
                    left, right, tolerance
                );
            }
        }
    }};
}
