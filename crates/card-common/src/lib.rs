//! Common types shared across the review card workspace.

pub mod color;
pub mod error;
pub mod palette;
pub mod request;

pub use color::Color;
pub use error::{CardError, CardResult};
pub use palette::{
    resolve, BuiltinPalette, CustomPalette, Palette, PaletteOverrides, PaletteRef,
};
pub use request::{
    ContentType, CoverRef, Platform, RequestDefaults, ReviewCardRequest,
    ReviewCardRequestBuilder, ScoreRange, MAX_DIMENSION,
};
