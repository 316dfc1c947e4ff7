//! Anti-aliased shape primitives and alpha compositing on RGBA buffers.
//!
//! Coverage is sampled once per pixel at the pixel centre using signed
//! distance functions, so output is deterministic and independent of
//! drawing order within a shape.

use card_common::Color;
use image::{Rgba, RgbaImage};

/// Axis-aligned pixel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, other: &Region) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: &Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Signed distance from `(px, py)` to a rounded rectangle; negative inside.
fn rounded_rect_distance(px: f32, py: f32, region: &Region, radius: f32) -> f32 {
    let half_w = region.width as f32 / 2.0;
    let half_h = region.height as f32 / 2.0;
    let radius = radius.min(half_w).min(half_h).max(0.0);

    let cx = region.x as f32 + half_w;
    let cy = region.y as f32 + half_h;

    let qx = (px - cx).abs() - (half_w - radius);
    let qy = (py - cy).abs() - (half_h - radius);

    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Fraction of the pixel at `(x, y)` covered by the rounded rectangle.
pub fn rounded_rect_coverage(x: u32, y: u32, region: &Region, radius: f32) -> f32 {
    let d = rounded_rect_distance(x as f32 + 0.5, y as f32 + 0.5, region, radius);
    (0.5 - d).clamp(0.0, 1.0)
}

/// Source-over blend of `color` onto the pixel at `(x, y)`, scaled by `coverage`.
///
/// Out-of-bounds coordinates are ignored.
pub fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let src_a = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }

    let dst = img.get_pixel_mut(x as u32, y as u32);
    let Rgba([dr, dg, db, da]) = *dst;
    let dst_a = da as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let channel = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    *dst = Rgba([
        channel(color.r, dr),
        channel(color.g, dg),
        channel(color.b, db),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Fill a rounded rectangle with anti-aliased edges.
pub fn fill_rounded_rect(img: &mut RgbaImage, region: Region, radius: f32, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(img, &region) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            let coverage = rounded_rect_coverage(x, y, &region, radius);
            if coverage > 0.0 {
                blend_pixel(img, x as i32, y as i32, color, coverage);
            }
        }
    }
}

/// Fill a circle with anti-aliased edges.
pub fn fill_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Color) {
    let bounds = Region::new(
        (cx - radius).floor() as i32,
        (cy - radius).floor() as i32,
        (radius * 2.0).ceil() as u32 + 2,
        (radius * 2.0).ceil() as u32 + 2,
    );
    let Some((x0, y0, x1, y1)) = clip(img, &bounds) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt() - radius;
            let coverage = (0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(img, x as i32, y as i32, color, coverage);
            }
        }
    }
}

/// Multiply every pixel's alpha by its rounded-rect coverage over the whole
/// image. Pixels outside the rounded rectangle become fully transparent.
pub fn apply_rounded_mask(img: &mut RgbaImage, radius: f32) {
    if radius <= 0.0 {
        return;
    }
    let region = Region::new(0, 0, img.width(), img.height());
    let radius = radius.min(img.width() as f32 / 2.0).min(img.height() as f32 / 2.0);
    // Only the corner squares can be partially covered.
    let corner = radius.ceil() as u32 + 1;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let in_corner_x = x < corner || x + corner >= region.width;
        let in_corner_y = y < corner || y + corner >= region.height;
        if !(in_corner_x && in_corner_y) {
            continue;
        }
        let coverage = rounded_rect_coverage(x, y, &region, radius);
        if coverage >= 1.0 {
            continue;
        }
        if coverage <= 0.0 {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            pixel[3] = (pixel[3] as f32 * coverage).round() as u8;
        }
    }
}

/// Source-over composite `src` onto `dst` with its top-left at `(x, y)`.
pub fn composite(dst: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        if a == 0 {
            continue;
        }
        blend_pixel(dst, x + sx as i32, y + sy as i32, Color::new(r, g, b, a), 1.0);
    }
}

/// Intersect a region with the image bounds as `(x0, y0, x1, y1)`.
fn clip(img: &RgbaImage, region: &Region) -> Option<(u32, u32, u32, u32)> {
    let x0 = region.x.max(0);
    let y0 = region.y.max(0);
    let x1 = region.right().min(img.width() as i32);
    let y1 = region.bottom().min(img.height() as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}
