//! Generators for synthetic cover art and encoded image bytes.
//!
//! Covers are deterministic so rendered cards can be compared pixel for pixel.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};

/// A cover filled with one color.
pub fn solid_cover(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// A cover with a diagonal gradient from dark blue (top-left) to orange
/// (bottom-right). Has far more than 256 distinct colors at moderate sizes.
///
/// ```
/// use test_utils::gradient_cover;
///
/// let cover = gradient_cover(300, 400);
/// assert_eq!(cover.dimensions(), (300, 400));
/// ```
pub fn gradient_cover(width: u32, height: u32) -> RgbaImage {
    let span = (width + height).max(1) as f32;
    RgbaImage::from_fn(width, height, |x, y| {
        let t = (x + y) as f32 / span;
        let u = x as f32 / width.max(1) as f32;
        Rgba([
            (20.0 + t * 230.0) as u8,
            (40.0 + u * 100.0) as u8,
            (120.0 - t * 100.0) as u8,
            255,
        ])
    })
}

/// A two-color checkerboard with square cells of `cell` pixels.
pub fn checker_cover(width: u32, height: u32, cell: u32) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([30, 30, 30, 255])
        }
    })
}

/// PNG-encode an image, as a cover server would return it.
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .expect("Failed to encode test PNG");
    buf
}

/// Bytes that no image decoder accepts.
pub fn garbage_bytes() -> Vec<u8> {
    b"<html><body>404 Not Found</body></html>".to_vec()
}

/// Number of pixels exactly equal to `rgba`.
pub fn count_pixels(image: &RgbaImage, rgba: [u8; 4]) -> usize {
    image.pixels().filter(|p| p.0 == rgba).count()
}

/// Number of pixels exactly equal to `rgba` inside the given rectangle.
pub fn count_pixels_in(
    image: &RgbaImage,
    rgba: [u8; 4],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> usize {
    let x1 = (x + width).min(image.width());
    let y1 = (y + height).min(image.height());
    let mut count = 0;
    for py in y.min(y1)..y1 {
        for px in x.min(x1)..x1 {
            if image.get_pixel(px, py).0 == rgba {
                count += 1;
            }
        }
    }
    count
}
