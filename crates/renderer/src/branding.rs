//! Platform branding footer.

use card_common::{Color, Palette, Platform};
use image::RgbaImage;
use rusttype::Font;

use crate::shapes::{fill_circle, Region};
use crate::text::{self, Fonts};

pub const BACKLOGGD_PURPLE: Color = Color::rgb(139, 92, 246);
pub const LETTERBOXD_ORANGE: Color = Color::rgb(255, 128, 0);
pub const LETTERBOXD_GREEN: Color = Color::rgb(0, 224, 84);
pub const LETTERBOXD_BLUE: Color = Color::rgb(64, 188, 244);

/// Footer caption, e.g. `Backloggd @demo`.
pub fn footer_text(platform: Platform, username: &str) -> String {
    format!("{} @{}", platform.display_name(), username)
}

/// Draw the platform glyph in a `size` x `size` square at `(x, y)`.
pub fn draw_logo(
    img: &mut RgbaImage,
    platform: Platform,
    x: f32,
    y: f32,
    size: f32,
    font: &Font<'_>,
) {
    let r = size / 2.0;
    let (cx, cy) = (x + r, y + r);

    match platform {
        Platform::None => {}
        Platform::Backloggd => {
            fill_circle(img, cx, cy, r, BACKLOGGD_PURPLE);
            let glyph_size = size * 0.6;
            let gw = text::measure_width(font, glyph_size, "B");
            let gh = text::line_height(font, glyph_size);
            text::draw_line(
                img,
                font,
                glyph_size,
                Color::white(),
                (cx - gw / 2.0).round() as i32,
                (cy - gh / 2.0).round() as i32,
                "B",
            );
        }
        Platform::Letterboxd => {
            let dot = size * 0.16;
            for (offset, color) in [
                (0.2, LETTERBOXD_ORANGE),
                (0.5, LETTERBOXD_GREEN),
                (0.8, LETTERBOXD_BLUE),
            ] {
                fill_circle(img, x + size * offset, cy, dot, color);
            }
        }
    }
}

/// Draw glyph plus caption inside `footer`, vertically centred.
pub fn draw_footer(
    img: &mut RgbaImage,
    footer: Region,
    platform: Platform,
    username: &str,
    palette: &Palette,
    font_size: f32,
    fonts: &Fonts,
) {
    if footer.is_empty() || platform == Platform::None {
        return;
    }

    let size = footer.height as f32;
    draw_logo(img, platform, footer.x as f32, footer.y as f32, size, &fonts.bold);

    let caption_x = footer.x as f32 + size + size * 0.4;
    let max_width = footer.right() as f32 - caption_x;
    if max_width <= 0.0 {
        return;
    }

    let caption = footer_text(platform, username);
    let caption = if text::measure_width(&fonts.regular, font_size, &caption) > max_width {
        text::ellipsize(&fonts.regular, font_size, &caption, max_width)
    } else {
        caption
    };
    let text_h = text::line_height(&fonts.regular, font_size);
    let caption_y = footer.y as f32 + (size - text_h) / 2.0;

    text::draw_line(
        img,
        &fonts.regular,
        font_size,
        palette.text_secondary,
        caption_x.round() as i32,
        caption_y.round() as i32,
        &caption,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_footer_text() {
        assert_eq!(footer_text(Platform::Backloggd, "demo"), "Backloggd @demo");
        assert_eq!(footer_text(Platform::Letterboxd, "cinephile"), "Letterboxd @cinephile");
    }

    #[test]
    fn test_backloggd_logo_is_purple_disc() {
        let fonts = Fonts::embedded().unwrap();
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        draw_logo(&mut img, Platform::Backloggd, 4.0, 4.0, 32.0, &fonts.bold);
        // Left edge of the disc, clear of the letter
        assert_eq!(img.get_pixel(8, 20), &Rgba([139, 92, 246, 255]));
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_letterboxd_logo_has_three_colors() {
        let fonts = Fonts::embedded().unwrap();
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        draw_logo(&mut img, Platform::Letterboxd, 0.0, 0.0, 64.0, &fonts.bold);
        let has = |c: Color| img.pixels().any(|p| p == &Rgba(c.to_array()));
        assert!(has(LETTERBOXD_ORANGE));
        assert!(has(LETTERBOXD_GREEN));
        assert!(has(LETTERBOXD_BLUE));
    }

    #[test]
    fn test_no_platform_draws_nothing() {
        let fonts = Fonts::embedded().unwrap();
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([9, 9, 9, 255]));
        draw_logo(&mut img, Platform::None, 0.0, 0.0, 20.0, &fonts.bold);
        assert!(img.pixels().all(|p| p == &Rgba([9, 9, 9, 255])));
    }
}
