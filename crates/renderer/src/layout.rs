//! Card region layout.
//!
//! Landscape cards (width >= height) put the cover in a left column with the
//! text to its right. Portrait cards stack the cover above the text. The
//! optional branding footer spans the bottom edge in both arrangements.

use card_common::ContentType;

use crate::shapes::Region;
use crate::style::CardStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn of(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Pixel regions for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    /// Style scale factor for this canvas
    pub scale: f32,
    pub padding: f32,
    pub cover: Region,
    /// Column holding the content label, title and review text
    pub text: Region,
    /// Top-right corner the score badge hangs from
    pub badge_anchor: (i32, i32),
    pub footer: Option<Region>,
}

impl CardLayout {
    pub fn compute(
        width: u32,
        height: u32,
        content_type: ContentType,
        with_footer: bool,
        style: &CardStyle,
    ) -> Self {
        let orientation = Orientation::of(width, height);
        let scale = style.scale_for(width, height);
        let w = width as f32;
        let h = height as f32;

        let padding = (style.padding * scale).min(w.min(h) / 4.0);
        let aspect = content_type.cover_aspect();

        let footer_h = if with_footer {
            (style.platform_logo_size * scale).min((h - 2.0 * padding).max(0.0))
        } else {
            0.0
        };
        let content_bottom = if with_footer {
            h - padding - footer_h - padding
        } else {
            h - padding
        };
        let avail_h = (content_bottom - padding).max(0.0);

        let (cover, text, badge_anchor) = match orientation {
            Orientation::Landscape => {
                let cover_w = (w * style.cover_width_ratio).min(avail_h * aspect);
                let cover_h = cover_w / aspect;
                let cover = region(padding, padding, cover_w, cover_h);

                let text_x = padding + cover_w + padding;
                let text = region(text_x, padding, w - padding - text_x, avail_h);
                (cover, text, ((w - padding).round() as i32, padding.round() as i32))
            }
            Orientation::Portrait => {
                let mut cover_h = (h * style.cover_height_ratio).min(avail_h);
                let mut cover_w = cover_h * aspect;
                let max_w = (w - 2.0 * padding).max(0.0);
                if cover_w > max_w {
                    cover_w = max_w;
                    cover_h = cover_w / aspect;
                }
                let cover = region((w - cover_w) / 2.0, padding, cover_w, cover_h);

                let text_y = padding + cover_h + padding;
                let text = region(padding, text_y, max_w, content_bottom - text_y);
                (cover, text, ((w - padding).round() as i32, text.y))
            }
        };

        let footer = with_footer
            .then(|| region(padding, h - padding - footer_h, w - 2.0 * padding, footer_h));

        Self {
            width,
            height,
            orientation,
            scale,
            padding,
            cover,
            text,
            badge_anchor,
            footer,
        }
    }

    pub fn canvas(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }
}

/// Round a float rectangle's edges to pixels, collapsing negative sizes to zero.
fn region(x: f32, y: f32, width: f32, height: f32) -> Region {
    let x0 = x.round() as i32;
    let y0 = y.round() as i32;
    let x1 = (x + width.max(0.0)).round() as i32;
    let y1 = (y + height.max(0.0)).round() as i32;
    Region::new(x0, y0, (x1 - x0).max(0) as u32, (y1 - y0).max(0) as u32)
}
