//! Review card compositing.
//!
//! A card is drawn in one pass over a single RGBA canvas: background, cover
//! (or placeholder), score badge, content label, title, review text and the
//! optional platform footer. The outer rounded-corner mask is applied last.

use card_common::{resolve, CardResult, Color, Palette, ReviewCardRequest};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument};

use crate::branding;
use crate::gradient::color_for_score;
use crate::layout::CardLayout;
use crate::png;
use crate::shapes::{apply_rounded_mask, composite, fill_rounded_rect, Region};
use crate::style::CardStyle;
use crate::text::{self, Fonts};

/// Badge fill: background tinted this far toward the score color.
const BADGE_TINT: f32 = 0.18;
/// Placeholder fill: background tinted this far toward the accent.
const PLACEHOLDER_TINT: f32 = 0.25;

/// A finished card bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCard {
    image: RgbaImage,
}

impl RenderedCard {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode as PNG (indexed when the card has few enough colors).
    pub fn encode_png(&self) -> CardResult<Vec<u8>> {
        png::encode_image(&self.image)
    }
}

/// Render a card with the default [`CardStyle`].
pub fn render(request: &ReviewCardRequest, cover: Option<&RgbaImage>) -> CardResult<RenderedCard> {
    render_with_style(request, cover, &CardStyle::default())
}

/// Render a card.
///
/// The request is validated before any pixel work; an invalid request never
/// produces partial output. `cover` is the decoded cover bitmap, or `None`
/// for the placeholder.
#[instrument(skip_all, fields(title = %request.title, width = request.width, height = request.height))]
pub fn render_with_style(
    request: &ReviewCardRequest,
    cover: Option<&RgbaImage>,
    style: &CardStyle,
) -> CardResult<RenderedCard> {
    request.validate()?;
    let fonts = Fonts::embedded()?;

    let palette = resolve(&request.palette);
    let branding = request.branding();
    let layout = CardLayout::compute(
        request.width,
        request.height,
        request.content_type,
        branding.is_some(),
        style,
    );
    let s = layout.scale;

    let mut img = RgbaImage::from_pixel(
        request.width,
        request.height,
        Rgba(palette.background.to_array()),
    );

    let cover_radius = style.cover_corner_radius * s;
    match cover.filter(|c| c.width() > 0 && c.height() > 0) {
        Some(src) => draw_cover(&mut img, layout.cover, src, cover_radius),
        None => draw_placeholder(&mut img, layout.cover, cover_radius, &palette, style, s, fonts),
    }

    let score_color = color_for_score(request.score, request.score_range);
    let score_text = text::format_score(request.score, request.score_range);
    let badge = draw_badge(&mut img, &layout, &score_text, score_color, &palette, style, fonts);

    draw_text_column(&mut img, &layout, badge, request, &palette, style, fonts);

    if let (Some(footer), Some((platform, username))) = (layout.footer, branding) {
        branding::draw_footer(
            &mut img,
            footer,
            platform,
            username,
            &palette,
            style.platform_font_size * s,
            fonts,
        );
    }

    apply_rounded_mask(&mut img, request.corner_radius as f32);

    debug!(
        palette = %palette.name,
        score = request.score,
        content_type = %request.content_type,
        has_cover = cover.is_some(),
        "Rendered review card"
    );

    Ok(RenderedCard { image: img })
}

/// Scale `src` to cover `width` x `height` preserving aspect ratio, then
/// centre-crop to exactly that size.
pub fn fit_cover(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if src.width() == 0 || src.height() == 0 || width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    // Crop the source to the target aspect first so the resize never
    // allocates more than the target
    let target_aspect = width as f64 / height as f64;
    let src_aspect = src.width() as f64 / src.height() as f64;
    let (crop_w, crop_h) = if src_aspect > target_aspect {
        let w = (src.height() as f64 * target_aspect).round() as u32;
        (w.clamp(1, src.width()), src.height())
    } else {
        let h = (src.width() as f64 / target_aspect).round() as u32;
        (src.width(), h.clamp(1, src.height()))
    };
    let x = (src.width() - crop_w) / 2;
    let y = (src.height() - crop_h) / 2;

    let cropped = imageops::crop_imm(src, x, y, crop_w, crop_h).to_image();
    imageops::resize(&cropped, width, height, FilterType::Lanczos3)
}

fn draw_cover(img: &mut RgbaImage, region: Region, src: &RgbaImage, radius: f32) {
    if region.is_empty() {
        return;
    }
    let mut fitted = fit_cover(src, region.width, region.height);
    apply_rounded_mask(&mut fitted, radius);
    composite(img, &fitted, region.x, region.y);
}

fn draw_placeholder(
    img: &mut RgbaImage,
    region: Region,
    radius: f32,
    palette: &Palette,
    style: &CardStyle,
    scale: f32,
    fonts: &Fonts,
) {
    if region.is_empty() {
        return;
    }
    let fill = palette.background.lerp(&palette.accent, PLACEHOLDER_TINT);
    fill_rounded_rect(img, region, radius, fill);

    let size = style.review_font_size * scale;
    let label = style.placeholder_text.as_str();
    let label_w = text::measure_width(&fonts.regular, size, label);
    let label_h = text::line_height(&fonts.regular, size);
    if label_w > region.width as f32 || label_h > region.height as f32 {
        return;
    }
    text::draw_line(
        img,
        &fonts.regular,
        size,
        palette.text_secondary,
        (region.x as f32 + (region.width as f32 - label_w) / 2.0).round() as i32,
        (region.y as f32 + (region.height as f32 - label_h) / 2.0).round() as i32,
        label,
    );
}

/// Draw the score badge hanging from the layout's badge anchor.
fn draw_badge(
    img: &mut RgbaImage,
    layout: &CardLayout,
    score_text: &str,
    score_color: Color,
    palette: &Palette,
    style: &CardStyle,
    fonts: &Fonts,
) -> Region {
    let s = layout.scale;
    let size = style.score_font_size * s;
    let pad = style.badge_padding * s;
    let text_w = text::measure_width(&fonts.bold, size, score_text);
    let text_h = text::line_height(&fonts.bold, size);

    let badge_w = (text_w + 2.0 * pad).round() as u32;
    let badge_h = (text_h + pad).round() as u32;
    let (right, top) = layout.badge_anchor;
    let badge = Region::new(right - badge_w as i32, top, badge_w, badge_h);

    if !layout.canvas().contains(&badge) {
        debug!("Score badge does not fit on the canvas; skipping");
        return Region::new(right, top, 0, 0);
    }

    let fill = palette.background.lerp(&score_color, BADGE_TINT);
    fill_rounded_rect(img, badge, badge_h as f32 / 2.0, fill);
    text::draw_line(
        img,
        &fonts.bold,
        size,
        score_color,
        (badge.x as f32 + pad).round() as i32,
        (badge.y as f32 + pad / 2.0).round() as i32,
        score_text,
    );
    badge
}

fn draw_text_column(
    img: &mut RgbaImage,
    layout: &CardLayout,
    badge: Region,
    request: &ReviewCardRequest,
    palette: &Palette,
    style: &CardStyle,
    fonts: &Fonts,
) {
    let column = layout.text;
    if column.is_empty() {
        return;
    }
    let s = layout.scale;
    let gap = layout.padding / 2.0;
    let left = column.x;
    let bottom = column.bottom() as f32;
    let full_width = column.width as f32;

    // Narrow the heading rows beside the badge, or start below it when the
    // remaining width would be too cramped.
    let beside_badge = badge.x as f32 - gap - left as f32;
    let (mut y, heading_width) = if badge.is_empty() || beside_badge >= full_width {
        (column.y as f32, full_width)
    } else if beside_badge >= full_width * 0.4 {
        (column.y as f32, beside_badge)
    } else {
        ((badge.bottom() as f32 + gap).max(column.y as f32), full_width)
    };

    if style.show_content_label {
        let size = style.label_font_size * s;
        let lh = text::line_height(&fonts.bold, size);
        if y + lh <= bottom {
            let label = text::fit_lines(
                &fonts.bold,
                size,
                request.content_type.label(),
                heading_width,
                1,
            );
            if let Some(line) = label.first() {
                text::draw_line(img, &fonts.bold, size, palette.accent, left, y.round() as i32, line);
            }
            y += lh + gap / 2.0;
        }
    }

    let title_size = style.title_font_size * s;
    let title_lh = text::line_height(&fonts.bold, title_size);
    let title_advance = title_size * style.line_spacing;
    let title_lines = text::fit_lines(
        &fonts.bold,
        title_size,
        &request.title,
        heading_width,
        style.title_max_lines,
    );
    for line in &title_lines {
        if y + title_lh > bottom {
            break;
        }
        text::draw_line(
            img,
            &fonts.bold,
            title_size,
            palette.text_primary,
            left,
            y.round() as i32,
            line,
        );
        y += title_advance;
    }

    if !badge.is_empty() {
        y = y.max(badge.bottom() as f32);
    }
    y += gap;

    let review_size = style.review_font_size * s;
    let review_lh = text::line_height(&fonts.regular, review_size);
    let review_advance = review_size * style.line_spacing;
    let available = bottom - y;
    if available < review_lh {
        return;
    }
    let max_lines = ((available - review_lh) / review_advance).floor() as usize + 1;
    let review_lines = text::fit_lines(
        &fonts.regular,
        review_size,
        &request.review_text,
        full_width,
        max_lines,
    );
    for line in &review_lines {
        text::draw_line(
            img,
            &fonts.regular,
            review_size,
            palette.text_secondary,
            left,
            y.round() as i32,
            line,
        );
        y += review_advance;
    }
}
