//! Text measurement, wrapping and drawing with the embedded fonts.

use std::sync::OnceLock;

use card_common::{CardError, CardResult, Color, ScoreRange};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};

/// Embedded font data - DejaVu Sans (regular and bold)
const FONT_REGULAR: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const FONT_BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// The font faces used on a card.
pub struct Fonts {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

static FONTS: OnceLock<Option<Fonts>> = OnceLock::new();

impl Fonts {
    /// Parse the embedded fonts once and share them for the process lifetime.
    pub fn embedded() -> CardResult<&'static Fonts> {
        FONTS
            .get_or_init(|| {
                let regular = Font::try_from_bytes(FONT_REGULAR);
                let bold = Font::try_from_bytes(FONT_BOLD);
                match (regular, bold) {
                    (Some(regular), Some(bold)) => Some(Fonts { regular, bold }),
                    _ => {
                        tracing::warn!("Failed to parse embedded card fonts");
                        None
                    }
                }
            })
            .as_ref()
            .ok_or_else(|| CardError::RenderFailure("embedded fonts failed to load".to_string()))
    }
}

/// Advance width of `text` in pixels, including kerning.
pub fn measure_width(font: &Font<'_>, size: f32, text: &str) -> f32 {
    font.layout(text, Scale::uniform(size), point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Height of one line of text at `size` (ascent to descent plus line gap).
pub fn line_height(font: &Font<'_>, size: f32) -> f32 {
    let v = font.v_metrics(Scale::uniform(size));
    v.ascent - v.descent + v.line_gap
}

/// Greedy word wrap to `max_width` pixels.
///
/// Whitespace (including newlines) separates words. Words wider than the
/// line are broken by character.
pub fn wrap_text(font: &Font<'_>, size: f32, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    if max_width <= 0.0 {
        return lines;
    }

    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure_width(font, size, &candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if measure_width(font, size, word) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = break_word(font, size, word, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(font: &Font<'_>, size: f32, word: &str, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if measure_width(font, size, &current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Shorten `line` until `line + "..."` fits in `max_width`.
pub fn ellipsize(font: &Font<'_>, size: f32, line: &str, max_width: f32) -> String {
    let mut chars: Vec<char> = line.trim_end().chars().collect();
    loop {
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + ELLIPSIS;
        if chars.is_empty() || measure_width(font, size, &candidate) <= max_width {
            return candidate;
        }
        chars.pop();
    }
}

/// Wrap `text` and keep at most `max_lines` lines. When lines are dropped the
/// last kept line ends with an ellipsis.
pub fn fit_lines(
    font: &Font<'_>,
    size: f32,
    text: &str,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    if max_lines == 0 {
        return Vec::new();
    }
    let mut lines = wrap_text(font, size, text, max_width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = ellipsize(font, size, last, max_width);
        }
    }
    lines
}

/// Draw one line with its top-left corner at `(x, y)`.
pub fn draw_line(
    img: &mut RgbaImage,
    font: &Font<'_>,
    size: f32,
    color: Color,
    x: i32,
    y: i32,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    draw_text_mut(
        img,
        Rgba(color.to_array()),
        x,
        y,
        Scale::uniform(size),
        font,
        text,
    );
}

/// Format a number with one decimal only when it has a fractional part.
pub fn format_number(value: f32) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Score text for the badge, e.g. `9/10` or `8.5/10`.
pub fn format_score(score: f32, range: ScoreRange) -> String {
    format!("{}/{}", format_number(score), format_number(range.max))
}
