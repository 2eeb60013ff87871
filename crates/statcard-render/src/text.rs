//! Style-stack markup rendering, drop shadows, gradients and auto-fit.
//!
//! All state (cursor, style stack) is local to a single call; concurrent
//! renders to independent surfaces never share anything.

use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use statcard_core::{Rgb, Token, resolve_tag, shadow_for, strip_markup, tokenize};

/// Mutable draw position threaded through one render call. `x` advances by
/// the measured width of every rendered glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCursor {
    pub x: f64,
    pub y: f64,
}

impl DrawCursor {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Nested color context. The caller-supplied default acts as a sentinel that
/// is never popped: a close tag on an empty stack is a no-op, so malformed
/// markup degrades instead of erroring.
#[derive(Debug)]
pub(crate) struct StyleStack {
    frames: Vec<Rgb>,
    default: Rgb,
}

impl StyleStack {
    pub(crate) fn new(default: Rgb) -> Self {
        Self {
            frames: Vec::new(),
            default,
        }
    }

    pub(crate) fn current(&self) -> Rgb {
        self.frames.last().copied().unwrap_or(self.default)
    }

    pub(crate) fn push(&mut self, color: Rgb) {
        self.frames.push(color);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

/// Shadow offset for the active font size: small text gets none, body text
/// 2px, headings 3px.
pub fn shadow_offset(font_size: f64) -> f64 {
    if font_size >= 30.0 {
        3.0
    } else if font_size >= 15.0 {
        2.0
    } else {
        0.0
    }
}

/// Draws `text` twice: first the shadow color offset down-right, then the
/// foreground on top.
pub fn draw_shadowed(
    surface: &mut dyn Surface,
    text: &str,
    x: f64,
    y: f64,
    color: Rgb,
    shadow: Rgb,
) {
    let offset = shadow_offset(surface.font_size());
    surface.set_fill_color(shadow);
    surface.fill_text(text, x + offset, y + offset);
    surface.set_fill_color(color);
    surface.fill_text(text, x, y);
}

/// Walks the markup tokens and draws every glyph at the cursor in the color
/// on top of the style stack, advancing `cursor.x` by measured width.
///
/// Lenient by contract: unknown tags keep the current style, unmatched close
/// tags are absorbed, and nothing here returns an error.
pub fn draw_markup(
    surface: &mut dyn Surface,
    markup: &str,
    cursor: &mut DrawCursor,
    default_color: Rgb,
    shadow: bool,
) {
    let mut stack = StyleStack::new(default_color);

    for token in tokenize(markup) {
        match token {
            Token::TagOpen(name) => {
                if let Some(color) = resolve_tag(name) {
                    stack.push(color);
                }
            }
            Token::TagClose(_) => stack.pop(),
            Token::Text(text) => {
                // Per-glyph so mid-word color spans and per-glyph shadow
                // offsets work; word-level grouping is a caller concern.
                let mut buf = [0u8; 4];
                for ch in text.chars() {
                    let glyph: &str = ch.encode_utf8(&mut buf);
                    let color = stack.current();
                    if shadow {
                        draw_shadowed(surface, glyph, cursor.x, cursor.y, color, shadow_for(color));
                    } else {
                        surface.set_fill_color(color);
                        surface.fill_text(glyph, cursor.x, cursor.y);
                    }
                    cursor.x += surface.measure_text(glyph);
                }
            }
        }
    }
}

/// Per-character linear gradient between `from` and `to`, drawn with the
/// shadow primitive. A single character renders in `from` (ratio 0).
pub fn draw_gradient(
    surface: &mut dyn Surface,
    text: &str,
    cursor: &mut DrawCursor,
    from: Rgb,
    to: Rgb,
) {
    let count = text.chars().count();
    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let ratio = if count <= 1 {
            0.0
        } else {
            i as f64 / (count - 1) as f64
        };
        let color = from.lerp(to, ratio);
        let glyph: &str = ch.encode_utf8(&mut buf);
        // Interpolated colors have no table entry; darken uniformly.
        draw_shadowed(surface, glyph, cursor.x, cursor.y, color, color.darken(0.8));
        cursor.x += surface.measure_text(glyph);
    }
}

/// Lower bound for the auto-fit shrink loop. Guarantees termination even for
/// budgets no font size can satisfy; callers render at the floor and accept
/// the overflow.
pub const MIN_FONT_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub font_size: f64,
    pub measured_width: f64,
}

/// Shrinks the font size from `start_size` in 1px steps until the stripped
/// text fits `max_width`, clamped at [`MIN_FONT_SIZE`]. Tags never count
/// toward width. The surface is left with the returned font size active.
pub fn fit_text(
    surface: &mut dyn Surface,
    markup: &str,
    max_width: f64,
    start_size: f64,
) -> FitResult {
    let plain = strip_markup(markup);

    let mut size = start_size.max(MIN_FONT_SIZE);
    surface.set_font_size(size);
    let mut width = surface.measure_text(&plain);

    while width > max_width && size > MIN_FONT_SIZE {
        size = (size - 1.0).max(MIN_FONT_SIZE);
        surface.set_font_size(size);
        width = surface.measure_text(&plain);
    }

    if width > max_width {
        tracing::debug!(max_width, width, "text does not fit at the minimum font size");
    }

    FitResult {
        font_size: size,
        measured_width: width,
    }
}
