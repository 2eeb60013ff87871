//! The drawing-surface capability the engine renders onto.
//!
//! The engine never constructs a concrete surface; callers inject one. A
//! surface owns its current fill color, global alpha and font size, exactly
//! like a 2D canvas context, and is not safe to share between concurrent
//! render calls.

use crate::Result;
use statcard_core::Rgb;
use unicode_width::UnicodeWidthStr as _;

pub trait Surface {
    /// Width of `text` at the current font size.
    fn measure_text(&self, text: &str) -> f64;
    /// Fills `text` with the baseline at `(x, y)` in the current fill color.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn set_fill_color(&mut self, color: Rgb);
    /// Global alpha applied to subsequent fills, `0..=1`.
    fn set_alpha(&mut self, alpha: f64);
    fn set_font_size(&mut self, size: f64);
    fn font_size(&self) -> f64;
    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);
    fn stroke_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    /// Draws an encoded PNG image scaled into the given rectangle.
    fn draw_image(&mut self, png: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<()>;
}

/// Deterministic glyph metrics: terminal-style cell widths scaled by the font
/// size. Good enough for layout decisions and fully reproducible in tests;
/// rasterizers with real font metrics can substitute their own measurement.
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    pub char_width_factor: f64,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
        }
    }
}

impl GlyphMetrics {
    pub fn width(&self, text: &str, font_size: f64) -> f64 {
        text.width() as f64 * font_size.max(1.0) * self.char_width_factor
    }
}

/// Everything a [`RecordingSurface`] was asked to draw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: Rgb,
        alpha: f64,
        font_size: f64,
    },
    FillRoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
    StrokeRoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb,
        alpha: f64,
    },
    DrawImage {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Test surface with [`GlyphMetrics`] measurement that records draw ops
/// instead of producing pixels.
#[derive(Debug)]
pub struct RecordingSurface {
    pub metrics: GlyphMetrics,
    pub ops: Vec<DrawOp>,
    fill_color: Rgb,
    alpha: f64,
    font_size: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            metrics: GlyphMetrics::default(),
            ops: Vec::new(),
            fill_color: Rgb::new(0, 0, 0),
            alpha: 1.0,
            font_size: 20.0,
        }
    }

    /// Only the fill-text ops, in draw order.
    pub fn text_ops(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillText { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.width(text, self.font_size)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            color: self.fill_color,
            alpha: self.alpha,
            font_size: self.font_size,
        });
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size.max(1.0);
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        self.ops.push(DrawOp::FillRoundedRect {
            x,
            y,
            width,
            height,
            radius,
            color: self.fill_color,
            alpha: self.alpha,
        });
    }

    fn stroke_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        self.ops.push(DrawOp::StrokeRoundedRect {
            x,
            y,
            width,
            height,
            radius,
            color: self.fill_color,
            alpha: self.alpha,
        });
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::StrokeLine {
            x1,
            y1,
            x2,
            y2,
            color: self.fill_color,
            alpha: self.alpha,
        });
    }

    fn draw_image(&mut self, _png: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.ops.push(DrawOp::DrawImage {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_scale_linearly_with_font_size() {
        let metrics = GlyphMetrics::default();
        let narrow = metrics.width("Title", 10.0);
        let wide = metrics.width("Title", 20.0);
        assert!((wide - narrow * 2.0).abs() < 1e-9);
    }

    #[test]
    fn measurement_is_additive_over_concatenation() {
        let surface = RecordingSurface::new();
        let ab = surface.measure_text("AB");
        let a = surface.measure_text("A");
        let b = surface.measure_text("B");
        assert!((ab - (a + b)).abs() < 1e-9);
    }

    #[test]
    fn recorded_fill_carries_current_state() {
        let mut surface = RecordingSurface::new();
        surface.set_font_size(30.0);
        surface.set_fill_color(Rgb::new(255, 170, 0));
        surface.fill_text("5", 4.0, 8.0);
        assert_eq!(
            surface.ops,
            vec![DrawOp::FillText {
                text: "5".to_string(),
                x: 4.0,
                y: 8.0,
                color: Rgb::new(255, 170, 0),
                alpha: 1.0,
                font_size: 30.0,
            }]
        );
    }
}
