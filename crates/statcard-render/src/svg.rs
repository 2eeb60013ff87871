//! A [`Surface`] that serializes draw calls into an SVG document.
//!
//! Measurement uses the same deterministic [`GlyphMetrics`] as the recording
//! surface, so layout decisions match between tests and emitted documents.
//! Rasterization of the resulting SVG happens downstream (see the `statcard`
//! facade's `raster` feature).

use crate::surface::{GlyphMetrics, Surface};
use crate::{Error, Result};
use base64::Engine as _;
use statcard_core::Rgb;
use std::fmt::Write as _;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    metrics: GlyphMetrics,
    font_family: String,
    background: Option<Rgb>,
    fill_color: Rgb,
    alpha: f64,
    font_size: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            metrics: GlyphMetrics::default(),
            font_family: "Minecraft, monospace".to_string(),
            background: None,
            fill_color: Rgb::new(0, 0, 0),
            alpha: 1.0,
            font_size: 20.0,
            body: String::new(),
        }
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Serializes everything drawn so far into a standalone SVG document.
    pub fn into_svg(self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        out.push('\n');
        if let Some(bg) = self.background {
            let _ = writeln!(
                out,
                r#"<rect width="{w}" height="{h}" fill="{fill}"/>"#,
                w = fmt_num(self.width),
                h = fmt_num(self.height),
                fill = bg.to_hex(),
            );
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn push_opacity(&self, out: &mut String, attr: &str) {
        if self.alpha < 1.0 {
            let _ = write!(out, r#" {attr}="{}""#, fmt_num(self.alpha));
        }
    }
}

impl Surface for SvgSurface {
    fn measure_text(&self, text: &str) -> f64 {
        self.metrics.width(text, self.font_size)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let mut element = String::new();
        let _ = write!(
            element,
            r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="{fill}""#,
            x = fmt_num(x),
            y = fmt_num(y),
            family = xml_escape(&self.font_family),
            size = fmt_num(self.font_size),
            fill = self.fill_color.to_hex(),
        );
        self.push_opacity(&mut element, "fill-opacity");
        let _ = write!(element, r#" xml:space="preserve">{}</text>"#, xml_escape(text));
        self.body.push_str(&element);
        self.body.push('\n');
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
        let mut element = String::new();
        let _ = write!(
            element,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="{fill}""#,
            x = fmt_num(x),
            y = fmt_num(y),
            w = fmt_num(width),
            h = fmt_num(height),
            rx = fmt_num(radius),
            fill = self.fill_color.to_hex(),
        );
        self.push_opacity(&mut element, "fill-opacity");
        element.push_str("/>");
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn stroke_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let mut element = String::new();
        let _ = write!(
            element,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="none" stroke="{stroke}""#,
            x = fmt_num(x),
            y = fmt_num(y),
            w = fmt_num(width),
            h = fmt_num(height),
            rx = fmt_num(radius),
            stroke = self.fill_color.to_hex(),
        );
        self.push_opacity(&mut element, "stroke-opacity");
        element.push_str("/>");
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let mut element = String::new();
        let _ = write!(
            element,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}""#,
            x1 = fmt_num(x1),
            y1 = fmt_num(y1),
            x2 = fmt_num(x2),
            y2 = fmt_num(y2),
            stroke = self.fill_color.to_hex(),
        );
        self.push_opacity(&mut element, "stroke-opacity");
        element.push_str("/>");
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn draw_image(&mut self, png: &[u8], x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if !png.starts_with(&PNG_MAGIC) {
            return Err(Error::UnsupportedImage {
                message: "expected an encoded PNG payload".to_string(),
            });
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(png);
        let _ = writeln!(
            self.body,
            r#"<image x="{x}" y="{y}" width="{w}" height="{h}" href="data:image/png;base64,{encoded}"/>"#,
            x = fmt_num(x),
            y = fmt_num(y),
            w = fmt_num(width),
            h = fmt_num(height),
        );
        Ok(())
    }
}

fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v == v.trunc() {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
