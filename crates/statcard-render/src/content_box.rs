//! Card sections: a positioned box composing shapes, markup text and images.
//!
//! Builder-style, mirroring how stat cards are assembled: a translucent
//! rounded background, an optional border, then aligned text lines and
//! images inside the padded interior.

use crate::surface::Surface;
use crate::text::{DrawCursor, draw_markup};
use crate::{Result, text};
use serde::{Deserialize, Serialize};
use statcard_core::{MinecraftColor, Rgb, strip_markup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone)]
enum ShapeKind {
    FillRect { radius: f64 },
    StrokeRect { radius: f64 },
    Line { x2: f64, y2: f64 },
}

/// A primitive drawn at box-relative coordinates.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Rgb,
    alpha: f64,
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::rounded_rect(x, y, width, height, 0.0)
    }

    pub fn rounded_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Self {
        Self {
            kind: ShapeKind::FillRect { radius },
            x,
            y,
            width,
            height,
            color: Rgb::new(0, 0, 0),
            alpha: 1.0,
        }
    }

    pub fn outline(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Self {
        Self {
            kind: ShapeKind::StrokeRect { radius },
            x,
            y,
            width,
            height,
            color: Rgb::new(0, 0, 0),
            alpha: 1.0,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            kind: ShapeKind::Line { x2, y2 },
            x: x1,
            y: y1,
            width: 0.0,
            height: 0.0,
            color: Rgb::new(0, 0, 0),
            alpha: 1.0,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    fn render(&self, surface: &mut dyn Surface, ox: f64, oy: f64) {
        surface.set_fill_color(self.color);
        surface.set_alpha(self.alpha);
        match self.kind {
            ShapeKind::FillRect { radius } => {
                surface.fill_rounded_rect(ox + self.x, oy + self.y, self.width, self.height, radius);
            }
            ShapeKind::StrokeRect { radius } => {
                surface.stroke_rounded_rect(
                    ox + self.x,
                    oy + self.y,
                    self.width,
                    self.height,
                    radius,
                );
            }
            ShapeKind::Line { x2, y2 } => {
                surface.stroke_line(ox + self.x, oy + self.y, ox + x2, oy + y2);
            }
        }
        surface.set_alpha(1.0);
    }
}

/// One markup line inside a box.
#[derive(Debug, Clone)]
pub struct TextEntry {
    pub markup: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub shadow: bool,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
}

impl TextEntry {
    pub fn new(markup: impl Into<String>, x: f64, y: f64, size: f64) -> Self {
        Self {
            markup: markup.into(),
            x,
            y,
            size,
            shadow: true,
            alignment: Alignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    fn render(&self, surface: &mut dyn Surface, ox: f64, oy: f64, inner_w: f64, inner_h: f64) {
        surface.set_font_size(self.size);
        // Alignment budgets the stripped width; tags never shift layout.
        let width = surface.measure_text(&strip_markup(&self.markup));

        let x = match self.alignment {
            Alignment::Left => self.x,
            Alignment::Center => (inner_w - width) / 2.0 + self.x,
            Alignment::Right => inner_w - width - self.x,
        };
        // Deterministic metrics carry no ascent/descent; the font size stands
        // in for the line height.
        let y = match self.vertical_alignment {
            VerticalAlignment::Top => self.y + self.size,
            VerticalAlignment::Middle => self.y + (inner_h + self.size) / 2.0,
            VerticalAlignment::Bottom => self.y + inner_h,
        };

        let mut cursor = DrawCursor::new(ox + x, oy + y);
        draw_markup(
            surface,
            &self.markup,
            &mut cursor,
            MinecraftColor::White.foreground(),
            self.shadow,
        );
    }
}

/// An encoded PNG placed inside a box.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub png: Vec<u8>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
}

impl ImageEntry {
    pub fn new(png: Vec<u8>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            png,
            x,
            y,
            width,
            height,
            alignment: Alignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        ox: f64,
        oy: f64,
        inner_w: f64,
        inner_h: f64,
    ) -> Result<()> {
        let x = match self.alignment {
            Alignment::Left => self.x,
            Alignment::Center => (inner_w - self.width) / 2.0 + self.x,
            Alignment::Right => inner_w - self.width - self.x,
        };
        let y = match self.vertical_alignment {
            VerticalAlignment::Top => self.y,
            VerticalAlignment::Middle => self.y + (inner_h - self.height) / 2.0,
            VerticalAlignment::Bottom => self.y + inner_h - self.height,
        };
        surface.draw_image(&self.png, ox + x, oy + y, self.width, self.height)
    }
}

const CORNER_RADIUS: f64 = 5.0;

/// A positioned card section. Shapes render first (background before
/// border), then images, then text, all offset by the box origin; text and
/// images are additionally inset by the padding.
#[derive(Debug, Clone, Default)]
pub struct ContentBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    padding: f64,
    shapes: Vec<Shape>,
    texts: Vec<TextEntry>,
    images: Vec<ImageEntry>,
}

impl ContentBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_background(mut self, color: Rgb, alpha: f64) -> Self {
        let background = Shape::rounded_rect(0.0, 0.0, self.width, self.height, CORNER_RADIUS)
            .with_color(color)
            .with_alpha(alpha);
        self.shapes.insert(0, background);
        self
    }

    pub fn with_border(mut self, color: Rgb) -> Self {
        let border = Shape::outline(0.0, 0.0, self.width, self.height, CORNER_RADIUS)
            .with_color(color);
        self.shapes.insert(self.shapes.len().min(1), border);
        self
    }

    pub fn add_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn add_text(mut self, text: TextEntry) -> Self {
        self.texts.push(text);
        self
    }

    pub fn add_image(mut self, image: ImageEntry) -> Self {
        self.images.push(image);
        self
    }

    /// Fits this box's width at the given size, shrinking only if a text
    /// entry overflows the padded interior.
    pub fn fit_widest_text(&self, surface: &mut dyn Surface, start_size: f64) -> f64 {
        let inner_w = self.width - self.padding * 2.0;
        let mut size = start_size;
        for entry in &self.texts {
            let fit = text::fit_text(surface, &entry.markup, inner_w, start_size);
            size = size.min(fit.font_size);
        }
        size
    }

    pub fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        for shape in &self.shapes {
            shape.render(surface, self.x, self.y);
        }

        let ox = self.x + self.padding;
        let oy = self.y + self.padding;
        let inner_w = self.width - self.padding * 2.0;
        let inner_h = self.height - self.padding * 2.0;

        for image in &self.images {
            image.render(surface, ox, oy, inner_w, inner_h)?;
        }
        for text in &self.texts {
            text.render(surface, ox, oy, inner_w, inner_h);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn background_renders_before_border_and_text() {
        let card = ContentBox::new(10.0, 10.0, 100.0, 50.0)
            .with_border(Rgb::new(255, 255, 255))
            .with_background(Rgb::new(0, 0, 0), 0.5)
            .add_text(TextEntry::new("<white>hi</white>", 0.0, 0.0, 10.0).with_shadow(false));

        let mut surface = RecordingSurface::new();
        card.render(&mut surface).expect("render ok");

        assert!(matches!(
            surface.ops[0],
            DrawOp::FillRoundedRect { alpha, .. } if alpha == 0.5
        ));
        assert!(matches!(surface.ops[1], DrawOp::StrokeRoundedRect { .. }));
        assert!(matches!(surface.ops[2], DrawOp::FillText { .. }));
    }

    #[test]
    fn padding_offsets_text_but_not_background() {
        let card = ContentBox::new(0.0, 0.0, 100.0, 40.0)
            .with_padding(8.0)
            .with_background(Rgb::new(0, 0, 0), 1.0)
            .add_text(TextEntry::new("x", 0.0, 0.0, 10.0).with_shadow(false));

        let mut surface = RecordingSurface::new();
        card.render(&mut surface).expect("render ok");

        let DrawOp::FillRoundedRect { x, y, .. } = &surface.ops[0] else {
            panic!("expected background");
        };
        assert_eq!((*x, *y), (0.0, 0.0));

        let DrawOp::FillText { x, y, .. } = &surface.ops[1] else {
            panic!("expected text");
        };
        // Inset by padding, baseline one font size below the top.
        assert_eq!((*x, *y), (8.0, 18.0));
    }

    #[test]
    fn centered_text_ignores_markup_overhead() {
        let markup = "<gold>AB</gold>";
        let card = ContentBox::new(0.0, 0.0, 100.0, 40.0).add_text(
            TextEntry::new(markup, 0.0, 0.0, 10.0)
                .with_shadow(false)
                .with_alignment(Alignment::Center),
        );

        let mut surface = RecordingSurface::new();
        card.render(&mut surface).expect("render ok");

        // Plain width of "AB" at size 10 is 12; centered in 100 → x = 44.
        let DrawOp::FillText { x, .. } = &surface.ops[0] else {
            panic!("expected text");
        };
        assert_eq!(*x, 44.0);
    }

    #[test]
    fn images_align_inside_the_padded_interior() {
        let entry = ImageEntry::new(vec![1, 2, 3], 0.0, 0.0, 20.0, 20.0)
            .with_alignment(Alignment::Right)
            .with_vertical_alignment(VerticalAlignment::Bottom);
        let card = ContentBox::new(0.0, 0.0, 100.0, 60.0)
            .with_padding(10.0)
            .add_image(entry);

        let mut surface = RecordingSurface::new();
        card.render(&mut surface).expect("render ok");

        let DrawOp::DrawImage { x, y, .. } = &surface.ops[0] else {
            panic!("expected image");
        };
        // interior is 80x40 starting at (10,10): right edge 90, bottom 50.
        assert_eq!((*x, *y), (70.0, 30.0));
    }

    #[test]
    fn line_shapes_are_offset_by_the_box_origin() {
        let card = ContentBox::new(5.0, 5.0, 50.0, 50.0)
            .add_shape(Shape::line(0.0, 10.0, 40.0, 10.0).with_color(Rgb::new(255, 255, 255)));

        let mut surface = RecordingSurface::new();
        card.render(&mut surface).expect("render ok");

        assert_eq!(
            surface.ops[0],
            DrawOp::StrokeLine {
                x1: 5.0,
                y1: 15.0,
                x2: 45.0,
                y2: 15.0,
                color: Rgb::new(255, 255, 255),
                alpha: 1.0,
            }
        );
    }
}
