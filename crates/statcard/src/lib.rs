#![forbid(unsafe_code)]

//! `statcard` renders Minecraft-style stat cards headlessly.
//!
//! Markup in the `<color>text</color>` chat-color dialect is laid out with
//! deterministic glyph metrics, drawn with drop shadows onto a [`render`]
//! surface, and serialized to SVG. The `raster` feature adds pure-Rust
//! SVG-to-PNG conversion.
//!
//! # Features
//!
//! - `render`: enable surfaces, auto-fit layout, content boxes and SVG output
//!   (`statcard::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use statcard_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use statcard_render::content_box::{
        Alignment, ContentBox, ImageEntry, Shape, TextEntry, VerticalAlignment,
    };
    pub use statcard_render::surface::{DrawOp, GlyphMetrics, RecordingSurface, Surface};
    pub use statcard_render::svg::SvgSurface;
    pub use statcard_render::text::{
        DrawCursor, FitResult, MIN_FONT_SIZE, draw_gradient, draw_markup, draw_shadowed, fit_text,
        shadow_offset,
    };
    pub use statcard_render::title::{TITLE_FONT_SIZE, draw_title};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] statcard_core::Error),
        #[error(transparent)]
        Render(#[from] statcard_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Bundles canvas geometry and common options for drawing one card.
    ///
    /// This is intended for bot integrations where threading a surface and
    /// the canvas size through every call is noisy. All work is CPU-bound
    /// and does not perform I/O.
    #[derive(Debug, Clone)]
    pub struct Card {
        width: f64,
        height: f64,
        surface: SvgSurface,
    }

    impl Card {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                surface: SvgSurface::new(width, height),
            }
        }

        pub fn with_background(mut self, color: statcard_core::Rgb) -> Self {
            self.surface = self.surface.with_background(color);
            self
        }

        pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
            self.surface = self.surface.with_font_family(family);
            self
        }

        pub fn width(&self) -> f64 {
            self.width
        }

        pub fn height(&self) -> f64 {
            self.height
        }

        pub fn surface_mut(&mut self) -> &mut SvgSurface {
            &mut self.surface
        }

        /// Draws the title bar across the top of the card.
        pub fn draw_title(&mut self, title: &str) -> FitResult {
            draw_title(&mut self.surface, self.width, title)
        }

        /// Renders a content box onto the card.
        pub fn draw_box(&mut self, content: &ContentBox) -> Result<()> {
            content.render(&mut self.surface)?;
            Ok(())
        }

        /// Draws markup at an explicit cursor position, advancing the cursor.
        pub fn draw_markup(
            &mut self,
            markup: &str,
            cursor: &mut DrawCursor,
            default_color: statcard_core::Rgb,
            shadow: bool,
        ) {
            draw_markup(&mut self.surface, markup, cursor, default_color, shadow);
        }

        /// Serializes everything drawn so far into an SVG document.
        pub fn into_svg(self) -> String {
            self.surface.into_svg()
        }

        #[cfg(feature = "raster")]
        pub fn into_png(self, options: &raster::RasterOptions) -> raster::Result<Vec<u8>> {
            let svg = self.into_svg();
            raster::svg_to_png(&svg, options)
        }
    }
}

#[cfg(all(test, feature = "render"))]
mod tests {
    use super::render::Card;
    use statcard_core::{MinecraftColor, Rgb};

    #[test]
    fn card_collects_title_and_markup_into_one_document() {
        let mut card = Card::new(500.0, 500.0).with_background(Rgb::new(20, 20, 20));
        let fit = card.draw_title("<gold>Stats</gold>");
        assert_eq!(fit.font_size, super::render::TITLE_FONT_SIZE);

        let mut cursor = super::render::DrawCursor::new(20.0, 100.0);
        card.draw_markup(
            "<green>Wins</green>",
            &mut cursor,
            MinecraftColor::White.foreground(),
            true,
        );
        assert!(cursor.x > 20.0);

        let svg = card.into_svg();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("#55FF55"));
    }
}
