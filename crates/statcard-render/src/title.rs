//! The card title bar: translucent backdrop plus centered, auto-fitted
//! markup.

use crate::surface::Surface;
use crate::text::{DrawCursor, FitResult, draw_markup, fit_text};
use statcard_core::MinecraftColor;

pub const TITLE_FONT_SIZE: f64 = 30.0;
const BAR_MARGIN: f64 = 10.0;
const BAR_HEIGHT: f64 = 40.0;

/// Draws the title bar across the top of a card of `canvas_width` pixels.
/// The title shrinks until its stripped text fits inside the bar, then
/// renders centered with shadows.
pub fn draw_title(surface: &mut dyn Surface, canvas_width: f64, title: &str) -> FitResult {
    // The bar is inset by the margin on both sides, with the same inset
    // again between bar edge and text.
    let max_width = canvas_width - BAR_MARGIN * 4.0;
    let fit = fit_text(surface, title, max_width, TITLE_FONT_SIZE);

    surface.set_fill_color(MinecraftColor::White.foreground());
    surface.set_alpha(0.2);
    surface.fill_rounded_rect(
        BAR_MARGIN,
        BAR_MARGIN,
        canvas_width - BAR_MARGIN * 2.0,
        BAR_HEIGHT,
        BAR_MARGIN,
    );
    surface.set_alpha(1.0);

    let x = canvas_width / 2.0 - fit.measured_width / 2.0;
    let y = BAR_MARGIN + BAR_HEIGHT / 2.0 + fit.font_size / 2.0;
    let mut cursor = DrawCursor::new(x, y);
    draw_markup(
        surface,
        title,
        &mut cursor,
        MinecraftColor::White.foreground(),
        true,
    );
    fit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn short_titles_keep_the_heading_size() {
        let mut surface = RecordingSurface::new();
        let fit = draw_title(&mut surface, 500.0, "<gold>Stats</gold>");
        assert_eq!(fit.font_size, TITLE_FONT_SIZE);

        // Backdrop first, then shadowed glyphs.
        assert!(matches!(
            surface.ops[0],
            DrawOp::FillRoundedRect { alpha, .. } if alpha == 0.2
        ));
        assert!(surface.text_ops().len() == "Stats".len() * 2);
    }

    #[test]
    fn long_titles_shrink_to_fit_the_bar() {
        let mut surface = RecordingSurface::new();
        let title = "<white>an exceedingly long bedwars session title</white>";
        let fit = draw_title(&mut surface, 200.0, title);
        assert!(fit.font_size < TITLE_FONT_SIZE);
        assert!(fit.measured_width <= 160.0);
    }

    #[test]
    fn title_text_is_horizontally_centered() {
        let mut surface = RecordingSurface::new();
        let fit = draw_title(&mut surface, 500.0, "<white>Hi</white>");
        let ops = surface.text_ops();
        let DrawOp::FillText { x, .. } = ops[1] else {
            panic!("expected foreground fill");
        };
        assert_eq!(*x, 250.0 - fit.measured_width / 2.0);
    }
}
