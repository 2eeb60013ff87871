#![forbid(unsafe_code)]

//! Rendering engine for stat-card images.
//!
//! The engine draws `<color>text</color>` markup onto an injected
//! [`Surface`] capability: a style stack tracks nested color tags, every
//! glyph is drawn with an optional drop-shadow pass, and auto-fit layout
//! shrinks the font until stripped text fits a pixel budget. Content boxes
//! compose shapes, markup text and images into card sections. The crate
//! ships a deterministic [`surface::RecordingSurface`] for tests and an
//! [`svg::SvgSurface`] that serializes to an SVG document.

pub mod content_box;
pub mod surface;
pub mod svg;
pub mod text;
pub mod title;

pub use content_box::{Alignment, ContentBox, ImageEntry, Shape, TextEntry, VerticalAlignment};
pub use surface::{DrawOp, GlyphMetrics, RecordingSurface, Surface};
pub use svg::SvgSurface;
pub use text::{
    DrawCursor, FitResult, MIN_FONT_SIZE, draw_gradient, draw_markup, draw_shadowed, fit_text,
    shadow_offset,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported image payload: {message}")]
    UnsupportedImage { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
