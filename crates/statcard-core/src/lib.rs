#![forbid(unsafe_code)]

//! Headless core for statcard: the Minecraft chat-color model, the
//! `<color>text</color>` markup tokenizer and the prestige/level formatting
//! helpers that produce markup strings.
//!
//! Nothing in this crate draws; rendering lives in `statcard-render`.

pub mod color;
pub mod error;
pub mod markup;
pub mod prestige;

pub use color::{MinecraftColor, Rgb, rank_color, shadow_for};
pub use error::{Error, Result};
pub use markup::{Token, Tokens, resolve_tag, strip_markup, tokenize};
pub use prestige::{level_progress_markup, prestige_markup, prestige_progress_markup};
