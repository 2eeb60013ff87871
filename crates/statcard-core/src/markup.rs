//! Tokenizer for the `<color>text</color>` markup language.
//!
//! The scanner is deliberately lenient: anything that is not a complete
//! `<...>` span is plain text, mismatched close tags are still emitted as
//! `TagClose`, and tag names are not validated here. Resolution and the
//! style stack live in the renderer.

use crate::color::{MinecraftColor, Rgb};
use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^<>]+)>").expect("valid tag regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of plain text between tags. Never empty.
    Text(&'a str),
    /// `<name>`; `name` is a chat-color key or a `#RRGGBB` literal.
    TagOpen(&'a str),
    /// `</name>`; the name is carried but not matched against the open tag.
    TagClose(&'a str),
}

/// Lazy left-to-right token stream over a markup string.
pub fn tokenize(markup: &str) -> Tokens<'_> {
    Tokens {
        input: markup,
        pos: 0,
        queued: None,
    }
}

pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
    queued: Option<Token<'a>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(tag) = self.queued.take() {
            return Some(tag);
        }
        if self.pos >= self.input.len() {
            return None;
        }

        match tag_regex().find_at(self.input, self.pos) {
            Some(m) => {
                let text = &self.input[self.pos..m.start()];
                let inner = &self.input[m.start() + 1..m.end() - 1];
                let tag = match inner.strip_prefix('/') {
                    Some(name) => Token::TagClose(name),
                    None => Token::TagOpen(inner),
                };
                self.pos = m.end();
                if text.is_empty() {
                    Some(tag)
                } else {
                    self.queued = Some(tag);
                    Some(Token::Text(text))
                }
            }
            None => {
                // No further complete tag: the rest (including any stray `<`)
                // is literal text.
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Token::Text(text))
            }
        }
    }
}

/// Removes all tag syntax, keeping plain text in order. Measurement code uses
/// this wherever true glyph width is needed; the same scan as [`tokenize`],
/// so stripped width always matches what the renderer advances by.
pub fn strip_markup(markup: &str) -> String {
    tokenize(markup)
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Resolves an open-tag name to a foreground color: `#RRGGBB` literals parse
/// directly, anything else goes through the chat-color table. `None` means
/// the tag is unrecognized and the current style should be kept.
pub fn resolve_tag(name: &str) -> Option<Rgb> {
    let resolved = if name.starts_with('#') {
        Rgb::parse_hex(name).ok()
    } else {
        MinecraftColor::from_name(name).map(MinecraftColor::foreground)
    };
    if resolved.is_none() {
        tracing::debug!(tag = name, "unrecognized color tag");
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tags_and_text_runs() {
        let tokens: Vec<_> = tokenize("<gold>5</gold> wins").collect();
        assert_eq!(
            tokens,
            vec![
                Token::TagOpen("gold"),
                Token::Text("5"),
                Token::TagClose("gold"),
                Token::Text(" wins"),
            ]
        );
    }

    #[test]
    fn adjacent_tags_suppress_empty_runs() {
        let tokens: Vec<_> = tokenize("<red><bold>x</bold></red>").collect();
        assert_eq!(
            tokens,
            vec![
                Token::TagOpen("red"),
                Token::TagOpen("bold"),
                Token::Text("x"),
                Token::TagClose("bold"),
                Token::TagClose("red"),
            ]
        );
    }

    #[test]
    fn hex_literal_is_an_open_tag() {
        let tokens: Vec<_> = tokenize("<#FFAA00>hi</#FFAA00>").collect();
        assert_eq!(
            tokens,
            vec![
                Token::TagOpen("#FFAA00"),
                Token::Text("hi"),
                Token::TagClose("#FFAA00"),
            ]
        );
    }

    #[test]
    fn unterminated_tag_is_literal_text() {
        let tokens: Vec<_> = tokenize("a <oops").collect();
        assert_eq!(tokens, vec![Token::Text("a <oops")]);

        let tokens: Vec<_> = tokenize("<red>a<").collect();
        assert_eq!(
            tokens,
            vec![Token::TagOpen("red"), Token::Text("a<")]
        );
    }

    #[test]
    fn plain_text_passes_through() {
        let tokens: Vec<_> = tokenize("no tags here").collect();
        assert_eq!(tokens, vec![Token::Text("no tags here")]);
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn strip_removes_every_tag() {
        let stripped = strip_markup("<white>Progress to</white> <gray>:</gray> <green>42.0</green><gray>%</gray>");
        assert_eq!(stripped, "Progress to : 42.0%");
        assert!(!stripped.contains('<') && !stripped.contains('>'));
    }

    #[test]
    fn strip_preserves_non_tag_text_in_order() {
        assert_eq!(strip_markup("a<red>b</red>c"), "abc");
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("<gold></gold>"), "");
    }

    #[test]
    fn resolve_covers_names_and_literals() {
        assert_eq!(resolve_tag("gold"), Some(MinecraftColor::Gold.foreground()));
        assert_eq!(resolve_tag("GOLD"), Some(MinecraftColor::Gold.foreground()));
        assert_eq!(resolve_tag("#FF5555"), Some(Rgb::new(255, 85, 85)));
        assert_eq!(resolve_tag("#XYZXYZ"), None);
        assert_eq!(resolve_tag("bold"), None);
    }
}
