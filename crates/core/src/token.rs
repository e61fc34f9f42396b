//! Resolved replacement tokens and the style classes they carry.

use crate::config::Config;
use std::ops::Range;

/// Left single quotation mark.
pub const SINGLE_OPEN: &str = "\u{2018}";
/// Right single quotation mark, also used as the apostrophe.
pub const SINGLE_CLOSE: &str = "\u{2019}";
/// Horizontal ellipsis.
pub const ELLIPSIS: &str = "\u{2026}";
/// En dash.
pub const EN_DASH: &str = "\u{2013}";
/// Em dash.
pub const EM_DASH: &str = "\u{2014}";
/// Hair space.
pub const HAIR_SPACE: &str = "\u{200A}";
/// En dash padded with hair spaces, used between digits.
pub const EN_DASH_SPACED: &str = "\u{200A}\u{2013}\u{200A}";

/// Semantic class of a style wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// A closed double-quoted span.
    DoubleQuote,
    /// A double-quoted span that never closes.
    DoubleQuoteRunon,
    /// A single-quoted span.
    SingleQuote,
    /// The opening double-quote glyph itself.
    DoubleOpenGlyph,
    /// The closing double-quote glyph itself.
    DoubleCloseGlyph,
    /// The opening single-quote glyph itself.
    SingleOpenGlyph,
    /// The closing single-quote glyph itself.
    SingleCloseGlyph,
}

impl StyleClass {
    /// CSS class name emitted for this wrapper.
    pub const fn as_str(self) -> &'static str {
        match self {
            StyleClass::DoubleQuote => "doubleQuote",
            StyleClass::DoubleQuoteRunon => "doubleQuoteRunon",
            StyleClass::SingleQuote => "singleQuote",
            StyleClass::DoubleOpenGlyph => "OTPTokenDQOpen",
            StyleClass::DoubleCloseGlyph => "OTPTokenDQClose",
            StyleClass::SingleOpenGlyph => "OTPTokenSQOpen",
            StyleClass::SingleCloseGlyph => "OTPTokenSQClose",
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final classification of a replacement site.
///
/// Pair references are indices into the token list the kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `...`
    Ellipsis,
    /// `---`
    EmDash,
    /// `--`
    EnDash,
    /// `--` between two digits.
    EnDashSpaced,
    /// Opening double quote with its closer.
    DoubleOpen {
        /// Index of the closing token.
        closer: usize,
    },
    /// Closing double quote with its opener.
    DoubleClose {
        /// Index of the opening token.
        opener: usize,
    },
    /// Opening double quote that is never closed in the block.
    DoubleRunon,
    /// Opening single quote with its closer.
    SingleOpen {
        /// Index of the closing token.
        closer: usize,
    },
    /// Closing single quote with its opener.
    SingleClose {
        /// Index of the opening token.
        opener: usize,
    },
    /// Apostrophe (`don't`, `'90s`).
    Apostrophe,
}

impl TokenKind {
    /// Stable lowercase name, used by serialising hosts.
    pub const fn name(&self) -> &'static str {
        match self {
            TokenKind::Ellipsis => "ellipsis",
            TokenKind::EmDash => "emDash",
            TokenKind::EnDash => "enDash",
            TokenKind::EnDashSpaced => "enDashSpaced",
            TokenKind::DoubleOpen { .. } => "doubleOpen",
            TokenKind::DoubleClose { .. } => "doubleClose",
            TokenKind::DoubleRunon => "doubleRunon",
            TokenKind::SingleOpen { .. } => "singleOpen",
            TokenKind::SingleClose { .. } => "singleClose",
            TokenKind::Apostrophe => "apostrophe",
        }
    }

    /// Number of source characters the kind consumes.
    pub const fn source_len(&self) -> usize {
        match self {
            TokenKind::Ellipsis | TokenKind::EmDash => 3,
            TokenKind::EnDash | TokenKind::EnDashSpaced => 2,
            _ => 1,
        }
    }

    /// Output text for this kind under `config`.
    pub fn replacement<'c>(&self, config: &'c Config) -> &'c str {
        match self {
            TokenKind::Ellipsis => ELLIPSIS,
            TokenKind::EmDash => EM_DASH,
            TokenKind::EnDash => EN_DASH,
            TokenKind::EnDashSpaced => EN_DASH_SPACED,
            TokenKind::DoubleOpen { .. } | TokenKind::DoubleRunon => config.open_glyph(),
            TokenKind::DoubleClose { .. } => config.close_glyph(),
            TokenKind::SingleOpen { .. } => SINGLE_OPEN,
            TokenKind::SingleClose { .. } | TokenKind::Apostrophe => SINGLE_CLOSE,
        }
    }

    /// Wrapper flags for this kind under `config`.
    pub fn style(&self, config: &Config) -> TokenStyle {
        match self {
            TokenKind::DoubleOpen { .. } if config.color_double_quotes => TokenStyle {
                span_start: Some(StyleClass::DoubleQuote),
                span_end: false,
                glyph: Some(StyleClass::DoubleOpenGlyph),
            },
            TokenKind::DoubleClose { .. } if config.color_double_quotes => TokenStyle {
                span_start: None,
                span_end: true,
                glyph: Some(StyleClass::DoubleCloseGlyph),
            },
            TokenKind::DoubleRunon if config.color_mismatched_double_quotes => TokenStyle {
                span_start: Some(StyleClass::DoubleQuoteRunon),
                span_end: false,
                glyph: Some(StyleClass::DoubleOpenGlyph),
            },
            TokenKind::SingleOpen { .. } if config.color_single_quotes => TokenStyle {
                span_start: Some(StyleClass::SingleQuote),
                span_end: false,
                glyph: Some(StyleClass::SingleOpenGlyph),
            },
            TokenKind::SingleClose { .. } if config.color_single_quotes => TokenStyle {
                span_start: None,
                span_end: true,
                glyph: Some(StyleClass::SingleCloseGlyph),
            },
            _ => TokenStyle::default(),
        }
    }

    /// Index of the paired opener, for closing kinds.
    pub const fn opener(&self) -> Option<usize> {
        match self {
            TokenKind::DoubleClose { opener } | TokenKind::SingleClose { opener } => Some(*opener),
            _ => None,
        }
    }

    /// Index of the paired closer, for opening kinds.
    pub const fn closer(&self) -> Option<usize> {
        match self {
            TokenKind::DoubleOpen { closer } | TokenKind::SingleOpen { closer } => Some(*closer),
            _ => None,
        }
    }

    pub(crate) fn remap(self, map: impl Fn(usize) -> usize) -> Self {
        match self {
            TokenKind::DoubleOpen { closer } => TokenKind::DoubleOpen {
                closer: map(closer),
            },
            TokenKind::DoubleClose { opener } => TokenKind::DoubleClose {
                opener: map(opener),
            },
            TokenKind::SingleOpen { closer } => TokenKind::SingleOpen {
                closer: map(closer),
            },
            TokenKind::SingleClose { opener } => TokenKind::SingleClose {
                opener: map(opener),
            },
            other => other,
        }
    }
}

/// Wrapper flags attached to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenStyle {
    /// A wrapper of this class opens right before the replacement.
    pub span_start: Option<StyleClass>,
    /// The innermost wrapper closes right after the replacement.
    pub span_end: bool,
    /// The replacement glyph is wrapped on its own in this class.
    pub glyph: Option<StyleClass>,
}

/// A resolved replacement instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the source pattern in the block text.
    pub location: usize,
    /// Source bytes consumed (all patterns are ASCII, so also characters).
    pub length: usize,
    /// Classification.
    pub kind: TokenKind,
    /// Text spliced in place of the source pattern.
    pub replacement: String,
    /// Wrapper flags.
    pub style: TokenStyle,
}

impl Token {
    pub(crate) fn new(location: usize, kind: TokenKind, config: &Config) -> Self {
        Self {
            location,
            length: kind.source_len(),
            kind,
            replacement: kind.replacement(config).to_string(),
            style: kind.style(config),
        }
    }

    /// Source byte range.
    pub fn range(&self) -> Range<usize> {
        self.location..self.location + self.length
    }

    /// Source text this token replaces.
    pub fn original<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.range()).unwrap_or_default()
    }

    /// Character delta after replacement (replacement chars minus source chars).
    pub fn length_offset(&self) -> isize {
        self.replacement.chars().count() as isize - self.length as isize
    }

    /// Location in UTF-16 code units, for hosts that index strings that way.
    pub fn utf16_location(&self, text: &str) -> usize {
        text.get(..self.location)
            .map(|prefix| prefix.encode_utf16().count())
            .unwrap_or(self.location)
    }

    /// Index of the paired opener.
    pub fn opener(&self) -> Option<usize> {
        self.kind.opener()
    }

    /// Index of the paired closer.
    pub fn closer(&self) -> Option<usize> {
        self.kind.closer()
    }

    /// Whether the glyph is individually wrapped.
    pub fn span_for_char(&self) -> bool {
        self.style.glyph.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_offsets() {
        let cfg = Config::default();
        assert_eq!(Token::new(0, TokenKind::Ellipsis, &cfg).length_offset(), -2);
        assert_eq!(Token::new(0, TokenKind::EmDash, &cfg).length_offset(), -2);
        assert_eq!(Token::new(0, TokenKind::EnDash, &cfg).length_offset(), -1);
        assert_eq!(Token::new(0, TokenKind::EnDashSpaced, &cfg).length_offset(), 1);
        assert_eq!(Token::new(0, TokenKind::Apostrophe, &cfg).length_offset(), 0);
    }

    #[test]
    fn styles_follow_config() {
        let cfg = Config::default();
        let open = TokenKind::DoubleOpen { closer: 1 }.style(&cfg);
        assert_eq!(open.span_start, Some(StyleClass::DoubleQuote));
        assert_eq!(open.glyph, Some(StyleClass::DoubleOpenGlyph));

        let plain = Config::unstyled();
        assert_eq!(
            TokenKind::DoubleOpen { closer: 1 }.style(&plain),
            TokenStyle::default()
        );
        assert_eq!(TokenKind::Apostrophe.style(&cfg), TokenStyle::default());
    }

    #[test]
    fn utf16_location_counts_surrogates() {
        let text = "\u{1F600} 'x'";
        let token = Token::new(5, TokenKind::Apostrophe, &Config::default());
        assert_eq!(token.original(text), "'");
        assert_eq!(token.utf16_location(text), 3);
    }

    #[test]
    fn class_names() {
        assert_eq!(StyleClass::DoubleQuoteRunon.to_string(), "doubleQuoteRunon");
        assert_eq!(StyleClass::SingleCloseGlyph.as_str(), "OTPTokenSQClose");
    }
}
