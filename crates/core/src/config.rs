//! Punctuation toggles, styling toggles and the double-quote glyph pair.

use serde::{Deserialize, Serialize};

/// Standard opening double quote (U+201C).
pub const DOUBLE_OPEN: &str = "\u{201C}";
/// Standard closing double quote (U+201D).
pub const DOUBLE_CLOSE: &str = "\u{201D}";

/// Built-in double-quote glyph pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotePreset {
    /// “ and ”.
    Standard,
    /// « and ».
    Guillemets,
    /// » and «.
    InvertedGuillemets,
}

impl QuotePreset {
    /// Returns the `(open, close)` glyphs for this preset.
    pub const fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            QuotePreset::Standard => (DOUBLE_OPEN, DOUBLE_CLOSE),
            QuotePreset::Guillemets => ("\u{00AB}", "\u{00BB}"),
            QuotePreset::InvertedGuillemets => ("\u{00BB}", "\u{00AB}"),
        }
    }

    /// Human readable label, e.g. for a settings picker.
    pub fn label(self) -> String {
        let (open, close) = self.glyphs();
        let name = match self {
            QuotePreset::Standard => "Standard",
            QuotePreset::Guillemets => "Guillemets",
            QuotePreset::InvertedGuillemets => "Inverted Guillemets",
        };
        format!("{} ({}{})", name, open, close)
    }

    /// All presets in picker order.
    pub const ALL: [QuotePreset; 3] = [
        QuotePreset::Standard,
        QuotePreset::Guillemets,
        QuotePreset::InvertedGuillemets,
    ];
}

/// Engine configuration. Read-only for the duration of a processing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Convert `--` and `---` into en and em dashes.
    pub dashes: bool,
    /// Convert `'...'` pairs into curly single quotes.
    pub single_quotes: bool,
    /// Convert `"` into the configured double-quote glyphs.
    pub double_quotes: bool,
    /// Convert apostrophes into U+2019.
    pub apostrophes: bool,
    /// Convert `...` into U+2026.
    pub ellipses: bool,
    /// Wrap double-quoted spans in a `doubleQuote` marker.
    pub color_double_quotes: bool,
    /// Wrap an unterminated double-quote run in a `doubleQuoteRunon` marker.
    pub color_mismatched_double_quotes: bool,
    /// Wrap single-quoted spans in a `singleQuote` marker.
    pub color_single_quotes: bool,
    /// Opening double-quote glyph.
    pub double_quote_open: String,
    /// Closing double-quote glyph.
    pub double_quote_close: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dashes: true,
            single_quotes: true,
            double_quotes: true,
            apostrophes: true,
            ellipses: true,
            color_double_quotes: true,
            color_mismatched_double_quotes: true,
            color_single_quotes: true,
            double_quote_open: DOUBLE_OPEN.to_string(),
            double_quote_close: DOUBLE_CLOSE.to_string(),
        }
    }
}

impl Config {
    /// Defaults with every styling toggle off.
    pub fn unstyled() -> Self {
        Self {
            color_double_quotes: false,
            color_mismatched_double_quotes: false,
            color_single_quotes: false,
            ..Self::default()
        }
    }

    /// Replaces the double-quote glyphs with a preset pair.
    pub fn with_preset(mut self, preset: QuotePreset) -> Self {
        let (open, close) = preset.glyphs();
        self.double_quote_open = open.to_string();
        self.double_quote_close = close.to_string();
        self
    }

    /// Replaces the double-quote glyphs with custom ones.
    pub fn with_quotes(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.double_quote_open = open.into();
        self.double_quote_close = close.into();
        self
    }

    /// Parses a JSON settings object; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective opening double-quote glyph. An empty custom glyph falls back to U+201C.
    pub fn open_glyph(&self) -> &str {
        if self.double_quote_open.is_empty() {
            DOUBLE_OPEN
        } else {
            &self.double_quote_open
        }
    }

    /// Effective closing double-quote glyph. An empty custom glyph falls back to U+201D.
    pub fn close_glyph(&self) -> &str {
        if self.double_quote_close.is_empty() {
            DOUBLE_CLOSE
        } else {
            &self.double_quote_close
        }
    }

    /// Returns the preset matching the configured glyphs, if any.
    pub fn preset(&self) -> Option<QuotePreset> {
        QuotePreset::ALL
            .into_iter()
            .find(|p| p.glyphs() == (self.open_glyph(), self.close_glyph()))
    }
}
