//! Raw candidate discovery. No classification happens here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Complete `'...'` phrases, tried in order at each position:
/// content ending in non-`"` punctuation, plain words and spaces, or a phrase
/// embedding a `"..."` statement.
static PAIR_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"'[^\n\r"]*?[\p{P}--"]'"#,
        r#"|'[\p{L}\p{N} ]*?'"#,
        r#"|'[^\n\r]*? ".*?" [^\n\r]*?[\p{P}--"]'"#,
    ))
    .expect("pair block pattern is valid")
});

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{P}$").expect("punctuation pattern is valid"));

/// Unicode general category P.
pub fn is_punctuation(c: char) -> bool {
    let mut buf = [0u8; 4];
    PUNCTUATION.is_match(c.encode_utf8(&mut buf))
}

/// Punctuation or whitespace; where context windows may be cut.
pub fn is_boundary(c: char) -> bool {
    c.is_whitespace() || is_punctuation(c)
}

/// Start offsets of every candidate, per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Every `"`.
    pub double_quotes: Vec<usize>,
    /// Every `'`.
    pub apostrophes: Vec<usize>,
    /// Runs of exactly three `.`.
    pub ellipses: Vec<usize>,
    /// Runs of exactly three `-`.
    pub em_dashes: Vec<usize>,
    /// Runs of exactly two `-`.
    pub en_dashes: Vec<usize>,
    /// Opening and closing offsets of every `'...'` phrase match.
    pub pair_boundaries: BTreeSet<usize>,
}

impl Scan {
    /// True when nothing was found.
    pub fn is_empty(&self) -> bool {
        self.double_quotes.is_empty()
            && self.apostrophes.is_empty()
            && self.ellipses.is_empty()
            && self.em_dashes.is_empty()
            && self.en_dashes.is_empty()
    }
}

/// Scans `text` for punctuation candidates. Offsets are byte offsets.
pub fn scan(text: &str) -> Scan {
    let mut found = Scan::default();
    if !text.contains(['"', '\'']) && !text.contains("--") && !text.contains("...") {
        return found;
    }

    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => found.double_quotes.push(i),
            b'\'' => found.apostrophes.push(i),
            b @ (b'.' | b'-') => {
                let start = i;
                while i + 1 < bytes.len() && bytes[i + 1] == b {
                    i += 1;
                }
                match (b, i + 1 - start) {
                    (b'.', 3) => found.ellipses.push(start),
                    (b'-', 3) => found.em_dashes.push(start),
                    (b'-', 2) => found.en_dashes.push(start),
                    _ => {}
                }
            }
            _ => {}
        }
        i += 1;
    }

    if !found.apostrophes.is_empty() {
        for m in PAIR_BLOCKS.find_iter(text) {
            found.pair_boundaries.insert(m.start());
            found.pair_boundaries.insert(m.end() - 1);
        }
    }

    found
}
