//! Context resolution: settles dashes and straight single quotes.
//!
//! Each pending candidate is classified from a short window of surrounding
//! text plus the pair boundaries found by the scanner. Single-quote
//! classification is heuristic and accepts occasional misses on nested or
//! elided forms (`'twas` inside a quoted sentence, for example).

use crate::Error;
use crate::config::Config;
use crate::scan::{is_boundary, is_punctuation};
use crate::token::{Token, TokenKind};
use crate::tokenize::{Candidate, DashWidth, Provisional};
use std::collections::BTreeSet;

/// Minimum number of characters kept on each side of a token.
pub const CONTEXT_REACH: usize = 8;

/// Markup sequences that stop a hyphen run from becoming a dash.
const NOT_FOR_DASHES: [&str; 4] = ["&gt;", "&lt;", "<", ">"];

/// Text around a token, cut at word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    /// Text before the token.
    pub before: &'a str,
    /// The token's own source text.
    pub seq: &'a str,
    /// Text after the token.
    pub after: &'a str,
}

impl Window<'_> {
    /// Character immediately before the token.
    pub fn char_before(&self) -> Option<char> {
        self.before.chars().next_back()
    }

    /// Character immediately after the token.
    pub fn char_after(&self) -> Option<char> {
        self.after.chars().next()
    }
}

/// Extracts the context window for `location..location + length`.
///
/// `before` reaches back to the nearest punctuation or whitespace character
/// at least `reach` characters away (that character included); `after` stops
/// at the first such character at least `reach` characters in. Either side
/// is kept whole when no such boundary exists.
pub fn context_window(
    text: &str,
    location: usize,
    length: usize,
    reach: usize,
) -> Result<Window<'_>, Error> {
    let out_of_bounds = || Error::ContextOutOfBounds {
        location,
        length,
        text_len: text.len(),
    };
    let end = location.checked_add(length).ok_or_else(out_of_bounds)?;
    if end > text.len() || !text.is_char_boundary(location) || !text.is_char_boundary(end) {
        log::error!(
            "typographer: context window {}+{} outside text of {} bytes",
            location,
            length,
            text.len()
        );
        return Err(out_of_bounds());
    }

    let mut before = &text[..location];
    if let Some((cut, _)) = before
        .char_indices()
        .rev()
        .enumerate()
        .find(|(distance, (_, c))| distance + 1 >= reach && is_boundary(*c))
        .map(|(_, found)| found)
    {
        before = &before[cut..];
    }

    let mut after = &text[end..];
    if let Some((cut, _)) = after
        .char_indices()
        .enumerate()
        .find(|(distance, (_, c))| *distance >= reach && is_boundary(*c))
        .map(|(_, found)| found)
    {
        after = &after[..cut];
    }

    Ok(Window {
        before,
        seq: &text[location..end],
        after,
    })
}

/// Outcome of resolving one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Tokens ready for splicing, in text order. Pair indices refer to this list.
    pub tokens: Vec<Token>,
    /// Candidate indices dropped by configuration or the markup guard.
    pub rejected: Vec<usize>,
    /// Candidate indices left unresolved (single-quote openers that never closed).
    pub unresolved: Vec<usize>,
}

/// Running single-quote state for one forward pass.
#[derive(Debug, Default)]
struct QuoteState {
    open: Option<usize>,
}

/// What a straight `'` turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteRole {
    Apostrophe,
    Open,
    Close(usize),
}

/// Settles every pending candidate and builds the final token list.
pub fn resolve(
    text: &str,
    mut candidates: Vec<Candidate>,
    pair_boundaries: &BTreeSet<usize>,
    config: &Config,
) -> Result<Resolution, Error> {
    let mut rejected = Vec::new();
    let mut quotes = QuoteState::default();

    for index in 0..candidates.len() {
        let candidate = candidates[index];
        match candidate.state {
            Provisional::Dash(width) => {
                let window = context_window(text, candidate.location, candidate.length, CONTEXT_REACH)?;
                match resolve_dash(&window, width) {
                    Some(kind) => candidates[index].state = Provisional::Settled(kind),
                    None => rejected.push(index),
                }
            }
            Provisional::Quote => {
                let window = context_window(text, candidate.location, candidate.length, CONTEXT_REACH)?;
                let role = if is_definite_apostrophe(&window) {
                    QuoteRole::Apostrophe
                } else {
                    classify_quote(&mut quotes, index, pair_boundaries.contains(&candidate.location))
                };

                let enabled = match role {
                    QuoteRole::Apostrophe => config.apostrophes,
                    QuoteRole::Open | QuoteRole::Close(_) => config.single_quotes,
                };
                if !enabled {
                    rejected.push(index);
                    continue;
                }

                candidates[index].state = match role {
                    QuoteRole::Apostrophe => Provisional::Settled(TokenKind::Apostrophe),
                    QuoteRole::Open => Provisional::OpenSingle,
                    QuoteRole::Close(opener) => {
                        if candidates[opener].state == Provisional::OpenSingle {
                            candidates[opener].state =
                                Provisional::Settled(TokenKind::SingleOpen { closer: index });
                            Provisional::Settled(TokenKind::SingleClose { opener })
                        } else {
                            Provisional::Settled(TokenKind::Apostrophe)
                        }
                    }
                };
            }
            _ => {}
        }
    }

    Ok(finish(candidates, rejected, config))
}

/// Applies the markup guard and the digit-flanked en dash rule.
fn resolve_dash(window: &Window<'_>, width: DashWidth) -> Option<TokenKind> {
    let touches_markup = NOT_FOR_DASHES
        .iter()
        .any(|seq| window.before.ends_with(seq) || window.after.starts_with(seq));
    if touches_markup {
        return None;
    }

    Some(match width {
        DashWidth::Em => TokenKind::EmDash,
        DashWidth::En => {
            let digits = window.char_before().is_some_and(char::is_numeric)
                && window.char_after().is_some_and(char::is_numeric);
            if digits {
                TokenKind::EnDashSpaced
            } else {
                TokenKind::EnDash
            }
        }
    })
}

/// Cases where a `'` can only be an apostrophe.
fn is_definite_apostrophe(window: &Window<'_>) -> bool {
    let before = window.char_before();
    let after = window.char_after();
    let both = |test: fn(char) -> bool| before.is_some_and(test) && after.is_some_and(test);

    if both(char::is_alphabetic) || both(char::is_numeric) || both(char::is_whitespace) {
        return true;
    }

    let detached = match before {
        None => true,
        Some(c) => c.is_whitespace() || !(c.is_alphabetic() || is_punctuation(c)),
    };
    detached && is_decade_elision(window.after)
}

/// `90s`, `96` and the like, unless closed by another `'`.
///
/// Anchored at the token, so `'top 10s list'` stays a quoted phrase.
fn is_decade_elision(after: &str) -> bool {
    let mut chars = after.chars();
    let two_digits = chars.next().is_some_and(|c| c.is_ascii_digit())
        && chars.next().is_some_and(|c| c.is_ascii_digit());
    if !two_digits {
        return false;
    }
    let rest = chars.as_str();
    !(rest.starts_with('\'') || rest.starts_with("s'"))
}

fn classify_quote(state: &mut QuoteState, index: usize, boundary: bool) -> QuoteRole {
    if !boundary {
        return QuoteRole::Apostrophe;
    }
    match state.open.take() {
        Some(opener) => QuoteRole::Close(opener),
        None => {
            state.open = Some(index);
            QuoteRole::Open
        }
    }
}

/// Drops rejected and unresolved candidates and renumbers pair references.
fn finish(candidates: Vec<Candidate>, rejected: Vec<usize>, config: &Config) -> Resolution {
    let mut unresolved = Vec::new();
    let mut dropped = vec![false; candidates.len()];
    for &index in &rejected {
        if let Some(flag) = dropped.get_mut(index) {
            *flag = true;
        }
    }
    let mut map: Vec<Option<usize>> = vec![None; candidates.len()];
    let mut kept = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        if dropped[index] {
            continue;
        }
        match candidate.state {
            Provisional::Settled(kind) => {
                map[index] = Some(kept.len());
                kept.push((candidate.location, kind));
            }
            _ => unresolved.push(index),
        }
    }

    let tokens = kept
        .into_iter()
        .map(|(location, kind)| {
            let kind = kind.remap(|old| map.get(old).copied().flatten().unwrap_or(old));
            Token::new(location, kind, config)
        })
        .collect();

    Resolution {
        tokens,
        rejected,
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::tokenize::tokenize;

    fn run(text: &str, config: &Config) -> Resolution {
        let found = scan(text);
        resolve(text, tokenize(&found, config), &found.pair_boundaries, config).unwrap()
    }

    fn kinds(text: &str) -> Vec<(usize, TokenKind)> {
        run(text, &Config::default())
            .tokens
            .into_iter()
            .map(|t| (t.location, t.kind))
            .collect()
    }

    #[test]
    fn window_cuts_at_boundaries() {
        let text = "alpha bravo charlie 'x' delta echo foxtrot";
        let w = context_window(text, 20, 1, CONTEXT_REACH).unwrap();
        assert_eq!(w.seq, "'");
        assert_eq!(w.before, " charlie ");
        assert_eq!(w.after, "x' delta");
    }

    #[test]
    fn window_keeps_short_sides_whole() {
        let w = context_window("it's", 2, 1, CONTEXT_REACH).unwrap();
        assert_eq!(w.before, "it");
        assert_eq!(w.after, "s");
        assert_eq!(w.char_before(), Some('t'));
        assert_eq!(w.char_after(), Some('s'));
    }

    #[test]
    fn window_out_of_bounds_is_an_error() {
        let err = context_window("abc", 2, 2, CONTEXT_REACH).unwrap_err();
        assert_eq!(
            err,
            Error::ContextOutOfBounds {
                location: 2,
                length: 2,
                text_len: 3
            }
        );
    }

    #[test]
    fn contractions_and_decades() {
        assert_eq!(kinds("don't"), vec![(3, TokenKind::Apostrophe)]);
        assert_eq!(kinds("the '90s"), vec![(4, TokenKind::Apostrophe)]);
        assert_eq!(kinds("'96 was fine"), vec![(0, TokenKind::Apostrophe)]);
        assert_eq!(kinds("1'2"), vec![(1, TokenKind::Apostrophe)]);
    }

    #[test]
    fn quoted_decades_are_pairs() {
        assert_eq!(
            kinds("the '90s' sound"),
            vec![
                (4, TokenKind::SingleOpen { closer: 1 }),
                (8, TokenKind::SingleClose { opener: 0 }),
            ]
        );
        assert_eq!(
            kinds("'96'"),
            vec![
                (0, TokenKind::SingleOpen { closer: 1 }),
                (3, TokenKind::SingleClose { opener: 0 }),
            ]
        );
        assert_eq!(
            kinds("'top 10s list'"),
            vec![
                (0, TokenKind::SingleOpen { closer: 1 }),
                (13, TokenKind::SingleClose { opener: 0 }),
            ]
        );
    }

    #[test]
    fn quoted_word_pairs() {
        assert_eq!(
            kinds("say 'quoted' now"),
            vec![
                (4, TokenKind::SingleOpen { closer: 1 }),
                (11, TokenKind::SingleClose { opener: 0 }),
            ]
        );
    }

    #[test]
    fn unclosed_single_quote_is_left_alone() {
        // `'Twas Tom'` looks like a pair, but the second `'` is a definite apostrophe.
        let res = run("'Twas Tom's hat", &Config::default());
        assert_eq!(res.unresolved, vec![0]);
        let got: Vec<_> = res.tokens.iter().map(|t| (t.location, t.kind)).collect();
        assert_eq!(got, vec![(9, TokenKind::Apostrophe)]);

        assert_eq!(kinds("'tis"), vec![(0, TokenKind::Apostrophe)]);
    }

    #[test]
    fn dash_kinds() {
        assert_eq!(kinds("a -- b"), vec![(2, TokenKind::EnDash)]);
        assert_eq!(kinds("a --- b"), vec![(2, TokenKind::EmDash)]);
        assert_eq!(kinds("pages 10--20"), vec![(8, TokenKind::EnDashSpaced)]);
    }

    #[test]
    fn dashes_next_to_markup_are_rejected() {
        let res = run("x --&gt; y", &Config::default());
        assert!(res.tokens.is_empty());
        assert_eq!(res.rejected, vec![0]);

        assert!(kinds("a <-- b").is_empty());
        assert!(kinds("a --> b").is_empty());
        assert!(kinds("&lt;--- b").is_empty());
    }

    #[test]
    fn disabled_single_quotes_reject_pairs_only() {
        let cfg = Config {
            single_quotes: false,
            ..Config::default()
        };
        let res = run("say 'hey' and don't", &cfg);
        let got: Vec<_> = res.tokens.iter().map(|t| (t.location, t.kind)).collect();
        assert_eq!(got, vec![(17, TokenKind::Apostrophe)]);
        assert_eq!(res.rejected, vec![0, 1]);
    }

    #[test]
    fn disabled_apostrophes_keep_quotes() {
        let cfg = Config {
            apostrophes: false,
            ..Config::default()
        };
        let res = run("'quoted' isn't", &cfg);
        let got: Vec<_> = res.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![
                TokenKind::SingleOpen { closer: 1 },
                TokenKind::SingleClose { opener: 0 },
            ]
        );
        assert_eq!(res.rejected, vec![2]);
    }

    #[test]
    fn pair_indices_survive_rejection() {
        let toks = run(r#"x --> "a" y"#, &Config::default()).tokens;
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].kind, TokenKind::DoubleOpen { closer: 1 });
        assert_eq!(toks[1].kind, TokenKind::DoubleClose { opener: 0 });
    }
}
