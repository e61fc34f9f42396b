//! Merges scan results into one ordered stream of provisional tokens.
//!
//! Ellipses and double quotes are settled here; dashes wait for the HTML
//! adjacency check and apostrophes wait for context.

use crate::config::Config;
use crate::scan::Scan;
use crate::token::TokenKind;

/// Width of a dash candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashWidth {
    /// `--`
    En,
    /// `---`
    Em,
}

/// Classification state of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisional {
    /// Final kind is known.
    Settled(TokenKind),
    /// Dash that still needs the markup adjacency check.
    Dash(DashWidth),
    /// Straight `'`, unclassified.
    Quote,
    /// Opening double quote waiting for its closer.
    OpenDouble,
    /// Opening single quote waiting for its closer.
    OpenSingle,
}

impl Provisional {
    /// Whether the candidate may be handed to the splicer.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Provisional::Settled(_))
    }
}

/// A candidate replacement site. Pair indices inside a settled kind refer to
/// positions in the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Byte offset in the block text.
    pub location: usize,
    /// Source bytes covered.
    pub length: usize,
    /// Classification state.
    pub state: Provisional,
}

#[derive(Debug, Clone, Copy)]
enum Hit {
    Ellipsis,
    EmDash,
    EnDash,
    Double,
    Single,
}

/// Open double quote awaiting its closer; double quotes never nest.
#[derive(Debug, Default)]
struct DoubleState {
    open: Option<usize>,
}

/// Builds the ordered candidate list for one block.
pub fn tokenize(scan: &Scan, config: &Config) -> Vec<Candidate> {
    let mut hits: Vec<(usize, Hit)> = Vec::new();
    if config.ellipses {
        hits.extend(scan.ellipses.iter().map(|&at| (at, Hit::Ellipsis)));
    }
    if config.dashes {
        hits.extend(scan.em_dashes.iter().map(|&at| (at, Hit::EmDash)));
        hits.extend(scan.en_dashes.iter().map(|&at| (at, Hit::EnDash)));
    }
    if config.double_quotes {
        hits.extend(scan.double_quotes.iter().map(|&at| (at, Hit::Double)));
    }
    if config.apostrophes || config.single_quotes {
        hits.extend(scan.apostrophes.iter().map(|&at| (at, Hit::Single)));
    }
    hits.sort_by_key(|(at, _)| *at);

    let mut candidates: Vec<Candidate> = Vec::with_capacity(hits.len());
    let mut doubles = DoubleState::default();

    for (location, hit) in hits {
        let (length, state) = match hit {
            Hit::Ellipsis => (3, Provisional::Settled(TokenKind::Ellipsis)),
            Hit::EmDash => (3, Provisional::Dash(DashWidth::Em)),
            Hit::EnDash => (2, Provisional::Dash(DashWidth::En)),
            Hit::Single => (1, Provisional::Quote),
            Hit::Double => match doubles.open.take() {
                Some(opener) => {
                    let closer = candidates.len();
                    candidates[opener].state = Provisional::Settled(TokenKind::DoubleOpen { closer });
                    (1, Provisional::Settled(TokenKind::DoubleClose { opener }))
                }
                None => {
                    doubles.open = Some(candidates.len());
                    (1, Provisional::OpenDouble)
                }
            },
        };
        candidates.push(Candidate {
            location,
            length,
            state,
        });
    }

    if let Some(opener) = doubles.open {
        candidates[opener].state = Provisional::Settled(TokenKind::DoubleRunon);
    }

    candidates
}
