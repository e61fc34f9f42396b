use thiserror::Error;

/// Which traversal limit stopped a splice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLimit {
    /// Nesting of structural nodes went deeper than allowed.
    Depth(usize),
    /// More nodes were visited than allowed.
    Nodes(usize),
}

impl std::fmt::Display for BudgetLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetLimit::Depth(max) => write!(f, "depth limit of {}", max),
            BudgetLimit::Nodes(max) => write!(f, "node limit of {}", max),
        }
    }
}

/// Errors raised while splicing tokens back into a leaf sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// The traversal budget ran out; the rest of the block was left unprocessed.
    #[error("traversal budget exceeded ({limit}) after {visited} nodes")]
    BudgetExceeded {
        /// The limit that was hit.
        limit: BudgetLimit,
        /// Nodes visited before halting.
        visited: usize,
    },
}

/// Errors raised by the typography engine.
///
/// Malformed prose (unbalanced quotes, stray hyphens) never produces an error;
/// only broken internal invariants do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A context window was requested for a range outside the text.
    #[error("context window {location}+{length} out of range for text of {text_len} bytes")]
    ContextOutOfBounds {
        /// Token location.
        location: usize,
        /// Token length.
        length: usize,
        /// Length of the block text.
        text_len: usize,
    },
    /// Splicing failed.
    #[error("splice halted: {0}")]
    Splice(#[from] SpliceError),
}
