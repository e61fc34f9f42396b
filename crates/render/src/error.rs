use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that stop a whole document from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// markdown-rs rejected the input.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The typography engine failed outside block isolation.
    #[error("Typography error: {0}")]
    Typography(#[from] typographer_core::Error),
}

impl RenderError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Parse {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }
}

/// A block the engine gave up on; it was rendered without typography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    /// Zero-based index of the block among processed blocks, in document order.
    pub block_index: usize,
    /// Where the block starts, when the parser recorded it.
    pub location: Option<SourceLocation>,
    /// Engine error message.
    pub message: String,
}

/// Non-fatal problems collected while rendering one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiagnostics {
    /// Blocks rendered without typography.
    pub failures: Vec<BlockFailure>,
}

impl RenderDiagnostics {
    /// True when every block was processed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn push(&mut self, failure: BlockFailure) {
        self.failures.push(failure);
    }
}
