#![deny(missing_docs)]
//! Markdown to HTML rendering with typographic punctuation.
//!
//! Documents are parsed with markdown-rs. The phrasing content of every
//! heading and paragraph is handed to `typographer-core` as an inline tree
//! and written back out as HTML, with style wrappers as `<span>` elements.

/// Parallel rendering of many documents.
pub mod batch;
/// Error and diagnostic types.
pub mod error;
/// Block-level HTML rendering.
pub mod html;
/// Parser and renderer options.
pub mod options;
/// markdown-rs adapter.
pub mod parse;
/// Phrasing content conversion and inline HTML output.
pub mod phrasing;

pub use batch::{BatchInput, BatchOptions, BatchOutcome, BatchResult, BatchStats, render_batch};
pub use error::{BlockFailure, RenderDiagnostics, RenderError, SourceLocation};
pub use html::{Rendered, render_inline, render_markdown};
pub use options::{ParseOptions, RenderOptions};
pub use parse::parse_mdast;
pub use phrasing::HtmlNode;
