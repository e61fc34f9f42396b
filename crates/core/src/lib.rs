#![deny(missing_docs)]
//! typographer core: turns straight ASCII punctuation into typographic Unicode.
//!
//! The pipeline for one block of text is scan → tokenize → resolve → splice.
//! [`resolve_typography`] runs the first three stages and returns the
//! replacement tokens; [`splice`] applies them to a host's inline tree.

/// Engine configuration and quote presets.
pub mod config;
/// Engine error types.
pub mod error;
/// Context windows and the apostrophe/single-quote heuristics.
pub mod resolve;
/// Raw candidate discovery.
pub mod scan;
/// Applying tokens to an inline tree.
pub mod splice;
/// Resolved tokens, glyphs and style classes.
pub mod token;
/// Ordered provisional tokens.
pub mod tokenize;

pub use config::{Config, QuotePreset};
pub use error::{BudgetLimit, Error, SpliceError};
pub use resolve::{Resolution, Window, context_window, resolve};
pub use scan::{Scan, scan};
pub use splice::{Inline, SpliceBudget, flatten, splice, splice_with_budget};
pub use token::{StyleClass, Token, TokenKind, TokenStyle};
pub use tokenize::{Candidate, DashWidth, Provisional, tokenize};

/// Resolves every replacement in one block of plain text.
///
/// Tokens come back in ascending, non-overlapping `location` order.
pub fn resolve_typography(text: &str, config: &Config) -> Result<Vec<Token>, Error> {
    let found = scan(text);
    if found.is_empty() {
        return Ok(Vec::new());
    }
    let candidates = tokenize(&found, config);
    let resolution = resolve(text, candidates, &found.pair_boundaries, config)?;
    log::debug!(
        "typographer: {} token(s), {} rejected, {} unresolved",
        resolution.tokens.len(),
        resolution.rejected.len(),
        resolution.unresolved.len()
    );
    Ok(resolution.tokens)
}

/// Applies the replacements to a plain string, without any styling.
pub fn typographize(text: &str, config: &Config) -> Result<String, Error> {
    let tokens = resolve_typography(text, config)?;
    if tokens.is_empty() {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len() + tokens.len() * 2);
    let mut cursor = 0;
    for token in &tokens {
        out.push_str(&text[cursor..token.location]);
        out.push_str(&token.replacement);
        cursor = token.location + token.length;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Resolves and splices one block held as an inline tree.
///
/// Returns the number of tokens applied.
pub fn process<E>(nodes: &mut Vec<Inline<E>>, config: &Config) -> Result<usize, Error> {
    process_with_budget(nodes, config, SpliceBudget::default())
}

/// [`process`] with explicit traversal limits.
pub fn process_with_budget<E>(
    nodes: &mut Vec<Inline<E>>,
    config: &Config,
    budget: SpliceBudget,
) -> Result<usize, Error> {
    let text = flatten(nodes);
    let tokens = resolve_typography(&text, config)?;
    if tokens.is_empty() {
        return Ok(0);
    }
    splice_with_budget(nodes, &tokens, budget)?;
    Ok(tokens.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typographize_mixed_text() {
        let out = typographize(r#"Wait... "really"? It's 10--20 --- maybe"#, &Config::default()).unwrap();
        assert_eq!(
            out,
            "Wait\u{2026} \u{201C}really\u{201D}? It\u{2019}s 10\u{200A}\u{2013}\u{200A}20 \u{2014} maybe"
        );
    }

    #[test]
    fn process_reports_token_count() {
        let mut nodes: Vec<Inline<()>> = vec![Inline::text("a -- b")];
        assert_eq!(process(&mut nodes, &Config::default()).unwrap(), 1);
        assert_eq!(nodes, vec![Inline::text("a \u{2013} b")]);
    }
}
