//! Parallel rendering of independent documents.

use crate::error::RenderError;
use crate::html::{Rendered, render_markdown};
use crate::options::RenderOptions;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// A single document to render.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markdown source.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered output (present on success).
    pub result: Option<Rendered>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStats {
    /// Total number of documents submitted.
    pub total: u32,
    /// Number of documents rendered.
    pub succeeded: u32,
    /// Number of documents that failed.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Whether to continue processing after an error. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Options applied to every document.
    pub render: RenderOptions,
}

/// All results, in input order, plus statistics.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Individual results for each input.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Renders many documents in parallel. One failing document never affects
/// the others unless `continue_on_error` is `false`, in which case
/// documents are rendered in order and the batch stops at the first failure.
pub fn render_batch(inputs: Vec<BatchInput>, options: &BatchOptions) -> BatchOutcome {
    run_batch(inputs, options, |input| render_markdown(&input.source, &options.render))
}

fn run_batch<F>(inputs: Vec<BatchInput>, options: &BatchOptions, render: F) -> BatchOutcome
where
    F: Fn(&BatchInput) -> Result<Rendered, RenderError> + Sync,
{
    let start = Instant::now();
    let continue_on_error = options.continue_on_error.unwrap_or(true);

    let pool = match options.max_threads {
        Some(max_threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .map_err(|err| log::warn!("typographer: falling back to the global pool: {}", err))
            .ok(),
        None => None,
    };

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match render(&input) {
            Ok(rendered) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: Some(rendered),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::warn!("typographer: {} failed: {}", input.id, err);
                BatchResult {
                    id: input.id,
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        match pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let stop = result.error.is_some();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    BatchOutcome {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, source: &str) -> BatchInput {
        BatchInput {
            id: id.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn results_keep_input_order() {
        let inputs = (0..16)
            .map(|i| input(&format!("doc-{i}"), &format!("Item {i}... done")))
            .collect();
        let outcome = render_batch(
            inputs,
            &BatchOptions {
                max_threads: Some(2),
                ..BatchOptions::default()
            },
        );

        assert_eq!(outcome.stats.total, 16);
        assert_eq!(outcome.stats.succeeded, 16);
        assert_eq!(outcome.stats.failed, 0);
        for (i, result) in outcome.results.iter().enumerate() {
            assert_eq!(result.id, format!("doc-{i}"));
            let rendered = result.result.as_ref().unwrap();
            assert_eq!(rendered.html, format!("<p>Item {i}\u{2026} done</p>"));
        }
    }

    fn failing_on(bad: &'static str) -> impl Fn(&BatchInput) -> Result<Rendered, RenderError> + Sync {
        move |input: &BatchInput| {
            if input.id == bad {
                Err(RenderError::parse_error("unexpected end", 1, 1))
            } else {
                render_markdown(&input.source, &RenderOptions::default())
            }
        }
    }

    #[test]
    fn failure_is_isolated_in_parallel_mode() {
        let inputs = (0..8).map(|i| input(&format!("doc-{i}"), "a -- b")).collect();
        let outcome = run_batch(
            inputs,
            &BatchOptions {
                max_threads: Some(2),
                ..BatchOptions::default()
            },
            failing_on("doc-3"),
        );

        assert_eq!(outcome.stats.total, 8);
        assert_eq!(outcome.stats.succeeded, 7);
        assert_eq!(outcome.stats.failed, 1);
        assert_eq!(outcome.results.len(), 8);
        for (i, result) in outcome.results.iter().enumerate() {
            assert_eq!(result.id, format!("doc-{i}"));
            if i == 3 {
                assert!(result.result.is_none());
                let error = result.error.as_deref().unwrap();
                assert!(error.contains("unexpected end"), "{error}");
            } else {
                assert!(result.error.is_none());
                assert_eq!(result.result.as_ref().unwrap().html, "<p>a \u{2013} b</p>");
            }
        }
    }

    #[test]
    fn sequential_mode_stops_at_first_failure() {
        let inputs = ["a", "b", "c", "d"].iter().map(|id| input(id, "x")).collect();
        let outcome = run_batch(
            inputs,
            &BatchOptions {
                continue_on_error: Some(false),
                ..BatchOptions::default()
            },
            failing_on("b"),
        );

        assert_eq!(outcome.stats.total, 4);
        assert_eq!(outcome.stats.succeeded, 1);
        assert_eq!(outcome.stats.failed, 1);
        let ids: Vec<_> = outcome.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(outcome.results[1].error.is_some());
    }

    #[test]
    fn sequential_mode_processes_everything_without_errors() {
        let outcome = render_batch(
            vec![input("a", "a -- b"), input("b", "# 'quoted'")],
            &BatchOptions {
                continue_on_error: Some(false),
                ..BatchOptions::default()
            },
        );
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.stats.succeeded, 2);
        assert!(outcome.results.iter().all(|r| r.error.is_none()));
    }
}
