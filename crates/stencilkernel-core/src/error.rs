//! Error types for the stencilkernel engine.
//!
//! Every failure in this engine is fatal for the run: the scaffold is a
//! single-shot batch transform with no retry or recovery policy.

use thiserror::Error;

/// Errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum StencilKernelError {
    /// Invalid grid or engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A stage declared a wider per-cell variable count than the
    /// workspace allocates for.
    #[error("Stage '{label}' declares {vars} variables per cell, exceeding the configured maximum {max_vars}")]
    StageTooWide {
        /// Label of the offending stage.
        label: String,
        /// Variable count the stage declared.
        vars: usize,
        /// Widest count the workspace was allocated for.
        max_vars: usize,
    },

    /// The input stream ended before the expected number of values
    /// arrived. Counts are in `f64` units.
    #[error("Short read: expected {expected} values, got {got}")]
    ShortRead {
        /// Number of values the grid shape requires.
        expected: usize,
        /// Number of whole values actually received.
        got: usize,
    },

    /// Underlying I/O failure, including short writes surfaced by
    /// `write_all`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, StencilKernelError>;
