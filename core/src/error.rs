//! Error types for the trace-to-history translator.

use std::io;

use thiserror::Error;

/// Errors the translator can surface. Per the translator's design, only I/O
/// failures are representable here — malformed records, semantically
/// incomplete events, and dangling transactions are absorbed silently by
/// the reader and accumulator rather than propagated as errors.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("failed to open trace file: {0}")]
    OpenTrace(#[source] io::Error),

    #[error("failed to open output file: {0}")]
    OpenOutput(#[source] io::Error),

    #[error("failed writing history: {0}")]
    WriteOutput(#[source] io::Error),
}

pub type TranslateResult<T> = Result<T, TranslateError>;
