//! Core of the IsoFuzz trace-to-history translator.
//!
//! Consumes a linear per-row event trace emitted by an instrumented
//! database server and reconstructs a per-transaction, per-object logical
//! history in the list-append model expected by an external consistency
//! checker. See [`driver::translate`] for the single entry point.

pub mod accumulator;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod ledger;
pub mod model;
pub mod reader;
pub mod resolver;

pub use driver::{translate, TranslationStats};
pub use emitter::default_filter_prefixes;
pub use error::{TranslateError, TranslateResult};
