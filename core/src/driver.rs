//! Wires Reader -> Resolver -> {Ledger, Accumulator} -> Emitter into a
//! single streaming pass over a trace.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::accumulator::Accumulator;
use crate::emitter;
use crate::ledger::VersionLedger;
use crate::reader::read_records;
use crate::resolver::Resolver;

/// Summary of one translation run, for the caller to log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Number of trace lines that parsed into a well-formed record and were
    /// applied to the accumulator (malformed/blank lines are not counted —
    /// see [`crate::reader`] for the event-time counter that does count them).
    pub records_applied: u64,
    pub transactions_emitted: u64,
}

/// Translates `trace` into the checker's history format, writing it to
/// `out`. `filter_prefixes` are case-sensitive table-name prefixes; any
/// transaction with an op on a matching table is dropped entirely.
pub fn translate<R: BufRead, W: Write>(
    trace: R,
    out: &mut W,
    filter_prefixes: &[String],
) -> std::io::Result<TranslationStats> {
    let mut resolver = Resolver::new();
    let mut ledger = VersionLedger::new();
    let mut accumulator = Accumulator::new();

    let mut records_applied: u64 = 0;
    for record in read_records(trace) {
        records_applied += 1;
        debug!(event_time = record.event_time, event_type = ?record.event_type, "applying trace record");
        accumulator.apply(&mut resolver, &mut ledger, &record);
    }

    let transactions_emitted = emitter::emit(out, accumulator.transactions(), filter_prefixes)? as u64;

    Ok(TranslationStats { records_applied, transactions_emitted })
}
