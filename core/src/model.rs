//! Core data model: object identity, transaction identity, and the logical
//! operations that make up a transaction's history.

use std::collections::HashSet;

/// Identity of a row: the unit of atomicity and the unit of version tracking.
///
/// Columns carry no identity — only `(table, row)` matters to the history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub table: String,
    pub row: i64,
}

impl ObjectId {
    pub fn new(table: impl Into<String>, row: i64) -> Self {
        Self { table: table.into(), row }
    }
}

/// The transaction ID as it appears verbatim in a trace record, before any
/// PROMOTE has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawTxId(pub i64);

/// The transaction ID a transaction's operations are actually accumulated
/// under, after all applicable PROMOTE redirections.
///
/// Kept as a distinct type from [`RawTxId`] so that a raw ID can never be
/// used to key the accumulator or ledger by accident — the only place the
/// two are allowed to meet is [`crate::resolver::Resolver::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalTxId(pub i64);

impl std::fmt::Display for CanonicalTxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logical operation in a transaction's history, in the list-append
/// model expected by the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalOp {
    /// A read that observed the given prefix of the object's version list.
    Read { object: ObjectId, observed_history: Vec<CanonicalTxId> },
    /// One coalesced logical write of this transaction to this object. The
    /// appended value is always the owning transaction's canonical ID, not
    /// stored per-op — it must track PROMOTE reparenting, so it is read from
    /// [`TransactionRecord::canonical_id`] at emission time instead.
    Append { object: ObjectId },
}

impl LogicalOp {
    pub fn object(&self) -> &ObjectId {
        match self {
            LogicalOp::Read { object, .. } => object,
            LogicalOp::Append { object, .. } => object,
        }
    }
}

/// Per-canonical-transaction accumulated state.
///
/// Created lazily on first mention of a canonical ID, mutated only by the
/// accumulator, and consumed (never deleted) at end of stream by the
/// emitter.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub canonical_id: CanonicalTxId,
    /// Event-time of the first BEGIN observed; `-1` if none.
    pub begin_time: i64,
    /// Event-time of the last COMMIT observed; `-1` if never committed.
    pub end_time: i64,
    /// Logical operations in emission order.
    pub ops: Vec<LogicalOp>,
    /// Objects this transaction has already contributed a logical write for,
    /// used to coalesce repeated physical writes into one append.
    pub written_objects: HashSet<ObjectId>,
}

impl TransactionRecord {
    pub fn new(canonical_id: CanonicalTxId) -> Self {
        Self {
            canonical_id,
            begin_time: -1,
            end_time: -1,
            ops: Vec::new(),
            written_objects: HashSet::new(),
        }
    }

    pub fn is_committed(&self) -> bool {
        self.end_time != -1
    }
}
