//! Identity Resolver: the transaction-ID rewriting table fed by PROMOTE.

use std::collections::HashMap;

use crate::model::{CanonicalTxId, RawTxId};

/// Maintains `raw -> canonical` forwarding. Append-only and idempotent:
/// re-promoting a canonical ID to itself is a no-op, and the map is flat by
/// construction since every PROMOTE immediately reparents the accumulator
/// entry (see [`crate::accumulator::Accumulator::promote`]) — no chain
/// compression is ever needed, and this type intentionally does not chase
/// chains.
#[derive(Debug, Default)]
pub struct Resolver {
    forward: HashMap<RawTxId, CanonicalTxId>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical ID of `raw`: the forwarded target if one was
    /// ever recorded, otherwise `raw` reinterpreted as canonical.
    pub fn resolve(&self, raw: RawTxId) -> CanonicalTxId {
        self.forward.get(&raw).copied().unwrap_or(CanonicalTxId(raw.0))
    }

    /// Records that `old` is now known to be the same transaction as `new`.
    pub fn promote(&mut self, old: RawTxId, new: CanonicalTxId) {
        self.forward.insert(old, new);
    }
}
