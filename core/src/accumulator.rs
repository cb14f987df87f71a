//! Transaction Accumulator: per-canonical-transaction state, advanced one
//! parsed record at a time.

use std::collections::HashMap;

use crate::ledger::VersionLedger;
use crate::model::{CanonicalTxId, LogicalOp, ObjectId, RawTxId, TransactionRecord};
use crate::reader::{EventType, RawRecord};
use crate::resolver::Resolver;

#[derive(Debug, Default)]
pub struct Accumulator {
    transactions: HashMap<CanonicalTxId, TransactionRecord>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &HashMap<CanonicalTxId, TransactionRecord> {
        &self.transactions
    }

    fn entry(&mut self, id: CanonicalTxId) -> &mut TransactionRecord {
        self.transactions.entry(id).or_insert_with(|| TransactionRecord::new(id))
    }

    /// Applies one parsed record to the accumulator, consulting and updating
    /// `resolver` and `ledger` as needed. This is the translator's single
    /// state-transition function; every other module only supplies or
    /// consumes data around it.
    pub fn apply(&mut self, resolver: &mut Resolver, ledger: &mut VersionLedger, record: &RawRecord) {
        if record.event_type == EventType::Promote {
            self.promote(resolver, record);
            return;
        }

        let canonical_id = resolver.resolve(record.trx_id);

        match record.event_type {
            EventType::Promote => unreachable!("handled above"),
            EventType::Begin => {
                let tx = self.entry(canonical_id);
                if tx.begin_time == -1 {
                    tx.begin_time = record.event_time;
                }
            }
            EventType::Commit => {
                if let Some(tx) = self.transactions.get_mut(&canonical_id) {
                    tx.end_time = record.event_time;
                }
            }
            EventType::Read => {
                let Some(table) = &record.table else { return };
                let Some(row) = record.row else { return };
                let object = ObjectId::new(table.clone(), row);
                let observed_history = observed_history_for_read(ledger, &object, record.last_writer_id);
                self.entry(canonical_id)
                    .ops
                    .push(LogicalOp::Read { object, observed_history });
            }
            EventType::Insert | EventType::Update | EventType::Delete => {
                let Some(table) = &record.table else { return };
                let Some(row) = record.row else { return };
                let object = ObjectId::new(table.clone(), row);

                let tx = self.entry(canonical_id);
                if !tx.written_objects.contains(&object) {
                    tx.ops.push(LogicalOp::Append { object: object.clone() });
                    tx.written_objects.insert(object.clone());
                }
                // Every physical write is recorded regardless of coalescing,
                // so other transactions' later reads see it.
                ledger.record_write(object, canonical_id);
            }
        }
    }

    fn promote(&mut self, resolver: &mut Resolver, record: &RawRecord) {
        let old = RawTxId(record.last_writer_id);
        let new = CanonicalTxId(record.trx_id.0);
        resolver.promote(old, new);

        let old_as_canonical = CanonicalTxId(old.0);
        if old_as_canonical == new {
            return;
        }
        if let Some(old_tx) = self.transactions.remove(&old_as_canonical) {
            self.transactions.insert(new, TransactionRecord { canonical_id: new, ..old_tx });
        }
    }
}

/// Computes the observed history for a READ/UPDATE/DELETE per spec: the
/// prefix of the ledger's history up to and including the earliest
/// occurrence of `last_writer_id`, or a recovery fallback if the writer
/// never appears in the ledger.
///
/// INSERT always observes an empty history and does not call this — it
/// never reads a prior version by definition.
fn observed_history_for_read(
    ledger: &VersionLedger,
    object: &ObjectId,
    last_writer_id: i64,
) -> Vec<CanonicalTxId> {
    let history = ledger.history_of(object);
    if let Some(idx) = history.iter().position(|id| id.0 == last_writer_id) {
        return history[..=idx].to_vec();
    }
    if last_writer_id != 0 {
        vec![CanonicalTxId(last_writer_id)]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_records;

    fn run(lines: &str) -> (Accumulator, Resolver, VersionLedger) {
        let mut acc = Accumulator::new();
        let mut resolver = Resolver::new();
        let mut ledger = VersionLedger::new();
        for record in read_records(lines.as_bytes()) {
            acc.apply(&mut resolver, &mut ledger, &record);
        }
        (acc, resolver, ledger)
    }

    #[test]
    fn begin_then_read_then_commit() {
        let trace = "\
1\t10\tBEGIN\tN/A\tN/A\tN/A\t0
1\t10\tINSERT\tt\tc\t5\t0
1\t10\tCOMMIT\tN/A\tN/A\tN/A\t0
2\t11\tBEGIN\tN/A\tN/A\tN/A\t0
2\t11\tREAD\tt\tc\t5\t10
2\t11\tCOMMIT\tN/A\tN/A\tN/A\t0
";
        let (acc, _, _) = run(trace);
        let tx10 = &acc.transactions()[&CanonicalTxId(10)];
        assert_eq!(tx10.begin_time, 1);
        assert_eq!(tx10.end_time, 3);
        assert_eq!(tx10.ops, vec![LogicalOp::Append { object: ObjectId::new("t", 5) }]);

        let tx11 = &acc.transactions()[&CanonicalTxId(11)];
        assert_eq!(
            tx11.ops,
            vec![LogicalOp::Read {
                object: ObjectId::new("t", 5),
                observed_history: vec![CanonicalTxId(10)],
            }]
        );
    }

    #[test]
    fn repeated_writes_coalesce_into_one_append() {
        let trace = "\
1\t20\tBEGIN\tN/A\tN/A\tN/A\t0
1\t20\tUPDATE\tt\tc\t7\t0
1\t20\tUPDATE\tt\tc\t7\t20
1\t20\tUPDATE\tt\tc\t7\t20
1\t20\tCOMMIT\tN/A\tN/A\tN/A\t0
";
        let (acc, _, ledger) = run(trace);
        let tx = &acc.transactions()[&CanonicalTxId(20)];
        assert_eq!(tx.ops.len(), 1);
        assert_eq!(
            ledger.history_of(&ObjectId::new("t", 7)),
            &[CanonicalTxId(20), CanonicalTxId(20), CanonicalTxId(20)]
        );
    }

    #[test]
    fn promote_reparents_accumulated_state() {
        let trace = "\
1\t382\tBEGIN\tN/A\tN/A\tN/A\t0
1\t382\tINSERT\tt\tc\t3\t0
1\t444486\tPROMOTE\tN/A\tN/A\tN/A\t382
1\t444486\tCOMMIT\tN/A\tN/A\tN/A\t0
";
        let (acc, resolver, _) = run(trace);
        assert_eq!(resolver.resolve(RawTxId(382)), CanonicalTxId(444486));
        assert!(!acc.transactions().contains_key(&CanonicalTxId(382)));
        let tx = &acc.transactions()[&CanonicalTxId(444486)];
        assert_eq!(tx.ops, vec![LogicalOp::Append { object: ObjectId::new("t", 3) }]);
    }

    #[test]
    fn promote_old_equal_new_is_a_no_op_on_accumulator() {
        let trace = "\
1\t5\tBEGIN\tN/A\tN/A\tN/A\t0
1\t5\tPROMOTE\tN/A\tN/A\tN/A\t5
1\t5\tCOMMIT\tN/A\tN/A\tN/A\t0
";
        let (acc, _, _) = run(trace);
        assert_eq!(acc.transactions().len(), 1);
        let tx = &acc.transactions()[&CanonicalTxId(5)];
        assert_eq!(tx.begin_time, 1);
        assert_eq!(tx.end_time, 3);
    }

    #[test]
    fn commit_without_prior_record_is_dropped_silently() {
        let trace = "1\t99\tCOMMIT\tN/A\tN/A\tN/A\t0\n";
        let (acc, _, _) = run(trace);
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn initial_version_read_with_zero_writer_and_empty_ledger_is_empty() {
        let trace = "1\t1\tREAD\tt\tc\t9\t0\n";
        let (acc, _, _) = run(trace);
        let tx = &acc.transactions()[&CanonicalTxId(1)];
        assert_eq!(
            tx.ops,
            vec![LogicalOp::Read { object: ObjectId::new("t", 9), observed_history: vec![] }]
        );
    }

    #[test]
    fn missing_writer_fallback_yields_singleton_history() {
        let trace = "1\t1\tREAD\tt\tc\t9\t77\n";
        let (acc, _, _) = run(trace);
        let tx = &acc.transactions()[&CanonicalTxId(1)];
        assert_eq!(
            tx.ops,
            vec![LogicalOp::Read {
                object: ObjectId::new("t", 9),
                observed_history: vec![CanonicalTxId(77)],
            }]
        );
    }

    #[test]
    fn read_update_delete_with_na_table_or_row_are_skipped() {
        let trace = "\
1\t1\tREAD\tN/A\tc\t9\t0
1\t1\tUPDATE\tt\tc\tN/A\t0
";
        let (acc, _, _) = run(trace);
        assert!(acc.transactions()[&CanonicalTxId(1)].ops.is_empty());
    }

    #[test]
    fn insert_always_observes_empty_history_even_if_ledger_has_entries() {
        let trace = "\
1\t1\tUPDATE\tt\tc\t4\t0
1\t2\tINSERT\tt\tc\t4\t1
";
        let (acc, _, ledger) = run(trace);
        // INSERT goes through the append path, not the read path, so its
        // ledger entry is recorded but it never produces a Read op.
        assert_eq!(
            ledger.history_of(&ObjectId::new("t", 4)),
            &[CanonicalTxId(1), CanonicalTxId(2)]
        );
        assert_eq!(
            acc.transactions()[&CanonicalTxId(2)].ops,
            vec![LogicalOp::Append { object: ObjectId::new("t", 4) }]
        );
    }
}
