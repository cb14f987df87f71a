//! History Emitter: turns the final accumulator state into the checker's
//! list-append history encoding.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::model::{CanonicalTxId, LogicalOp, TransactionRecord};

/// Writes the final history to `out`. Only transactions with at least one
/// op and a recorded commit are emitted; transactions are sorted by
/// `begin_time` ascending, ties broken by canonical ID ascending, and any
/// transaction touching a filtered table prefix is dropped entirely.
///
/// Returns the number of transactions actually emitted.
pub fn emit<W: Write>(
    out: &mut W,
    transactions: &HashMap<CanonicalTxId, TransactionRecord>,
    filter_prefixes: &[String],
) -> io::Result<usize> {
    let mut surviving: Vec<&TransactionRecord> = transactions
        .values()
        .filter(|tx| !tx.ops.is_empty() && tx.is_committed())
        .filter(|tx| !touches_filtered_table(tx, filter_prefixes))
        .collect();

    surviving.sort_by(|a, b| a.begin_time.cmp(&b.begin_time).then(a.canonical_id.0.cmp(&b.canonical_id.0)));

    let mut index: u64 = 0;
    for tx in &surviving {
        let value = render_value(&tx.ops, tx.canonical_id, true);
        writeln!(
            out,
            "{{:type :invoke, :process {}, :time {}, :index {}, :value [{}]}}",
            tx.canonical_id, tx.begin_time, index, value
        )?;
        index += 1;

        let value = render_value(&tx.ops, tx.canonical_id, false);
        writeln!(
            out,
            "{{:type :ok, :process {}, :time {}, :index {}, :value [{}]}}",
            tx.canonical_id, tx.end_time, index, value
        )?;
        index += 1;
    }

    Ok(surviving.len())
}

fn touches_filtered_table(tx: &TransactionRecord, prefixes: &[String]) -> bool {
    tx.ops
        .iter()
        .any(|op| prefixes.iter().any(|prefix| op.object().table.starts_with(prefix.as_str())))
}

fn render_value(ops: &[LogicalOp], canonical_id: CanonicalTxId, is_invoke: bool) -> String {
    ops.iter()
        .map(|op| render_op(op, canonical_id, is_invoke))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `canonical_id` is the owning transaction's key — the append value is
/// always that key, never a value stashed on the op itself, so it stays
/// correct across PROMOTE reparenting.
fn render_op(op: &LogicalOp, canonical_id: CanonicalTxId, is_invoke: bool) -> String {
    match op {
        LogicalOp::Read { object, observed_history } => {
            let key = format!("{}-{}", object.table, object.row);
            if is_invoke {
                format!("[:r {} nil]", key)
            } else {
                let history = observed_history.iter().map(|id| id.0.to_string()).collect::<Vec<_>>().join(" ");
                format!("[:r {} [{}]]", key, history)
            }
        }
        LogicalOp::Append { object } => {
            format!("[:append {}-{} {}]", object.table, object.row, canonical_id)
        }
    }
}

pub fn default_filter_prefixes() -> Vec<String> {
    vec![
        "mysql".to_string(),
        "sys.".to_string(),
        "INFORMATION_SCHEMA.".to_string(),
        "PERFORMANCE_SCHEMA.".to_string(),
    ]
}
