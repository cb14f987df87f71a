//! Record Reader: turns a raw trace into a lazy sequence of parsed records.
//!
//! The reader does not interpret semantics — it only strips, splits, and
//! parses. A line that can't be turned into a well-formed [`RawRecord`] is
//! skipped, never rejected with an error; the only thing that advances
//! unconditionally for every input line, valid or not, is the event-time
//! counter, since every preceding line (parseable or not) must have a
//! strictly smaller event-time than anything parsed from it.

use std::io::BufRead;

use crate::model::RawTxId;

/// The seven event types the trace format recognizes. Any other tag causes
/// the record to be silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Begin,
    Commit,
    Promote,
    Read,
    Insert,
    Update,
    Delete,
}

impl EventType {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "BEGIN" => EventType::Begin,
            "COMMIT" => EventType::Commit,
            "PROMOTE" => EventType::Promote,
            "READ" => EventType::Read,
            "INSERT" => EventType::Insert,
            "UPDATE" => EventType::Update,
            "DELETE" => EventType::Delete,
            _ => return None,
        })
    }
}

/// One successfully parsed trace line, tagged with the event-time at which
/// it was read.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub event_time: i64,
    #[allow(dead_code)] // read but not used, per the trace contract
    pub thread_id: String,
    pub trx_id: RawTxId,
    pub event_type: EventType,
    pub table: Option<String>,
    #[allow(dead_code)] // read but not used, per the trace contract
    pub column: String,
    pub row: Option<i64>,
    pub last_writer_id: i64,
}

fn parse_line(line: &str, event_time: i64) -> Option<RawRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split('\t').collect();
    let [thread_id, trx_id, event_type, table, column, row, last_writer_id] = parts[..] else {
        return None;
    };

    let event_type = EventType::parse(event_type)?;
    let trx_id = trx_id.parse::<i64>().ok()?;
    let last_writer_id = last_writer_id.parse::<i64>().ok()?;
    let row = if row == "N/A" {
        None
    } else {
        Some(row.parse::<i64>().ok()?)
    };
    let table = if table == "N/A" { None } else { Some(table.to_string()) };

    Some(RawRecord {
        event_time,
        thread_id: thread_id.to_string(),
        trx_id: RawTxId(trx_id),
        event_type,
        table,
        column: column.to_string(),
        row,
        last_writer_id,
    })
}

/// Reads a trace line by line, yielding only the lines that parse into a
/// well-formed [`RawRecord`]. The event-time counter ticks once per input
/// line regardless of whether the line parses, so callers only ever see
/// the event-times of lines that survived.
pub fn read_records<R: BufRead>(input: R) -> impl Iterator<Item = RawRecord> {
    let mut event_time: i64 = 0;
    input.lines().filter_map(move |line| {
        event_time += 1;
        let line = line.ok()?;
        parse_line(&line, event_time)
    })
}
