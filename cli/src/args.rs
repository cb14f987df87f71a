//! Argument parsing for the translator CLI.

use std::path::PathBuf;

use clap::Parser;

/// Translate an IsoFuzz trace log into the checker's list-append history
/// format.
#[derive(Parser, Debug)]
#[command(name = "isofuzz-translate")]
#[command(about = "Translate an IsoFuzz trace into an Elle-compatible history")]
#[command(version)]
pub struct Args {
    /// Path to the input trace file.
    pub trace_file: PathBuf,

    /// Path where the output history file will be written.
    pub output_file: PathBuf,

    /// Table name prefixes to filter out entirely (case-sensitive).
    ///
    /// Supplying this flag replaces the default list; supplying it with no
    /// values disables filtering.
    #[arg(long, num_args = 0.., default_values_t = default_filter_prefixes())]
    pub filter_prefix: Vec<String>,

    /// Enable mutation. Recognized for driver compatibility; this binary
    /// does not implement mutation and only logs a warning when set.
    #[arg(long, num_args = 0..=1, default_missing_value = "1")]
    pub mutate: Option<u32>,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Silence all logging except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

fn default_filter_prefixes() -> Vec<String> {
    isofuzz_core::default_filter_prefixes()
}
