//! isofuzz-translate: translates a raw IsoFuzz trace into the list-append
//! history format consumed by the external consistency checker.
//!
//! This binary owns only I/O (opening the trace, opening the output,
//! mapping failures to exit codes) and argument parsing; all translation
//! semantics live in `isofuzz_core`.

mod args;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::Args;
use isofuzz_core::error::TranslateError;

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(args: Args) -> Result<(), TranslateError> {
    if args.mutate.is_some() {
        warn!("--mutate flag is recognized but mutation logic is not implemented at this layer");
    }

    info!(
        trace = %args.trace_file.display(),
        output = %args.output_file.display(),
        prefixes = ?args.filter_prefix,
        "starting translation"
    );

    let trace_file = File::open(&args.trace_file).map_err(TranslateError::OpenTrace)?;
    let output_file = File::create(&args.output_file).map_err(TranslateError::OpenOutput)?;

    let mut reader = BufReader::new(trace_file);
    let mut writer = BufWriter::new(output_file);

    // The only remaining I/O surface inside `translate` is the history
    // writer: line reads that fail (e.g. invalid UTF-8) are treated like
    // any other malformed record and silently skipped, since local trace
    // files essentially never produce a non-EOF read error.
    let stats = isofuzz_core::translate(&mut reader, &mut writer, &args.filter_prefix)
        .map_err(TranslateError::WriteOutput)?;

    use std::io::Write;
    writer.flush().map_err(TranslateError::WriteOutput)?;

    info!(
        records_applied = stats.records_applied,
        transactions_emitted = stats.transactions_emitted,
        "translation complete"
    );

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
