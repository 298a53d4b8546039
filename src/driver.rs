//! Single-pass deduplication driver
//!
//! Reads lines in order, asks the [`Deduper`] about each one, and writes
//! the kept lines unchanged to the output.

use crate::args::Args;
use crate::dedup::{Counts, Deduper};
use crate::io::{Output, open_input};
use crate::umi::UmiSet;
use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, Write};

/// Deduplicate every line of `reader` into `writer`
///
/// Stops at the first fatal error, so `writer` may hold a partial result.
pub fn dedup_stream<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    deduper: &mut Deduper,
) -> Result<()> {
    let mut line = Vec::with_capacity(512);
    let mut line_no: u64 = 0;

    loop {
        line.clear();
        if reader
            .read_until(b'\n', &mut line)
            .with_context(|| format!("failed reading input after line {line_no}"))?
            == 0
        {
            break;
        }
        line_no += 1;

        if crate::record::strip_line_terminator(&line).is_empty() {
            debug!("skipping blank line {line_no}");
            continue;
        }

        let decision = deduper
            .process_line(&line)
            .with_context(|| format!("input line {line_no}"))?;
        if decision.is_emitted() {
            writer.write_all(&line)?;
        }
    }

    Ok(())
}

/// Run a full deduplication pass for the given command-line arguments
pub fn run_dedup(args: &Args) -> Result<Counts> {
    let umis = UmiSet::from_path(&args.umi)?;
    debug!("loaded {} known UMIs from {}", umis.len(), args.umi.display());

    let reader = open_input(&args.input)?;
    let mut output = Output::create(&args.output)?;

    let mut deduper = Deduper::new(umis);
    dedup_stream(reader, &mut output, &mut deduper)?;
    output
        .finish()
        .with_context(|| format!("failed to finish {}", args.output.display()))?;

    Ok(deduper.finish())
}
