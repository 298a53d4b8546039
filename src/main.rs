use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::time::Instant;

use umidedup::args::{Args, log_level};
use umidedup::driver::run_dedup;
use umidedup::utils::{format_duration_verbose, percent};

#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level(&args))).init();

    let total_start = Instant::now();
    info!(
        "deduplicating {} with UMIs from {}",
        args.input.display(),
        args.umi.display()
    );

    let counts = run_dedup(&args)?;

    let reads = counts.unique_reads + counts.duplicates + counts.unknown_umis;
    info!("Header lines = {}", counts.header_lines);
    info!("Unique reads = {}", counts.unique_reads);
    info!(
        "Number of unknown UMIs = {} ({:.2}%)",
        counts.unknown_umis,
        percent(counts.unknown_umis, reads)
    );
    info!(
        "Number of duplicates = {} ({:.2}%)",
        counts.duplicates,
        percent(counts.duplicates, reads)
    );

    info!(
        "wrote {} in {}",
        args.output.display(),
        format_duration_verbose(total_start.elapsed())
    );

    Ok(())
}
