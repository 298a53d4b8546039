// Command-line argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "umidedup",
    about = "Remove PCR duplicates from single-end, chromosome-sorted SAM using known UMIs",
    after_help = "Only the first copy of each duplicate is kept. Input must be SAM (optionally BGZF-compressed) sorted by chromosome."
)]
pub struct Args {
    /// Input SAM file sorted by chromosome
    #[arg(short = 'f', long = "file")]
    pub input: PathBuf,
    /// Text file with one known UMI per line
    #[arg(short, long)]
    pub umi: PathBuf,
    /// Deduplicated output SAM file
    #[arg(short = 'o', long = "outfile")]
    pub output: PathBuf,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Default log filter for the given verbosity
#[inline]
pub fn log_level(args: &Args) -> &'static str {
    if args.verbose { "debug" } else { "info" }
}
