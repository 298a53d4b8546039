//! umidedup - UMI-aware PCR duplicate removal for single-end SAM files
//!
//! Reads a chromosome-sorted SAM file and keeps only the first read for
//! each (UMI, strand, true start position) on each chromosome. Reads whose
//! UMI is not in the whitelist are dropped. Header lines pass through.
//!
//! # Example
//!
//! ```ignore
//! use umidedup::{Args, run_dedup};
//!
//! let args = Args {
//!     input: "sorted.sam".into(),
//!     umi: "STL96.txt".into(),
//!     output: "deduped.sam".into(),
//!     verbose: false,
//! };
//!
//! let counts = run_dedup(&args)?;
//! println!("{} duplicates removed", counts.duplicates);
//! ```

pub mod algorithm;
pub mod args;
pub mod cigar;
pub mod dedup;
pub mod driver;
pub mod errors;
pub mod io;
pub mod record;
pub mod umi;
pub mod utils;

// Re-export commonly used items
pub use algorithm::{Strand, true_start};
pub use args::Args;
pub use cigar::Cigar;
pub use dedup::{Counts, Decision, Deduper, Window};
pub use driver::{dedup_stream, run_dedup};
pub use errors::DedupError;
pub use umi::UmiSet;
