//! Chromosome-scoped duplicate detection
//!
//! A read is a duplicate when a read with the same UMI, strand and true
//! start position has already been kept on the current chromosome. Keys
//! are only remembered for the chromosome being processed: when the
//! reference label changes the whole [`Window`] is dropped and a fresh one
//! opened. Input must therefore be grouped by chromosome. A label that
//! reappears after its window was closed starts over with no memory of
//! earlier reads.

use crate::algorithm::{Strand, true_start};
use crate::errors::Result;
use crate::record::{AlignmentRecord, is_header};
use crate::umi::UmiSet;
use bstr::ByteSlice;
use log::info;
use std::collections::{HashMap, HashSet};

/// True start positions seen per UMI on one strand
type StrandKeys = HashMap<Vec<u8>, HashSet<i64>>;

/// Outcome for one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Header line, always emitted
    Header,
    /// First read seen for its key, emitted
    Unique,
    /// Key already seen in the current window, dropped
    Duplicate,
    /// UMI not in the whitelist, dropped
    UnknownUmi,
}

impl Decision {
    #[inline]
    pub fn is_emitted(self) -> bool {
        matches!(self, Self::Header | Self::Unique)
    }
}

/// Running totals for a deduplication pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub header_lines: u64,
    pub unique_reads: u64,
    pub unknown_umis: u64,
    pub duplicates: u64,
}

/// Duplicate keys seen on one chromosome, one set per strand
#[derive(Debug)]
pub struct Window {
    reference: Vec<u8>,
    forward: StrandKeys,
    reverse: StrandKeys,
    reads: u64,
}

impl Window {
    pub fn open(reference: &[u8]) -> Self {
        Self {
            reference: reference.to_vec(),
            forward: HashMap::new(),
            reverse: HashMap::new(),
            reads: 0,
        }
    }

    pub fn reference(&self) -> &[u8] {
        &self.reference
    }

    /// Reads kept in this window so far
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Number of (UMI, position) keys held across both strands
    #[cfg(test)]
    fn len(&self) -> usize {
        self.forward
            .values()
            .chain(self.reverse.values())
            .map(HashSet::len)
            .sum()
    }

    /// Record a key; returns `true` if it had not been seen on this strand
    pub fn insert(&mut self, strand: Strand, umi: &[u8], position: i64) -> bool {
        let keys = match strand {
            Strand::Forward => &mut self.forward,
            Strand::Reverse => &mut self.reverse,
        };
        // the UMI is only copied the first time it is seen in this window
        let inserted = match keys.get_mut(umi) {
            Some(positions) => positions.insert(position),
            None => {
                keys.insert(umi.to_vec(), HashSet::from([position]));
                true
            }
        };
        if inserted {
            self.reads += 1;
        }
        inserted
    }
}

/// Streaming duplicate filter
///
/// Feed lines in input order through [`Deduper::process_line`] and emit
/// those whose [`Decision::is_emitted`] is true.
#[derive(Debug)]
pub struct Deduper {
    umis: UmiSet,
    window: Option<Window>,
    counts: Counts,
}

impl Deduper {
    pub fn new(umis: UmiSet) -> Self {
        Self {
            umis,
            window: None,
            counts: Counts::default(),
        }
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Classify one raw input line (header or alignment)
    pub fn process_line(&mut self, line: &[u8]) -> Result<Decision> {
        if is_header(line) {
            self.counts.header_lines += 1;
            return Ok(Decision::Header);
        }
        let record = AlignmentRecord::parse(line)?;
        self.process(&record)
    }

    /// Classify one alignment record
    pub fn process(&mut self, record: &AlignmentRecord<'_>) -> Result<Decision> {
        if !self.umis.contains(record.umi) {
            self.counts.unknown_umis += 1;
            return Ok(Decision::UnknownUmi);
        }

        let strand = Strand::from_flag(record.flag);
        let position = true_start(strand, record.position, record.cigar)?;

        let window = self.window_for(record.reference);
        if window.insert(strand, record.umi, position) {
            self.counts.unique_reads += 1;
            Ok(Decision::Unique)
        } else {
            self.counts.duplicates += 1;
            Ok(Decision::Duplicate)
        }
    }

    /// Close the last window and return the final totals
    pub fn finish(mut self) -> Counts {
        if let Some(window) = self.window.take() {
            log_closed(&window);
        }
        self.counts
    }

    fn window_for(&mut self, reference: &[u8]) -> &mut Window {
        let same = matches!(&self.window, Some(w) if w.reference == reference);
        if !same {
            if let Some(closed) = self.window.replace(Window::open(reference)) {
                log_closed(&closed);
            }
        }
        self.window.get_or_insert_with(|| Window::open(reference))
    }
}

fn log_closed(window: &Window) {
    info!(
        "{}\t{} reads kept",
        window.reference.as_bstr(),
        window.reads
    );
}
