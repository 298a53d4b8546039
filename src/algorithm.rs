//! Strand resolution and 5' position calculation
//!
//! Reads are deduplicated on the coordinate of their biological start,
//! which depends on the strand and on clipping recorded in the CIGAR.

use crate::cigar::Cigar;
use crate::errors::{DedupError, Result};

/// The SAM flag bit marking a reverse-complemented read
const REVERSE_FLAG: u32 = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Resolve the strand from a SAM bitwise flag
    #[inline]
    pub fn from_flag(flag: u32) -> Self {
        if flag & REVERSE_FLAG != 0 {
            Self::Reverse
        } else {
            Self::Forward
        }
    }
}

/// Calculate the true start position of a read from an already parsed CIGAR
///
/// For forward reads, this is the reported position minus left soft-clipped bases.
/// For reverse reads, this is `pos - 1 + right soft clip + reference span`,
/// i.e. the coordinate just past the right edge of the alignment.
///
/// Returns `None` if the result does not fit in an `i64`.
pub fn true_start_from_cigar(strand: Strand, pos: i64, cigar: &Cigar) -> Option<i64> {
    match strand {
        Strand::Forward => pos.checked_sub(i64::try_from(cigar.left_soft_clip()).ok()?),
        Strand::Reverse => {
            let clip = i64::try_from(cigar.right_soft_clip()).ok()?;
            let span = i64::try_from(cigar.reference_span()).ok()?;
            pos.checked_sub(1)?.checked_add(clip)?.checked_add(span)
        }
    }
}

/// Parse `cigar` and calculate the true start position of a read
///
/// Fails with [`DedupError::MalformedCigar`] if `cigar` is not well formed,
/// and with [`DedupError::MalformedRecord`] if the position overflows.
pub fn true_start(strand: Strand, pos: i64, cigar: &str) -> Result<i64> {
    let parsed = Cigar::parse(cigar)?;
    true_start_from_cigar(strand, pos, &parsed).ok_or_else(|| {
        DedupError::record(format!("true start of position {pos} with CIGAR {cigar} overflows"))
    })
}
