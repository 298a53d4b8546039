//! CIGAR string interpretation
//!
//! Parses the run-length operator string of a SAM record into ordered
//! `(length, operator)` pairs and answers the clipping and reference-span
//! queries needed to place a read's 5' end.

use crate::errors::{DedupError, Result};
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use std::fmt;
use std::str::FromStr;

/// Map a CIGAR operator symbol onto its kind
pub fn kind_from_symbol(symbol: u8) -> Option<Kind> {
    match symbol {
        b'M' => Some(Kind::Match),
        b'I' => Some(Kind::Insertion),
        b'D' => Some(Kind::Deletion),
        b'N' => Some(Kind::Skip),
        b'S' => Some(Kind::SoftClip),
        b'H' => Some(Kind::HardClip),
        b'P' => Some(Kind::Pad),
        b'=' => Some(Kind::SequenceMatch),
        b'X' => Some(Kind::SequenceMismatch),
        _ => None,
    }
}

pub fn kind_symbol(kind: Kind) -> char {
    match kind {
        Kind::Match => 'M',
        Kind::Insertion => 'I',
        Kind::Deletion => 'D',
        Kind::Skip => 'N',
        Kind::SoftClip => 'S',
        Kind::HardClip => 'H',
        Kind::Pad => 'P',
        Kind::SequenceMatch => '=',
        Kind::SequenceMismatch => 'X',
    }
}

/// Operators counted towards the reference span of a read.
///
/// Only `M`, `D` and `N` count here, unlike [`Kind::consumes_reference`],
/// which also counts `=` and `X`.
#[inline]
fn counts_towards_span(kind: Kind) -> bool {
    matches!(kind, Kind::Match | Kind::Deletion | Kind::Skip)
}

/// A parsed CIGAR string
///
/// The SAM placeholder `*` parses to an empty operation list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar(Vec<Op>);

impl Cigar {
    /// Parse a CIGAR string, consuming it completely.
    ///
    /// Each operation is a run of decimal digits (positive, no leading
    /// zero, at most `u32::MAX`) followed by exactly one operator symbol.
    /// Leftover or unknown characters fail with [`DedupError::MalformedCigar`].
    pub fn parse(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(Self::default());
        }
        if s.is_empty() {
            return Err(DedupError::cigar(s, "empty string"));
        }

        let bytes = s.as_bytes();
        let mut ops = Vec::with_capacity(bytes.len() / 2);
        let mut i = 0;

        while i < bytes.len() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == start {
                return Err(DedupError::cigar(
                    s,
                    format!("expected a length at offset {start}"),
                ));
            }
            if bytes[start] == b'0' {
                return Err(DedupError::cigar(
                    s,
                    format!("length at offset {start} is zero or zero-padded"),
                ));
            }
            let len: u32 = s[start..i]
                .parse()
                .map_err(|_| DedupError::cigar(s, format!("length at offset {start} overflows")))?;

            let Some(&symbol) = bytes.get(i) else {
                return Err(DedupError::cigar(s, "trailing length without operator"));
            };
            let kind = kind_from_symbol(symbol).ok_or_else(|| {
                DedupError::cigar(s, format!("unknown operator '{}'", symbol as char))
            })?;
            ops.push(Op::new(kind, len as usize));
            i += 1;
        }

        Ok(Self(ops))
    }

    pub fn ops(&self) -> &[Op] {
        &self.0
    }

    /// Length of a leading soft clip, or 0
    pub fn left_soft_clip(&self) -> u64 {
        match self.0.first() {
            Some(op) if op.kind() == Kind::SoftClip => op.len() as u64,
            _ => 0,
        }
    }

    /// Length of a trailing soft clip, or 0
    pub fn right_soft_clip(&self) -> u64 {
        match self.0.last() {
            Some(op) if op.kind() == Kind::SoftClip => op.len() as u64,
            _ => 0,
        }
    }

    /// Sum of `M`, `D` and `N` lengths.
    pub fn reference_span(&self) -> u64 {
        self.0
            .iter()
            .filter(|op| counts_towards_span(op.kind()))
            .map(|op| op.len() as u64)
            .sum()
    }
}

impl FromStr for Cigar {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("*");
        }
        for op in &self.0 {
            write!(f, "{}{}", op.len(), kind_symbol(op.kind()))?;
        }
        Ok(())
    }
}
