//! Borrowed view over one SAM alignment line
//!
//! Only the columns needed for deduplication are parsed. The line itself
//! is never modified, so an emitted record is written back byte-for-byte.

use crate::errors::{DedupError, Result};
use crate::umi::extract_umi;
use bstr::ByteSlice;

/// Prefix of SAM header lines
pub const HEADER_PREFIX: u8 = b'@';

const QNAME: usize = 0;
const FLAG: usize = 1;
const RNAME: usize = 2;
const POS: usize = 3;
const CIGAR: usize = 5;
const MIN_COLUMNS: usize = CIGAR + 1;

#[inline]
pub fn is_header(line: &[u8]) -> bool {
    line.first() == Some(&HEADER_PREFIX)
}

/// Strip a trailing `\n` or `\r\n`
#[inline]
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    line.trim_end_with(|c| c == '\n' || c == '\r')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord<'a> {
    pub umi: &'a [u8],
    pub flag: u32,
    pub reference: &'a [u8],
    pub position: i64,
    pub cigar: &'a str,
}

impl<'a> AlignmentRecord<'a> {
    /// Parse the deduplication columns from an alignment line.
    ///
    /// A trailing line terminator is ignored.
    pub fn parse(line: &'a [u8]) -> Result<Self> {
        let line = strip_line_terminator(line);
        let mut fields: [&[u8]; MIN_COLUMNS] = [b"".as_slice(); MIN_COLUMNS];
        let mut n = 0;
        for field in line.split_str("\t").take(MIN_COLUMNS) {
            fields[n] = field;
            n += 1;
        }
        if n < MIN_COLUMNS {
            return Err(DedupError::record(format!(
                "expected at least {MIN_COLUMNS} tab-separated columns, found {n}"
            )));
        }

        let flag = parse_int::<u32>(fields[FLAG], "flag")?;
        // 1-based leftmost position, bounded as in SAM
        let position = parse_int::<i32>(fields[POS], "position")?;
        if position < 1 {
            return Err(DedupError::record(format!(
                "position {position} is not a mapped 1-based coordinate"
            )));
        }
        let cigar = fields[CIGAR].to_str().map_err(|_| {
            DedupError::record(format!("CIGAR {:?} is not valid UTF-8", fields[CIGAR].as_bstr()))
        })?;

        Ok(Self {
            umi: extract_umi(fields[QNAME]),
            flag,
            reference: fields[RNAME],
            position: i64::from(position),
            cigar,
        })
    }
}

fn parse_int<T: std::str::FromStr>(field: &[u8], name: &str) -> Result<T> {
    field
        .to_str()
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DedupError::record(format!("invalid {name} {:?}", field.as_bstr())))
}
