//! UMI whitelist
//!
//! The whitelist is a plain text file with one UMI per line. Repeated
//! lines collapse into a single entry.

use crate::errors::{DedupError, Result};
use bstr::ByteSlice;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Set of known UMI sequences
#[derive(Debug, Default, Clone)]
pub struct UmiSet {
    umis: HashSet<Vec<u8>>,
}

impl UmiSet {
    /// Load a whitelist from `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_err = |source| DedupError::Config {
            role: "UMI whitelist",
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(config_err)?;
        Self::from_reader(BufReader::new(file)).map_err(config_err)
    }

    /// Load a whitelist from any buffered reader
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut umis = HashSet::new();
        let mut line = Vec::new();
        while reader.read_until(b'\n', &mut line)? > 0 {
            let umi = line.trim();
            if !umi.is_empty() {
                umis.insert(umi.to_vec());
            }
            line.clear();
        }
        Ok(Self { umis })
    }

    #[inline]
    pub fn contains(&self, umi: &[u8]) -> bool {
        self.umis.contains(umi)
    }

    pub fn len(&self) -> usize {
        self.umis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.umis.is_empty()
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for UmiSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            umis: iter.into_iter().map(|u| u.as_ref().to_vec()).collect(),
        }
    }
}

/// Extract the UMI from a read name: everything after the last ':'
///
/// A name without ':' is returned whole.
#[inline]
pub fn extract_umi(read_name: &[u8]) -> &[u8] {
    match read_name.rsplit_once_str(":") {
        Some((_, umi)) => umi,
        None => read_name,
    }
}
