//! SAM text I/O
//!
//! Input and output are plain SAM text. A path ending in `.gz` or `.bgz`
//! is read or written through BGZF compression instead.

use crate::errors::{DedupError, Result};
use noodles::bgzf::io::Reader as BgzfReader;
use noodles::bgzf::io::Writer as BgzfWriter;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 1 << 18;

/// Whether `path` names a BGZF-compressed file
#[inline]
pub fn is_bgzf_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("gz" | "bgz")
    )
}

/// Open an input SAM file for line-by-line reading
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|source| DedupError::Config {
        role: "input SAM",
        path: path.to_path_buf(),
        source,
    })?;
    if is_bgzf_path(path) {
        Ok(Box::new(BgzfReader::new(file)))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}

/// Output SAM destination
pub enum Output {
    Plain(BufWriter<File>),
    Bgzf(BgzfWriter<File>),
}

impl Output {
    /// Create (truncating) the output file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| DedupError::Config {
            role: "output SAM",
            path: path.to_path_buf(),
            source,
        })?;
        if is_bgzf_path(path) {
            Ok(Self::Bgzf(BgzfWriter::new(file)))
        } else {
            Ok(Self::Plain(BufWriter::with_capacity(BUFFER_SIZE, file)))
        }
    }

    /// Flush buffered data; a BGZF stream also gets its EOF block.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut w) => w.flush(),
            Self::Bgzf(mut w) => {
                w.finish()?;
                Ok(())
            }
        }
    }
}

impl Write for Output {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Bgzf(w) => w.write(buf),
        }
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.write_all(buf),
            Self::Bgzf(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Bgzf(w) => w.flush(),
        }
    }
}
