//! Persistence sinks for histogram sets.
//!
//! [`Persist`] is the hand-over point at the end of a run: the
//! coordinator passes the merged set and a file stem, the sink decides
//! the on-disk layout.
//!
//! The CSV layout follows the analysis-tool convention, one block per
//! histogram:
//!
//! ```text
//! #class tools::histo::h1d
//! #title Photon Energy Incident on the Detector
//! #dimension 1
//! #axis fixed 1000 0 7
//! #annotation name EDet
//! #bin_number 1002
//! entries,Sw,Sw2,Sxw0,Sx2w0
//! 0,0,0,0,0          <- underflow
//! ...
//! 0,0,0,0,0          <- overflow
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::PersistError;
use crate::h1::H1;
use crate::set::HistogramSet;

/// Destination for a finished histogram set.
pub trait Persist {
    /// Write `set` under the given file stem.
    ///
    /// # Errors
    ///
    /// [`PersistError`] if the stem is invalid or writing fails.
    fn persist(&mut self, set: &HistogramSet, file_stem: &str) -> Result<(), PersistError>;
}

impl<P: Persist + ?Sized> Persist for &mut P {
    fn persist(&mut self, set: &HistogramSet, file_stem: &str) -> Result<(), PersistError> {
        (**self).persist(set, file_stem)
    }
}

impl<P: Persist + ?Sized> Persist for Box<P> {
    fn persist(&mut self, set: &HistogramSet, file_stem: &str) -> Result<(), PersistError> {
        (**self).persist(set, file_stem)
    }
}

fn check_stem(stem: &str) -> Result<(), PersistError> {
    if stem.is_empty() || stem.contains(['/', '\\']) {
        return Err(PersistError::InvalidStem {
            stem: stem.to_string(),
        });
    }
    Ok(())
}

/// Write one histogram block.
pub fn write_h1_csv<W: Write>(out: &mut W, h: &H1) -> Result<(), PersistError> {
    let spec = h.spec();
    writeln!(out, "#class tools::histo::h1d")?;
    writeln!(out, "#title {}", spec.title)?;
    writeln!(out, "#dimension 1")?;
    writeln!(out, "#axis fixed {} {} {}", spec.bins, spec.min, spec.max)?;
    writeln!(out, "#annotation name {}", spec.name)?;
    writeln!(out, "#bin_number {}", h.slots().len())?;
    writeln!(out, "entries,Sw,Sw2,Sxw0,Sx2w0")?;
    for bin in h.slots() {
        writeln!(
            out,
            "{},{},{},{},{}",
            bin.entries, bin.sw, bin.sw2, bin.sxw, bin.sx2w
        )?;
    }
    Ok(())
}

/// Writes every histogram of a set, back to back, to one `Write` sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code a buffered file.
pub struct CsvWriter<W: Write> {
    writer: W,
    sets_written: u64,
}

impl<W: Write> CsvWriter<W> {
    /// Wrap a sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sets_written: 0,
        }
    }

    /// Number of sets persisted so far.
    pub fn sets_written(&self) -> u64 {
        self.sets_written
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Persist for CsvWriter<W> {
    fn persist(&mut self, set: &HistogramSet, file_stem: &str) -> Result<(), PersistError> {
        check_stem(file_stem)?;
        writeln!(self.writer, "#file {file_stem}")?;
        for h in set.iter() {
            write_h1_csv(&mut self.writer, h)?;
        }
        self.writer.flush()?;
        self.sets_written += 1;
        Ok(())
    }
}

/// Writes one `<stem>_h1_<name>.csv` file per histogram into a directory.
#[derive(Clone, Debug)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    /// Target directory; created on first persist if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The path a histogram would be written to.
    pub fn path_for(&self, file_stem: &str, histogram: &str) -> PathBuf {
        self.dir.join(format!("{file_stem}_h1_{histogram}.csv"))
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Persist for CsvDirectory {
    fn persist(&mut self, set: &HistogramSet, file_stem: &str) -> Result<(), PersistError> {
        check_stem(file_stem)?;
        fs::create_dir_all(&self.dir)?;
        for h in set.iter() {
            let path = self.path_for(file_stem, h.name());
            let mut out = BufWriter::new(File::create(&path)?);
            write_h1_csv(&mut out, h)?;
            out.flush()?;
            info!("wrote histogram '{}' to {}", h.name(), path.display());
        }
        Ok(())
    }
}
