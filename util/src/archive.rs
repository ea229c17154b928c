//! CSV archiving functionality
//!
//! An `Archiver` owns a single CSV file. The header row is written when the
//! file is created, so an archive with no records still carries its columns.
//! Every serialised record then becomes one row.
//! Each row is flushed as soon as it is written so that a crash only ever
//! loses the row being written.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::path::{Path, PathBuf};
use std::fs::{File, OpenOptions};
use csv::{ReaderBuilder, WriterBuilder};
pub use csv::Writer;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
pub struct Archiver {
    path: PathBuf,
    writer: Writer<File>,
    num_records: usize
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while reading or writing archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot create the archive file {0:?}: {1}")]
    CannotCreateFile(PathBuf, std::io::Error),

    #[error("Cannot open the archive file {0:?}: {1}")]
    CannotOpenFile(PathBuf, std::io::Error),

    #[error("Cannot access the archive directory {0:?}: {1}")]
    CannotAccessDir(PathBuf, std::io::Error),

    #[error("CSV error in archive {0:?}: {1}")]
    CsvError(PathBuf, csv::Error),

    #[error("Cannot flush the archive file {0:?}: {1}")]
    FlushError(PathBuf, std::io::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archive at the given path and write its header row.
    ///
    /// The file must not already exist, an existing archive is never
    /// truncated or appended to. `header` must list the fields of the records
    /// later passed to `serialise`, in declaration order.
    pub fn create_new<P: AsRef<Path>>(
        path: P, header: &[&str]
    ) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| ArchiveError::CannotCreateFile(path.clone(), e))?;

        // The header is written here rather than derived from the first record
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(header)
            .map_err(|e| ArchiveError::CsvError(path.clone(), e))?;
        writer.flush()
            .map_err(|e| ArchiveError::FlushError(path.clone(), e))?;

        Ok(Self {
            path,
            writer,
            num_records: 0
        })
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(
        &mut self, record: T
    ) -> Result<(), ArchiveError> {
        self.writer.serialize(record)
            .map_err(|e| ArchiveError::CsvError(self.path.clone(), e))?;
        self.writer.flush()
            .map_err(|e| ArchiveError::FlushError(self.path.clone(), e))?;

        self.num_records += 1;

        Ok(())
    }

    /// Path of the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records written so far.
    pub fn num_records(&self) -> usize {
        self.num_records
    }
}

impl ArchiveError {
    /// True if the error was caused by the archive file already existing.
    pub fn is_already_exists(&self) -> bool {
        match self {
            ArchiveError::CannotCreateFile(_, e) =>
                e.kind() == std::io::ErrorKind::AlreadyExists,
            _ => false
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Read every record from an archive file.
pub fn read_records<T, P>(path: P) -> Result<Vec<T>, ArchiveError>
where
    T: DeserializeOwned,
    P: AsRef<Path>
{
    let path = path.as_ref().to_path_buf();

    let file = File::open(&path)
        .map_err(|e| ArchiveError::CannotOpenFile(path.clone(), e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|e| ArchiveError::CsvError(path, e))
}

/// List the stems of all archive (`.csv`) files within a directory, sorted.
pub fn list_archives<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, ArchiveError> {
    let dir = dir.as_ref();

    let entries = std::fs::read_dir(dir)
        .map_err(|e| ArchiveError::CannotAccessDir(dir.to_path_buf(), e))?;

    let mut stems = Vec::new();

    for entry in entries {
        let path = entry
            .map_err(|e| ArchiveError::CannotAccessDir(dir.to_path_buf(), e))?
            .path();

        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }

    stems.sort();

    Ok(stems)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        time_s: f64,
        value: f64
    }

    const HEADER: [&str; 2] = ["time_s", "value"];

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");

        let mut arch = Archiver::create_new(&path, &HEADER).unwrap();
        arch.serialise(Row { time_s: 0.0, value: 1.5 }).unwrap();
        arch.serialise(Row { time_s: 0.1, value: -2.0 }).unwrap();
        assert_eq!(arch.num_records(), 2);

        let rows: Vec<Row> = read_records(&path).unwrap();
        assert_eq!(rows, vec![
            Row { time_s: 0.0, value: 1.5 },
            Row { time_s: 0.1, value: -2.0 }
        ]);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("time_s,value\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_empty_archive_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        let arch = Archiver::create_new(&path, &HEADER).unwrap();
        assert_eq!(arch.num_records(), 0);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "time_s,value\n");

        let rows: Vec<Row> = read_records(&path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.csv");

        let _arch = Archiver::create_new(&path, &HEADER).unwrap();
        let err = Archiver::create_new(&path, &HEADER).err().unwrap();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_list_archives() {
        let dir = TempDir::new().unwrap();
        Archiver::create_new(dir.path().join("b.csv"), &HEADER).unwrap();
        Archiver::create_new(dir.path().join("a.csv"), &HEADER).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(list_archives(dir.path()).unwrap(), vec!["a", "b"]);
    }
}
