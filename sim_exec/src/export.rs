//! # Result exporter
//!
//! Writes recorded runs into a durable table store. The store is a
//! directory in which every exported run is one CSV table, named
//! `{controller}_{trajectory}_{timestamp}`, with one row per sample and the
//! columns `t, x, x_ref, y, y_ref, theta, theta_ref, v_c, w_c`. The time
//! column is the table's key.
//!
//! A table's header row is written when it is created, so the export of an
//! empty run is still a table with the full schema.
//!
//! Tables are created with create-new semantics, so an export never
//! overwrites a previous run, even when two exports happen within the same
//! second. Each row is flushed as it is written, a failed export may leave
//! the rows written before the failure in the store.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::Utc;
use log::debug;
use std::path::{Path, PathBuf};

// Internal
use crate::recorder::{Dataset, RecorderError, RunLabels, Sample, Series};
use util::archive::{self, ArchiveError, Archiver};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Timestamp format used in table names.
///
/// Names are stamped in UTC, not local time.
const TABLE_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Extension of table files in the store.
const TABLE_EXTENSION: &str = "csv";

/// Maximum number of suffixed names tried for one export.
const MAX_NAME_ATTEMPTS: usize = 1000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Exports datasets into a table store directory.
#[derive(Debug, Clone)]
pub struct ResultExporter {
    store_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The underlying storage failed.
    #[error("Export storage error: {0}")]
    ExportIOError(#[from] ArchiveError),

    /// Two samples share a time, which would violate the table key.
    #[error("Dataset contains a non-increasing time {t_s} s at sample {index}")]
    DuplicateKey {
        index: usize,
        t_s: f64
    },

    #[error("Could not find a free table name for {0} after {1} attempts")]
    NoFreeTableName(String, usize),

    /// The table's name doesn't follow `{controller}_{trajectory}_{timestamp}`.
    #[error("Table name {0:?} doesn't identify a controller and trajectory")]
    UnrecognisedTableName(String),

    /// The rows of a stored table don't form a valid dataset.
    #[error("Table {table_id} holds invalid data: {source}")]
    InvalidTable {
        table_id: String,
        source: RecorderError
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ResultExporter {
    /// Create an exporter writing into the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(store_dir: P) -> Result<Self, ExportError> {
        let store_dir = store_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&store_dir)
            .map_err(|e| ArchiveError::CannotAccessDir(store_dir.clone(), e))?;

        Ok(Self { store_dir })
    }

    /// The directory tables are written to.
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Export a dataset as a new table, returning the table's identifier.
    pub fn export(&self, dataset: &Dataset) -> Result<String, ExportError> {
        check_keys(dataset.samples())?;

        let base = table_base_name(
            &dataset.labels().controller,
            &dataset.labels().trajectory
        );

        let (table_id, mut archiver) = self.create_table(&base)?;

        for sample in dataset.samples() {
            archiver.serialise(sample)?;
        }

        debug!(
            "Exported {} samples to table {} ({:?})",
            archiver.num_records(),
            table_id,
            archiver.path()
        );

        Ok(table_id)
    }

    /// Load a previously exported table back into a dataset.
    ///
    /// The labels are recovered from the table's name, so they come back in
    /// their sanitised form. Rows are checked like any recorded sample.
    pub fn read_table(&self, table_id: &str) -> Result<Dataset, ExportError> {
        let samples: Vec<Sample> = archive::read_records(self.table_path(table_id))?;

        let labels = labels_from_table_id(table_id)
            .ok_or_else(|| ExportError::UnrecognisedTableName(table_id.to_string()))?;

        Dataset::from_samples(labels, samples)
            .map_err(|source| ExportError::InvalidTable {
                table_id: table_id.to_string(),
                source
            })
    }

    /// Identifiers of all tables in the store, sorted.
    pub fn list_tables(&self) -> Result<Vec<String>, ExportError> {
        Ok(archive::list_archives(&self.store_dir)?)
    }

    /// Path of the file backing a table.
    pub fn table_path(&self, table_id: &str) -> PathBuf {
        self.store_dir.join(format!("{}.{}", table_id, TABLE_EXTENSION))
    }

    /// Create the table file, suffixing the name if it is already taken.
    fn create_table(&self, base: &str) -> Result<(String, Archiver), ExportError> {
        let header: Vec<&str> = Series::ALL.iter().map(|s| s.name()).collect();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let table_id = match attempt {
                0 => base.to_string(),
                n => format!("{}_{}", base, n),
            };

            match Archiver::create_new(self.table_path(&table_id), &header) {
                Ok(a) => return Ok((table_id, a)),
                Err(e) if e.is_already_exists() => {
                    debug!("Table {} already exists, trying the next name", table_id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ExportError::NoFreeTableName(base.to_string(), MAX_NAME_ATTEMPTS))
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the timestamped base name of a table.
fn table_base_name(controller: &str, trajectory: &str) -> String {
    format!(
        "{}_{}_{}",
        sanitise(controller),
        sanitise(trajectory),
        Utc::now().format(TABLE_TIMESTAMP_FORMAT)
    )
}

/// Replace anything that isn't safe in a table name with an underscore.
fn sanitise(label: &str) -> String {
    let s: String = label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c.to_ascii_lowercase() } else { '_' })
        .collect();

    if s.is_empty() {
        String::from("unknown")
    }
    else {
        s
    }
}

/// Recover the run labels from a table identifier.
///
/// The identifier ends with the six timestamp fields, optionally followed by
/// a collision suffix. Trajectory names never contain an underscore, so
/// everything before the trajectory is the controller.
fn labels_from_table_id(table_id: &str) -> Option<RunLabels> {
    let parts: Vec<&str> = table_id.split('_').collect();
    let is_num = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());

    let end = match parts.len() {
        n if n >= 9 && parts[n - 7..].iter().all(is_num) => n - 7,
        n if n >= 8 && parts[n - 6..].iter().all(is_num) => n - 6,
        _ => return None
    };

    let (trajectory, controller) = parts[..end].split_last()?;

    if controller.is_empty() {
        return None;
    }

    Some(RunLabels::new(controller.join("_"), *trajectory))
}

fn check_keys(samples: &[Sample]) -> Result<(), ExportError> {
    for (i, pair) in samples.windows(2).enumerate() {
        if pair[1].t <= pair[0].t {
            return Err(ExportError::DuplicateKey {
                index: i + 1,
                t_s: pair[1].t
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::recorder::{RunLabels, SampleRecorder};
    use tempfile::TempDir;

    fn dataset(n: usize) -> Dataset {
        let mut rec = SampleRecorder::new(RunLabels::new("pid", "lemniscate"));
        for i in 0..n {
            let t = i as f64 * 0.1;
            rec.add_sample(t, &Pose::new(t, -t, 0.5), &Pose::new(t + 0.01, -t, 0.25), 1.0, 0.1)
                .unwrap();
        }
        (*rec.snapshot()).clone()
    }

    #[test]
    fn test_table_names() {
        assert_eq!(sanitise(" PID "), "pid");
        assert_eq!(sanitise("euler/v2"), "euler_v2");
        assert_eq!(sanitise(""), "unknown");

        let name = table_base_name("euler", "circular");
        assert!(name.starts_with("euler_circular_"));
        // %Y_%m_%d_%H_%M_%S
        let stamp = &name["euler_circular_".len()..];
        assert_eq!(stamp.len(), 19);
        assert_eq!(stamp.split('_').count(), 6);
    }

    #[test]
    fn test_export_round_trip() {
        let dir = TempDir::new().unwrap();
        let exporter = ResultExporter::new(dir.path().join("tables")).unwrap();
        let ds = dataset(25);

        let id = exporter.export(&ds).unwrap();
        assert!(id.starts_with("pid_lemniscate_"));
        assert_eq!(exporter.list_tables().unwrap(), vec![id.clone()]);

        let table = exporter.read_table(&id).unwrap();
        assert_eq!(table, ds);

        let text = std::fs::read_to_string(exporter.table_path(&id)).unwrap();
        assert_eq!(text.lines().next(), Some("t,x,x_ref,y,y_ref,theta,theta_ref,v_c,w_c"));
    }

    #[test]
    fn test_exports_never_collide() {
        let dir = TempDir::new().unwrap();
        let exporter = ResultExporter::new(dir.path()).unwrap();
        let ds = dataset(3);

        let first = exporter.export(&ds).unwrap();
        let second = exporter.export(&ds).unwrap();
        let third = exporter.export(&ds).unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(exporter.list_tables().unwrap().len(), 3);
        assert_eq!(exporter.read_table(&first).unwrap().len(), 3);
        assert_eq!(exporter.read_table(&third).unwrap(), ds);
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let s = dataset(2).samples()[0];

        assert!(matches!(
            check_keys(&[s, s]),
            Err(ExportError::DuplicateKey { index: 1, .. })
        ));
    }

    #[test]
    fn test_missing_table() {
        let dir = TempDir::new().unwrap();
        let exporter = ResultExporter::new(dir.path()).unwrap();

        assert!(matches!(
            exporter.read_table("nope"),
            Err(ExportError::ExportIOError(ArchiveError::CannotOpenFile(..)))
        ));
    }

    #[test]
    fn test_empty_run_keeps_schema() {
        let dir = TempDir::new().unwrap();
        let exporter = ResultExporter::new(dir.path()).unwrap();
        let empty = SampleRecorder::new(RunLabels::new("euler", "circular")).snapshot();

        let id = exporter.export(&empty).unwrap();

        let text = std::fs::read_to_string(exporter.table_path(&id)).unwrap();
        assert_eq!(text.lines().next(), Some("t,x,x_ref,y,y_ref,theta,theta_ref,v_c,w_c"));

        let table = exporter.read_table(&id).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.labels(), &RunLabels::new("euler", "circular"));
    }

    #[test]
    fn test_export_into_removed_store() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("tables");
        let exporter = ResultExporter::new(&store).unwrap();

        std::fs::remove_dir_all(&store).unwrap();

        assert!(matches!(
            exporter.export(&dataset(3)),
            Err(ExportError::ExportIOError(ArchiveError::CannotCreateFile(..)))
        ));
    }

    #[test]
    fn test_labels_from_table_id() {
        assert_eq!(
            labels_from_table_id("pid_lemniscate_2024_03_01_12_30_05"),
            Some(RunLabels::new("pid", "lemniscate"))
        );
        assert_eq!(
            labels_from_table_id("euler_v2_squared_2024_03_01_12_30_05_3"),
            Some(RunLabels::new("euler_v2", "squared"))
        );
        assert_eq!(labels_from_table_id("circular_2024_03_01_12_30_05"), None);
        assert_eq!(labels_from_table_id("nope"), None);
    }

    #[test]
    fn test_corrupted_table_is_rejected() {
        let dir = TempDir::new().unwrap();
        let exporter = ResultExporter::new(dir.path()).unwrap();
        let id = exporter.export(&dataset(3)).unwrap();

        // Swap the last two rows so time goes backwards
        let text = std::fs::read_to_string(exporter.table_path(&id)).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.swap(2, 3);
        std::fs::write(exporter.table_path(&id), lines.join("\n")).unwrap();

        assert!(matches!(
            exporter.read_table(&id),
            Err(ExportError::InvalidTable {
                source: RecorderError::NonMonotonicTime { .. },
                ..
            })
        ));

        let renamed = dir.path().join("unlabelled.csv");
        std::fs::copy(exporter.table_path(&id), &renamed).unwrap();
        assert!(matches!(
            exporter.read_table("unlabelled"),
            Err(ExportError::UnrecognisedTableName(_))
        ));
    }
}
