// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::sukta::SuktaRecord;
use crate::utils::error::StorageError;

/// Column order of the output table.
pub const TABLE_HEADER: [&str; 3] = ["mandala", "sukta", "name"];

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes all records to `<base_dir>/<file_name>` as CSV.
    /// The header row is always present, even for an empty run.
    pub fn save_table(&self, records: &[SuktaRecord], file_name: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false) // header written by hand so it survives zero rows
            .terminator(csv::Terminator::CRLF)
            .from_path(&file_path)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        writer
            .write_record(TABLE_HEADER)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        for record in records {
            writer
                .serialize(record)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        }

        writer.flush()?;

        tracing::debug!("Saved {} rows to {}", records.len(), file_path.display());

        Ok(file_path)
    }
}
