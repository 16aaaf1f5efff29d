use std::path::{Path, PathBuf};

use gerifit_core::models::assessment::Assessment;
use gerifit_core::models::record::Record;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::repository::AssessmentRepository;

/// Records kept as a single JSON array on disk, newest first.
///
/// The whole file is loaded on open and rewritten on every append. Writes
/// go to a sibling temp file that is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    records: Vec<Record>,
}

impl JsonFileRepository {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| StorageError::Read {
                path: path.clone(),
                source,
            })?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), count = records.len(), "record store opened");

        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir).map_err(write_err)?;
            }
            _ => {}
        }

        let json = serde_json::to_string_pretty(&self.records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes()).map_err(write_err)?;

        // Patient data: owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl AssessmentRepository for JsonFileRepository {
    fn list(&self) -> Result<Vec<Record>, StorageError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, assessment: Assessment) -> Result<Record, StorageError> {
        let record = Record::new(assessment);
        self.records.insert(0, record.clone());
        if let Err(e) = self.persist() {
            self.records.remove(0);
            return Err(e);
        }

        info!(
            id = %record.id,
            path = %self.path.display(),
            count = self.records.len(),
            "record saved"
        );

        Ok(record)
    }
}
