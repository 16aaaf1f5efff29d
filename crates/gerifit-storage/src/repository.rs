use gerifit_core::models::assessment::Assessment;
use gerifit_core::models::record::Record;
use uuid::Uuid;

use crate::error::StorageError;

/// Store of saved assessments.
///
/// Append-only: records are never edited in place. Implementations assign
/// the id and creation timestamp.
pub trait AssessmentRepository {
    /// All records, newest first.
    fn list(&self) -> Result<Vec<Record>, StorageError>;

    /// Save `assessment` as a new record and return it.
    fn append(&mut self, assessment: Assessment) -> Result<Record, StorageError>;

    /// Look up one record.
    fn get(&self, id: Uuid) -> Result<Record, StorageError> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StorageError::NotFound { id })
    }
}
