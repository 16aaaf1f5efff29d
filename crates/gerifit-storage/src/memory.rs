use gerifit_core::models::assessment::Assessment;
use gerifit_core::models::record::Record;

use crate::error::StorageError;
use crate::repository::AssessmentRepository;

/// Process-local store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Vec<Record>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<Record>, StorageError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, assessment: Assessment) -> Result<Record, StorageError> {
        let record = Record::new(assessment);
        self.records.insert(0, record.clone());
        Ok(record)
    }
}
