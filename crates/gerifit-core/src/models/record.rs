use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

use super::assessment::Assessment;

/// A saved assessment. `id` and `created_at` are assigned by the record
/// store when the assessment is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Record {
    pub id: Uuid,
    pub created_at: jiff::Timestamp,
    pub assessment: Assessment,
}

impl Record {
    pub fn new(assessment: Assessment) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: jiff::Timestamp::now(),
            assessment,
        }
    }
}

/// Parse a record id as typed on the command line.
pub fn parse_record_id(raw: &str) -> Result<Uuid, CoreError> {
    Ok(Uuid::parse_str(raw.trim())?)
}
