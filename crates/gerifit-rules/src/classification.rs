use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Severity band of a classification.
///
/// Variants are declared in display-severity order, so `Ord` ranks
/// `Neutral < Success < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Status {
    /// Not enough data to classify.
    Neutral,
    Success,
    Warning,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Neutral => "neutral",
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

/// The result of applying a clinical cut-off rule to a measurement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub status: Status,
    /// Band description; empty when `status` is [`Status::Neutral`].
    pub label: String,
}

impl Classification {
    pub fn new(status: Status, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
        }
    }

    pub fn neutral() -> Self {
        Self {
            status: Status::Neutral,
            label: String::new(),
        }
    }

    pub fn success(label: impl Into<String>) -> Self {
        Self::new(Status::Success, label)
    }

    pub fn warning(label: impl Into<String>) -> Self {
        Self::new(Status::Warning, label)
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self::new(Status::Error, label)
    }

    pub fn is_neutral(&self) -> bool {
        self.status == Status::Neutral
    }
}
