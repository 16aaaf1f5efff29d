use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("unknown rule: {0}")]
    UnknownRule(String),

    #[error("{rule}: value {value} is not a whole number")]
    NotWholeNumber { rule: String, value: f64 },
}
