//! gerifit-rules
//!
//! Clinical classification engine. Pure functions, no I/O: each rule maps a
//! measurement (plus gender and age where the reference table needs them)
//! to a `{status, label}` [`Classification`](classification::Classification).

pub mod assessment;
pub mod classification;
pub mod error;
pub mod rules;

use std::fmt;
use std::str::FromStr;

use gerifit_core::models::assessment::Gender;

use classification::Classification;
use error::RuleError;

/// Identifies a rule by name, for callers that pick the rule at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    Bmi,
    Tug,
    Handgrip,
    SitToStand,
    Katz,
    Lawton,
    TwoMinStep,
}

impl RuleId {
    pub const ALL: [RuleId; 7] = [
        RuleId::Bmi,
        RuleId::Tug,
        RuleId::Handgrip,
        RuleId::SitToStand,
        RuleId::Katz,
        RuleId::Lawton,
        RuleId::TwoMinStep,
    ];

    /// Unique identifier (e.g. "bmi", "sit_to_stand").
    pub fn id(&self) -> &'static str {
        match self {
            RuleId::Bmi => "bmi",
            RuleId::Tug => "tug",
            RuleId::Handgrip => "handgrip",
            RuleId::SitToStand => "sit_to_stand",
            RuleId::Katz => "katz",
            RuleId::Lawton => "lawton",
            RuleId::TwoMinStep => "two_min_step",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            RuleId::Bmi => "Body-mass index (kg/m²)",
            RuleId::Tug => "Timed Up and Go (s)",
            RuleId::Handgrip => "Handgrip strength (kg)",
            RuleId::SitToStand => "Five-repetition sit-to-stand (s)",
            RuleId::Katz => "Katz basic activities (0–6)",
            RuleId::Lawton => "Lawton instrumental activities (0–27)",
            RuleId::TwoMinStep => "Two-minute step test (steps)",
        }
    }

    /// Whether the rule reads gender and age in addition to the value.
    pub fn needs_gender(&self) -> bool {
        matches!(self, RuleId::Handgrip | RuleId::TwoMinStep)
    }

    /// Classify a single value with this rule.
    ///
    /// Scores and step counts must be whole numbers; anything else is the
    /// only way this can fail. Negative values are unrecorded, as always.
    pub fn classify_value(
        &self,
        value: f64,
        gender: Gender,
        age: u32,
    ) -> Result<Classification, RuleError> {
        let classification = match self {
            RuleId::Bmi => rules::classify_bmi(value),
            RuleId::Tug => rules::classify_tug(value),
            RuleId::Handgrip => rules::classify_handgrip(gender, value),
            RuleId::SitToStand => rules::classify_sit_to_stand(value),
            RuleId::Katz => rules::classify_katz(self.whole(value)?),
            RuleId::Lawton => rules::classify_lawton(self.whole(value)?),
            RuleId::TwoMinStep => rules::classify_two_min_step(age, gender, self.whole(value)?),
        };
        Ok(classification)
    }

    fn whole(&self, value: f64) -> Result<u32, RuleError> {
        if !value.is_finite() || value <= 0.0 {
            return Ok(0);
        }
        if value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(RuleError::NotWholeNumber {
                rule: self.id().to_string(),
                value,
            });
        }
        Ok(value as u32)
    }
}

impl FromStr for RuleId {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.id() == wanted)
            .ok_or_else(|| RuleError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
