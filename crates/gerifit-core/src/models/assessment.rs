use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::derive;
use crate::error::CoreError;

/// Patient gender as captured on the intake form.
///
/// Serialized as `"male"`, `"female"`, or `""` when not selected. Any other
/// string deserializes to [`Gender::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Gender::Unknown)
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value.trim() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::from(value.as_str())
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geriatric physical-functional assessment.
///
/// Zero means "not recorded" for every numeric measurement. `age` and `bmi`
/// are derived fields kept in sync by the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Assessment {
    // Personal data
    pub name: String,
    pub birth_date: Option<jiff::civil::Date>,
    #[ts(type = "\"male\" | \"female\" | \"\"")]
    pub gender: Gender,
    pub age: u32,

    // Vital signs
    pub blood_pressure_start: String,
    pub blood_pressure_end: String,

    // Anthropometry
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub body_fat_percentage: f64,
    pub lean_mass_percentage: f64,
    pub assessment_date: jiff::civil::Date,

    /// Five-repetition sit-to-stand, seconds per trial.
    pub sit_to_stand_trial1: f64,
    pub sit_to_stand_trial2: f64,

    /// Handgrip dynamometry, kg per trial.
    pub handgrip_right1: f64,
    pub handgrip_right2: f64,
    pub handgrip_left1: f64,
    pub handgrip_left2: f64,

    pub two_min_step_count: u32,

    /// Katz basic activities of daily living, 0–6.
    pub katz_score: u32,
    /// Lawton instrumental activities of daily living, 0–27.
    pub lawton_score: u32,

    /// Timed Up and Go, seconds.
    pub tug_seconds: f64,

    pub notes: String,
}

impl Assessment {
    /// A blank assessment dated `assessment_date`.
    pub fn new(assessment_date: jiff::civil::Date) -> Self {
        Self {
            name: String::new(),
            birth_date: None,
            gender: Gender::Unknown,
            age: 0,
            blood_pressure_start: String::new(),
            blood_pressure_end: String::new(),
            height_cm: 0.0,
            weight_kg: 0.0,
            bmi: 0.0,
            body_fat_percentage: 0.0,
            lean_mass_percentage: 0.0,
            assessment_date,
            sit_to_stand_trial1: 0.0,
            sit_to_stand_trial2: 0.0,
            handgrip_right1: 0.0,
            handgrip_right2: 0.0,
            handgrip_left1: 0.0,
            handgrip_left2: 0.0,
            two_min_step_count: 0,
            katz_score: 0,
            lawton_score: 0,
            tug_seconds: 0.0,
            notes: String::new(),
        }
    }

    /// Recompute `age` and `bmi` from their source fields.
    ///
    /// Age is only touched when a birth date is present, BMI only when both
    /// height and weight are positive; otherwise the stored value stays.
    pub fn rederive(&mut self, today: jiff::civil::Date) {
        if let Some(birth) = self.birth_date {
            self.age = derive::age_on(birth, today);
        }
        if let Some(bmi) = derive::bmi(self.weight_kg, self.height_cm) {
            self.bmi = bmi;
        }
    }

    /// Best (fastest recorded) sit-to-stand trial.
    pub fn best_sit_to_stand(&self) -> Option<f64> {
        derive::best_sit_to_stand(self.sit_to_stand_trial1, self.sit_to_stand_trial2)
    }

    pub fn best_handgrip_right(&self) -> f64 {
        derive::best_handgrip(self.handgrip_right1, self.handgrip_right2)
    }

    pub fn best_handgrip_left(&self) -> f64 {
        derive::best_handgrip(self.handgrip_left1, self.handgrip_left2)
    }

    /// Fails with [`CoreError::MissingField`] when the patient name is blank.
    pub fn require_name(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        Ok(())
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Self::new(jiff::Zoned::now().date())
    }
}
