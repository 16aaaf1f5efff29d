//! The intake form: field edits in, live classification feedback out.

use std::fmt;
use std::str::FromStr;

use gerifit_core::derive;
use gerifit_core::models::assessment::{Assessment, Gender};
use gerifit_rules::assessment::{AssessmentClassification, classify_assessment};
use jiff::civil::Date;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IntakeError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("{0} is calculated automatically and cannot be edited")]
    DerivedField(String),

    #[error("expected field=value, got '{0}'")]
    MalformedEdit(String),

    #[error("{field}: '{value}' is not a valid non-negative number")]
    InvalidNumber { field: Field, value: String },

    #[error("{field}: '{value}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate { field: Field, value: String },

    #[error("gender: '{0}' is not one of male, female, or empty")]
    InvalidGender(String),

    #[error("{field}: {value} is above the scale maximum of {max}")]
    AboveScale { field: Field, value: u32, max: u32 },

    #[error("patient name is required to save an assessment")]
    MissingName,
}

/// Every editable field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    BirthDate,
    Gender,
    BloodPressureStart,
    BloodPressureEnd,
    HeightCm,
    WeightKg,
    BodyFatPercentage,
    LeanMassPercentage,
    AssessmentDate,
    SitToStandTrial1,
    SitToStandTrial2,
    HandgripRight1,
    HandgripRight2,
    HandgripLeft1,
    HandgripLeft2,
    TwoMinStepCount,
    KatzScore,
    LawtonScore,
    TugSeconds,
    Notes,
}

impl Field {
    pub const ALL: [Field; 21] = [
        Field::Name,
        Field::BirthDate,
        Field::Gender,
        Field::BloodPressureStart,
        Field::BloodPressureEnd,
        Field::HeightCm,
        Field::WeightKg,
        Field::BodyFatPercentage,
        Field::LeanMassPercentage,
        Field::AssessmentDate,
        Field::SitToStandTrial1,
        Field::SitToStandTrial2,
        Field::HandgripRight1,
        Field::HandgripRight2,
        Field::HandgripLeft1,
        Field::HandgripLeft2,
        Field::TwoMinStepCount,
        Field::KatzScore,
        Field::LawtonScore,
        Field::TugSeconds,
        Field::Notes,
    ];

    /// Name as it appears in the stored JSON and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::BirthDate => "birth_date",
            Field::Gender => "gender",
            Field::BloodPressureStart => "blood_pressure_start",
            Field::BloodPressureEnd => "blood_pressure_end",
            Field::HeightCm => "height_cm",
            Field::WeightKg => "weight_kg",
            Field::BodyFatPercentage => "body_fat_percentage",
            Field::LeanMassPercentage => "lean_mass_percentage",
            Field::AssessmentDate => "assessment_date",
            Field::SitToStandTrial1 => "sit_to_stand_trial1",
            Field::SitToStandTrial2 => "sit_to_stand_trial2",
            Field::HandgripRight1 => "handgrip_right1",
            Field::HandgripRight2 => "handgrip_right2",
            Field::HandgripLeft1 => "handgrip_left1",
            Field::HandgripLeft2 => "handgrip_left2",
            Field::TwoMinStepCount => "two_min_step_count",
            Field::KatzScore => "katz_score",
            Field::LawtonScore => "lawton_score",
            Field::TugSeconds => "tug_seconds",
            Field::Notes => "notes",
        }
    }
}

impl FromStr for Field {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        if wanted == "age" || wanted == "bmi" {
            return Err(IntakeError::DerivedField(wanted));
        }
        Field::ALL
            .into_iter()
            .find(|f| f.key() == wanted)
            .ok_or_else(|| IntakeError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An assessment being filled in.
///
/// Every edit re-derives age and BMI, so [`IntakeForm::feedback`] always
/// reflects the current input.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    assessment: Assessment,
    today: Date,
}

impl IntakeForm {
    pub fn new(today: Date) -> Self {
        Self {
            assessment: Assessment::new(today),
            today,
        }
    }

    /// Continue editing an existing assessment, e.g. one loaded from a file.
    pub fn from_assessment(mut assessment: Assessment, today: Date) -> Self {
        assessment.rederive(today);
        Self { assessment, today }
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    /// Apply a `field=value` edit.
    pub fn apply_edit(&mut self, edit: &str) -> Result<(), IntakeError> {
        let (field, value) = edit
            .split_once('=')
            .ok_or_else(|| IntakeError::MalformedEdit(edit.to_string()))?;
        self.apply(field.parse()?, value)
    }

    /// Set `field` from raw text. Blank numeric input clears the field.
    pub fn apply(&mut self, field: Field, raw: &str) -> Result<(), IntakeError> {
        let a = &mut self.assessment;
        let text = raw.trim();
        match field {
            Field::Name => a.name = text.to_string(),
            Field::BirthDate => a.birth_date = parse_optional_date(field, text)?,
            Field::Gender => a.gender = parse_gender(text)?,
            Field::BloodPressureStart => a.blood_pressure_start = text.to_string(),
            Field::BloodPressureEnd => a.blood_pressure_end = text.to_string(),
            Field::HeightCm => a.height_cm = parse_number(field, text)?,
            Field::WeightKg => a.weight_kg = parse_number(field, text)?,
            Field::BodyFatPercentage => a.body_fat_percentage = parse_number(field, text)?,
            Field::LeanMassPercentage => a.lean_mass_percentage = parse_number(field, text)?,
            Field::AssessmentDate => {
                a.assessment_date = parse_optional_date(field, text)?.unwrap_or(self.today)
            }
            Field::SitToStandTrial1 => a.sit_to_stand_trial1 = parse_number(field, text)?,
            Field::SitToStandTrial2 => a.sit_to_stand_trial2 = parse_number(field, text)?,
            Field::HandgripRight1 => a.handgrip_right1 = parse_number(field, text)?,
            Field::HandgripRight2 => a.handgrip_right2 = parse_number(field, text)?,
            Field::HandgripLeft1 => a.handgrip_left1 = parse_number(field, text)?,
            Field::HandgripLeft2 => a.handgrip_left2 = parse_number(field, text)?,
            Field::TwoMinStepCount => a.two_min_step_count = parse_count(field, text, None)?,
            Field::KatzScore => a.katz_score = parse_count(field, text, Some(6))?,
            Field::LawtonScore => a.lawton_score = parse_count(field, text, Some(27))?,
            Field::TugSeconds => a.tug_seconds = parse_number(field, text)?,
            Field::Notes => a.notes = raw.to_string(),
        }
        a.rederive(self.today);

        // Clearing a source field clears what was derived from it.
        if field == Field::BirthDate && a.birth_date.is_none() {
            a.age = 0;
        }
        if matches!(field, Field::HeightCm | Field::WeightKg)
            && derive::bmi(a.weight_kg, a.height_cm).is_none()
        {
            a.bmi = 0.0;
        }
        Ok(())
    }

    /// Classification of every rule for the current input.
    pub fn feedback(&self) -> AssessmentClassification {
        classify_assessment(&self.assessment)
    }

    /// Finish editing. The patient name is required.
    pub fn submit(self) -> Result<Assessment, IntakeError> {
        self.assessment
            .require_name()
            .map_err(|_| IntakeError::MissingName)?;
        Ok(self.assessment)
    }
}

/// Accepts `.` or `,` as decimal separator.
fn parse_number(field: Field, text: &str) -> Result<f64, IntakeError> {
    if text.is_empty() {
        return Ok(0.0);
    }
    let invalid = || IntakeError::InvalidNumber {
        field,
        value: text.to_string(),
    };
    let value: f64 = text.replace(',', ".").parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

fn parse_count(field: Field, text: &str, max: Option<u32>) -> Result<u32, IntakeError> {
    if text.is_empty() {
        return Ok(0);
    }
    let value: u32 = text.parse().map_err(|_| IntakeError::InvalidNumber {
        field,
        value: text.to_string(),
    })?;
    match max {
        Some(max) if value > max => Err(IntakeError::AboveScale { field, value, max }),
        _ => Ok(value),
    }
}

fn parse_optional_date(field: Field, text: &str) -> Result<Option<Date>, IntakeError> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<Date>()
        .map(Some)
        .map_err(|_| IntakeError::InvalidDate {
            field,
            value: text.to_string(),
        })
}

fn parse_gender(text: &str) -> Result<Gender, IntakeError> {
    match text.to_ascii_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        "" => Ok(Gender::Unknown),
        _ => Err(IntakeError::InvalidGender(text.to_string())),
    }
}
