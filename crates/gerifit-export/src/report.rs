//! Printable report model: what goes on the page, independent of format.

use gerifit_core::derive::round2;
use gerifit_core::models::assessment::{Assessment, Gender};
use gerifit_core::models::record::Record;
use gerifit_rules::assessment::classify_assessment;
use gerifit_rules::classification::Classification;
use jiff::civil::Date;
use serde::Serialize;

/// Header text and the date printed in the footer.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOptions {
    pub clinic_name: String,
    pub clinic_subtitle: String,
    pub generated_on: Date,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            clinic_name: "SENHORAS & SENHORES".to_string(),
            clinic_subtitle: "PHYSICAL-FUNCTIONAL AND GERIATRIC ASSESSMENT".to_string(),
            generated_on: jiff::Zoned::now().date(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: String,
    pub subtitle: String,
    pub patient_name: String,
    pub sections: Vec<Section>,
    pub footer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
    /// Free text printed after the rows, wrapped to the page width.
    pub text: Option<String>,
}

/// One `label: value (classification)` line.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub classification: Classification,
}

impl Row {
    fn plain(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            classification: Classification::neutral(),
        }
    }

    fn classified(label: &str, value: impl Into<String>, classification: Classification) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            classification,
        }
    }
}

/// Lay out a saved record as a report, annotating each measured field with
/// its rule classification.
pub fn build_report(record: &Record, options: &ReportOptions) -> Report {
    let a = &record.assessment;
    let classes = classify_assessment(a);

    let mut sections = vec![
        personal_section(a),
        Section {
            title: "ANTHROPOMETRY".to_string(),
            rows: vec![
                Row::plain("Height", format!("{} cm", a.height_cm)),
                Row::plain("Body mass", format!("{} kg", a.weight_kg)),
                Row::classified("BMI", format!("{:.2} kg/m²", a.bmi), classes.bmi.clone()),
                Row::plain("Body fat", format!("{} %", a.body_fat_percentage)),
                Row::plain("Lean mass", format!("{} %", a.lean_mass_percentage)),
            ],
            text: None,
        },
        Section {
            title: "STRENGTH AND FUNCTION TESTS".to_string(),
            rows: vec![
                Row::classified(
                    "Sit-to-stand (best time)",
                    a.best_sit_to_stand()
                        .map(|s| format!("{} s", round2(s)))
                        .unwrap_or_else(|| "-".to_string()),
                    classes.sit_to_stand.clone(),
                ),
                Row::classified(
                    "Handgrip (right)",
                    format!("{} kg", a.best_handgrip_right()),
                    classes.handgrip_right.clone(),
                ),
                Row::classified(
                    "Handgrip (left)",
                    format!("{} kg", a.best_handgrip_left()),
                    classes.handgrip_left.clone(),
                ),
                Row::classified(
                    "TUG (Timed Up and Go)",
                    format!("{} s", a.tug_seconds),
                    classes.tug.clone(),
                ),
                Row::classified(
                    "Two-minute step test",
                    format!("{} steps", a.two_min_step_count),
                    classes.two_min_step.clone(),
                ),
            ],
            text: None,
        },
        Section {
            title: "INDEPENDENCE SCALES".to_string(),
            rows: vec![
                Row::classified("KATZ scale (AVD)", format!("{} / 6", a.katz_score), classes.katz),
                Row::classified(
                    "Lawton scale (AIVD)",
                    format!("{} / 27", a.lawton_score),
                    classes.lawton,
                ),
            ],
            text: None,
        },
    ];

    if !a.notes.trim().is_empty() {
        sections.push(Section {
            title: "PROFESSIONAL NOTES".to_string(),
            rows: Vec::new(),
            text: Some(a.notes.trim().to_string()),
        });
    }

    Report {
        title: options.clinic_name.clone(),
        subtitle: options.clinic_subtitle.clone(),
        patient_name: a.name.clone(),
        sections,
        footer: format!(
            "{} - Generated on {}",
            options.clinic_name,
            format_date(options.generated_on)
        ),
    }
}

fn personal_section(a: &Assessment) -> Section {
    let birth = match a.birth_date {
        Some(date) => format!("{} ({} years)", format_date(date), a.age),
        None => "-".to_string(),
    };
    let gender = match a.gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
        Gender::Unknown => "-",
    };

    let mut rows = vec![
        Row::plain("Name", a.name.clone()),
        Row::plain("Birth date", birth),
        Row::plain("Gender", gender),
        Row::plain("Assessment date", format_date(a.assessment_date)),
    ];
    if !a.blood_pressure_start.trim().is_empty() {
        rows.push(Row::plain(
            "Blood pressure (start)",
            format!("{} mmHg", a.blood_pressure_start.trim()),
        ));
    }
    if !a.blood_pressure_end.trim().is_empty() {
        rows.push(Row::plain(
            "Blood pressure (end)",
            format!("{} mmHg", a.blood_pressure_end.trim()),
        ));
    }

    Section {
        title: "PERSONAL DATA".to_string(),
        rows,
        text: None,
    }
}

/// `dd/mm/yyyy`, as printed on the form.
pub fn format_date(date: Date) -> String {
    date.strftime("%d/%m/%Y").to_string()
}

/// `Relatorio_<name>_<assessment date>.docx`, whitespace runs in the name
/// collapsed to `_`.
pub fn report_filename(record: &Record) -> String {
    let name = record
        .assessment
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("Relatorio_{}_{}.docx", name, record.assessment.assessment_date)
}
