use gerifit_core::models::assessment::Assessment;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::classification::{Classification, Status};
use crate::rules;

/// Every rule applied to one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentClassification {
    pub bmi: Classification,
    pub tug: Classification,
    /// Against the best (fastest) recorded trial.
    pub sit_to_stand: Classification,
    /// Against the best trial of each hand.
    pub handgrip_right: Classification,
    pub handgrip_left: Classification,
    pub two_min_step: Classification,
    pub katz: Classification,
    pub lawton: Classification,
}

impl AssessmentClassification {
    /// Display name and classification for each rule, in form order.
    pub fn entries(&self) -> [(&'static str, &Classification); 8] {
        [
            ("BMI", &self.bmi),
            ("Sit-to-stand", &self.sit_to_stand),
            ("Handgrip (right)", &self.handgrip_right),
            ("Handgrip (left)", &self.handgrip_left),
            ("TUG", &self.tug),
            ("Two-minute step", &self.two_min_step),
            ("Katz (AVD)", &self.katz),
            ("Lawton (AIVD)", &self.lawton),
        ]
    }

    /// Most severe status across all rules.
    pub fn worst_status(&self) -> Status {
        self.entries()
            .iter()
            .map(|(_, c)| c.status)
            .max()
            .unwrap_or(Status::Neutral)
    }
}

/// Apply every rule to the measurements stored on `assessment`.
///
/// Reads the derived `age` and `bmi` as stored; callers re-derive them
/// first (see [`Assessment::rederive`]).
pub fn classify_assessment(assessment: &Assessment) -> AssessmentClassification {
    let sit_to_stand = assessment
        .best_sit_to_stand()
        .map(rules::classify_sit_to_stand)
        .unwrap_or_else(Classification::neutral);

    AssessmentClassification {
        bmi: rules::classify_bmi(assessment.bmi),
        tug: rules::classify_tug(assessment.tug_seconds),
        sit_to_stand,
        handgrip_right: rules::classify_handgrip(
            assessment.gender,
            assessment.best_handgrip_right(),
        ),
        handgrip_left: rules::classify_handgrip(assessment.gender, assessment.best_handgrip_left()),
        two_min_step: rules::classify_two_min_step(
            assessment.age,
            assessment.gender,
            assessment.two_min_step_count,
        ),
        katz: rules::classify_katz(assessment.katz_score),
        lawton: rules::classify_lawton(assessment.lawton_score),
    }
}
