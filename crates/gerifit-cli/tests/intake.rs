use gerifit_cli::intake::{Field, IntakeError, IntakeForm};
use gerifit_core::models::assessment::Gender;
use gerifit_rules::classification::Status;
use jiff::civil::date;

fn form() -> IntakeForm {
    IntakeForm::new(date(2024, 5, 10))
}

#[test]
fn height_and_weight_derive_bmi_and_classify_it() {
    let mut form = form();
    form.apply_edit("height_cm=170").unwrap();
    form.apply_edit("weight_kg=85").unwrap();

    assert_eq!(form.assessment().bmi, 29.41);
    let feedback = form.feedback();
    assert_eq!(feedback.bmi.status, Status::Warning);
    assert!(feedback.bmi.label.contains("overweight"));
}

#[test]
fn comma_is_accepted_as_decimal_separator() {
    let mut form = form();
    form.apply(Field::TugSeconds, "9,5").unwrap();
    assert_eq!(form.assessment().tug_seconds, 9.5);
    assert_eq!(form.feedback().tug.status, Status::Success);
}

#[test]
fn birth_date_derives_age_around_the_birthday() {
    let mut form = form();
    form.apply_edit("birth_date=1950-05-11").unwrap();
    assert_eq!(form.assessment().age, 73);

    form.apply_edit("birth_date=1950-05-10").unwrap();
    assert_eq!(form.assessment().age, 74);
}

#[test]
fn clearing_a_source_field_clears_the_derived_value() {
    let mut form = form();
    form.apply_edit("birth_date=1950-01-01").unwrap();
    form.apply_edit("height_cm=170").unwrap();
    form.apply_edit("weight_kg=85").unwrap();

    form.apply_edit("weight_kg=").unwrap();
    form.apply_edit("birth_date=").unwrap();

    assert_eq!(form.assessment().bmi, 0.0);
    assert_eq!(form.assessment().age, 0);
    assert!(form.feedback().bmi.is_neutral());
}

#[test]
fn derived_fields_cannot_be_edited() {
    let mut form = form();
    assert_eq!(
        form.apply_edit("bmi=25"),
        Err(IntakeError::DerivedField("bmi".to_string()))
    );
    assert_eq!(
        "age".parse::<Field>(),
        Err(IntakeError::DerivedField("age".to_string()))
    );
}

#[test]
fn field_names_accept_dashes() {
    assert_eq!("two-min-step-count".parse::<Field>(), Ok(Field::TwoMinStepCount));
    assert_eq!(" Katz_Score ".parse::<Field>(), Ok(Field::KatzScore));
    assert!(matches!(
        "shoe_size".parse::<Field>(),
        Err(IntakeError::UnknownField(_))
    ));
}

#[test]
fn every_field_key_round_trips() {
    for field in Field::ALL {
        assert_eq!(field.key().parse::<Field>(), Ok(field));
    }
}

#[test]
fn invalid_input_is_rejected_and_leaves_the_form_unchanged() {
    let mut form = form();
    form.apply_edit("weight_kg=70").unwrap();

    assert!(matches!(
        form.apply_edit("weight_kg=-3"),
        Err(IntakeError::InvalidNumber { field: Field::WeightKg, .. })
    ));
    assert!(matches!(
        form.apply_edit("weight_kg=heavy"),
        Err(IntakeError::InvalidNumber { .. })
    ));
    assert!(matches!(
        form.apply_edit("birth_date=10/05/1950"),
        Err(IntakeError::InvalidDate { .. })
    ));
    assert_eq!(
        form.apply_edit("gender=other"),
        Err(IntakeError::InvalidGender("other".to_string()))
    );
    assert!(matches!(
        form.apply_edit("weight_kg"),
        Err(IntakeError::MalformedEdit(_))
    ));

    assert_eq!(form.assessment().weight_kg, 70.0);
}

#[test]
fn scale_scores_are_bounded() {
    let mut form = form();
    assert_eq!(
        form.apply_edit("katz_score=7"),
        Err(IntakeError::AboveScale {
            field: Field::KatzScore,
            value: 7,
            max: 6
        })
    );
    assert!(form.apply_edit("katz_score=6").is_ok());
    assert!(form.apply_edit("lawton_score=27").is_ok());
    assert!(matches!(
        form.apply_edit("lawton_score=28"),
        Err(IntakeError::AboveScale { max: 27, .. })
    ));
}

#[test]
fn gender_drives_the_gendered_rules() {
    let mut form = form();
    form.apply_edit("handgrip_right1=20").unwrap();
    assert!(form.feedback().handgrip_right.is_neutral());

    form.apply_edit("gender=F").unwrap();
    assert_eq!(form.assessment().gender, Gender::Female);
    assert_eq!(form.feedback().handgrip_right.status, Status::Success);

    form.apply_edit("gender=male").unwrap();
    assert_eq!(form.feedback().handgrip_right.status, Status::Error);
}

#[test]
fn blank_assessment_date_falls_back_to_today() {
    let mut form = form();
    form.apply_edit("assessment_date=2023-01-02").unwrap();
    assert_eq!(form.assessment().assessment_date, date(2023, 1, 2));
    form.apply_edit("assessment_date=").unwrap();
    assert_eq!(form.assessment().assessment_date, date(2024, 5, 10));
}

#[test]
fn submit_requires_a_name() {
    let mut form = form();
    form.apply_edit("name=   ").unwrap();
    assert_eq!(form.clone().submit(), Err(IntakeError::MissingName));

    form.apply_edit("name=Maria da Silva").unwrap();
    let assessment = form.submit().unwrap();
    assert_eq!(assessment.name, "Maria da Silva");
}

#[test]
fn loaded_assessment_is_rederived() {
    let json = r#"{"name":"Ana","birth_date":"1940-12-31","height_cm":160,"weight_kg":64}"#;
    let assessment = serde_json::from_str(json).unwrap();
    let form = IntakeForm::from_assessment(assessment, date(2024, 5, 10));

    assert_eq!(form.assessment().age, 83);
    assert_eq!(form.assessment().bmi, 25.0);
}
