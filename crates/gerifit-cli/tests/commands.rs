use std::path::PathBuf;

use gerifit_cli::commands;
use gerifit_cli::config::{GerifitConfig, NarrativeConfig, load_config};
use gerifit_cli::intake::IntakeForm;
use gerifit_narrative::summary::SummaryOutcome;
use gerifit_storage::{AssessmentRepository, MemoryRepository};
use jiff::civil::date;

fn config(logo_path: Option<PathBuf>) -> GerifitConfig {
    GerifitConfig {
        config_version: 1,
        data_file: PathBuf::from("unused.json"),
        logo_path,
        clinic_name: "SENHORAS & SENHORES".to_string(),
        clinic_subtitle: "AVALIAÇÃO".to_string(),
        narrative: NarrativeConfig::default(),
        created_at: "2024-05-10T12:00:00Z".parse().unwrap(),
    }
}

fn edits(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn saved(repo: &mut MemoryRepository) -> String {
    let form = IntakeForm::new(date(2024, 5, 10));
    let record = commands::intake(
        repo,
        form,
        &edits(&[
            "name=Maria da Silva",
            "gender=female",
            "birth_date=1944-03-02",
            "height_cm=160",
            "weight_kg=70",
            "tug_seconds=12",
            "notes=Uses a cane outdoors.",
        ]),
        false,
        &mut Vec::new(),
    )
    .unwrap()
    .unwrap();
    record.id.to_string()
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

#[test]
fn intake_dry_run_prints_feedback_without_saving() {
    let mut repo = MemoryRepository::new();
    let mut out = Vec::new();
    let result = commands::intake(
        &mut repo,
        IntakeForm::new(date(2024, 5, 10)),
        &edits(&["height_cm=170", "weight_kg=85"]),
        true,
        &mut out,
    )
    .unwrap();

    assert!(result.is_none());
    assert!(repo.list().unwrap().is_empty());
    let out = text(out);
    assert!(out.contains("BMI: 29.41"));
    assert!(out.contains("overweight"));
    assert!(out.contains("Dry run"));
}

#[test]
fn intake_without_name_is_not_saved() {
    let mut repo = MemoryRepository::new();
    let err = commands::intake(
        &mut repo,
        IntakeForm::new(date(2024, 5, 10)),
        &edits(&["weight_kg=60"]),
        false,
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("name is required"));
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn saved_record_reopens_and_saves_as_a_new_record() {
    let mut repo = MemoryRepository::new();
    let id = saved(&mut repo);

    let form = commands::reopen(&repo, &id, date(2024, 6, 1)).unwrap();
    assert_eq!(form.assessment().name, "Maria da Silva");
    assert_eq!(form.assessment().bmi, 27.34);

    let updated = commands::intake(
        &mut repo,
        form,
        &edits(&["weight_kg=64"]),
        false,
        &mut Vec::new(),
    )
    .unwrap()
    .unwrap();

    assert_ne!(updated.id.to_string(), id);
    assert_eq!(updated.assessment.name, "Maria da Silva");
    assert_eq!(updated.assessment.bmi, 25.0);
    assert_eq!(updated.assessment.notes, "Uses a cane outdoors.");

    let records = repo.list().unwrap();
    assert_eq!(records.len(), 2);
    let original = repo.get(id.parse().unwrap()).unwrap();
    assert_eq!(original.assessment.weight_kg, 70.0);
}

#[test]
fn reopen_rejects_unknown_ids() {
    let repo = MemoryRepository::new();
    assert!(commands::reopen(&repo, "nope", date(2024, 6, 1)).is_err());
    assert!(commands::reopen(&repo, &uuid::Uuid::new_v4().to_string(), date(2024, 6, 1)).is_err());
}

#[test]
fn list_and_show_saved_records() {
    let mut repo = MemoryRepository::new();
    let mut out = Vec::new();
    commands::list(&repo, &mut out).unwrap();
    assert!(text(out).contains("No saved assessments"));

    let id = saved(&mut repo);

    let mut out = Vec::new();
    commands::list(&repo, &mut out).unwrap();
    let out = text(out);
    assert!(out.contains(&id));
    assert!(out.contains("Maria da Silva"));
    assert!(out.contains("10/05/2024"));

    let mut out = Vec::new();
    commands::show(&repo, &id, &mut out).unwrap();
    let out = text(out);
    assert!(out.contains("Age:        80"));
    assert!(out.contains("TUG"));
    assert!(out.contains("warning"));
    assert!(out.contains("Notes: Uses a cane outdoors."));
}

#[test]
fn show_rejects_bad_and_unknown_ids() {
    let repo = MemoryRepository::new();
    assert!(commands::show(&repo, "not-a-uuid", &mut Vec::new()).is_err());

    let err = commands::show(&repo, &uuid::Uuid::new_v4().to_string(), &mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn export_markdown_prints_the_report() {
    let mut repo = MemoryRepository::new();
    let id = saved(&mut repo);
    let dir = tempfile::tempdir().unwrap();

    let mut out = Vec::new();
    let written = commands::export(
        &repo,
        &config(None),
        &id,
        dir.path(),
        true,
        date(2024, 5, 11),
        &mut out,
    )
    .unwrap();

    assert!(written.is_none());
    let out = text(out);
    assert!(out.starts_with("# SENHORAS & SENHORES"));
    assert!(out.contains("Maria da Silva"));
    assert!(out.contains("Uses a cane outdoors."));
}

#[test]
fn export_writes_docx_even_with_an_unreadable_logo() {
    let mut repo = MemoryRepository::new();
    let id = saved(&mut repo);
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(Some(dir.path().join("missing-logo.png")));

    let path = commands::export(
        &repo,
        &cfg,
        &id,
        &dir.path().join("reports"),
        false,
        date(2024, 5, 11),
        &mut Vec::new(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(
        path.file_name().unwrap(),
        "Relatorio_Maria_da_Silva_2024-05-10.docx"
    );
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn analyze_without_a_key_prints_the_credential_message() {
    let mut repo = MemoryRepository::new();
    let id = saved(&mut repo);

    let mut out = Vec::new();
    let summary = commands::analyze(&repo, None, "GERIFIT_API_KEY", &id, &mut out)
        .await
        .unwrap();

    assert_eq!(summary.outcome, SummaryOutcome::MissingCredential);
    assert_eq!(
        text(out).trim(),
        "Erro: Chave de API não configurada (GERIFIT_API_KEY)."
    );
}

#[test]
fn generator_is_absent_when_the_key_variable_is_unset() {
    let mut cfg = config(None);
    cfg.narrative.api_key_env = "GERIFIT_TEST_UNSET_KEY_VARIABLE".to_string();
    assert!(commands::narrative_generator(&cfg).is_none());
}

#[test]
fn classify_single_values() {
    let mut out = Vec::new();
    commands::classify("bmi", 29.41, None, 0, &mut out).unwrap();
    assert!(text(out).contains("warning overweight"));

    let mut out = Vec::new();
    commands::classify("two-min-step", 86.0, Some("male"), 62, &mut out).unwrap();
    assert!(text(out).contains("error"));

    let mut out = Vec::new();
    commands::classify("handgrip", 30.0, None, 0, &mut out).unwrap();
    assert!(text(out).trim_end().ends_with("neutral"));

    assert!(commands::classify("gait_speed", 1.0, None, 0, &mut Vec::new()).is_err());
    assert!(commands::classify("katz", 2.5, None, 0, &mut Vec::new()).is_err());
}

#[test]
fn config_prints_redacted_json() {
    let mut out = Vec::new();
    commands::config(&PathBuf::from("/etc/gerifit.json"), &config(None), &mut out).unwrap();
    let info: serde_json::Value = serde_json::from_str(&text(out)).unwrap();
    assert_eq!(info["config_path"], "/etc/gerifit.json");
    assert_eq!(info["api_key_env"], "API_KEY");
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gerifit").join("config.json");

    let written = commands::config_init(&path, false, &mut Vec::new()).unwrap();
    assert_eq!(load_config(&path).unwrap().narrative, written.narrative);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    let err = commands::config_init(&path, false, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("already exists"));

    std::fs::write(&path, "not json").unwrap();
    commands::config_init(&path, true, &mut Vec::new()).unwrap();
    assert!(load_config(&path).is_ok());
}

#[test]
fn config_set_persists_the_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let cfg = commands::config_set(&path, config(None), "clinic_name", "Clínica Viva", &mut Vec::new())
        .unwrap();
    let cfg = commands::config_set(&path, cfg, "api_key_env", "GEMINI_KEY", &mut Vec::new()).unwrap();
    let cfg = commands::config_set(&path, cfg, "logo_path", "/srv/logo.png", &mut Vec::new()).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.clinic_name, "Clínica Viva");
    assert_eq!(loaded.narrative.api_key_env, "GEMINI_KEY");
    assert_eq!(loaded.logo_path, Some(PathBuf::from("/srv/logo.png")));

    commands::config_set(&path, cfg, "logo_path", "", &mut Vec::new()).unwrap();
    assert_eq!(load_config(&path).unwrap().logo_path, None);
}

#[test]
fn config_set_rejects_unknown_keys_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let err = commands::config_set(&path, config(None), "colour", "blue", &mut Vec::new())
        .unwrap_err();
    assert!(err.to_string().contains("unknown config key"));
    assert!(commands::config_set(&path, config(None), "data_file", " ", &mut Vec::new()).is_err());
    assert!(!path.exists());
}
