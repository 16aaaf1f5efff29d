//! Command implementations. Each writes its user-facing output to `out` so
//! it can be driven from tests as well as from `main`.

use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use gerifit_core::models::assessment::{Assessment, Gender};
use gerifit_core::models::record::{Record, parse_record_id};
use gerifit_export::docx::generate_docx;
use gerifit_export::logo::load_logo;
use gerifit_export::render::render_markdown;
use gerifit_export::report::{ReportOptions, build_report, format_date, report_filename};
use gerifit_export::styles::DocumentStyles;
use gerifit_narrative::gemini::GeminiGenerator;
use gerifit_narrative::generator::TextGenerator;
use gerifit_narrative::summary::{Summary, summarize};
use gerifit_rules::RuleId;
use gerifit_rules::assessment::{AssessmentClassification, classify_assessment};
use gerifit_storage::AssessmentRepository;
use jiff::civil::Date;
use tracing::info;

use crate::config::{GerifitConfig, config_info, save_config};
use crate::intake::IntakeForm;

/// Read an assessment stored as JSON. Missing fields take their defaults.
pub fn load_assessment_file(path: &Path) -> Result<Assessment> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let assessment = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("{} is not an assessment", path.display()))?;
    Ok(assessment)
}

/// Open a saved record in the intake form. Saving it appends a new record;
/// the original is left as it was.
pub fn reopen<R: AssessmentRepository>(repo: &R, id: &str, today: Date) -> Result<IntakeForm> {
    let record = repo.get(parse_record_id(id)?)?;
    info!(id = %record.id, "reopening saved assessment");
    Ok(IntakeForm::from_assessment(record.assessment, today))
}

/// Apply `edits` to `form`, print the live classifications, and save unless
/// `dry_run`. Returns the saved record.
pub fn intake<R: AssessmentRepository>(
    repo: &mut R,
    mut form: IntakeForm,
    edits: &[String],
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<Option<Record>> {
    for edit in edits {
        form.apply_edit(edit)?;
    }

    let a = form.assessment();
    writeln!(out, "Age: {}  BMI: {:.2}", a.age, a.bmi)?;
    write_classifications(out, &form.feedback())?;

    if dry_run {
        writeln!(out, "Dry run, nothing saved.")?;
        return Ok(None);
    }

    let record = repo.append(form.submit()?)?;
    writeln!(out, "Saved {}", record.id)?;
    Ok(Some(record))
}

pub fn list<R: AssessmentRepository>(repo: &R, out: &mut dyn Write) -> Result<()> {
    let records = repo.list()?;
    if records.is_empty() {
        writeln!(out, "No saved assessments.")?;
        return Ok(());
    }
    for record in &records {
        let a = &record.assessment;
        let worst = classify_assessment(a).worst_status();
        writeln!(
            out,
            "{}  {}  {:<30}  {:>3}  {}",
            record.id,
            format_date(a.assessment_date),
            a.name,
            a.age,
            worst.as_str(),
        )?;
    }
    Ok(())
}

pub fn show<R: AssessmentRepository>(repo: &R, id: &str, out: &mut dyn Write) -> Result<()> {
    let record = repo.get(parse_record_id(id)?)?;
    let a = &record.assessment;

    writeln!(out, "{} ({})", a.name, record.id)?;
    writeln!(out, "Saved:      {}", record.created_at)?;
    writeln!(out, "Assessed:   {}", format_date(a.assessment_date))?;
    writeln!(
        out,
        "Born:       {}",
        a.birth_date.map(format_date).unwrap_or_default()
    )?;
    writeln!(out, "Age:        {}", a.age)?;
    writeln!(out, "Gender:     {}", a.gender)?;
    writeln!(
        out,
        "Anthropometry: {}cm, {}kg, BMI {:.2}",
        a.height_cm, a.weight_kg, a.bmi
    )?;
    writeln!(out)?;
    write_classifications(out, &classify_assessment(a))?;
    if !a.notes.trim().is_empty() {
        writeln!(out)?;
        writeln!(out, "Notes: {}", a.notes.trim())?;
    }
    Ok(())
}

/// Write the DOCX report into `out_dir` and return its path, or print the
/// Markdown rendering when `markdown` is set.
pub fn export<R: AssessmentRepository>(
    repo: &R,
    config: &GerifitConfig,
    id: &str,
    out_dir: &Path,
    markdown: bool,
    today: Date,
    out: &mut dyn Write,
) -> Result<Option<PathBuf>> {
    let record = repo.get(parse_record_id(id)?)?;
    let options = ReportOptions {
        clinic_name: config.clinic_name.clone(),
        clinic_subtitle: config.clinic_subtitle.clone(),
        generated_on: today,
    };
    let report = build_report(&record, &options);

    if markdown {
        write!(out, "{}", render_markdown(&report)?)?;
        return Ok(None);
    }

    let logo = config.logo_path.as_deref().and_then(load_logo);
    let bytes = generate_docx(&report, &DocumentStyles::default(), logo.as_ref())?;

    std::fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(report_filename(&record));
    std::fs::write(&path, &bytes).wrap_err_with(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = bytes.len(), "report exported");
    writeln!(out, "Wrote {}", path.display())?;
    Ok(Some(path))
}

/// The configured generator, or `None` when the API key is not set.
pub fn narrative_generator(config: &GerifitConfig) -> Option<GeminiGenerator> {
    GeminiGenerator::from_env(&config.narrative.api_key_env)
        .ok()
        .map(|g| {
            g.with_model(config.narrative.model.as_str())
                .with_base_url(config.narrative.base_url.as_str())
        })
}

pub async fn analyze<R: AssessmentRepository>(
    repo: &R,
    generator: Option<&dyn TextGenerator>,
    api_key_env: &str,
    id: &str,
    out: &mut dyn Write,
) -> Result<Summary> {
    let record = repo.get(parse_record_id(id)?)?;
    let summary = summarize(generator, api_key_env, &record.assessment).await;
    writeln!(out, "{}", summary.text)?;
    Ok(summary)
}

pub fn classify(
    rule: &str,
    value: f64,
    gender: Option<&str>,
    age: u32,
    out: &mut dyn Write,
) -> Result<()> {
    let rule: RuleId = rule.parse()?;
    let gender = gender.map(Gender::from).unwrap_or_default();
    let classification = rule.classify_value(value, gender, age)?;
    writeln!(
        out,
        "{}: {} {}",
        rule.name(),
        classification.status.as_str(),
        classification.label
    )?;
    Ok(())
}

pub fn config(path: &Path, config: &GerifitConfig, out: &mut dyn Write) -> Result<()> {
    let info = config_info(path, config);
    writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
    Ok(())
}

/// Write the default configuration to `path`. An existing file is only
/// replaced with `force`.
pub fn config_init(path: &Path, force: bool, out: &mut dyn Write) -> Result<GerifitConfig> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    let config = GerifitConfig::with_defaults()?;
    save_config(path, &config)?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(config)
}

/// Change one setting of `config` and save it to `path`.
pub fn config_set(
    path: &Path,
    mut config: GerifitConfig,
    key: &str,
    value: &str,
    out: &mut dyn Write,
) -> Result<GerifitConfig> {
    config.set(key, value)?;
    save_config(path, &config)?;
    writeln!(out, "Set {key} in {}", path.display())?;
    Ok(config)
}

fn write_classifications(out: &mut dyn Write, classes: &AssessmentClassification) -> Result<()> {
    for (name, c) in classes.entries() {
        if c.is_neutral() {
            writeln!(out, "  {name:<18} -")?;
        } else {
            writeln!(out, "  {name:<18} {:<8} {}", c.status.as_str(), c.label)?;
        }
    }
    Ok(())
}
