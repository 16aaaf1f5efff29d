use std::io::Write;

use clap::Parser;
use eyre::Result;
use gerifit_cli::args::{Args, Command, ConfigAction};
use gerifit_cli::commands;
use gerifit_cli::config::{default_config_path, load_or_default};
use gerifit_cli::intake::IntakeForm;
use gerifit_narrative::generator::TextGenerator;
use gerifit_storage::JsonFileRepository;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Init must work even when the existing file no longer parses.
    if let Command::Config {
        action: Some(ConfigAction::Init { force }),
    } = args.command
    {
        commands::config_init(&config_path, force, &mut out)?;
        return Ok(());
    }

    let config = load_or_default(&config_path)?;
    let today = jiff::Zoned::now().date();

    match args.command {
        Command::Intake {
            from,
            from_record,
            edits,
            dry_run,
        } => {
            let mut repo = JsonFileRepository::open(config.data_file.clone())?;
            let form = match (from, from_record) {
                (Some(path), _) => {
                    IntakeForm::from_assessment(commands::load_assessment_file(&path)?, today)
                }
                (None, Some(id)) => commands::reopen(&repo, &id, today)?,
                (None, None) => IntakeForm::new(today),
            };
            commands::intake(&mut repo, form, &edits, dry_run, &mut out)?;
        }
        Command::List => {
            let repo = JsonFileRepository::open(config.data_file.clone())?;
            commands::list(&repo, &mut out)?;
        }
        Command::Show { id } => {
            let repo = JsonFileRepository::open(config.data_file.clone())?;
            commands::show(&repo, &id, &mut out)?;
        }
        Command::Export {
            id,
            out: dir,
            markdown,
        } => {
            let repo = JsonFileRepository::open(config.data_file.clone())?;
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            commands::export(&repo, &config, &id, &dir, markdown, today, &mut out)?;
        }
        Command::Analyze { id } => {
            let repo = JsonFileRepository::open(config.data_file.clone())?;
            let generator = commands::narrative_generator(&config);
            let generator = generator.as_ref().map(|g| g as &dyn TextGenerator);
            commands::analyze(
                &repo,
                generator,
                &config.narrative.api_key_env,
                &id,
                &mut out,
            )
            .await?;
        }
        Command::Classify {
            rule,
            value,
            gender,
            age,
        } => commands::classify(&rule, value, gender.as_deref(), age, &mut out)?,
        Command::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show | ConfigAction::Init { .. } => {
                commands::config(&config_path, &config, &mut out)?
            }
            ConfigAction::Set { key, value } => {
                commands::config_set(&config_path, config, &key, &value, &mut out)?;
            }
        },
    }

    out.flush()?;
    Ok(())
}
