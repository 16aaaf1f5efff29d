use std::sync::atomic::{AtomicUsize, Ordering};

use gerifit_core::models::assessment::{Assessment, Gender};
use gerifit_narrative::error::NarrativeError;
use gerifit_narrative::generator::{BoxFuture, TextGenerator};
use gerifit_narrative::summary::{
    EMPTY_RESPONSE_MESSAGE, REQUEST_FAILED_MESSAGE, SummaryOutcome, missing_credential_message,
    summarize,
};
use jiff::civil::date;

/// Replays a fixed result and counts calls.
struct Scripted {
    reply: fn() -> Result<String, NarrativeError>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(reply: fn() -> Result<String, NarrativeError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }
}

impl TextGenerator for Scripted {
    fn model(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>> {
        Box::pin(async move {
            assert!(prompt.contains("Dados do Paciente"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        })
    }
}

fn assessment() -> Assessment {
    let mut a = Assessment::new(date(2024, 5, 10));
    a.name = "Maria".to_string();
    a.gender = Gender::Female;
    a.age = 81;
    a
}

#[tokio::test]
async fn generated_text_is_returned_verbatim() {
    let generator = Scripted::new(|| Ok("## Resumo\nBaixo risco.".to_string()));
    let summary = summarize(Some(&generator as &dyn TextGenerator), "API_KEY", &assessment()).await;
    assert_eq!(summary.outcome, SummaryOutcome::Generated);
    assert_eq!(summary.text, "## Resumo\nBaixo risco.");
    assert!(summary.is_generated());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_generator_makes_no_request() {
    let summary = summarize(None, "API_KEY", &assessment()).await;
    assert_eq!(summary.outcome, SummaryOutcome::MissingCredential);
    assert_eq!(summary.text, "Erro: Chave de API não configurada (API_KEY).");
}

#[tokio::test]
async fn missing_credential_names_the_configured_variable() {
    let summary = summarize(None, "GEMINI_KEY", &assessment()).await;
    assert_eq!(summary.text, "Erro: Chave de API não configurada (GEMINI_KEY).");

    let generator = Scripted::new(|| Err(NarrativeError::MissingCredential("CLINIC_KEY".into())));
    let summary = summarize(Some(&generator as &dyn TextGenerator), "API_KEY", &assessment()).await;
    assert_eq!(summary.outcome, SummaryOutcome::MissingCredential);
    assert_eq!(summary.text, missing_credential_message("CLINIC_KEY"));
}

#[tokio::test]
async fn failure_is_attempted_once_and_replaced() {
    let generator = Scripted::new(|| Err(NarrativeError::Invocation("connection refused".into())));
    let summary = summarize(Some(&generator as &dyn TextGenerator), "API_KEY", &assessment()).await;
    assert_eq!(summary.outcome, SummaryOutcome::Failed);
    assert_eq!(summary.text, REQUEST_FAILED_MESSAGE);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_output_is_empty() {
    let generator = Scripted::new(|| Ok("   \n".to_string()));
    let summary = summarize(Some(&generator as &dyn TextGenerator), "API_KEY", &assessment()).await;
    assert_eq!(summary.outcome, SummaryOutcome::Empty);
    assert_eq!(summary.text, EMPTY_RESPONSE_MESSAGE);

    let generator = Scripted::new(|| Err(NarrativeError::EmptyResponse));
    let summary = summarize(Some(&generator as &dyn TextGenerator), "API_KEY", &assessment()).await;
    assert_eq!(summary.outcome, SummaryOutcome::Empty);
}
