use gerifit_core::models::assessment::Assessment;
use serde::Serialize;
use tracing::{error, warn};

use crate::error::NarrativeError;
use crate::generator::TextGenerator;
use crate::prompt::build_prompt;

pub const REQUEST_FAILED_MESSAGE: &str =
    "Erro ao conectar com a IA para análise. Verifique sua conexão ou chave de API.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Não foi possível gerar a análise.";

/// Shown when the API key variable `var` is unset, e.g.
/// `Erro: Chave de API não configurada (API_KEY).`
pub fn missing_credential_message(var: &str) -> String {
    format!("Erro: Chave de API não configurada ({var}).")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOutcome {
    Generated,
    /// No generator was configured; no request was made.
    MissingCredential,
    Failed,
    Empty,
}

/// Text to show the user, and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub text: String,
    pub outcome: SummaryOutcome,
}

impl Summary {
    fn fallback(outcome: SummaryOutcome, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.outcome == SummaryOutcome::Generated
    }
}

/// Request a narrative summary of `assessment`, never failing.
///
/// A single attempt. `None` for `generator` means the key variable
/// `api_key_env` is unset. Every failure is turned into a fixed message
/// for the user.
pub async fn summarize(
    generator: Option<&dyn TextGenerator>,
    api_key_env: &str,
    assessment: &Assessment,
) -> Summary {
    let Some(generator) = generator else {
        warn!(var = %api_key_env, "narrative requested without an API key");
        return Summary::fallback(
            SummaryOutcome::MissingCredential,
            missing_credential_message(api_key_env),
        );
    };

    let prompt = build_prompt(assessment);
    match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => Summary {
            text,
            outcome: SummaryOutcome::Generated,
        },
        Ok(_) | Err(NarrativeError::EmptyResponse) => {
            warn!(model = generator.model(), "model returned an empty narrative");
            Summary::fallback(SummaryOutcome::Empty, EMPTY_RESPONSE_MESSAGE)
        }
        Err(NarrativeError::MissingCredential(var)) => {
            warn!(var = %var, "narrative generator reported a missing API key");
            Summary::fallback(
                SummaryOutcome::MissingCredential,
                missing_credential_message(&var),
            )
        }
        Err(e) => {
            error!(model = generator.model(), error = %e, "narrative request failed");
            Summary::fallback(SummaryOutcome::Failed, REQUEST_FAILED_MESSAGE)
        }
    }
}
