//! Prompt builder for the narrative summary.
//!
//! The summary is read by Brazilian clinicians, so the instructions and the
//! data block are written in Portuguese.

use gerifit_core::derive::mean_handgrip;
use gerifit_core::models::assessment::{Assessment, Gender};
use gerifit_rules::assessment::classify_assessment;

/// Build the prompt sent to the model for `assessment`.
///
/// Contains the patient data, the raw measurements, and the automatic rule
/// classifications that are not neutral.
pub fn build_prompt(a: &Assessment) -> String {
    let gender = match a.gender {
        Gender::Male => "Masculino",
        Gender::Female => "Feminino",
        Gender::Unknown => "não informado",
    };
    let sit_to_stand = a
        .best_sit_to_stand()
        .map(|s| format!("{s}s"))
        .unwrap_or_else(|| "não realizado".to_string());

    let mut prompt = String::from(
        "Atue como um Fisioterapeuta Geriatra Especialista de nível sênior.\n\
         Analise os seguintes dados de uma avaliação físico-funcional de um idoso e forneça \
         um resumo clínico conciso, interpretação dos riscos (quedas, sarcopenia, dependência) \
         e 3 recomendações principais.\n\n",
    );

    prompt.push_str("Dados do Paciente:\n");
    prompt.push_str(&format!("- Nome: {}\n", a.name));
    prompt.push_str(&format!("- Idade: {} anos\n", a.age));
    prompt.push_str(&format!("- Gênero: {gender}\n\n"));

    prompt.push_str("Dados Clínicos:\n");
    prompt.push_str(&format!(
        "- IMC: {:.2} (Peso: {}kg, Altura: {}cm)\n",
        a.bmi, a.weight_kg, a.height_cm
    ));
    prompt.push_str(&format!("- % Gordura: {}%\n", a.body_fat_percentage));
    prompt.push_str(&format!(
        "- Força MMII (Levantar da cadeira): Melhor tempo {sit_to_stand}\n"
    ));
    prompt.push_str(&format!(
        "- Força Preensão Manual (Média): Direita {}kg, Esquerda {}kg\n",
        mean_handgrip(a.handgrip_right1, a.handgrip_right2),
        mean_handgrip(a.handgrip_left1, a.handgrip_left2),
    ));
    prompt.push_str(&format!("- TUG (Timed Up and Go): {}s\n", a.tug_seconds));
    prompt.push_str(&format!(
        "- Marcha estacionária (2 min): {} passos\n",
        a.two_min_step_count
    ));
    prompt.push_str(&format!("- Escala Katz (AVD): {}/6\n", a.katz_score));
    prompt.push_str(&format!("- Escala Lawton (AIVD): {}/27\n", a.lawton_score));

    let classified: Vec<_> = classify_assessment(a)
        .entries()
        .into_iter()
        .filter(|(_, c)| !c.is_neutral())
        .map(|(name, c)| format!("- {name}: {} ({})\n", c.label, c.status.as_str()))
        .collect();
    if !classified.is_empty() {
        prompt.push_str("\nClassificações automáticas (pontos de corte):\n");
        for line in classified {
            prompt.push_str(&line);
        }
    }

    if !a.notes.trim().is_empty() {
        prompt.push_str(&format!("\nObservações do avaliador: {}\n", a.notes.trim()));
    }

    prompt.push_str(
        "\nRetorne a resposta em formato Markdown, com tópicos claros. \
         Seja direto e profissional.\n",
    );
    prompt
}
