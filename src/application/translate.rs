use crate::domain::model::{DetectionResult, LanguagesResult, TranslationResult, ValidationResult};
use crate::infrastructure::config::{save_settings, Validated};
use crate::state::AppState;
use chrono::Utc;

/// Translate through the active provider, queueing a rate-limited notice
/// when the call fails.
pub async fn translate_text(
    state: &AppState,
    text: &str,
    from: &str,
    to: &str,
) -> TranslationResult {
    let result = state.provider.translate(text, from, to).await;
    if !result.is_success() {
        notify_failure(state, result.message.as_deref()).await;
    }
    result
}

pub async fn detect_text(state: &AppState, text: &str) -> DetectionResult {
    let result = state.provider.detect(text).await;
    if !result.is_success() {
        notify_failure(state, result.message.as_deref()).await;
    }
    result
}

/// Run the provider's credential check, then persist the tri-state
/// outcome (and its timestamp) so the next process starts from it.
pub async fn validate_service(state: &AppState) -> ValidationResult {
    let outcome = state.provider.validate().await;
    state.provider.core().set_valid(outcome.valid);

    {
        let mut settings = state.settings.write().await;
        let service = settings.service_mut(state.provider.kind());
        service.validated = if outcome.valid {
            Validated::Valid
        } else {
            Validated::Invalid
        };
        service.validated_at = Some(Utc::now());
    }
    persist(state).await;
    outcome
}

/// Fetch the provider's language list; a successful fetch replaces the
/// stored `available_languages` so offline callers see the same list.
pub async fn fetch_languages(state: &AppState) -> LanguagesResult {
    let result = state.provider.get_languages().await;
    match &result.languages {
        Some(languages) => {
            let mut settings = state.settings.write().await;
            let service = settings.service_mut(state.provider.kind());
            service.available_languages = languages.iter().map(|l| l.code.clone()).collect();
            drop(settings);
            persist(state).await;
        }
        None => notify_failure(state, result.message.as_deref()).await,
    }
    result
}

async fn notify_failure(state: &AppState, message: Option<&str>) {
    let settings = state.settings.read().await;
    if !settings.notices.enable {
        return;
    }
    drop(settings);
    state.notices.notify(format!(
        "{}: {}",
        state.provider.kind().display_name(),
        message.unwrap_or("request failed")
    ));
}

async fn persist(state: &AppState) {
    let settings = state.settings.read().await;
    if let Err(e) = save_settings(&settings) {
        tracing::warn!(error = %e, "failed to persist settings");
    }
}
