// Chat-completion adapter. Translation rides in a natural-language
// prompt against any OpenAI-compatible host; auto-detection asks the
// model to emit the detected code on its own first line. That first-line
// protocol is best-effort by nature: a model that ignores the prompt
// format degrades to a plain translation with no detected language.
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    TranslationResult, ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService, AUTO};
use crate::infrastructure::config::ServiceSettings;
use crate::infrastructure::network::http::send_json;
use crate::infrastructure::providers::normalize_host;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const DEFAULT_MODEL: &str = "gpt-4o-mini";

// Languages the prompt path handles well; used when the user has not
// fetched or narrowed a list of their own.
const COMMON_LANGUAGES: &[&str] = &[
    "en", "zh", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "ar", "nl", "pl", "tr", "sv",
    "da", "fi", "no", "cs", "el", "he", "hi", "th", "vi", "id", "uk", "ro", "hu", "bg",
];

pub struct OpenaiTranslator {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl OpenaiTranslator {
    pub fn new(client: Client, settings: ServiceSettings) -> Self {
        let core = ProviderCore::new(settings.is_validated());
        Self {
            client,
            settings,
            core,
        }
    }

    fn api_key(&self) -> &str {
        self.settings.api_key.as_deref().unwrap_or("")
    }

    fn model(&self) -> &str {
        self.settings
            .model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    fn host(&self) -> String {
        self.settings
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .map(normalize_host)
            .unwrap_or_else(|| "https://api.openai.com".to_string())
    }

    fn prompt(from: &str, to: &str) -> String {
        if from == AUTO {
            format!(
                "You are a translation service. Translate the user's text into {}. \
                 On the first line output only the ISO 639-1 code of the detected \
                 source language, then the translation starting on the second line. \
                 Output nothing else.",
                to
            )
        } else {
            format!(
                "You are a translation service. Translate the user's text from {} \
                 into {}. Output only the translation, nothing else.",
                from, to
            )
        }
    }

    /// Split the model's reply at the first newline into (code, body).
    /// Falls back to treating the whole reply as the translation when the
    /// first line does not look like a language code.
    pub fn parse_autodetect_reply(content: &str) -> (Option<String>, String) {
        if let Some((first_line, rest)) = content.split_once('\n') {
            let code = first_line.trim();
            if !code.is_empty() && code.len() <= 8 && !code.contains(' ') {
                return (Some(code.to_lowercase()), rest.trim_start().to_string());
            }
        }
        (None, content.to_string())
    }

    fn map_error(status: u16, body: &serde_json::Value) -> (u16, String) {
        let raw = body["error"]["message"].as_str().unwrap_or("");
        let message = match status {
            401 => "The API key is invalid".to_string(),
            404 => "The requested model does not exist".to_string(),
            429 => "Rate limit or quota exceeded".to_string(),
            _ if raw.is_empty() => format!("Request failed (HTTP {})", status),
            _ => raw.to_string(),
        };
        (status, message)
    }

    async fn request_completion(&self, system: String, text: &str) -> Result<String, (u16, String)> {
        let request = self
            .client
            .post(format!("{}/v1/chat/completions", self.host()))
            .header("Authorization", format!("Bearer {}", self.api_key()))
            .json(&json!({
                "model": self.model(),
                "temperature": 0,
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": text},
                ],
            }));
        let (status, body) = match send_json("Translation", request).await {
            Ok(response) => response,
            Err(failure) => return Err((failure.status_code.unwrap_or(0), failure.message)),
        };
        if status != 200 {
            return Err(Self::map_error(status, &body));
        }
        Ok(body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}

#[async_trait]
impl TranslationService for OpenaiTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenaiTranslator
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        if self.api_key().is_empty() {
            return ValidationResult::missing_field("API key");
        }
        match self.request_completion(Self::prompt("en", "en"), "I").await {
            Ok(_) => ValidationResult::ok(),
            Err((0, message)) => ValidationResult {
                valid: false,
                status_code: None,
                message: Some(message),
                premium: None,
            },
            Err((status, message)) => ValidationResult::failure(status, message),
        }
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> TranslationResult {
        if let Some(early) = self.core.translate_precheck(text, to) {
            return early;
        }
        if from == to {
            return TranslationResult::success(text.to_string());
        }

        match self.request_completion(Self::prompt(from, to), text).await {
            Ok(content) => {
                self.core.record(true);
                if from == AUTO {
                    let (detected, translation) = Self::parse_autodetect_reply(&content);
                    TranslationResult::success(translation).with_detected(detected)
                } else {
                    TranslationResult::success(content)
                }
            }
            Err((status, message)) => {
                self.core.record(false);
                TranslationResult {
                    status_code: Some(status).filter(|s| *s != 0),
                    message: Some(message),
                    ..Default::default()
                }
            }
        }
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let probe = self.translate(text, AUTO, "en").await;
        match probe.detected_language {
            Some(language) => DetectionResult::success(vec![DetectedLanguage {
                language,
                confidence: None,
            }]),
            None => DetectionResult::failure(
                probe.status_code.unwrap_or(500),
                probe
                    .message
                    .unwrap_or_else(|| "The model did not report a language".to_string()),
            ),
        }
    }

    async fn get_languages(&self) -> LanguagesResult {
        if !self.settings.available_languages.is_empty() {
            return LanguagesResult::success(
                self.settings
                    .available_languages
                    .iter()
                    .map(LanguageEntry::code)
                    .collect(),
            );
        }
        LanguagesResult::success(COMMON_LANGUAGES.iter().map(|c| LanguageEntry::code(*c)).collect())
    }

    fn has_autodetect_capability(&self) -> bool {
        true
    }
}
