// Lingva adapter. Self-hosted path-encoded GET API with no auth beyond
// the host itself.
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    TranslationResult, ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService, AUTO};
use crate::infrastructure::config::ServiceSettings;
use crate::infrastructure::network::http::send_json;
use crate::infrastructure::providers::normalize_host;
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

pub struct LingvaTranslate {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl LingvaTranslate {
    pub fn new(client: Client, settings: ServiceSettings) -> Self {
        let core = ProviderCore::new(settings.is_validated());
        Self {
            client,
            settings,
            core,
        }
    }

    fn host(&self) -> Option<String> {
        self.settings
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .map(normalize_host)
    }

    fn translate_url(host: &str, from: &str, to: &str, text: &str) -> String {
        format!(
            "{}/api/v1/{}/{}/{}",
            host,
            from,
            to,
            utf8_percent_encode(text, NON_ALPHANUMERIC)
        )
    }

    fn map_error(status: u16, body: &serde_json::Value) -> (u16, String) {
        let message = match body["error"].as_str() {
            Some(raw) if !raw.is_empty() => raw.to_string(),
            _ => format!("Request failed (HTTP {})", status),
        };
        (status, message)
    }
}

#[async_trait]
impl TranslationService for LingvaTranslate {
    fn kind(&self) -> ProviderKind {
        ProviderKind::LingvaTranslate
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        let host = match self.host() {
            Some(host) => host,
            None => return ValidationResult::missing_field("Host"),
        };
        let request = self.client.get(Self::translate_url(&host, "en", "es", "I"));
        let (status, body) = match send_json("Validation", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_validation(),
        };
        if status == 200 {
            ValidationResult::ok()
        } else {
            let (code, message) = Self::map_error(status, &body);
            ValidationResult::failure(code, message)
        }
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> TranslationResult {
        if let Some(early) = self.core.translate_precheck(text, to) {
            return early;
        }
        if from == to {
            return TranslationResult::success(text.to_string());
        }
        let host = match self.host() {
            Some(host) => host,
            None => return TranslationResult::failure(400, "Host was not specified"),
        };

        let request = self.client.get(Self::translate_url(&host, from, to, text));
        let (status, body) = match send_json("Translation", request).await {
            Ok(response) => response,
            Err(failure) => {
                self.core.record(false);
                return failure.into_translation();
            }
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            self.core.record(false);
            return TranslationResult::failure(code, message);
        }

        let detected = body["info"]["detectedSource"].as_str().map(str::to_string);
        self.core.record(true);
        TranslationResult::success(body["translation"].as_str().unwrap_or("").to_string())
            .with_detected(detected)
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
                    .unwrap_or_else(|| "No language detected".to_string()),
            ),
        }
    }

    async fn get_languages(&self) -> LanguagesResult {
        let host = match self.host() {
            Some(host) => host,
            None => return LanguagesResult::failure(400, "Host was not specified"),
        };
        let request = self.client.get(format!("{}/api/v1/languages", host));
        let (status, body) = match send_json("Languages fetch", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_languages(),
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            return LanguagesResult::failure(code, message);
        }

        // Filter the synthetic "auto" detection entry out of the list
        let languages = body["languages"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        entry["code"]
                            .as_str()
                            .filter(|code| *code != AUTO)
                            .map(|code| LanguageEntry {
                                code: code.to_string(),
                                name: entry["name"].as_str().map(str::to_string),
                                weight: None,
                            })
                    })
                    .collect()
            })
            .unwrap_or_default();
        LanguagesResult::success(languages)
    }

    fn has_autodetect_capability(&self) -> bool {
        true
    }
}
