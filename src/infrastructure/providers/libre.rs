// LibreTranslate adapter. Self-hosted: the host string comes from the
// user and gets normalized; the API key is optional depending on the
// instance's configuration.
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

pub struct LibreTranslate {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl LibreTranslate {
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

    fn with_key(&self, mut payload: serde_json::Value) -> serde_json::Value {
        if let Some(key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) {
            payload["api_key"] = json!(key);
        }
        payload
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
impl TranslationService for LibreTranslate {
    fn kind(&self) -> ProviderKind {
        ProviderKind::LibreTranslate
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        let host = match self.host() {
            Some(host) => host,
            None => return ValidationResult::missing_field("Host"),
        };
        let payload = self.with_key(json!({"q": "I", "source": "en", "target": "es"}));
        let request = self
            .client
            .post(format!("{}/translate", host))
            .json(&payload);
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

        let payload = self.with_key(json!({"q": text, "source": from, "target": to}));
        let request = self
            .client
            .post(format!("{}/translate", host))
            .json(&payload);
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

        let detected = body["detectedLanguage"]["language"]
            .as_str()
            .map(str::to_string);
        self.core.record(true);
        TranslationResult::success(body["translatedText"].as_str().unwrap_or("").to_string())
            .with_detected(detected)
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let host = match self.host() {
            Some(host) => host,
            None => return DetectionResult::failure(400, "Host was not specified"),
        };

        let payload = self.with_key(json!({"q": text}));
        let request = self.client.post(format!("{}/detect", host)).json(&payload);
        let (status, body) = match send_json("Detection", request).await {
            Ok(response) => response,
            Err(failure) => {
                self.core.record(false);
                return failure.into_detection();
            }
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            self.core.record(false);
            return DetectionResult::failure(code, message);
        }

        // Instance reports confidence as a 0-100 percentage
        let candidates = body
            .as_array()
            .map(|detections| {
                detections
                    .iter()
                    .filter_map(|d| {
                        d["language"].as_str().map(|language| DetectedLanguage {
                            language: language.to_string(),
                            confidence: d["confidence"].as_f64().map(|c| (c / 100.0) as f32),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.core.record(true);
        DetectionResult::success(candidates)
    }

    async fn get_languages(&self) -> LanguagesResult {
        let host = match self.host() {
            Some(host) => host,
            None => return LanguagesResult::failure(400, "Host was not specified"),
        };
        let request = self.client.get(format!("{}/languages", host));
        let (status, body) = match send_json("Languages fetch", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_languages(),
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            return LanguagesResult::failure(code, message);
        }

        // The synthetic "auto" entry is a detection sentinel, not a language
        let languages = body
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
