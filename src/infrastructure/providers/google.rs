// Google Cloud Translation v2 adapter. API-key query-parameter auth,
// separate endpoints for translate/detect/languages.
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    TranslationResult, ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService, AUTO};
use crate::infrastructure::config::ServiceSettings;
use crate::infrastructure::network::http::send_json;
use async_trait::async_trait;
use reqwest::Client;

const ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

pub struct GoogleTranslate {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl GoogleTranslate {
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

    /// Closed error mapping; unmapped codes pass through with the raw
    /// upstream message.
    fn map_error(status: u16, body: &serde_json::Value) -> (u16, String) {
        let code = body["error"]["code"]
            .as_u64()
            .map(|c| c as u16)
            .unwrap_or(status);
        let raw = body["error"]["message"].as_str().unwrap_or("");
        match code {
            400 => (400, "Bad request, the API key is likely malformed".to_string()),
            403 => (403, "The API key is invalid or lacks permission".to_string()),
            429 => (429, "Translation quota exceeded".to_string()),
            _ if raw.is_empty() => (code, format!("Request failed (HTTP {})", code)),
            _ => (code, raw.to_string()),
        }
    }
}

#[async_trait]
impl TranslationService for GoogleTranslate {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GoogleTranslate
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        if self.api_key().is_empty() {
            return ValidationResult::missing_field("API key");
        }
        // Exercises the exact credential/host path translate uses
        let request = self.client.post(ENDPOINT).query(&[
            ("key", self.api_key()),
            ("q", "I"),
            ("source", "en"),
            ("target", "en"),
            ("format", "text"),
        ]);
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

        let mut params = vec![
            ("key", self.api_key()),
            ("q", text),
            ("target", to),
            ("format", "text"),
        ];
        if from != AUTO {
            params.push(("source", from));
        }
        let request = self.client.post(ENDPOINT).query(&params);
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

        let entry = &body["data"]["translations"][0];
        let detected = entry["detectedSourceLanguage"].as_str().map(str::to_string);
        self.core.record(true);
        TranslationResult::success(entry["translatedText"].as_str().unwrap_or("").to_string())
            .with_detected(detected)
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let request = self
            .client
            .post(format!("{}/detect", ENDPOINT))
            .query(&[("key", self.api_key()), ("q", text)]);
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

        let candidates = body["data"]["detections"][0]
            .as_array()
            .map(|detections| {
                detections
                    .iter()
                    .filter_map(|d| {
                        d["language"].as_str().map(|language| DetectedLanguage {
                            language: language.to_string(),
                            confidence: d["confidence"].as_f64().map(|c| c as f32),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.core.record(true);
        DetectionResult::success(candidates)
    }

    async fn get_languages(&self) -> LanguagesResult {
        if let Some(early) = self.core.languages_precheck() {
            return early;
        }
        let request = self
            .client
            .get(format!("{}/languages", ENDPOINT))
            .query(&[("key", self.api_key()), ("target", "en")]);
        let (status, body) = match send_json("Languages fetch", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_languages(),
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            return LanguagesResult::failure(code, message);
        }

        let languages = body["data"]["languages"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        entry["language"].as_str().map(|code| LanguageEntry {
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
