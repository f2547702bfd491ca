// Yandex Cloud Translate v2 adapter. Api-Key header auth, JSON bodies,
// gRPC-style numeric error codes, folder id in place of an app id.
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    TranslationResult, ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService, AUTO};
use crate::infrastructure::config::ServiceSettings;
use crate::infrastructure::network::http::send_json;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const ENDPOINT: &str = "https://translate.api.cloud.yandex.net/translate/v2";

pub struct YandexTranslate {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl YandexTranslate {
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

    fn folder_id(&self) -> &str {
        self.settings.app_id.as_deref().unwrap_or("")
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Api-Key {}", self.api_key()))
    }

    /// gRPC status codes folded into HTTP equivalents; unknown codes pass
    /// through with the raw message.
    fn map_error(status: u16, body: &serde_json::Value) -> (u16, String) {
        let code = body["code"].as_u64().unwrap_or(0);
        let raw = body["message"].as_str().unwrap_or("");
        let (mapped, message) = match code {
            3 => (400, "Invalid request arguments"),
            7 => (403, "Permission denied for this folder"),
            8 => (429, "Translation quota exhausted"),
            16 => (401, "The API key is invalid"),
            _ => {
                return (
                    status,
                    if raw.is_empty() {
                        format!("Request failed (HTTP {})", status)
                    } else {
                        raw.to_string()
                    },
                )
            }
        };
        (mapped, message.to_string())
    }
}

#[async_trait]
impl TranslationService for YandexTranslate {
    fn kind(&self) -> ProviderKind {
        ProviderKind::YandexTranslate
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        if self.api_key().is_empty() {
            return ValidationResult::missing_field("API key");
        }
        if self.folder_id().is_empty() {
            return ValidationResult::missing_field("Folder ID");
        }
        let request = self
            .authed(self.client.post(format!("{}/translate", ENDPOINT)))
            .json(&json!({
                "folderId": self.folder_id(),
                "texts": ["I"],
                "sourceLanguageCode": "en",
                "targetLanguageCode": "en",
            }));
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

        let mut payload = json!({
            "folderId": self.folder_id(),
            "texts": [text],
            "targetLanguageCode": to,
        });
        if from != AUTO {
            payload["sourceLanguageCode"] = json!(from);
        }
        let request = self
            .authed(self.client.post(format!("{}/translate", ENDPOINT)))
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

        let entry = &body["translations"][0];
        let detected = entry["detectedLanguageCode"].as_str().map(str::to_string);
        self.core.record(true);
        TranslationResult::success(entry["text"].as_str().unwrap_or("").to_string())
            .with_detected(detected)
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let request = self
            .authed(self.client.post(format!("{}/detect", ENDPOINT)))
            .json(&json!({"folderId": self.folder_id(), "text": text}));
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

        self.core.record(true);
        match body["languageCode"].as_str() {
            Some(language) => DetectionResult::success(vec![DetectedLanguage {
                language: language.to_string(),
                confidence: None,
            }]),
            None => DetectionResult::failure(500, "No language detected"),
        }
    }

    async fn get_languages(&self) -> LanguagesResult {
        if let Some(early) = self.core.languages_precheck() {
            return early;
        }
        let request = self
            .authed(self.client.post(format!("{}/languages", ENDPOINT)))
            .json(&json!({"folderId": self.folder_id()}));
        let (status, body) = match send_json("Languages fetch", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_languages(),
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            return LanguagesResult::failure(code, message);
        }

        let languages = body["languages"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        entry["code"].as_str().map(|code| LanguageEntry {
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
