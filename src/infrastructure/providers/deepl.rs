// DeepL v2 adapter. Key-suffix routing between the free and pro hosts,
// and DeepL's regional uppercase target codes (`EN-GB` vs standard `en`).
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

const FREE_KEY_SUFFIX: &str = ":fx";

pub struct Deepl {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl Deepl {
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

    fn is_free_tier(&self) -> bool {
        self.api_key().ends_with(FREE_KEY_SUFFIX)
    }

    fn host(&self) -> &'static str {
        if self.is_free_tier() {
            "https://api-free.deepl.com"
        } else {
            "https://api.deepl.com"
        }
    }

    /// Standard code → DeepL target dialect. DeepL insists on uppercase
    /// and on regional variants where the bare code is deprecated.
    pub fn to_deepl_target(code: &str) -> String {
        match code {
            "en" => "EN-GB".to_string(),
            "pt" => "PT-PT".to_string(),
            other => other.to_uppercase(),
        }
    }

    /// DeepL code → standard space (drop the region, lowercase)
    pub fn from_deepl(code: &str) -> String {
        code.split('-').next().unwrap_or(code).to_lowercase()
    }

    fn map_error(status: u16, body: &serde_json::Value) -> (u16, String) {
        let raw = body["message"].as_str().unwrap_or("");
        let message = match status {
            403 => "The API key is invalid".to_string(),
            456 => "Translation quota exceeded".to_string(),
            429 => "Too many requests, slow down".to_string(),
            _ if raw.is_empty() => format!("Request failed (HTTP {})", status),
            _ => raw.to_string(),
        };
        (status, message)
    }
}

#[async_trait]
impl TranslationService for Deepl {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Deepl
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        if self.api_key().is_empty() {
            return ValidationResult::missing_field("API key");
        }
        let request = self
            .client
            .post(format!("{}/v2/translate", self.host()))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key()))
            .json(&json!({"text": ["I"], "target_lang": "EN-GB"}));
        let (status, body) = match send_json("Validation", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_validation(),
        };
        if status == 200 {
            ValidationResult {
                premium: Some(!self.is_free_tier()),
                ..ValidationResult::ok()
            }
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
            "text": [text],
            "target_lang": Self::to_deepl_target(to),
        });
        if from != AUTO {
            payload["source_lang"] = json!(from.to_uppercase());
        }
        let request = self
            .client
            .post(format!("{}/v2/translate", self.host()))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key()))
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
        let detected = entry["detected_source_language"]
            .as_str()
            .map(Self::from_deepl);
        self.core.record(true);
        TranslationResult::success(entry["text"].as_str().unwrap_or("").to_string())
            .with_detected(detected)
    }

    // DeepL has no standalone detection endpoint; a probe translation
    // carries the detected source language instead.
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
        if let Some(early) = self.core.languages_precheck() {
            return early;
        }
        let request = self
            .client
            .get(format!("{}/v2/languages", self.host()))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key()))
            .query(&[("type", "target")]);
        let (status, body) = match send_json("Languages fetch", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_languages(),
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            return LanguagesResult::failure(code, message);
        }

        let mut languages: Vec<LanguageEntry> = body
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        entry["language"].as_str().map(|code| LanguageEntry {
                            code: Self::from_deepl(code),
                            name: entry["name"].as_str().map(str::to_string),
                            weight: None,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        // Regional variants collapse onto one standard code
        languages.dedup_by(|a, b| a.code == b.code);
        LanguagesResult::success(languages)
    }

    fn has_autodetect_capability(&self) -> bool {
        true
    }
}
