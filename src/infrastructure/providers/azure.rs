// Azure Translator v3 adapter. Subscription-key header auth with an
// optional region header; detect returns a primary candidate plus
// alternatives; the languages endpoint needs no auth at all.
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

const ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";
const API_VERSION: &str = "3.0";

pub struct AzureTranslator {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl AzureTranslator {
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

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Ocp-Apim-Subscription-Key", self.api_key());
        match self.settings.region.as_deref() {
            Some(region) if !region.is_empty() => {
                request.header("Ocp-Apim-Subscription-Region", region)
            }
            _ => request,
        }
    }

    /// Azure's six-digit error codes map onto their leading HTTP triple;
    /// unknown codes pass through with the raw upstream message.
    fn map_error(status: u16, body: &serde_json::Value) -> (u16, String) {
        let code = body["error"]["code"].as_u64().unwrap_or(status as u64);
        let http = u16::try_from(code / 1000)
            .ok()
            .filter(|c| (100..=599).contains(c))
            .unwrap_or(status);
        let message = match code {
            400035 => "The source language is not valid".to_string(),
            400036 => "The target language is missing or not valid".to_string(),
            401000 => "The subscription key is invalid".to_string(),
            401003 => "The region does not match the subscription key".to_string(),
            403000 | 403001 => "The subscription has run out of free quota".to_string(),
            429000 | 429001 | 429002 => "Rate limit exceeded".to_string(),
            _ => match body["error"]["message"].as_str() {
                Some(raw) if !raw.is_empty() => raw.to_string(),
                _ => format!("Request failed (error {})", code),
            },
        };
        (http, message)
    }
}

#[async_trait]
impl TranslationService for AzureTranslator {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureTranslator
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        if self.api_key().is_empty() {
            return ValidationResult::missing_field("API key");
        }
        let request = self
            .authed(self.client.post(format!("{}/translate", ENDPOINT)))
            .query(&[("api-version", API_VERSION), ("from", "en"), ("to", "en")])
            .json(&json!([{"Text": "I"}]));
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

        let mut params = vec![("api-version", API_VERSION), ("to", to)];
        if from != AUTO {
            params.push(("from", from));
        }
        let request = self
            .authed(self.client.post(format!("{}/translate", ENDPOINT)))
            .query(&params)
            .json(&json!([{"Text": text}]));
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

        let entry = &body[0];
        let detected = entry["detectedLanguage"]["language"]
            .as_str()
            .map(str::to_string);
        self.core.record(true);
        TranslationResult::success(
            entry["translations"][0]["text"]
                .as_str()
                .unwrap_or("")
                .to_string(),
        )
        .with_detected(detected)
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let request = self
            .authed(self.client.post(format!("{}/detect", ENDPOINT)))
            .query(&[("api-version", API_VERSION)])
            .json(&json!([{"Text": text}]));
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

        // Primary candidate first, then the listed alternatives
        let entry = &body[0];
        let mut candidates = Vec::new();
        if let Some(language) = entry["language"].as_str() {
            candidates.push(DetectedLanguage {
                language: language.to_string(),
                confidence: entry["score"].as_f64().map(|c| c as f32),
            });
        }
        if let Some(alternatives) = entry["alternatives"].as_array() {
            for alternative in alternatives {
                if let Some(language) = alternative["language"].as_str() {
                    candidates.push(DetectedLanguage {
                        language: language.to_string(),
                        confidence: alternative["score"].as_f64().map(|c| c as f32),
                    });
                }
            }
        }
        self.core.record(true);
        DetectionResult::success(candidates)
    }

    async fn get_languages(&self) -> LanguagesResult {
        // No auth requirement on this endpoint, so no validity gate either
        let request = self
            .client
            .get(format!("{}/languages", ENDPOINT))
            .query(&[("api-version", API_VERSION), ("scope", "translation")]);
        let (status, body) = match send_json("Languages fetch", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_languages(),
        };
        if status != 200 {
            let (code, message) = Self::map_error(status, &body);
            return LanguagesResult::failure(code, message);
        }

        let languages = body["translation"]
            .as_object()
            .map(|entries| {
                entries
                    .iter()
                    .map(|(code, details)| LanguageEntry {
                        code: code.clone(),
                        name: details["name"].as_str().map(str::to_string),
                        weight: None,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn six_digit_codes_collapse_to_http_statuses() {
        let body = json!({"error": {"code": 401000, "message": "..."}});
        assert_eq!(
            AzureTranslator::map_error(401, &body),
            (401, "The subscription key is invalid".to_string())
        );
        let body = json!({"error": {"code": 429001, "message": "..."}});
        assert_eq!(AzureTranslator::map_error(429, &body).0, 429);
    }

    #[test]
    fn unknown_codes_keep_the_upstream_message() {
        let body = json!({"error": {"code": 503123, "message": "translator melting"}});
        assert_eq!(
            AzureTranslator::map_error(500, &body),
            (503, "translator melting".to_string())
        );
    }
}
