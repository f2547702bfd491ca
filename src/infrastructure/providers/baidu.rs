// Baidu Fanyi adapter. App-ID + key auth with MD5(appid+q+salt+key)
// request signing, a numeric error-code table, and a language-code
// dialect that needs the crosswalk in both directions.
use crate::domain::langcodes;
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    TranslationResult, ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService, AUTO};
use crate::infrastructure::config::ServiceSettings;
use crate::infrastructure::network::http::send_json;
use async_trait::async_trait;
use md5::{Digest, Md5};
use reqwest::Client;
use uuid::Uuid;

const ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

// Premium accounts unlock the minor-language tier; probing one of those
// pairs tells free and premium keys apart.
const PREMIUM_PROBE_TARGET: &str = "vie";

pub struct BaiduTranslate {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl BaiduTranslate {
    pub fn new(client: Client, settings: ServiceSettings) -> Self {
        let core = ProviderCore::new(settings.is_validated());
        Self {
            client,
            settings,
            core,
        }
    }

    fn app_id(&self) -> &str {
        self.settings.app_id.as_deref().unwrap_or("")
    }

    fn api_key(&self) -> &str {
        self.settings.api_key.as_deref().unwrap_or("")
    }

    /// sign = MD5(appid + q + salt + key)
    pub fn sign(app_id: &str, query: &str, salt: &str, key: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(format!("{}{}{}{}", app_id, query, salt, key));
        hex::encode(hasher.finalize())
    }

    /// Baidu's numeric error codes, mapped to HTTP-equivalent statuses.
    /// Codes absent from the table pass through with the raw message.
    fn map_error(body: &serde_json::Value) -> (u16, String) {
        let code = body["error_code"]
            .as_str()
            .and_then(|c| c.parse::<u32>().ok())
            .or_else(|| body["error_code"].as_u64().map(|c| c as u32))
            .unwrap_or(0);
        let (status, message) = match code {
            52001 => (408, "Request timed out, retry"),
            52002 => (500, "Upstream system error"),
            52003 => (401, "Unauthorized user, check the App ID"),
            54000 => (400, "A required parameter is missing"),
            54001 => (401, "Invalid signature, check the API key"),
            54003 => (429, "Access frequency limited"),
            54004 => (402, "Account balance insufficient"),
            54005 => (429, "Frequent long-text requests, slow down"),
            58000 => (403, "Client IP is not on the allowlist"),
            58001 => (400, "The language pair is not supported"),
            58002 => (503, "The translation service is disabled"),
            90107 => (401, "Certification not passed or not effective"),
            _ => {
                let raw = body["error_msg"].as_str().unwrap_or("Unknown error");
                return (u16::try_from(code).unwrap_or(500), raw.to_string());
            }
        };
        (status, message.to_string())
    }

    async fn request_translation(&self, text: &str, from: &str, to: &str) -> TranslationResult {
        let salt = Uuid::new_v4().simple().to_string();
        let sign = Self::sign(self.app_id(), text, &salt, self.api_key());
        let from = if from == AUTO {
            AUTO
        } else {
            langcodes::BAIDU.to_dialect(from)
        };
        let to_dialect = langcodes::BAIDU.to_dialect(to);
        let request = self.client.get(ENDPOINT).query(&[
            ("q", text),
            ("from", from),
            ("to", to_dialect),
            ("appid", self.app_id()),
            ("salt", &salt),
            ("sign", &sign),
        ]);
        let (_, body) = match send_json("Translation", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_translation(),
        };
        // Baidu answers 200 even on errors; the body's error_code decides
        if !body["error_code"].is_null() {
            let (status, message) = Self::map_error(&body);
            return TranslationResult::failure(status, message);
        }

        let translation = body["trans_result"]
            .as_array()
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(|line| line["dst"].as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();
        let detected = body["from"]
            .as_str()
            .map(|code| langcodes::BAIDU.to_standard(code).to_string());
        TranslationResult::success(translation).with_detected(detected)
    }
}

#[async_trait]
impl TranslationService for BaiduTranslate {
    fn kind(&self) -> ProviderKind {
        ProviderKind::BaiduTranslate
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    async fn validate(&self) -> ValidationResult {
        if self.app_id().is_empty() {
            return ValidationResult::missing_field("App ID");
        }
        if self.api_key().is_empty() {
            return ValidationResult::missing_field("API key");
        }
        let probe = self.request_translation("I", "en", "zh").await;
        if !probe.is_success() {
            return ValidationResult::failure(
                probe.status_code.unwrap_or(500),
                probe.message.unwrap_or_else(|| "Validation failed".to_string()),
            );
        }
        // Second probe against a premium-tier pair to classify the account
        let premium = self
            .request_translation("I", "en", PREMIUM_PROBE_TARGET)
            .await
            .is_success();
        ValidationResult {
            premium: Some(premium),
            ..ValidationResult::ok()
        }
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> TranslationResult {
        if let Some(early) = self.core.translate_precheck(text, to) {
            return early;
        }
        if from == to {
            return TranslationResult::success(text.to_string());
        }
        let result = self.request_translation(text, from, to).await;
        self.core.record(result.is_success());
        result
    }

    // No standalone detection endpoint; an auto-source probe translation
    // reports the detected language.
    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let probe = self.request_translation(text, AUTO, "en").await;
        self.core.record(probe.is_success());
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

    // The supported list is static upstream; it ships as a versioned seed
    // in the settings document instead of a remote fetch.
    async fn get_languages(&self) -> LanguagesResult {
        LanguagesResult::success(
            self.settings
                .available_languages
                .iter()
                .map(LanguageEntry::code)
                .collect(),
        )
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
    fn known_error_codes_map_to_http_statuses() {
        let body = json!({"error_code": "54003", "error_msg": "Invalid Access Limit"});
        assert_eq!(
            BaiduTranslate::map_error(&body),
            (429, "Access frequency limited".to_string())
        );

        let body = json!({"error_code": "58001", "error_msg": "..."});
        assert_eq!(BaiduTranslate::map_error(&body).0, 400);
    }

    #[test]
    fn unknown_error_codes_pass_through_raw() {
        let body = json!({"error_code": "777", "error_msg": "strange upstream state"});
        assert_eq!(
            BaiduTranslate::map_error(&body),
            (777, "strange upstream state".to_string())
        );
    }

    #[test]
    fn numeric_error_codes_are_accepted_too() {
        let body = json!({"error_code": 52003, "error_msg": "UNAUTHORIZED USER"});
        assert_eq!(BaiduTranslate::map_error(&body).0, 401);
    }
}
