// Youdao adapter. App-ID + key auth with the v3 SHA-256 signature over a
// truncated input, a long numeric error-code table, and the zh-CHS
// dialect crosswalk.
use crate::domain::langcodes;
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    TranslationResult, ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService, AUTO};
use crate::infrastructure::config::ServiceSettings;
use crate::infrastructure::network::http::send_json;
use async_trait::async_trait;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const ENDPOINT: &str = "https://openapi.youdao.com/api";

pub struct YoudaoTranslate {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl YoudaoTranslate {
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

    /// Input term of the v3 signature: texts over 20 characters are
    /// folded to `first10 + length + last10`.
    pub fn sign_input(query: &str) -> String {
        let chars: Vec<char> = query.chars().collect();
        if chars.len() <= 20 {
            return query.to_string();
        }
        format!(
            "{}{}{}",
            chars[..10].iter().collect::<String>(),
            chars.len(),
            chars[chars.len() - 10..].iter().collect::<String>()
        )
    }

    /// sign = SHA-256(appKey + input + salt + curtime + appSecret)
    pub fn sign(app_id: &str, query: &str, salt: &str, curtime: &str, key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!(
            "{}{}{}{}{}",
            app_id,
            Self::sign_input(query),
            salt,
            curtime,
            key
        ));
        hex::encode(hasher.finalize())
    }

    /// Youdao's numeric error codes; unmapped codes pass through raw.
    fn map_error(code: &str) -> (u16, String) {
        let (status, message) = match code {
            "101" => (400, "Missing required parameter"),
            "102" => (400, "Unsupported language type"),
            "103" => (413, "Text too long"),
            "104" => (400, "Unsupported API type"),
            "105" => (400, "Unsupported signature type"),
            "106" => (400, "Unsupported response type"),
            "107" => (400, "Unsupported transmission encryption type"),
            "108" => (401, "Invalid appKey or signature error"),
            "109" => (400, "Invalid batchLog format"),
            "110" => (403, "No related service for this account"),
            "111" => (403, "Developer account is abnormal"),
            "201" => (401, "Decryption failed, check the API key"),
            "202" => (401, "Missing signature"),
            "203" => (401, "Signature verification failed"),
            "301" => (500, "Dictionary query failed"),
            "302" => (500, "Translation query failed"),
            "303" => (503, "Server-side exception"),
            "401" => (402, "Account balance insufficient"),
            "411" => (429, "Access frequency limited"),
            _ => {
                return (
                    code.parse::<u16>().unwrap_or(500),
                    format!("Youdao error {}", code),
                )
            }
        };
        (status, message.to_string())
    }

    async fn request_translation(&self, text: &str, from: &str, to: &str) -> TranslationResult {
        let salt = Uuid::new_v4().to_string();
        let curtime = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(e) => return TranslationResult::failure(500, format!("Clock error: {}", e)),
        };
        let sign = Self::sign(self.app_id(), text, &salt, &curtime, self.api_key());
        let from = if from == AUTO {
            AUTO
        } else {
            langcodes::YOUDAO.to_dialect(from)
        };
        let to_dialect = langcodes::YOUDAO.to_dialect(to);
        let request = self.client.get(ENDPOINT).query(&[
            ("q", text),
            ("from", from),
            ("to", to_dialect),
            ("appKey", self.app_id()),
            ("salt", &salt),
            ("sign", &sign),
            ("signType", "v3"),
            ("curtime", &curtime),
        ]);
        let (_, body) = match send_json("Translation", request).await {
            Ok(response) => response,
            Err(failure) => return failure.into_translation(),
        };
        let error_code = body["errorCode"].as_str().unwrap_or("0");
        if error_code != "0" {
            let (status, message) = Self::map_error(error_code);
            return TranslationResult::failure(status, message);
        }

        let translation = body["translation"]
            .as_array()
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(|line| line.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();
        // "l" is the resolved pair, e.g. "zh-CHS2en"
        let detected = body["l"]
            .as_str()
            .and_then(|pair| pair.split_once('2'))
            .map(|(source, _)| langcodes::YOUDAO.to_standard(source).to_string());
        TranslationResult::success(translation).with_detected(detected)
    }
}

#[async_trait]
impl TranslationService for YoudaoTranslate {
    fn kind(&self) -> ProviderKind {
        ProviderKind::YoudaoTranslate
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
        if probe.is_success() {
            ValidationResult::ok()
        } else {
            ValidationResult::failure(
                probe.status_code.unwrap_or(500),
                probe.message.unwrap_or_else(|| "Validation failed".to_string()),
            )
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

    #[test]
    fn known_error_codes_map_to_http_statuses() {
        assert_eq!(
            YoudaoTranslate::map_error("108"),
            (401, "Invalid appKey or signature error".to_string())
        );
        assert_eq!(YoudaoTranslate::map_error("411").0, 429);
        assert_eq!(YoudaoTranslate::map_error("401").0, 402);
    }

    #[test]
    fn unknown_error_codes_pass_through_raw() {
        assert_eq!(
            YoudaoTranslate::map_error("999"),
            (999, "Youdao error 999".to_string())
        );
        // non-numeric codes fall back to a server-side status
        assert_eq!(YoudaoTranslate::map_error("weird").0, 500);
    }
}
