// Fanyi QQ (Tencent) adapter. App-ID + key auth with MD5 signing, and a
// transparent English-pivot fallback when the direct language pair is
// not supported upstream.
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

const ENDPOINT: &str = "https://fanyi.qq.com/api/translate";
const PIVOT_LANGUAGE: &str = "en";
const ERR_UNSUPPORTED_PAIR: u32 = 1001;

pub struct FanyiQq {
    client: Client,
    settings: ServiceSettings,
    core: ProviderCore,
}

impl FanyiQq {
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

    /// sign = MD5(appid + sourceText + salt + key)
    pub fn sign(app_id: &str, text: &str, salt: &str, key: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(format!("{}{}{}{}", app_id, text, salt, key));
        hex::encode(hasher.finalize())
    }

    fn map_error(code: u32, body: &serde_json::Value) -> (u16, String) {
        let (status, message) = match code {
            ERR_UNSUPPORTED_PAIR => (400, "The language pair is not supported"),
            1002 => (413, "Text too long"),
            1003 => (401, "Invalid App ID"),
            1004 => (401, "Signature verification failed"),
            1010 => (429, "Access frequency limited"),
            1050 => (500, "Upstream service error"),
            _ => {
                let raw = body["errMsg"].as_str().unwrap_or("Unknown error");
                return (u16::try_from(code).unwrap_or(500), raw.to_string());
            }
        };
        (status, message.to_string())
    }

    /// One direct wire call; the raw upstream code rides along so the
    /// caller can recognize the unsupported-pair case.
    async fn request_translation(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> (TranslationResult, Option<u32>) {
        let salt = Uuid::new_v4().simple().to_string();
        let sign = Self::sign(self.app_id(), text, &salt, self.api_key());
        let request = self.client.get(ENDPOINT).query(&[
            ("sourceText", text),
            ("source", from),
            ("target", to),
            ("appid", self.app_id()),
            ("salt", &salt),
            ("sign", &sign),
        ]);
        let (_, body) = match send_json("Translation", request).await {
            Ok(response) => response,
            Err(failure) => return (failure.into_translation(), None),
        };
        let err_code = body["errCode"].as_u64().unwrap_or(0) as u32;
        if err_code != 0 {
            let (status, message) = Self::map_error(err_code, &body);
            return (TranslationResult::failure(status, message), Some(err_code));
        }

        let translation = body["data"]["targetText"].as_str().unwrap_or("").to_string();
        let detected = body["data"]["source"].as_str().map(str::to_string);
        (
            TranslationResult::success(translation).with_detected(detected),
            None,
        )
    }

    /// source→en→target. Costs two wire calls by design; the first leg's
    /// detected language is surfaced on the final result.
    async fn pivot_translation(&self, text: &str, from: &str, to: &str) -> TranslationResult {
        tracing::debug!(from, to, "direct pair unsupported, pivoting through English");
        let (first_leg, _) = self.request_translation(text, from, PIVOT_LANGUAGE).await;
        if !first_leg.is_success() {
            return first_leg;
        }
        let intermediate = first_leg.translation.clone().unwrap_or_default();
        let (second_leg, _) = self
            .request_translation(&intermediate, PIVOT_LANGUAGE, to)
            .await;
        if !second_leg.is_success() {
            return second_leg;
        }
        second_leg.with_detected(
            first_leg
                .detected_language
                .or_else(|| Some(from.to_string()).filter(|f| f.as_str() != AUTO)),
        )
    }
}

#[async_trait]
impl TranslationService for FanyiQq {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FanyiQq
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
        let (probe, _) = self.request_translation("I", "en", "zh").await;
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

        let (direct, err_code) = self.request_translation(text, from, to).await;
        let result = if err_code == Some(ERR_UNSUPPORTED_PAIR)
            && from != PIVOT_LANGUAGE
            && to != PIVOT_LANGUAGE
        {
            self.pivot_translation(text, from, to).await
        } else {
            direct
        };
        self.core.record(result.is_success());
        result
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let (probe, _) = self.request_translation(text, AUTO, "zh").await;
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
