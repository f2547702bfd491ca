use serde::{Deserialize, Serialize};

/// Outcome of a translate call
///
/// Expected failures (missing key, empty text, upstream error codes) are
/// carried in `status_code`/`message`, never as an `Err`. A missing
/// `status_code` means the call was not attempted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl TranslationResult {
    pub fn success(translation: String) -> Self {
        Self {
            status_code: Some(200),
            translation: Some(translation),
            ..Default::default()
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_detected(mut self, language: Option<String>) -> Self {
        self.detected_language = language;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Some(200)
    }
}

/// Outcome of a credentials/connectivity check
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            status_code: Some(200),
            ..Default::default()
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            status_code: Some(status_code),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Missing credential short-circuit, e.g. "API key was not specified"
    pub fn missing_field(field: &str) -> Self {
        Self::failure(400, format!("{} was not specified", field))
    }
}

/// A single language candidate from detection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DetectedLanguage {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Outcome of a detect call; candidates ordered by descending confidence
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_languages: Option<Vec<DetectedLanguage>>,
}

impl DetectionResult {
    pub fn success(mut candidates: Vec<DetectedLanguage>) -> Self {
        candidates.sort_by(|a, b| {
            b.confidence
                .unwrap_or(0.0)
                .partial_cmp(&a.confidence.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            status_code: Some(200),
            message: None,
            detected_languages: Some(candidates),
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            detected_languages: None,
        }
    }

    /// Best candidate, if any
    pub fn best(&self) -> Option<&DetectedLanguage> {
        self.detected_languages.as_ref().and_then(|c| c.first())
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Some(200)
    }
}

/// One entry of a provider's supported-language list
///
/// REST providers fill only `code`; the local provider attaches the
/// model descriptor fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LanguageEntry {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
}

impl LanguageEntry {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            weight: None,
        }
    }
}

/// Outcome of a get_languages call
#[derive(Debug, Clone, Default, Serialize)]
pub struct LanguagesResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageEntry>>,
}

impl LanguagesResult {
    pub fn success(languages: Vec<LanguageEntry>) -> Self {
        Self {
            status_code: Some(200),
            message: None,
            languages: Some(languages),
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: Some(message.into()),
            languages: None,
        }
    }
}

/// Which translation service is active
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Dummy,
    GoogleTranslate,
    AzureTranslator,
    Deepl,
    YandexTranslate,
    BaiduTranslate,
    YoudaoTranslate,
    FanyiQq,
    LibreTranslate,
    LingvaTranslate,
    OpenaiTranslator,
    FasttextDetector,
}

impl ProviderKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Dummy => "Dummy",
            ProviderKind::GoogleTranslate => "Google Translate",
            ProviderKind::AzureTranslator => "Azure Translator",
            ProviderKind::Deepl => "DeepL",
            ProviderKind::YandexTranslate => "Yandex Translate",
            ProviderKind::BaiduTranslate => "Baidu Translate",
            ProviderKind::YoudaoTranslate => "Youdao Translate",
            ProviderKind::FanyiQq => "Fanyi QQ",
            ProviderKind::LibreTranslate => "Libre Translate",
            ProviderKind::LingvaTranslate => "Lingva Translate",
            ProviderKind::OpenaiTranslator => "OpenAI Translator",
            ProviderKind::FasttextDetector => "FastText Detector",
        }
    }

    /// Settings-table key, doubles as the CLI `--provider` value
    pub fn key(&self) -> &'static str {
        match self {
            ProviderKind::Dummy => "dummy",
            ProviderKind::GoogleTranslate => "google_translate",
            ProviderKind::AzureTranslator => "azure_translator",
            ProviderKind::Deepl => "deepl",
            ProviderKind::YandexTranslate => "yandex_translate",
            ProviderKind::BaiduTranslate => "baidu_translate",
            ProviderKind::YoudaoTranslate => "youdao_translate",
            ProviderKind::FanyiQq => "fanyi_qq",
            ProviderKind::LibreTranslate => "libre_translate",
            ProviderKind::LingvaTranslate => "lingva_translate",
            ProviderKind::OpenaiTranslator => "openai_translator",
            ProviderKind::FasttextDetector => "fasttext_detector",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ProviderKind::all().iter().copied().find(|k| k.key() == key)
    }

    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::Dummy,
            ProviderKind::GoogleTranslate,
            ProviderKind::AzureTranslator,
            ProviderKind::Deepl,
            ProviderKind::YandexTranslate,
            ProviderKind::BaiduTranslate,
            ProviderKind::YoudaoTranslate,
            ProviderKind::FanyiQq,
            ProviderKind::LibreTranslate,
            ProviderKind::LingvaTranslate,
            ProviderKind::OpenaiTranslator,
            ProviderKind::FasttextDetector,
        ]
    }
}
