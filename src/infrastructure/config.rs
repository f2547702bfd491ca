use crate::domain::error::LingoError;
use crate::domain::model::ProviderKind;
use crate::migration::reconcile::{reconcile, reseed_languages};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Keys the reconciliation pass must never reseed from defaults.
/// Persisted values for these always win, and they are filtered out of
/// any default subtree copied wholesale into an older document.
pub const PROTECTED_KEYS: &[&str] = &["api_key", "app_id", "selected_languages"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Active provider, by settings key
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub notices: NoticeSettings,
    /// Per-provider settings, keyed by `ProviderKind::key()`
    #[serde(default = "default_services")]
    pub services: BTreeMap<String, ServiceSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Knobs for the rate-limited notice queue
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NoticeSettings {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_notice_max_pending")]
    pub max_pending: usize,
    #[serde(default = "default_notice_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_enable")]
    pub unique: bool,
    #[serde(default = "default_notice_timeout_ms")]
    pub timeout_ms: u64,
}

/// Validation tri-state persisted per provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Validated {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ServiceSettings {
    pub api_key: Option<String>,
    pub app_id: Option<String>,
    pub region: Option<String>,
    pub host: Option<String>,
    /// Model identifier for the chat-completion and local providers
    pub model: Option<String>,
    #[serde(default)]
    pub available_languages: Vec<String>,
    #[serde(default)]
    pub selected_languages: Vec<String>,
    #[serde(default)]
    pub validated: Validated,
    pub validated_at: Option<DateTime<Utc>>,
    /// Bumped whenever the shipped `available_languages` seed changes;
    /// reconciliation reseeds stale lists on load
    #[serde(default = "default_service_version")]
    pub version: u32,
    #[serde(default)]
    pub auto_translate: bool,
    #[serde(default = "default_auto_translate_interval_ms")]
    pub auto_translate_interval_ms: u64,
}

impl ServiceSettings {
    pub fn is_validated(&self) -> bool {
        self.validated == Validated::Valid
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self {
            enable: true,
            max_pending: default_notice_max_pending(),
            interval_ms: default_notice_interval_ms(),
            unique: true,
            timeout_ms: default_notice_timeout_ms(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            theme: default_theme(),
            enable_emoji: default_enable_emoji(),
            logging: Logging::default(),
            notices: NoticeSettings::default(),
            services: default_services(),
        }
    }
}

impl Settings {
    pub fn service(&self, kind: ProviderKind) -> ServiceSettings {
        self.services.get(kind.key()).cloned().unwrap_or_default()
    }

    pub fn service_mut(&mut self, kind: ProviderKind) -> &mut ServiceSettings {
        self.services.entry(kind.key().to_string()).or_default()
    }
}

// Defaults
fn default_provider() -> ProviderKind {
    ProviderKind::Dummy
}
fn default_theme() -> String {
    "plain".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_notice_max_pending() -> usize {
    5
}
fn default_notice_interval_ms() -> u64 {
    1000
}
fn default_notice_timeout_ms() -> u64 {
    4000
}
fn default_service_version() -> u32 {
    1
}
fn default_auto_translate_interval_ms() -> u64 {
    1200
}

fn seeded(version: u32, languages: &[&str]) -> ServiceSettings {
    ServiceSettings {
        version,
        available_languages: languages.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn default_services() -> BTreeMap<String, ServiceSettings> {
    let mut services = BTreeMap::new();
    for kind in ProviderKind::all() {
        services.insert(kind.key().to_string(), ServiceSettings::default());
    }

    // Providers with static upstream language lists ship a seed; the
    // version gates the reseed pass on load.
    services.insert(
        ProviderKind::BaiduTranslate.key().to_string(),
        seeded(
            2,
            &[
                "en", "zh", "zh-TW", "ja", "ko", "fr", "es", "th", "ar", "ru", "pt", "de", "it",
                "el", "nl", "pl", "bg", "et", "da", "fi", "cs", "ro", "sl", "sv", "hu", "vi",
            ],
        ),
    );
    services.insert(
        ProviderKind::YoudaoTranslate.key().to_string(),
        seeded(
            2,
            &[
                "en", "zh", "zh-TW", "ja", "ko", "fr", "es", "pt", "it", "ru", "vi", "de", "ar",
                "id", "hi",
            ],
        ),
    );
    services.insert(
        ProviderKind::FanyiQq.key().to_string(),
        seeded(
            2,
            &[
                "en", "zh", "zh-TW", "ja", "ko", "fr", "es", "it", "de", "tr", "ru", "pt", "vi",
                "id", "th", "ms",
            ],
        ),
    );

    let with_host = |host: &str| ServiceSettings {
        host: Some(host.to_string()),
        ..Default::default()
    };
    services.insert(
        ProviderKind::LibreTranslate.key().to_string(),
        with_host("https://libretranslate.com"),
    );
    services.insert(
        ProviderKind::LingvaTranslate.key().to_string(),
        with_host("https://lingva.ml"),
    );
    services.insert(
        ProviderKind::OpenaiTranslator.key().to_string(),
        with_host("https://api.openai.com"),
    );

    // Dummy needs no credentials, so it is born validated
    services.insert(
        ProviderKind::Dummy.key().to_string(),
        ServiceSettings {
            validated: Validated::Valid,
            ..Default::default()
        },
    );

    services
}

pub fn get_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lingo").join("settings.toml"))
}

/// Load the persisted settings document, reconciling it against the
/// shipped defaults before any provider is constructed.
pub fn load_settings() -> Result<Settings, LingoError> {
    let defaults = Settings::default();

    if let Some(path) = get_settings_path() {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match content.parse::<toml::Value>() {
                Ok(persisted) => return Ok(reconcile_settings(&defaults, persisted)?),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse settings file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(defaults)
}

/// defaults ⊕ persisted: forward-port new default keys, keep user data,
/// reseed stale language lists
pub fn reconcile_settings(
    defaults: &Settings,
    persisted: toml::Value,
) -> Result<Settings, LingoError> {
    let defaults_value = toml::Value::try_from(defaults)
        .map_err(|e| LingoError::Config(format!("Failed to serialize defaults: {}", e)))?;
    let mut merged = reconcile(&defaults_value, persisted, PROTECTED_KEYS);
    reseed_languages(&defaults_value, &mut merged);
    merged
        .try_into()
        .map_err(|e: toml::de::Error| LingoError::Config(format!("Invalid settings: {}", e)))
}

pub fn save_settings(settings: &Settings) -> Result<(), LingoError> {
    let path = get_settings_path()
        .ok_or_else(|| LingoError::Config("Cannot determine config directory".to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml_content = toml::to_string_pretty(settings)
        .map_err(|e| LingoError::Config(format!("Failed to serialize settings: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| LingoError::Config(format!("Failed to write settings file: {}", e)))?;
    Ok(())
}

pub fn generate_settings_sample() -> Result<(), LingoError> {
    if let Some(path) = get_settings_path() {
        if path.exists() {
            eprintln!("Settings file already exists at: {}", path.display());
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let sample = Settings::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| LingoError::Config(format!("Failed to serialize settings: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| LingoError::Config(format!("Failed to write settings file: {}", e)))?;
        println!("Generated settings file at: {}", path.display());
    } else {
        return Err(LingoError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }
    Ok(())
}
