// Embedded language detector built on the whatlang classifier. A model
// manifest (allowlisted languages + descriptor metadata) is loaded
// asynchronously; until that load resolves the provider reports no
// autodetect capability so callers cannot race the loader.
use crate::domain::langcodes;
use crate::domain::model::{
    DetectedLanguage, DetectionResult, LanguageEntry, LanguagesResult, ProviderKind,
    ValidationResult,
};
use crate::domain::traits::{ProviderCore, TranslationService};
use crate::infrastructure::config::ServiceSettings;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::sync::RwLock;

/// Best-effort extractor for the panic text a trapped inference task
/// leaves in its join error. The raw string stays available as fallback.
static TRAP_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"panicked with message "([^"]+)""#).expect("valid regex"));

#[derive(Debug, Deserialize)]
struct ModelManifest {
    #[serde(default)]
    version: u32,
    languages: Vec<ModelLanguage>,
}

#[derive(Debug, Deserialize)]
struct ModelLanguage {
    /// ISO 639-3 code as the classifier emits it
    code: String,
    name: Option<String>,
    weight: Option<f32>,
}

enum ModelState {
    Unloaded,
    Ready {
        allowlist: Vec<whatlang::Lang>,
        languages: Vec<LanguageEntry>,
    },
    Failed(String),
}

pub struct FastTextDetector {
    settings: ServiceSettings,
    core: ProviderCore,
    model: RwLock<ModelState>,
}

impl FastTextDetector {
    pub fn new(settings: ServiceSettings) -> Self {
        Self {
            settings,
            // Never valid before the model load resolves
            core: ProviderCore::new(false),
            model: RwLock::new(ModelState::Unloaded),
        }
    }

    fn model_path(&self) -> Option<&str> {
        self.settings.model.as_deref().filter(|p| !p.is_empty())
    }

    fn fail_load(&self, message: String) -> ValidationResult {
        tracing::warn!(%message, "model load failed");
        *self.model.write().expect("model lock poisoned") = ModelState::Failed(message.clone());
        self.core.set_valid(false);
        ValidationResult::failure(500, message)
    }

    /// One-time asynchronous initialization gate. Distinct failure modes
    /// are kept apart: unset path, missing file, malformed manifest.
    pub async fn load(&self) -> ValidationResult {
        let path = match self.model_path() {
            Some(path) => path.to_string(),
            None => return self.fail_load("Model path was not specified".to_string()),
        };
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => return self.fail_load(format!("Model file not found: {} ({})", path, e)),
        };
        let manifest: ModelManifest = match serde_json::from_slice(&bytes) {
            Ok(manifest) => manifest,
            Err(e) => return self.fail_load(format!("Model file is malformed: {}", e)),
        };
        tracing::debug!(
            version = manifest.version,
            languages = manifest.languages.len(),
            "model manifest loaded"
        );

        let mut allowlist = Vec::new();
        let mut languages = Vec::new();
        for entry in manifest.languages {
            match whatlang::Lang::from_code(entry.code.as_str()) {
                Some(lang) => allowlist.push(lang),
                None => {
                    tracing::warn!(code = %entry.code, "unknown language code in model manifest");
                    continue;
                }
            }
            languages.push(LanguageEntry {
                code: langcodes::ISO639_3.to_standard(&entry.code).to_string(),
                name: entry.name,
                weight: entry.weight,
            });
        }
        if allowlist.is_empty() {
            return self.fail_load("Model manifest lists no usable languages".to_string());
        }

        *self.model.write().expect("model lock poisoned") = ModelState::Ready {
            allowlist,
            languages,
        };
        self.core.set_valid(true);
        ValidationResult::ok()
    }
}

#[async_trait]
impl TranslationService for FastTextDetector {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FasttextDetector
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    /// Faithful predictor of detect: succeeds iff the model is usable,
    /// loading it on first call.
    async fn validate(&self) -> ValidationResult {
        {
            let model = self.model.read().expect("model lock poisoned");
            match &*model {
                ModelState::Ready { .. } => return ValidationResult::ok(),
                ModelState::Failed(message) => {
                    return ValidationResult::failure(500, message.clone())
                }
                ModelState::Unloaded => {}
            }
        }
        self.load().await
    }

    async fn detect(&self, text: &str) -> DetectionResult {
        if let Some(early) = self.core.detect_precheck(text) {
            return early;
        }
        let allowlist = {
            let model = self.model.read().expect("model lock poisoned");
            match &*model {
                ModelState::Ready { allowlist, .. } => allowlist.clone(),
                ModelState::Failed(message) => return DetectionResult::failure(500, message.clone()),
                ModelState::Unloaded => {
                    return DetectionResult::failure(503, "Model is not loaded yet")
                }
            }
        };

        let sample = text.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            let detector = whatlang::Detector::with_allowlist(allowlist);
            detector
                .detect(&sample)
                .map(|info| (info.lang().code().to_string(), info.confidence() as f32))
        })
        .await;

        let detected = match outcome {
            Ok(detected) => detected,
            Err(join_error) => {
                // An inference trap is fatal to this provider instance only
                let raw = join_error.to_string();
                let message = TRAP_MESSAGE
                    .captures(&raw)
                    .and_then(|captures| captures.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or(raw);
                self.core.set_valid(false);
                self.core.record(false);
                return DetectionResult::failure(500, format!("Inference failed: {}", message));
            }
        };

        match detected {
            Some((code, confidence)) => {
                self.core.record(true);
                DetectionResult::success(vec![DetectedLanguage {
                    language: langcodes::ISO639_3.to_standard(&code).to_string(),
                    confidence: Some(confidence),
                }])
            }
            None => {
                self.core.record(false);
                DetectionResult::failure(400, "Language could not be determined")
            }
        }
    }

    async fn get_languages(&self) -> LanguagesResult {
        let model = self.model.read().expect("model lock poisoned");
        match &*model {
            ModelState::Ready { languages, .. } => LanguagesResult::success(languages.clone()),
            ModelState::Failed(message) => LanguagesResult::failure(500, message.clone()),
            ModelState::Unloaded => LanguagesResult::failure(503, "Model is not loaded yet"),
        }
    }

    fn has_autodetect_capability(&self) -> bool {
        matches!(
            &*self.model.read().expect("model lock poisoned"),
            ModelState::Ready { .. }
        )
    }
}
