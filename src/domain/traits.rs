use crate::domain::model::{
    DetectionResult, LanguagesResult, ProviderKind, TranslationResult, ValidationResult,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Sentinel source language requesting combined detect+translate
pub const AUTO: &str = "auto";

/// Shared bookkeeping every provider adapter carries
///
/// The validity flag gates whether calls are attempted at all; the
/// counters track completed wire calls (precondition short-circuits do
/// not count). Plain atomic increments, interleaving breaks no invariant.
pub struct ProviderCore {
    valid: AtomicBool,
    success_count: AtomicU64,
    failure_count: AtomicU64,
}

impl ProviderCore {
    pub fn new(valid: bool) -> Self {
        Self {
            valid: AtomicBool::new(valid),
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Relaxed)
    }

    pub fn set_valid(&self, valid: bool) {
        self.valid.store(valid, Ordering::Relaxed);
    }

    /// Bump the counters once per completed call, after the outcome is known
    pub fn record(&self, success: bool) {
        if success {
            self.success_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn successes(&self) -> u64 {
        self.success_count.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Precondition gates for translate, checked in contract order.
    /// `Some` carries the short-circuit failure; no network was touched.
    pub fn translate_precheck(&self, text: &str, to: &str) -> Option<TranslationResult> {
        if !self.is_valid() {
            return Some(TranslationResult::failure(400, "Service is not validated"));
        }
        if text.trim().is_empty() {
            return Some(TranslationResult::failure(400, "No text was provided"));
        }
        if to.is_empty() {
            return Some(TranslationResult::failure(
                400,
                "No target language was provided",
            ));
        }
        None
    }

    /// Same gates minus the target-language check
    pub fn detect_precheck(&self, text: &str) -> Option<DetectionResult> {
        if !self.is_valid() {
            return Some(DetectionResult::failure(400, "Service is not validated"));
        }
        if text.trim().is_empty() {
            return Some(DetectionResult::failure(400, "No text was provided"));
        }
        None
    }

    pub fn languages_precheck(&self) -> Option<LanguagesResult> {
        if !self.is_valid() {
            return Some(LanguagesResult::failure(400, "Service is not validated"));
        }
        None
    }
}

impl Default for ProviderCore {
    fn default() -> Self {
        Self::new(false)
    }
}

/// The provider contract
///
/// Every adapter is polymorphic over `{validate, translate, detect,
/// get_languages, has_autodetect_capability}`. The default method bodies
/// are the safe no-ops; concrete adapters override what their service
/// supports and leave the rest alone.
#[async_trait]
pub trait TranslationService: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn core(&self) -> &ProviderCore;

    /// Cheapest live call that exercises the same credential/host path as
    /// translate, so a positive validation predicts later calls succeed.
    async fn validate(&self) -> ValidationResult {
        ValidationResult::ok()
    }

    /// Translate `text` from `from` to `to`; `from == "auto"` asks the
    /// provider to detect the source as part of the call.
    async fn translate(&self, text: &str, _from: &str, to: &str) -> TranslationResult {
        if let Some(early) = self.core().translate_precheck(text, to) {
            return early;
        }
        TranslationResult::success(text.to_string())
    }

    async fn detect(&self, _text: &str) -> DetectionResult {
        DetectionResult::default()
    }

    async fn get_languages(&self) -> LanguagesResult {
        LanguagesResult::success(Vec::new())
    }

    /// Whether detect (and `from == "auto"`) may be used right now
    fn has_autodetect_capability(&self) -> bool {
        false
    }
}
