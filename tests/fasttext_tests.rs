//! Local language-detector tests: the asynchronous model load gate and
//! its distinct failure modes.
use lingo::domain::traits::TranslationService;
use lingo::infrastructure::config::ServiceSettings;
use lingo::infrastructure::providers::fasttext::FastTextDetector;
use std::path::PathBuf;

fn manifest_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lingo-test-{}-{}.json", name, uuid::Uuid::new_v4()))
}

fn settings_with_model(path: &PathBuf) -> ServiceSettings {
    ServiceSettings {
        model: Some(path.display().to_string()),
        ..Default::default()
    }
}

const MANIFEST: &str = r#"{
    "version": 3,
    "languages": [
        {"code": "eng", "name": "English", "weight": 0.95},
        {"code": "fra", "name": "French", "weight": 0.91},
        {"code": "spa", "name": "Spanish", "weight": 0.88}
    ]
}"#;

#[tokio::test]
async fn autodetect_capability_flips_only_after_load() {
    let path = manifest_path("gate");
    std::fs::write(&path, MANIFEST).unwrap();

    let detector = FastTextDetector::new(settings_with_model(&path));
    assert!(!detector.has_autodetect_capability());

    let outcome = detector.load().await;
    assert!(outcome.valid);
    assert!(detector.has_autodetect_capability());

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn detects_language_with_standard_codes() {
    let path = manifest_path("detect");
    std::fs::write(&path, MANIFEST).unwrap();

    let detector = FastTextDetector::new(settings_with_model(&path));
    detector.load().await;

    let result = detector
        .detect("This is a longer English sentence to ensure correct detection.")
        .await;
    assert_eq!(result.status_code, Some(200));
    let best = result.best().expect("one candidate");
    assert_eq!(best.language, "en");
    assert!(best.confidence.unwrap_or(0.0) > 0.0);

    let result_fr = detector.detect("Bonjour tout le monde, comment allez-vous").await;
    assert_eq!(result_fr.best().unwrap().language, "fr");

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn language_list_carries_model_descriptors() {
    let path = manifest_path("langs");
    std::fs::write(&path, MANIFEST).unwrap();

    let detector = FastTextDetector::new(settings_with_model(&path));
    detector.load().await;

    let result = detector.get_languages().await;
    let languages = result.languages.expect("descriptors");
    assert_eq!(languages.len(), 3);
    assert_eq!(languages[0].code, "en");
    assert_eq!(languages[0].name.as_deref(), Some("English"));
    assert!(languages[0].weight.unwrap() > 0.9);

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn missing_model_file_is_a_distinct_failure() {
    let path = manifest_path("missing");
    let detector = FastTextDetector::new(settings_with_model(&path));

    let outcome = detector.load().await;
    assert!(!outcome.valid);
    assert!(outcome.message.unwrap().contains("Model file not found"));
    assert!(!detector.has_autodetect_capability());
}

#[tokio::test]
async fn malformed_manifest_is_a_distinct_failure() {
    let path = manifest_path("malformed");
    std::fs::write(&path, "definitely not json").unwrap();

    let detector = FastTextDetector::new(settings_with_model(&path));
    let outcome = detector.load().await;
    assert!(!outcome.valid);
    assert!(outcome.message.unwrap().contains("Model file is malformed"));

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn unset_model_path_is_a_distinct_failure() {
    let detector = FastTextDetector::new(ServiceSettings::default());
    let outcome = detector.load().await;
    assert!(!outcome.valid);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Model path was not specified")
    );
}

#[tokio::test]
async fn validate_is_a_faithful_predictor_of_detect() {
    let path = manifest_path("predict");
    std::fs::write(&path, MANIFEST).unwrap();

    let detector = FastTextDetector::new(settings_with_model(&path));
    // validate performs the load itself
    let outcome = detector.validate().await;
    assert!(outcome.valid);
    let result = detector.detect("The quick brown fox jumps over the lazy dog").await;
    assert_eq!(result.status_code, Some(200));

    std::fs::remove_file(&path).ok();
}
