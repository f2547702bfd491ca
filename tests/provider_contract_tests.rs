//! Provider contract tests: precondition gates, short-circuits and the
//! pure per-provider helpers. Nothing here touches the network; every
//! asserted path returns before a request is built.
use lingo::domain::model::ProviderKind;
use lingo::domain::traits::TranslationService;
use lingo::infrastructure::config::{ServiceSettings, Validated};
use lingo::infrastructure::providers::{self, normalize_host};

fn validated() -> ServiceSettings {
    ServiceSettings {
        api_key: Some("key".to_string()),
        app_id: Some("id".to_string()),
        validated: Validated::Valid,
        ..Default::default()
    }
}

fn unvalidated() -> ServiceSettings {
    ServiceSettings {
        api_key: Some("key".to_string()),
        app_id: Some("id".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn dummy_translates_to_identity() {
    let provider = providers::create(
        ProviderKind::Dummy,
        reqwest::Client::new(),
        ServiceSettings {
            validated: Validated::Valid,
            ..Default::default()
        },
    );
    let result = provider.translate("Hello", "en", "fr").await;
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.translation.as_deref(), Some("Hello"));
    assert!(!provider.has_autodetect_capability());
}

#[tokio::test]
async fn calls_against_unvalidated_provider_short_circuit() {
    let provider = providers::create(
        ProviderKind::GoogleTranslate,
        reqwest::Client::new(),
        unvalidated(),
    );
    let result = provider.translate("Hello", "en", "fr").await;
    assert_eq!(result.status_code, Some(400));
    assert_eq!(result.message.as_deref(), Some("Service is not validated"));
    assert!(result.translation.is_none());
    assert_eq!(provider.core().successes() + provider.core().failures(), 0);
}

#[tokio::test]
async fn empty_text_fails_without_a_wire_call() {
    for kind in [
        ProviderKind::GoogleTranslate,
        ProviderKind::AzureTranslator,
        ProviderKind::Deepl,
        ProviderKind::BaiduTranslate,
        ProviderKind::YoudaoTranslate,
        ProviderKind::FanyiQq,
        ProviderKind::LibreTranslate,
        ProviderKind::LingvaTranslate,
        ProviderKind::OpenaiTranslator,
        ProviderKind::YandexTranslate,
    ] {
        let provider = providers::create(kind, reqwest::Client::new(), validated());
        let result = provider.translate("   ", "en", "fr").await;
        assert_eq!(result.status_code, Some(400), "{:?}", kind);
        assert_eq!(result.message.as_deref(), Some("No text was provided"));
        assert_eq!(
            provider.core().successes() + provider.core().failures(),
            0,
            "short-circuit must not move the counters for {:?}",
            kind
        );
    }
}

#[tokio::test]
async fn missing_target_language_fails() {
    let provider = providers::create(
        ProviderKind::GoogleTranslate,
        reqwest::Client::new(),
        validated(),
    );
    let result = provider.translate("Hello", "en", "").await;
    assert_eq!(result.status_code, Some(400));
    assert_eq!(
        result.message.as_deref(),
        Some("No target language was provided")
    );
}

#[tokio::test]
async fn identity_pair_short_circuits() {
    let provider = providers::create(
        ProviderKind::GoogleTranslate,
        reqwest::Client::new(),
        validated(),
    );
    let result = provider.translate("Bonjour", "fr", "fr").await;
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.translation.as_deref(), Some("Bonjour"));
    assert_eq!(provider.core().successes() + provider.core().failures(), 0);
}

#[tokio::test]
async fn validation_short_circuits_on_missing_credentials() {
    // Baidu requires both an App ID and a key
    let mut settings = validated();
    settings.app_id = None;
    let provider = providers::create(
        ProviderKind::BaiduTranslate,
        reqwest::Client::new(),
        settings,
    );
    let result = provider.validate().await;
    assert!(!result.valid);
    assert_eq!(result.status_code, Some(400));
    assert_eq!(result.message.as_deref(), Some("App ID was not specified"));

    let mut settings = validated();
    settings.api_key = None;
    let provider = providers::create(
        ProviderKind::YoudaoTranslate,
        reqwest::Client::new(),
        settings,
    );
    let result = provider.validate().await;
    assert_eq!(result.message.as_deref(), Some("API key was not specified"));

    let provider = providers::create(
        ProviderKind::LibreTranslate,
        reqwest::Client::new(),
        ServiceSettings::default(),
    );
    let result = provider.validate().await;
    assert_eq!(result.message.as_deref(), Some("Host was not specified"));
}

#[test]
fn host_normalization() {
    assert_eq!(
        normalize_host("libretranslate.com/"),
        "https://libretranslate.com"
    );
    assert_eq!(
        normalize_host("https://lingva.ml///"),
        "https://lingva.ml"
    );
    assert_eq!(
        normalize_host("http://localhost:5000/"),
        "http://localhost:5000"
    );
    assert_eq!(normalize_host(" my.host "), "https://my.host");
}

#[test]
fn provider_keys_round_trip() {
    for kind in ProviderKind::all() {
        assert_eq!(ProviderKind::from_key(kind.key()), Some(*kind));
    }
    assert_eq!(ProviderKind::from_key("nope"), None);
}
