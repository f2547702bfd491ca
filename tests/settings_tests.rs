//! Settings document tests: defaults, the full reconcile pipeline and
//! the `set` mutation path.
use lingo::application::configure::apply_setting;
use lingo::domain::model::ProviderKind;
use lingo::infrastructure::config::{reconcile_settings, Settings, Validated};

#[test]
fn default_document_covers_every_provider() {
    let settings = Settings::default();
    for kind in ProviderKind::all() {
        assert!(
            settings.services.contains_key(kind.key()),
            "missing default slice for {:?}",
            kind
        );
    }
    // Seeded lists carry a version above the baseline
    assert!(settings.service(ProviderKind::BaiduTranslate).version > 1);
    assert!(!settings
        .service(ProviderKind::BaiduTranslate)
        .available_languages
        .is_empty());
    assert_eq!(
        settings.service(ProviderKind::LibreTranslate).host.as_deref(),
        Some("https://libretranslate.com")
    );
    // Dummy needs no credentials and starts validated
    assert!(settings.service(ProviderKind::Dummy).is_validated());
}

#[test]
fn stale_persisted_document_gains_new_keys_and_keeps_user_data() {
    let persisted = r#"
provider = "deepl"

[services.deepl]
api_key = "user-key:fx"
selected_languages = ["fr", "de"]

[services.baidu_translate]
app_id = "123"
available_languages = ["en"]
version = 1
"#
    .parse::<toml::Value>()
    .unwrap();

    let merged = reconcile_settings(&Settings::default(), persisted).unwrap();

    assert_eq!(merged.provider, ProviderKind::Deepl);
    // user data survives
    let deepl = merged.service(ProviderKind::Deepl);
    assert_eq!(deepl.api_key.as_deref(), Some("user-key:fx"));
    assert_eq!(deepl.selected_languages, vec!["fr", "de"]);
    // new default keys forward-ported
    assert!(merged.services.contains_key("lingva_translate"));
    assert_eq!(merged.notices.max_pending, 5);
    // stale seeded list reseeded because version 1 < shipped version
    let baidu = merged.service(ProviderKind::BaiduTranslate);
    assert!(baidu.available_languages.len() > 1);
    assert_eq!(baidu.app_id.as_deref(), Some("123"));
}

#[test]
fn reconcile_settings_is_idempotent() {
    let persisted = r#"
theme = "mono"

[services.youdao_translate]
app_id = "abc"
api_key = "def"
"#
    .parse::<toml::Value>()
    .unwrap();

    let defaults = Settings::default();
    let once = reconcile_settings(&defaults, persisted).unwrap();
    let as_value = toml::Value::try_from(&once).unwrap();
    let twice = reconcile_settings(&defaults, as_value).unwrap();

    assert_eq!(
        toml::to_string(&once).unwrap(),
        toml::to_string(&twice).unwrap()
    );
}

#[test]
fn mutating_a_service_resets_its_validation() {
    let mut settings = Settings::default();
    let service = settings.service_mut(ProviderKind::Deepl);
    service.validated = Validated::Valid;

    apply_setting(&mut settings, "deepl.api_key", "new-key").unwrap();

    let deepl = settings.service(ProviderKind::Deepl);
    assert_eq!(deepl.api_key.as_deref(), Some("new-key"));
    assert_eq!(deepl.validated, Validated::Unknown);
    assert!(deepl.validated_at.is_none());
}

#[test]
fn selected_languages_parse_as_comma_list() {
    let mut settings = Settings::default();
    apply_setting(&mut settings, "deepl.selected_languages", "en, fr ,de,").unwrap();
    assert_eq!(
        settings.service(ProviderKind::Deepl).selected_languages,
        vec!["en", "fr", "de"]
    );
}

#[test]
fn unknown_fields_and_providers_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_setting(&mut settings, "provider", "nope").is_err());
    assert!(apply_setting(&mut settings, "deepl.color", "red").is_err());
    assert!(apply_setting(&mut settings, "nope.api_key", "x").is_err());
}

#[test]
fn switching_provider_by_key() {
    let mut settings = Settings::default();
    apply_setting(&mut settings, "provider", "libre_translate").unwrap();
    assert_eq!(settings.provider, ProviderKind::LibreTranslate);
}
