//! Settings reconciliation tests
use lingo::migration::reconcile::{reconcile, reseed_languages};

const PROTECTED: &[&str] = &["api_key", "selected_languages"];

fn parse(input: &str) -> toml::Value {
    input.parse::<toml::Value>().expect("valid toml")
}

#[test]
fn missing_keys_are_copied_from_defaults() {
    let defaults = parse(
        r#"
theme = "plain"
[services.deepl]
host = "https://api.deepl.com"
version = 1
"#,
    );
    let persisted = parse(r#"theme = "ocean""#);

    let merged = reconcile(&defaults, persisted, PROTECTED);
    assert_eq!(merged["theme"].as_str(), Some("ocean"));
    assert_eq!(
        merged["services"]["deepl"]["host"].as_str(),
        Some("https://api.deepl.com")
    );
}

#[test]
fn persisted_scalars_and_arrays_win() {
    let defaults = parse(
        r#"
interval = 1000
codes = ["en", "fr"]
"#,
    );
    let persisted = parse(
        r#"
interval = 250
codes = ["de"]
"#,
    );

    let merged = reconcile(&defaults, persisted, PROTECTED);
    assert_eq!(merged["interval"].as_integer(), Some(250));
    assert_eq!(merged["codes"].as_array().map(|a| a.len()), Some(1));
}

#[test]
fn nested_tables_recurse() {
    let defaults = parse(
        r#"
[services.google_translate]
region = "us"
version = 1
"#,
    );
    let persisted = parse(
        r#"
[services.google_translate]
region = "eu"
"#,
    );

    let merged = reconcile(&defaults, persisted, PROTECTED);
    let google = &merged["services"]["google_translate"];
    assert_eq!(google["region"].as_str(), Some("eu"));
    // new default key forward-ported into the old document
    assert_eq!(google["version"].as_integer(), Some(1));
}

#[test]
fn protected_keys_are_never_reseeded() {
    let defaults = parse(
        r#"
[services.deepl]
api_key = "shipped-placeholder"
selected_languages = ["en"]
host = "https://api.deepl.com"
"#,
    );
    // An old document that deliberately has no api_key
    let persisted = parse(
        r#"
[services.deepl]
"#,
    );

    let merged = reconcile(&defaults, persisted, PROTECTED);
    let deepl = merged["services"]["deepl"].as_table().unwrap();
    assert!(!deepl.contains_key("api_key"));
    assert!(!deepl.contains_key("selected_languages"));
    assert!(deepl.contains_key("host"));
}

#[test]
fn protected_keys_present_in_persisted_stay_as_is() {
    let defaults = parse(r#"api_key = "default""#);
    let persisted = parse(r#"api_key = "user-secret""#);

    let merged = reconcile(&defaults, persisted, PROTECTED);
    assert_eq!(merged["api_key"].as_str(), Some("user-secret"));
}

#[test]
fn reconcile_is_idempotent() {
    let defaults = parse(
        r#"
theme = "plain"
[notices]
interval_ms = 1000
unique = true
[services.deepl]
api_key = "seed"
host = "https://api.deepl.com"
version = 2
"#,
    );
    let persisted = parse(
        r#"
theme = "mono"
[services.deepl]
api_key = "user"
"#,
    );

    let once = reconcile(&defaults, persisted, PROTECTED);
    let twice = reconcile(&defaults, once.clone(), PROTECTED);
    assert_eq!(once, twice);
}

#[test]
fn unknown_persisted_keys_are_kept() {
    let defaults = parse(r#"theme = "plain""#);
    let persisted = parse(
        r#"
theme = "plain"
legacy_flag = true
"#,
    );

    let merged = reconcile(&defaults, persisted, PROTECTED);
    assert_eq!(merged["legacy_flag"].as_bool(), Some(true));
}

#[test]
fn stale_language_lists_are_reseeded() {
    let defaults = parse(
        r#"
[services.baidu_translate]
available_languages = ["en", "zh", "ja"]
version = 2
"#,
    );
    let mut merged = parse(
        r#"
[services.baidu_translate]
available_languages = ["en"]
version = 1
"#,
    );

    reseed_languages(&defaults, &mut merged);
    let baidu = &merged["services"]["baidu_translate"];
    assert_eq!(
        baidu["available_languages"].as_array().map(|a| a.len()),
        Some(3)
    );
    assert_eq!(baidu["version"].as_integer(), Some(2));
}

#[test]
fn current_language_lists_are_left_alone() {
    let defaults = parse(
        r#"
[services.baidu_translate]
available_languages = ["en", "zh", "ja"]
version = 2
"#,
    );
    let mut merged = parse(
        r#"
[services.baidu_translate]
available_languages = ["en", "fr"]
version = 2
"#,
    );

    reseed_languages(&defaults, &mut merged);
    let languages = merged["services"]["baidu_translate"]["available_languages"]
        .as_array()
        .unwrap();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[1].as_str(), Some("fr"));
}
