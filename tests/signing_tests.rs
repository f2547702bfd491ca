//! Request-signing and dialect-helper tests for the pure per-provider
//! functions.
use lingo::infrastructure::providers::baidu::BaiduTranslate;
use lingo::infrastructure::providers::deepl::Deepl;
use lingo::infrastructure::providers::openai::OpenaiTranslator;
use lingo::infrastructure::providers::tencent::FanyiQq;
use lingo::infrastructure::providers::youdao::YoudaoTranslate;

#[test]
fn youdao_sign_input_keeps_short_texts() {
    assert_eq!(YoudaoTranslate::sign_input("Hello"), "Hello");
    assert_eq!(
        YoudaoTranslate::sign_input("exactly twenty chars"),
        "exactly twenty chars"
    );
}

#[test]
fn youdao_sign_input_folds_long_texts() {
    // first 10 chars + total length + last 10 chars
    let input = "abcdefghijklmnopqrstuvwxyz";
    assert_eq!(YoudaoTranslate::sign_input(input), "abcdefghij26qrstuvwxyz");
}

#[test]
fn youdao_sign_input_counts_characters_not_bytes() {
    let input = "这是一个需要折叠的很长的中文输入字符串哦啊";
    assert_eq!(input.chars().count(), 21);
    let folded = YoudaoTranslate::sign_input(input);
    assert!(folded.contains("21"));
    assert_eq!(folded.chars().count(), 22);
}

#[test]
fn youdao_sign_is_deterministic_sha256_hex() {
    let a = YoudaoTranslate::sign("app", "Hello", "salt", "1700000000", "secret");
    let b = YoudaoTranslate::sign("app", "Hello", "salt", "1700000000", "secret");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

    let other_salt = YoudaoTranslate::sign("app", "Hello", "pepper", "1700000000", "secret");
    assert_ne!(a, other_salt);
}

#[test]
fn baidu_sign_is_deterministic_md5_hex() {
    let a = BaiduTranslate::sign("app", "Hello", "42", "secret");
    let b = BaiduTranslate::sign("app", "Hello", "42", "secret");
    assert_eq!(a, b);
    assert_eq!(a.len(), 32);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, BaiduTranslate::sign("app", "Hello", "43", "secret"));
}

#[test]
fn fanyi_qq_sign_covers_the_source_text() {
    let a = FanyiQq::sign("app", "Hello", "42", "secret");
    let b = FanyiQq::sign("app", "Bonjour", "42", "secret");
    assert_ne!(a, b);
    assert_eq!(a.len(), 32);
}

#[test]
fn deepl_target_codes_are_regional_uppercase() {
    assert_eq!(Deepl::to_deepl_target("en"), "EN-GB");
    assert_eq!(Deepl::to_deepl_target("pt"), "PT-PT");
    assert_eq!(Deepl::to_deepl_target("fr"), "FR");
    assert_eq!(Deepl::from_deepl("EN-GB"), "en");
    assert_eq!(Deepl::from_deepl("DE"), "de");
}

#[test]
fn openai_first_line_parse_extracts_detected_code() {
    let (code, body) = OpenaiTranslator::parse_autodetect_reply("en\nBonjour le monde");
    assert_eq!(code.as_deref(), Some("en"));
    assert_eq!(body, "Bonjour le monde");
}

#[test]
fn openai_first_line_parse_is_best_effort() {
    // No newline at all: the whole reply is the translation
    let (code, body) = OpenaiTranslator::parse_autodetect_reply("Bonjour");
    assert_eq!(code, None);
    assert_eq!(body, "Bonjour");

    // A chatty first line does not look like a code; keep everything
    let chatty = "The language is English\nBonjour";
    let (code, body) = OpenaiTranslator::parse_autodetect_reply(chatty);
    assert_eq!(code, None);
    assert_eq!(body, chatty);
}
