//! Language-code crosswalk tests
use lingo::domain::langcodes::{BAIDU, ISO639_3, YOUDAO};

#[test]
fn round_trip_is_idempotent_for_every_mapped_code() {
    for crosswalk in [&*BAIDU, &*YOUDAO, &*ISO639_3] {
        for code in crosswalk.standard_codes() {
            let dialect = crosswalk.to_dialect(code);
            assert_eq!(
                crosswalk.to_standard(dialect),
                code,
                "standard -> dialect -> standard must return {}",
                code
            );
        }
        for code in crosswalk.dialect_codes() {
            let standard = crosswalk.to_standard(code);
            assert_eq!(
                crosswalk.to_dialect(standard),
                code,
                "dialect -> standard -> dialect must return {}",
                code
            );
        }
    }
}

#[test]
fn unmapped_codes_pass_through_unchanged() {
    assert_eq!(BAIDU.to_dialect("en"), "en");
    assert_eq!(BAIDU.to_standard("en"), "en");
    assert_eq!(YOUDAO.to_dialect("fr"), "fr");
    assert_eq!(ISO639_3.to_standard("xx"), "xx");
}

#[test]
fn known_dialect_mappings() {
    assert_eq!(BAIDU.to_dialect("ja"), "jp");
    assert_eq!(BAIDU.to_dialect("ko"), "kor");
    assert_eq!(BAIDU.to_dialect("zh-TW"), "cht");
    assert_eq!(BAIDU.to_standard("fra"), "fr");
    assert_eq!(YOUDAO.to_dialect("zh"), "zh-CHS");
    assert_eq!(ISO639_3.to_standard("eng"), "en");
    assert_eq!(ISO639_3.to_standard("cmn"), "zh");
}
