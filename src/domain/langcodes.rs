// Language-code crosswalks between the standard (ISO 639-1 based) code
// space and the dialects individual providers speak.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Bidirectional static mapping between the standard code space and one
/// provider's dialect.
///
/// Only the standard→dialect direction is declared; the reverse table is
/// built as its exact inverse, so round-tripping any mapped code is
/// idempotent. Codes absent from the tables pass through unchanged (they
/// are assumed to already be standard).
pub struct Crosswalk {
    dialect_by_standard: HashMap<&'static str, &'static str>,
    standard_by_dialect: HashMap<&'static str, &'static str>,
}

impl Crosswalk {
    fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        let mut dialect_by_standard = HashMap::with_capacity(pairs.len());
        let mut standard_by_dialect = HashMap::with_capacity(pairs.len());
        for (standard, dialect) in pairs {
            dialect_by_standard.insert(*standard, *dialect);
            standard_by_dialect.insert(*dialect, *standard);
        }
        Self {
            dialect_by_standard,
            standard_by_dialect,
        }
    }

    pub fn to_dialect<'a>(&'a self, code: &'a str) -> &'a str {
        self.dialect_by_standard.get(code).copied().unwrap_or(code)
    }

    pub fn to_standard<'a>(&'a self, code: &'a str) -> &'a str {
        self.standard_by_dialect.get(code).copied().unwrap_or(code)
    }

    /// All standard-side codes present in the table
    pub fn standard_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dialect_by_standard.keys().copied()
    }

    /// All dialect-side codes present in the table
    pub fn dialect_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.standard_by_dialect.keys().copied()
    }
}

/// Baidu's invented short codes (`jp`, `kor`, `fra`, ...)
pub static BAIDU: Lazy<Crosswalk> = Lazy::new(|| {
    Crosswalk::new(&[
        ("ja", "jp"),
        ("ko", "kor"),
        ("fr", "fra"),
        ("es", "spa"),
        ("ar", "ara"),
        ("bg", "bul"),
        ("et", "est"),
        ("da", "dan"),
        ("fi", "fin"),
        ("ro", "rom"),
        ("sl", "slo"),
        ("sv", "swe"),
        ("vi", "vie"),
        ("zh-TW", "cht"),
    ])
});

/// Youdao's Chinese variants
pub static YOUDAO: Lazy<Crosswalk> = Lazy::new(|| {
    Crosswalk::new(&[("zh", "zh-CHS"), ("zh-TW", "zh-CHT")])
});

/// ISO 639-3 codes emitted by the embedded whatlang classifier
pub static ISO639_3: Lazy<Crosswalk> = Lazy::new(|| {
    Crosswalk::new(&[
        ("en", "eng"),
        ("fr", "fra"),
        ("es", "spa"),
        ("de", "deu"),
        ("it", "ita"),
        ("ru", "rus"),
        ("zh", "cmn"),
        ("ja", "jpn"),
        ("ko", "kor"),
        ("ar", "ara"),
        ("hi", "hin"),
        ("pt", "por"),
        ("nl", "nld"),
        ("tr", "tur"),
        ("pl", "pol"),
        ("sv", "swe"),
        ("vi", "vie"),
        ("uk", "ukr"),
        ("id", "ind"),
        ("fa", "pes"),
        ("he", "heb"),
        ("th", "tha"),
        ("el", "ell"),
        ("cs", "ces"),
        ("da", "dan"),
        ("fi", "fin"),
        ("hu", "hun"),
        ("ro", "ron"),
        ("bg", "bul"),
        ("bn", "ben"),
        ("ur", "urd"),
        ("sr", "srp"),
        ("hr", "hrv"),
        ("sk", "slk"),
        ("lt", "lit"),
        ("lv", "lav"),
        ("et", "est"),
        ("ka", "kat"),
        ("hy", "hye"),
        ("az", "aze"),
        ("uz", "uzb"),
        ("ta", "tam"),
        ("te", "tel"),
        ("mr", "mar"),
        ("gu", "guj"),
        ("kn", "kan"),
        ("ml", "mal"),
        ("pa", "pan"),
        ("ne", "nep"),
        ("si", "sin"),
        ("my", "mya"),
        ("km", "khm"),
        ("lo", "lao"),
        ("am", "amh"),
        ("sw", "swa"),
        ("af", "afr"),
        ("sq", "sqi"),
        ("mk", "mkd"),
        ("sl", "slv"),
        ("ms", "msa"),
        ("tl", "tgl"),
    ])
});
