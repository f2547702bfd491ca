pub mod azure;
pub mod baidu;
pub mod deepl;
pub mod dummy;
pub mod fasttext;
pub mod google;
pub mod libre;
pub mod lingva;
pub mod openai;
pub mod tencent;
pub mod yandex;
pub mod youdao;

use crate::domain::model::ProviderKind;
use crate::domain::traits::TranslationService;
use crate::infrastructure::config::ServiceSettings;
use reqwest::Client;

/// Construct the adapter for `kind` against its settings slice.
///
/// The local detector starts with its model unloaded; call
/// `fasttext::FastTextDetector::load` (or use `create_loaded`) before
/// relying on autodetection.
pub fn create(
    kind: ProviderKind,
    client: Client,
    settings: ServiceSettings,
) -> Box<dyn TranslationService> {
    match kind {
        ProviderKind::Dummy => Box::new(dummy::Dummy::new(settings)),
        ProviderKind::GoogleTranslate => Box::new(google::GoogleTranslate::new(client, settings)),
        ProviderKind::AzureTranslator => Box::new(azure::AzureTranslator::new(client, settings)),
        ProviderKind::Deepl => Box::new(deepl::Deepl::new(client, settings)),
        ProviderKind::YandexTranslate => Box::new(yandex::YandexTranslate::new(client, settings)),
        ProviderKind::BaiduTranslate => Box::new(baidu::BaiduTranslate::new(client, settings)),
        ProviderKind::YoudaoTranslate => Box::new(youdao::YoudaoTranslate::new(client, settings)),
        ProviderKind::FanyiQq => Box::new(tencent::FanyiQq::new(client, settings)),
        ProviderKind::LibreTranslate => Box::new(libre::LibreTranslate::new(client, settings)),
        ProviderKind::LingvaTranslate => Box::new(lingva::LingvaTranslate::new(client, settings)),
        ProviderKind::OpenaiTranslator => Box::new(openai::OpenaiTranslator::new(client, settings)),
        ProviderKind::FasttextDetector => Box::new(fasttext::FastTextDetector::new(settings)),
    }
}

/// Like `create`, but performs the local detector's asynchronous model
/// load so callers get a ready-to-use instance.
pub async fn create_loaded(
    kind: ProviderKind,
    client: Client,
    settings: ServiceSettings,
) -> Box<dyn TranslationService> {
    match kind {
        ProviderKind::FasttextDetector => {
            let detector = fasttext::FastTextDetector::new(settings);
            detector.load().await;
            Box::new(detector)
        }
        other => create(other, client, settings),
    }
}

/// Strip a trailing slash and enforce an https scheme on user-entered
/// host strings for the self-hosted providers.
pub fn normalize_host(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
