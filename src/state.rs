use crate::application::notify::{NoticeQueue, NoticeSink};
use crate::domain::error::LingoError;
use crate::domain::model::ProviderKind;
use crate::domain::traits::TranslationService;
use crate::infrastructure::config::Settings;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::providers;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub struct AppState {
    pub settings: Arc<RwLock<Settings>>,
    pub provider: Arc<dyn TranslationService>,
    pub notices: NoticeQueue,
}

impl AppState {
    /// Build the process state: shared HTTP client, the active provider
    /// (constructed from its reconciled settings slice), and the notice
    /// queue. The local detector's model load happens here so callers
    /// never observe a half-initialized provider.
    pub async fn new(
        settings: Settings,
        provider_override: Option<ProviderKind>,
    ) -> Result<Self, LingoError> {
        let http_client = create_client()?;
        let kind = provider_override.unwrap_or(settings.provider);
        let provider: Arc<dyn TranslationService> =
            providers::create_loaded(kind, http_client, settings.service(kind))
                .await
                .into();

        let notice_settings = &settings.notices;
        let sink: NoticeSink = Arc::new(|message: &str| {
            eprintln!("{}", message.yellow());
        });
        let notices = NoticeQueue::new(
            notice_settings.max_pending,
            Duration::from_millis(notice_settings.interval_ms),
            notice_settings.unique,
            Duration::from_millis(notice_settings.timeout_ms),
            sink,
        );

        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            provider,
            notices,
        })
    }
}
