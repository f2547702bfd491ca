// The contract's no-op defaults made concrete. Used when no real service
// is configured and as the reference behavior for the contract tests.
use crate::domain::model::ProviderKind;
use crate::domain::traits::{ProviderCore, TranslationService};
use crate::infrastructure::config::ServiceSettings;
use async_trait::async_trait;

pub struct Dummy {
    core: ProviderCore,
}

impl Dummy {
    pub fn new(settings: ServiceSettings) -> Self {
        Self {
            core: ProviderCore::new(settings.is_validated()),
        }
    }
}

#[async_trait]
impl TranslationService for Dummy {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Dummy
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }
}
