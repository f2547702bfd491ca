use crate::domain::error::LingoError;
use crate::domain::model::ProviderKind;
use crate::infrastructure::config::{Settings, Validated};

/// Apply a `set <field> <value>` mutation to the settings document.
/// The caller persists the document afterwards.
///
/// `field` is either a top-level key (`provider`, `theme`) or
/// `<service>.<field>` for a provider slice. Mutating a service resets
/// its validation tri-state, forcing a re-validate before the next use.
pub fn apply_setting(settings: &mut Settings, field: &str, value: &str) -> Result<(), LingoError> {
    match field.split_once('.') {
        None => match field {
            "provider" => {
                settings.provider = ProviderKind::from_key(value)
                    .ok_or_else(|| LingoError::UnknownProvider(value.to_string()))?;
            }
            "theme" => settings.theme = value.to_string(),
            _ => {
                return Err(LingoError::Config(format!(
                    "Unknown setting: {} (expected provider, theme or <service>.<field>)",
                    field
                )))
            }
        },
        Some((service_key, service_field)) => {
            let kind = ProviderKind::from_key(service_key)
                .ok_or_else(|| LingoError::UnknownProvider(service_key.to_string()))?;
            let service = settings.service_mut(kind);
            match service_field {
                "api_key" => service.api_key = non_empty(value),
                "app_id" => service.app_id = non_empty(value),
                "region" => service.region = non_empty(value),
                "host" => service.host = non_empty(value),
                "model" => service.model = non_empty(value),
                "auto_translate" => {
                    service.auto_translate = value.parse().map_err(|_| {
                        LingoError::Config(format!("Expected true/false, got: {}", value))
                    })?
                }
                "auto_translate_interval_ms" => {
                    service.auto_translate_interval_ms = value.parse().map_err(|_| {
                        LingoError::Config(format!("Expected an integer, got: {}", value))
                    })?
                }
                "selected_languages" => {
                    service.selected_languages = value
                        .split(',')
                        .map(|code| code.trim().to_string())
                        .filter(|code| !code.is_empty())
                        .collect()
                }
                other => {
                    return Err(LingoError::Config(format!(
                        "Unknown service setting: {}",
                        other
                    )))
                }
            }
            // Credentials or host changed: previous validation no longer holds
            service.validated = Validated::Unknown;
            service.validated_at = None;
        }
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}
