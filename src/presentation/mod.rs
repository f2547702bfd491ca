pub mod theme;

use crate::domain::model::{
    DetectionResult, LanguagesResult, TranslationResult, ValidationResult,
};
use std::fmt::Write;
use theme::Theme;

pub struct RenderOptions<'a> {
    pub theme: &'a Theme,
    pub emoji: bool,
}

fn failure_line(options: &RenderOptions, status: Option<u16>, message: Option<&str>) -> String {
    let prefix = if options.emoji { "✘" } else { "x" };
    format!(
        "{} {}\n",
        (options.theme.error)(prefix),
        (options.theme.error)(&match status {
            Some(status) => format!("[{}] {}", status, message.unwrap_or("request failed")),
            None => message.unwrap_or("request failed").to_string(),
        })
    )
}

pub fn render_translation(result: &TranslationResult, options: &RenderOptions) -> String {
    if !result.is_success() {
        return failure_line(options, result.status_code, result.message.as_deref());
    }
    let mut output = String::new();
    writeln!(
        output,
        "{}",
        (options.theme.value)(result.translation.as_deref().unwrap_or(""))
    )
    .ok();
    if let Some(detected) = &result.detected_language {
        let marker = if options.emoji { "🔍" } else { ">" };
        writeln!(
            output,
            "{} {}",
            marker,
            (options.theme.detected)(&format!("detected source: {}", detected))
        )
        .ok();
    }
    output
}

pub fn render_detection(result: &DetectionResult, options: &RenderOptions) -> String {
    let candidates = match &result.detected_languages {
        Some(candidates) if result.status_code == Some(200) => candidates,
        _ => return failure_line(options, result.status_code, result.message.as_deref()),
    };
    let mut output = String::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let confidence = candidate
            .confidence
            .map(|c| format!(" ({:.0}%)", c * 100.0))
            .unwrap_or_default();
        writeln!(
            output,
            "{}. {}{}",
            (options.theme.label)(&(index + 1).to_string()),
            (options.theme.value)(&candidate.language),
            (options.theme.line)(&confidence)
        )
        .ok();
    }
    output
}

pub fn render_validation(result: &ValidationResult, options: &RenderOptions) -> String {
    if result.valid {
        let prefix = if options.emoji { "✔" } else { "ok" };
        let premium = match result.premium {
            Some(true) => " (premium tier)",
            Some(false) => " (free tier)",
            None => "",
        };
        format!(
            "{} {}{}\n",
            (options.theme.detected)(prefix),
            (options.theme.value)("service is valid"),
            (options.theme.line)(premium)
        )
    } else {
        failure_line(options, result.status_code, result.message.as_deref())
    }
}

pub fn render_languages(
    result: &LanguagesResult,
    selected: &[String],
    options: &RenderOptions,
) -> String {
    let languages = match &result.languages {
        Some(languages) if result.status_code == Some(200) => languages,
        _ => return failure_line(options, result.status_code, result.message.as_deref()),
    };
    let mut output = String::new();
    for language in languages {
        let marker = if selected.contains(&language.code) {
            if options.emoji {
                "★ "
            } else {
                "* "
            }
        } else {
            "  "
        };
        let name = language
            .name
            .as_deref()
            .map(|n| format!("  {}", n))
            .unwrap_or_default();
        writeln!(
            output,
            "{}{}{}",
            (options.theme.label)(marker),
            (options.theme.value)(&language.code),
            (options.theme.line)(&name)
        )
        .ok();
    }
    output
}
