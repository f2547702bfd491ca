// Main entry point
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use lingo::application::configure::apply_setting;
use lingo::application::translate::{
    detect_text, fetch_languages, translate_text, validate_service,
};
use lingo::application::watch::watch;
use lingo::domain::model::ProviderKind;
use lingo::infrastructure::config::{
    generate_settings_sample, get_settings_path, load_settings, save_settings, Logging, Validated,
};
use lingo::interfaces::cli::{Cli, Command};
use lingo::presentation::theme::Theme;
use lingo::presentation::{
    render_detection, render_languages, render_translation, render_validation, RenderOptions,
};
use lingo::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Reconciliation runs inside load_settings, before any provider is built
    let settings = load_settings()?;

    if settings.logging.enable {
        init_logging(&settings.logging)?;
    }

    // Commands that only touch the settings file
    match &cli.command {
        Command::GenerateConfig => {
            generate_settings_sample()?;
            return Ok(());
        }
        Command::EditConfig => {
            let path = get_settings_path().context("Cannot determine config directory")?;
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor).arg(&path).status()
            })
            .await??;
            return Ok(());
        }
        Command::Set { field, value } => {
            let mut settings = settings;
            apply_setting(&mut settings, field, value)?;
            save_settings(&settings)?;
            println!("Updated {}", field.green());
            return Ok(());
        }
        _ => {}
    }

    let provider_override = cli
        .provider
        .as_deref()
        .map(|key| {
            ProviderKind::from_key(key)
                .with_context(|| format!("Unknown provider: {}", key))
        })
        .transpose()?;

    let theme = Theme::from_name(cli.theme.as_deref().unwrap_or(settings.theme.as_str()));
    let emoji = settings.enable_emoji;
    let options = RenderOptions {
        theme: &theme,
        emoji,
    };
    let state = AppState::new(settings, provider_override).await?;

    match cli.command {
        Command::Translate { from, to, text } => {
            let text = text.join(" ");
            let result = translate_text(&state, &text, &from, &to).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_translation(&result, &options));
            }
            if !result.is_success() {
                std::process::exit(1);
            }
        }
        Command::Detect { text } => {
            let text = text.join(" ");
            let result = detect_text(&state, &text).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_detection(&result, &options));
            }
        }
        Command::Validate => {
            let result = validate_service(&state).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_validation(&result, &options));
            }
        }
        Command::Languages => {
            let result = fetch_languages(&state).await;
            let selected = {
                let settings = state.settings.read().await;
                settings.service(state.provider.kind()).selected_languages
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_languages(&result, &selected, &options));
            }
        }
        Command::Watch { from, to } => {
            watch(&state, &from, &to, &theme, emoji).await?;
        }
        Command::Status => {
            print_status(&state).await;
        }
        // Handled above
        Command::GenerateConfig | Command::EditConfig | Command::Set { .. } => {}
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

async fn print_status(state: &AppState) {
    println!("{}", "lingo Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let settings = state.settings.read().await;
    let kind = state.provider.kind();
    let service = settings.service(kind);

    println!("Provider: {}", kind.display_name());
    let validated = match service.validated {
        Validated::Valid => "valid".green().to_string(),
        Validated::Invalid => "invalid".red().to_string(),
        Validated::Unknown => "not validated".yellow().to_string(),
    };
    match service.validated_at {
        Some(at) => println!("Validation: {} (checked {})", validated, at.to_rfc3339()),
        None => println!("Validation: {}", validated),
    }
    println!(
        "Autodetect: {}",
        if state.provider.has_autodetect_capability() {
            "available"
        } else {
            "unavailable"
        }
    );
    println!(
        "Session calls: {} ok / {} failed",
        state.provider.core().successes(),
        state.provider.core().failures()
    );
    if !service.available_languages.is_empty() {
        println!("Languages: {} available", service.available_languages.len());
    }

    println!(
        "Settings: {}",
        get_settings_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
}
