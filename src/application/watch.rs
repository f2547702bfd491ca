use crate::application::translate::translate_text;
use crate::domain::error::LingoError;
use crate::presentation::theme::Theme;
use crate::presentation::{render_translation, RenderOptions};
use crate::state::AppState;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

/// Auto-translate loop: each stdin line is translated and printed, paced
/// by the provider's `auto_translate_interval_ms` so a fast paste does
/// not hammer the service. Ends on EOF or ctrl-c.
pub async fn watch(
    state: &AppState,
    from: &str,
    to: &str,
    theme: &Theme,
    emoji: bool,
) -> Result<(), LingoError> {
    let interval = {
        let settings = state.settings.read().await;
        Duration::from_millis(
            settings
                .service(state.provider.kind())
                .auto_translate_interval_ms,
        )
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut earliest_next = Instant::now();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("watch interrupted");
                break;
            }
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };
                if line.trim().is_empty() {
                    continue;
                }
                tokio::time::sleep_until(earliest_next).await;
                earliest_next = Instant::now() + interval;

                let result = translate_text(state, &line, from, to).await;
                print!(
                    "{}",
                    render_translation(&result, &RenderOptions { theme, emoji })
                );
            }
        }
    }
    Ok(())
}
