use std::io::{ErrorKind, Write};

use kanal::{AsyncReceiver, AsyncSender};
use tango_config::ui::UiConfig;
use tango_types::{AppEvent, UiEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub mod events;
pub mod render;
pub mod state;

use self::events::handle_events;
use self::render::{HELP, render_view};
use self::state::UiState;

fn print(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Terminal front end over stdin and stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: UiConfig,
) -> anyhow::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    run_ui(input, app_to_ui_rx, ui_to_app_tx, config).await
}

/// Prints backend events, turns typed lines from `input` into UI events
pub async fn run_ui<R>(
    input: R,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: UiConfig,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut state = UiState::new();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("[UI] Backend channel closed");
                    break;
                };
                if let Some(text) = handle_events(event, &mut state, &config) {
                    print(&text);
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // stdin closed
                        ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        tracing::warn!("[UI] Skipping unreadable input: {}", e);
                        print("could not read that line, try again\n");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                match UiEvent::from_command(&line) {
                    Some(UiEvent::Help) => {
                        print(&format!("{HELP}\n"));
                        if let Some(view) = &state.view {
                            print(&render_view(view, &config));
                        }
                    }
                    Some(UiEvent::Close) => {
                        ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                        break;
                    }
                    Some(event) => {
                        tracing::debug!("[UI] Command {:?}", event);
                        ui_to_app_tx.send(AppEvent::UiEvent(event)).await?;
                    }
                    None => print(&format!("unknown command {:?}, {HELP}\n", line.trim())),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    async fn commands_from(input: &'static [u8]) -> (anyhow::Result<()>, Vec<UiEvent>) {
        let (_app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
        let (ui_tx, ui_rx) = kanal::unbounded_async();

        let result = timeout(
            Duration::from_secs(2),
            run_ui(input, app_rx, ui_tx, UiConfig::default()),
        )
        .await
        .expect("ui loop did not stop");

        let mut events = Vec::new();
        while let Ok(Some(AppEvent::UiEvent(event))) = ui_rx.try_recv() {
            events.push(event);
        }
        (result, events)
    }

    #[tokio::test]
    async fn typed_commands_reach_the_backend() {
        let (result, events) = commands_from(b"n\np\nbogus\nd\nq\nn\n").await;

        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                UiEvent::Next,
                UiEvent::Previous,
                UiEvent::DismissQuotaNotice,
                UiEvent::Close
            ]
        );
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_skipped() {
        let (result, events) = commands_from(b"n\n\xff\xfe\np\n").await;

        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![UiEvent::Next, UiEvent::Previous, UiEvent::Close]
        );
    }

    #[tokio::test]
    async fn end_of_input_closes() {
        let (result, events) = commands_from(b"").await;

        assert!(result.is_ok());
        assert_eq!(events, vec![UiEvent::Close]);
    }
}
