use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use tango_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Ticks the study countdown every `period` until it runs out
pub async fn timer_loop(
    state: Arc<AppState>,
    period: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(period);
    // First tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Timer stopping");
                break;
            }
            _ = interval.tick() => {
                let Some(seconds_left) = state.tick_countdown().await else {
                    tracing::debug!("Countdown already at zero");
                    break;
                };

                if event_tx.send(AppEvent::TimerUpdate { seconds_left }).await.is_err() {
                    break;
                }

                if seconds_left == 0 {
                    tracing::info!("Countdown finished");
                    let _ = event_tx
                        .send(AppEvent::Notice("Study time is over".to_string()))
                        .await;
                    break;
                }
            }
        }
    }

    // Idle until shutdown
    cancel.cancelled().await;
    Ok(())
}
