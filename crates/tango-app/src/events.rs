use kanal::AsyncReceiver;
use tango_anki::AnkiConnectClient;
use tango_types::{AppEvent, UiEvent};

use crate::fetcher::{FetchContext, FetchError};
use crate::navigation::{self, Navigation};

pub mod create_card;

use create_card::handle_card_creation;

/// Loop control after one event
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// App's main loop
pub async fn event_loop(
    ctx: FetchContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    anki_client: Option<AnkiConnectClient>,
) -> anyhow::Result<()> {
    let _ = ctx.event_tx.send(AppEvent::BackendReady).await;
    ctx.publish_view().await;
    navigation::start_session(&ctx).await;

    tracing::info!("[EVENT_LOOP] Waiting for events");
    loop {
        let event = match ui_to_app_rx.recv().await {
            Ok(event) => event,
            Err(_) => {
                tracing::info!("[EVENT_LOOP] UI channel closed");
                break;
            }
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        if handle_events(&ctx, anki_client.as_ref(), event).await == Flow::Exit {
            break;
        }
    }

    Ok(())
}

pub async fn handle_events(
    ctx: &FetchContext,
    anki_client: Option<&AnkiConnectClient>,
    event: AppEvent,
) -> Flow {
    match event {
        AppEvent::UiEvent(UiEvent::Next) => match navigation::next(ctx).await {
            Ok(Navigation::Moved(index)) => tracing::debug!("Moved to card {}", index),
            Ok(Navigation::Fetching(_)) => tracing::debug!("At the last card, fetching"),
            Err(FetchError::Busy) => tracing::debug!("Next ignored while fetching"),
            Err(e) => tracing::error!("Next failed: {}", e),
        },
        AppEvent::UiEvent(UiEvent::Previous) => {
            navigation::previous(ctx).await;
        }
        AppEvent::UiEvent(UiEvent::DismissQuotaNotice) => {
            ctx.state.notices.write().await.quota_notice = false;
            ctx.publish_view().await;
        }
        AppEvent::UiEvent(UiEvent::ExportCard) => {
            let message = handle_card_creation(ctx.state.clone(), anki_client).await;
            let _ = ctx.event_tx.send(AppEvent::Notice(message)).await;
        }
        AppEvent::UiEvent(UiEvent::Help) => {
            // Handled by the UI itself
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            tracing::info!("Close requested");
            return Flow::Exit;
        }
        AppEvent::Render(_)
        | AppEvent::TimerUpdate { .. }
        | AppEvent::Notice(_)
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Flow::Continue
}
