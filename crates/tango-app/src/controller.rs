use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tango_anki::AnkiConnectClient;
use tango_generator::{ImageGenerator, WordGenerator};
use tango_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::fetcher::FetchContext;
use crate::state::AppState;
use crate::timer::timer_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(16), // typed commands
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(
        &self,
        words: Arc<dyn WordGenerator>,
        images: Arc<dyn ImageGenerator>,
        anki_client: Option<AnkiConnectClient>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let ctx = FetchContext::new(
            self.state.clone(),
            self.channels.app_to_ui.0.clone(),
            words,
            images,
        );

        // Event loop
        tasks.spawn(event_loop(
            ctx,
            self.channels.ui_to_app.1.clone(),
            anki_client,
        ));

        // UI loop
        let ui_config = self.state.config.read().await.ui.clone();
        tasks.spawn(tango_ui::ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            ui_config,
        ));

        // Countdown
        tasks.spawn(timer_loop(
            self.state.clone(),
            Duration::from_secs(1),
            self.cancel_token.child_token(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
