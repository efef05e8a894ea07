use std::sync::Arc;

use tango_anki::{AnkiConnectClient, CardTemplate};

use crate::state::AppState;

/// Send the current card to Anki, returning a message for the user
pub async fn handle_card_creation(
    state: Arc<AppState>,
    anki_client: Option<&AnkiConnectClient>,
) -> String {
    let Some(client) = anki_client else {
        tracing::warn!("Anki integration disabled");
        return "Anki export is disabled in the profile".to_string();
    };

    let Some(entry) = state.store.read().await.current().cloned() else {
        return "No card to export yet".to_string();
    };

    let template = {
        let config = state.config.read().await;
        CardTemplate::vocabulary(config.anki.deck.clone(), config.anki.model.clone())
    };

    match tango_anki::add_card(client, &template, &entry).await {
        Ok(note_id) => {
            tracing::info!("Added card to Anki: note_id={}", note_id);
            format!("Added '{}' to Anki", entry.word)
        }
        Err(e) => {
            tracing::error!("Failed to add card to Anki: {}", e);
            format!("Anki export failed: {e}")
        }
    }
}
