mod client;
mod template;

pub use client::{AnkiConnectClient, NotePicture};
pub use template::CardTemplate;

use anyhow::Result;
use tango_types::VocabularyEntry;

/// Whether AnkiConnect answers and already has `deck`
pub async fn check_deck(client: &AnkiConnectClient, deck: &str) -> Result<bool> {
    client.check_connection().await?;
    let decks = client.deck_names().await?;
    Ok(decks.iter().any(|name| name == deck))
}

/// Add a card to Anki, attaching the illustration when there is one
pub async fn add_card(
    client: &AnkiConnectClient,
    template: &CardTemplate,
    entry: &VocabularyEntry,
) -> Result<u64> {
    let front = template.format_front(entry);
    let back = template.format_back(entry);
    let picture = NotePicture::from_entry(entry, "Back");

    client
        .add_note(&template.deck, &template.model, &front, &back, picture)
        .await
}
