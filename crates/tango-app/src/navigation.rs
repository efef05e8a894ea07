use crate::fetcher::{FetchContext, FetchError, FetchHandle};

/// Result of a `next` request
pub enum Navigation {
    /// Cursor moved onto an existing card
    Moved(usize),
    /// At the end: a fetch was started and will advance on success
    Fetching(FetchHandle),
}

pub async fn next(ctx: &FetchContext) -> Result<Navigation, FetchError> {
    if ctx.state.session.is_fetching() {
        return Err(FetchError::Busy);
    }

    let moved = {
        let mut store = ctx.state.store.write().await;
        if store.is_at_end() {
            None
        } else {
            store.step_forward();
            store.current_index()
        }
    };

    match moved {
        Some(index) => {
            ctx.state.persist_index().await;
            ctx.publish_view().await;
            Ok(Navigation::Moved(index))
        }
        None => ctx.spawn_fetch(true).map(Navigation::Fetching),
    }
}

/// Step back, floored at the first card; allowed during a fetch
pub async fn previous(ctx: &FetchContext) -> Option<usize> {
    let (moved, index) = {
        let mut store = ctx.state.store.write().await;
        (store.previous(), store.current_index())
    };

    if moved {
        ctx.state.persist_index().await;
    }
    ctx.publish_view().await;
    index
}

/// First fetch of a session with nothing saved
pub async fn start_session(ctx: &FetchContext) -> Option<FetchHandle> {
    let is_empty = ctx.state.store.read().await.is_empty();
    if !is_empty || ctx.state.session.fetch_started() {
        return None;
    }

    tracing::info!("No saved cards, fetching the first one");
    ctx.spawn_fetch(false).ok()
}
