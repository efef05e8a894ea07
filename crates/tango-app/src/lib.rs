pub mod controller;
pub mod events;
pub mod fetcher;
pub mod navigation;
pub mod profile;
pub mod state;
pub mod timer;

pub use controller::AppController;
pub use fetcher::{FetchContext, FetchError};
pub use state::AppState;

#[cfg(test)]
mod tests;
