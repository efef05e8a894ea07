pub mod entry;
pub mod types;

pub use entry::{ImageRef, VocabularyEntry};
pub use types::*;
