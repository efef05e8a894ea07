mod session_tests;

use tango_types::{ImageRef, VocabularyEntry};

pub(crate) fn entry(id: u64, word: &str, image: ImageRef) -> VocabularyEntry {
    VocabularyEntry {
        id,
        word: word.to_string(),
        phonetic: format!("/{word}/"),
        translation: format!("{word}-tr"),
        example: format!("I see the {word}."),
        example_translation: format!("Vizhu {word}."),
        image,
    }
}

pub(crate) fn with_image(id: u64) -> VocabularyEntry {
    entry(
        id,
        &format!("word{id}"),
        ImageRef::from_base64("image/jpeg", &format!("IMG{id}")),
    )
}
