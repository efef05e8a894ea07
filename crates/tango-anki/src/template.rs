use serde::{Deserialize, Serialize};
use tango_types::VocabularyEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub deck: String,
    pub model: String,
    pub front_template: String,
    pub back_template: String,
}

impl CardTemplate {
    /// Word on the front, meaning and example on the back
    pub fn vocabulary(deck: String, model: String) -> Self {
        Self {
            deck,
            model,
            front_template: "{word}<br>{phonetic}".to_string(),
            back_template: "{translation}<br><br>{example}<br>{example_translation}".to_string(),
        }
    }

    pub fn format_front(&self, entry: &VocabularyEntry) -> String {
        render(&self.front_template, entry)
    }

    pub fn format_back(&self, entry: &VocabularyEntry) -> String {
        render(&self.back_template, entry)
    }
}

fn render(template: &str, entry: &VocabularyEntry) -> String {
    // Longest placeholder first so {example} does not eat {example_translation}
    template
        .replace("{example_translation}", &entry.example_translation)
        .replace("{example}", &entry.example)
        .replace("{word}", &entry.word)
        .replace("{phonetic}", &entry.phonetic)
        .replace("{translation}", &entry.translation)
}
