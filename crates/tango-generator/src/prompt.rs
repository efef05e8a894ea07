use crate::WordRequest;

/// Instruction text for one new vocabulary card
pub fn build_word_prompt(request: &WordRequest) -> String {
    let mut prompt = format!(
        "Generate one useful {learning} word for a {native}-speaking learner. \
         Return the word, its IPA phonetic transcription, its {native} translation, \
         a short natural {learning} example sentence using the word, the {native} \
         translation of that sentence, and a short English prompt for an illustration \
         of the word with no text in the picture.",
        learning = request.learning_language,
        native = request.native_language,
    );

    if !request.exclude.is_empty() {
        prompt.push_str(" Do not use any of these words: ");
        prompt.push_str(&request.exclude.join(", "));
        prompt.push('.');
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(exclude: &[&str]) -> WordRequest {
        WordRequest {
            learning_language: "English".into(),
            native_language: "Russian".into(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn lists_excluded_words() {
        let prompt = build_word_prompt(&request(&["apple", "river"]));
        assert!(prompt.contains("English word for a Russian-speaking learner"));
        assert!(prompt.ends_with("Do not use any of these words: apple, river."));
    }

    #[test]
    fn no_exclusion_clause_when_empty() {
        assert!(!build_word_prompt(&request(&[])).contains("Do not use"));
    }
}
