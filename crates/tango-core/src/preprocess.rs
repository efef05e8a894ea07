use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Comparison form of a word: NFKC, trimmed, lowercase
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        text.nfkc().collect::<String>().to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
