use std::collections::HashSet;

use tango_types::VocabularyEntry;

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Ordered cards and the one currently shown
#[derive(Debug, Clone, Default)]
pub struct WordStore {
    entries: Vec<VocabularyEntry>,
    current: Option<usize>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts, clamping the index into range
    pub fn from_parts(entries: Vec<VocabularyEntry>, index: Option<usize>) -> Self {
        let current = if entries.is_empty() {
            None
        } else {
            Some(index.unwrap_or(0).min(entries.len() - 1))
        };

        Self { entries, current }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    /// 1-based position and total, for the "current / total" indicator
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.entries.len()))
    }

    /// True when moving forward needs a new card
    pub fn is_at_end(&self) -> bool {
        match self.current {
            Some(i) => i + 1 >= self.entries.len(),
            None => true,
        }
    }

    /// Append a fully built card and return the resulting index
    pub fn append(&mut self, entry: VocabularyEntry, advance: bool) -> Option<usize> {
        self.entries.push(entry);

        if advance || self.current.is_none() {
            self.current = Some(self.entries.len() - 1);
        }

        self.current
    }

    pub fn previous(&mut self) -> bool {
        match self.current {
            Some(i) if i > 0 => {
                self.current = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Move to the next existing card, never past the end
    pub fn step_forward(&mut self) -> bool {
        match self.current {
            Some(i) if i + 1 < self.entries.len() => {
                self.current = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Up to `limit` most recent distinct words, oldest first
    pub fn recent_words(&self, limit: usize) -> Vec<String> {
        let preprocessor = DefaultPreprocessor;
        let mut seen = HashSet::new();
        let mut words: Vec<String> = self
            .entries
            .iter()
            .rev()
            .filter(|e| seen.insert(preprocessor.process(&e.word)))
            .take(limit)
            .map(|e| e.word.clone())
            .collect();

        words.reverse();
        words
    }

    pub fn contains_word(&self, word: &str) -> bool {
        let preprocessor = DefaultPreprocessor;
        let needle = preprocessor.process(word);
        self.entries
            .iter()
            .any(|e| preprocessor.process(&e.word) == needle)
    }

    /// Id for a card created at `now_ms`, kept strictly increasing
    pub fn next_id(&self, now_ms: u64) -> u64 {
        match self.entries.last() {
            Some(last) if last.id >= now_ms => last.id + 1,
            _ => now_ms,
        }
    }
}
