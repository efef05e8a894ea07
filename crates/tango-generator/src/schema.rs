use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::GenerateError;

/// Fields the text model must return, in the order it should produce them
pub const REQUIRED_FIELDS: [&str; 6] = [
    "word",
    "phonetic",
    "translation",
    "example",
    "exampleTranslation",
    "imagePrompt",
];

/// One card as produced by the text model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWord {
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub example: String,
    pub example_translation: String,
    pub image_prompt: String,
}

/// Gemini `responseSchema` for [`GeneratedWord`]
pub fn response_schema() -> Value {
    let properties: serde_json::Map<String, Value> = REQUIRED_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": REQUIRED_FIELDS,
        "propertyOrdering": REQUIRED_FIELDS,
    })
}

/// Remove a surrounding ``` or ```json fence if the model added one
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the info string ("json", "JSON", ...) up to the first newline
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

pub fn parse_generated_word(raw: &str) -> Result<GeneratedWord, GenerateError> {
    let body = strip_code_fence(raw);

    let word: GeneratedWord = serde_json::from_str(body)
        .map_err(|e| GenerateError::InvalidFormat(e.to_string()))?;

    let fields = [
        ("word", &word.word),
        ("phonetic", &word.phonetic),
        ("translation", &word.translation),
        ("example", &word.example),
        ("exampleTranslation", &word.example_translation),
        ("imagePrompt", &word.image_prompt),
    ];

    if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(GenerateError::InvalidFormat(format!("field `{name}` is empty")));
    }

    Ok(word)
}
