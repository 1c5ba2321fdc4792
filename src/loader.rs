use std::fs;
use std::path::Path;

use crate::VocabEntry;
use crate::letters::LetterTable;
use crate::verb::Paradigms;

/// Load the letter table from a JSON file
///
/// The JSON file maps each letter's canonical Unicode string to its
/// metadata record (kind, guttural/begadkefat flags, final form,
/// vowel length, transliteration, name).
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Errors
/// - File not found
/// - Invalid JSON
pub fn load_letter_table(path: &Path) -> Result<LetterTable, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse letter table from '{}': {}", path.display(), e))
}

/// Load the verb vocabulary from a JSON file
///
/// The JSON file is an array of entries:
/// ```json
/// [
///     { "root": "קטל", "translations": ["kill"], "lesson": "5" },
///     { "root": "לקח", "translations": [["take", "took"]], "irregular": "take" }
/// ]
/// ```
///
/// Entries without translations are kept, with a warning; the
/// presentation layer shows them as having no translation available.
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Errors
/// - File not found
/// - Invalid JSON
pub fn load_vocabulary(path: &Path) -> Result<Vec<VocabEntry>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;

    let vocabulary: Vec<VocabEntry> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse vocabulary from '{}': {}", path.display(), e))?;

    for entry in &vocabulary {
        if entry.translations.is_empty() {
            eprintln!("Warning: Root '{}' has no translations", entry.root);
        }
    }

    Ok(vocabulary)
}

/// Load the affix paradigm table from a JSON file
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Errors
/// - File not found
/// - Invalid JSON
pub fn load_paradigms(path: &Path) -> Result<Paradigms, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse paradigms from '{}': {}", path.display(), e))
}
