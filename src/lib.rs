//! Rule-based conjugation of Biblical Hebrew verbs in the qal stem.
//!
//! The library conjugates three-consonant roots through the perfect and
//! imperfect paradigms, recording an explanation step for every grammar
//! rule it applies along the way. Around the engine sit a
//! transliterator, a root weakness classifier, an English gloss
//! conjugator, and a multiple-choice practice question generator.
//!
//! ```
//! use hebrew_qal::{Gender, Hebrew, Number, Person, Tense};
//!
//! let hb = Hebrew::bundled().unwrap();
//! let mut verb = hb.verb("קטל", Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine);
//! verb.conjugate();
//! assert_eq!(verb.surface(), "קָטַל");
//! assert_eq!(hb.transliterate(&verb.surface()), "qatal");
//! assert_eq!(
//!     hb.translate_word("קטל", Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine),
//!     "he/it killed"
//! );
//! ```

pub mod english;
pub mod letters;
pub mod loader;
pub mod quiz;
pub mod translit;
pub mod verb;
pub mod weakness;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

pub use english::TranslationEntry;
pub use letters::LetterTable;
pub use quiz::{Mistake, Provenance, Question, QuestionGenerator};
pub use verb::{Gender, Number, Paradigms, Person, RuleNote, Step, Tense, Verb};
pub use weakness::{IrregularKind, Weaknesses};

use letters::Letter;

/// One vocabulary entry for a verb root.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    /// The root in its natural spelling (final letter forms included).
    pub root: String,
    pub translations: Vec<TranslationEntry>,
    /// The textbook lesson that introduces the root.
    pub lesson: Option<String>,
    pub irregular: Option<IrregularKind>,
    /// Lexical override for the imperfect theme vowel.
    pub theme_vowel: Option<String>,
}

/// The language environment: letter table, vocabulary, and paradigm
/// table, loaded once and shared read-only by every conjugation.
pub struct Hebrew {
    letters: LetterTable,
    vocabulary: HashMap<String, VocabEntry>,
    word_list: Vec<String>,
    paradigms: Paradigms,
}

impl Hebrew {
    pub fn new(letters: LetterTable, vocabulary: Vec<VocabEntry>, paradigms: Paradigms) -> Hebrew {
        let word_list = vocabulary.iter().map(|entry| entry.root.clone()).collect();
        // Vocabulary keys are normalized so a root can be looked up in
        // either its natural or its base-glyph spelling.
        let mut map = HashMap::new();
        for entry in vocabulary {
            map.insert(normalize_key(&letters, &entry.root), entry);
        }
        Hebrew {
            letters,
            vocabulary: map,
            word_list,
            paradigms,
        }
    }

    /// The environment built from the data files bundled into the
    /// crate.
    pub fn bundled() -> Result<Hebrew, String> {
        let letters: LetterTable = serde_json::from_str(include_str!("../data/letters.json"))
            .map_err(|e| format!("Failed to parse bundled letter table: {}", e))?;
        let vocabulary: Vec<VocabEntry> =
            serde_json::from_str(include_str!("../data/vocabulary.json"))
                .map_err(|e| format!("Failed to parse bundled vocabulary: {}", e))?;
        let paradigms: Paradigms = serde_json::from_str(include_str!("../data/paradigms.json"))
            .map_err(|e| format!("Failed to parse bundled paradigms: {}", e))?;
        Ok(Hebrew::new(letters, vocabulary, paradigms))
    }

    /// Load the environment from external JSON files.
    pub fn from_files(
        letters: &Path,
        vocabulary: &Path,
        paradigms: &Path,
    ) -> Result<Hebrew, String> {
        Ok(Hebrew::new(
            loader::load_letter_table(letters)?,
            loader::load_vocabulary(vocabulary)?,
            loader::load_paradigms(paradigms)?,
        ))
    }

    pub fn letters(&self) -> &LetterTable {
        &self.letters
    }

    pub fn paradigms(&self) -> &Paradigms {
        &self.paradigms
    }

    /// Every vocabulary root, in its natural spelling and in lesson
    /// order.
    pub fn word_list(&self) -> &[String] {
        &self.word_list
    }

    /// Look up a root's vocabulary entry. The spelling may use final
    /// letter forms or not.
    pub fn vocab_entry(&self, root: &str) -> Option<&VocabEntry> {
        self.vocabulary.get(&normalize_key(&self.letters, root))
    }

    pub fn letters_of(&self, text: &str) -> Vec<Letter> {
        self.letters.letters_of(text)
    }

    pub fn transliterate(&self, word: &str) -> String {
        translit::transliterate(&self.letters, word)
    }

    /// Rewrite text so its last consonant uses the final orthographic
    /// form where one exists.
    pub fn final_letter_form(&self, text: &str) -> String {
        self.letters.display_form(&self.letters_of(text))
    }

    /// Classify a root's weaknesses, including any lexical irregularity
    /// the vocabulary records for it.
    pub fn weaknesses(&self, root: &str) -> Weaknesses {
        let letts: Vec<Letter> = self
            .letters
            .letters_of(root)
            .iter()
            .map(|letter| self.letters.regular_form(letter).to_string())
            .collect();
        let irregular = self.vocab_entry(root).and_then(|entry| entry.irregular);
        weakness::classify(&self.letters, &letts, irregular)
    }

    /// Build an unconjugated verb form for the given parameters.
    pub fn verb<'a>(
        &'a self,
        root: &str,
        tense: Tense,
        person: Person,
        number: Number,
        gender: Gender,
    ) -> Verb<'a> {
        Verb::new(self, root, tense, person, number, gender)
    }

    /// Every English translation of a root, conjugated. An unknown root
    /// yields an empty list rather than an error.
    pub fn translate_root(
        &self,
        root: &str,
        past: bool,
        singular: bool,
        first_person: bool,
    ) -> Vec<String> {
        match self.vocab_entry(root) {
            Some(entry) => entry
                .translations
                .iter()
                .map(|translation| english::conjugate(translation, past, singular, first_person))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The full English gloss for a verb form, pronoun included:
    /// "he/it killed", "they (f) will fall", "you (ms) kept". An
    /// unknown root yields an empty string rather than a bare pronoun.
    pub fn translate_word(
        &self,
        root: &str,
        tense: Tense,
        person: Person,
        number: Number,
        gender: Gender,
    ) -> String {
        let past = tense == Tense::Perfect;
        // In the imperfect the verb follows "will" and stays in its
        // base form, so the singular flag is only threaded through for
        // the past (it decides was/were).
        let conjugations = self.translate_root(
            root,
            past,
            past && number == Number::Singular,
            person == Person::First,
        );
        if conjugations.is_empty() {
            return String::new();
        }

        let mut pronoun = match person {
            Person::First => match number {
                Number::Singular => "I ".to_string(),
                Number::Plural => "we ".to_string(),
            },
            Person::Second => format!("you ({}{}) ", gender.letter(), number.letter()),
            Person::Third => match number {
                Number::Singular => match gender {
                    Gender::Masculine => "he/it ".to_string(),
                    Gender::Feminine => "she/it ".to_string(),
                },
                Number::Plural => {
                    let mut pronoun = "they ".to_string();
                    if tense == Tense::Imperfect {
                        pronoun.push_str(&format!("({}) ", gender.letter()));
                    }
                    pronoun
                }
            },
        };
        if tense == Tense::Imperfect {
            pronoun.push_str("will ");
        }
        pronoun + &conjugations.join(", ")
    }
}

fn normalize_key(letters: &LetterTable, root: &str) -> String {
    letters
        .letters_of(root)
        .iter()
        .map(|letter| letters.regular_form(letter).to_string())
        .collect::<Vec<Letter>>()
        .concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hb() -> Hebrew {
        Hebrew::bundled().unwrap()
    }

    #[test]
    fn test_bundled_data_loads() {
        let hb = hb();
        assert!(!hb.word_list().is_empty());
        assert!(hb.vocab_entry("קטל").is_some());
    }

    #[test]
    fn test_vocab_lookup_tolerates_final_forms() {
        let hb = hb();
        // natural spelling ends in final kaf; base spelling does not
        assert!(hb.vocab_entry("מלך").is_some());
        assert!(hb.vocab_entry("מלכ").is_some());
        assert!(hb.vocab_entry("זזז").is_none());
    }

    #[test]
    fn test_weaknesses_include_lexical_irregularity() {
        let hb = hb();
        assert_eq!(hb.weaknesses("לקח").irregular, Some(IrregularKind::Take));
        assert_eq!(hb.weaknesses("קום").irregular, Some(IrregularKind::Hollow));
        assert_eq!(hb.weaknesses("קטל").irregular, None);
    }

    #[test]
    fn test_final_letter_form() {
        let hb = hb();
        assert_eq!(hb.final_letter_form("מלכ"), "מלך");
        assert_eq!(hb.final_letter_form("קטל"), "קטל");
    }

    #[test]
    fn test_translate_root() {
        let hb = hb();
        assert_eq!(hb.translate_root("קטל", false, true, false), vec!["kills"]);
        assert_eq!(hb.translate_root("לקח", true, true, false), vec!["took"]);
        assert!(hb.translate_root("זזז", true, true, false).is_empty());
    }

    #[test]
    fn test_translate_word_pronouns() {
        let hb = hb();
        assert_eq!(
            hb.translate_word("קטל", Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine),
            "he/it killed"
        );
        assert_eq!(
            hb.translate_word("קטל", Tense::Perfect, Person::First, Number::Singular, Gender::Masculine),
            "I killed"
        );
        assert_eq!(
            hb.translate_word("קטל", Tense::Perfect, Person::Second, Number::Singular, Gender::Masculine),
            "you (ms) killed"
        );
        assert_eq!(
            hb.translate_word("נפל", Tense::Imperfect, Person::Third, Number::Plural, Gender::Feminine),
            "they (f) will fall"
        );
        assert_eq!(
            hb.translate_word("קטל", Tense::Imperfect, Person::Third, Number::Singular, Gender::Feminine),
            "she/it will kill"
        );
    }

    #[test]
    fn test_translate_word_unknown_root_is_empty() {
        let hb = hb();
        assert_eq!(
            hb.translate_word("זזז", Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine),
            ""
        );
    }

    #[test]
    fn test_translate_word_joins_multiple_senses() {
        let hb = hb();
        assert_eq!(
            hb.translate_word("קרא", Tense::Perfect, Person::Third, Number::Singular, Gender::Masculine),
            "he/it called, read"
        );
    }

    #[test]
    fn test_verb_convenience_constructor() {
        let hb = hb();
        let mut verb = hb.verb(
            "קטל",
            Tense::Imperfect,
            Person::Third,
            Number::Singular,
            Gender::Masculine,
        );
        verb.conjugate();
        assert_eq!(verb.surface(), "יִקְטֹל");
    }
}
