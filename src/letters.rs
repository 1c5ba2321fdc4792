use std::collections::HashMap;

use serde::Deserialize;

// Pointing marks, in the traditional short-to-long ordering.
pub const DAGESH: &str = "\u{05BC}";
pub const SHEVA: &str = "\u{05B0}";
pub const CHATEF_SEGOL: &str = "\u{05B1}";
pub const CHATEF_PATACH: &str = "\u{05B2}";
pub const CHATEF_QAMETS: &str = "\u{05B3}";
pub const CHIREQ: &str = "\u{05B4}";
pub const TSERE: &str = "\u{05B5}";
pub const SEGOL: &str = "\u{05B6}";
pub const PATACH: &str = "\u{05B7}";
pub const QAMETS: &str = "\u{05B8}";
pub const CHOLEM: &str = "\u{05B9}";
pub const QIBBUTS: &str = "\u{05BB}";
pub const QAMETS_CHATUF: &str = "\u{05C7}";
pub const CHIREQ_YOD: &str = "\u{05B4}\u{05D9}";
pub const CHOLEM_VAV: &str = "\u{05D5}\u{05B9}";
pub const SHUREQ: &str = "\u{05D5}\u{05BC}";

// Consonants the conjugation rules name directly.
pub const ALEF: &str = "א";
pub const HEY: &str = "ה";
pub const YOD: &str = "י";
pub const KAF: &str = "כ";
pub const NUN: &str = "נ";
pub const TAV: &str = "ת";

/// One atomic unit of Hebrew orthography: a consonant, a full vowel sign,
/// or a pointing mark. Compound vowels (chireq-yod, cholem-vav, shureq)
/// are two codepoints but one letter.
pub type Letter = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterKind {
    Consonant,
    Vowel,
    Mark,
}

/// Transliteration of a single letter. Begadkefat consonants carry an
/// alternating pair: the plain (fricative) rendering and the rendering
/// used when the letter carries a dagesh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Transliteration {
    Plain(String),
    Alternating(String, String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterRecord {
    #[serde(rename = "type")]
    pub kind: LetterKind,
    #[serde(default)]
    pub is_guttural: bool,
    #[serde(default)]
    pub is_begadkefat: bool,
    #[serde(default)]
    pub is_final: bool,
    /// The final-form glyph for a consonant that has one.
    #[serde(rename = "final")]
    pub final_form: Option<String>,
    /// Back-reference from a final form to its regular form.
    pub regular: Option<String>,
    /// Vowel length class: 1 = short, 3 = long.
    pub length: Option<u8>,
    pub transliteration: Option<Transliteration>,
    pub name: String,
}

/// Static per-letter metadata, keyed by the canonical Unicode string of
/// each letter. All queries return a safe default for unknown strings so
/// that stray punctuation in pasted text never faults.
#[derive(Debug, Clone, Deserialize)]
pub struct LetterTable(pub HashMap<String, LetterRecord>);

impl LetterTable {
    pub fn get(&self, letter: &str) -> Option<&LetterRecord> {
        self.0.get(letter)
    }

    pub fn is_consonant(&self, letter: &str) -> bool {
        self.get(letter)
            .map(|r| r.is_final || r.kind == LetterKind::Consonant)
            .unwrap_or(false)
    }

    pub fn is_vowel(&self, letter: &str) -> bool {
        self.get(letter)
            .map(|r| r.kind == LetterKind::Vowel)
            .unwrap_or(false)
    }

    pub fn is_guttural(&self, letter: &str) -> bool {
        self.get(letter).map(|r| r.is_guttural).unwrap_or(false)
    }

    pub fn is_begadkefat(&self, letter: &str) -> bool {
        self.get(letter).map(|r| r.is_begadkefat).unwrap_or(false)
    }

    pub fn is_final_form(&self, letter: &str) -> bool {
        self.get(letter).map(|r| r.is_final).unwrap_or(false)
    }

    pub fn has_final_form(&self, letter: &str) -> bool {
        self.final_form(letter).is_some()
    }

    pub fn final_form(&self, letter: &str) -> Option<&str> {
        self.get(letter).and_then(|r| r.final_form.as_deref())
    }

    /// The regular form of a letter, mapping final forms back to their
    /// base glyph. Letters without a final variant are their own
    /// regular form.
    pub fn regular_form<'a>(&'a self, letter: &'a str) -> &'a str {
        self.get(letter)
            .and_then(|r| r.regular.as_deref())
            .unwrap_or(letter)
    }

    pub fn is_short(&self, letter: &str) -> bool {
        self.get(letter).and_then(|r| r.length) == Some(1)
    }

    pub fn is_long(&self, letter: &str) -> bool {
        self.get(letter).and_then(|r| r.length) == Some(3)
    }

    pub fn name(&self, letter: &str) -> &str {
        self.get(letter).map(|r| r.name.as_str()).unwrap_or("")
    }

    /// Transliteration of a letter, resolving final forms through their
    /// regular-form back-reference.
    pub fn transliteration(&self, letter: &str) -> Option<&Transliteration> {
        let record = self.get(letter)?;
        if record.is_final {
            let regular = record.regular.as_deref()?;
            return self.get(regular)?.transliteration.as_ref();
        }
        record.transliteration.as_ref()
    }

    /// Split Hebrew text into a list of letters.
    ///
    /// Scans left to right, testing the two-codepoint substring before the
    /// one-codepoint substring so that compound vowels (chireq-yod,
    /// cholem-vav, shureq) and pointed shin/sin come out as single
    /// letters. Unrecognized codepoints (punctuation, spaces) are skipped.
    pub fn letters_of(&self, text: &str) -> Vec<Letter> {
        let chars: Vec<char> = text.chars().collect();
        let mut letts = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            if i + 1 < chars.len() {
                let pair: String = chars[i..i + 2].iter().collect();
                if self.0.contains_key(&pair) {
                    letts.push(pair);
                    i += 2;
                    continue;
                }
            }
            let single = chars[i].to_string();
            if self.0.contains_key(&single) {
                letts.push(single);
            }
            i += 1;
        }
        letts
    }

    /// Render a letter sequence as a string, substituting the final form
    /// of the last consonant where one exists. The substitution is never
    /// stored back into the sequence: final forms must revert if the
    /// word mutates further.
    pub fn display_form(&self, letts: &[Letter]) -> String {
        let mut letts = letts.to_vec();
        for i in (0..letts.len()).rev() {
            let letter = letts[i].clone();
            if self.is_consonant(&letter) || (self.is_vowel(&letter) && self.is_long(&letter)) {
                if let Some(form) = self.final_form(&letter) {
                    letts[i] = form.to_string();
                }
                break;
            }
        }
        letts.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LetterTable {
        serde_json::from_str(include_str!("../data/letters.json")).unwrap()
    }

    #[test]
    fn test_segments_simple_word() {
        let letters = table();
        assert_eq!(letters.letters_of("קטל"), vec!["ק", "ט", "ל"]);
    }

    #[test]
    fn test_segments_compound_vowels_as_single_letters() {
        let letters = table();
        // qamets + tav + shureq: the vav-dagesh pair is one shureq letter
        let letts = letters.letters_of("קָטְלוּ");
        assert_eq!(letts, vec!["ק", QAMETS, "ט", SHEVA, "ל", SHUREQ]);

        let letts = letters.letters_of("בָּנִיתָ");
        assert_eq!(
            letts,
            vec!["ב", DAGESH, QAMETS, "נ", CHIREQ_YOD, TAV, QAMETS]
        );
    }

    #[test]
    fn test_segments_pointed_shin() {
        let letters = table();
        let letts = letters.letters_of("שׁמר");
        assert_eq!(letts, vec!["שׁ", "מ", "ר"]);
        assert!(letters.is_consonant("שׁ"));
    }

    #[test]
    fn test_skips_unrecognized_characters() {
        let letters = table();
        // sof pasuq, space, and Latin text are not letters
        let letts = letters.letters_of("קָם׃ abc");
        assert_eq!(letts, vec!["ק", QAMETS, "ם"]);
    }

    #[test]
    fn test_predicates() {
        let letters = table();
        assert!(letters.is_guttural("ע"));
        assert!(letters.is_guttural("א"));
        assert!(!letters.is_guttural("ק"));
        assert!(letters.is_begadkefat("ב"));
        assert!(!letters.is_begadkefat("ש"));
        assert!(letters.is_vowel(SHEVA));
        assert!(letters.is_short(PATACH));
        assert!(letters.is_long(QAMETS));
        assert!(!letters.is_vowel(DAGESH));
        assert!(!letters.is_consonant(DAGESH));
        // unknown strings answer false everywhere
        assert!(!letters.is_consonant("!"));
        assert!(!letters.is_vowel("!"));
    }

    #[test]
    fn test_final_forms() {
        let letters = table();
        assert_eq!(letters.final_form("כ"), Some("ך"));
        assert_eq!(letters.regular_form("ך"), "כ");
        assert_eq!(letters.regular_form("ק"), "ק");
        assert!(letters.is_consonant("ך"));
    }

    #[test]
    fn test_display_form_substitutes_last_consonant() {
        let letters = table();
        let letts = letters.letters_of("מָלַכ");
        assert_eq!(letters.display_form(&letts), "מָלַך");
    }

    #[test]
    fn test_display_form_stops_at_long_vowel() {
        let letters = table();
        // the word ends in a shureq; the nun before it must not change
        let letts = letters.letters_of("קָטְלנוּ");
        let display = letters.display_form(&letts);
        assert!(display.contains('נ'));
        assert!(!display.contains('ן'));
    }

    #[test]
    fn test_display_form_looks_past_trailing_sheva() {
        let letters = table();
        let letts = vec![
            "מ".to_string(),
            QAMETS.to_string(),
            "ל".to_string(),
            PATACH.to_string(),
            "כ".to_string(),
            SHEVA.to_string(),
        ];
        assert_eq!(letters.display_form(&letts), "מָלַךְ");
    }
}
