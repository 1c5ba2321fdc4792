use crate::letters::{ALEF, DAGESH, LetterTable, SHEVA, Transliteration};

/// Transliterate Hebrew text into a Latin-alphabet phonetic rendering.
///
/// The text is segmented first, then processed left to right with two
/// pieces of running state: the rendering of the most recent consonant
/// (so a strong dagesh can double it) and a record of which earlier
/// positions were vowels (so a silent sheva can be told apart from a
/// vocal one). The function is pure: the same input always yields the
/// same output.
pub fn transliterate(letters: &LetterTable, word: &str) -> String {
    let letts = letters.letters_of(word);
    let mut translit = String::new();
    let mut vowel_p: Vec<bool> = Vec::new();
    let mut last_consonant = String::new();

    for (i, letter) in letts.iter().enumerate() {
        // A silent alef is not pronounced (p. 83)
        if letter == ALEF && (i == letts.len() - 1 || !letters.is_vowel(&letts[i + 1])) {
            continue;
        }

        // A strong dagesh doubles the previous consonant. A weak dagesh
        // in a begadkefat letter is already reflected in the spelling
        // and contributes nothing.
        if letter == DAGESH {
            let weak = i > 0
                && letters.is_begadkefat(&letts[i - 1])
                && !(vowel_p.len() >= 2 && vowel_p[vowel_p.len() - 2]);
            if !weak {
                translit.push_str(&last_consonant);
            }
            continue;
        }

        // A sheva closing a syllable after a short vowel is silent (p. 14)
        if letter == SHEVA {
            let back = if i >= 2 && letts[i - 2] == ALEF { 3 } else { 2 };
            if let Some(last_vowel) = i.checked_sub(back).map(|j| letts[j].as_str()) {
                if letters.is_vowel(last_vowel)
                    && letters.is_short(last_vowel)
                    && last_vowel != SHEVA
                {
                    vowel_p.push(false);
                    continue;
                }
            }
        }

        vowel_p.push(letters.is_vowel(letter));

        match letters.transliteration(letter) {
            Some(Transliteration::Plain(rendering)) => {
                if letters.is_consonant(letter) {
                    last_consonant = rendering.clone();
                }
                translit.push_str(rendering);
            }
            Some(Transliteration::Alternating(plain, geminated)) => {
                if letts.get(i + 1).map(String::as_str) == Some(DAGESH) {
                    last_consonant = geminated.clone();
                    translit.push_str(geminated);
                } else {
                    translit.push_str(plain);
                }
            }
            None => {}
        }
    }

    translit
}
