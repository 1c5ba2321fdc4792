use std::fmt;

use serde::Deserialize;

use crate::letters::{ALEF, HEY, Letter, LetterTable, NUN, YOD};

/// Lexically-listed irregularity tags supplied by the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrregularKind {
    /// The root "take", which assimilates its lamed like a I-Nun root.
    Take,
    /// The root "go", irregular throughout the imperfect.
    Go,
    /// A I-Yod root that historically began with vav.
    YodVav,
    /// A hollow (II-Vav/Yod) root. Not conjugated here.
    Hollow,
    /// A geminate (II = III) root. Not conjugated here.
    Geminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstWeakness {
    Alef,
    Guttural,
    Nun,
    Yod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondWeakness {
    Guttural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdWeakness {
    Alef,
    Hey,
    Guttural,
}

/// A root's deviations from the fully regular pattern, by position, plus
/// any lexical irregularity. Computed once per verb instance; the
/// question generator deliberately overrides single slots to synthesize
/// wrong forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weaknesses {
    pub irregular: Option<IrregularKind>,
    pub i: Option<FirstWeakness>,
    pub ii: Option<SecondWeakness>,
    pub iii: Option<ThirdWeakness>,
}

/// Find a root's weak parts. Alef is itself guttural but is classified
/// separately at positions I and III, so it is tested first.
pub fn classify(letters: &LetterTable, root: &[Letter], irregular: Option<IrregularKind>) -> Weaknesses {
    let mut weaknesses = Weaknesses {
        irregular,
        ..Default::default()
    };

    if let Some(first) = root.first() {
        weaknesses.i = if first == ALEF {
            Some(FirstWeakness::Alef)
        } else if letters.is_guttural(first) {
            Some(FirstWeakness::Guttural)
        } else if first == NUN {
            Some(FirstWeakness::Nun)
        } else if first == YOD {
            Some(FirstWeakness::Yod)
        } else {
            None
        };
    }

    if let Some(second) = root.get(1) {
        if letters.is_guttural(second) {
            weaknesses.ii = Some(SecondWeakness::Guttural);
        }
    }

    if let Some(third) = root.get(2) {
        weaknesses.iii = if third == ALEF {
            Some(ThirdWeakness::Alef)
        } else if third == HEY {
            Some(ThirdWeakness::Hey)
        } else if letters.is_guttural(third) {
            Some(ThirdWeakness::Guttural)
        } else {
            None
        };
    }

    weaknesses
}

impl fmt::Display for Weaknesses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        if self.irregular.is_some() {
            parts.push("Irregular");
        }
        match self.i {
            Some(FirstWeakness::Alef) => parts.push("I Alef"),
            Some(FirstWeakness::Guttural) => parts.push("I Guttural"),
            Some(FirstWeakness::Nun) => parts.push("I Nun"),
            Some(FirstWeakness::Yod) => parts.push("I Yod"),
            None => {}
        }
        if self.ii.is_some() {
            parts.push("II Guttural");
        }
        match self.iii {
            Some(ThirdWeakness::Alef) => parts.push("III Alef"),
            Some(ThirdWeakness::Hey) => parts.push("III Hey"),
            Some(ThirdWeakness::Guttural) => parts.push("III Guttural"),
            None => {}
        }
        if parts.is_empty() {
            parts.push("Regular");
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LetterTable {
        serde_json::from_str(include_str!("../data/letters.json")).unwrap()
    }

    fn classify_str(root: &str) -> Weaknesses {
        let letters = table();
        let letts = letters.letters_of(root);
        classify(&letters, &letts, None)
    }

    #[test]
    fn test_third_alef_only() {
        let w = classify_str("מצא");
        assert_eq!(w.iii, Some(ThirdWeakness::Alef));
        assert_eq!(w.i, None);
        assert_eq!(w.ii, None);
        assert_eq!(w.irregular, None);
    }

    #[test]
    fn test_first_guttural_only() {
        let w = classify_str("עמד");
        assert_eq!(w.i, Some(FirstWeakness::Guttural));
        assert_eq!(w.ii, None);
        assert_eq!(w.iii, None);
    }

    #[test]
    fn test_alef_outranks_guttural() {
        let w = classify_str("אכל");
        assert_eq!(w.i, Some(FirstWeakness::Alef));
    }

    #[test]
    fn test_first_nun_and_yod() {
        assert_eq!(classify_str("נפל").i, Some(FirstWeakness::Nun));
        assert_eq!(classify_str("ישׁב").i, Some(FirstWeakness::Yod));
    }

    #[test]
    fn test_second_guttural() {
        assert_eq!(classify_str("בחר").ii, Some(SecondWeakness::Guttural));
    }

    #[test]
    fn test_third_hey_and_guttural() {
        assert_eq!(classify_str("בנה").iii, Some(ThirdWeakness::Hey));
        assert_eq!(classify_str("שׁלח").iii, Some(ThirdWeakness::Guttural));
    }

    #[test]
    fn test_regular_root_displays_as_regular() {
        let w = classify_str("קטל");
        assert_eq!(w, Weaknesses::default());
        assert_eq!(w.to_string(), "Regular");
    }

    #[test]
    fn test_display_lists_each_weak_position() {
        let letters = table();
        let letts = letters.letters_of("עשׂה");
        let w = classify(&letters, &letts, None);
        assert_eq!(w.to_string(), "I Guttural, III Hey");

        let letts = letters.letters_of("לקח");
        let w = classify(&letters, &letts, Some(IrregularKind::Take));
        assert_eq!(w.to_string(), "Irregular, III Guttural");
    }
}
