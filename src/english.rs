use serde::Deserialize;

/// One English translation of a vocabulary entry.
///
/// Most verbs are a bare string and take the regular "-d"/"-s" suffix
/// rules. Irregular verbs are a two-element pair whose second element is
/// the literal past-tense form; the first element is either the base
/// verb or, one level deeper, a pair carrying an irregular
/// present-singular literal as well.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranslationEntry {
    Simple(String),
    Irregular(Box<TranslationEntry>, String),
}

/// Conjugate an English verb entry.
pub fn conjugate(entry: &TranslationEntry, past: bool, singular: bool, first_person: bool) -> String {
    if past {
        match entry {
            TranslationEntry::Simple(verb) => add_d(verb, singular),
            TranslationEntry::Irregular(_, past_form) => past_form.clone(),
        }
    } else if singular && !first_person {
        match entry {
            TranslationEntry::Simple(verb) => add_s(verb),
            TranslationEntry::Irregular(inner, _) => match inner.as_ref() {
                TranslationEntry::Simple(verb) => add_s(verb),
                TranslationEntry::Irregular(_, singular_form) => singular_form.clone(),
            },
        }
    } else {
        let base = base_form(entry);
        if base == "be" {
            return to_be(false, singular, first_person);
        }
        base.to_string()
    }
}

fn base_form(entry: &TranslationEntry) -> &str {
    match entry {
        TranslationEntry::Simple(verb) => verb,
        TranslationEntry::Irregular(inner, _) => base_form(inner),
    }
}

fn to_be(past: bool, singular: bool, first_person: bool) -> String {
    if past {
        return if singular { "was" } else { "were" }.to_string();
    }
    if singular {
        return if first_person { "am" } else { "is" }.to_string();
    }
    "are".to_string()
}

/// Regular past-tense formation. Phrasal verbs conjugate on their first
/// word only.
fn add_d(verb: &str, singular: bool) -> String {
    if let Some((head, rest)) = verb.split_once(' ') {
        return format!("{} {}", add_d(head, singular), rest);
    }
    if verb == "be" {
        return to_be(true, singular, false);
    }
    if verb.ends_with('e') {
        return format!("{}d", verb);
    }
    if ends_in_consonant_y(verb) {
        return format!("{}ied", &verb[..verb.len() - 1]);
    }
    format!("{}ed", verb)
}

/// Regular third-person-singular formation.
fn add_s(verb: &str) -> String {
    if let Some((head, rest)) = verb.split_once(' ') {
        return format!("{} {}", add_s(head), rest);
    }
    if verb == "be" {
        return to_be(false, true, false);
    }
    if verb.ends_with("sh") || verb.ends_with("ch") || verb.ends_with('s') || verb.ends_with('o') {
        return format!("{}es", verb);
    }
    if ends_in_consonant_y(verb) {
        return format!("{}ies", &verb[..verb.len() - 1]);
    }
    format!("{}s", verb)
}

fn ends_in_consonant_y(verb: &str) -> bool {
    let mut chars = verb.chars().rev();
    if chars.next() != Some('y') {
        return false;
    }
    match chars.next() {
        Some(c) => !"aeiou".contains(c),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(verb: &str) -> TranslationEntry {
        TranslationEntry::Simple(verb.to_string())
    }

    fn irregular(base: &str, past: &str) -> TranslationEntry {
        TranslationEntry::Irregular(Box::new(simple(base)), past.to_string())
    }

    #[test]
    fn test_present_singular_suffix_rules() {
        assert_eq!(conjugate(&simple("kill"), false, true, false), "kills");
        assert_eq!(conjugate(&simple("teach"), false, true, false), "teaches");
        assert_eq!(conjugate(&simple("reply"), false, true, false), "replies");
        assert_eq!(conjugate(&simple("push"), false, true, false), "pushes");
        assert_eq!(conjugate(&simple("pass"), false, true, false), "passes");
        assert_eq!(conjugate(&simple("do"), false, true, false), "does");
        assert_eq!(conjugate(&simple("play"), false, true, false), "plays");
    }

    #[test]
    fn test_past_suffix_rules() {
        assert_eq!(conjugate(&simple("kill"), true, true, false), "killed");
        assert_eq!(conjugate(&simple("love"), true, true, false), "loved");
        assert_eq!(conjugate(&simple("reply"), true, true, false), "replied");
        assert_eq!(conjugate(&simple("play"), true, true, false), "played");
    }

    #[test]
    fn test_irregular_past_literal() {
        let entry = irregular("eat", "ate");
        assert_eq!(conjugate(&entry, true, true, false), "ate");
        assert_eq!(conjugate(&entry, false, true, false), "eats");
        assert_eq!(conjugate(&entry, false, false, false), "eat");
    }

    #[test]
    fn test_doubly_nested_present_singular_literal() {
        let entry = TranslationEntry::Irregular(
            Box::new(irregular("go", "goes")),
            "went".to_string(),
        );
        assert_eq!(conjugate(&entry, false, true, false), "goes");
        assert_eq!(conjugate(&entry, true, true, false), "went");
        assert_eq!(conjugate(&entry, false, false, false), "go");
    }

    #[test]
    fn test_first_person_singular_uses_base_form() {
        assert_eq!(conjugate(&simple("kill"), false, true, true), "kill");
    }

    #[test]
    fn test_to_be_forms() {
        assert_eq!(conjugate(&simple("be"), true, true, false), "was");
        assert_eq!(conjugate(&simple("be"), true, false, false), "were");
        assert_eq!(conjugate(&simple("be"), false, true, false), "is");
        assert_eq!(conjugate(&simple("be"), false, true, true), "am");
        assert_eq!(conjugate(&simple("be"), false, false, false), "are");
    }

    #[test]
    fn test_phrasal_verbs_conjugate_first_word() {
        assert_eq!(conjugate(&simple("lift up"), false, true, false), "lifts up");
        assert_eq!(conjugate(&simple("lift up"), true, true, false), "lifted up");
    }

    #[test]
    fn test_deserializes_string_and_pair() {
        let entry: TranslationEntry = serde_json::from_str("\"keep\"").unwrap();
        assert_eq!(entry, simple("keep"));
        let entry: TranslationEntry = serde_json::from_str("[\"eat\", \"ate\"]").unwrap();
        assert_eq!(entry, irregular("eat", "ate"));
    }
}
