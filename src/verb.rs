use serde::Deserialize;

use crate::Hebrew;
use crate::letters::{
    CHATEF_PATACH, CHATEF_SEGOL, CHIREQ, CHIREQ_YOD, CHOLEM, DAGESH, KAF, Letter, NUN, PATACH,
    QAMETS, SEGOL, SHEVA, TAV, TSERE, YOD,
};
use crate::weakness::{self, FirstWeakness, IrregularKind, SecondWeakness, ThirdWeakness, Weaknesses};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tense {
    Perfect,
    Imperfect,
}

impl Tense {
    pub fn name(self) -> &'static str {
        match self {
            Tense::Perfect => "perfect",
            Tense::Imperfect => "imperfect",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Tense::Perfect => Tense::Imperfect,
            Tense::Imperfect => Tense::Perfect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    pub fn as_number(self) -> u8 {
        match self {
            Person::First => 1,
            Person::Second => 2,
            Person::Third => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub fn letter(self) -> char {
        match self {
            Number::Singular => 's',
            Number::Plural => 'p',
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Number::Singular => Number::Plural,
            Number::Plural => Number::Singular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    pub fn letter(self) -> char {
        match self {
            Gender::Masculine => 'm',
            Gender::Feminine => 'f',
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Gender::Masculine => Gender::Feminine,
            Gender::Feminine => Gender::Masculine,
        }
    }
}

/// A (prefix, suffix) pair from the paradigm table. Either half may be
/// empty.
pub type AffixPair = (String, String);

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AffixForm {
    Common(AffixPair),
    Gendered { m: AffixPair, f: AffixPair },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonForms {
    #[serde(rename = "1")]
    pub first: AffixForm,
    #[serde(rename = "2")]
    pub second: AffixForm,
    #[serde(rename = "3")]
    pub third: AffixForm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TenseParadigm {
    pub singular: PersonForms,
    pub plural: PersonForms,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StemParadigm {
    pub perfect: TenseParadigm,
    pub imperfect: TenseParadigm,
}

/// The affix table, nested by stem, tense, number, and person. Affixes
/// are stored without the doubling mark in tav-initial suffixes and
/// without the weak dagesh in begadkefat prefixes; the engine inserts
/// both where the spelling calls for them.
#[derive(Debug, Clone, Deserialize)]
pub struct Paradigms {
    pub qal: StemParadigm,
}

impl Paradigms {
    pub fn affixes(&self, tense: Tense, person: Person, number: Number, gender: Gender) -> &AffixPair {
        let tense_paradigm = match tense {
            Tense::Perfect => &self.qal.perfect,
            Tense::Imperfect => &self.qal.imperfect,
        };
        let forms = match number {
            Number::Singular => &tense_paradigm.singular,
            Number::Plural => &tense_paradigm.plural,
        };
        let form = match person {
            Person::First => &forms.first,
            Person::Second => &forms.second,
            Person::Third => &forms.third,
        };
        match form {
            AffixForm::Common(pair) => pair,
            AffixForm::Gendered { m, f } => match gender {
                Gender::Masculine => m,
                Gender::Feminine => f,
            },
        }
    }
}

/// One grammar-rule observation inside an explanation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNote {
    pub rule: String,
    pub description: String,
    /// Grammar-book page citation, where one was recorded.
    pub reference: Option<String>,
}

/// One stage of the conjugation, with the word rendered before and
/// after the stage ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: String,
    pub before: String,
    pub after: String,
    pub notes: Vec<RuleNote>,
}

/// A single verb form being conjugated.
///
/// The conjugation runs as a fixed pipeline of rule stages, each
/// mutating the letter sequence and recording an explanation step when
/// it applies. The parameter fields and the weakness vector are public
/// so a caller can perturb them before calling [`Verb::conjugate`]; the
/// question generator does exactly that to synthesize wrong answers.
pub struct Verb<'a> {
    hb: &'a Hebrew,
    root: Vec<Letter>,
    letts: Vec<Letter>,

    pub tense: Tense,
    pub person: Person,
    pub number: Number,
    pub gender: Gender,
    pub weaknesses: Weaknesses,
    pub theme_vowel_override: Option<Letter>,

    vocab_theme: Option<Letter>,
    steps: Vec<Step>,
    supported: bool,
    prefix_len: usize,
    suffix_len: usize,
    suffix: String,
    conjugated: bool,
}

impl<'a> Verb<'a> {
    pub fn new(
        hb: &'a Hebrew,
        root: &str,
        tense: Tense,
        person: Person,
        number: Number,
        gender: Gender,
    ) -> Verb<'a> {
        // Final forms in the root spelling are normalized away so the
        // rule stages only ever see base glyphs.
        let root: Vec<Letter> = hb
            .letters()
            .letters_of(root)
            .iter()
            .map(|letter| hb.letters().regular_form(letter).to_string())
            .collect();
        let entry = hb.vocab_entry(&root.concat());
        let weaknesses =
            weakness::classify(hb.letters(), &root, entry.and_then(|e| e.irregular));
        let vocab_theme = entry.and_then(|e| e.theme_vowel.clone());

        Verb {
            hb,
            letts: root.clone(),
            root,
            tense,
            person,
            number,
            gender,
            weaknesses,
            theme_vowel_override: None,
            vocab_theme,
            steps: Vec::new(),
            supported: true,
            prefix_len: 0,
            suffix_len: 0,
            suffix: String::new(),
            conjugated: false,
        }
    }

    /// The current word, rendered with the final form of the last
    /// consonant where one exists. The substitution is computed per
    /// call and never written back into the letter sequence.
    pub fn surface(&self) -> String {
        self.hb.letters().display_form(&self.letts)
    }

    /// The normalized root, rendered with its natural final-letter
    /// spelling.
    pub fn root_surface(&self) -> String {
        self.hb.letters().display_form(&self.root)
    }

    /// The normalized root as a vocabulary key.
    pub fn root_text(&self) -> String {
        self.root.concat()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// False once the conjugation has rejected the root's weakness
    /// class. Rejected forms keep the bare root as their output.
    pub fn supported(&self) -> bool {
        self.supported
    }

    /// The imperfect theme vowel for this form, honoring a caller
    /// override first and the vocabulary's lexical override second.
    pub fn theme_vowel(&self) -> Letter {
        if let Some(vowel) = &self.theme_vowel_override {
            return vowel.clone();
        }
        if let Some(vowel) = &self.vocab_theme {
            return vowel.clone();
        }
        let w = &self.weaknesses;
        if w.iii == Some(ThirdWeakness::Hey) {
            return SEGOL.to_string();
        }
        if w.iii == Some(ThirdWeakness::Alef) {
            return QAMETS.to_string();
        }
        if w.ii == Some(SecondWeakness::Guttural) || w.iii == Some(ThirdWeakness::Guttural) {
            return PATACH.to_string();
        }
        if w.i == Some(FirstWeakness::Yod) && w.irregular == Some(IrregularKind::YodVav) {
            return TSERE.to_string();
        }
        CHOLEM.to_string()
    }

    /// Run the full rule pipeline. Idempotent: a second call returns
    /// without touching the word again.
    pub fn conjugate(&mut self) -> &mut Self {
        if self.conjugated {
            return self;
        }
        self.conjugated = true;

        if let Some(reason) = self.rejection() {
            self.supported = false;
            let form = self.surface();
            self.steps.push(Step {
                title: "Unsupported root".to_string(),
                before: form.clone(),
                after: form,
                notes: vec![RuleNote {
                    rule: "unsupported".to_string(),
                    description: reason,
                    reference: None,
                }],
            });
            return self;
        }

        self.create_base_form();
        self.lengthen_theme();
        self.add_affixes();
        self.attract_guttural();
        self.accommodate_third_weak();
        self.assimilate_first();
        self.assimilate_nun();
        self.fix_trailing_kaf();
        self.finalize_spelling();
        self
    }

    fn rejection(&self) -> Option<String> {
        if self.root.len() != 3 {
            return Some(format!(
                "A root needs exactly three consonants; this one has {}.",
                self.root.len()
            ));
        }
        let w = &self.weaknesses;
        if w.ii == Some(SecondWeakness::Guttural) {
            return Some("II Guttural roots are outside the supported rule set.".to_string());
        }
        match w.irregular {
            Some(IrregularKind::Hollow) => {
                return Some("Hollow roots are outside the supported rule set.".to_string());
            }
            Some(IrregularKind::Geminate) => {
                return Some("Geminate roots are outside the supported rule set.".to_string());
            }
            _ => {}
        }
        if self.tense == Tense::Imperfect {
            if w.i == Some(FirstWeakness::Yod) {
                return Some("I Yod roots are not supported in the imperfect.".to_string());
            }
            if w.i == Some(FirstWeakness::Alef) {
                return Some("I Alef roots are not supported in the imperfect.".to_string());
            }
            if w.irregular == Some(IrregularKind::Go) {
                return Some("This root is irregular in the imperfect.".to_string());
            }
        }
        None
    }

    fn push_step(&mut self, title: &str, before: String, rule: &str, description: String, reference: Option<&str>) {
        let after = self.surface();
        self.steps.push(Step {
            title: title.to_string(),
            before,
            after,
            notes: vec![RuleNote {
                rule: rule.to_string(),
                description,
                reference: reference.map(str::to_string),
            }],
        });
    }

    // Stage 1: interleave the root with the tense's vowel pattern.
    fn create_base_form(&mut self) {
        let hb = self.hb;
        let before = self.surface();

        let (first_vowel, theme, description) = match self.tense {
            Tense::Perfect => (
                QAMETS.to_string(),
                PATACH.to_string(),
                "First, we create the base form of the qal perfect paradigm, with qamets and patach.".to_string(),
            ),
            Tense::Imperfect => {
                let theme = self.theme_vowel();
                let description = format!(
                    "First, we create the base form of the qal imperfect paradigm, with sheva and the theme vowel ({}).",
                    hb.letters().name(&theme)
                );
                (SHEVA.to_string(), theme, description)
            }
        };

        self.letts = vec![
            self.root[0].clone(),
            first_vowel,
            self.root[1].clone(),
            theme,
            self.root[2].clone(),
        ];
        self.push_step("Creating the base form", before, "base-form", description, None);
    }

    // Stage 2: a weak third letter cannot close its syllable, so the
    // perfect's patach lengthens.
    fn lengthen_theme(&mut self) {
        if self.tense != Tense::Perfect {
            return;
        }
        if !matches!(
            self.weaknesses.iii,
            Some(ThirdWeakness::Alef | ThirdWeakness::Hey)
        ) {
            return;
        }
        let before = self.surface();
        self.letts[3] = QAMETS.to_string();
        self.push_step(
            "Compensatory lengthening",
            before,
            "compensatory-lengthening",
            "The weak third letter cannot close its syllable, so the patach lengthens into a qamets.".to_string(),
            Some("p. 25"),
        );
    }

    // Stage 3: attach the paradigm's prefix and suffix, reducing the
    // vowel the suffix displaces.
    fn add_affixes(&mut self) {
        let hb = self.hb;
        let before = self.surface();

        let (prefix, suffix) = hb
            .paradigms()
            .affixes(self.tense, self.person, self.number, self.gender)
            .clone();

        let mut description = String::from(if prefix.is_empty() && suffix.is_empty() {
            "Lucky for us, this is the perfect 3ms form; we don't have to add anything!"
        } else if prefix.is_empty() {
            "Now, we create the form for the verb, adding a suffix"
        } else if suffix.is_empty() {
            "Now, we create the form for the verb, adding a prefix"
        } else {
            "Now, we create the form for the verb, adding a prefix and a suffix"
        });

        if suffix == "ָה" || suffix == "וּ" || suffix == "ִי" {
            description.push_str(&format!(
                ", shortening the {} into a sheva",
                hb.letters().name(&self.letts[3])
            ));
            self.letts[3] = SHEVA.to_string();
        } else if suffix == "ְתֶם" || suffix == "ְתֶן" {
            description.push_str(&format!(
                ", shortening the {} into a sheva",
                hb.letters().name(&self.letts[1])
            ));
            self.letts[1] = SHEVA.to_string();
        }
        if !prefix.is_empty() || !suffix.is_empty() {
            description.push('.');
        }

        let prefix_letts = hb.letters().letters_of(&prefix);
        let mut suffix_letts = hb.letters().letters_of(&suffix);

        // A tav-initial suffix takes a dagesh after the tav, unless the
        // root's weak third letter leaves the syllable open.
        let third_weak = matches!(
            self.weaknesses.iii,
            Some(ThirdWeakness::Alef | ThirdWeakness::Hey)
        );
        if !third_weak
            && suffix_letts.len() >= 2
            && suffix_letts[0] == SHEVA
            && suffix_letts[1] == TAV
        {
            suffix_letts.insert(2, DAGESH.to_string());
        }

        self.prefix_len = prefix_letts.len();
        self.suffix_len = suffix_letts.len();
        self.suffix = suffix;

        let mut letts = prefix_letts;
        letts.append(&mut self.letts);
        letts.extend(suffix_letts);
        self.letts = letts;

        self.push_step("Adding affixes", before, "affixes", description, None);
    }

    // Stage 4: gutturals attract a-class vowels (including alef at
    // position I in the perfect).
    fn attract_guttural(&mut self) {
        if !matches!(
            self.weaknesses.i,
            Some(FirstWeakness::Guttural | FirstWeakness::Alef)
        ) {
            return;
        }
        let base = self.prefix_len + 1;
        if self.letts.get(base).map(String::as_str) != Some(SHEVA) {
            return;
        }
        let before = self.surface();
        let mut notes = Vec::new();

        match self.tense {
            Tense::Perfect => {
                self.letts[base] = CHATEF_PATACH.to_string();
                notes.push(RuleNote {
                    rule: "guttural-attraction".to_string(),
                    description: "The guttural first letter prefers an a-class vowel; its sheva becomes a chatef-patach.".to_string(),
                    reference: None,
                });
            }
            Tense::Imperfect => {
                if self.person == Person::First && self.number == Number::Singular {
                    self.letts[base] = CHATEF_SEGOL.to_string();
                    notes.push(RuleNote {
                        rule: "guttural-attraction".to_string(),
                        description: "Next to the alef prefix's segol, the guttural takes a chatef-segol.".to_string(),
                        reference: None,
                    });
                } else if self.letts.get(base + 2).map(String::as_str) == Some(SHEVA) {
                    self.letts[base] = PATACH.to_string();
                    notes.push(RuleNote {
                        rule: "guttural-attraction".to_string(),
                        description: "With a sheva in the next syllable, the guttural takes a full patach.".to_string(),
                        reference: None,
                    });
                } else {
                    self.letts[base] = CHATEF_PATACH.to_string();
                    notes.push(RuleNote {
                        rule: "guttural-attraction".to_string(),
                        description: "The guttural first letter prefers an a-class vowel; its sheva becomes a chatef-patach.".to_string(),
                        reference: None,
                    });
                }
                if self.letts[1] == CHIREQ {
                    self.letts[1] = PATACH.to_string();
                    notes.push(RuleNote {
                        rule: "prefix-vowel".to_string(),
                        description: "The prefix vowel changes from chireq to patach before the guttural.".to_string(),
                        reference: None,
                    });
                }
            }
        }

        let after = self.surface();
        self.steps.push(Step {
            title: "I Guttural".to_string(),
            before,
            after,
            notes,
        });
    }

    // Stage 5: III-Hey and III-Alef roots reshape the theme vowel and
    // third letter around the suffix that was attached.
    fn accommodate_third_weak(&mut self) {
        let third_weakness = match self.weaknesses.iii {
            Some(w @ (ThirdWeakness::Alef | ThirdWeakness::Hey)) => w,
            _ => return,
        };
        let theme = self.prefix_len + 3;
        let third = self.prefix_len + 4;
        let before = self.surface();
        let mut notes = Vec::new();

        if third_weakness == ThirdWeakness::Hey {
            match self.tense {
                Tense::Perfect => {
                    if self.suffix == "ָה" {
                        self.letts[third] = TAV.to_string();
                        notes.push(RuleNote {
                            rule: "hey-to-tav".to_string(),
                            description: "Before the vowel suffix, the hey changes into a tav.".to_string(),
                            reference: None,
                        });
                    } else if self.suffix == "וּ" {
                        self.letts.drain(theme..=third);
                        notes.push(RuleNote {
                            rule: "hey-elision".to_string(),
                            description: "The weak hey and its vowel drop out before the vowel suffix.".to_string(),
                            reference: None,
                        });
                    } else if !self.suffix.is_empty() {
                        self.letts[theme] = CHIREQ_YOD.to_string();
                        self.letts.remove(third);
                        notes.push(RuleNote {
                            rule: "hey-contraction".to_string(),
                            description: "The qamets and hey contract into a chireq-yod before the suffix.".to_string(),
                            reference: None,
                        });
                    }
                }
                Tense::Imperfect => {
                    if self.suffix == "וּ" || self.suffix == "ִי" {
                        self.letts.drain(theme..=third);
                        notes.push(RuleNote {
                            rule: "hey-elision".to_string(),
                            description: "The weak hey and its vowel drop out before the vowel suffix.".to_string(),
                            reference: None,
                        });
                    } else if self.suffix == "ְנָה" {
                        self.letts[third] = YOD.to_string();
                        notes.push(RuleNote {
                            rule: "hey-to-yod".to_string(),
                            description: "The hey becomes a yod before the nah suffix.".to_string(),
                            reference: None,
                        });
                    }
                }
            }
        } else if self.tense == Tense::Imperfect && self.suffix == "ְנָה" {
            self.letts[theme] = SEGOL.to_string();
            notes.push(RuleNote {
                rule: "alef-theme".to_string(),
                description: "The theme vowel becomes a segol before the nah suffix.".to_string(),
                reference: None,
            });
        }

        // A silent third letter cannot carry the suffix's leading
        // sheva before tav or nun.
        if self.suffix_len >= 2 {
            let idx = self.letts.len() - self.suffix_len;
            let next = self.letts[idx + 1].as_str();
            if self.letts[idx] == SHEVA && (next == TAV || next == NUN) {
                self.letts.remove(idx);
                self.suffix_len -= 1;
                notes.push(RuleNote {
                    rule: "suffix-sheva".to_string(),
                    description: "The suffix loses its leading sheva after the weak third letter.".to_string(),
                    reference: None,
                });
            }
        }

        if notes.is_empty() {
            return;
        }
        let after = self.surface();
        let title = match third_weakness {
            ThirdWeakness::Hey => "III Hey",
            _ => "III Alef",
        };
        self.steps.push(Step {
            title: title.to_string(),
            before,
            after,
            notes,
        });
    }

    // Stage 6: a nun (or the lamed of the one root that acts like one)
    // assimilates into the next consonant in the imperfect.
    fn assimilate_first(&mut self) {
        if self.tense != Tense::Imperfect {
            return;
        }
        let take = self.weaknesses.irregular == Some(IrregularKind::Take);
        if self.weaknesses.i != Some(FirstWeakness::Nun) && !take {
            return;
        }
        let base = self.prefix_len + 1;
        if self.letts.get(base).map(String::as_str) != Some(SHEVA) {
            return;
        }
        let before = self.surface();
        let idx = self.prefix_len;
        self.letts.drain(idx..idx + 2);
        self.letts.insert(idx + 1, DAGESH.to_string());

        let (title, description) = if take {
            (
                "Irregular root: לקח",
                "This root is irregular; in the imperfect paradigm, the lamed is assimilated into the next consonant as a dagesh.",
            )
        } else {
            (
                "I Nun",
                "This root is a I Nun root; in the imperfect paradigm, the nun is assimilated into the next consonant as a dagesh.",
            )
        };
        self.push_step(title, before, "first-assimilation", description.to_string(), None);
    }

    // Stage 7: a nun followed by sheva and another nun collapses into a
    // doubled nun.
    fn assimilate_nun(&mut self) {
        let before = self.surface();
        let mut found = false;
        let mut i = 0;
        while i + 2 < self.letts.len() {
            if self.letts[i] == NUN && self.letts[i + 1] == SHEVA && self.letts[i + 2] == NUN {
                self.letts.drain(i..i + 2);
                self.letts.insert(i + 1, DAGESH.to_string());
                found = true;
            }
            i += 1;
        }
        if found {
            self.push_step(
                "Nun assimilation",
                before,
                "nun-assimilation",
                "This word has a double nun, which is spelled with a dagesh.".to_string(),
                None,
            );
        }
    }

    // Stage 8: a word-final kaf is written with a sheva.
    // TODO: find which rule produces this; check whether it applies to
    // other final letters.
    fn fix_trailing_kaf(&mut self) {
        if self.letts.last().map(String::as_str) != Some(KAF) {
            return;
        }
        let before = self.surface();
        self.letts.push(SHEVA.to_string());
        self.push_step(
            "Final kaf",
            before,
            "final-kaf",
            "A word-final kaf is written with a sheva.".to_string(),
            None,
        );
    }

    // Stage 9: an opening begadkefat letter takes a weak dagesh.
    fn finalize_spelling(&mut self) {
        let hb = self.hb;
        if self.letts.is_empty() || !hb.letters().is_begadkefat(&self.letts[0]) {
            return;
        }
        if self.letts.get(1).map(String::as_str) == Some(DAGESH) {
            return;
        }
        let before = self.surface();
        self.letts.insert(1, DAGESH.to_string());
        self.push_step(
            "Last steps",
            before,
            "weak-dagesh",
            "Finally, we add a weak dagesh to the opening begadkefat letter.".to_string(),
            None,
        );
    }
}
