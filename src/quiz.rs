use rand::Rng;
use rand::seq::SliceRandom;

use crate::Hebrew;
use crate::letters::{CHOLEM, PATACH, QAMETS, SEGOL};
use crate::verb::{Gender, Number, Person, Tense, Verb};
use crate::weakness;

/// The closed set of confusable parameters a distractor may get wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mistake {
    Number,
    Gender,
    Tense,
    ThemeVowel,
    Person,
    FirstWeakness,
    ThirdWeakness,
}

pub const MISTAKES: [Mistake; 7] = [
    Mistake::Number,
    Mistake::Gender,
    Mistake::Tense,
    Mistake::ThemeVowel,
    Mistake::Person,
    Mistake::FirstWeakness,
    Mistake::ThirdWeakness,
];

const THEME_VOWEL_CHOICES: [&str; 4] = [SEGOL, CHOLEM, PATACH, QAMETS];

const MAX_ATTEMPTS: usize = 1000;

impl Mistake {
    /// Coaching text for a learner who picked a distractor built from
    /// this mistake.
    pub fn explanation(self, correct_person: Person) -> String {
        match self {
            Mistake::Number => {
                "Check the number. Do we need a singular or a plural form?".to_string()
            }
            Mistake::Gender => "You might have confused the gender forms.".to_string(),
            Mistake::Tense => {
                "Which paradigm are you using--perfect or imperfect?".to_string()
            }
            Mistake::ThemeVowel => {
                "Take a look at the theme vowel (the vowel below the second root letter).".to_string()
            }
            Mistake::Person => {
                let (correct, wrong) = if correct_person == Person::Third {
                    ("3rd", "2nd")
                } else {
                    ("2nd", "3rd")
                };
                format!("We need a {correct}-person form, not a {wrong}-person one.")
            }
            Mistake::FirstWeakness => {
                "Take a look at the first letter of the root. Is it weak?".to_string()
            }
            Mistake::ThirdWeakness => {
                "Take a look at the third letter of the root. Is it weak?".to_string()
            }
        }
    }
}

/// Which perturbation produced an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Correct,
    /// The first of the question's two mistakes.
    First,
    /// The second of the question's two mistakes.
    Second,
    /// Both mistakes at once.
    Both,
}

/// A multiple-choice practice question. Three of the options are
/// conjugations of deliberately perturbed parameters; `correct` indexes
/// the real form inside the shuffled `options`, and `provenance` records
/// which mistake(s) built each option so a wrong answer can be coached.
#[derive(Debug, Clone)]
pub struct Question {
    pub root: String,
    pub tense: Tense,
    pub person: Person,
    pub number: Number,
    pub gender: Gender,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub mistakes: [Mistake; 2],
    /// Parallel to `options`.
    pub provenance: Vec<Provenance>,
}

impl Question {
    /// Coaching text for the learner's chosen option: one line per
    /// mistake behind it, empty for the correct answer.
    pub fn feedback(&self, option: usize) -> Vec<String> {
        match self.provenance[option] {
            Provenance::Correct => Vec::new(),
            Provenance::First => vec![self.mistakes[0].explanation(self.person)],
            Provenance::Second => vec![self.mistakes[1].explanation(self.person)],
            Provenance::Both => vec![
                self.mistakes[0].explanation(self.person),
                self.mistakes[1].explanation(self.person),
            ],
        }
    }
}

pub struct QuestionGenerator<'a> {
    hb: &'a Hebrew,
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(hb: &'a Hebrew) -> QuestionGenerator<'a> {
        QuestionGenerator { hb }
    }

    /// Generate one question: a random root and form, the correct
    /// conjugation, two single-mistake distractors, and one
    /// double-mistake distractor. Re-rolls everything until the four
    /// surface forms are pairwise distinct.
    pub fn new_question(&self, rng: &mut impl Rng) -> Result<Question, String> {
        let word_list = self.hb.word_list();
        if word_list.is_empty() {
            return Err("the vocabulary has no roots to quiz on".to_string());
        }

        for _ in 0..MAX_ATTEMPTS {
            let root = word_list[rng.gen_range(0..word_list.len())].clone();
            let tense = if rng.gen_bool(0.5) { Tense::Perfect } else { Tense::Imperfect };
            let person = [Person::First, Person::Second, Person::Third][rng.gen_range(0..3)];
            let number = if rng.gen_bool(0.5) { Number::Singular } else { Number::Plural };
            let gender = if rng.gen_bool(0.5) { Gender::Masculine } else { Gender::Feminine };

            let m0 = rng.gen_range(0..MISTAKES.len());
            let mut m1 = rng.gen_range(0..MISTAKES.len() - 1);
            if m1 >= m0 {
                m1 += 1;
            }
            let mistakes = [MISTAKES[m0], MISTAKES[m1]];

            // Swapping 2nd and 3rd person is not a meaningful mistake
            // for a 1st-person form.
            if person == Person::First && mistakes.contains(&Mistake::Person) {
                continue;
            }

            let mut correct = Verb::new(self.hb, &root, tense, person, number, gender);
            correct.conjugate();
            if !correct.supported() {
                continue;
            }

            let mut word0 = Verb::new(self.hb, &root, tense, person, number, gender);
            let mut word1 = Verb::new(self.hb, &root, tense, person, number, gender);
            let mut word01 = Verb::new(self.hb, &root, tense, person, number, gender);

            mess_up(mistakes[0], &correct, rng, &mut [&mut word0, &mut word01]);
            mess_up(mistakes[1], &correct, rng, &mut [&mut word1, &mut word01]);

            word0.conjugate();
            word1.conjugate();
            word01.conjugate();

            // A perturbation can land in an unsupported class (a tense
            // flip on a yod-vav root, say); its bare-root surface would
            // give the answer away next to three pointed forms.
            if !word0.supported() || !word1.supported() || !word01.supported() {
                continue;
            }

            let mut options = vec![
                (correct.surface(), Provenance::Correct),
                (word0.surface(), Provenance::First),
                (word1.surface(), Provenance::Second),
                (word01.surface(), Provenance::Both),
            ];

            let distinct = options
                .iter()
                .enumerate()
                .all(|(i, (a, _))| options[i + 1..].iter().all(|(b, _)| a != b));
            if !distinct {
                continue;
            }

            options.shuffle(rng);
            let correct_index = options
                .iter()
                .position(|(_, provenance)| *provenance == Provenance::Correct)
                .ok_or_else(|| "lost track of the correct option".to_string())?;

            let prompt = prompt_for(&root, tense, person, number, gender);
            let (options, provenance) = options.into_iter().unzip();

            return Ok(Question {
                root,
                tense,
                person,
                number,
                gender,
                prompt,
                options,
                correct: correct_index,
                mistakes,
                provenance,
            });
        }

        Err(format!(
            "could not find four distinct forms after {MAX_ATTEMPTS} attempts"
        ))
    }
}

/// Apply one mistake category to each of the given verbs, relative to
/// the correct form's parameters.
fn mess_up(mistake: Mistake, correct: &Verb, rng: &mut impl Rng, words: &mut [&mut Verb]) {
    match mistake {
        Mistake::Number => {
            let wrong = correct.number.toggled();
            for word in words.iter_mut() {
                word.number = wrong;
            }
        }
        Mistake::Gender => {
            let wrong = correct.gender.toggled();
            for word in words.iter_mut() {
                word.gender = wrong;
            }
        }
        Mistake::Tense => {
            let wrong = correct.tense.toggled();
            for word in words.iter_mut() {
                word.tense = wrong;
            }
        }
        Mistake::ThemeVowel => {
            let correct_theme = correct.theme_vowel();
            let wrong = loop {
                let candidate = THEME_VOWEL_CHOICES[rng.gen_range(0..THEME_VOWEL_CHOICES.len())];
                if candidate != correct_theme {
                    break candidate;
                }
            };
            for word in words.iter_mut() {
                word.theme_vowel_override = Some(wrong.to_string());
            }
        }
        Mistake::Person => {
            let wrong = match correct.person {
                Person::Second => Person::Third,
                _ => Person::Second,
            };
            for word in words.iter_mut() {
                word.person = wrong;
            }
        }
        Mistake::FirstWeakness => {
            let choices = [
                None,
                Some(weakness::FirstWeakness::Guttural),
                Some(weakness::FirstWeakness::Nun),
            ];
            let wrong = loop {
                let candidate = choices[rng.gen_range(0..choices.len())];
                if candidate != correct.weaknesses.i {
                    break candidate;
                }
            };
            for word in words.iter_mut() {
                word.weaknesses.i = wrong;
            }
        }
        Mistake::ThirdWeakness => {
            let choices = [
                None,
                Some(weakness::ThirdWeakness::Guttural),
                Some(weakness::ThirdWeakness::Alef),
                Some(weakness::ThirdWeakness::Hey),
            ];
            let wrong = loop {
                let candidate = choices[rng.gen_range(0..choices.len())];
                if candidate != correct.weaknesses.iii {
                    break candidate;
                }
            };
            for word in words.iter_mut() {
                word.weaknesses.iii = wrong;
            }
        }
    }
}

fn prompt_for(root: &str, tense: Tense, person: Person, number: Number, gender: Gender) -> String {
    // Persons without a real gender split show as common gender.
    let g = if person == Person::First
        || (person == Person::Third && number == Number::Plural && tense == Tense::Perfect)
    {
        'c'
    } else {
        gender.letter()
    };
    format!(
        "What is the correct form for the root {} in the {} {}{}{} form?",
        root,
        tense.name(),
        person.as_number(),
        g,
        number.letter()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hb() -> Hebrew {
        Hebrew::bundled().unwrap()
    }

    #[test]
    fn test_options_are_pairwise_distinct() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let question = generator.new_question(&mut rng).unwrap();
            assert_eq!(question.options.len(), 4);
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(question.options[i], question.options[j]);
                }
            }
            assert!(question.correct < 4);
            assert_ne!(question.mistakes[0], question.mistakes[1]);
        }
    }

    #[test]
    fn test_correct_option_matches_direct_conjugation() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..25 {
            let question = generator.new_question(&mut rng).unwrap();
            let mut verb = Verb::new(
                &hb,
                &question.root,
                question.tense,
                question.person,
                question.number,
                question.gender,
            );
            verb.conjugate();
            assert!(verb.supported());
            assert_eq!(question.options[question.correct], verb.surface());
        }
    }

    #[test]
    fn test_first_person_never_gets_person_confusion() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let question = generator.new_question(&mut rng).unwrap();
            if question.person == Person::First {
                assert!(!question.mistakes.contains(&Mistake::Person));
            }
        }
    }

    #[test]
    fn test_prompt_names_root_and_tense() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(3);
        let question = generator.new_question(&mut rng).unwrap();
        assert!(question.prompt.contains(&question.root));
        assert!(question.prompt.contains(question.tense.name()));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = generator.new_question(&mut first_rng).unwrap();
        let second = generator.new_question(&mut second_rng).unwrap();
        assert_eq!(first.prompt, second.prompt);
        assert_eq!(first.options, second.options);
        assert_eq!(first.correct, second.correct);
    }

    #[test]
    fn test_provenance_survives_shuffling() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let question = generator.new_question(&mut rng).unwrap();
            assert_eq!(question.provenance.len(), question.options.len());
            for tag in [
                Provenance::Correct,
                Provenance::First,
                Provenance::Second,
                Provenance::Both,
            ] {
                assert_eq!(
                    question.provenance.iter().filter(|p| **p == tag).count(),
                    1
                );
            }
            assert_eq!(question.provenance[question.correct], Provenance::Correct);
        }
    }

    #[test]
    fn test_feedback_matches_option_provenance() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(29);
        let question = generator.new_question(&mut rng).unwrap();
        for (i, provenance) in question.provenance.iter().enumerate() {
            let feedback = question.feedback(i);
            match provenance {
                Provenance::Correct => assert!(feedback.is_empty()),
                Provenance::First => {
                    assert_eq!(
                        feedback,
                        vec![question.mistakes[0].explanation(question.person)]
                    );
                }
                Provenance::Second => {
                    assert_eq!(
                        feedback,
                        vec![question.mistakes[1].explanation(question.person)]
                    );
                }
                Provenance::Both => {
                    assert_eq!(
                        feedback,
                        vec![
                            question.mistakes[0].explanation(question.person),
                            question.mistakes[1].explanation(question.person),
                        ]
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_option_is_a_supported_conjugation() {
        let hb = hb();
        let generator = QuestionGenerator::new(&hb);
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..50 {
            let question = generator.new_question(&mut rng).unwrap();
            // a rejected conjugation keeps its bare unpointed root
            for option in &question.options {
                assert_ne!(option, &question.root);
                assert!(option.chars().count() > question.root.chars().count());
            }
        }
    }

    #[test]
    fn test_person_explanation_names_both_persons() {
        let text = Mistake::Person.explanation(Person::Third);
        assert!(text.contains("3rd-person form"));
        assert!(text.contains("2nd-person one"));
        let text = Mistake::Person.explanation(Person::Second);
        assert!(text.contains("2nd-person form"));
    }
}
