use std::path::Path;
use std::process::exit;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;

use hebrew_qal::{Gender, Hebrew, Number, Person, QuestionGenerator, Tense};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run() -> Result<(), String> {
    let matches = Command::new("hebrew-qal")
        .version("0.1.0")
        .about("Rule-based conjugation of Biblical Hebrew qal verbs")
        .subcommand_required(true)
        .arg(
            Arg::new("letters")
                .long("letters")
                .help("Path to a letter table JSON file")
                .global(true),
        )
        .arg(
            Arg::new("vocabulary")
                .long("vocabulary")
                .help("Path to a vocabulary JSON file")
                .global(true),
        )
        .arg(
            Arg::new("paradigms")
                .long("paradigms")
                .help("Path to a paradigm table JSON file")
                .global(true),
        )
        .subcommand(
            Command::new("conjugate")
                .about("Conjugate a verb root and explain each rule applied")
                .arg(
                    Arg::new("root")
                        .help("Three-consonant verb root")
                        .required(true)
                        .index(1),
                )
                .args(form_args())
                .arg(
                    Arg::new("explain")
                        .long("explain")
                        .short('e')
                        .help("Print every rule step")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("transliterate")
                .about("Transliterate Hebrew text into Latin letters")
                .arg(
                    Arg::new("text")
                        .help("Pointed Hebrew text")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("gloss")
                .about("Translate a verb form into English")
                .arg(
                    Arg::new("root")
                        .help("Three-consonant verb root")
                        .required(true)
                        .index(1),
                )
                .args(form_args()),
        )
        .subcommand(
            Command::new("quiz")
                .about("Generate multiple-choice practice questions")
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .help("How many questions to generate")
                        .default_value("5"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for reproducible questions"),
                )
                .arg(
                    Arg::new("explain")
                        .long("explain")
                        .short('e')
                        .help("Print the coaching text behind each wrong option")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    let hb = load_environment(&matches)?;

    match matches.subcommand() {
        Some(("conjugate", sub)) => run_conjugate(&hb, sub),
        Some(("transliterate", sub)) => {
            let text = sub.get_one::<String>("text").unwrap();
            println!("{}", hb.transliterate(text));
            Ok(())
        }
        Some(("gloss", sub)) => {
            let root = sub.get_one::<String>("root").unwrap();
            let (tense, person, number, gender) = parse_form(sub)?;
            let gloss = hb.translate_word(root, tense, person, number, gender);
            if gloss.is_empty() {
                return Err(format!("no translation in the vocabulary for '{}'", root));
            }
            println!("{}", gloss);
            Ok(())
        }
        Some(("quiz", sub)) => run_quiz(&hb, sub),
        _ => unreachable!("subcommand is required"),
    }
}

fn form_args() -> [Arg; 4] {
    [
        Arg::new("imperfect")
            .long("imperfect")
            .short('i')
            .help("Use the imperfect paradigm (default: perfect)")
            .action(ArgAction::SetTrue),
        Arg::new("person")
            .long("person")
            .short('p')
            .help("Person: 1, 2 or 3")
            .default_value("3"),
        Arg::new("plural")
            .long("plural")
            .help("Use the plural form (default: singular)")
            .action(ArgAction::SetTrue),
        Arg::new("feminine")
            .long("feminine")
            .short('f')
            .help("Use the feminine form (default: masculine)")
            .action(ArgAction::SetTrue),
    ]
}

fn parse_form(matches: &ArgMatches) -> Result<(Tense, Person, Number, Gender), String> {
    let tense = if matches.get_flag("imperfect") {
        Tense::Imperfect
    } else {
        Tense::Perfect
    };
    let person = match matches.get_one::<String>("person").unwrap().as_str() {
        "1" => Person::First,
        "2" => Person::Second,
        "3" => Person::Third,
        other => return Err(format!("person must be 1, 2 or 3, not '{}'", other)),
    };
    let number = if matches.get_flag("plural") {
        Number::Plural
    } else {
        Number::Singular
    };
    let gender = if matches.get_flag("feminine") {
        Gender::Feminine
    } else {
        Gender::Masculine
    };
    Ok((tense, person, number, gender))
}

fn load_environment(matches: &ArgMatches) -> Result<Hebrew, String> {
    let letters = matches.get_one::<String>("letters");
    let vocabulary = matches.get_one::<String>("vocabulary");
    let paradigms = matches.get_one::<String>("paradigms");
    match (letters, vocabulary, paradigms) {
        (None, None, None) => Hebrew::bundled(),
        (Some(l), Some(v), Some(p)) => {
            Hebrew::from_files(Path::new(l), Path::new(v), Path::new(p))
        }
        _ => Err("give all of --letters, --vocabulary and --paradigms, or none".to_string()),
    }
}

fn run_conjugate(hb: &Hebrew, matches: &ArgMatches) -> Result<(), String> {
    let root = matches.get_one::<String>("root").unwrap();
    let (tense, person, number, gender) = parse_form(matches)?;

    let mut verb = hb.verb(root, tense, person, number, gender);
    verb.conjugate();

    if !verb.supported() {
        println!("Cannot conjugate {} ({}):", verb.root_surface(), hb.weaknesses(root));
        for step in verb.steps() {
            for note in &step.notes {
                println!("  {}", note.description);
            }
        }
        return Ok(());
    }

    println!("{}", verb.surface());
    println!("{}", hb.transliterate(&verb.surface()));
    let gloss = hb.translate_word(root, tense, person, number, gender);
    if !gloss.is_empty() {
        println!("{}", gloss);
    }
    println!("Weaknesses: {}", hb.weaknesses(root));

    if matches.get_flag("explain") {
        for step in verb.steps() {
            println!();
            println!("{}: {} --> {}", step.title, step.before, step.after);
            for note in &step.notes {
                match &note.reference {
                    Some(reference) => println!("  {} ({})", note.description, reference),
                    None => println!("  {}", note.description),
                }
            }
        }
    }
    Ok(())
}

fn run_quiz(hb: &Hebrew, matches: &ArgMatches) -> Result<(), String> {
    let count: usize = matches
        .get_one::<String>("count")
        .unwrap()
        .parse()
        .map_err(|_| "count must be a number".to_string())?;
    let mut rng = match matches.get_one::<String>("seed") {
        Some(seed) => {
            let seed: u64 = seed.parse().map_err(|_| "seed must be a number".to_string())?;
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let generator = QuestionGenerator::new(hb);
    for i in 1..=count {
        let question = generator.new_question(&mut rng)?;
        println!("{}. {}", i, question.prompt);
        for (j, option) in question.options.iter().enumerate() {
            println!("   {}) {}", (b'a' + j as u8) as char, option);
            if matches.get_flag("explain") {
                for line in question.feedback(j) {
                    println!("      {}", line);
                }
            }
        }
        println!("   answer: {})", (b'a' + question.correct as u8) as char);
        println!();
    }
    Ok(())
}
