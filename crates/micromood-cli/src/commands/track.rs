use clap::Args;
use serde::Serialize;

use micromood_core::sentiment::analyze_or_neutral;
use micromood_core::{
    CompanionResponse, Config, LexiconAnalyzer, MicrotaskRecommender, MoodSignal, Notice, SentimentReading,
    StressLevel, TaskCategory, TrackOutcome, ValidationError,
};

use super::{open_journal, CommandResult};

#[derive(Args)]
pub struct TrackArgs {
    /// How are you feeling today?
    pub text: String,
    /// Stress level from 0 (calm) to 10 (overwhelmed)
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=10))]
    pub stress: i64,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Show which task categories were active
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Mood description used for keyword matching
    pub text: String,
    /// Stress level from 0 (calm) to 10 (overwhelmed)
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=10))]
    pub stress: i64,
    /// Use this polarity instead of analyzing the text
    #[arg(long, allow_hyphen_values = true)]
    pub polarity: Option<f64>,
}

#[derive(Serialize)]
struct TrackReport<'a> {
    #[serde(flatten)]
    outcome: &'a TrackOutcome,
    companion: &'a CompanionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<TaskCategory>>,
}

pub fn run(config: &Config, args: TrackArgs) -> CommandResult {
    let mut journal = open_journal(config)?;

    let outcome = match journal.track(&args.text, args.stress) {
        Ok(outcome) => outcome,
        Err(ValidationError::EmptyMoodText) => {
            println!("Please describe your mood first. Nothing was recorded.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let entry = &outcome.entry;
    let categories = args.explain.then(|| {
        let signal = MoodSignal::new(entry.sentiment_polarity(), entry.stress_level(), entry.mood_text());
        journal.recommender().active_categories(&signal)
    });

    let companion = config
        .companion
        .character
        .respond(entry.sentiment_label(), entry.stress_level());

    print_notices(&outcome.notices);

    if args.json {
        let report = TrackReport {
            outcome: &outcome,
            companion: &companion,
            categories,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_reading(&entry.reading());
    println!("Stress:    {}/{}", entry.stress_level(), StressLevel::MAX);
    println!();
    let persona = config.companion.character.persona();
    println!("{} {}: {}", persona.emoji, persona.name, companion.message);
    if let Some(categories) = &categories {
        print_categories(categories);
    }
    print_suggestions(&outcome.suggestions);
    Ok(())
}

pub fn suggest(config: &Config, args: SuggestArgs) -> CommandResult {
    let stress = StressLevel::new(args.stress)?;
    let polarity = match args.polarity {
        Some(p) if !(-1.0..=1.0).contains(&p) => {
            return Err(format!("polarity {p} is out of range (expected -1.0 to 1.0)").into());
        }
        Some(p) => p,
        None => {
            let analyzer = LexiconAnalyzer::new().with_max_chars(config.sentiment.max_text_chars);
            let (reading, err) = analyze_or_neutral(&analyzer, &args.text);
            if let Some(err) = &err {
                print_notices(&[Notice::from(err)]);
            }
            reading.polarity
        }
    };

    let persona = config.companion.character.persona();
    println!(
        "{} {}: {}",
        persona.emoji,
        persona.name,
        config.companion.character.stress_remark(stress)
    );

    let recommender = MicrotaskRecommender::with_config(config.recommendations.clone());
    let signal = MoodSignal::new(polarity, stress, &args.text);
    print_categories(&recommender.active_categories(&signal));
    let mut rng = recommender.rng();
    print_suggestions(&recommender.recommend(&signal, &mut rng));
    Ok(())
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("warning: {}", notice.message());
    }
}

fn print_reading(reading: &SentimentReading) {
    println!("Sentiment: {}", reading.label);
    println!("Polarity:  {:.2}", reading.polarity);
    println!(
        "Subjectivity: {:.2} ({})",
        reading.subjectivity,
        reading.subjectivity_band()
    );
}

fn print_categories(categories: &[TaskCategory]) {
    let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
    println!("Categories: {}", labels.join(", "));
}

fn print_suggestions(suggestions: &[String]) {
    println!();
    println!("Recommended microtasks:");
    for (i, task) in suggestions.iter().enumerate() {
        println!("  {}. {task}", i + 1);
    }
    println!();
    println!("Tip: these take 2-10 minutes. Pick one that feels right for you today!");
}
