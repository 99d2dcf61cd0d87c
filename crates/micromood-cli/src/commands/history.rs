use chrono::Local;
use micromood_core::{Config, MoodEntry, StressLevel};

use super::{open_journal, CommandResult};

pub fn run(config: &Config, limit: Option<usize>, json: bool) -> CommandResult {
    let journal = open_journal(config)?;
    let entries = journal.history().entries();
    let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
    let shown = &entries[skip..];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No entries recorded.");
        return Ok(());
    }
    for entry in shown {
        print_entry(entry);
    }
    Ok(())
}

pub fn print_entry(entry: &MoodEntry) {
    let local = entry.timestamp().with_timezone(&Local);
    println!();
    println!(
        "{} - {}",
        entry.sentiment_label(),
        local.format("%m/%d %I:%M %p")
    );
    println!("  Mood: {}", entry.mood_text());
    println!("  Stress Level: {}/{}", entry.stress_level(), StressLevel::MAX);
    println!("  Sentiment Score: {:.2}", entry.sentiment_polarity());
}
