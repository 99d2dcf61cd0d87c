use micromood_core::{render_chart, Config};

use super::history::print_entry;
use super::{open_journal, CommandResult};

pub fn run(config: &Config, json: bool) -> CommandResult {
    let journal = open_journal(config)?;

    let Some(summary) = journal.progress() else {
        if json {
            println!("null");
        } else {
            println!("No mood data available yet. Start tracking your mood to see your progress!");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Total Entries: {}", summary.total_entries);
    println!("Avg Sentiment: {:.2}", summary.average_polarity);
    println!("Avg Stress:    {:.1}", summary.average_stress);
    println!("Recent Trend:  {}", summary.recent_trend.label());
    print!("{}", render_chart(&summary.series));

    println!();
    println!("Recent Mood Entries");
    for entry in &summary.recent {
        print_entry(entry);
    }
    Ok(())
}
