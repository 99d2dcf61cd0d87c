pub mod clear;
pub mod companion;
pub mod config;
pub mod history;
pub mod progress;
pub mod track;

use micromood_core::{Config, JsonFileBackend, LexiconAnalyzer, MoodJournal};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the configured journal and surface any load problem as a warning.
pub fn open_journal(
    config: &Config,
) -> Result<MoodJournal<LexiconAnalyzer, JsonFileBackend>, Box<dyn std::error::Error>> {
    let journal = MoodJournal::from_config(config)?;
    if let Some(notice) = journal.load_notice() {
        eprintln!("warning: {}", notice.message());
    }
    Ok(journal)
}
