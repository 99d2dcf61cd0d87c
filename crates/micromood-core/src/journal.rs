//! Journal session: the Track-Mood flow.
//!
//! [`MoodJournal`] owns everything a running session needs (the in-memory
//! history, its store, the analyzer and the recommender) and strings them
//! together: validate, analyze, record, recommend.
//!
//! Nothing here fails the session. Analyzer and storage problems come back
//! as [`Notice`]s next to the best available result.

use rand::Rng;
use rand_pcg::Mcg128Xsl64;
use serde::Serialize;
use tracing::info;

use crate::entry::{validate_mood_text, EntryClock, MoodEntry, StressLevel};
use crate::error::{CoreError, SentimentError, StorageError, ValidationError};
use crate::progress::{summarize, ProgressSummary};
use crate::recommender::{MicrotaskRecommender, MoodSignal};
use crate::sentiment::{analyze_or_neutral, LexiconAnalyzer, SentimentAnalyzer};
use crate::storage::{
    ClearConfirmation, ClearRequest, Config, HistoryBackend, JsonFileBackend, MoodHistory,
    MoodStore,
};

/// Something that went wrong but was recovered from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    /// Analysis failed; the neutral reading was used.
    SentimentFallback(String),
    /// Stored history was unusable; the session started empty.
    HistoryLoad(String),
    /// The history could not be saved; it is kept in memory.
    HistoryWrite(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::SentimentFallback(m) | Notice::HistoryLoad(m) | Notice::HistoryWrite(m) => m,
        }
    }
}

impl From<&SentimentError> for Notice {
    fn from(err: &SentimentError) -> Self {
        Notice::SentimentFallback(format!("Error analyzing sentiment: {err}"))
    }
}

/// Result of one accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct TrackOutcome {
    pub entry: MoodEntry,
    pub suggestions: Vec<String>,
    pub notices: Vec<Notice>,
}

/// A running journal session.
pub struct MoodJournal<A, B: HistoryBackend> {
    history: MoodHistory,
    store: MoodStore<B>,
    analyzer: A,
    recommender: MicrotaskRecommender,
    rng: Mcg128Xsl64,
    clock: EntryClock,
    load_notice: Option<Notice>,
}

impl<A: SentimentAnalyzer, B: HistoryBackend> MoodJournal<A, B> {
    /// Start a session, loading whatever history the store has.
    pub fn open(store: MoodStore<B>, analyzer: A, recommender: MicrotaskRecommender) -> Self {
        let loaded = store.load();
        let load_notice = loaded
            .notice
            .map(|err| Notice::HistoryLoad(format!("Error loading data: {err}")));
        let clock = EntryClock::starting_after(loaded.history.last().map(|e| e.timestamp()));
        let rng = recommender.rng();
        Self {
            history: loaded.history,
            store,
            analyzer,
            recommender,
            rng,
            clock,
            load_notice,
        }
    }

    pub fn history(&self) -> &MoodHistory {
        &self.history
    }

    pub fn store(&self) -> &MoodStore<B> {
        &self.store
    }

    pub fn recommender(&self) -> &MicrotaskRecommender {
        &self.recommender
    }

    /// Notice from loading the history at startup, if any.
    pub fn load_notice(&self) -> Option<&Notice> {
        self.load_notice.as_ref()
    }

    /// Record a mood and get suggestions, using the session's random source.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank text or a stress rating outside
    /// 0-10. Nothing is recorded or recommended in that case.
    pub fn track(&mut self, mood_text: &str, stress_level: i64) -> Result<TrackOutcome, ValidationError> {
        let mut rng = self.rng.clone();
        let outcome = self.track_with_rng(mood_text, stress_level, &mut rng);
        self.rng = rng;
        outcome
    }

    /// [`track`](Self::track) with a caller-supplied random source.
    pub fn track_with_rng<R: Rng + ?Sized>(
        &mut self,
        mood_text: &str,
        stress_level: i64,
        rng: &mut R,
    ) -> Result<TrackOutcome, ValidationError> {
        let text = validate_mood_text(mood_text)?;
        let stress = StressLevel::new(stress_level)?;

        let mut notices = Vec::new();
        let (reading, analysis_error) = analyze_or_neutral(&self.analyzer, text);
        if let Some(err) = &analysis_error {
            notices.push(Notice::from(err));
        }

        let entry = MoodEntry::new(self.clock.now(), text, stress, reading)?;
        if let Err(err) = self.store.append_and_persist(&mut self.history, entry.clone()) {
            notices.push(Notice::HistoryWrite(format!("Error saving data: {err}")));
        }
        info!(label = %reading.label, stress = stress.value(), "tracked mood");

        let signal = MoodSignal::new(reading.polarity, stress, text);
        let suggestions = self.recommender.recommend(&signal, rng);

        Ok(TrackOutcome {
            entry,
            suggestions,
            notices,
        })
    }

    /// Aggregate statistics over the session history.
    pub fn progress(&self) -> Option<ProgressSummary> {
        summarize(self.history.entries())
    }

    /// First step of clearing all data.
    pub fn request_clear(&self) -> ClearRequest {
        self.store.request_clear(&self.history)
    }

    /// Delete every entry, in memory and on disk.
    pub fn clear(&mut self, confirmation: ClearConfirmation) -> Result<usize, StorageError> {
        self.store.clear(&mut self.history, confirmation)
    }
}

impl MoodJournal<LexiconAnalyzer, JsonFileBackend> {
    /// Session over the configured history file with the built-in analyzer.
    ///
    /// # Errors
    ///
    /// Fails only if the data directory cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let store = MoodStore::open(&config.storage.history_file)?;
        let analyzer = LexiconAnalyzer::new().with_max_chars(config.sentiment.max_text_chars);
        let recommender = MicrotaskRecommender::with_config(config.recommendations.clone());
        Ok(Self::open(store, analyzer, recommender))
    }
}

impl<A, B: HistoryBackend> std::fmt::Debug for MoodJournal<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodJournal")
            .field("entries", &self.history.len())
            .field("recommender", &self.recommender)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommender::RecommenderConfig;
    use crate::sentiment::{SentimentLabel, SentimentReading};
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Counts calls so tests can tell whether analysis happened.
    struct Counting {
        calls: Cell<usize>,
    }

    impl SentimentAnalyzer for Counting {
        fn analyze(&self, _text: &str) -> Result<SentimentReading, SentimentError> {
            self.calls.set(self.calls.get() + 1);
            Ok(SentimentReading::new(0.5, 0.5))
        }
    }

    fn journal_in(dir: &TempDir) -> MoodJournal<LexiconAnalyzer, JsonFileBackend> {
        let store = MoodStore::new(JsonFileBackend::new(dir.path().join("mood_data.json")));
        let recommender = MicrotaskRecommender::with_config(RecommenderConfig { seed: Some(11) });
        MoodJournal::open(store, LexiconAnalyzer::new(), recommender)
    }

    #[test]
    fn blank_text_is_rejected_before_analysis() {
        let dir = TempDir::new().unwrap();
        let store = MoodStore::new(JsonFileBackend::new(dir.path().join("h.json")));
        let analyzer = Counting { calls: Cell::new(0) };
        let mut journal = MoodJournal::open(store, analyzer, MicrotaskRecommender::new());

        assert_eq!(journal.track("   ", 5).unwrap_err(), ValidationError::EmptyMoodText);
        assert!(journal.history().is_empty());
        assert_eq!(journal.analyzer.calls.get(), 0);
        assert!(!dir.path().join("h.json").exists());
    }

    #[test]
    fn out_of_range_stress_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut journal = journal_in(&dir);
        assert_eq!(
            journal.track("fine", 11).unwrap_err(),
            ValidationError::StressOutOfRange(11)
        );
        assert!(journal.history().is_empty());
    }

    #[test]
    fn track_records_and_recommends() {
        let dir = TempDir::new().unwrap();
        let mut journal = journal_in(&dir);
        let outcome = journal
            .track("I am exhausted and stressed about exams", 8)
            .unwrap();

        assert_eq!(outcome.entry.sentiment_label(), SentimentLabel::Negative);
        assert_eq!(outcome.suggestions.len(), 3);
        assert!(outcome.notices.is_empty());
        assert_eq!(journal.history().len(), 1);
        assert_eq!(journal.history().last(), Some(&outcome.entry));
    }

    #[test]
    fn timestamps_do_not_decrease() {
        let dir = TempDir::new().unwrap();
        let mut journal = journal_in(&dir);
        let a = journal.track("good", 1).unwrap().entry.timestamp();
        let b = journal.track("bad", 2).unwrap().entry.timestamp();
        assert!(b >= a);
    }

    #[test]
    fn seeded_sessions_repeat_suggestions() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let a = journal_in(&first).track("meh", 4).unwrap().suggestions;
        let b = journal_in(&second).track("meh", 4).unwrap().suggestions;
        assert_eq!(a, b);
    }

    #[test]
    fn reopening_sees_previous_entries() {
        let dir = TempDir::new().unwrap();
        {
            let mut journal = journal_in(&dir);
            journal.track("happy", 2).unwrap();
            journal.track("tired", 6).unwrap();
        }
        let journal = journal_in(&dir);
        assert_eq!(journal.history().len(), 2);
        assert!(journal.load_notice().is_none());
        assert_eq!(journal.progress().unwrap().total_entries, 2);
    }

    #[test]
    fn clear_needs_acknowledged_request() {
        let dir = TempDir::new().unwrap();
        let mut journal = journal_in(&dir);
        journal.track("okay", 3).unwrap();

        let request = journal.request_clear();
        assert_eq!(request.entries(), 1);
        drop(request);
        assert_eq!(journal.history().len(), 1);

        let confirmation = journal.request_clear().acknowledge();
        assert_eq!(journal.clear(confirmation).unwrap(), 1);
        assert!(journal.history().is_empty());
        assert!(journal.progress().is_none());
    }

    #[test]
    fn notice_messages_are_exposed() {
        let notice = Notice::from(&SentimentError::Failed("boom".into()));
        assert_eq!(notice.message(), "Error analyzing sentiment: Sentiment analysis failed: boom");
    }
}
