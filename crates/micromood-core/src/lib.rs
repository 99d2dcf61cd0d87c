//! # MicroMood Core Library
//!
//! This library provides the core logic for MicroMood, a personal mood
//! journal that turns a short mood description and a stress rating into a
//! sentiment reading, a stored entry, and a handful of 2-10 minute wellness
//! or career "microtasks". The `micromood` CLI is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Entries**: immutable [`MoodEntry`] records with validated stress levels
//! - **Sentiment**: pluggable [`SentimentAnalyzer`] with a lexicon default;
//!   labels come from fixed polarity thresholds
//! - **Recommender**: a declarative table of gated task categories sampled
//!   with an injectable random source
//! - **Storage**: whole-file JSON history with write-through semantics and
//!   TOML-based configuration
//! - **Progress**: summary statistics and a two-series chart
//! - **Companion**: a chosen character reacting to each tracked mood
//!
//! ## Key Components
//!
//! - [`MoodJournal`]: session object running the Track-Mood flow
//! - [`MicrotaskRecommender`]: category-gated suggestion sampling
//! - [`MoodStore`]: load / append-and-persist / confirmed clear
//! - [`Config`]: application configuration management

pub mod companion;
pub mod entry;
pub mod error;
pub mod journal;
pub mod progress;
pub mod recommender;
pub mod sentiment;
pub mod storage;

pub use companion::{Companion, CompanionResponse, Expression, Persona};
pub use entry::{EntryClock, MoodEntry, StressLevel};
pub use error::{ConfigError, CoreError, SentimentError, StorageError, ValidationError};
pub use journal::{MoodJournal, Notice, TrackOutcome};
pub use progress::{render_chart, summarize, ChartPoint, ProgressSummary, Trend};
pub use recommender::{MicrotaskRecommender, MoodSignal, RecommenderConfig, TaskCategory};
pub use sentiment::{LexiconAnalyzer, SentimentAnalyzer, SentimentLabel, SentimentReading};
pub use storage::{Config, JsonFileBackend, MoodHistory, MoodStore};
