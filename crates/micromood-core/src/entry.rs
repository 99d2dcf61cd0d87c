//! Mood entry data model.
//!
//! A [`MoodEntry`] is created once per accepted submission and never changes
//! afterwards. Its serialized form is the on-disk history record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sentiment::{SentimentLabel, SentimentReading};

/// Stress rating on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct StressLevel(u8);

impl StressLevel {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// Validate a raw rating.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::StressOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for StressLevel {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StressLevel> for u8 {
    fn from(level: StressLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim mood text, rejecting it when nothing is left.
pub fn validate_mood_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyMoodText)
    } else {
        Ok(trimmed)
    }
}

/// One recorded mood submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct MoodEntry {
    #[serde(with = "iso_timestamp")]
    timestamp: DateTime<Utc>,
    mood_text: String,
    stress_level: StressLevel,
    sentiment_polarity: f64,
    sentiment_subjectivity: f64,
    sentiment_label: SentimentLabel,
}

impl MoodEntry {
    /// Build an entry from a submission and its sentiment reading.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMoodText`] when `mood_text` is empty or
    /// whitespace only.
    pub fn new(
        timestamp: DateTime<Utc>,
        mood_text: &str,
        stress_level: StressLevel,
        reading: SentimentReading,
    ) -> Result<Self, ValidationError> {
        let mood_text = validate_mood_text(mood_text)?;
        Ok(Self {
            timestamp,
            mood_text: mood_text.to_string(),
            stress_level,
            sentiment_polarity: reading.polarity,
            sentiment_subjectivity: reading.subjectivity,
            sentiment_label: reading.label,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn mood_text(&self) -> &str {
        &self.mood_text
    }

    pub fn stress_level(&self) -> StressLevel {
        self.stress_level
    }

    pub fn sentiment_polarity(&self) -> f64 {
        self.sentiment_polarity
    }

    pub fn sentiment_subjectivity(&self) -> f64 {
        self.sentiment_subjectivity
    }

    pub fn sentiment_label(&self) -> SentimentLabel {
        self.sentiment_label
    }

    pub fn reading(&self) -> SentimentReading {
        SentimentReading {
            polarity: self.sentiment_polarity,
            subjectivity: self.sentiment_subjectivity,
            label: self.sentiment_label,
        }
    }
}

/// On-disk record before validation.
#[derive(Deserialize)]
struct StoredEntry {
    #[serde(with = "iso_timestamp")]
    timestamp: DateTime<Utc>,
    mood_text: String,
    stress_level: StressLevel,
    sentiment_polarity: f64,
    sentiment_subjectivity: f64,
    sentiment_label: SentimentLabel,
}

impl TryFrom<StoredEntry> for MoodEntry {
    type Error = ValidationError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        validate_mood_text(&stored.mood_text)?;
        Ok(Self {
            timestamp: stored.timestamp,
            mood_text: stored.mood_text,
            stress_level: stored.stress_level,
            sentiment_polarity: stored.sentiment_polarity,
            sentiment_subjectivity: stored.sentiment_subjectivity,
            sentiment_label: stored.sentiment_label,
        })
    }
}

/// Hands out entry timestamps that never go backwards within a session,
/// even if the wall clock is adjusted.
#[derive(Debug, Clone, Default)]
pub struct EntryClock {
    last: Option<DateTime<Utc>>,
}

impl EntryClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose next stamp is no earlier than `last`.
    pub fn starting_after(last: Option<DateTime<Utc>>) -> Self {
        Self { last }
    }

    pub fn now(&mut self) -> DateTime<Utc> {
        self.stamp(Utc::now())
    }

    /// Stamp an observed wall-clock instant.
    pub fn stamp(&mut self, observed: DateTime<Utc>) -> DateTime<Utc> {
        let ts = match self.last {
            Some(last) if last > observed => last,
            _ => observed,
        };
        self.last = Some(ts);
        ts
    }
}

/// ISO-8601 timestamps: written as RFC 3339 UTC, read as RFC 3339 or as
/// offset-less local time (older history files).
pub(crate) mod iso_timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|ts| ts.with_timezone(&Utc))
            .ok_or_else(|| format!("timestamp '{raw}' does not exist in local time"))
    }
}
