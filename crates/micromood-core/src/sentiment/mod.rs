//! Sentiment analysis for mood text.
//!
//! The journal only depends on the [`SentimentAnalyzer`] trait, so any
//! analyzer producing polarity in `[-1, 1]` and subjectivity in `[0, 1]` can be
//! plugged in. [`LexiconAnalyzer`] is the built-in default.
//!
//! Labels are always derived here from polarity with fixed thresholds, never
//! by the analyzer itself.

mod lexicon;

pub use lexicon::{LexiconAnalyzer, DEFAULT_MAX_CHARS};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SentimentError;

/// Polarity at or above which a reading is labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;

/// Polarity at or below which a reading is labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

/// Coarse sentiment label stored alongside each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map a polarity score onto a label.
    ///
    /// The dead band between the two thresholds keeps small lexical noise
    /// from flipping the label.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing one piece of mood text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    /// -1.0 (most negative) to 1.0 (most positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

impl SentimentReading {
    /// Build a reading, clamping both scores into range and deriving the label.
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        let polarity = if polarity.is_nan() { 0.0 } else { polarity.clamp(-1.0, 1.0) };
        let subjectivity = if subjectivity.is_nan() {
            0.0
        } else {
            subjectivity.clamp(0.0, 1.0)
        };
        Self {
            polarity,
            subjectivity,
            label: SentimentLabel::from_polarity(polarity),
        }
    }

    /// Reading substituted when analysis fails.
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    /// "High" when subjectivity exceeds one half, "Low" otherwise.
    pub fn subjectivity_band(&self) -> &'static str {
        if self.subjectivity > 0.5 {
            "High"
        } else {
            "Low"
        }
    }
}

impl Default for SentimentReading {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A pluggable sentiment classifier.
pub trait SentimentAnalyzer {
    /// Analyze raw mood text.
    fn analyze(&self, text: &str) -> Result<SentimentReading, SentimentError>;
}

impl<T: SentimentAnalyzer + ?Sized> SentimentAnalyzer for Box<T> {
    fn analyze(&self, text: &str) -> Result<SentimentReading, SentimentError> {
        (**self).analyze(text)
    }
}

/// Analyze `text`, substituting the neutral reading on failure.
///
/// The error, if any, is logged and handed back so the caller can surface it
/// as a warning.
pub fn analyze_or_neutral<A: SentimentAnalyzer + ?Sized>(
    analyzer: &A,
    text: &str,
) -> (SentimentReading, Option<SentimentError>) {
    match analyzer.analyze(text) {
        Ok(reading) => (reading, None),
        Err(err) => {
            warn!(error = %err, "sentiment analysis failed, using neutral reading");
            (SentimentReading::neutral(), Some(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Broken;

    impl SentimentAnalyzer for Broken {
        fn analyze(&self, _text: &str) -> Result<SentimentReading, SentimentError> {
            Err(SentimentError::Failed("model missing".into()))
        }
    }

    #[test]
    fn label_thresholds_are_inclusive() {
        assert_eq!(SentimentLabel::from_polarity(0.3), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.3), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_polarity(0.29), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.29), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(1.0), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-1.0), SentimentLabel::Negative);
    }

    #[test]
    fn reading_clamps_scores() {
        let reading = SentimentReading::new(1.7, -0.2);
        assert_eq!(reading.polarity, 1.0);
        assert_eq!(reading.subjectivity, 0.0);
        assert_eq!(reading.label, SentimentLabel::Positive);

        let reading = SentimentReading::new(f64::NAN, f64::NAN);
        assert_eq!(reading, SentimentReading::neutral());
    }

    #[test]
    fn failure_falls_back_to_neutral() {
        let (reading, err) = analyze_or_neutral(&Broken, "anything");
        assert_eq!(reading.polarity, 0.0);
        assert_eq!(reading.subjectivity, 0.0);
        assert_eq!(reading.label, SentimentLabel::Neutral);
        assert_eq!(err, Some(SentimentError::Failed("model missing".into())));
    }

    #[test]
    fn subjectivity_band_splits_at_half() {
        assert_eq!(SentimentReading::new(0.0, 0.5).subjectivity_band(), "Low");
        assert_eq!(SentimentReading::new(0.0, 0.51).subjectivity_band(), "High");
    }

    #[test]
    fn label_serializes_as_capitalized_name() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
    }

    proptest! {
        #[test]
        fn label_partition_has_no_gap_or_overlap(p in -1.0f64..=1.0) {
            let label = SentimentLabel::from_polarity(p);
            prop_assert_eq!(label == SentimentLabel::Positive, p >= 0.3);
            prop_assert_eq!(label == SentimentLabel::Negative, p <= -0.3);
            prop_assert_eq!(label == SentimentLabel::Neutral, p > -0.3 && p < 0.3);
        }
    }
}
