//! Word-list sentiment analyzer.
//!
//! Scores mood text against a small weighted lexicon of emotional words,
//! with simple handling for negation ("not happy") and intensifiers
//! ("really tired"). Good enough for journaling; swap in a stronger analyzer
//! through [`SentimentAnalyzer`] if needed.

use std::collections::{HashMap, HashSet};

use super::{SentimentAnalyzer, SentimentReading};
use crate::error::SentimentError;

/// Default upper bound on analyzed text length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Tokens a negator stays active for before it lapses.
const NEGATION_WINDOW: usize = 3;

/// Scale applied to a negated word after flipping its sign.
const NEGATION_DAMPING: f64 = 0.5;

/// Multiplier applied by an intensifier to the next scored word.
const INTENSIFIER_BOOST: f64 = 1.3;

/// Whole-word negators. Any contraction ending in "n't" also negates.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "hardly", "cannot", "without", "dont", "didnt", "doesnt",
    "isnt", "wasnt", "arent", "cant", "couldnt", "wouldnt", "shouldnt",
];

const INTENSIFIERS: &[&str] = &["very", "really", "so", "extremely", "super", "totally", "too"];

/// First-person and opinion markers; they make text more subjective without
/// moving polarity.
const OPINION_MARKERS: &[&str] = &[
    "i", "i'm", "i've", "i'd", "me", "my", "myself", "feel", "feeling", "felt", "think", "believe", "seems", "honestly",
];

/// Lexicon-based [`SentimentAnalyzer`].
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    words: HashMap<String, f64>,
    negators: HashSet<&'static str>,
    intensifiers: HashSet<&'static str>,
    markers: HashSet<&'static str>,
    max_chars: usize,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        let mut analyzer = Self::empty();

        for word in &[
            "excellent", "wonderful", "amazing", "fantastic", "brilliant", "perfect", "love",
            "thrilled", "joyful", "ecstatic",
        ] {
            analyzer.add_word(word, 0.9);
        }
        for word in &[
            "good", "great", "happy", "glad", "excited", "proud", "grateful", "motivated",
            "confident", "cheerful", "pleased", "hopeful", "relaxed", "productive",
        ] {
            analyzer.add_word(word, 0.6);
        }
        for word in &[
            "okay", "fine", "calm", "energetic", "interesting", "content", "rested", "better",
            "focused", "curious",
        ] {
            analyzer.add_word(word, 0.4);
        }
        for word in &[
            "terrible", "awful", "horrible", "miserable", "hopeless", "devastated", "depressed",
            "hate", "panicking", "worthless",
        ] {
            analyzer.add_word(word, -0.9);
        }
        for word in &[
            "sad", "bad", "anxious", "stressed", "exhausted", "angry", "upset", "frustrated",
            "worried", "overwhelmed", "lonely", "scared", "nervous", "drained", "burnt",
        ] {
            analyzer.add_word(word, -0.6);
        }
        for word in &[
            "tired", "bored", "meh", "confused", "annoyed", "restless", "sleepy", "distracted",
            "stuck", "worse",
        ] {
            analyzer.add_word(word, -0.4);
        }

        analyzer
    }
}

impl LexiconAnalyzer {
    /// Analyzer with the built-in vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with no scored words, only negators/intensifiers/markers.
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
            negators: NEGATORS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            markers: OPINION_MARKERS.iter().copied().collect(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Reject texts longer than `max_chars` characters.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Add or replace a scored word. Score is clamped to `[-1, 1]`.
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    pub fn score_of(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexiconAnalyzer {
    fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token) || token.ends_with("n't")
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Result<SentimentReading, SentimentError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(SentimentError::TextTooLong {
                len,
                limit: self.max_chars,
            });
        }

        let mut scores: Vec<f64> = Vec::new();
        let mut token_count = 0usize;
        let mut subjective_tokens = 0usize;
        let mut negation_left = 0usize;
        let mut boost = 1.0;

        // Apostrophes stay inside tokens so contractions are matched whole.
        for raw in text.split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '\u{2019}')) {
            let token = raw
                .trim_matches(|c: char| c == '\'' || c == '\u{2019}')
                .replace('\u{2019}', "'")
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            token_count += 1;

            if self.is_negator(&token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }
            if self.intensifiers.contains(token.as_str()) {
                boost = INTENSIFIER_BOOST;
                continue;
            }
            if self.markers.contains(token.as_str()) {
                subjective_tokens += 1;
                negation_left = negation_left.saturating_sub(1);
                continue;
            }

            match self.words.get(&token) {
                Some(&score) => {
                    let mut value = (score * boost).clamp(-1.0, 1.0);
                    if negation_left > 0 {
                        value = -value * NEGATION_DAMPING;
                    }
                    scores.push(value);
                    subjective_tokens += 1;
                    negation_left = 0;
                    boost = 1.0;
                }
                None => {
                    negation_left = negation_left.saturating_sub(1);
                }
            }
        }

        // Markers alone never make text subjective.
        if scores.is_empty() {
            return Ok(SentimentReading::neutral());
        }

        let polarity = scores.iter().sum::<f64>() / scores.len() as f64;
        let subjectivity = subjective_tokens as f64 / token_count as f64;
        Ok(SentimentReading::new(polarity, subjectivity))
    }
}
