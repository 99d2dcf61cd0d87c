//! Companion characters.
//!
//! A companion reacts to each tracked mood with a short message. Every
//! persona shares the same reaction rule and differs only in wording and in
//! one follow-up line that fires on its own condition:
//!
//! 1. stress at or above [`HIGH_STRESS_THRESHOLD`] wins over sentiment
//! 2. otherwise the sentiment label picks positive / negative / neutral
//! 3. the persona's follow-up is appended when its gate matches

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::StressLevel;
use crate::error::ValidationError;
use crate::recommender::HIGH_STRESS_THRESHOLD;
use crate::sentiment::SentimentLabel;

/// Stress rating at or below which the stress remark is encouraging.
pub const LOW_STRESS_THRESHOLD: u8 = 3;

const LOW_STRESS_REMARK: &str =
    "That's a nice low stress level! I'm proud of you for taking care of yourself.";
const MANAGEABLE_STRESS_REMARK: &str =
    "That stress level seems manageable. How else are you feeling today?";

/// Selectable companion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Companion {
    #[default]
    Buddy,
    Sage,
    Sunny,
    Zen,
}

impl Companion {
    pub const ALL: [Companion; 4] = [
        Companion::Buddy,
        Companion::Sage,
        Companion::Sunny,
        Companion::Zen,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Companion::Buddy => "buddy",
            Companion::Sage => "sage",
            Companion::Sunny => "sunny",
            Companion::Zen => "zen",
        }
    }

    pub fn persona(&self) -> &'static Persona {
        match self {
            Companion::Buddy => &PERSONAS[0],
            Companion::Sage => &PERSONAS[1],
            Companion::Sunny => &PERSONAS[2],
            Companion::Zen => &PERSONAS[3],
        }
    }

    /// Reaction to an analyzed mood.
    pub fn respond(&self, label: SentimentLabel, stress: StressLevel) -> CompanionResponse {
        let persona = self.persona();
        let (base, expression) = if stress.value() >= HIGH_STRESS_THRESHOLD {
            (persona.high_stress, Expression::Sad)
        } else {
            match label {
                SentimentLabel::Positive => (persona.positive, Expression::Happy),
                SentimentLabel::Negative => (persona.negative, Expression::Sad),
                SentimentLabel::Neutral => (persona.neutral, Expression::Calm),
            }
        };

        let mut message = base.to_string();
        if (persona.follow_up_gate)(label, stress) {
            message.push(' ');
            message.push_str(persona.follow_up);
        }

        CompanionResponse {
            companion: *self,
            message,
            expression,
        }
    }

    /// Remark on a stress rating before any text is analyzed.
    pub fn stress_remark(&self, stress: StressLevel) -> &'static str {
        match stress.value() {
            v if v >= HIGH_STRESS_THRESHOLD => self.persona().high_stress,
            v if v <= LOW_STRESS_THRESHOLD => LOW_STRESS_REMARK,
            _ => MANAGEABLE_STRESS_REMARK,
        }
    }
}

impl fmt::Display for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Companion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Companion::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCompanion(s.to_string()))
    }
}

/// Wording of one companion.
pub struct Persona {
    pub name: &'static str,
    pub emoji: &'static str,
    pub personality: &'static str,
    pub welcome: &'static str,
    pub positive: &'static str,
    pub negative: &'static str,
    pub neutral: &'static str,
    pub high_stress: &'static str,
    follow_up_gate: fn(SentimentLabel, StressLevel) -> bool,
    follow_up: &'static str,
}

impl fmt::Debug for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persona")
            .field("name", &self.name)
            .field("personality", &self.personality)
            .finish_non_exhaustive()
    }
}

/// How the companion looks while delivering its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Happy,
    Sad,
    Calm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionResponse {
    pub companion: Companion,
    pub message: String,
    pub expression: Expression,
}

fn is_positive(label: SentimentLabel, _: StressLevel) -> bool {
    label == SentimentLabel::Positive
}

fn is_negative(label: SentimentLabel, _: StressLevel) -> bool {
    label == SentimentLabel::Negative
}

fn is_neutral(label: SentimentLabel, _: StressLevel) -> bool {
    label == SentimentLabel::Neutral
}

fn is_high_stress(_: SentimentLabel, stress: StressLevel) -> bool {
    stress.value() >= HIGH_STRESS_THRESHOLD
}

static PERSONAS: [Persona; 4] = [
    Persona {
        name: "Buddy the Dog",
        emoji: "🐶",
        personality: "enthusiastic and supportive",
        welcome: "Woof! I'm so excited you're here! Let's track your mood together and find fun activities!",
        positive: "That's fantastic! Your positive energy makes my tail wag! Keep up the great work!",
        negative: "I sense you might be going through a tough time. Don't worry, I'm here for you! Let's find something that helps.",
        neutral: "I'm here to support you no matter how you're feeling. What matters most is that you're taking care of yourself!",
        high_stress: "Whoa, that stress level seems pretty high! Let's take some deep breaths together. You've got this!",
        follow_up_gate: is_positive,
        follow_up: "Let's keep this energy going with some fun activities!",
    },
    Persona {
        name: "Sage the Owl",
        emoji: "🦉",
        personality: "wise and thoughtful",
        welcome: "Greetings, wise one. I'm here to guide you through understanding your emotions and finding balance.",
        positive: "Your positive sentiment reflects inner wisdom. Continue nurturing this mindful state.",
        negative: "Difficult emotions are teachers in disguise. Let's explore some practices that bring clarity.",
        neutral: "Balance is the key to wisdom. You're exactly where you need to be in this moment.",
        high_stress: "High stress clouds the mind. Let's find some centering activities to restore your peace.",
        follow_up_gate: is_negative,
        follow_up: "Remember, this too shall pass.",
    },
    Persona {
        name: "Sunny the Flower",
        emoji: "🌻",
        personality: "warm and nurturing",
        welcome: "Hello sunshine! I'm here to help you bloom and grow, no matter the weather in your heart.",
        positive: "You're radiating such beautiful positive energy! Like sunshine helping flowers grow!",
        negative: "Even flowers need rain to grow. Your feelings are valid, and brighter days are coming.",
        neutral: "Every feeling is like weather - it passes through. I'm here to help you through all seasons.",
        high_stress: "Take a moment to feel the warmth of the sun. Let's find gentle ways to ease that stress.",
        follow_up_gate: is_high_stress,
        follow_up: "You're stronger than you know! 🌈",
    },
    Persona {
        name: "Zen the Cat",
        emoji: "🐱",
        personality: "calm and mindful",
        welcome: "Purr... I'm here to help you find inner peace and mindfulness in your daily journey.",
        positive: "Mmm, I can feel your contentment. Let's maintain this peaceful energy together.",
        negative: "Sometimes we need to sit with difficult feelings. I'll keep you company through this.",
        neutral: "In stillness, we find clarity. Your presence in this moment is enough.",
        high_stress: "Breathe with me... in... and out. Let's find your calm center together.",
        follow_up_gate: is_neutral,
        follow_up: "Purr... perfect balance.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn stress(v: i64) -> StressLevel {
        StressLevel::new(v).unwrap()
    }

    #[test]
    fn high_stress_wins_over_sentiment() {
        let response = Companion::Sage.respond(SentimentLabel::Positive, stress(7));
        assert_eq!(response.message, Companion::Sage.persona().high_stress);
        assert_eq!(response.expression, Expression::Sad);
    }

    #[test]
    fn label_picks_message_below_high_stress() {
        let sage = Companion::Sage;
        assert_eq!(
            sage.respond(SentimentLabel::Positive, stress(6)).message,
            sage.persona().positive
        );
        assert_eq!(
            sage.respond(SentimentLabel::Neutral, stress(0)).expression,
            Expression::Calm
        );
        assert_eq!(
            Companion::Buddy.respond(SentimentLabel::Negative, stress(2)).message,
            Companion::Buddy.persona().negative
        );
    }

    #[test]
    fn follow_up_fires_on_persona_condition() {
        let buddy = Companion::Buddy.respond(SentimentLabel::Positive, stress(1));
        assert!(buddy.message.ends_with(" Let's keep this energy going with some fun activities!"));

        let sage = Companion::Sage.respond(SentimentLabel::Negative, stress(4));
        assert!(sage.message.ends_with(" Remember, this too shall pass."));

        let zen = Companion::Zen.respond(SentimentLabel::Neutral, stress(5));
        assert!(zen.message.ends_with(" Purr... perfect balance."));
    }

    #[test]
    fn follow_up_still_applies_under_high_stress() {
        let sunny = Companion::Sunny.respond(SentimentLabel::Positive, stress(9));
        assert_eq!(
            sunny.message,
            format!("{} You're stronger than you know! 🌈", Companion::Sunny.persona().high_stress)
        );

        // Label-based follow-ups ride along with the high-stress message.
        let sage = Companion::Sage.respond(SentimentLabel::Negative, stress(8));
        assert!(sage.message.starts_with(Companion::Sage.persona().high_stress));
        assert!(sage.message.ends_with("this too shall pass."));
    }

    #[test]
    fn no_follow_up_when_gate_misses() {
        let buddy = Companion::Buddy.respond(SentimentLabel::Neutral, stress(5));
        assert_eq!(buddy.message, Companion::Buddy.persona().neutral);
        let sunny = Companion::Sunny.respond(SentimentLabel::Negative, stress(6));
        assert_eq!(sunny.message, Companion::Sunny.persona().negative);
    }

    #[test]
    fn stress_remark_bands() {
        let zen = Companion::Zen;
        assert_eq!(zen.stress_remark(stress(7)), zen.persona().high_stress);
        assert_eq!(zen.stress_remark(stress(3)), LOW_STRESS_REMARK);
        assert_eq!(zen.stress_remark(stress(0)), LOW_STRESS_REMARK);
        assert_eq!(zen.stress_remark(stress(4)), MANAGEABLE_STRESS_REMARK);
        assert_eq!(zen.stress_remark(stress(6)), MANAGEABLE_STRESS_REMARK);
    }

    #[test]
    fn parses_ids_and_rejects_others() {
        assert_eq!("Sunny".parse::<Companion>().unwrap(), Companion::Sunny);
        assert_eq!(
            "cat".parse::<Companion>().unwrap_err(),
            ValidationError::UnknownCompanion("cat".into())
        );
        for companion in Companion::ALL {
            assert_eq!(companion.id().parse::<Companion>().unwrap(), companion);
            assert_eq!(companion.persona().name.split(' ').next().unwrap().to_lowercase(), companion.id());
        }
    }

    #[test]
    fn default_companion_is_buddy() {
        assert_eq!(Companion::default(), Companion::Buddy);
    }
}
