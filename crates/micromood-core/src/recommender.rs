//! Microtask recommendation engine.
//!
//! Suggestions are drawn from a fixed catalog organised as a table of gated
//! categories. Every category whose gate matches the current [`MoodSignal`]
//! contributes its whole task list to a candidate pool, and a uniform random
//! sample of the pool is returned.
//!
//! ```
//! use micromood_core::recommender::{MicrotaskRecommender, MoodSignal};
//! use micromood_core::StressLevel;
//! use rand::SeedableRng;
//!
//! let recommender = MicrotaskRecommender::new();
//! let signal = MoodSignal::new(-0.5, StressLevel::new(8).unwrap(), "so tired today");
//! let mut rng = rand_pcg::Mcg128Xsl64::seed_from_u64(7);
//! assert_eq!(recommender.recommend(&signal, &mut rng).len(), 3);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::StressLevel;

/// Stress rating at which grounding tasks are always offered.
pub const HIGH_STRESS_THRESHOLD: u8 = 7;

/// Polarity boundary between the negative-mood and growth categories.
/// Exactly this value counts as neutral-or-positive.
pub const NEGATIVE_MOOD_BOUNDARY: f64 = -0.2;

/// Number of suggestions per recommendation.
pub const SUGGESTION_COUNT: usize = 3;

const HIGH_STRESS_TASKS: &[&str] = &[
    "🫁 Take 5 deep breaths using the 4-7-8 technique (inhale 4, hold 7, exhale 8)",
    "🚶‍♀️ Take a 5-minute walk outside or around your room",
    "🎵 Listen to one calming song and focus only on the music",
    "💧 Drink a glass of water slowly and mindfully",
];

const NEGATIVE_MOOD_TASKS: &[&str] = &[
    "📝 Write down 3 things you're grateful for today",
    "🤗 Give yourself a 30-second hug or stretch",
    "📞 Send a quick message to someone you care about",
    "🌱 Do a 2-minute guided breathing exercise",
];

const GROWTH_TASKS: &[&str] = &[
    "📄 Update one line of your resume or LinkedIn profile",
    "💻 Practice coding for 10 minutes (try a simple problem)",
    "📚 Read one article about a topic you're interested in",
    "🎯 Set one small goal for tomorrow",
];

const REST_TASKS: &[&str] = &[
    "😴 Take a 5-minute power nap or rest with eyes closed",
    "☕ Make yourself a warm drink mindfully",
    "🧘‍♀️ Do gentle neck and shoulder stretches",
];

const HIGH_ENERGY_TASKS: &[&str] = &[
    "🏃‍♂️ Do 10 jumping jacks or pushups",
    "🎨 Spend 5 minutes on a creative activity",
    "📝 Brainstorm ideas for a project you're excited about",
];

const CAREER_TASKS: &[&str] = &[
    "✍️ Write a 50-word reflection on what you learned today",
    "🔍 Research one company or career path you're curious about",
    "💼 Practice answering one interview question out loud",
    "🌟 Identify one skill you want to develop this month",
];

const REST_KEYWORDS: &[&str] = &["tired", "exhausted"];
const ENERGY_KEYWORDS: &[&str] = &["energetic", "excited"];

/// Inputs the recommender gates on.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodSignal {
    pub polarity: f64,
    pub stress_level: StressLevel,
    /// Lowercased copy of the raw mood text, for keyword matching.
    text_lower: String,
}

impl MoodSignal {
    pub fn new(polarity: f64, stress_level: StressLevel, mood_text: &str) -> Self {
        Self {
            polarity,
            stress_level,
            text_lower: mood_text.to_lowercase(),
        }
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.text_lower.contains(k))
    }

    fn mentions_rest(&self) -> bool {
        self.mentions_any(REST_KEYWORDS)
    }

    fn mentions_energy(&self) -> bool {
        self.mentions_any(ENERGY_KEYWORDS)
    }
}

/// Catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Grounding and physiological regulation
    HighStress,
    /// Emotional regulation
    NegativeMood,
    /// Growth-oriented tasks for neutral or positive moods
    Growth,
    /// Rest and recovery ("tired", "exhausted")
    Rest,
    /// Channel high energy ("energetic", "excited")
    HighEnergy,
    /// Always offered
    Career,
}

impl TaskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::HighStress => "high stress",
            TaskCategory::NegativeMood => "negative mood",
            TaskCategory::Growth => "neutral or positive mood",
            TaskCategory::Rest => "rest and recovery",
            TaskCategory::HighEnergy => "high energy",
            TaskCategory::Career => "career development",
        }
    }
}

/// A gated entry in the catalog.
pub struct CategoryRule {
    pub category: TaskCategory,
    pub gate: fn(&MoodSignal) -> bool,
    pub tasks: &'static [&'static str],
}

impl std::fmt::Debug for CategoryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRule")
            .field("category", &self.category)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

fn is_high_stress(s: &MoodSignal) -> bool {
    s.stress_level.value() >= HIGH_STRESS_THRESHOLD
}

fn is_negative_mood(s: &MoodSignal) -> bool {
    s.polarity < NEGATIVE_MOOD_BOUNDARY
}

fn is_neutral_or_positive(s: &MoodSignal) -> bool {
    s.polarity >= NEGATIVE_MOOD_BOUNDARY
}

fn is_high_energy(s: &MoodSignal) -> bool {
    !s.mentions_rest() && s.mentions_energy()
}

fn always(_: &MoodSignal) -> bool {
    true
}

/// The built-in catalog. Gates are evaluated independently of each other;
/// the keyword precedence ("tired" before "energetic") lives in the
/// high-energy gate.
pub static CATALOG: &[CategoryRule] = &[
    CategoryRule {
        category: TaskCategory::HighStress,
        gate: is_high_stress,
        tasks: HIGH_STRESS_TASKS,
    },
    CategoryRule {
        category: TaskCategory::NegativeMood,
        gate: is_negative_mood,
        tasks: NEGATIVE_MOOD_TASKS,
    },
    CategoryRule {
        category: TaskCategory::Growth,
        gate: is_neutral_or_positive,
        tasks: GROWTH_TASKS,
    },
    CategoryRule {
        category: TaskCategory::Rest,
        gate: MoodSignal::mentions_rest,
        tasks: REST_TASKS,
    },
    CategoryRule {
        category: TaskCategory::HighEnergy,
        gate: is_high_energy,
        tasks: HIGH_ENERGY_TASKS,
    },
    CategoryRule {
        category: TaskCategory::Career,
        gate: always,
        tasks: CAREER_TASKS,
    },
];

/// Configuration for the recommender.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

/// Rule-based microtask recommender.
#[derive(Debug, Clone)]
pub struct MicrotaskRecommender {
    config: RecommenderConfig,
    catalog: &'static [CategoryRule],
}

impl Default for MicrotaskRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl MicrotaskRecommender {
    /// Create a recommender with default config.
    pub fn new() -> Self {
        Self::with_config(RecommenderConfig::default())
    }

    /// Create a recommender with custom config.
    pub fn with_config(config: RecommenderConfig) -> Self {
        Self {
            config,
            catalog: CATALOG,
        }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Random source matching the config: seeded when a seed is set,
    /// otherwise from OS entropy.
    pub fn rng(&self) -> Mcg128Xsl64 {
        match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        }
    }

    /// Categories whose gates match `signal`, in catalog order.
    pub fn active_categories(&self, signal: &MoodSignal) -> Vec<TaskCategory> {
        self.catalog
            .iter()
            .filter(|rule| (rule.gate)(signal))
            .map(|rule| rule.category)
            .collect()
    }

    /// Every candidate task for `signal`. Not deduplicated.
    pub fn candidate_pool(&self, signal: &MoodSignal) -> Vec<&'static str> {
        self.catalog
            .iter()
            .filter(|rule| (rule.gate)(signal))
            .flat_map(|rule| rule.tasks.iter().copied())
            .collect()
    }

    /// Sample `min(SUGGESTION_COUNT, pool size)` distinct pool positions
    /// uniformly.
    ///
    /// Order of the result is sampling order and carries no meaning.
    pub fn recommend<R: Rng + ?Sized>(&self, signal: &MoodSignal, rng: &mut R) -> Vec<String> {
        let pool = self.candidate_pool(signal);
        let amount = SUGGESTION_COUNT.min(pool.len());
        debug!(
            categories = ?self.active_categories(signal),
            pool_size = pool.len(),
            amount,
            "sampling microtasks"
        );
        pool.choose_multiple(rng, amount)
            .map(|task| task.to_string())
            .collect()
    }

    /// Convenience wrapper building the signal and using the configured
    /// random source.
    pub fn recommend_for(&self, polarity: f64, stress_level: StressLevel, mood_text: &str) -> Vec<String> {
        let signal = MoodSignal::new(polarity, stress_level, mood_text);
        let mut rng = self.rng();
        self.recommend(&signal, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn stress(v: i64) -> StressLevel {
        StressLevel::new(v).unwrap()
    }

    fn seeded(seed: u64) -> Mcg128Xsl64 {
        Mcg128Xsl64::seed_from_u64(seed)
    }

    #[test]
    fn exhausted_and_stressed_scenario() {
        let recommender = MicrotaskRecommender::new();
        let signal = MoodSignal::new(-0.6, stress(8), "I am exhausted and stressed about exams");
        assert_eq!(
            recommender.active_categories(&signal),
            vec![
                TaskCategory::HighStress,
                TaskCategory::NegativeMood,
                TaskCategory::Rest,
                TaskCategory::Career,
            ]
        );
        assert_eq!(recommender.candidate_pool(&signal).len(), 15);

        let tasks = recommender.recommend(&signal, &mut seeded(1));
        assert_eq!(tasks.len(), 3);
        let pool: HashSet<&str> = recommender.candidate_pool(&signal).into_iter().collect();
        for task in &tasks {
            assert!(!task.is_empty());
            assert!(pool.contains(task.as_str()));
        }
    }

    #[test]
    fn energetic_positive_scenario() {
        let recommender = MicrotaskRecommender::new();
        let signal = MoodSignal::new(0.5, stress(2), "feeling energetic and excited about my project");
        assert_eq!(
            recommender.active_categories(&signal),
            vec![TaskCategory::Growth, TaskCategory::HighEnergy, TaskCategory::Career]
        );
        assert_eq!(recommender.candidate_pool(&signal).len(), 11);
        assert_eq!(recommender.recommend(&signal, &mut seeded(2)).len(), 3);
    }

    #[test]
    fn tired_wins_over_energetic() {
        let recommender = MicrotaskRecommender::new();
        let signal = MoodSignal::new(0.0, stress(3), "Tired but weirdly ENERGETIC");
        let categories = recommender.active_categories(&signal);
        assert!(categories.contains(&TaskCategory::Rest));
        assert!(!categories.contains(&TaskCategory::HighEnergy));
    }

    #[test]
    fn keyword_match_is_substring_and_case_insensitive() {
        let recommender = MicrotaskRecommender::new();
        let signal = MoodSignal::new(0.0, stress(3), "SO EXCITEDDD");
        assert!(recommender
            .active_categories(&signal)
            .contains(&TaskCategory::HighEnergy));
    }

    #[test]
    fn boundary_polarity_counts_as_growth() {
        let recommender = MicrotaskRecommender::new();
        let at = MoodSignal::new(-0.2, stress(0), "");
        let below = MoodSignal::new(-0.2000001, stress(0), "");
        assert_eq!(
            recommender.active_categories(&at),
            vec![TaskCategory::Growth, TaskCategory::Career]
        );
        assert_eq!(
            recommender.active_categories(&below),
            vec![TaskCategory::NegativeMood, TaskCategory::Career]
        );
    }

    #[test]
    fn high_stress_gate_starts_at_seven() {
        let recommender = MicrotaskRecommender::new();
        let six = MoodSignal::new(0.0, stress(6), "");
        let seven = MoodSignal::new(0.0, stress(7), "");
        assert!(!recommender.active_categories(&six).contains(&TaskCategory::HighStress));
        assert!(recommender.active_categories(&seven).contains(&TaskCategory::HighStress));
    }

    #[test]
    fn empty_text_still_yields_three() {
        let recommender = MicrotaskRecommender::new();
        let signal = MoodSignal::new(0.9, stress(0), "");
        assert_eq!(recommender.candidate_pool(&signal).len(), 8);
        assert_eq!(recommender.recommend(&signal, &mut seeded(3)).len(), 3);
    }

    #[test]
    fn same_seed_same_suggestions() {
        let recommender = MicrotaskRecommender::with_config(RecommenderConfig { seed: Some(42) });
        let a = recommender.recommend_for(0.1, stress(5), "meh");
        let b = recommender.recommend_for(0.1, stress(5), "meh");
        assert_eq!(a, b);
    }

    #[test]
    fn count_ignores_config_file() {
        let config = crate::storage::Config::from_toml(
            "[recommendations]\ncount = 0\nseed = 4\n",
        )
        .unwrap();
        let recommender = MicrotaskRecommender::with_config(config.recommendations);
        assert_eq!(recommender.recommend_for(0.0, stress(5), "meh").len(), SUGGESTION_COUNT);
    }

    #[test]
    fn catalog_keeps_joined_emoji_sequences() {
        assert!(HIGH_STRESS_TASKS[1].starts_with("\u{1F6B6}\u{200D}\u{2640}\u{FE0F} "));
        assert!(REST_TASKS[2].starts_with("\u{1F9D8}\u{200D}\u{2640}\u{FE0F} "));
        assert!(HIGH_ENERGY_TASKS[0].starts_with("\u{1F3C3}\u{200D}\u{2642}\u{FE0F} "));
    }

    #[test]
    fn sampling_reaches_every_candidate() {
        let recommender = MicrotaskRecommender::new();
        let signal = MoodSignal::new(0.0, stress(0), "");
        let mut rng = seeded(5);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.extend(recommender.recommend(&signal, &mut rng));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn catalog_has_no_duplicate_tasks() {
        let all: Vec<&str> = CATALOG.iter().flat_map(|r| r.tasks.iter().copied()).collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }

    proptest! {
        #[test]
        fn always_three_distinct_suggestions(
            polarity in -1.0f64..=1.0,
            level in 0i64..=10,
            text in ".{0,60}",
            seed in any::<u64>(),
        ) {
            let recommender = MicrotaskRecommender::new();
            let signal = MoodSignal::new(polarity, stress(level), &text);
            let pool = recommender.candidate_pool(&signal);
            prop_assert!(pool.len() >= 8);

            let tasks = recommender.recommend(&signal, &mut seeded(seed));
            prop_assert_eq!(tasks.len(), 3);
            let unique: HashSet<&String> = tasks.iter().collect();
            prop_assert_eq!(unique.len(), 3);
        }

        #[test]
        fn negative_and_growth_are_exclusive(polarity in -1.0f64..=1.0) {
            let recommender = MicrotaskRecommender::new();
            let categories = recommender.active_categories(&MoodSignal::new(polarity, stress(5), ""));
            let negative = categories.contains(&TaskCategory::NegativeMood);
            let growth = categories.contains(&TaskCategory::Growth);
            prop_assert!(negative ^ growth);
        }
    }
}
