//! Progress summary over the mood history.
//!
//! Reduces the entry log to headline statistics, the sentiment/stress time
//! series, and the most recent entries.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::MoodEntry;

/// How many entries the recent list shows.
pub const RECENT_ENTRIES: usize = 5;

/// Direction of the latest change in sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "📈 Improving",
            Trend::Stable => "📊 Stable",
        }
    }
}

/// One point of the two-series chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub polarity: f64,
    pub stress_level: u8,
}

/// Aggregated view of the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_entries: usize,
    pub average_polarity: f64,
    pub average_stress: f64,
    pub recent_trend: Trend,
    /// Sorted by timestamp, oldest first
    pub series: Vec<ChartPoint>,
    /// Last entries by insertion, newest first
    pub recent: Vec<MoodEntry>,
}

/// Summarize `entries` (insertion order). `None` when there is nothing to
/// summarize.
pub fn summarize(entries: &[MoodEntry]) -> Option<ProgressSummary> {
    if entries.is_empty() {
        return None;
    }

    let n = entries.len() as f64;
    let average_polarity = entries.iter().map(|e| e.sentiment_polarity()).sum::<f64>() / n;
    let average_stress = entries
        .iter()
        .map(|e| f64::from(e.stress_level().value()))
        .sum::<f64>()
        / n;

    let recent_trend = match entries {
        [.., before, last] if last.sentiment_polarity() > before.sentiment_polarity() => {
            Trend::Improving
        }
        _ => Trend::Stable,
    };

    let mut series: Vec<ChartPoint> = entries
        .iter()
        .map(|e| ChartPoint {
            timestamp: e.timestamp(),
            polarity: e.sentiment_polarity(),
            stress_level: e.stress_level().value(),
        })
        .collect();
    series.sort_by_key(|p| p.timestamp);

    let start = entries.len().saturating_sub(RECENT_ENTRIES);
    let mut recent = entries[start..].to_vec();
    recent.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

    Some(ProgressSummary {
        total_entries: entries.len(),
        average_polarity,
        average_stress,
        recent_trend,
        series,
        recent,
    })
}

const CHART_WIDTH: usize = 21;

fn column(value: f64, min: f64, max: f64) -> usize {
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    (ratio * (CHART_WIDTH - 1) as f64).round() as usize
}

fn track(marker: char, col: usize) -> String {
    (0..CHART_WIDTH)
        .map(|i| if i == col { marker } else { '·' })
        .collect()
}

/// Render both series as a terminal chart, one row per point.
///
/// Sentiment is plotted on a -1..1 track, stress on a 0..10 track.
pub fn render_chart(series: &[ChartPoint]) -> String {
    let mut output = String::from("\nYour Mood Journey Over Time\n");
    output.push_str(&"─".repeat(70));
    output.push('\n');
    output.push_str(&format!(
        "{:<12} {:<w$} {:>5}   {:<w$} {:>2}\n",
        "Date",
        "Sentiment (-1..1)",
        "",
        "Stress (0..10)",
        "",
        w = CHART_WIDTH
    ));

    for point in series {
        let local = point.timestamp.with_timezone(&Local);
        output.push_str(&format!(
            "{:<12} {} {:>5.2}   {} {:>2}\n",
            local.format("%m/%d %H:%M"),
            track('●', column(point.polarity, -1.0, 1.0)),
            point.polarity,
            track('■', column(f64::from(point.stress_level), 0.0, 10.0)),
            point.stress_level
        ));
    }

    output.push_str(&"─".repeat(70));
    output.push_str("\n● Mood sentiment  ■ Stress level\n");
    output
}
