//! Weakness records shared by the sentiment and capability analyzers, plus
//! the sentiment weakness detector.

use crate::survey::SentimentRow;
use crate::taxonomy::CellId;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaknessKind {
    Sentiment,
    Capability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// One sentiment cell or capability dimension flagged as a problem area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    /// `"{level} - {category}"` for sentiment, the dimension name for capability.
    pub area: String,
    pub kind: WeaknessKind,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    pub severity: Severity,
    pub affected_count: usize,
    pub details: String,
}

/// Thresholds for [`compute_sentiment_weaknesses`].
///
/// The trigger compares the raw, unclamped mean. With answers exported on
/// the 1..=3 scale the default 3.5 never fires; it is kept because waves
/// exported on a 1..=4 scale do reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentWeaknessOptions {
    pub threshold: f64,
    pub critical_threshold: f64,
    pub limit: usize,
}

impl Default for SentimentWeaknessOptions {
    fn default() -> Self {
        Self {
            threshold: 3.5,
            critical_threshold: 3.8,
            limit: 10,
        }
    }
}

/// Flags high-resistance cells, worst first, at most `options.limit`.
pub fn compute_sentiment_weaknesses(
    rows: &[SentimentRow],
    options: &SentimentWeaknessOptions,
) -> Vec<Weakness> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut weaknesses: Vec<Weakness> = CellId::all()
        .filter_map(|cell| {
            let scores: Vec<f64> = rows.iter().filter_map(|r| r.score(cell)).collect();
            if scores.is_empty() {
                return None;
            }
            let avg = scores.iter().sum::<f64>() / scores.len() as f64;
            if avg < options.threshold {
                return None;
            }
            let severity = if avg >= options.critical_threshold {
                Severity::Critical
            } else {
                Severity::High
            };
            Some(Weakness {
                area: cell.area_label(),
                kind: WeaknessKind::Sentiment,
                score: avg,
                benchmark: None,
                gap: None,
                severity,
                affected_count: scores.len(),
                details: format!(
                    "Q{}: High resistance at {} when AI is {}",
                    cell.question_number(),
                    cell.level.name(),
                    cell.category.name()
                ),
            })
        })
        .collect();

    weaknesses.sort_by(|a, b| b.score.total_cmp(&a.score));
    weaknesses.truncate(options.limit);
    debug!("sentiment weaknesses: {}", weaknesses.len());
    weaknesses
}
