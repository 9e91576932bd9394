//! Capability gap analysis against per-dimension benchmarks.

use crate::survey::CapabilityRow;
use crate::taxonomy::Dimension;
use crate::weakness::{Severity, Weakness, WeaknessKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_BENCHMARK: f64 = 5.0;
/// Gaps at or below this are not reported.
pub const GAP_THRESHOLD: f64 = 0.5;

/// Benchmark per dimension, with a fallback for dimensions left unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub default: f64,
    #[serde(default)]
    pub by_dimension: BTreeMap<Dimension, f64>,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self::uniform(DEFAULT_BENCHMARK)
    }
}

impl Benchmarks {
    pub fn uniform(default: f64) -> Self {
        Self {
            default,
            by_dimension: BTreeMap::new(),
        }
    }

    pub fn with(mut self, dimension: Dimension, benchmark: f64) -> Self {
        self.by_dimension.insert(dimension, benchmark);
        self
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.by_dimension
            .get(&dimension)
            .copied()
            .unwrap_or(self.default)
    }
}

fn severity_for_gap(gap: f64) -> Severity {
    if gap > 1.5 {
        Severity::Critical
    } else if gap > 1.0 {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Dimensions whose mean trails the benchmark by more than
/// [`GAP_THRESHOLD`], largest gap first. Dimensions without samples are
/// skipped entirely.
pub fn compute_capability_weaknesses(
    rows: &[CapabilityRow],
    benchmarks: &Benchmarks,
) -> Vec<Weakness> {
    let mut weaknesses = Vec::new();

    for dim in Dimension::ALL {
        let scores: Vec<f64> = rows
            .iter()
            .filter(|r| r.dimension_id == Some(dim.id()))
            .filter_map(|r| r.score)
            .collect();
        if scores.is_empty() {
            continue;
        }
        let avg = scores.iter().sum::<f64>() / scores.len() as f64;
        let benchmark = benchmarks.get(dim);
        let gap = benchmark - avg;
        debug!(
            "dimension {} ({}): mean={:.3} benchmark={} gap={:.3} n={}",
            dim.id(),
            dim.name(),
            avg,
            benchmark,
            gap,
            scores.len()
        );
        if gap <= GAP_THRESHOLD {
            continue;
        }
        weaknesses.push(Weakness {
            area: dim.name().to_string(),
            kind: WeaknessKind::Capability,
            score: avg,
            benchmark: Some(benchmark),
            gap: Some(gap),
            severity: severity_for_gap(gap),
            affected_count: scores.len(),
            details: format!(
                "Dimension {}: {:.1} point gap below industry benchmark",
                dim.id(),
                gap
            ),
        });
    }

    weaknesses.sort_by(|a, b| {
        b.gap
            .unwrap_or(0.0)
            .total_cmp(&a.gap.unwrap_or(0.0))
    });
    weaknesses
}
