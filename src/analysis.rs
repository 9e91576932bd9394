//! One-call wave analysis: heatmap, both weakness lists and the
//! recommendations they trigger.

use crate::capability::{Benchmarks, compute_capability_weaknesses};
use crate::heatmap::{Heatmap, compute_sentiment_heatmap};
use crate::interventions::{InterventionRecommendation, recommend_interventions};
use crate::survey::{CapabilityRow, DemographicFilter, SentimentRow};
use crate::weakness::{SentimentWeaknessOptions, Weakness, compute_sentiment_weaknesses};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveAnalysis {
    pub heatmap: Heatmap,
    pub sentiment_weaknesses: Vec<Weakness>,
    pub capability_weaknesses: Vec<Weakness>,
    pub recommendations: Vec<InterventionRecommendation>,
}

impl WaveAnalysis {
    /// Sentiment weaknesses followed by capability weaknesses, the order the
    /// mapper sees them in.
    pub fn weaknesses(&self) -> Vec<Weakness> {
        self.sentiment_weaknesses
            .iter()
            .chain(self.capability_weaknesses.iter())
            .cloned()
            .collect()
    }
}

/// Runs every analyzer over the rows that pass `filter`.
pub fn analyze_wave(
    sentiment: &[SentimentRow],
    capability: &[CapabilityRow],
    filter: &DemographicFilter,
    benchmarks: &Benchmarks,
    options: &SentimentWeaknessOptions,
) -> WaveAnalysis {
    let heatmap = compute_sentiment_heatmap(sentiment, filter);

    let sentiment_rows: Vec<SentimentRow> = sentiment
        .iter()
        .filter(|r| filter.matches(&r.demographics))
        .cloned()
        .collect();
    let capability_rows: Vec<CapabilityRow> = capability
        .iter()
        .filter(|r| filter.matches(&r.demographics))
        .cloned()
        .collect();

    let sentiment_weaknesses = compute_sentiment_weaknesses(&sentiment_rows, options);
    let capability_weaknesses = compute_capability_weaknesses(&capability_rows, benchmarks);

    let mut analysis = WaveAnalysis {
        heatmap,
        sentiment_weaknesses,
        capability_weaknesses,
        recommendations: Vec::new(),
    };
    analysis.recommendations = recommend_interventions(&analysis.weaknesses());

    info!(
        "Wave analysis: {} respondents, {} sentiment / {} capability weaknesses, {} recommendations",
        analysis.heatmap.stats.total_respondents,
        analysis.sentiment_weaknesses.len(),
        analysis.capability_weaknesses.len(),
        analysis.recommendations.len()
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::Demographics;
    use crate::taxonomy::Dimension;

    fn demo(region: &str) -> Demographics {
        Demographics {
            region: Some(region.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_wave() {
        let a = analyze_wave(
            &[],
            &[],
            &DemographicFilter::default(),
            &Benchmarks::default(),
            &SentimentWeaknessOptions::default(),
        );
        assert_eq!(a.heatmap.cells.len(), 25);
        assert!(a.weaknesses().is_empty());
        assert!(a.recommendations.is_empty());
    }

    #[test]
    fn test_filter_applies_to_capability_rows() {
        let mut low = CapabilityRow::new(Dimension::StrategyVision, 2.0);
        low.demographics = demo("North");
        let mut fine = CapabilityRow::new(Dimension::StrategyVision, 5.0);
        fine.demographics = demo("South");

        let all = analyze_wave(
            &[],
            &[low.clone(), fine.clone()],
            &DemographicFilter::default(),
            &Benchmarks::default(),
            &SentimentWeaknessOptions::default(),
        );
        // mean 3.5, gap 1.5 -> high
        assert_eq!(all.capability_weaknesses.len(), 1);
        assert_eq!(all.recommendations[0].code, "A1");

        let south = analyze_wave(
            &[],
            &[low, fine],
            &DemographicFilter::default().region("South"),
            &Benchmarks::default(),
            &SentimentWeaknessOptions::default(),
        );
        assert!(south.capability_weaknesses.is_empty());
        assert!(south.recommendations.is_empty());
    }

    #[test]
    fn test_weaknesses_order_sentiment_first() {
        let row = SentimentRow::uniform(4.0);
        let a = analyze_wave(
            &[row],
            &[CapabilityRow::new(Dimension::TalentSkills, 1.0)],
            &DemographicFilter::default(),
            &Benchmarks::default(),
            &SentimentWeaknessOptions::default(),
        );
        let all = a.weaknesses();
        assert_eq!(all.len(), 11);
        assert_eq!(all[0].kind, crate::weakness::WeaknessKind::Sentiment);
        assert_eq!(all[10].kind, crate::weakness::WeaknessKind::Capability);
    }
}
