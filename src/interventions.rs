//! Maps detected weaknesses to strategic interventions.
//!
//! Each rule is a disjunction: it fires when any sentiment weakness area
//! contains one of its substrings, or any capability weakness names one of
//! its dimensions. Rules are data; `recommend_interventions` is the only
//! matching logic.

use crate::taxonomy::Dimension;
use crate::weakness::{Weakness, WeaknessKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedImpact {
    pub area: String,
    pub improvement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionRecommendation {
    pub code: String,
    pub name: String,
    pub target_weaknesses: Vec<String>,
    pub expected_impact: Vec<ExpectedImpact>,
    /// Lower fires first.
    pub priority: u8,
}

pub struct InterventionRule {
    pub code: &'static str,
    pub name: &'static str,
    pub sentiment_areas: &'static [&'static str],
    pub capability_dimensions: &'static [Dimension],
    pub target_weaknesses: &'static [&'static str],
    pub expected_impact: &'static [(&'static str, &'static str)],
    pub priority: u8,
}

impl InterventionRule {
    pub fn matches(&self, weaknesses: &[Weakness]) -> bool {
        weaknesses.iter().any(|w| match w.kind {
            WeaknessKind::Sentiment => self
                .sentiment_areas
                .iter()
                .any(|needle| w.area.contains(needle)),
            WeaknessKind::Capability => self
                .capability_dimensions
                .iter()
                .any(|d| w.area == d.name()),
        })
    }

    fn to_recommendation(&self) -> InterventionRecommendation {
        InterventionRecommendation {
            code: self.code.to_string(),
            name: self.name.to_string(),
            target_weaknesses: self.target_weaknesses.iter().map(|s| s.to_string()).collect(),
            expected_impact: self
                .expected_impact
                .iter()
                .map(|(area, improvement)| ExpectedImpact {
                    area: area.to_string(),
                    improvement: improvement.to_string(),
                })
                .collect(),
            priority: self.priority,
        }
    }
}

/// Declaration order is the tie-break for equal priorities.
pub static INTERVENTION_RULES: [InterventionRule; 4] = [
    InterventionRule {
        code: "A1",
        name: "AI Strategy & Governance Framework",
        sentiment_areas: &["Organizational Stability"],
        capability_dimensions: &[Dimension::StrategyVision],
        target_weaknesses: &["Organizational Stability", "Strategy & Vision"],
        expected_impact: &[
            ("Q21-25 (Org Stability)", "-25% resistance"),
            ("Dimension 1 (Strategy)", "+0.6 points"),
        ],
        priority: 1,
    },
    InterventionRule {
        code: "B2",
        name: "AI Literacy & Training Program",
        sentiment_areas: &["Collaboration"],
        capability_dimensions: &[Dimension::TalentSkills],
        target_weaknesses: &["Collaboration", "Talent & Skills"],
        expected_impact: &[
            ("Q6-10 (Collaboration)", "-20% resistance"),
            ("Dimension 4 (Talent)", "+0.5 points"),
        ],
        priority: 1,
    },
    InterventionRule {
        code: "C1",
        name: "Innovation Labs & Experimentation",
        sentiment_areas: &["Career"],
        capability_dimensions: &[Dimension::InnovationCapability],
        target_weaknesses: &["Career Security", "Innovation Capability"],
        expected_impact: &[
            ("Q16-20 (Career)", "-20% resistance"),
            ("Dimension 6 (Innovation)", "+0.4 points"),
        ],
        priority: 2,
    },
    InterventionRule {
        code: "A3",
        name: "AI Ethics & Responsible AI Program",
        sentiment_areas: &["Trust", "Opaque"],
        capability_dimensions: &[Dimension::EthicsResponsibility],
        target_weaknesses: &["Professional Trust", "Ethics & Responsibility"],
        expected_impact: &[
            ("Q11-15 (Trust)", "-25% resistance"),
            ("Dimension 8 (Ethics)", "+0.7 points"),
        ],
        priority: 2,
    },
];

/// Recommendations whose trigger matches, ascending by priority.
pub fn recommend_interventions(weaknesses: &[Weakness]) -> Vec<InterventionRecommendation> {
    let mut recommendations: Vec<InterventionRecommendation> = INTERVENTION_RULES
        .iter()
        .filter(|rule| rule.matches(weaknesses))
        .map(InterventionRule::to_recommendation)
        .collect();
    // stable: equal priorities keep declaration order
    recommendations.sort_by_key(|r| r.priority);
    debug!(
        "{} weaknesses -> {} recommendations",
        weaknesses.len(),
        recommendations.len()
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weakness::Severity;

    fn sentiment(area: &str) -> Weakness {
        Weakness {
            area: area.to_string(),
            kind: WeaknessKind::Sentiment,
            score: 3.6,
            benchmark: None,
            gap: None,
            severity: Severity::High,
            affected_count: 10,
            details: String::new(),
        }
    }

    fn capability(dim: Dimension) -> Weakness {
        Weakness {
            area: dim.name().to_string(),
            kind: WeaknessKind::Capability,
            score: 3.0,
            benchmark: Some(5.0),
            gap: Some(2.0),
            severity: Severity::Critical,
            affected_count: 10,
            details: String::new(),
        }
    }

    fn codes(recs: &[InterventionRecommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    fn test_org_stability_triggers_a1() {
        let recs = recommend_interventions(&[sentiment(
            "Organizational Stability - Too Autonomous",
        )]);
        assert_eq!(codes(&recs), vec!["A1"]);
        assert_eq!(recs[0].expected_impact.len(), 2);
    }

    #[test]
    fn test_no_weaknesses_no_recommendations() {
        assert!(recommend_interventions(&[]).is_empty());
    }

    #[test]
    fn test_sorted_by_priority_then_declaration() {
        let recs = recommend_interventions(&[
            capability(Dimension::EthicsResponsibility),
            sentiment("Career Security - Emotionless"),
            capability(Dimension::TalentSkills),
            sentiment("Organizational Stability - Prefer Human"),
        ]);
        assert_eq!(codes(&recs), vec!["A1", "B2", "C1", "A3"]);
    }

    #[test]
    fn test_each_rule_fires_once() {
        let recs = recommend_interventions(&[
            sentiment("Professional Trust - Too Opaque"),
            sentiment("Personal Workflow - Too Opaque"),
            capability(Dimension::EthicsResponsibility),
        ]);
        assert_eq!(codes(&recs), vec!["A3"]);
    }

    #[test]
    fn test_capability_match_is_exact_name() {
        let mut w = capability(Dimension::StrategyVision);
        w.area = "Strategy & Vision (draft)".into();
        assert!(recommend_interventions(&[w]).is_empty());
        // capability areas are not substring-matched against sentiment needles
        let recs = recommend_interventions(&[capability(Dimension::OrganizationProcesses)]);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            sentiment("Collaboration - Too Inflexible"),
            capability(Dimension::InnovationCapability),
        ];
        assert_eq!(recommend_interventions(&input), recommend_interventions(&input));
    }
}
