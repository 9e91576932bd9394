//! Strategic intervention reference data: what each program targets and the
//! impact it is expected to have once applied to a wave.

use crate::taxonomy::{CellId, Dimension};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCategory {
    Leadership,
    Communication,
    Training,
    Process,
    Culture,
    Technology,
}

impl InterventionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionCategory::Leadership => "Leadership",
            InterventionCategory::Communication => "Communication",
            InterventionCategory::Training => "Training",
            InterventionCategory::Process => "Process",
            InterventionCategory::Culture => "Culture",
            InterventionCategory::Technology => "Technology",
        }
    }

    /// Badge color.
    pub fn color(&self) -> &'static str {
        match self {
            InterventionCategory::Leadership => "blue",
            InterventionCategory::Communication => "purple",
            InterventionCategory::Training => "green",
            InterventionCategory::Process => "orange",
            InterventionCategory::Culture => "pink",
            InterventionCategory::Technology => "cyan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    MediumTerm,
}

/// Used for confidence, effort and cost alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Impact {
    /// Expected change in resistance score (negative = less resistance).
    pub sentiment_reduction: f64,
    /// Expected change in capability maturity.
    pub capability_increase: f64,
    pub timeframe: Timeframe,
    pub confidence: Rating,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategicIntervention {
    pub code: &'static str,
    pub category: InterventionCategory,
    pub name: &'static str,
    pub description: &'static str,
    pub sentiment_levels: &'static [u8],
    pub sentiment_categories: &'static [u8],
    pub capability_dimensions: &'static [Dimension],
    /// Cells whose scores the program is expected to move.
    pub target_cells: &'static [&'static str],
    pub impact: Impact,
    pub effort: Rating,
    pub cost: Rating,
    pub prerequisites: &'static [&'static str],
}

/// Compact view for badges and list rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterventionInfo {
    pub code: String,
    pub name: String,
    pub category: InterventionCategory,
    pub color: &'static str,
}

pub static STRATEGIC_INTERVENTIONS: [StrategicIntervention; 8] = [
    StrategicIntervention {
        code: "A1",
        category: InterventionCategory::Leadership,
        name: "Executive AI Vision Workshops",
        description: "C-suite alignment sessions to develop clear AI strategy and communicate vision across organization",
        sentiment_levels: &[1, 2],
        sentiment_categories: &[4],
        capability_dimensions: &[Dimension::StrategyVision],
        target_cells: &["L1_C4", "L2_C4"],
        impact: Impact {
            sentiment_reduction: -0.5,
            capability_increase: 0.9,
            timeframe: Timeframe::MediumTerm,
            confidence: Rating::High,
        },
        effort: Rating::Medium,
        cost: Rating::Medium,
        prerequisites: &[],
    },
    StrategicIntervention {
        code: "B2",
        category: InterventionCategory::Communication,
        name: "Transparent AI Roadmap Communication",
        description: "Regular town halls, newsletters, and Q&A sessions about AI implementation plans and impacts",
        sentiment_levels: &[2, 3],
        sentiment_categories: &[3, 4],
        capability_dimensions: &[],
        target_cells: &["L2_C3", "L2_C4", "L3_C3", "L3_C4"],
        impact: Impact {
            sentiment_reduction: -0.45,
            capability_increase: 0.0,
            timeframe: Timeframe::Immediate,
            confidence: Rating::High,
        },
        effort: Rating::Low,
        cost: Rating::Low,
        prerequisites: &[],
    },
    StrategicIntervention {
        code: "C1",
        category: InterventionCategory::Training,
        name: "AI Skills Development Program",
        description: "Comprehensive hands-on training for AI tools, prompting techniques, and practical applications",
        sentiment_levels: &[2, 3, 4],
        sentiment_categories: &[1, 2, 5],
        capability_dimensions: &[Dimension::TalentSkills],
        target_cells: &[
            "L2_C1", "L2_C2", "L2_C5", "L3_C1", "L3_C2", "L3_C5", "L4_C1", "L4_C2", "L4_C5",
        ],
        impact: Impact {
            sentiment_reduction: -0.4,
            capability_increase: 1.0,
            timeframe: Timeframe::MediumTerm,
            confidence: Rating::High,
        },
        effort: Rating::High,
        cost: Rating::High,
        prerequisites: &[],
    },
    StrategicIntervention {
        code: "A2",
        category: InterventionCategory::Leadership,
        name: "AI Champions Network",
        description: "Empower department leaders and early adopters as AI advocates and peer mentors",
        sentiment_levels: &[4, 5],
        sentiment_categories: &[2, 5],
        capability_dimensions: &[Dimension::OrganizationProcesses],
        target_cells: &["L4_C2", "L4_C5", "L5_C2", "L5_C5"],
        impact: Impact {
            sentiment_reduction: -0.35,
            capability_increase: 0.7,
            timeframe: Timeframe::ShortTerm,
            confidence: Rating::Medium,
        },
        effort: Rating::Medium,
        cost: Rating::Low,
        prerequisites: &[],
    },
    StrategicIntervention {
        code: "C3",
        category: InterventionCategory::Training,
        name: "Advanced AI Certification Program",
        description: "Deep technical training and certification for power users and AI specialists",
        sentiment_levels: &[4, 5],
        sentiment_categories: &[2],
        capability_dimensions: &[Dimension::TalentSkills, Dimension::InnovationCapability],
        target_cells: &["L4_C2", "L5_C2"],
        impact: Impact {
            sentiment_reduction: -0.3,
            capability_increase: 1.2,
            timeframe: Timeframe::MediumTerm,
            confidence: Rating::High,
        },
        effort: Rating::High,
        cost: Rating::High,
        prerequisites: &["C1"],
    },
    StrategicIntervention {
        code: "D1",
        category: InterventionCategory::Process,
        name: "AI Governance Framework",
        description: "Establish clear policies, decision-making processes, and ethical guidelines",
        sentiment_levels: &[],
        sentiment_categories: &[3],
        capability_dimensions: &[Dimension::EthicsResponsibility],
        target_cells: &["L1_C3", "L2_C3", "L3_C3", "L4_C3", "L5_C3"],
        impact: Impact {
            sentiment_reduction: -0.4,
            capability_increase: 1.1,
            timeframe: Timeframe::MediumTerm,
            confidence: Rating::High,
        },
        effort: Rating::High,
        cost: Rating::Medium,
        prerequisites: &[],
    },
    StrategicIntervention {
        code: "E1",
        category: InterventionCategory::Technology,
        name: "AI Infrastructure Upgrade",
        description: "Invest in modern AI tools, platforms, and technical infrastructure",
        sentiment_levels: &[],
        sentiment_categories: &[],
        capability_dimensions: &[Dimension::DataMaturity, Dimension::TechnologyInfrastructure],
        target_cells: &[],
        impact: Impact {
            sentiment_reduction: 0.0,
            capability_increase: 1.3,
            timeframe: Timeframe::MediumTerm,
            confidence: Rating::High,
        },
        effort: Rating::High,
        cost: Rating::High,
        prerequisites: &[],
    },
    StrategicIntervention {
        code: "F1",
        category: InterventionCategory::Culture,
        name: "Innovation Lab & Experimentation",
        description: "Create safe space for AI experimentation and learning from failures",
        sentiment_levels: &[3, 4, 5],
        sentiment_categories: &[1, 3],
        capability_dimensions: &[Dimension::InnovationCapability, Dimension::AdaptationAdoption],
        target_cells: &["L3_C1", "L3_C3", "L4_C1", "L4_C3", "L5_C1", "L5_C3"],
        impact: Impact {
            sentiment_reduction: -0.35,
            capability_increase: 0.8,
            timeframe: Timeframe::MediumTerm,
            confidence: Rating::Medium,
        },
        effort: Rating::High,
        cost: Rating::Medium,
        prerequisites: &[],
    },
];

static BY_CODE: Lazy<HashMap<&'static str, &'static StrategicIntervention>> =
    Lazy::new(|| STRATEGIC_INTERVENTIONS.iter().map(|i| (i.code, i)).collect());

pub fn strategic_intervention(code: &str) -> Option<&'static StrategicIntervention> {
    BY_CODE.get(code.trim()).copied()
}

impl StrategicIntervention {
    pub fn targets_cell(&self, cell: CellId) -> bool {
        let id = cell.to_string();
        self.target_cells.iter().any(|c| *c == id)
    }

    pub fn targets_dimension(&self, dimension: Dimension) -> bool {
        self.capability_dimensions.contains(&dimension)
    }
}

/// First applied intervention (in the given order) that targets `cell`.
pub fn is_cell_targeted<'a>(cell: CellId, applied: &[&'a str]) -> Option<&'a str> {
    applied
        .iter()
        .copied()
        .find(|code| strategic_intervention(code).is_some_and(|i| i.targets_cell(cell)))
}

/// First applied intervention (in the given order) that targets `dimension`.
pub fn is_dimension_targeted<'a>(dimension: Dimension, applied: &[&'a str]) -> Option<&'a str> {
    applied
        .iter()
        .copied()
        .find(|code| strategic_intervention(code).is_some_and(|i| i.targets_dimension(dimension)))
}

pub fn intervention_info(code: &str) -> Option<InterventionInfo> {
    let i = strategic_intervention(code)?;
    Some(InterventionInfo {
        code: i.code.to_string(),
        name: i.name.to_string(),
        category: i.category,
        color: i.category.color(),
    })
}
