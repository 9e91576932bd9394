//! Closed vocabularies shared by every analysis stage.
//!
//! The 5×5 sentiment matrix is addressed by (concern level, root cause).
//! Capability maturity is scored on 8 fixed dimensions. All label lookups are
//! table-driven so the vocabulary can be audited without reading match arms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational-impact tier of a concern (matrix rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernLevel {
    PersonalWorkflow,
    Collaboration,
    ProfessionalTrust,
    CareerSecurity,
    OrganizationalStability,
}

struct LevelEntry {
    level: ConcernLevel,
    name: &'static str,
    catalog_label: &'static str,
    description: &'static str,
}

static LEVEL_TABLE: [LevelEntry; 5] = [
    LevelEntry {
        level: ConcernLevel::PersonalWorkflow,
        name: "Personal Workflow",
        catalog_label: "Personal Workflow Preferences",
        description: "How AI changes an individual's daily tasks and habits",
    },
    LevelEntry {
        level: ConcernLevel::Collaboration,
        name: "Collaboration",
        catalog_label: "Collaboration & Role Adjustments",
        description: "How AI reshapes teamwork, hand-offs and role boundaries",
    },
    LevelEntry {
        level: ConcernLevel::ProfessionalTrust,
        name: "Professional Trust",
        catalog_label: "Professional Trust & Fairness Issues",
        description: "Whether AI-driven decisions are seen as fair and accountable",
    },
    LevelEntry {
        level: ConcernLevel::CareerSecurity,
        name: "Career Security",
        catalog_label: "Career Security & Job Redefinition Anxiety",
        description: "Fear that AI devalues skills or replaces jobs",
    },
    LevelEntry {
        level: ConcernLevel::OrganizationalStability,
        name: "Organizational Stability",
        catalog_label: "Organizational Stability at Risk",
        description: "Concern that AI destabilizes the organization as a whole",
    },
];

impl ConcernLevel {
    pub const ALL: [ConcernLevel; 5] = [
        ConcernLevel::PersonalWorkflow,
        ConcernLevel::Collaboration,
        ConcernLevel::ProfessionalTrust,
        ConcernLevel::CareerSecurity,
        ConcernLevel::OrganizationalStability,
    ];

    fn entry(&self) -> &'static LevelEntry {
        &LEVEL_TABLE[self.index()]
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// 1-based row id.
    pub fn id(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get((id as usize).checked_sub(1)?).copied()
    }

    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    pub fn catalog_label(&self) -> &'static str {
        self.entry().catalog_label
    }

    pub fn description(&self) -> &'static str {
        self.entry().description
    }

    /// Exact match against the catalog vocabulary (after trimming).
    pub fn from_catalog_label(label: &str) -> Option<Self> {
        let label = label.trim();
        LEVEL_TABLE
            .iter()
            .find(|e| e.catalog_label == label)
            .map(|e| e.level)
    }
}

/// Reason respondents resist AI (matrix columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootCause {
    TooAutonomous,
    TooInflexible,
    Emotionless,
    TooOpaque,
    PreferHuman,
}

static CAUSE_TABLE: [(RootCause, &str, &str); 5] = [
    (RootCause::TooAutonomous, "Too Autonomous", "AI is too Autonomous"),
    (RootCause::TooInflexible, "Too Inflexible", "AI is too Inflexible"),
    (RootCause::Emotionless, "Emotionless", "AI is Emotionless"),
    (RootCause::TooOpaque, "Too Opaque", "AI is too Opaque"),
    (
        RootCause::PreferHuman,
        "Prefer Human",
        "People Prefer Human Interaction",
    ),
];

impl RootCause {
    pub const ALL: [RootCause; 5] = [
        RootCause::TooAutonomous,
        RootCause::TooInflexible,
        RootCause::Emotionless,
        RootCause::TooOpaque,
        RootCause::PreferHuman,
    ];

    fn index(&self) -> usize {
        *self as usize
    }

    /// 1-based column id.
    pub fn id(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get((id as usize).checked_sub(1)?).copied()
    }

    pub fn name(&self) -> &'static str {
        CAUSE_TABLE[self.index()].1
    }

    pub fn catalog_label(&self) -> &'static str {
        CAUSE_TABLE[self.index()].2
    }

    pub fn from_catalog_label(label: &str) -> Option<Self> {
        let label = label.trim();
        CAUSE_TABLE
            .iter()
            .find(|(_, _, l)| *l == label)
            .map(|(c, _, _)| *c)
    }
}

/// Persona names used by the catalog's "Category" column, row-major.
const PERSONAS: [&str; 25] = [
    "The Intrusive AI",
    "The Unadaptive AI",
    "The Uncaring AI",
    "The Confusing AI",
    "The Aloof AI",
    "The Redefining AI",
    "The Forcing AI",
    "The Distant AI",
    "The Obscuring AI",
    "The Separating AI",
    "The Unjust AI",
    "The Constricting AI",
    "The Callous AI",
    "The Hidden AI",
    "The Usurping AI",
    "The Threatening AI",
    "The Stagnating AI",
    "The Devaluing AI",
    "The Unknowable AI",
    "The Replacing AI",
    "The Uncontrolled AI",
    "The Brittle AI",
    "The Dehumanizing AI",
    "The Risky AI",
    "The Undermining AI",
];

/// Coordinate of one sentiment matrix cell, rendered as `L{level}_C{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellId {
    pub level: ConcernLevel,
    pub category: RootCause,
}

impl CellId {
    pub const fn new(level: ConcernLevel, category: RootCause) -> Self {
        Self { level, category }
    }

    /// None when either id falls outside 1..=5.
    pub fn from_ids(level_id: u8, category_id: u8) -> Option<Self> {
        Some(Self::new(
            ConcernLevel::from_id(level_id)?,
            RootCause::from_id(category_id)?,
        ))
    }

    /// All 25 cells in fixed enumeration order (level-major).
    pub fn all() -> impl Iterator<Item = CellId> {
        ConcernLevel::ALL.into_iter().flat_map(|level| {
            RootCause::ALL
                .into_iter()
                .map(move |category| CellId::new(level, category))
        })
    }

    /// 0-based position in the enumeration order.
    pub fn index(&self) -> usize {
        self.level.index() * 5 + self.category.index()
    }

    /// Survey question number (1..=25).
    pub fn question_number(&self) -> usize {
        self.index() + 1
    }

    /// Name of the respondent row field holding this cell's score.
    pub fn field_name(&self) -> String {
        format!("sentiment_{}", self.question_number())
    }

    pub fn persona(&self) -> &'static str {
        PERSONAS[self.index()]
    }

    pub fn from_persona(name: &str) -> Option<Self> {
        let name = name.trim();
        let idx = PERSONAS.iter().position(|p| *p == name)?;
        CellId::all().nth(idx)
    }

    /// `"{level} - {category}"`, the area label used by sentiment weaknesses.
    pub fn area_label(&self) -> String {
        format!("{} - {}", self.level.name(), self.category.name())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}_C{}", self.level.id(), self.category.id())
    }
}

impl FromStr for CellId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid cell id '{}', expected L<1-5>_C<1-5>", s);
        let (l, c) = s.trim().split_once('_').ok_or_else(invalid)?;
        let level_id = l
            .strip_prefix('L')
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        let category_id = c
            .strip_prefix('C')
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or_else(invalid)?;
        CellId::from_ids(level_id, category_id).ok_or_else(invalid)
    }
}

impl From<CellId> for String {
    fn from(cell: CellId) -> Self {
        cell.to_string()
    }
}

impl TryFrom<String> for CellId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Capability-maturity axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    StrategyVision,
    DataMaturity,
    TechnologyInfrastructure,
    TalentSkills,
    OrganizationProcesses,
    InnovationCapability,
    AdaptationAdoption,
    EthicsResponsibility,
}

const DIMENSION_NAMES: [&str; 8] = [
    "Strategy & Vision",
    "Data Maturity",
    "Technology Infrastructure",
    "Talent & Skills",
    "Organization & Processes",
    "Innovation Capability",
    "Adaptation & Adoption",
    "Ethics & Responsibility",
];

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Dimension::StrategyVision,
        Dimension::DataMaturity,
        Dimension::TechnologyInfrastructure,
        Dimension::TalentSkills,
        Dimension::OrganizationProcesses,
        Dimension::InnovationCapability,
        Dimension::AdaptationAdoption,
        Dimension::EthicsResponsibility,
    ];

    /// 1-based dimension id.
    pub fn id(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get((id as usize).checked_sub(1)?).copied()
    }

    pub fn name(&self) -> &'static str {
        DIMENSION_NAMES[*self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
