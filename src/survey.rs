//! Survey row shapes handed over by the persistence layer.
//!
//! Rows are already scoped to one company and one or more waves; the only
//! filtering done here is the demographic filter.

use crate::deserializers::{
    de_option_score_forgiving, de_option_string_forgiving, de_option_u8_forgiving,
    score_from_value,
};
use crate::taxonomy::{CellId, Dimension};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Demographic attributes carried by both row shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default, deserialize_with = "de_option_string_forgiving")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "de_option_string_forgiving")]
    pub department: Option<String>,
    #[serde(
        default,
        alias = "employment_type",
        deserialize_with = "de_option_string_forgiving"
    )]
    pub role: Option<String>,
    #[serde(
        default,
        alias = "age",
        alias = "ageGroup",
        deserialize_with = "de_option_string_forgiving"
    )]
    pub age_group: Option<String>,
    #[serde(
        default,
        alias = "user_language",
        alias = "userLanguage",
        deserialize_with = "de_option_string_forgiving"
    )]
    pub language: Option<String>,
}

/// One respondent's 25 sentiment answers.
///
/// Each score is the raw value as exported (nominally 1.0..=3.0, lower means
/// less resistance). `None` marks a missing or non-numeric answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSentimentRow")]
pub struct SentimentRow {
    pub respondent_id: Option<String>,
    pub demographics: Demographics,
    scores: [Option<f64>; 25],
}

#[derive(Deserialize)]
struct RawSentimentRow {
    #[serde(
        default,
        alias = "respondentId",
        alias = "responseId",
        deserialize_with = "de_option_string_forgiving"
    )]
    respondent_id: Option<String>,
    #[serde(flatten)]
    demographics: Demographics,
    #[serde(flatten)]
    fields: HashMap<String, serde_json::Value>,
}

impl From<RawSentimentRow> for SentimentRow {
    fn from(raw: RawSentimentRow) -> Self {
        let mut row = SentimentRow::new(raw.demographics);
        row.respondent_id = raw.respondent_id;
        for cell in CellId::all() {
            row.scores[cell.index()] = raw.fields.get(&cell.field_name()).and_then(score_from_value);
        }
        row
    }
}

impl SentimentRow {
    pub fn new(demographics: Demographics) -> Self {
        Self {
            respondent_id: None,
            demographics,
            scores: [None; 25],
        }
    }

    /// Row answering every question with the same value.
    pub fn uniform(value: f64) -> Self {
        let mut row = Self::new(Demographics::default());
        row.scores = [Some(value); 25];
        row
    }

    pub fn with_score(mut self, cell: CellId, value: f64) -> Self {
        self.set_score(cell, Some(value));
        self
    }

    /// Non-finite values are stored as missing.
    pub fn set_score(&mut self, cell: CellId, value: Option<f64>) {
        self.scores[cell.index()] = value.filter(|v| v.is_finite());
    }

    pub fn score(&self, cell: CellId) -> Option<f64> {
        self.scores[cell.index()]
    }
}

/// One (respondent, construct) capability score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRow {
    #[serde(
        default,
        alias = "respondentId",
        deserialize_with = "de_option_string_forgiving"
    )]
    pub respondent_id: Option<String>,
    #[serde(default, deserialize_with = "de_option_u8_forgiving")]
    pub dimension_id: Option<u8>,
    #[serde(default, deserialize_with = "de_option_string_forgiving")]
    pub dimension: Option<String>,
    #[serde(default, deserialize_with = "de_option_u8_forgiving")]
    pub construct_id: Option<u8>,
    #[serde(default, deserialize_with = "de_option_string_forgiving")]
    pub construct: Option<String>,
    #[serde(default, deserialize_with = "de_option_score_forgiving")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub demographics: Demographics,
}

impl CapabilityRow {
    pub fn new(dimension: Dimension, score: f64) -> Self {
        Self {
            dimension_id: Some(dimension.id()),
            dimension: Some(dimension.name().to_string()),
            score: Some(score),
            ..Default::default()
        }
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension_id.and_then(Dimension::from_id)
    }
}

/// Exact-match demographic filter; every provided field must match.
/// Blank values place no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicFilter {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
}

impl DemographicFilter {
    pub fn is_empty(&self) -> bool {
        [&self.region, &self.department, &self.role, &self.age_group]
            .into_iter()
            .all(|v| constraint(v).is_none())
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = Some(age_group.into());
        self
    }

    pub fn matches(&self, d: &Demographics) -> bool {
        fn check(want: &Option<String>, have: &Option<String>) -> bool {
            match constraint(want) {
                None => true,
                Some(w) => have.as_deref().map(str::trim) == Some(w),
            }
        }
        check(&self.region, &d.region)
            && check(&self.department, &d.department)
            && check(&self.role, &d.role)
            && check(&self.age_group, &d.age_group)
    }
}

fn constraint(want: &Option<String>) -> Option<&str> {
    want.as_deref().map(str::trim).filter(|w| !w.is_empty())
}
