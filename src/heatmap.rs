//! Sentiment heatmap: 25 cell aggregates, rank, color band and summary stats.
//!
//! Scores are clamped into [1.0, 3.0] before averaging. Rank 1 is the cell
//! with the least resistance. Color bands are absolute, so a cell's band
//! never depends on the other cells.

use crate::survey::{DemographicFilter, SentimentRow};
use crate::taxonomy::{CellId, ConcernLevel, RootCause};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 3.0;
/// Rank assigned to cells without samples.
pub const NO_DATA_RANK: u32 = 99;

/// Absolute color band of a cell score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Critical,
    High,
    Elevated,
    Moderate,
    Favorable,
    NoData,
}

/// Lower bound (inclusive) of each scored band, worst first.
const BAND_THRESHOLDS: [(f64, ColorBand); 4] = [
    (2.6, ColorBand::Critical),
    (2.2, ColorBand::High),
    (1.8, ColorBand::Elevated),
    (1.4, ColorBand::Moderate),
];

impl ColorBand {
    pub fn classify(score: f64, count: usize) -> Self {
        if count == 0 {
            return ColorBand::NoData;
        }
        BAND_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, band)| *band)
            .unwrap_or(ColorBand::Favorable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBand::Critical => "critical",
            ColorBand::High => "high",
            ColorBand::Elevated => "elevated",
            ColorBand::Moderate => "moderate",
            ColorBand::Favorable => "favorable",
            ColorBand::NoData => "no_data",
        }
    }

    /// Display color for renderers.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorBand::Critical => "#dc2626",
            ColorBand::High => "#f97316",
            ColorBand::Elevated => "#fcd34d",
            ColorBand::Moderate => "#4ade80",
            ColorBand::Favorable => "#15803d",
            ColorBand::NoData => "#1f2937",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentCell {
    pub cell_id: CellId,
    pub level_id: u8,
    pub category_id: u8,
    pub score: f64,
    pub count: usize,
    /// 1 = least resistance; `NO_DATA_RANK` when `count == 0`.
    pub rank: u32,
    pub color: ColorBand,
    pub level_name: String,
    pub category_name: String,
    pub description: String,
}

impl SentimentCell {
    fn new(cell_id: CellId, score: f64, count: usize) -> Self {
        let level: ConcernLevel = cell_id.level;
        let category: RootCause = cell_id.category;
        Self {
            cell_id,
            level_id: level.id(),
            category_id: category.id(),
            score,
            count,
            rank: NO_DATA_RANK,
            color: ColorBand::classify(score, count),
            level_name: level.name().to_string(),
            category_name: category.name().to_string(),
            description: format!(
                "{} × {}: {}",
                level.name(),
                category.name(),
                level.description()
            ),
        }
    }

    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStats {
    pub overall_average: f64,
    /// Population standard deviation of non-empty cell scores.
    pub standard_deviation: f64,
    pub total_respondents: usize,
    /// Per concern level, index 0 = level 1.
    pub row_averages: [f64; 5],
    /// Per root cause, index 0 = category 1.
    pub column_averages: [f64; 5],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Always 25 cells in fixed enumeration order.
    pub cells: Vec<SentimentCell>,
    pub stats: HeatmapStats,
}

/// Score change of one cell between two heatmaps. Negative means improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDelta {
    pub cell_id: CellId,
    pub baseline: f64,
    pub current: f64,
    pub delta: f64,
}

pub fn clamp_score(raw: f64) -> f64 {
    raw.clamp(SCORE_MIN, SCORE_MAX)
}

/// Aggregates respondent rows into the 25-cell matrix.
pub fn compute_sentiment_heatmap(rows: &[SentimentRow], filter: &DemographicFilter) -> Heatmap {
    let filtered: Vec<&SentimentRow> = rows
        .iter()
        .filter(|r| filter.matches(&r.demographics))
        .collect();

    debug!(
        "heatmap: {} of {} rows pass filter",
        filtered.len(),
        rows.len()
    );

    let mut cells: Vec<SentimentCell> = CellId::all()
        .map(|cell_id| {
            let (sum, count) = filtered
                .iter()
                .filter_map(|r| r.score(cell_id))
                .fold((0.0, 0usize), |(s, n), v| (s + clamp_score(v), n + 1));
            let score = if count > 0 { sum / count as f64 } else { 0.0 };
            SentimentCell::new(cell_id, score, count)
        })
        .collect();

    assign_ranks(&mut cells);
    let stats = summarize(&cells, filtered.len());
    Heatmap { cells, stats }
}

/// Stable ascending sort over enumeration order; position becomes rank.
fn assign_ranks(cells: &mut [SentimentCell]) {
    let mut order: Vec<usize> = (0..cells.len()).filter(|&i| cells[i].has_data()).collect();
    order.sort_by(|&a, &b| cells[a].score.total_cmp(&cells[b].score));
    for (pos, idx) in order.into_iter().enumerate() {
        cells[idx].rank = pos as u32 + 1;
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn summarize(cells: &[SentimentCell], total_respondents: usize) -> HeatmapStats {
    let scores: Vec<f64> = cells
        .iter()
        .filter(|c| c.has_data())
        .map(|c| c.score)
        .collect();
    let overall_average = mean(&scores);
    let variance = if scores.is_empty() {
        0.0
    } else {
        scores
            .iter()
            .map(|s| (s - overall_average).powi(2))
            .sum::<f64>()
            / scores.len() as f64
    };

    let average_where = |pred: &dyn Fn(&SentimentCell) -> bool| -> f64 {
        let v: Vec<f64> = cells
            .iter()
            .filter(|c| c.has_data() && pred(c))
            .map(|c| c.score)
            .collect();
        mean(&v)
    };

    let mut row_averages = [0.0; 5];
    for (i, level) in ConcernLevel::ALL.iter().enumerate() {
        row_averages[i] = average_where(&|c: &SentimentCell| c.cell_id.level == *level);
    }
    let mut column_averages = [0.0; 5];
    for (i, category) in RootCause::ALL.iter().enumerate() {
        column_averages[i] = average_where(&|c: &SentimentCell| c.cell_id.category == *category);
    }

    HeatmapStats {
        overall_average,
        standard_deviation: variance.sqrt(),
        total_respondents,
        row_averages,
        column_averages,
    }
}

impl Heatmap {
    pub fn cell(&self, cell_id: CellId) -> Option<&SentimentCell> {
        self.cells.iter().find(|c| c.cell_id == cell_id)
    }

    /// Problem areas: non-empty cells, worst (highest rank) first.
    pub fn lowest_scoring_cells(&self, count: usize) -> Vec<&SentimentCell> {
        let mut v: Vec<&SentimentCell> = self.cells.iter().filter(|c| c.has_data()).collect();
        v.sort_by(|a, b| b.rank.cmp(&a.rank));
        v.truncate(count);
        v
    }

    /// Strengths: non-empty cells, best (rank 1) first.
    pub fn highest_scoring_cells(&self, count: usize) -> Vec<&SentimentCell> {
        let mut v: Vec<&SentimentCell> = self.cells.iter().filter(|c| c.has_data()).collect();
        v.sort_by_key(|c| c.rank);
        v.truncate(count);
        v
    }

    /// Per-cell `self − baseline`, skipping cells empty on either side.
    pub fn compare(&self, baseline: &Heatmap) -> Vec<CellDelta> {
        self.cells
            .iter()
            .filter(|c| c.has_data())
            .filter_map(|c| {
                let base = baseline.cell(c.cell_id).filter(|b| b.has_data())?;
                Some(CellDelta {
                    cell_id: c.cell_id,
                    baseline: base.score,
                    current: c.score,
                    delta: c.score - base.score,
                })
            })
            .collect()
    }
}
