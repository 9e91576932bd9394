use readiness_insights::heatmap::NO_DATA_RANK;
use readiness_insights::{
    Benchmarks, CapabilityRow, CellId, ColorBand, DemographicFilter, Dimension,
    SentimentRow, SentimentWeaknessOptions, Severity, WeaknessKind, analyze_wave,
    compute_capability_weaknesses, compute_sentiment_heatmap, compute_sentiment_weaknesses,
    recommend_interventions,
};
use serde_json::json;
use std::collections::HashSet;

fn rows_from_json(value: serde_json::Value) -> Vec<SentimentRow> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn all_ones_is_uniformly_favorable() {
    let rows: Vec<SentimentRow> = (0..4).map(|_| SentimentRow::uniform(1.0)).collect();
    let heatmap = compute_sentiment_heatmap(&rows, &DemographicFilter::default());

    assert_eq!(heatmap.stats.overall_average, 1.0);
    assert_eq!(heatmap.stats.standard_deviation, 0.0);
    assert_eq!(heatmap.stats.total_respondents, 4);
    assert!(heatmap.cells.iter().all(|c| c.color == ColorBand::Favorable));
    assert!(heatmap.cells.iter().all(|c| c.count == 4));
    assert!(
        compute_sentiment_weaknesses(&rows, &SentimentWeaknessOptions::default()).is_empty()
    );
}

#[test]
fn ranks_are_a_permutation_over_non_empty_cells() {
    let target = CellId::from_ids(3, 3).unwrap();
    let mut rows = vec![
        SentimentRow::uniform(2.0).with_score(target, 2.9),
        SentimentRow::uniform(1.5),
    ];
    // blank one question for everyone
    let blank = CellId::from_ids(5, 5).unwrap();
    for r in &mut rows {
        r.set_score(blank, None);
    }

    let heatmap = compute_sentiment_heatmap(&rows, &DemographicFilter::default());
    let ranks: HashSet<u32> = heatmap
        .cells
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| c.rank)
        .collect();
    assert_eq!(ranks, (1..=24).collect::<HashSet<u32>>());

    let empty = heatmap.cell(blank).unwrap();
    assert_eq!(empty.rank, NO_DATA_RANK);
    assert_eq!(empty.color, ColorBand::NoData);

    // highest score -> last rank
    assert_eq!(heatmap.cell(target).unwrap().rank, 24);
    // ties follow enumeration order
    assert_eq!(heatmap.cell(CellId::from_ids(1, 1).unwrap()).unwrap().rank, 1);
    assert_eq!(heatmap.cell(CellId::from_ids(1, 2).unwrap()).unwrap().rank, 2);
}

#[test]
fn lowest_and_highest_views_cover_all_cells() {
    let rows = rows_from_json(json!([
        { "respondent_id": "r1", "sentiment_1": 3, "sentiment_7": "2.5", "sentiment_13": 1.2 },
        { "respondent_id": "r2", "sentiment_1": 3, "sentiment_7": null, "sentiment_13": "n/a" }
    ]));
    let heatmap = compute_sentiment_heatmap(&rows, &DemographicFilter::default());

    let lowest: Vec<CellId> = heatmap.lowest_scoring_cells(25).iter().map(|c| c.cell_id).collect();
    let mut highest: Vec<CellId> =
        heatmap.highest_scoring_cells(25).iter().map(|c| c.cell_id).collect();
    assert_eq!(lowest.len(), 3);
    highest.reverse();
    assert_eq!(lowest, highest);

    assert_eq!(lowest[0], CellId::from_ids(1, 1).unwrap());
    let q7 = heatmap.cell(CellId::from_ids(2, 2).unwrap()).unwrap();
    assert_eq!(q7.count, 1);
    assert_eq!(q7.score, 2.5);
    let q13 = heatmap.cell(CellId::from_ids(3, 3).unwrap()).unwrap();
    assert_eq!(q13.count, 1);
}

#[test]
fn demographic_filter_with_no_matches_yields_empty_matrix() {
    let rows = rows_from_json(json!([
        { "region": "North", "department": "Ops", "sentiment_1": 2 },
        { "region": "South", "department": "Ops", "sentiment_1": 1 }
    ]));
    let north = compute_sentiment_heatmap(&rows, &DemographicFilter::default().region("North"));
    assert_eq!(north.stats.total_respondents, 1);
    assert_eq!(north.cells[0].score, 2.0);

    let nobody = compute_sentiment_heatmap(
        &rows,
        &DemographicFilter::default().region("North").department("Sales"),
    );
    assert_eq!(nobody.cells.len(), 25);
    assert!(nobody.cells.iter().all(|c| c.count == 0 && c.rank == NO_DATA_RANK));
    assert_eq!(nobody.stats.overall_average, 0.0);
}

#[test]
fn blank_filter_value_places_no_constraint() {
    let rows = rows_from_json(json!([{ "region": "North", "sentiment_1": 2 }]));
    let filter: DemographicFilter = serde_json::from_value(json!({ "region": "" })).unwrap();
    let heatmap = compute_sentiment_heatmap(&rows, &filter);
    assert_eq!(heatmap.stats.total_respondents, 1);
    assert_eq!(heatmap.cells[0].count, 1);
}

#[test]
fn fractional_dimension_id_is_not_attributed() {
    let rows: Vec<CapabilityRow> = serde_json::from_value(json!([
        { "dimension_id": 1.4, "score": 2.0 },
        { "dimension_id": 2, "score": 2.0 }
    ]))
    .unwrap();
    let areas: Vec<String> = compute_capability_weaknesses(&rows, &Benchmarks::default())
        .into_iter()
        .map(|w| w.area)
        .collect();
    assert_eq!(areas, vec!["Data Maturity".to_string()]);
}

#[test]
fn capability_gap_scenarios() {
    let rows = vec![
        CapabilityRow::new(Dimension::StrategyVision, 3.0),
        CapabilityRow::new(Dimension::DataMaturity, 4.8),
    ];
    let weaknesses = compute_capability_weaknesses(&rows, &Benchmarks::default());
    assert_eq!(weaknesses.len(), 1);
    let w = &weaknesses[0];
    assert_eq!(w.kind, WeaknessKind::Capability);
    assert_eq!(w.area, "Strategy & Vision");
    assert_eq!(w.gap, Some(2.0));
    assert_eq!(w.severity, Severity::Critical);

    let recs = recommend_interventions(&weaknesses);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].code, "A1");
}

#[test]
fn capability_rows_from_json_skip_junk_scores() {
    let rows: Vec<CapabilityRow> = serde_json::from_value(json!([
        { "dimension_id": 4, "score": "3.0" },
        { "dimension_id": 4, "score": "junk" },
        { "dimension_id": "4", "score": 3.0 },
        { "dimension_id": 99, "score": 1.0 }
    ]))
    .unwrap();
    let weaknesses = compute_capability_weaknesses(&rows, &Benchmarks::default());
    assert_eq!(weaknesses.len(), 1);
    assert_eq!(weaknesses[0].area, "Talent & Skills");
    assert_eq!(weaknesses[0].affected_count, 2);
}

#[test]
fn high_resistance_wave_end_to_end() {
    let options = SentimentWeaknessOptions {
        threshold: 2.5,
        critical_threshold: 2.8,
        limit: 10,
    };
    let org = CellId::from_ids(5, 4).unwrap();
    let rows = vec![
        SentimentRow::uniform(1.0).with_score(org, 3.0),
        SentimentRow::uniform(1.0).with_score(org, 2.9),
    ];
    let capability = vec![CapabilityRow::new(Dimension::EthicsResponsibility, 3.8)];

    let report = analyze_wave(
        &rows,
        &capability,
        &DemographicFilter::default(),
        &Benchmarks::default(),
        &options,
    );

    assert_eq!(report.sentiment_weaknesses.len(), 1);
    let s = &report.sentiment_weaknesses[0];
    assert_eq!(s.area, "Organizational Stability - Too Opaque");
    assert_eq!(s.severity, Severity::Critical);
    assert!(s.details.starts_with("Q24:"));

    assert_eq!(report.capability_weaknesses.len(), 1);
    assert_eq!(report.capability_weaknesses[0].severity, Severity::High);

    let codes: Vec<&str> = report.recommendations.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["A1", "A3"]);

    let rendered = serde_json::to_value(&report).unwrap();
    assert_eq!(rendered["heatmap"]["cells"].as_array().unwrap().len(), 25);
    assert_eq!(rendered["recommendations"][0]["code"], "A1");
}

#[test]
fn baseline_comparison_reports_improvement() {
    let before = vec![SentimentRow::uniform(2.5)];
    let after = vec![SentimentRow::uniform(2.0)];
    let f = DemographicFilter::default();
    let deltas = compute_sentiment_heatmap(&after, &f).compare(&compute_sentiment_heatmap(&before, &f));
    assert_eq!(deltas.len(), 25);
    assert!(deltas.iter().all(|d| (d.delta + 0.5).abs() < 1e-9));
}
