//! Builds a [`Catalog`] from the delimited source table.
//!
//! Layout: one header row, then one row per cell with 11 columns:
//! Category, Reason, Level, Description, Shows up as, then three
//! (Action, Explanation) pairs. Quoting is RFC 4180 (`""` escapes a quote,
//! quoted fields may contain commas and newlines).

use super::{Catalog, CatalogCategory, MiniIntervention};
use crate::flavor::Flavor;
use crate::taxonomy::{CellId, ConcernLevel, RootCause};
use tracing::{debug, warn};

const FIELD_COUNT: usize = 11;

impl Catalog {
    /// Parses the source table. Never fails: short rows, unreadable records
    /// and rows outside the closed label vocabulary are skipped with a
    /// warning.
    pub fn parse(text: &str) -> Catalog {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut catalog = Catalog::default();
        for (line, result) in reader.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("catalog row {} unreadable: {}", line + 2, e);
                    continue;
                }
            };
            if record.len() < FIELD_COUNT {
                debug!(
                    "catalog row {} has {} fields, skipping",
                    line + 2,
                    record.len()
                );
                continue;
            }
            let fields: Vec<&str> = record.iter().take(FIELD_COUNT).collect();
            let Some(category) = build_category(&fields) else {
                warn!(
                    "catalog row {} has unrecognized labels (reason='{}', level='{}'); left unindexed",
                    line + 2,
                    fields[1].trim(),
                    fields[2].trim()
                );
                continue;
            };
            let cell = category.cell_id;
            if !catalog.insert(category) {
                warn!("catalog row {} duplicates cell {}; keeping first", line + 2, cell);
            }
        }
        catalog
    }
}

/// Unknown labels resolve to id 0, which has no cell.
fn label_ids(reason: &str, level: &str) -> (u8, u8) {
    let level_id = ConcernLevel::from_catalog_label(level).map_or(0, |l| l.id());
    let category_id = RootCause::from_catalog_label(reason).map_or(0, |c| c.id());
    (level_id, category_id)
}

fn build_category(f: &[&str]) -> Option<CatalogCategory> {
    let (category, reason, level, description, shows_up_as) = (
        f[0].trim(),
        f[1].trim(),
        f[2].trim(),
        f[3].trim(),
        f[4].trim(),
    );
    let (level_id, category_id) = label_ids(reason, level);
    let cell_id = CellId::from_ids(level_id, category_id)?;

    // All three slots are kept even when a title is blank.
    let actions = (0..3u8)
        .filter_map(|i| {
            let slot = i + 1;
            let title = f[5 + 2 * i as usize].trim();
            let explanation = f[6 + 2 * i as usize].trim();
            Some(MiniIntervention {
                id: format!("{}_A{}", cell_id, slot),
                cell_id,
                level_id,
                category_id,
                category: category.to_string(),
                reason: reason.to_string(),
                level: level.to_string(),
                description: description.to_string(),
                shows_up_as: shows_up_as.to_string(),
                action_number: slot,
                flavor: Flavor::from_slot(slot)?,
                title: title.to_string(),
                explanation: explanation.to_string(),
            })
        })
        .collect();

    Some(CatalogCategory {
        cell_id,
        category: category.to_string(),
        reason: reason.to_string(),
        level: level.to_string(),
        description: description.to_string(),
        shows_up_as: shows_up_as.to_string(),
        actions,
    })
}
