use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::info;

use super::{Formation, FormationCatalogue};
use crate::error::{open_data_file, CatalogueError};

const CODE_FIELD: &str = "cod_aff_form";

/// One record of the yearly Parcoursup statistics export.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl StatsRecord {
    /// The formation code, whether the export stored it as text or number.
    pub fn code(&self) -> Option<String> {
        match self.fields.get(CODE_FIELD)? {
            Value::String(code) => Some(code.trim().to_string()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }
}

pub fn load_snapshot<R: Read>(reader: R) -> Result<Vec<StatsRecord>, CatalogueError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_snapshot_path<P: AsRef<Path>>(path: P) -> Result<Vec<StatsRecord>, CatalogueError> {
    load_snapshot(open_data_file(path.as_ref())?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub catalogue: usize,
    pub stats: usize,
    pub kept: usize,
    pub unique: usize,
}

/// Keeps the formations that have statistics, attaches them, and drops
/// repeated ids. The first record and the first formation win.
pub fn merge_stats(
    catalogue: FormationCatalogue,
    records: &[StatsRecord],
) -> (FormationCatalogue, MergeSummary) {
    let mut by_code: HashMap<String, &Map<String, Value>> = HashMap::new();
    for record in records {
        if let Some(code) = record.code() {
            by_code.entry(code).or_insert(&record.fields);
        }
    }

    let total = catalogue.len();
    let kept: Vec<Formation> = catalogue
        .into_formations()
        .into_iter()
        .filter_map(|mut formation| {
            let fields = by_code.get(&formation.id)?;
            formation.stats = Some((*fields).clone());
            Some(formation)
        })
        .collect();
    let kept_count = kept.len();

    let mut seen = HashSet::new();
    let unique: Vec<Formation> = kept
        .into_iter()
        .filter(|formation| seen.insert(formation.id.clone()))
        .collect();

    let summary = MergeSummary {
        catalogue: total,
        stats: records.len(),
        kept: kept_count,
        unique: unique.len(),
    };
    info!(
        catalogue = summary.catalogue,
        stats = summary.stats,
        kept = summary.kept,
        unique = summary.unique,
        "merged formation statistics"
    );

    (FormationCatalogue::new(unique), summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn formation(id: &str, title: &str) -> Formation {
        Formation {
            id: id.to_string(),
            title: title.to_string(),
            ..Formation::default()
        }
    }

    fn snapshot() -> Vec<StatsRecord> {
        serde_json::from_value(json!([
            { "datasetid": "fr-esr-parcoursup", "fields": { "cod_aff_form": "100", "capa_fin": 35 } },
            { "fields": { "cod_aff_form": 200, "capa_fin": 12 } },
            { "fields": { "cod_aff_form": "100", "capa_fin": 99 } },
            { "fields": { "g_ea_lib_vx": "sans code" } }
        ]))
        .expect("snapshot parses")
    }

    #[test]
    fn reads_codes_stored_as_text_or_number() {
        let records = snapshot();
        assert_eq!(records[0].code().as_deref(), Some("100"));
        assert_eq!(records[1].code().as_deref(), Some("200"));
        assert_eq!(records[3].code(), None);
    }

    #[test]
    fn keeps_formations_with_stats_and_drops_duplicates() {
        let catalogue = FormationCatalogue::new(vec![
            formation("100", "BUT Informatique"),
            formation("300", "Licence Droit"),
            formation("200", "BTS SIO"),
            formation("100", "BUT Informatique (doublon)"),
        ]);

        let (merged, summary) = merge_stats(catalogue, &snapshot());

        assert_eq!(
            summary,
            MergeSummary {
                catalogue: 4,
                stats: 4,
                kept: 3,
                unique: 2
            }
        );
        let titles: Vec<&str> = merged
            .all()
            .iter()
            .map(|formation| formation.title.as_str())
            .collect();
        assert_eq!(titles, vec!["BUT Informatique", "BTS SIO"]);
        let stats = merged
            .find("100")
            .and_then(|formation| formation.stats.as_ref())
            .expect("stats attached");
        assert_eq!(stats.get("capa_fin"), Some(&json!(35)));
    }
}
