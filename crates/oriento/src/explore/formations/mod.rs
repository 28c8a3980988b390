//! Parcoursup formations: CSV import, statistics merge, search.

mod parser;
pub mod stats;

pub use stats::{load_snapshot, load_snapshot_path, merge_stats, MergeSummary, StatsRecord};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use super::{matches_query, SectorFilter};
use crate::error::{open_data_file, CatalogueError};

pub const DEFAULT_DOMAIN: &str = "Autre";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationLinks {
    #[serde(default)]
    pub fiche_formation: String,
    #[serde(default)]
    pub statistiques: String,
    #[serde(default)]
    pub site: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub etablissement: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub skills: Vec<String>,
    pub qualities: Vec<String>,
    pub education: Vec<String>,
    pub links: FormationLinks,
    pub location: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Map<String, Value>>,
}

impl Formation {
    /// First comma-separated segment of the domain.
    pub fn sector(&self) -> &str {
        let first = self.domain.split(',').next().unwrap_or_default().trim();
        if first.is_empty() {
            DEFAULT_DOMAIN
        } else {
            first
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormationCatalogue {
    formations: Vec<Formation>,
}

impl FormationCatalogue {
    pub fn new(formations: Vec<Formation>) -> Self {
        Self { formations }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let formations: Vec<Formation> = serde_json::from_reader(reader)?;
        Ok(Self::new(formations))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let catalogue = Self::from_json_reader(open_data_file(path.as_ref())?)?;
        info!(
            path = %path.as_ref().display(),
            formations = catalogue.len(),
            "loaded formations catalogue"
        );
        Ok(catalogue)
    }

    /// Pretty-printed JSON array, the format the browse screens load.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), CatalogueError> {
        serde_json::to_writer_pretty(writer, &self.formations)?;
        Ok(())
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogueError> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    pub fn all(&self) -> &[Formation] {
        &self.formations
    }

    pub fn into_formations(self) -> Vec<Formation> {
        self.formations
    }

    pub fn find(&self, id: &str) -> Option<&Formation> {
        self.formations.iter().find(|formation| formation.id == id)
    }

    /// Distinct sectors in first-seen order.
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = Vec::new();
        for formation in &self.formations {
            let sector = formation.sector();
            if !sectors.contains(&sector) {
                sectors.push(sector);
            }
        }
        sectors
    }

    pub fn search(&self, query: &str, sector: &SectorFilter) -> Vec<&Formation> {
        self.formations
            .iter()
            .filter(|formation| {
                matches_query(
                    query,
                    [formation.title.as_str(), formation.etablissement.as_str()],
                )
            })
            .filter(|formation| sector.accepts(formation.sector()))
            .collect()
    }
}

/// Reads the Parcoursup cartography CSV export.
pub struct FormationImporter;

impl FormationImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FormationCatalogue, CatalogueError> {
        Self::from_reader(open_data_file(path.as_ref())?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FormationCatalogue, CatalogueError> {
        let formations = parser::parse_formations(reader)?;
        info!(formations = formations.len(), "imported formations from CSV");
        Ok(FormationCatalogue::new(formations))
    }
}
