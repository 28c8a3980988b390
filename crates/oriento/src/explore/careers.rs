use serde::{Deserialize, Serialize};

use crate::riasec::{Category, ProfileResolution};

use super::{matches_query, SectorFilter};

const MAIN_WEIGHT: u32 = 2;
const SECONDARY_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub id: String,
    pub title: String,
    pub sector: String,
    pub education: String,
    pub riasec: Vec<Category>,
}

impl Career {
    fn new(id: &str, title: &str, sector: &str, education: &str, riasec: &[Category]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            sector: sector.to_string(),
            education: education.to_string(),
            riasec: riasec.to_vec(),
        }
    }

    /// Weight of the codes this career shares with a resolved profile.
    pub fn affinity(&self, resolution: &ProfileResolution) -> u32 {
        self.riasec
            .iter()
            .map(|code| {
                if resolution.main_codes.contains(code) {
                    MAIN_WEIGHT
                } else if resolution.secondary_codes.contains(code) {
                    SECONDARY_WEIGHT
                } else {
                    0
                }
            })
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct CareerCatalogue {
    careers: Vec<Career>,
}

impl CareerCatalogue {
    pub fn standard() -> Self {
        use Category::*;
        Self {
            careers: vec![
                Career::new(
                    "dev-web",
                    "Développeur Web",
                    "Technologies",
                    "Bac+2 à Bac+5",
                    &[Investigative, Realistic, Conventional],
                ),
                Career::new(
                    "medecin",
                    "Médecin",
                    "Santé",
                    "Bac+9 à Bac+11",
                    &[Investigative, Social],
                ),
                Career::new(
                    "designer",
                    "Designer UX/UI",
                    "Création",
                    "Bac+3 à Bac+5",
                    &[Artistic, Investigative],
                ),
                Career::new(
                    "architecte",
                    "Architecte",
                    "Construction",
                    "Bac+5 à Bac+7",
                    &[Artistic, Realistic, Investigative],
                ),
                Career::new("prof", "Professeur", "Éducation", "Bac+5", &[Social, Artistic]),
                Career::new(
                    "ingenieur",
                    "Ingénieur",
                    "Technologies",
                    "Bac+5",
                    &[Investigative, Realistic, Enterprising],
                ),
                Career::new(
                    "psychologue",
                    "Psychologue",
                    "Santé",
                    "Bac+5",
                    &[Social, Investigative],
                ),
                Career::new(
                    "chef-projet",
                    "Chef de Projet",
                    "Management",
                    "Bac+5",
                    &[Enterprising, Social, Conventional],
                ),
            ],
        }
    }

    pub fn all(&self) -> &[Career] {
        &self.careers
    }

    pub fn find(&self, id: &str) -> Option<&Career> {
        self.careers.iter().find(|career| career.id == id)
    }

    /// Distinct sectors in first-seen order.
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = Vec::new();
        for career in &self.careers {
            if !sectors.contains(&career.sector.as_str()) {
                sectors.push(&career.sector);
            }
        }
        sectors
    }

    pub fn search(&self, query: &str, sector: &SectorFilter) -> Vec<&Career> {
        self.careers
            .iter()
            .filter(|career| {
                matches_query(query, [career.title.as_str(), career.sector.as_str()])
            })
            .filter(|career| sector.accepts(&career.sector))
            .collect()
    }

    /// Careers sharing at least one code with the profile, strongest first.
    /// Equal affinities keep catalogue order.
    pub fn recommend(&self, resolution: &ProfileResolution) -> Vec<&Career> {
        let mut scored: Vec<(u32, &Career)> = self
            .careers
            .iter()
            .map(|career| (career.affinity(resolution), career))
            .filter(|(affinity, _)| *affinity > 0)
            .collect();
        scored.sort_by(|left, right| right.0.cmp(&left.0));
        scored.into_iter().map(|(_, career)| career).collect()
    }
}

impl Default for CareerCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}
