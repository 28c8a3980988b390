use serde::Serialize;

use super::{Category, ProfileResolution};

/// Display content for one RIASEC profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub traits: Vec<&'static str>,
    pub careers: Vec<&'static str>,
}

/// Immutable lookup from category to display content.
#[derive(Debug, Clone)]
pub struct ProfileCatalogue {
    entries: [ProfileDescription; 6],
}

impl ProfileCatalogue {
    pub fn french() -> Self {
        Self {
            entries: [
                ProfileDescription {
                    name: "Réaliste",
                    description: "Tu es pragmatique et tu aimes les activités concrètes. Tu préfères manipuler des outils et travailler avec tes mains.",
                    traits: vec!["Pratique", "Concret", "Manuel"],
                    careers: vec!["Ingénieur", "Technicien", "Artisan", "Pilote"],
                },
                ProfileDescription {
                    name: "Investigateur",
                    description: "Tu es curieux et analytique. Tu aimes observer, comprendre et résoudre des problèmes complexes.",
                    traits: vec!["Analytique", "Curieux", "Logique"],
                    careers: vec!["Chercheur", "Médecin", "Ingénieur R&D", "Analyste"],
                },
                ProfileDescription {
                    name: "Artistique",
                    description: "Tu es créatif et imaginatif. Tu as besoin d'exprimer ta créativité et d'innover.",
                    traits: vec!["Créatif", "Original", "Expressif"],
                    careers: vec!["Designer", "Artiste", "Architecte", "Réalisateur"],
                },
                ProfileDescription {
                    name: "Social",
                    description: "Tu es empathique et tu aimes aider les autres. Le relationnel est au cœur de tes motivations.",
                    traits: vec!["Empathique", "Communicatif", "Altruiste"],
                    careers: vec!["Enseignant", "Psychologue", "Infirmier", "Coach"],
                },
                ProfileDescription {
                    name: "Entreprenant",
                    description: "Tu es ambitieux et tu aimes diriger. Tu cherches à convaincre et à atteindre des objectifs.",
                    traits: vec!["Leader", "Persuasif", "Ambitieux"],
                    careers: vec!["Manager", "Entrepreneur", "Commercial", "Avocat"],
                },
                ProfileDescription {
                    name: "Conventionnel",
                    description: "Tu es organisé et rigoureux. Tu apprécies les tâches structurées et les procédures claires.",
                    traits: vec!["Méthodique", "Précis", "Fiable"],
                    careers: vec!["Comptable", "Assistant", "Administrateur", "Contrôleur"],
                },
            ],
        }
    }

    pub fn describe(&self, category: Category) -> &ProfileDescription {
        &self.entries[category.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = (Category, &ProfileDescription)> + '_ {
        Category::CANONICAL
            .iter()
            .map(move |category| (*category, self.describe(*category)))
    }

    /// Joins a resolution with display content for the results screen.
    pub fn present(&self, resolution: &ProfileResolution) -> ResultsView {
        let cards = |codes: &[Category]| -> Vec<ProfileCard> {
            codes
                .iter()
                .map(|category| ProfileCard {
                    code: *category,
                    profile: self.describe(*category).clone(),
                })
                .collect()
        };

        ResultsView {
            main: cards(&resolution.main_codes),
            secondary: cards(&resolution.secondary_codes),
            near_tied: cards(&resolution.near_tied_codes),
        }
    }
}

impl Default for ProfileCatalogue {
    fn default() -> Self {
        Self::french()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub code: Category,
    #[serde(flatten)]
    pub profile: ProfileDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub main: Vec<ProfileCard>,
    pub secondary: Vec<ProfileCard>,
    pub near_tied: Vec<ProfileCard>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riasec::{resolve_profile, ScoreTable};

    #[test]
    fn names_follow_category_labels() {
        let catalogue = ProfileCatalogue::french();
        for (category, description) in catalogue.entries() {
            assert_eq!(description.name, category.label());
            assert_eq!(description.traits.len(), 3);
            assert_eq!(description.careers.len(), 4);
        }
    }

    #[test]
    fn present_builds_cards_per_tier() {
        let catalogue = ProfileCatalogue::french();
        let resolution = resolve_profile(&ScoreTable::new([30, 29, 20, 20, 5, 5]));
        let view = catalogue.present(&resolution);

        assert_eq!(view.main.len(), 1);
        assert_eq!(view.main[0].code, Category::Realistic);
        assert_eq!(view.main[0].profile.name, "Réaliste");
        assert_eq!(
            view.secondary
                .iter()
                .map(|card| card.code)
                .collect::<Vec<_>>(),
            vec![Category::Investigative, Category::Artistic, Category::Social]
        );
        assert_eq!(view.near_tied[0].profile.name, "Investigateur");
    }
}
