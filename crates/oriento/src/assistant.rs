//! Rule-based orientation assistant. Replies are chosen by keyword, in a
//! fixed order, from the student's onboarding answers.

use serde::{Deserialize, Serialize};

use crate::student::StudentProfile;

pub const DISCOVER_DOMAINS: &str = "Découvrir mes domaines";
pub const EXPLORE_CAREERS: &str = "Explorer les métiers";
pub const EXPLORE_FORMATIONS: &str = "Explorer les formations";
pub const START_OVER: &str = "🔄 Revenir au début";
const FALLBACK_DOMAIN: &str = "Commerce et Management";

const SPECIALTY_DOMAINS: &[(&str, &[&str])] = &[
    ("Maths", &["Mathématiques et statistiques"]),
    ("Mathématiques", &["Mathématiques et statistiques"]),
    ("NSI", &["Informatique et Numérique"]),
    ("SVT", &["Santé et Esthétique"]),
    ("SES", &["Economie et Finance"]),
    ("HGGSP", &["Droit"]),
    ("Arts", &["Art et Culture"]),
];

const INTEREST_DOMAINS: &[(&str, &[&str])] = &[
    ("tech", &["Informatique et Numérique"]),
    ("science", &["Sciences et Recherche"]),
    ("health", &["Santé et Esthétique"]),
    ("art", &["Art et Culture"]),
    ("sport", &["Sport"]),
    ("social", &["Social et Education"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Careers,
    Formations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    pub text: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<Destination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_domain: Option<String>,
}

impl AssistantReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: Vec::new(),
            navigate_to: None,
            selected_domain: None,
        }
    }

    fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }
}

pub struct Assistant;

impl Assistant {
    pub fn greeting() -> AssistantReply {
        AssistantReply::text("Bonjour 👋 Je suis Oriento. Que veux-tu explorer ?").with_suggestions([
            DISCOVER_DOMAINS,
            EXPLORE_CAREERS,
            EXPLORE_FORMATIONS,
        ])
    }

    /// Returns `None` when the message asks to start over; the caller then
    /// clears the conversation and shows [`Assistant::greeting`] again.
    pub fn reply(profile: &StudentProfile, message: &str) -> Option<AssistantReply> {
        let lower = message.to_lowercase();
        let domains = suggested_domains(profile);

        if lower.contains("découvrir") {
            return Some(
                AssistantReply::text("Voici les domaines qui correspondent à ton profil 👇")
                    .with_suggestions(domains),
            );
        }

        if let Some(domain) = domains.iter().find(|domain| domain.as_str() == message.trim()) {
            let mut reply = AssistantReply::text(format!(
                "Tu veux explorer le domaine \"{}\" ?",
                domain
            ))
            .with_suggestions(["Voir les métiers", "Voir les formations", START_OVER]);
            reply.selected_domain = Some(domain.clone());
            return Some(reply);
        }

        if lower.contains("métier") {
            let mut reply = AssistantReply::text("Je t'emmène vers les métiers 👇");
            reply.navigate_to = Some(Destination::Careers);
            return Some(reply);
        }

        if lower.contains("formation") {
            let mut reply = AssistantReply::text("Je t'emmène vers les formations 👇");
            reply.navigate_to = Some(Destination::Formations);
            return Some(reply);
        }

        if lower.contains("revenir") {
            return None;
        }

        Some(
            AssistantReply::text(
                "Je peux t'aider à explorer les métiers, formations ou tes domaines personnalisés.",
            )
            .with_suggestions([
                DISCOVER_DOMAINS,
                EXPLORE_CAREERS,
                EXPLORE_FORMATIONS,
                START_OVER,
            ]),
        )
    }
}

/// Domains implied by specialties then interests, first occurrence wins.
pub fn suggested_domains(profile: &StudentProfile) -> Vec<String> {
    let mut domains: Vec<String> = Vec::new();
    let lookups = profile
        .specialties
        .iter()
        .filter_map(|specialty| lookup(SPECIALTY_DOMAINS, specialty))
        .chain(
            profile
                .interests
                .iter()
                .filter_map(|interest| lookup(INTEREST_DOMAINS, interest)),
        );

    for mapped in lookups {
        for domain in mapped {
            if !domains.iter().any(|existing| existing == domain) {
                domains.push((*domain).to_string());
            }
        }
    }

    if domains.is_empty() {
        domains.push(FALLBACK_DOMAIN.to_string());
    }
    domains
}

fn lookup(table: &[(&str, &'static [&'static str])], key: &str) -> Option<&'static [&'static str]> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, domains)| *domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(specialties: &[&str], interests: &[&str]) -> StudentProfile {
        StudentProfile {
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..StudentProfile::default()
        }
    }

    #[test]
    fn suggests_deduplicated_domains() {
        let student = profile(&["NSI", "SVT"], &["tech", "health", "music"]);
        assert_eq!(
            suggested_domains(&student),
            vec![
                "Informatique et Numérique".to_string(),
                "Santé et Esthétique".to_string(),
            ]
        );
    }

    #[test]
    fn falls_back_to_commerce_without_matches() {
        let student = profile(&["Langues"], &["travel"]);
        assert_eq!(
            suggested_domains(&student),
            vec![FALLBACK_DOMAIN.to_string()]
        );
    }

    #[test]
    fn discover_lists_profile_domains() {
        let student = profile(&["HGGSP"], &["sport"]);
        let reply = Assistant::reply(&student, DISCOVER_DOMAINS).expect("reply");
        assert_eq!(reply.suggestions, vec!["Droit".to_string(), "Sport".to_string()]);
        assert!(reply.navigate_to.is_none());
    }

    #[test]
    fn choosing_a_domain_asks_for_confirmation() {
        let student = profile(&["Arts"], &[]);
        let reply = Assistant::reply(&student, "Art et Culture").expect("reply");
        assert_eq!(reply.selected_domain.as_deref(), Some("Art et Culture"));
        assert_eq!(reply.suggestions.len(), 3);
        assert!(reply.text.contains("Art et Culture"));
    }

    #[test]
    fn navigates_on_keywords() {
        let student = StudentProfile::default();
        let careers = Assistant::reply(&student, "Voir les MÉTIERS").expect("reply");
        assert_eq!(careers.navigate_to, Some(Destination::Careers));

        let formations = Assistant::reply(&student, EXPLORE_FORMATIONS).expect("reply");
        assert_eq!(formations.navigate_to, Some(Destination::Formations));
    }

    #[test]
    fn start_over_produces_no_reply() {
        assert!(Assistant::reply(&StudentProfile::default(), START_OVER).is_none());
    }

    #[test]
    fn unknown_messages_get_help() {
        let reply = Assistant::reply(&StudentProfile::default(), "salut").expect("reply");
        assert_eq!(reply.suggestions.len(), 4);
        assert_eq!(Assistant::greeting().suggestions.len(), 3);
    }
}
