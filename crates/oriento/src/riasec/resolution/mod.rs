mod policy;
mod rules;

pub use policy::ResolutionPolicy;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::{Category, InvalidInput, ScoreTable};

/// What the caller knows about the quiz outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileInput {
    WithScores(ScoreTable),
    /// Codes already sorted best-first, without their totals. Ties cannot be
    /// detected in this mode.
    RankedOnly(Vec<Category>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    Scored,
    RankedOnly,
}

/// Main and secondary profiles derived from one completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResolution {
    pub mode: ResolutionMode,
    pub main_codes: Vec<Category>,
    pub secondary_codes: Vec<Category>,
    pub near_tied_codes: Vec<Category>,
}

impl ProfileResolution {
    fn from_tiers(mode: ResolutionMode, tiers: rules::Tiers) -> Self {
        Self {
            mode,
            main_codes: tiers.main,
            secondary_codes: tiers.secondary,
            near_tied_codes: tiers.near_tied,
        }
    }

    /// Main codes followed by secondary codes, e.g. `"RIA"`.
    pub fn summary_code(&self) -> String {
        self.main_codes
            .iter()
            .chain(&self.secondary_codes)
            .map(|category| category.code())
            .collect()
    }

    pub fn is_tied(&self) -> bool {
        self.main_codes.len() > 1
    }

    /// Main then secondary codes, the order the results screen lists them.
    pub fn ordered_codes(&self) -> impl Iterator<Item = Category> + '_ {
        self.main_codes
            .iter()
            .chain(&self.secondary_codes)
            .copied()
    }
}

/// Stateless resolver applying a [`ResolutionPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ProfileResolver {
    policy: ResolutionPolicy,
}

impl ProfileResolver {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        &self.policy
    }

    pub fn resolve(&self, input: &ProfileInput) -> Result<ProfileResolution, InvalidInput> {
        let (mode, tiers) = match input {
            ProfileInput::WithScores(table) => (
                ResolutionMode::Scored,
                rules::resolve_scored(table, &self.policy),
            ),
            ProfileInput::RankedOnly(ranked) => (
                ResolutionMode::RankedOnly,
                rules::resolve_ranked(ranked, &self.policy)?,
            ),
        };

        let resolution = ProfileResolution::from_tiers(mode, tiers);
        debug!(
            ?mode,
            profile = %resolution.summary_code(),
            tied = resolution.is_tied(),
            "resolved RIASEC profile"
        );
        Ok(resolution)
    }

    pub fn resolve_scores(&self, table: &ScoreTable) -> ProfileResolution {
        ProfileResolution::from_tiers(
            ResolutionMode::Scored,
            rules::resolve_scored(table, &self.policy),
        )
    }

    /// Validates a raw `{ code: score }` map before resolving it.
    pub fn resolve_raw(
        &self,
        raw: &BTreeMap<String, Value>,
    ) -> Result<ProfileResolution, InvalidInput> {
        let table = ScoreTable::from_raw(raw)?;
        Ok(self.resolve_scores(&table))
    }
}

/// Resolves a score table with the default policy.
pub fn resolve_profile(table: &ScoreTable) -> ProfileResolution {
    ProfileResolver::default().resolve_scores(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use Category::*;

    fn table(totals: [u32; 6]) -> ScoreTable {
        ScoreTable::new(totals)
    }

    #[test]
    fn two_way_tie_takes_single_next_tier() {
        let resolution = resolve_profile(&table([30, 30, 20, 20, 10, 5]));
        assert_eq!(resolution.main_codes, vec![Realistic, Investigative]);
        assert_eq!(resolution.secondary_codes, vec![Artistic, Social]);
        assert!(resolution.is_tied());
    }

    #[test]
    fn single_champion_widens_to_cutoff_tie() {
        let resolution = resolve_profile(&table([30, 25, 20, 20, 15, 10]));
        assert_eq!(resolution.main_codes, vec![Realistic]);
        assert_eq!(
            resolution.secondary_codes,
            vec![Investigative, Artistic, Social]
        );
    }

    #[test]
    fn single_champion_includes_ties_past_third_slot() {
        let resolution = resolve_profile(&table([30, 25, 20, 20, 20, 10]));
        assert_eq!(
            resolution.secondary_codes,
            vec![Investigative, Artistic, Social, Enterprising]
        );
    }

    #[test]
    fn flags_near_ties_below_the_top() {
        let resolution = resolve_profile(&table([30, 29, 10, 5, 5, 5]));
        assert_eq!(resolution.near_tied_codes, vec![Investigative]);
        assert_eq!(resolution.main_codes, vec![Realistic]);
    }

    #[test]
    fn near_tie_window_includes_margin_boundary() {
        let resolution = resolve_profile(&table([27, 28, 30, 29, 10, 0]));
        assert_eq!(resolution.main_codes, vec![Artistic]);
        assert_eq!(resolution.near_tied_codes, vec![Social, Investigative]);
    }

    #[test]
    fn all_equal_scores_tie_everything() {
        let resolution = resolve_profile(&table([10; 6]));
        assert_eq!(resolution.main_codes, Category::CANONICAL.to_vec());
        assert!(resolution.secondary_codes.is_empty());
        assert!(resolution.near_tied_codes.is_empty());
    }

    #[test]
    fn all_zero_scores_tie_everything() {
        let resolution = resolve_profile(&ScoreTable::default());
        assert_eq!(resolution.main_codes.len(), 6);
        assert!(resolution.near_tied_codes.is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        let scores = table([12, 18, 18, 7, 3, 18]);
        assert_eq!(resolve_profile(&scores), resolve_profile(&scores));
    }

    #[test]
    fn ranked_only_fallback_takes_first_three() {
        let resolver = ProfileResolver::default();
        let resolution = resolver
            .resolve(&ProfileInput::RankedOnly(vec![
                Artistic,
                Enterprising,
                Conventional,
                Realistic,
            ]))
            .expect("ranked list resolves");

        assert_eq!(resolution.mode, ResolutionMode::RankedOnly);
        assert_eq!(resolution.main_codes, vec![Artistic]);
        assert_eq!(resolution.secondary_codes, vec![Enterprising, Conventional]);
        assert!(resolution.near_tied_codes.is_empty());
    }

    #[test]
    fn ranked_only_degrades_to_available_length() {
        let resolution = ProfileResolver::default()
            .resolve(&ProfileInput::RankedOnly(vec![Social, Artistic]))
            .expect("short list resolves");
        assert_eq!(resolution.main_codes, vec![Social]);
        assert_eq!(resolution.secondary_codes, vec![Artistic]);
    }

    #[test]
    fn ranked_only_rejects_empty_and_duplicate_lists() {
        let resolver = ProfileResolver::default();
        assert_eq!(
            resolver.resolve(&ProfileInput::RankedOnly(Vec::new())),
            Err(InvalidInput::EmptyRanking)
        );
        assert_eq!(
            resolver.resolve(&ProfileInput::RankedOnly(vec![Social, Artistic, Social])),
            Err(InvalidInput::DuplicateCategory(Social))
        );
    }

    #[test]
    fn policy_controls_slots_and_margin() {
        let resolver = ProfileResolver::new(ResolutionPolicy {
            secondary_slots: 1,
            near_tie_margin: 5,
            fallback_secondary_slots: 2,
        });
        let resolution = resolver.resolve_scores(&table([30, 25, 25, 20, 15, 10]));
        assert_eq!(resolution.secondary_codes, vec![Investigative, Artistic]);
        assert_eq!(resolution.near_tied_codes, vec![Investigative, Artistic]);

        let none = ProfileResolver::new(ResolutionPolicy {
            secondary_slots: 0,
            near_tie_margin: 0,
            fallback_secondary_slots: 0,
        })
        .resolve_scores(&table([30, 29, 25, 20, 15, 10]));
        assert!(none.secondary_codes.is_empty());
        assert!(none.near_tied_codes.is_empty());
    }

    #[test]
    fn resolve_raw_validates_before_resolving() {
        let resolver = ProfileResolver::default();
        let raw: BTreeMap<String, Value> =
            serde_json::from_value(json!({"R": 30, "I": 30, "A": 20, "S": 20, "E": 10}))
                .expect("raw map");
        assert_eq!(
            resolver.resolve_raw(&raw),
            Err(InvalidInput::MissingCategory(Conventional))
        );
    }

    #[test]
    fn summary_code_concatenates_main_and_secondary() {
        let resolution = resolve_profile(&table([30, 25, 20, 20, 15, 10]));
        assert_eq!(resolution.summary_code(), "RIAS");
    }

    #[test]
    fn profile_input_deserializes_tagged_variants() {
        let scored: ProfileInput = serde_json::from_value(json!({
            "with_scores": {"R": 1, "I": 2, "A": 3, "S": 4, "E": 5, "C": 6}
        }))
        .expect("scored input");
        assert!(matches!(scored, ProfileInput::WithScores(scores) if scores.get(Conventional) == 6));

        let ranked: ProfileInput =
            serde_json::from_value(json!({"ranked_only": ["A", "E"]})).expect("ranked input");
        assert_eq!(ranked, ProfileInput::RankedOnly(vec![Artistic, Enterprising]));
    }
}
