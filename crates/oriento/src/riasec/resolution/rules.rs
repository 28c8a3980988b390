use std::collections::HashSet;

use super::policy::ResolutionPolicy;
use crate::riasec::{Category, InvalidInput, ScoreTable};

pub(crate) struct Tiers {
    pub main: Vec<Category>,
    pub secondary: Vec<Category>,
    pub near_tied: Vec<Category>,
}

pub(crate) fn resolve_scored(table: &ScoreTable, policy: &ResolutionPolicy) -> Tiers {
    let ranked = table.ranked();
    let top_score = table.max();

    let (main, remaining): (Vec<_>, Vec<_>) = ranked
        .iter()
        .copied()
        .partition(|(_, score)| *score == top_score);

    let secondary = if main.len() == 1 {
        single_champion_tier(&remaining, policy.secondary_slots)
    } else {
        next_tier(&remaining)
    };

    let near_tied = ranked
        .iter()
        .filter(|(_, score)| {
            *score < top_score && *score >= top_score.saturating_sub(policy.near_tie_margin)
        })
        .map(|(category, _)| *category)
        .collect();

    Tiers {
        main: main.into_iter().map(|(category, _)| category).collect(),
        secondary,
        near_tied,
    }
}

/// Takes the next `slots` codes, widened to anything tied with the last slot.
fn single_champion_tier(remaining: &[(Category, u32)], slots: usize) -> Vec<Category> {
    if slots == 0 {
        return Vec::new();
    }
    if remaining.len() <= slots {
        return remaining.iter().map(|(category, _)| *category).collect();
    }

    let cutoff = remaining[slots - 1].1;
    remaining
        .iter()
        .filter(|(_, score)| *score >= cutoff)
        .map(|(category, _)| *category)
        .collect()
}

/// Every code sharing the highest score left after the main tier.
fn next_tier(remaining: &[(Category, u32)]) -> Vec<Category> {
    let Some((_, best)) = remaining.first() else {
        return Vec::new();
    };
    remaining
        .iter()
        .take_while(|(_, score)| score == best)
        .map(|(category, _)| *category)
        .collect()
}

pub(crate) fn resolve_ranked(
    ranked: &[Category],
    policy: &ResolutionPolicy,
) -> Result<Tiers, InvalidInput> {
    let Some(first) = ranked.first() else {
        return Err(InvalidInput::EmptyRanking);
    };

    let mut seen = HashSet::new();
    if let Some(duplicate) = ranked.iter().find(|category| !seen.insert(**category)) {
        return Err(InvalidInput::DuplicateCategory(*duplicate));
    }

    Ok(Tiers {
        main: vec![*first],
        secondary: ranked
            .iter()
            .skip(1)
            .take(policy.fallback_secondary_slots)
            .copied()
            .collect(),
        near_tied: Vec::new(),
    })
}
