use serde::{Deserialize, Serialize};

/// Presentation thresholds applied when turning scores into profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionPolicy {
    /// Ranked slots shown beside a single main profile before cutoff widening.
    pub secondary_slots: usize,
    /// Points below the top score still flagged as a near tie.
    pub near_tie_margin: u32,
    /// Secondary profiles taken from a pre-ranked list without scores.
    pub fallback_secondary_slots: usize,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            secondary_slots: 3,
            near_tie_margin: 2,
            fallback_secondary_slots: 2,
        }
    }
}
