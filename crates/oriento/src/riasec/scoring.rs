use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::{Categorized, Category, InvalidInput};

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;
/// Placeholder held by a quiz slot that has not been answered yet.
pub const UNANSWERED: u8 = 0;

/// Per-category totals, stored in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoreTable {
    totals: [u32; 6],
}

/// Sums Likert answers into their question's category bucket.
///
/// Every answer is validated before anything is accumulated, so a failure
/// never yields a partial table.
pub fn score<Q: Categorized>(answers: &[u8], bank: &[Q]) -> Result<ScoreTable, InvalidInput> {
    if answers.len() != bank.len() {
        return Err(InvalidInput::LengthMismatch {
            answers: answers.len(),
            questions: bank.len(),
        });
    }

    if let Some((index, value)) = answers
        .iter()
        .enumerate()
        .find(|(_, value)| !(LIKERT_MIN..=LIKERT_MAX).contains(*value))
    {
        return Err(InvalidInput::AnswerOutOfRange {
            index,
            value: *value,
        });
    }

    let mut table = ScoreTable::default();
    for (answer, question) in answers.iter().zip(bank) {
        table.totals[question.category().index()] += u32::from(*answer);
    }

    debug!(questions = bank.len(), total = table.total(), "scored RIASEC answers");
    Ok(table)
}

impl ScoreTable {
    pub fn new(totals: [u32; 6]) -> Self {
        Self { totals }
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Category, u32)>,
    {
        let mut table = Self::default();
        for (category, total) in pairs {
            table.totals[category.index()] = total;
        }
        table
    }

    /// Validates an untrusted `{ "R": n, ... }` map. All six codes must be
    /// present with non-negative integer values; unknown keys are rejected.
    pub fn from_raw(raw: &BTreeMap<String, Value>) -> Result<Self, InvalidInput> {
        let mut seen = [false; 6];
        let mut table = Self::default();

        for (key, value) in raw {
            let category: Category = key.parse()?;
            let total = value
                .as_u64()
                .and_then(|number| u32::try_from(number).ok())
                .ok_or_else(|| InvalidInput::InvalidScore {
                    code: key.clone(),
                    value: value.to_string(),
                })?;
            table.totals[category.index()] = total;
            seen[category.index()] = true;
        }

        if let Some(missing) = Category::CANONICAL
            .iter()
            .find(|category| !seen[category.index()])
        {
            return Err(InvalidInput::MissingCategory(*missing));
        }

        Ok(table)
    }

    pub fn get(&self, category: Category) -> u32 {
        self.totals[category.index()]
    }

    pub fn total(&self) -> u32 {
        self.totals.iter().sum()
    }

    pub fn max(&self) -> u32 {
        self.totals.iter().copied().max().unwrap_or_default()
    }

    /// `(category, total)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::CANONICAL
            .iter()
            .map(move |category| (*category, self.get(*category)))
    }

    /// All six pairs by descending total; equal totals keep canonical order.
    pub fn ranked(&self) -> Vec<(Category, u32)> {
        let mut pairs: Vec<_> = self.iter().collect();
        // stable sort keeps canonical order among ties
        pairs.sort_by(|(_, left), (_, right)| right.cmp(left));
        pairs
    }

    /// Checks that each total fits within `5 * questions_in_category`.
    pub fn within_bounds(&self, counts: &[usize; 6]) -> bool {
        self.iter().all(|(category, total)| {
            u64::from(total) <= u64::from(LIKERT_MAX) * counts[category.index()] as u64
        })
    }

    /// Totals expressed against the maximum each category could reach.
    pub fn normalized(&self, counts: &[usize; 6]) -> Vec<CategoryScore> {
        self.iter()
            .map(|(category, total)| {
                let max = u32::from(LIKERT_MAX) * counts[category.index()] as u32;
                let percent = if max == 0 {
                    0
                } else {
                    ((f64::from(total) * 100.0) / f64::from(max)).round() as u8
                };
                CategoryScore {
                    category,
                    total,
                    max,
                    percent,
                }
            })
            .collect()
    }
}

/// Display-ready view of one category total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub total: u32,
    pub max: u32,
    pub percent: u8,
}

impl Serialize for ScoreTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (category, total) in self.iter() {
            map.serialize_entry(&category, &total)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoreTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Self::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
