//! Browsable catalogues shown next to the quiz results: careers and
//! Parcoursup formations.

pub mod careers;
pub mod formations;

pub use careers::{Career, CareerCatalogue};
pub use formations::{
    Formation, FormationCatalogue, FormationImporter, FormationLinks, MergeSummary,
};

/// Label the browse screens use for "no sector filter".
pub const ALL_SECTORS: &str = "Tous";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectorFilter {
    #[default]
    All,
    Named(String),
}

impl SectorFilter {
    pub fn named(sector: impl Into<String>) -> Self {
        Self::Named(sector.into())
    }

    /// Missing, blank and "Tous" all mean no filter.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_SECTORS) => Self::All,
            Some(sector) => Self::named(sector),
        }
    }

    pub fn accepts(&self, sector: &str) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Named(expected) => expected == sector,
        }
    }
}

/// Case-insensitive substring match on any of the fields; a blank query
/// matches everything.
pub(crate) fn matches_query<'a, I>(query: &str, fields: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
