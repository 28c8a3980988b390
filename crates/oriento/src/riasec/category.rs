use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::InvalidInput;

/// One of the six Holland interest types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Category {
    /// Fixed `R < I < A < S < E < C` order used for every tie-break and
    /// default iteration.
    pub const CANONICAL: [Self; 6] = [
        Self::Realistic,
        Self::Investigative,
        Self::Artistic,
        Self::Social,
        Self::Enterprising,
        Self::Conventional,
    ];

    pub const fn code(self) -> char {
        match self {
            Self::Realistic => 'R',
            Self::Investigative => 'I',
            Self::Artistic => 'A',
            Self::Social => 'S',
            Self::Enterprising => 'E',
            Self::Conventional => 'C',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Realistic => "Réaliste",
            Self::Investigative => "Investigateur",
            Self::Artistic => "Artistique",
            Self::Social => "Social",
            Self::Enterprising => "Entreprenant",
            Self::Conventional => "Conventionnel",
        }
    }

    /// Position in [`Category::CANONICAL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Realistic => 0,
            Self::Investigative => 1,
            Self::Artistic => 2,
            Self::Social => 3,
            Self::Enterprising => 4,
            Self::Conventional => 5,
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'R' => Some(Self::Realistic),
            'I' => Some(Self::Investigative),
            'A' => Some(Self::Artistic),
            'S' => Some(Self::Social),
            'E' => Some(Self::Enterprising),
            'C' => Some(Self::Conventional),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Category {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                Self::from_code(code).ok_or_else(|| InvalidInput::UnknownCategory(value.to_string()))
            }
            _ => Err(InvalidInput::UnknownCategory(value.to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
