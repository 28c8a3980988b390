use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::{Formation, FormationLinks, DEFAULT_DOMAIN};

const DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

pub(crate) fn parse_formations<R: Read>(mut reader: R) -> Result<Vec<Formation>, csv::Error> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let delimiter = detect_delimiter(raw.lines().next().unwrap_or_default());

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());
    let mut formations = Vec::new();

    for (index, record) in csv_reader.deserialize::<CartographyRow>().enumerate() {
        let row = record?;
        formations.push(row.into_formation(index));
    }

    Ok(formations)
}

/// Export files come either comma or semicolon separated; the header line
/// decides.
fn detect_delimiter(header: &str) -> u8 {
    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|delimiter| header.bytes().filter(|byte| byte == delimiter).count())
        .filter(|delimiter| header.as_bytes().contains(delimiter))
        .unwrap_or(b',')
}

#[derive(Debug, Deserialize)]
struct CartographyRow {
    #[serde(
        rename = "Code interne Parcoursup de la formation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    code: Option<String>,
    #[serde(
        rename = "Nom long de la formation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    long_name: Option<String>,
    #[serde(
        rename = "Nom court de la formation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    short_name: Option<String>,
    #[serde(
        rename = "Informations complémentaires",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    details: Option<String>,
    #[serde(rename = "Domaine", default, deserialize_with = "empty_string_as_none")]
    domain: Option<String>,
    #[serde(
        rename = "Nom de l'établissement",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    etablissement: Option<String>,
    #[serde(
        rename = "Types de formation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    kind: Option<String>,
    #[serde(
        rename = "Lien vers la fiche formation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    fiche_formation: Option<String>,
    #[serde(
        rename = "Lien vers les données statistiques pour l'année antérieure",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    statistiques: Option<String>,
    #[serde(
        rename = "Site internet de l'établissement",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    site: Option<String>,
    #[serde(
        rename = "Localisation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    location: Option<String>,
}

impl CartographyRow {
    fn into_formation(self, index: usize) -> Formation {
        let title = self
            .long_name
            .or(self.short_name)
            .unwrap_or_else(|| format!("Formation {}", index));
        let kind = self.kind.unwrap_or_default();

        Formation {
            id: self.code.unwrap_or_else(|| index.to_string()),
            title,
            description: self.details.unwrap_or_default(),
            domain: self.domain.unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            etablissement: self.etablissement.unwrap_or_default(),
            education: vec![kind.clone()],
            kind,
            skills: Vec::new(),
            qualities: Vec::new(),
            links: FormationLinks {
                fiche_formation: self.fiche_formation.unwrap_or_default(),
                statistiques: self.statistiques.unwrap_or_default(),
                site: self.site.unwrap_or_default(),
            },
            location: self.location.unwrap_or_default(),
            image: String::new(),
            stats: None,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
