use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use super::{Category, InvalidInput};
use crate::error::{open_data_file, CatalogueError};

/// Smallest bank accepted: one slot per category.
pub const MIN_QUESTIONS: usize = 6;

/// Anything that can stand in for a question when scoring.
pub trait Categorized {
    fn category(&self) -> Category;
}

impl Categorized for Category {
    fn category(&self) -> Category {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub category: Category,
}

impl Categorized for Question {
    fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankKind {
    #[default]
    Standard,
    Short,
    Custom,
}

impl BankKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Short => "short",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    kind: BankKind,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// The 35-question bank shown by the mobile quiz.
    pub fn standard() -> Self {
        Self {
            kind: BankKind::Standard,
            questions: built_in(STANDARD_PROMPTS.len()),
        }
    }

    /// The 18-question variant: three prompts per category.
    pub fn short() -> Self {
        Self {
            kind: BankKind::Short,
            questions: built_in(18),
        }
    }

    pub fn built_in(kind: BankKind) -> Option<Self> {
        match kind {
            BankKind::Standard => Some(Self::standard()),
            BankKind::Short => Some(Self::short()),
            BankKind::Custom => None,
        }
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self, InvalidInput> {
        if questions.len() < MIN_QUESTIONS {
            return Err(InvalidInput::BankTooSmall {
                minimum: MIN_QUESTIONS,
                actual: questions.len(),
            });
        }
        Ok(Self {
            kind: BankKind::Custom,
            questions,
        })
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Ok(Self::from_questions(questions)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let reader = open_data_file(path.as_ref())?;
        Self::from_json_reader(reader)
    }

    pub fn kind(&self) -> BankKind {
        self.kind
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions per category, in canonical order.
    pub fn category_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for question in &self.questions {
            counts[question.category.index()] += 1;
        }
        counts
    }
}

fn built_in(len: usize) -> Vec<Question> {
    STANDARD_PROMPTS
        .iter()
        .take(len)
        .enumerate()
        .map(|(position, prompt)| Question {
            prompt: (*prompt).to_string(),
            category: Category::CANONICAL[position % Category::CANONICAL.len()],
        })
        .collect()
}

// Prompts cycle through R, I, A, S, E, C.
const STANDARD_PROMPTS: [&str; 35] = [
    "J'aime comprendre comment les objets ou les systèmes fonctionnent concrètement.",
    "J'apprécie d'analyser des problèmes complexes pour en trouver la cause.",
    "Je prends plaisir à créer quelque chose de nouveau (texte, image, musique, idée originale).",
    "J'aime être en contact direct avec les gens et échanger avec eux.",
    "Je me sens à l'aise pour prendre des décisions qui engagent d'autres personnes.",
    "J'aime quand les procédures sont claires et bien organisées.",
    "Je préfère les activités où je peux utiliser mes mains ou mon corps (bricoler, manipuler, installer, réparer).",
    "Je suis attiré(e) par la recherche d'informations, la curiosité scientifique ou l'observation minutieuse.",
    "Je cherche souvent des façons originales ou non conventionnelles de faire les choses.",
    "J'aime écouter les autres parler de leurs difficultés et essayer de les comprendre.",
    "Je me projette facilement dans des projets ambitieux ou des objectifs à atteindre.",
    "J'apprécie de tenir mes documents, dossiers ou fichiers bien classés.",
    "Je me sens à l'aise dans des environnements concrets, pratiques, voire physiques.",
    "J'aime résoudre des énigmes, des problèmes logiques ou des questions abstraites.",
    "Je suis sensible à l'esthétique (formes, couleurs, ambiance, mise en scène).",
    "Je suis prêt(e) à consacrer du temps pour aider quelqu'un à progresser ou à apprendre.",
    "Prendre la parole pour défendre une idée ou convaincre ne me dérange pas.",
    "Je trouve rassurant de suivre des règles, des normes ou des consignes établies.",
    "J'aime travailler dehors ou dans des lieux où l'on bouge plutôt que rester assis longtemps.",
    "J'aime chercher des explications rationnelles aux phénomènes que j'observe.",
    "Je me sens bien quand je peux exprimer ma personnalité à travers ce que je produis.",
    "Je suis souvent la personne vers qui les autres se tournent pour demander conseil ou soutien.",
    "J'aime prendre des initiatives et lancer de nouveaux projets ou activités.",
    "Je suis attentif(ve) aux détails lorsqu'il s'agit de remplir des formulaires, tableaux ou documents.",
    "Je préfère que le résultat de mon travail soit visible et tangible.",
    "Je prends plaisir à lire, chercher ou croiser des informations pour mieux comprendre un sujet.",
    "Je tolère bien l'ambiguïté et les situations où il n'y a pas une seule bonne réponse.",
    "Je me sens utile quand je contribue au bien-être ou à la réussite d'autres personnes.",
    "La compétition ou le fait de « se dépasser » m'attire.",
    "J'aime quand mon environnement de travail est structuré, prévisible et planifié.",
    "Je me vois bien dans un métier où l'on manipule des outils, des matériaux ou des équipements.",
    "Je me vois bien dans un métier où l'on observe, analyse, étudie ou diagnostique.",
    "Je me vois bien dans un métier où la créativité et l'expression personnelle ont une grande place.",
    "Je me vois bien dans un métier où l'on accompagne, forme ou soutient des personnes.",
    "Je me vois bien dans un métier où l'on dirige des projets, des équipes ou des activités économiques.",
];
