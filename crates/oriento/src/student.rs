//! The student's onboarding profile, latest quiz result and bookmarks.

use serde::{Deserialize, Serialize};

use crate::riasec::{ProfileResolution, QuizOutcome, ScoreTable};

pub const MIN_AGE: u8 = 14;
pub const MAX_AGE: u8 = 18;
pub const GRADES: [&str; 3] = ["Seconde", "Première", "Terminale"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("age must be between {min} and {max}, got {actual}")]
    AgeOutOfRange { min: u8, max: u8, actual: u8 },
    #[error("unknown grade '{0}'")]
    UnknownGrade(String),
    #[error("choose at least one specialty")]
    NoSpecialty,
    #[error("choose at least one interest")]
    NoInterest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bookmark {
    Added,
    Removed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    pub age: Option<u8>,
    pub grade: Option<String>,
    pub specialties: Vec<String>,
    pub interests: Vec<String>,
    pub riasec: Option<ProfileResolution>,
    pub scores: Option<ScoreTable>,
    pub favorite_jobs: Vec<String>,
    pub saved_formations: Vec<String>,
}

impl StudentProfile {
    /// Applies the onboarding rules, stopping at the first failing step.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let age = self.age.unwrap_or_default();
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange {
                min: MIN_AGE,
                max: MAX_AGE,
                actual: age,
            });
        }

        match self.grade.as_deref() {
            Some(grade) if GRADES.contains(&grade) => {}
            other => {
                let grade = other.unwrap_or_default().to_string();
                return Err(ProfileError::UnknownGrade(grade));
            }
        }

        if self.specialties.is_empty() {
            return Err(ProfileError::NoSpecialty);
        }
        if self.interests.is_empty() {
            return Err(ProfileError::NoInterest);
        }
        Ok(())
    }

    pub fn has_completed_quiz(&self) -> bool {
        self.riasec
            .as_ref()
            .map(|resolution| !resolution.main_codes.is_empty())
            .unwrap_or(false)
    }

    /// Replaces any earlier quiz result.
    pub fn record_quiz(&mut self, outcome: &QuizOutcome) {
        self.scores = Some(outcome.scores);
        self.riasec = Some(outcome.resolution.clone());
    }

    pub fn clear_quiz(&mut self) {
        self.scores = None;
        self.riasec = None;
    }

    pub fn toggle_favorite_job(&mut self, job_id: &str) -> Bookmark {
        toggle(&mut self.favorite_jobs, job_id)
    }

    pub fn toggle_saved_formation(&mut self, formation_id: &str) -> Bookmark {
        toggle(&mut self.saved_formations, formation_id)
    }

    pub fn is_favorite_job(&self, job_id: &str) -> bool {
        self.favorite_jobs.iter().any(|id| id == job_id)
    }

    pub fn is_saved_formation(&self, formation_id: &str) -> bool {
        self.saved_formations.iter().any(|id| id == formation_id)
    }
}

fn toggle(ids: &mut Vec<String>, id: &str) -> Bookmark {
    if let Some(position) = ids.iter().position(|existing| existing == id) {
        ids.remove(position);
        Bookmark::Removed
    } else {
        ids.push(id.to_string());
        Bookmark::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riasec::{QuestionBank, QuizOutcome, QuizSession, QuizStep};

    fn onboarded() -> StudentProfile {
        StudentProfile {
            age: Some(16),
            grade: Some("Première".to_string()),
            specialties: vec!["NSI".to_string()],
            interests: vec!["tech".to_string()],
            ..StudentProfile::default()
        }
    }

    #[test]
    fn validates_onboarding_steps_in_order() {
        assert_eq!(onboarded().validate(), Ok(()));

        let mut profile = onboarded();
        profile.age = Some(19);
        assert_eq!(
            profile.validate(),
            Err(ProfileError::AgeOutOfRange {
                min: 14,
                max: 18,
                actual: 19
            })
        );

        let mut profile = onboarded();
        profile.grade = Some("CM2".to_string());
        assert_eq!(
            profile.validate(),
            Err(ProfileError::UnknownGrade("CM2".to_string()))
        );

        let mut profile = onboarded();
        profile.grade = None;
        assert_eq!(
            profile.validate(),
            Err(ProfileError::UnknownGrade(String::new()))
        );

        let mut profile = onboarded();
        profile.specialties.clear();
        assert_eq!(profile.validate(), Err(ProfileError::NoSpecialty));

        let mut profile = onboarded();
        profile.interests.clear();
        assert_eq!(profile.validate(), Err(ProfileError::NoInterest));
    }

    #[test]
    fn toggles_bookmarks() {
        let mut profile = onboarded();
        assert_eq!(profile.toggle_favorite_job("medecin"), Bookmark::Added);
        assert_eq!(profile.toggle_favorite_job("prof"), Bookmark::Added);
        assert!(profile.is_favorite_job("medecin"));
        assert_eq!(profile.toggle_favorite_job("medecin"), Bookmark::Removed);
        assert_eq!(profile.favorite_jobs, vec!["prof".to_string()]);

        assert_eq!(profile.toggle_saved_formation("7890"), Bookmark::Added);
        assert!(profile.is_saved_formation("7890"));
        assert!(!profile.is_favorite_job("7890"));
    }

    fn complete_short_quiz(session: &mut QuizSession, value: u8) -> QuizOutcome {
        session.restart();
        for _ in 1..session.bank().len() {
            session.answer(value).expect("answer accepted");
        }
        match session.answer(value).expect("last answer accepted") {
            QuizStep::Completed(outcome) => outcome,
            other => panic!("quiz should complete, got {other:?}"),
        }
    }

    #[test]
    fn recording_a_quiz_replaces_the_previous_result() {
        let mut profile = onboarded();
        assert!(!profile.has_completed_quiz());

        let mut session = QuizSession::new(QuestionBank::short());
        let first = complete_short_quiz(&mut session, 2);
        profile.record_quiz(&first);
        assert!(profile.has_completed_quiz());
        assert_eq!(profile.scores.map(|scores| scores.total()), Some(36));

        let second = complete_short_quiz(&mut session, 5);
        profile.record_quiz(&second);
        assert_eq!(profile.scores.map(|scores| scores.total()), Some(90));

        profile.clear_quiz();
        assert!(!profile.has_completed_quiz());
    }

    #[test]
    fn deserializes_partial_profiles() {
        let profile: StudentProfile =
            serde_json::from_str(r#"{"specialties": ["SVT"], "favorite_jobs": ["medecin"]}"#)
                .expect("partial profile parses");
        assert_eq!(profile.age, None);
        assert_eq!(profile.specialties, vec!["SVT".to_string()]);
        assert!(profile.is_favorite_job("medecin"));
    }
}
