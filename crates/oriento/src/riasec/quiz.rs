use serde::{Deserialize, Serialize};

use super::scoring::{LIKERT_MAX, LIKERT_MIN, UNANSWERED};
use super::{
    score, InvalidInput, ProfileResolution, ProfileResolver, Question, QuestionBank, ScoreTable,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("quiz already completed; restart it to answer again")]
    AlreadyCompleted,
    #[error("answer must be a Likert value between 1 and 5, got {0}")]
    InvalidAnswer(u8),
    #[error(transparent)]
    Scoring(#[from] InvalidInput),
}

/// Scores and profiles produced when the last question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub scores: ScoreTable,
    pub resolution: ProfileResolution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Next(usize),
    Completed(QuizOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub current: usize,
    pub total: usize,
    pub percent: u8,
}

/// In-progress quiz: a cursor over the bank and one slot per question.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    resolver: ProfileResolver,
    answers: Vec<u8>,
    current: usize,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        Self::with_resolver(bank, ProfileResolver::default())
    }

    pub fn with_resolver(bank: QuestionBank, resolver: ProfileResolver) -> Self {
        let answers = vec![UNANSWERED; bank.len()];
        Self {
            bank,
            resolver,
            answers,
            current: 0,
            outcome: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.outcome.is_some() {
            return None;
        }
        self.bank.get(self.current)
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Records `value` for the current question and moves on. The last
    /// answer scores the whole quiz.
    pub fn answer(&mut self, value: u8) -> Result<QuizStep, QuizError> {
        if self.outcome.is_some() {
            return Err(QuizError::AlreadyCompleted);
        }
        if !(LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            return Err(QuizError::InvalidAnswer(value));
        }

        self.answers[self.current] = value;

        if self.current + 1 < self.bank.len() {
            self.current += 1;
            return Ok(QuizStep::Next(self.current));
        }

        let outcome = self.finish()?;
        Ok(QuizStep::Completed(outcome))
    }

    pub fn back(&mut self) {
        if self.outcome.is_none() {
            self.current = self.current.saturating_sub(1);
        }
    }

    pub fn restart(&mut self) {
        self.answers.fill(UNANSWERED);
        self.current = 0;
        self.outcome = None;
    }

    pub fn progress(&self) -> QuizProgress {
        let total = self.bank.len();
        let percent = if total == 0 {
            0
        } else {
            (((self.current + 1) as f64 / total as f64) * 100.0).round() as u8
        };
        QuizProgress {
            current: self.current,
            total,
            percent,
        }
    }

    fn finish(&mut self) -> Result<QuizOutcome, QuizError> {
        let scores = score(&self.answers, self.bank.questions())?;
        let resolution = self.resolver.resolve_scores(&scores);
        let outcome = QuizOutcome { scores, resolution };
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
