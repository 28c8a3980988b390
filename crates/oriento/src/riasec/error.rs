use super::Category;

/// Malformed input handed to the scoring core. Never transient: the caller has
/// to fix the data before trying again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("expected {questions} answers, got {answers}")]
    LengthMismatch { answers: usize, questions: usize },
    #[error("answer {index} is {value}, expected a Likert value between 1 and 5")]
    AnswerOutOfRange { index: usize, value: u8 },
    #[error("unknown RIASEC category '{0}'")]
    UnknownCategory(String),
    #[error("score table is missing category {0}")]
    MissingCategory(Category),
    #[error("score for {code} must be a non-negative integer, got {value}")]
    InvalidScore { code: String, value: String },
    #[error("category {0} appears more than once in the ranked list")]
    DuplicateCategory(Category),
    #[error("ranked list must contain at least one category")]
    EmptyRanking,
    #[error("question bank needs at least {minimum} questions, got {actual}")]
    BankTooSmall { minimum: usize, actual: usize },
}
