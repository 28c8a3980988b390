//! RIASEC personality scoring: Likert answers in, ranked profiles out.
//!
//! [`score`] and [`ProfileResolver`] are pure; the quiz cursor lives in
//! [`QuizSession`] and display content in [`ProfileCatalogue`].

mod catalogue;
mod category;
mod error;
mod questions;
mod quiz;
mod resolution;
mod scoring;

pub use catalogue::{ProfileCard, ProfileCatalogue, ProfileDescription, ResultsView};
pub use category::Category;
pub use error::InvalidInput;
pub use questions::{BankKind, Categorized, Question, QuestionBank, MIN_QUESTIONS};
pub use quiz::{QuizError, QuizOutcome, QuizProgress, QuizSession, QuizStep};
pub use resolution::{
    resolve_profile, ProfileInput, ProfileResolution, ProfileResolver, ResolutionMode,
    ResolutionPolicy,
};
pub use scoring::{score, CategoryScore, ScoreTable, LIKERT_MAX, LIKERT_MIN, UNANSWERED};
