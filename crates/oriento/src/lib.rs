//! Career-orientation toolkit for high-school students: RIASEC quiz scoring
//! and profile resolution, career and formation catalogues, and a
//! rule-based assistant.

pub mod assistant;
pub mod config;
pub mod error;
pub mod explore;
pub mod riasec;
pub mod student;
pub mod telemetry;
