use crate::infra::{built_in_bank, parse_answers, parse_bank, AnswerList};
use clap::Args;
use oriento::config::AppConfig;
use oriento::error::{AppError, CatalogueError};
use oriento::explore::CareerCatalogue;
use oriento::riasec::{
    BankKind, InvalidInput, ProfileCatalogue, ProfileResolver, QuestionBank, QuizError,
    QuizOutcome, QuizSession, QuizStep, LIKERT_MAX, LIKERT_MIN,
};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct QuizArgs {
    /// Question bank to use (standard or short)
    #[arg(long, value_parser = parse_bank, default_value = "standard")]
    pub(crate) bank: BankKind,
    /// JSON question bank (`[{"prompt": ..., "category": "R"}, ...]`) used instead of a built-in one
    #[arg(long, value_name = "PATH", conflicts_with = "bank")]
    pub(crate) bank_file: Option<PathBuf>,
    /// Comma-separated Likert answers (1-5); skips the interactive prompts
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: Option<AnswerList>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let QuizArgs {
        bank,
        bank_file,
        answers,
        json,
    } = args;

    let config = AppConfig::load()?;
    let bank = load_bank(bank, bank_file.as_deref())?;
    let counts = bank.category_counts();
    let mut session = QuizSession::with_resolver(bank, ProfileResolver::new(config.scoring));

    let outcome = match answers {
        Some(AnswerList(answers)) => answer_all(&mut session, &answers)?,
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            match run_interactive(&mut session, stdin.lock(), stdout.lock())? {
                Some(outcome) => outcome,
                None => {
                    println!("Quiz interrompu.");
                    return Ok(());
                }
            }
        }
    };

    if json {
        let catalogue = ProfileCatalogue::french();
        let payload = json!({
            "scores": outcome.scores,
            "normalized": outcome.scores.normalized(&counts),
            "resolution": outcome.resolution,
            "view": catalogue.present(&outcome.resolution),
        });
        let rendered = serde_json::to_string_pretty(&payload).map_err(CatalogueError::from)?;
        println!("{}", rendered);
    } else {
        render_outcome(&outcome, session.bank());
    }
    Ok(())
}

fn load_bank(kind: BankKind, file: Option<&Path>) -> Result<QuestionBank, AppError> {
    match file {
        Some(path) => Ok(QuestionBank::from_path(path)?),
        None => built_in_bank(kind),
    }
}

fn answer_all(session: &mut QuizSession, answers: &[u8]) -> Result<QuizOutcome, AppError> {
    let mismatch = InvalidInput::LengthMismatch {
        answers: answers.len(),
        questions: session.bank().len(),
    };
    if answers.len() != session.bank().len() {
        return Err(mismatch.into());
    }
    for value in answers {
        if let QuizStep::Completed(outcome) = session.answer(*value)? {
            return Ok(outcome);
        }
    }
    Err(mismatch.into())
}

/// Prompts one question at a time. `b` goes back, `q` stops without a
/// result.
fn run_interactive<R: BufRead, W: Write>(
    session: &mut QuizSession,
    mut input: R,
    mut output: W,
) -> Result<Option<QuizOutcome>, AppError> {
    writeln!(
        output,
        "Réponds de {} (pas du tout d'accord) à {} (tout à fait d'accord). `b` pour revenir, `q` pour quitter.",
        LIKERT_MIN, LIKERT_MAX
    )?;

    loop {
        let Some(question) = session.current_question() else {
            return Ok(session.outcome().cloned());
        };
        let progress = session.progress();
        write!(
            output,
            "\n[{}/{} - {}%] {}\n> ",
            progress.current + 1,
            progress.total,
            progress.percent,
            question.prompt
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim() {
            "q" => return Ok(None),
            "b" => session.back(),
            raw => match raw.parse::<u8>() {
                Ok(value) => match session.answer(value) {
                    Ok(QuizStep::Completed(outcome)) => return Ok(Some(outcome)),
                    Ok(QuizStep::Next(_)) => {}
                    Err(err) => writeln!(output, "{}", describe_quiz_error(&err))?,
                },
                Err(_) => writeln!(
                    output,
                    "Entre un nombre entre {} et {}.",
                    LIKERT_MIN, LIKERT_MAX
                )?,
            },
        }
    }
}

fn describe_quiz_error(err: &QuizError) -> String {
    match err {
        QuizError::AlreadyCompleted => {
            "Le quiz est déjà terminé. Recommence-le pour répondre à nouveau.".to_string()
        }
        QuizError::InvalidAnswer(value) => format!(
            "{} n'est pas une réponse valide : choisis entre {} et {}.",
            value, LIKERT_MIN, LIKERT_MAX
        ),
        QuizError::Scoring(err) => format!("Impossible de calculer tes scores ({}).", err),
    }
}

fn render_outcome(outcome: &QuizOutcome, bank: &QuestionBank) {
    let catalogue = ProfileCatalogue::french();
    let resolution = &outcome.resolution;

    println!("\nTon profil RIASEC : {}", resolution.summary_code());
    println!("Scores :");
    for entry in outcome.scores.normalized(&bank.category_counts()) {
        println!(
            "  - {} {:<14} {:>3}/{:<3} ({}%)",
            entry.category,
            entry.category.label(),
            entry.total,
            entry.max,
            entry.percent
        );
    }

    let view = catalogue.present(resolution);
    println!("\nProfil{} principal :", if view.main.len() > 1 { "s" } else { "" });
    for card in &view.main {
        println!("  {} - {} : {}", card.code, card.profile.name, card.profile.description);
        println!("    Traits : {}", card.profile.traits.join(", "));
    }
    if !view.secondary.is_empty() {
        println!("Profils secondaires :");
        for card in &view.secondary {
            println!("  {} - {}", card.code, card.profile.name);
        }
    }
    if !view.near_tied.is_empty() {
        let codes: Vec<String> = view.near_tied.iter().map(|card| card.code.to_string()).collect();
        println!("À égalité ou presque avec ton profil principal : {}", codes.join(", "));
    }

    let careers = CareerCatalogue::standard();
    let recommended = careers.recommend(resolution);
    if !recommended.is_empty() {
        println!("\nMétiers à explorer :");
        for career in recommended.iter().take(5) {
            println!("  - {} ({}, {})", career.title, career.sector, career.education);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oriento::riasec::Category;

    #[test]
    fn interactive_session_supports_going_back() {
        let mut session = QuizSession::new(QuestionBank::short());
        // first answer is corrected after going back; "x" and "7" are rejected
        let mut script = String::from("1\nb\n5\nx\n7\n");
        for _ in 1..18 {
            script.push_str("2\n");
        }
        let mut output = Vec::new();

        let outcome = run_interactive(&mut session, script.as_bytes(), &mut output)
            .expect("io succeeds")
            .expect("quiz completes");

        assert_eq!(outcome.scores.get(Category::Realistic), 5 + 2 + 2);
        assert_eq!(outcome.resolution.main_codes, vec![Category::Realistic]);
        let transcript = String::from_utf8(output).expect("utf8 output");
        assert!(transcript.contains("[1/18 - 6%]"));
        assert!(transcript.contains("Entre un nombre"));
        assert!(transcript.contains("7 n'est pas une réponse valide : choisis entre 1 et 5."));
        assert!(!transcript.contains("Likert"));
    }

    #[test]
    fn quiz_errors_are_described_in_french() {
        assert_eq!(
            describe_quiz_error(&QuizError::AlreadyCompleted),
            "Le quiz est déjà terminé. Recommence-le pour répondre à nouveau."
        );
        assert!(describe_quiz_error(&QuizError::InvalidAnswer(0)).starts_with("0 n'est pas"));
    }

    #[test]
    fn bank_file_replaces_the_built_in_bank() {
        assert_eq!(
            load_bank(BankKind::Short, None).expect("built-in bank").len(),
            18
        );

        let missing = Path::new("/nonexistent/oriento/bank.json");
        let error = load_bank(BankKind::Standard, Some(missing)).expect_err("missing file");
        assert!(matches!(
            error,
            AppError::Catalogue(CatalogueError::Read { ref path, .. }) if path == missing
        ));
    }

    #[test]
    fn quitting_yields_no_outcome() {
        let mut session = QuizSession::new(QuestionBank::short());
        let outcome = run_interactive(&mut session, "3\nq\n".as_bytes(), Vec::new())
            .expect("io succeeds");
        assert!(outcome.is_none());
        assert_eq!(session.answers()[0], 3);
    }

    #[test]
    fn scripted_answers_must_cover_the_bank() {
        let mut session = QuizSession::new(QuestionBank::short());
        assert!(matches!(
            answer_all(&mut session, &[3, 3]),
            Err(AppError::Input(_))
        ));

        let outcome = answer_all(&mut session, &[4; 18]).expect("quiz completes");
        assert_eq!(outcome.resolution.main_codes.len(), 6);
    }
}
