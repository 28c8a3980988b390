use crate::formations::{run_import, run_merge, ImportArgs, MergeArgs};
use crate::quiz::{run_quiz, QuizArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use oriento::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Oriento",
    about = "Score RIASEC quizzes and serve orientation catalogues from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Take the RIASEC quiz in the terminal
    Quiz(QuizArgs),
    /// Convert and enrich Parcoursup formation data
    Formations {
        #[command(subcommand)]
        command: FormationsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FormationsCommand {
    /// Convert the cartography CSV export into formations JSON
    Import(ImportArgs),
    /// Keep formations with statistics and attach them
    Merge(MergeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz(args) => run_quiz(args),
        Command::Formations {
            command: FormationsCommand::Import(args),
        } => run_import(args),
        Command::Formations {
            command: FormationsCommand::Merge(args),
        } => run_merge(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::AnswerList;
    use oriento::riasec::BankKind;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["oriento-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_scripted_quiz() {
        let cli = Cli::try_parse_from([
            "oriento-api",
            "quiz",
            "--bank",
            "short",
            "--answers",
            "5,4,3",
            "--json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Quiz(args)) => {
                assert_eq!(args.bank, BankKind::Short);
                assert!(args.bank_file.is_none());
                assert_eq!(args.answers, Some(AnswerList(vec![5, 4, 3])));
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_quiz_bank_file() {
        let cli = Cli::try_parse_from(["oriento-api", "quiz", "--bank-file", "data/bank.json"])
            .expect("parses");
        match cli.command {
            Some(Command::Quiz(args)) => {
                assert_eq!(
                    args.bank_file.as_deref(),
                    Some(std::path::Path::new("data/bank.json"))
                );
                assert_eq!(args.bank, BankKind::Standard);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from([
            "oriento-api",
            "quiz",
            "--bank",
            "short",
            "--bank-file",
            "data/bank.json"
        ])
        .is_err());
    }

    #[test]
    fn rejects_unknown_banks() {
        assert!(Cli::try_parse_from(["oriento-api", "quiz", "--bank", "long"]).is_err());
    }
}
