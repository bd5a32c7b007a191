use crate::commands::{run_roster, run_score, RosterArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scout_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scout AI",
    about = "Score candidate onboarding propensity and dropout risk, or run the scoring service",
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
    /// Score a single candidate profile read from a JSON file
    Score(ScoreArgs),
    /// Import a roster CSV and print the ranked candidates with their segments
    Roster(RosterArgs),
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
        Command::Score(args) => run_score(args),
        Command::Roster(args) => run_roster(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["scout-ai-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_model_override() {
        let cli = Cli::try_parse_from([
            "scout-ai-api",
            "score",
            "--input",
            "profile.json",
            "--model",
            "model.json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.input, PathBuf::from("profile.json"));
                assert_eq!(args.model, Some(PathBuf::from("model.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn roster_min_score_defaults_to_zero() {
        let cli = Cli::try_parse_from(["scout-ai-api", "roster", "--input", "roster.csv"])
            .expect("parses");

        match cli.command {
            Some(Command::Roster(args)) => assert_eq!(args.min_score, 0.0),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_port_must_be_numeric() {
        assert!(Cli::try_parse_from(["scout-ai-api", "serve", "--port", "web"]).is_err());
    }
}
