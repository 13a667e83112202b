use crate::demo::{run_demo, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use receipt_points::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "receipt-points",
    about = "Score purchase receipts and serve the points over HTTP",
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
    /// Validate and score a receipt JSON file without starting the server
    Score(ScoreArgs),
    /// Score the reference receipts through an in-memory service
    Demo,
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
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["receipt-points"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_host_and_port_overrides() {
        let cli = Cli::try_parse_from([
            "receipt-points",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn score_takes_a_path() {
        let cli = Cli::try_parse_from(["receipt-points", "score", "receipt.json"]).expect("parses");
        match cli.command {
            Some(Command::Score(args)) => assert_eq!(args.path.to_str(), Some("receipt.json")),
            other => panic!("expected score, got {other:?}"),
        }
    }

    #[test]
    fn port_must_fit_u16() {
        assert!(Cli::try_parse_from(["receipt-points", "serve", "--port", "70000"]).is_err());
    }
}
