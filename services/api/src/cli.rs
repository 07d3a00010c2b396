use crate::commands::{run_cutoffs, run_predict, CutoffsArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use merit_cutoff::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Merit Cutoff Predictor",
    about = "Derive post-wise cutoffs from a marks ledger and predict posts for a candidate",
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
    /// Print the post x category cutoff table, optionally with verdicts for a profile
    Cutoffs(CutoffsArgs),
    /// Rank a profile against the ledger and list the posts it clears
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: crate::commands::DataArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Cutoffs(args) => run_cutoffs(args),
        Command::Predict(args) => run_predict(args),
    }
}
