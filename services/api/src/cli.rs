use crate::demo::{run_demo, run_triage, DemoArgs, TriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mindline::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Mindline Assessment Service",
    about = "Run and demonstrate the Mindline assessment backend from the command line",
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
    /// Scan one message and print the trigger-gate decisions
    Triage(TriageArgs),
    /// Run an end-to-end CLI demo covering triage, scoring, and summaries
    Demo(DemoArgs),
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
        Command::Triage(args) => run_triage(args),
        Command::Demo(args) => run_demo(args),
    }
}
