use crate::demo::{run_assess, run_demo, run_extract, AssessArgs, DemoArgs, ExtractArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lendvista::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "LendVista",
    about = "Score loan applicants, extract document fields and price offers from the command line",
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
    /// Score an assessment request read from a JSON file
    Assess(AssessArgs),
    /// Extract structured fields from a decoded document text file
    Extract(ExtractArgs),
    /// Run two built-in applicants through the full assessment
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
        Command::Assess(args) => run_assess(args).await,
        Command::Extract(args) => run_extract(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
