use crate::demo::{run_cite, run_demo, CiteArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use legal_analytics::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Legal Analytics",
    about = "Litigation analytics and Bluebook citation tools",
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
    /// Run every calculator against a sample matter and print the results
    Demo(DemoArgs),
    /// Parse, validate, or shorten a citation
    Cite {
        #[command(subcommand)]
        command: CiteCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum CiteCommand {
    /// Break a citation into its components
    Parse(CiteArgs),
    /// Check a citation for required tokens
    Validate(CiteArgs),
    /// Produce the short form used for subsequent references
    ShortForm(CiteArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Cite { command } => run_cite(command),
    }
}
