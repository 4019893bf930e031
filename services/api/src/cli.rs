use crate::demo::{run_protocol_export, ExportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use weg_protokoll::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WEG-Protokoll",
    about = "Run the meeting protocol export service or generate a protocol from the command line",
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
    /// Work with meeting protocols
    Protocol {
        #[command(subcommand)]
        command: ProtocolCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProtocolCommand {
    /// Export a protocol for the seeded demo meeting to disk
    Export(ExportArgs),
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
        Command::Protocol {
            command: ProtocolCommand::Export(args),
        } => run_protocol_export(args).await,
    }
}
