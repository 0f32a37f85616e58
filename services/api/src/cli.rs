use crate::report::{run_fleet_export, run_fleet_report, FleetExportArgs, FleetReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use equipment_care::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Equipment Care",
    about = "Run the equipment maintenance service or inspect a synthetic fleet from the command line",
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
    /// Inspect or export a generated equipment fleet
    Fleet {
        #[command(subcommand)]
        command: FleetCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FleetCommand {
    /// Print health, upcoming service, and alerts for a generated fleet
    Report(FleetReportArgs),
    /// Write the generated fleet as CSV to stdout or a file
    Export(FleetExportArgs),
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
        Command::Fleet {
            command: FleetCommand::Report(args),
        } => run_fleet_report(args),
        Command::Fleet {
            command: FleetCommand::Export(args),
        } => run_fleet_export(args),
    }
}
