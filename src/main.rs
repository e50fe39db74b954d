//! issuekit - create, fetch and update GitHub issues from the terminal.

use std::process::ExitCode;

use clap::Parser;

use issuekit::cli::{self, Cli};
use issuekit::logging;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let mut stdout = std::io::stdout();
    match cli::run(&cli, &mut stdout).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!("Command failed: {:?}", err);
            eprintln!("error: {}", err.user_message());
            if let Some(action) = err.suggested_action() {
                eprintln!("hint: {}", action);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
