mod cli;

use std::io;

use anyhow::Context;
use filemgr_core::{Session, run_session};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FILEMGR_LOG";

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::from_env();
    let home = dirs::home_dir().context("could not determine the home directory")?;
    let mut session = Session::new(home, cli.username);

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let end = run_session(&mut session, stdin, &mut stdout).context("terminal I/O failed")?;

    tracing::debug!(?end, "exiting");
    Ok(())
}

/// Log to stderr; stdout carries command output, including raw `cat` bytes.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
