//! Command-line arguments.
//!
//! Only the first `--username=<value>` argument is honored. Everything else
//! is dropped before clap sees it, so unknown or malformed arguments never
//! abort startup.

use clap::Parser;

const USERNAME_PREFIX: &str = "--username=";

/// Flags clap handles itself.
const PASSTHROUGH: &[&str] = &["-h", "--help", "-V", "--version"];

#[derive(Debug, Parser)]
#[command(name = "filemgr", version, about = "Interactive command-line file manager")]
pub struct Cli {
    /// Name shown in the welcome and goodbye messages
    #[arg(long)]
    pub username: Option<String>,
}

impl Cli {
    /// Parse the process arguments.
    pub fn from_env() -> Self {
        let args = std::env::args_os().filter_map(|arg| arg.into_string().ok());
        Self::parse_from(select_args(args))
    }
}

/// Keep the program name, the first `--username=` argument and help/version
/// flags; drop everything else.
pub fn select_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut selected: Vec<String> = args.next().into_iter().collect();
    let mut username_seen = false;

    for arg in args {
        if arg.starts_with(USERNAME_PREFIX) {
            if !username_seen {
                username_seen = true;
                selected.push(arg);
            }
        } else if PASSTHROUGH.contains(&arg.as_str()) {
            selected.push(arg);
        }
    }
    selected
}
