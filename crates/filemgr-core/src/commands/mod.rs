//! Command parsing and execution.
//!
//! This module provides:
//! - `Command` enum for parsed file manager commands
//! - `CommandResult` telling the session whether to keep reading
//! - `execute_command` mapping each command to its handler
//!
//! # Architecture
//!
//! Input lines are split by [`crate::parser`], turned into a `Command` by
//! [`Command::parse`], then run by `execute_command` against a
//! [`crate::Session`]. Arguments are not checked for arity while parsing;
//! a missing operand surfaces as a handler error when the command runs.

mod execute;
mod result;

pub use execute::execute_command;
pub use result::CommandResult;

use crate::parser::ParsedCommand;

// =============================================================================
// Path Argument Type
// =============================================================================

/// A path argument passed to a command (e.g., `cd docs`, `cat notes.txt`).
///
/// Stored exactly as typed. Resolution against the working directory
/// happens when the command runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArg(String);

impl PathArg {
    /// Create a new path argument from a string.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for PathArg {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// OS Queries
// =============================================================================

/// Information requested with `os --<flag>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsQuery {
    Eol,
    Cpus,
    HomeDir,
    Username,
    Architecture,
}

impl OsQuery {
    /// Parse an `os` flag. Flags are case-sensitive.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--EOL" => Some(Self::Eol),
            "--cpus" => Some(Self::Cpus),
            "--homedir" => Some(Self::HomeDir),
            "--username" => Some(Self::Username),
            "--architecture" => Some(Self::Architecture),
            _ => None,
        }
    }
}

// =============================================================================
// Command Enum
// =============================================================================

/// Parsed file manager command
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Move to the parent of the working directory.
    Up,
    Cd(Option<PathArg>),
    Ls,
    Cat(Option<PathArg>),
    /// Create an empty file.
    Add(Option<PathArg>),
    /// Rename or move with a single filesystem rename.
    Rn {
        src: Option<PathArg>,
        dst: Option<PathArg>,
    },
    Cp {
        src: Option<PathArg>,
        dst: Option<PathArg>,
    },
    /// Copy into `dest_dir` under the same base name, then delete the source.
    Mv {
        src: Option<PathArg>,
        dest_dir: Option<PathArg>,
    },
    Rm(Option<PathArg>),
    /// `None` for a missing or unrecognized flag, which prints nothing.
    Os(Option<OsQuery>),
    Hash(Option<PathArg>),
    Compress {
        src: Option<PathArg>,
        dst: Option<PathArg>,
    },
    Decompress {
        src: Option<PathArg>,
        dst: Option<PathArg>,
    },
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse command from name and arguments.
    ///
    /// Names are case-sensitive. Surplus arguments are ignored.
    pub fn parse(name: &str, args: &[String]) -> Self {
        let path = |idx: usize| args.get(idx).map(|a| PathArg::new(a.as_str()));

        match name {
            "up" => Self::Up,
            "cd" => Self::Cd(path(0)),
            "ls" => Self::Ls,
            "cat" => Self::Cat(path(0)),
            "add" => Self::Add(path(0)),
            "rn" => Self::Rn {
                src: path(0),
                dst: path(1),
            },
            "cp" => Self::Cp {
                src: path(0),
                dst: path(1),
            },
            "mv" => Self::Mv {
                src: path(0),
                dest_dir: path(1),
            },
            "rm" => Self::Rm(path(0)),
            "os" => Self::Os(args.first().and_then(|flag| OsQuery::from_flag(flag))),
            "hash" => Self::Hash(path(0)),
            "compress" => Self::Compress {
                src: path(0),
                dst: path(1),
            },
            "decompress" => Self::Decompress {
                src: path(0),
                dst: path(1),
            },
            ".exit" => Self::Exit,
            _ => Self::Unknown(name.to_string()),
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::Up => "up",
            Self::Cd(_) => "cd",
            Self::Ls => "ls",
            Self::Cat(_) => "cat",
            Self::Add(_) => "add",
            Self::Rn { .. } => "rn",
            Self::Cp { .. } => "cp",
            Self::Mv { .. } => "mv",
            Self::Rm(_) => "rm",
            Self::Os(_) => "os",
            Self::Hash(_) => "hash",
            Self::Compress { .. } => "compress",
            Self::Decompress { .. } => "decompress",
            Self::Exit => ".exit",
            Self::Unknown(name) => name,
        }
    }
}

impl From<&ParsedCommand> for Command {
    fn from(parsed: &ParsedCommand) -> Self {
        Self::parse(&parsed.name, &parsed.args)
    }
}

// =============================================================================
// Tests
// =============================================================================
