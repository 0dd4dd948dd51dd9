//! Core of the interactive file manager.
//!
//! This crate provides:
//! - [`Session`] state and the [`run_session`] read-dispatch-report loop
//! - [`parse_line`] and [`Command`] parsing
//! - [`execute_command`] with one handler per command
//! - [`transfer`] streaming copy, hashing and brotli codec

mod commands;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod osinfo;
pub mod parser;
mod session;
pub mod transfer;

pub use commands::{Command, CommandResult, OsQuery, PathArg, execute_command};
pub use error::CommandError;
pub use parser::{ParsedCommand, parse_line};
pub use session::{Session, SessionEnd, dispatch_line, run_session};
