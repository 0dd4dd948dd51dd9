//! Command execution logic.
//!
//! Contains the `execute_command` function that runs parsed commands
//! against the real filesystem. Each command has its own handler so it can
//! be exercised in isolation.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use crate::config::INVALID_INPUT;
use crate::error::CommandError;
use crate::filesystem::list_dir;
use crate::session::Session;
use crate::{osinfo, transfer};

use super::{Command, CommandResult, OsQuery, PathArg};

type Result<T> = std::result::Result<T, CommandError>;

/// Execute a parsed command.
///
/// Output goes straight to `out`. Navigation is applied to `session`.
/// Any error leaves the session where it was, although filesystem side
/// effects performed before the failure are not rolled back.
pub fn execute_command<W: Write + ?Sized>(
    cmd: Command,
    session: &mut Session,
    out: &mut W,
) -> Result<CommandResult> {
    match cmd {
        Command::Up => execute_up(session),
        Command::Cd(path) => execute_cd(path, session)?,
        Command::Ls => execute_ls(session, out)?,
        Command::Cat(path) => execute_cat(path, session, out)?,
        Command::Add(path) => execute_add(path, session)?,
        Command::Rn { src, dst } => execute_rn(src, dst, session)?,
        Command::Cp { src, dst } => execute_cp(src, dst, session)?,
        Command::Mv { src, dest_dir } => execute_mv(src, dest_dir, session)?,
        Command::Rm(path) => execute_rm(path, session)?,
        Command::Os(query) => execute_os(query, session, out)?,
        Command::Hash(path) => execute_hash(path, session, out)?,
        Command::Compress { src, dst } => execute_compress(src, dst, session)?,
        Command::Decompress { src, dst } => execute_decompress(src, dst, session)?,
        Command::Exit => return Ok(CommandResult::Exit),
        Command::Unknown(_) => emit(out, INVALID_INPUT)?,
    }
    Ok(CommandResult::Continue)
}

/// Write one line of command output.
fn emit<W: Write + ?Sized>(out: &mut W, line: impl Display) -> Result<()> {
    writeln!(out, "{}", line).map_err(CommandError::io("write", "<output>"))
}

/// Resolve a required operand against the working directory.
fn operand(
    session: &Session,
    arg: Option<PathArg>,
    command: &'static str,
    operand: &'static str,
) -> Result<PathBuf> {
    arg.map(|p| session.resolve(p.as_str()))
        .ok_or(CommandError::MissingOperand { command, operand })
}

/// Execute `up` command.
fn execute_up(session: &mut Session) {
    if session.go_up() {
        info!(cwd = %session.cwd().display(), "moved up");
    }
}

/// Execute `cd` command.
fn execute_cd(path: Option<PathArg>, session: &mut Session) -> Result<()> {
    let target = operand(session, path, "cd", "directory")?;
    if session.change_dir(target)? {
        info!(cwd = %session.cwd().display(), "changed directory");
    }
    Ok(())
}

/// Execute `ls` command.
fn execute_ls<W: Write + ?Sized>(session: &Session, out: &mut W) -> Result<()> {
    let entries = list_dir(session.cwd()).map_err(CommandError::io("list", session.cwd()))?;
    for entry in entries {
        emit(out, entry)?;
    }
    Ok(())
}

/// Execute `cat` command.
fn execute_cat<W: Write + ?Sized>(
    path: Option<PathArg>,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let file = operand(session, path, "cat", "file")?;
    transfer::stream_file(&file, out)?;
    emit(out, "")
}

/// Execute `add` command.
fn execute_add(path: Option<PathArg>, session: &Session) -> Result<()> {
    let file = operand(session, path, "add", "file")?;
    File::create(&file).map_err(CommandError::io("create", &file))?;
    Ok(())
}

/// Execute `rn` command.
fn execute_rn(src: Option<PathArg>, dst: Option<PathArg>, session: &Session) -> Result<()> {
    let src = operand(session, src, "rn", "source")?;
    let dst = operand(session, dst, "rn", "destination")?;
    fs::rename(&src, &dst).map_err(CommandError::io("rename", &src))
}

/// Execute `cp` command.
fn execute_cp(src: Option<PathArg>, dst: Option<PathArg>, session: &Session) -> Result<()> {
    let src = operand(session, src, "cp", "source")?;
    let dst = operand(session, dst, "cp", "destination")?;
    transfer::copy_file(&src, &dst)?;
    Ok(())
}

/// Execute `mv` command.
///
/// Not atomic: if removing the source fails, the copy stays in place.
fn execute_mv(src: Option<PathArg>, dest_dir: Option<PathArg>, session: &Session) -> Result<()> {
    let src = operand(session, src, "mv", "source")?;
    let dest_dir = operand(session, dest_dir, "mv", "destination directory")?;

    let name = src.file_name().ok_or_else(|| {
        CommandError::io("move", &src)(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source has no file name",
        ))
    })?;
    let dst = dest_dir.join(name);

    transfer::copy_file(&src, &dst)?;
    fs::remove_file(&src).map_err(CommandError::io("remove", &src))
}

/// Execute `rm` command.
fn execute_rm(path: Option<PathArg>, session: &Session) -> Result<()> {
    let file = operand(session, path, "rm", "file")?;
    fs::remove_file(&file).map_err(CommandError::io("remove", &file))
}

/// Execute `os` command.
///
/// A missing or unrecognized flag writes nothing.
fn execute_os<W: Write + ?Sized>(
    query: Option<OsQuery>,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let Some(query) = query else {
        return Ok(());
    };
    match query {
        OsQuery::Eol => emit(out, osinfo::eol()),
        OsQuery::Cpus => {
            let models = osinfo::cpu_models();
            emit(out, format!("total: {}", models.len()))?;
            for model in models {
                emit(out, model)?;
            }
            Ok(())
        }
        OsQuery::HomeDir => emit(out, session.home().display()),
        OsQuery::Username => emit(out, osinfo::username()),
        OsQuery::Architecture => emit(out, osinfo::architecture()),
    }
}

/// Execute `hash` command.
fn execute_hash<W: Write + ?Sized>(
    path: Option<PathArg>,
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let file = operand(session, path, "hash", "file")?;
    let digest = transfer::hash_file(&file)?;
    emit(out, digest)
}

/// Execute `compress` command.
fn execute_compress(src: Option<PathArg>, dst: Option<PathArg>, session: &Session) -> Result<()> {
    let src = operand(session, src, "compress", "source")?;
    let dst = operand(session, dst, "compress", "destination")?;
    transfer::compress_file(&src, &dst)?;
    Ok(())
}

/// Execute `decompress` command.
fn execute_decompress(
    src: Option<PathArg>,
    dst: Option<PathArg>,
    session: &Session,
) -> Result<()> {
    let src = operand(session, src, "decompress", "source")?;
    let dst = operand(session, dst, "decompress", "destination")?;
    transfer::decompress_file(&src, &dst)
}

// =============================================================================
// Tests
// =============================================================================
