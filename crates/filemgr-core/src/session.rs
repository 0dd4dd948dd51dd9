//! Interactive session state and the read-dispatch-report loop.
//!
//! A [`Session`] owns the working directory and the display name. The
//! working directory lives only here: the process working directory is
//! never read or changed, so several sessions can coexist in one process.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::commands::{Command, CommandResult, execute_command};
use crate::config::{
    DEFAULT_USERNAME, LOCATION_PREFIX, OPERATION_FAILED, goodbye_message, welcome_message,
};
use crate::error::CommandError;
use crate::filesystem::{is_above, normalize_path, resolve_path};
use crate::parser::parse_line;

/// How a session loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// `.exit` was entered.
    Exit,
    /// Input was exhausted and the goodbye line was printed.
    EndOfInput,
}

/// State of one interactive session.
#[derive(Clone, Debug)]
pub struct Session {
    home: PathBuf,
    cwd: PathBuf,
    username: String,
}

impl Session {
    /// Start a session in `home`.
    ///
    /// A missing or empty `username` falls back to [`DEFAULT_USERNAME`].
    pub fn new(home: impl AsRef<Path>, username: Option<String>) -> Self {
        let home = normalize_path(home.as_ref());
        let username = username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        Self {
            cwd: home.clone(),
            home,
            username,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Resolve a command argument against the working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }

    /// Move to the parent directory.
    ///
    /// Returns `false` without moving when already at home, at the root, or
    /// when the parent lies above home.
    pub fn go_up(&mut self) -> bool {
        if self.cwd == self.home {
            return false;
        }
        match self.cwd.parent() {
            Some(parent) if !is_above(parent, &self.home) => {
                self.cwd = parent.to_path_buf();
                true
            }
            _ => false,
        }
    }

    /// Change to `target`, which must be an absolute, normalized path.
    ///
    /// Fails if the target is missing or not a directory. A target above
    /// home is ignored and `Ok(false)` is returned.
    pub fn change_dir(&mut self, target: PathBuf) -> Result<bool, CommandError> {
        let meta = fs::metadata(&target).map_err(CommandError::io("stat", &target))?;
        if !meta.is_dir() {
            return Err(CommandError::NotADirectory(target));
        }
        if is_above(&target, &self.home) {
            debug!(target = %target.display(), "refusing to move above home");
            return Ok(false);
        }
        self.cwd = target;
        Ok(true)
    }

    fn report_location<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{} {}", LOCATION_PREFIX, self.cwd.display())
    }
}

/// Parse and run one input line, then report the location.
///
/// Command failures are logged and reported as [`OPERATION_FAILED`]; only
/// failures to write the status lines themselves are returned as errors.
pub fn dispatch_line<W: Write + ?Sized>(
    session: &mut Session,
    line: &str,
    out: &mut W,
) -> io::Result<CommandResult> {
    let parsed = parse_line(line);
    debug!(command = %parsed.name, args = ?parsed.args, "dispatching");

    let cmd = Command::from(&parsed);
    let name = cmd.name().to_string();

    match execute_command(cmd, session, out) {
        Ok(CommandResult::Exit) => return Ok(CommandResult::Exit),
        Ok(CommandResult::Continue) => {}
        Err(err) => {
            error!(command = %name, error = %err, "operation failed");
            writeln!(out, "{}", OPERATION_FAILED)?;
        }
    }

    session.report_location(out)?;
    out.flush()?;
    Ok(CommandResult::Continue)
}

/// Run the interactive loop until `.exit` or end of input.
///
/// Prints the welcome banner first. Input that is not valid UTF-8 is decoded
/// lossily.
pub fn run_session<R: BufRead, W: Write + ?Sized>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> io::Result<SessionEnd> {
    info!(user = %session.username, home = %session.home.display(), "session started");
    writeln!(out, "{}", welcome_message(&session.username))?;
    out.flush()?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if dispatch_line(session, &line, out)? == CommandResult::Exit {
            info!("session exited");
            return Ok(SessionEnd::Exit);
        }
    }

    writeln!(out, "{}", goodbye_message(&session.username))?;
    out.flush()?;
    info!("input closed, session ended");
    Ok(SessionEnd::EndOfInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(tmp: &TempDir) -> Session {
        Session::new(tmp.path(), Some("tester".to_string()))
    }

    fn dispatch(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        dispatch_line(session, line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_username() {
        assert_eq!(Session::new("/", None).username(), DEFAULT_USERNAME);
        assert_eq!(Session::new("/", Some(String::new())).username(), DEFAULT_USERNAME);
        assert_eq!(Session::new("/", Some("ann".into())).username(), "ann");
    }

    #[test]
    fn test_up_at_home_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        assert!(!session.go_up());
        assert_eq!(session.cwd(), tmp.path());
    }

    #[test]
    fn test_up_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        let mut session = session_in(&tmp);

        session.change_dir(tmp.path().join("a/b")).unwrap();
        assert!(session.go_up());
        assert_eq!(session.cwd(), tmp.path().join("a"));
        assert!(session.go_up());
        assert_eq!(session.cwd(), tmp.path());
        assert!(!session.go_up());
    }

    #[test]
    fn test_cd_above_home_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        let parent = tmp.path().parent().unwrap().to_path_buf();

        assert!(!session.change_dir(parent).unwrap());
        assert_eq!(session.cwd(), tmp.path());
    }

    /// `tmp/home/alice` as home, plus `tmp/other/deep` outside of it.
    fn nested_home(tmp: &TempDir) -> (Session, PathBuf, PathBuf) {
        let home = tmp.path().join("home/alice");
        let deep = tmp.path().join("other/deep");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&deep).unwrap();
        (Session::new(&home, None), home, deep)
    }

    #[test]
    fn test_cd_outside_home() {
        let tmp = TempDir::new().unwrap();
        let (mut session, _home, deep) = nested_home(&tmp);

        assert!(session.change_dir(deep.clone()).unwrap());
        assert_eq!(session.cwd(), deep);
    }

    #[test]
    fn test_up_outside_home_moves() {
        let tmp = TempDir::new().unwrap();
        let (mut session, _home, deep) = nested_home(&tmp);

        session.change_dir(deep).unwrap();
        assert!(session.go_up());
        assert_eq!(session.cwd(), tmp.path().join("other"));
    }

    #[test]
    fn test_up_stops_when_parent_is_above_home() {
        let tmp = TempDir::new().unwrap();
        let (mut session, _home, _deep) = nested_home(&tmp);
        let other = tmp.path().join("other");

        // the parent of `other` is `tmp`, an ancestor of home
        session.change_dir(other.clone()).unwrap();
        assert!(!session.go_up());
        assert_eq!(session.cwd(), other);
    }

    #[test]
    fn test_cd_to_ancestor_of_home_is_noop() {
        let tmp = TempDir::new().unwrap();
        let (mut session, home, _deep) = nested_home(&tmp);

        assert!(!session.change_dir(tmp.path().join("home")).unwrap());
        assert_eq!(session.cwd(), home);
    }

    #[test]
    fn test_dispatch_os_unknown_flag_reports_location_only() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let output = dispatch(&mut session, "os --bogus\n");
        assert_eq!(
            output,
            format!("{} {}\n", LOCATION_PREFIX, tmp.path().display())
        );
    }

    #[test]
    fn test_cd_into_file_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("plain.txt"), b"").unwrap();
        let mut session = session_in(&tmp);

        let err = session.change_dir(tmp.path().join("plain.txt")).unwrap_err();
        assert!(matches!(err, CommandError::NotADirectory(_)));
        assert_eq!(session.cwd(), tmp.path());
    }

    #[test]
    fn test_dispatch_reports_location() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let output = dispatch(&mut session, "ls\n");
        assert_eq!(
            output,
            format!("{} {}\n", LOCATION_PREFIX, tmp.path().display())
        );
    }

    #[test]
    fn test_dispatch_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let output = dispatch(&mut session, "cd missing\n");
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some(OPERATION_FAILED));
        assert!(lines.next().unwrap().starts_with(LOCATION_PREFIX));
        assert_eq!(session.cwd(), tmp.path());
    }

    #[test]
    fn test_dispatch_exit_skips_location() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let mut out = Vec::new();
        let result = dispatch_line(&mut session, ".exit\n", &mut out).unwrap();
        assert_eq!(result, CommandResult::Exit);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_session_goodbye_on_eof() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let mut out = Vec::new();
        let end = run_session(&mut session, &b"up\n"[..], &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(
            output,
            format!(
                "{}\n{} {}\n{}\n",
                welcome_message("tester"),
                LOCATION_PREFIX,
                tmp.path().display(),
                goodbye_message("tester"),
            )
        );
    }

    #[test]
    fn test_run_session_exit_stops_reading() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let mut out = Vec::new();
        let end = run_session(&mut session, &b".exit\nadd never.txt\n"[..], &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(end, SessionEnd::Exit);
        assert_eq!(output, format!("{}\n", welcome_message("tester")));
        assert!(!tmp.path().join("never.txt").exists());
    }

    #[test]
    fn test_last_line_without_newline() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        let mut out = Vec::new();
        run_session(&mut session, &b"add last.txt"[..], &mut out).unwrap();
        assert!(tmp.path().join("last.txt").exists());
    }
}
