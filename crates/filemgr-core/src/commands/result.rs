//! Command execution result type.

/// What the session does after a command finished successfully.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Report the location and read the next line.
    Continue,
    /// Stop immediately, skipping the location report.
    Exit,
}
