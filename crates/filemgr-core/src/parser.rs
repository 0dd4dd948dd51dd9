//! Input line parser.
//!
//! A line is split on whitespace into a command name and at most
//! [`MAX_ARGS`] positional arguments. Anything past that is dropped.
//! There is no quoting, so paths containing spaces cannot be expressed.

/// Maximum number of positional arguments kept per command.
pub const MAX_ARGS: usize = 2;

/// A single parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Positional argument `idx`, if present.
    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }
}

/// Parse one input line.
///
/// A trailing line terminator is stripped. An empty line yields an empty
/// command name, which the dispatcher treats as unknown input.
pub fn parse_line(input: &str) -> ParsedCommand {
    let line = input
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(input);

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default().to_string();
    let args = words.take(MAX_ARGS).map(str::to_string).collect();

    ParsedCommand { name, args }
}
