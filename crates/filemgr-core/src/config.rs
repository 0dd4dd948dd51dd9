//! Session configuration.
//!
//! Centralizes the user-facing messages and streaming tunables used
//! throughout the file manager.

// =============================================================================
// Session Messages
// =============================================================================

/// Username shown when none was supplied on the command line.
pub const DEFAULT_USERNAME: &str = "Unknown username";

/// Printed for an unrecognized command name.
pub const INVALID_INPUT: &str = "Invalid input";

/// Printed when a command fails; the cause only goes to the log.
pub const OPERATION_FAILED: &str = "Operation failed";

/// Prefix of the location line printed after every command.
pub const LOCATION_PREFIX: &str = "You are currently in";

/// Welcome banner for the given user.
pub fn welcome_message(username: &str) -> String {
    format!("Welcome to the File Manager, {}!", username)
}

/// Farewell printed when input ends without `.exit`.
pub fn goodbye_message(username: &str) -> String {
    format!("Thank you for using File Manager, {}, goodbye!", username)
}

// =============================================================================
// Streaming Configuration
// =============================================================================

/// Internal buffer size for brotli encoder and decoder.
pub const BROTLI_BUFFER_SIZE: usize = 4096;

/// Brotli quality (0-11).
pub const BROTLI_QUALITY: u32 = 11;

/// Brotli sliding window, log2 of the size in bytes.
pub const BROTLI_LG_WINDOW: u32 = 22;
