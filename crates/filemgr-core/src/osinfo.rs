//! Operating system information for the `os` command.

use sysinfo::System;

/// Platform line terminator.
pub fn eol() -> &'static str {
    if cfg!(windows) { "\r\n" } else { "\n" }
}

/// Model name of every logical CPU, one entry per CPU.
pub fn cpu_models() -> Vec<String> {
    let mut sys = System::new();
    sys.refresh_cpu();
    sys.cpus()
        .iter()
        .map(|cpu| cpu.brand().trim().to_string())
        .collect()
}

/// Login name of the user running the process.
pub fn username() -> String {
    whoami::username()
}

/// CPU architecture the binary was built for (e.g. `x86_64`, `aarch64`).
pub fn architecture() -> &'static str {
    std::env::consts::ARCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eol() {
        #[cfg(unix)]
        assert_eq!(eol(), "\n");
        #[cfg(windows)]
        assert_eq!(eol(), "\r\n");
    }

    #[test]
    fn test_architecture_not_empty() {
        assert!(!architecture().is_empty());
    }
}
