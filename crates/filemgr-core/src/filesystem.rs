//! Path resolution and directory listing against the real filesystem.
//!
//! # Path Convention
//!
//! - Every path handed to a command is resolved against the session's
//!   working directory with [`resolve_path`]
//! - Resolution is lexical: `.` is dropped, `..` pops one component and
//!   never climbs past the root, symlinks are left untouched
//! - An absolute argument replaces the base entirely

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Kind of a listed entry. Directories sort before files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Directory entry returned by [`list_dir`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.kind)
    }
}

/// Resolve `path` relative to `base`.
///
/// `base` is expected to be absolute; the result then is too.
pub fn resolve_path(base: &Path, path: &str) -> PathBuf {
    normalize_path(&base.join(path))
}

/// Normalize a path by resolving `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Whether `target` lies strictly above `home` (a proper ancestor).
pub fn is_above(target: &Path, home: &Path) -> bool {
    target != home && home.starts_with(target)
}

/// List the directories and regular files inside `path`.
///
/// Other entry kinds (symlinks, sockets, devices) are skipped; symlinks are
/// not followed. Directories come first, then files, each group ordered
/// byte-wise by name.
pub fn list_dir(path: &Path) -> io::Result<Vec<DirEntry>> {
    let mut items = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            continue;
        };
        items.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }

    items.sort_by(|a, b| match a.kind.cmp(&b.kind) {
        Ordering::Equal => a.name.cmp(&b.name),
        other => other,
    });
    Ok(items)
}
