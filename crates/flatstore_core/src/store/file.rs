//! Document file I/O.
//!
//! # Responsibility
//! - Provide the filesystem capability the store relies on: existence check,
//!   synchronous whole-file text read/write, deletion.
//! - Build dated backup paths from a caller-supplied prefix.
//!
//! # Invariants
//! - Reads and writes are whole-file and blocking; there is no partial I/O.
//! - Backup paths use the current local date as `{prefix}{YYYY-MM-DD}.json`.

use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Serialized form of an empty document file.
pub const EMPTY_ARRAY: &str = "[]";

pub fn exists(path: &Path) -> bool {
    path.exists()
}

pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

pub fn write_text(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)
}

pub fn remove(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

/// Returns today's backup path for the given prefix.
///
/// The prefix is a partial file path, not a directory; callers include any
/// separator they want between prefix and date.
pub fn dated_backup_path(prefix: &str) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    PathBuf::from(format!("{prefix}{date}.json"))
}

#[cfg(test)]
mod tests {
    use super::dated_backup_path;

    #[test]
    fn dated_backup_path_appends_date_and_extension() {
        let path = dated_backup_path("/tmp/contacts-backup-");
        let name = path.to_str().unwrap();

        assert!(name.starts_with("/tmp/contacts-backup-"));
        assert!(name.ends_with(".json"));

        let date = &name["/tmp/contacts-backup-".len()..name.len() - ".json".len()];
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(date.as_bytes()[7], b'-');
    }

    #[test]
    fn dated_backup_path_keeps_prefix_verbatim() {
        let path = dated_backup_path("no-separator");
        assert!(path.to_str().unwrap().starts_with("no-separator"));
    }
}
