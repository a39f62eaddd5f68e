//! Platform helpers for locating runnable hook scripts
//!
//! Unix decides runnability from the permission bits. Windows has no
//! executable bit, so a script counts as runnable when it exists, and a
//! missing path is retried with the `.exe` suffix.

use std::path::{Path, PathBuf};

/// Suffix appended when retrying a missing script path
#[cfg(windows)]
pub const EXE_SUFFIX: Option<&str> = Some(".exe");

/// Suffix appended when retrying a missing script path
#[cfg(not(windows))]
pub const EXE_SUFFIX: Option<&str> = None;

/// Result of probing a path for a runnable script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Nothing at the path (or its suffixed variant)
    Missing,
    /// A regular file exists but lacks execute permission
    NotExecutable(PathBuf),
    /// A runnable file was found at this path
    Executable(PathBuf),
}

/// Probe `path` for a runnable file, retrying with [`EXE_SUFFIX`] when missing
#[must_use]
pub fn probe_executable(path: &Path) -> Probe {
    match probe_one(path) {
        Probe::Missing => {}
        found => return found,
    }

    if let Some(suffix) = EXE_SUFFIX {
        let mut with_suffix = path.as_os_str().to_owned();
        with_suffix.push(suffix);
        return probe_one(Path::new(&with_suffix));
    }

    Probe::Missing
}

fn probe_one(path: &Path) -> Probe {
    let Ok(metadata) = std::fs::metadata(path) else {
        return Probe::Missing;
    };
    if !metadata.is_file() {
        return Probe::Missing;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Probe::NotExecutable(path.to_path_buf());
        }
    }

    Probe::Executable(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_probe_missing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(probe_executable(&temp.path().join("nope")), Probe::Missing);
    }

    #[test]
    fn test_probe_directory_is_missing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pre-commit");
        fs::create_dir(&dir).unwrap();
        assert_eq!(probe_executable(&dir), Probe::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("pre-commit");
        fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();

        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(
            probe_executable(&script),
            Probe::NotExecutable(script.clone())
        );

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(probe_executable(&script), Probe::Executable(script));
    }
}
