//! Discovery of the `.flowtree/` configuration directory.
//!
//! The directory is looked up by walking from a start path towards the
//! filesystem root, the same way version-control metadata is found. The
//! `FLOWTREE_DIR` environment variable takes precedence over the walk.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the configuration directory.
pub const CONFIG_DIR_NAME: &str = ".flowtree";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "FLOWTREE_DIR";

/// Walk up the directory tree from `start` looking for a `.flowtree/` directory.
///
/// Returns `None` if the filesystem root is reached without finding one.
///
/// # Examples
///
/// ```no_run
/// use flowtree_config::config_dir::find_config_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_config_dir(Path::new(".")) {
///     println!("Using config from {}", dir.display());
/// }
/// ```
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Ensure a `.flowtree/` directory exists at the given path.
///
/// If `path` is not itself named `.flowtree`, the directory is created
/// underneath it. Returns the directory path.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_config_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(CONFIG_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(CONFIG_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_dir_in_start() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join(".flowtree");
        std::fs::create_dir(&cfg).unwrap();

        let found = find_config_dir(dir.path()).unwrap().canonicalize().unwrap();
        assert_eq!(found, cfg.canonicalize().unwrap());
    }

    #[test]
    fn finds_dir_from_child() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join(".flowtree");
        std::fs::create_dir(&cfg).unwrap();

        let child = dir.path().join("flows").join("nested");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_config_dir(&child).unwrap().canonicalize().unwrap();
        assert_eq!(found, cfg.canonicalize().unwrap());
    }

    #[test]
    fn nonexistent_start_is_none() {
        if std::env::var(CONFIG_DIR_ENV).is_err() {
            assert!(find_config_dir(Path::new("/nonexistent/start/path")).is_none());
        }
    }

    #[test]
    fn ensure_creates_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = ensure_config_dir(dir.path()).unwrap();
        assert!(first.is_dir());
        assert!(first.ends_with(".flowtree"));
        let second = ensure_config_dir(&first).unwrap();
        assert_eq!(first, second);
    }
}
