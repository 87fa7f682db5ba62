//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Nearest `config_name` in `start` or one of its ancestors.
///
/// An absolute `config_name` is only checked where it points.
///
/// # Example
/// ```text
/// /home/user/site/content/blog/en/  ← start
/// /home/user/site/folio.toml        ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

/// Absolute form of `path`, canonicalized when it exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
