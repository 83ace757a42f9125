//! Write-path validation.
//!
//! A save request may only target a file the catalog could have handed out:
//! an existing core file or a markdown file currently present in the memory
//! directory. The allowed set is recomputed from the filesystem on every
//! call, so a file deleted after a listing simply falls out of the set.

use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::catalog;
use crate::config::Config;

/// The exact set of absolute path strings a caller may overwrite.
///
/// Paths that do not exist yet are never allowed — saving cannot create
/// files, only replace the content of known ones.
pub fn allowed_paths(config: &Config) -> Result<HashSet<String>> {
    let mut allowed = HashSet::new();

    for name in &config.core_files {
        let path = config.workspace.join(name);
        if path.exists() {
            allowed.insert(path.to_string_lossy().to_string());
        }
    }

    for path in catalog::markdown_files(&config.memory_dir())? {
        allowed.insert(path.to_string_lossy().to_string());
    }

    Ok(allowed)
}

/// Overwrite `path` with `content` after validating it against
/// [`allowed_paths`]. Returns the new byte length on success; a path
/// outside the allowed set is rejected with no filesystem mutation.
pub fn save_file(config: &Config, path: &str, content: &str) -> Result<usize> {
    if !allowed_paths(config)?.contains(path) {
        bail!("not allowed: {}", path);
    }
    std::fs::write(path, content)?;
    Ok(content.len())
}
