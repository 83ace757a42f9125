//! Workspace file enumeration.
//!
//! Builds the catalog the UI browses: daily notes from `workspace/memory`
//! (newest filename first, grouped by month) followed by the configured core
//! files in declaration order. Every call rescans the filesystem — there is
//! no cache, so listings always reflect the current state.

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::{FileEntry, FileKind};

static MD_GLOB: Lazy<GlobSet> = Lazy::new(|| {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new("*.md").expect("static glob"));
    builder.build().expect("static globset")
});

/// Strict date prefix on daily note stems, e.g. `2026-02-24`.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());

/// List all memory files: daily notes sorted by filename descending, then
/// core files in declaration order.
///
/// A missing memory directory is not an error — the listing then contains
/// only the core files that exist.
pub fn list_files(config: &Config) -> Result<Vec<FileEntry>> {
    let mut files = Vec::new();
    let now = Local::now();

    let mut daily = markdown_files(&config.memory_dir())?;
    daily.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    for path in daily {
        let (month_key, month_label) = month_group(&stem_of(&path), now.year(), now.month());
        files.push(entry_for(&path, FileKind::Daily, Some(month_key), Some(month_label))?);
    }

    for name in &config.core_files {
        let path = config.workspace.join(name);
        if path.exists() {
            files.push(entry_for(&path, FileKind::Core, None, None)?);
        }
    }

    Ok(files)
}

/// All `*.md` files directly inside `dir`, unsorted. Empty when the
/// directory does not exist.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    if !dir.exists() {
        return Ok(paths);
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if MD_GLOB.is_match(entry.file_name().to_string_lossy().as_ref()) {
            paths.push(entry.path());
        }
    }
    Ok(paths)
}

/// Read a file as text, replacing malformed byte sequences instead of
/// failing. Corrupt files stay browsable and searchable in degraded form.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn entry_for(
    path: &Path,
    kind: FileKind,
    month_key: Option<String>,
    month_label: Option<String>,
) -> Result<FileEntry> {
    let metadata = std::fs::metadata(path)?;
    let modified = metadata
        .modified()
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
    let modified_secs = modified
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    let modified_at: DateTime<Utc> = DateTime::from_timestamp(modified_secs, 0)
        .unwrap_or_else(|| DateTime::from_timestamp(0, 0).expect("epoch"));

    let line_count = match read_lossy(path) {
        Ok(content) => content.lines().count(),
        Err(e) => {
            log::warn!("unreadable file in catalog: {}: {}", path.display(), e);
            0
        }
    };

    Ok(FileEntry {
        path: path.to_string_lossy().to_string(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        display: stem_of(path),
        kind,
        month_key,
        month_label,
        size_bytes: metadata.len(),
        modified_at,
        line_count,
    })
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Month grouping for a daily note stem. Stems without a strict
/// `YYYY-MM-DD` prefix (or with an impossible month) land in the `other`
/// bucket rather than failing the whole listing.
fn month_group(stem: &str, current_year: i32, current_month: u32) -> (String, String) {
    let caps = match DATE_PREFIX.captures(stem) {
        Some(c) => c,
        None => return ("other".to_string(), "Other".to_string()),
    };
    let year: i32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);

    let month_name = match chrono::Month::try_from(month as u8) {
        Ok(m) => m.name(),
        Err(_) => return ("other".to_string(), "Other".to_string()),
    };

    let month_key = format!("{:04}-{:02}", year, month);
    let month_label = if year == current_year && month == current_month {
        month_name.to_string()
    } else {
        format!("{} {}", month_name, year)
    };
    (month_key, month_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> Config {
        Config {
            workspace: tmp.path().to_path_buf(),
            host: "127.0.0.1".to_string(),
            port: 0,
            core_files: vec!["MEMORY.md".to_string()],
        }
    }

    #[test]
    fn test_month_group_parses_date_prefix() {
        let (key, label) = month_group("2026-02-24", 2026, 8);
        assert_eq!(key, "2026-02");
        assert_eq!(label, "February 2026");
    }

    #[test]
    fn test_month_group_current_month_has_no_year() {
        let (key, label) = month_group("2026-08-01", 2026, 8);
        assert_eq!(key, "2026-08");
        assert_eq!(label, "August");
    }

    #[test]
    fn test_month_group_non_date_stem() {
        assert_eq!(
            month_group("scratchpad", 2026, 8),
            ("other".to_string(), "Other".to_string())
        );
    }

    #[test]
    fn test_month_group_impossible_month() {
        assert_eq!(
            month_group("2026-13-01", 2026, 8),
            ("other".to_string(), "Other".to_string())
        );
    }

    #[test]
    fn test_listing_order_daily_desc_then_core() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let memory = config.memory_dir();
        fs::create_dir_all(&memory).unwrap();
        fs::write(memory.join("2026-02-23.md"), "old\n").unwrap();
        fs::write(memory.join("2026-02-24.md"), "new\n").unwrap();
        fs::write(memory.join("notes.txt"), "ignored\n").unwrap();
        fs::write(config.workspace.join("MEMORY.md"), "core\n").unwrap();

        let files = list_files(&config).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["2026-02-24.md", "2026-02-23.md", "MEMORY.md"]);
        assert_eq!(files[0].kind, FileKind::Daily);
        assert_eq!(files[2].kind, FileKind::Core);
        assert_eq!(files[2].month_key, None);
    }

    #[test]
    fn test_missing_memory_dir_lists_only_core() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        fs::write(config.workspace.join("MEMORY.md"), "core\n").unwrap();

        let files = list_files(&config).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "MEMORY.md");
    }

    #[test]
    fn test_zero_byte_file_tolerated() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let memory = config.memory_dir();
        fs::create_dir_all(&memory).unwrap();
        fs::write(memory.join("2026-01-01.md"), "").unwrap();

        let files = list_files(&config).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, 0);
        assert_eq!(files[0].line_count, 0);
    }

    #[test]
    fn test_malformed_bytes_counted_not_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let memory = config.memory_dir();
        fs::create_dir_all(&memory).unwrap();
        fs::write(memory.join("2026-01-02.md"), b"ok\n\xff\xfe broken\n").unwrap();

        let files = list_files(&config).unwrap();
        assert_eq!(files[0].line_count, 2);
    }
}
