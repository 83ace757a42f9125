//! Core data models used throughout Memory Book.
//!
//! These types represent the catalog entries, document sections, and search
//! matches that flow between the core components and the HTTP/CLI surfaces.
//! Serialized field names match the JSON the web UI consumes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether a catalog entry is a dated daily note or a fixed core file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Daily,
    Core,
}

/// A memory file as listed by the catalog.
///
/// Recomputed on every listing; always reflects the filesystem at call time.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    /// Absolute path; the entry's identity.
    pub path: String,
    /// File name including extension (e.g. `2026-02-24.md`).
    pub name: String,
    /// File stem shown in the UI (e.g. `2026-02-24`).
    pub display: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// `YYYY-MM` grouping key for daily files, `other` when the name
    /// doesn't carry a date prefix. Absent for core files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_key: Option<String>,
    /// Human label for the month group (e.g. `February 2026`, or just
    /// `February` for the current month).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_label: Option<String>,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(rename = "modified")]
    pub modified_at: DateTime<Utc>,
    #[serde(rename = "lines")]
    pub line_count: usize,
}

/// A `## `-delimited block within a single file.
///
/// Line numbers are 1-based and inclusive; sections from one parse are
/// contiguous and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(rename = "line")]
    pub start_line: usize,
    pub end_line: usize,
}

/// One search hit.
///
/// Line-level matches carry no `section_title`; section-level matches carry
/// the title of the section that matched as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    #[serde(rename = "file")]
    pub file_name: String,
    pub file_display: String,
    pub path: String,
    pub line: usize,
    #[serde(rename = "match")]
    pub matched_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
}
