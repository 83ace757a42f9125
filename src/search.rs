//! Two-tier AND search across the memory collection.
//!
//! Every query token must appear (case-insensitive substring) for a hit.
//! The line pass finds single lines containing all tokens; the section pass
//! then catches sections whose combined text contains all tokens but where
//! no single line did. A line hit covers its enclosing section, so each
//! (file, section) pair contributes at most one result per query.
//!
//! Output order is the ranking: all line-level matches (file then line)
//! precede all section-level matches (file then section), regardless of
//! file recency. Truncation is the caller's job.

use anyhow::Result;
use std::collections::HashSet;

use crate::catalog;
use crate::config::Config;
use crate::models::{FileEntry, SearchMatch, Section};
use crate::sections;

/// Search all catalog files for lines and sections containing every token
/// of `query`. An empty token set yields no matches.
pub fn search(config: &Config, query: &str) -> Result<Vec<SearchMatch>> {
    let words: Vec<String> = query
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let mut line_results = Vec::new();
    let mut section_results = Vec::new();

    for file in catalog::list_files(config)? {
        let content = match catalog::read_lossy(file.path.as_ref()) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("skipping unreadable file {}: {}", file.path, e);
                continue;
            }
        };
        let lines: Vec<&str> = content.lines().collect();
        let parsed = sections::parse(&content);

        let covered = line_pass(&file, &lines, &parsed, &words, &mut line_results);
        section_pass(&file, &lines, &parsed, &words, &covered, &mut section_results);
    }

    line_results.extend(section_results);
    Ok(line_results)
}

/// Emit a match for every line containing all query words. Returns the
/// start lines of sections covered by at least one line hit.
fn line_pass(
    file: &FileEntry,
    lines: &[&str],
    parsed: &[Section],
    words: &[String],
    results: &mut Vec<SearchMatch>,
) -> HashSet<usize> {
    let mut covered = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        let line_no = i + 1;
        let lower = line.to_lowercase();
        if !words.iter().all(|w| lower.contains(w.as_str())) {
            continue;
        }
        results.push(SearchMatch {
            file_name: file.name.clone(),
            file_display: file.display.clone(),
            path: file.path.clone(),
            line: line_no,
            matched_text: line.trim().to_string(),
            section_title: None,
        });
        // Sections are disjoint, so at most one contains the line.
        if let Some(s) = parsed
            .iter()
            .find(|s| s.start_line <= line_no && line_no <= s.end_line)
        {
            covered.insert(s.start_line);
        }
    }

    covered
}

/// Emit a match for every uncovered section whose title + body contains all
/// query words. The reported line defaults to the section title at its
/// start line; the first line in range containing any query word wins over
/// that default.
fn section_pass(
    file: &FileEntry,
    lines: &[&str],
    parsed: &[Section],
    words: &[String],
    covered: &HashSet<usize>,
    results: &mut Vec<SearchMatch>,
) {
    for s in parsed {
        if covered.contains(&s.start_line) {
            continue;
        }
        let section_text = format!("{}\n{}", s.title, s.body).to_lowercase();
        if !words.iter().all(|w| section_text.contains(w.as_str())) {
            continue;
        }

        let mut best_line = s.start_line;
        let mut best_text = s.title.clone();
        for i in (s.start_line - 1)..s.end_line.min(lines.len()) {
            let lower = lines[i].to_lowercase();
            if words.iter().any(|w| lower.contains(w.as_str())) {
                best_line = i + 1;
                best_text = lines[i].trim().to_string();
                break;
            }
        }

        results.push(SearchMatch {
            file_name: file.name.clone(),
            file_display: file.display.clone(),
            path: file.path.clone(),
            line: best_line,
            matched_text: best_text,
            section_title: Some(s.title.clone()),
        });
    }
}
