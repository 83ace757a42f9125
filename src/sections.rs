//! Header-delimited section parser.
//!
//! Splits a document into [`Section`]s on lines starting with `## `. Only
//! that exact level-2 marker opens a section; every other line (including
//! other header levels) is body text. Content before the first header lands
//! in an implicit "Preamble" section, dropped when its body is blank.
//!
//! Line numbers are 1-based; a section's range runs from its header line to
//! the line immediately preceding the next header (or end of input).

use crate::models::Section;

const HEADER_MARKER: &str = "## ";

/// Parse content into an ordered sequence of sections.
///
/// Sections with whitespace-only bodies are omitted, so fully blank input
/// (or back-to-back headers with nothing between them) can yield fewer
/// sections than headers.
pub fn parse(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: "Preamble".to_string(),
        body: String::new(),
        start_line: 1,
        end_line: 1,
    };

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        if let Some(rest) = line.strip_prefix(HEADER_MARKER) {
            current.end_line = line_no - 1;
            if !current.body.trim().is_empty() {
                sections.push(current);
            }
            current = Section {
                title: rest.trim().to_string(),
                body: String::new(),
                start_line: line_no,
                end_line: line_no,
            };
        } else {
            current.body.push_str(line);
            current.body.push('\n');
            current.end_line = line_no;
        }
    }

    if !current.body.trim().is_empty() {
        sections.push(current);
    }

    sections
}
