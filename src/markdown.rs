//! Minimal markdown-to-HTML renderer.
//!
//! Handles the subset of markdown the agent actually writes: fenced and
//! inline code, bold, italic, links, bullet lists, and paragraphs. Nothing
//! close to CommonMark, and deliberately so.
//!
//! The output is NOT escaped or sanitized. Memory Book renders a single
//! local user's own files; treat this as a trusted-content renderer. Any
//! multi-user deployment would need HTML escaping added first.
//!
//! Substitution order matters and is load-bearing: fenced blocks are wrapped
//! first with their triple-backtick delimiters stripped, which keeps the
//! inline-code rule from re-matching across them, while the later rules still
//! scan the wrapped text. Reordering the steps changes the output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[\s\S]*?```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Render markdown text to an HTML fragment (newline-joined tags).
///
/// Pure and deterministic; no filesystem or state involved.
pub fn render(text: &str) -> String {
    let text = FENCED_CODE.replace_all(text, |caps: &Captures| {
        let inner = &caps[0][3..caps[0].len() - 3];
        format!("<pre><code>{}</code></pre>", inner.trim())
    });
    let text = INLINE_CODE.replace_all(&text, "<code>$1</code>");
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");
    let text = LINK.replace_all(&text, r#"<a href="$2">$1</a>"#);

    let mut html: Vec<String> = Vec::new();
    let mut in_list = false;
    for line in text.split('\n') {
        let stripped = line.trim();
        if let Some(item) = stripped.strip_prefix("- ") {
            if !in_list {
                html.push("<ul>".to_string());
                in_list = true;
            }
            html.push(format!("<li>{}</li>", item));
        } else {
            if in_list {
                html.push("</ul>".to_string());
                in_list = false;
            }
            if !stripped.is_empty() {
                html.push(format!("<p>{}</p>", stripped));
            }
        }
    }
    if in_list {
        html.push("</ul>".to_string());
    }

    html.join("\n")
}
