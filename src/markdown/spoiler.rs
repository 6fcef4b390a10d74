//! Spoiler block syntax.
//!
//! Consecutive lines starting with `>! ` form a spoiler block. The first line
//! may open with a bracketed lead-in that becomes the `<summary>`:
//!
//! ```text
//! >! [Click to reveal] the butler
//! >! did it
//! ```
//!
//! becomes `<details><summary>Click to reveal</summary>the butler<br>did
//! it</details>`. The block is emitted as raw HTML ahead of Markdown parsing;
//! the sanitizer allow-list covers `details`/`summary`.

use std::sync::LazyLock;

use regex::Regex;

static LEAD_IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]\s*").expect("LEAD_IN_RE: hardcoded regex is valid"));

const DEFAULT_LEAD_IN: &str = "Reveal spoiler";

/// Replace spoiler blocks with `<details>` markup, leaving everything else
/// untouched. Fenced code blocks are passed through so a literal `>!` inside
/// code never becomes a spoiler.
pub fn preprocess_spoilers(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut spoiler_lines: Vec<String> = Vec::new();
    let mut in_code_block = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            flush_spoiler(&mut out, &mut spoiler_lines);
            in_code_block = !in_code_block;
            out.push(line.to_string());
            continue;
        }
        if !in_code_block {
            if let Some(rest) = line.strip_prefix(">! ") {
                spoiler_lines.push(rest.to_string());
                continue;
            }
            if line.trim() == ">!" {
                spoiler_lines.push(String::new());
                continue;
            }
        }
        flush_spoiler(&mut out, &mut spoiler_lines);
        out.push(line.to_string());
    }
    flush_spoiler(&mut out, &mut spoiler_lines);

    out.join("\n")
}

fn flush_spoiler(out: &mut Vec<String>, lines: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let mut body = lines.join("\n");
    let summary = match LEAD_IN_RE.captures(&body) {
        Some(caps) => {
            let lead_in = caps[1].to_string();
            body = body[caps.get(0).map(|m| m.end()).unwrap_or(0)..].to_string();
            lead_in
        }
        None => DEFAULT_LEAD_IN.to_string(),
    };
    let escaped_body = html_escape::encode_text(&body).replace('\n', "<br>");
    let escaped_summary = html_escape::encode_text(&summary);
    out.push(format!(
        "<details><summary>{escaped_summary}</summary>{escaped_body}</details>"
    ));
    lines.clear();
}
