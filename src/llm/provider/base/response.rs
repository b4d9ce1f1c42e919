//! Reply scraping.
//!
//! LLM review replies are free-form text steered toward three labeled
//! sections (`ISSUES:`, `IMPROVEMENTS:`, `FIXED_CODE:`). Extraction is
//! best-effort: each section is scraped independently and a missing
//! section degrades to an empty result. Nothing here returns an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::llm::ReviewReport;

/// Error/debug preview maximum length
const PREVIEW_LENGTH: usize = 500;

fn issues_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)ISSUES:[ \t]*\r?\n(.*?)(?:IMPROVEMENTS:|FIXED_CODE:|\z)")
            .expect("invalid issues regex")
    })
}

fn improvements_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)IMPROVEMENTS:[ \t]*\r?\n(.*?)(?:FIXED_CODE:|\z)")
            .expect("invalid improvements regex")
    })
}

fn fenced_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)```").expect("invalid code fence regex")
    })
}

/// Splits a scraped section body into clean list items.
///
/// One item per non-blank line, with leading `-`/`*` bullets and
/// surrounding whitespace stripped.
fn split_section_items(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*'])
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Scrapes a review reply into a [`ReviewReport`].
///
/// The fixed code is taken from the **last** fenced block in the reply;
/// models frequently echo the submitted code in an earlier block.
pub fn parse_review_sections(response: &str) -> ReviewReport {
    let bugs = issues_re()
        .captures(response)
        .map(|caps| split_section_items(&caps[1]))
        .unwrap_or_default();

    let improvements = improvements_re()
        .captures(response)
        .map(|caps| split_section_items(&caps[1]))
        .unwrap_or_default();

    let fixed_code = fenced_code_re()
        .captures_iter(response)
        .last()
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    ReviewReport {
        bugs,
        improvements,
        fixed_code,
    }
}

/// Processes a raw review reply: log it and scrape the sections.
pub fn process_review_response(response: &str) -> ReviewReport {
    tracing::debug!("LLM review response: {}", response);
    let report = parse_review_sections(response);
    if report.is_empty() {
        tracing::warn!(
            "No sections found in LLM reply (first {} chars): {}",
            PREVIEW_LENGTH,
            truncate_for_preview(response)
        );
    }
    report
}

/// Truncate a string for log/error previews (safe on multibyte characters).
pub fn truncate_for_preview(s: &str) -> String {
    if s.len() <= PREVIEW_LENGTH {
        return s.to_string();
    }
    let boundary = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= PREVIEW_LENGTH)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..boundary])
}
