use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("static regex")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("static regex")
});

static LINKEDIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("static regex"));

static GITHUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/[\w-]+").expect("static regex"));

const SECTION_HEADER_MAX_LEN: usize = 50;

/// Section header keywords; the first matching section wins.
const SECTION_KEYWORDS: &[(ResumeSection, &[&str])] = &[
    (
        ResumeSection::Education,
        &["education", "academic", "qualification", "degree"],
    ),
    (
        ResumeSection::Experience,
        &["experience", "employment", "work", "career", "professional"],
    ),
    (
        ResumeSection::Skills,
        &["skills", "technical", "competenc", "technolog"],
    ),
    (
        ResumeSection::Certifications,
        &["certification", "certificate", "license"],
    ),
    (ResumeSection::Projects, &["projects", "portfolio"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSection {
    Education,
    Experience,
    Skills,
    Certifications,
    Projects,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// A section header and the lines that follow it, up to the next header.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub section: ResumeSection,
    pub content: String,
}

/// Trims every line, collapses inner whitespace runs, and drops blank lines.
/// Control characters other than newlines are treated as whitespace.
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            line.split(|c: char| c.is_whitespace() || c.is_control())
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `max_chars` characters, with an ellipsis when truncated.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    let first = |re: &Regex| re.find(text).map(|m| m.as_str().to_string());
    ContactInfo {
        email: first(&EMAIL),
        phone: first(&PHONE),
        linkedin: first(&LINKEDIN),
        github: first(&GITHUB),
    }
}

fn classify_header(line: &str) -> Option<ResumeSection> {
    let lower = line.to_lowercase();
    if lower.chars().count() >= SECTION_HEADER_MAX_LEN {
        return None;
    }
    SECTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(section, _)| *section)
}

/// Splits a resume into sections by header lines.
/// Headers with no body are dropped; a repeated section keeps its last body.
pub fn extract_sections(text: &str) -> Vec<SectionBlock> {
    let mut blocks: Vec<SectionBlock> = Vec::new();
    let mut current: Option<ResumeSection> = None;
    let mut body: Vec<&str> = Vec::new();

    let mut flush = |section: Option<ResumeSection>, body: &mut Vec<&str>| {
        if let Some(section) = section {
            if !body.is_empty() {
                blocks.retain(|b| b.section != section);
                blocks.push(SectionBlock {
                    section,
                    content: body.join("\n"),
                });
            }
        }
        body.clear();
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(section) = classify_header(line) {
            flush(current, &mut body);
            current = Some(section);
        } else if current.is_some() {
            body.push(line);
        }
    }
    flush(current, &mut body);

    blocks.sort_by_key(|b| b.section);
    blocks
}
