//! Vocabulary extraction over free text: skills, years of experience,
//! job titles, certifications, and frequency keywords.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::catalog::{
    self, SkillDef, CASE_SENSITIVE_SKILLS, CERTIFICATIONS, JOB_TITLES, SKILLS,
};

/// Upper bound on a believable years-of-experience figure.
const MAX_PLAUSIBLE_YEARS: u32 = 50;

static EXPERIENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d{1,2})[+\s]*years?\s*(?:of\s*)?(?:experience|exp)\b",
        r"(\d{1,2})[+\s]*yrs?\s*(?:of\s*)?(?:experience|exp)\b",
        r"over\s*(\d{1,2})\s*years?",
        r"more than\s*(\d{1,2})\s*years?",
        r"(\d{1,2})\+\s*years?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Lowercases and collapses all whitespace runs to single spaces.
pub fn prepare(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `term` occurs in `haystack` with no word characters directly
/// on either side. Matching is case-sensitive.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    count_term(haystack, term) > 0
}

pub fn count_term(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    haystack
        .match_indices(term)
        .filter(|(idx, _)| {
            let before = haystack[..*idx].chars().next_back();
            let after = haystack[idx + term.len()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .count()
}

/// `prepared` is lowercased; `cased` keeps the original capitalisation.
fn skill_present(prepared: &str, cased: &str, skill: &SkillDef) -> bool {
    let name_found = if CASE_SENSITIVE_SKILLS.contains(&skill.name) {
        contains_term(cased, skill.name)
    } else {
        contains_term(prepared, &skill.name.to_lowercase())
    };
    name_found || skill.aliases.iter().any(|a| contains_term(prepared, a))
}

/// Catalog skills mentioned in `text`, in catalog order.
pub fn extract_skills(text: &str) -> Vec<&'static SkillDef> {
    let prepared = prepare(text);
    let cased = text.split_whitespace().collect::<Vec<_>>().join(" ");
    SKILLS
        .iter()
        .filter(|s| skill_present(&prepared, &cased, s))
        .collect()
}

/// The largest years-of-experience figure stated in `text`.
pub fn extract_experience_years(text: &str) -> Option<u32> {
    let prepared = prepare(text);
    EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(&prepared))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|years| (1..=MAX_PLAUSIBLE_YEARS).contains(years))
        .max()
}

pub fn extract_job_titles(text: &str) -> Vec<&'static str> {
    let prepared = prepare(text);
    JOB_TITLES
        .iter()
        .copied()
        .filter(|t| contains_term(&prepared, t))
        .collect()
}

pub fn extract_certifications(text: &str) -> Vec<&'static str> {
    let prepared = prepare(text);
    CERTIFICATIONS
        .iter()
        .copied()
        .filter(|c| contains_term(&prepared, &c.to_lowercase()))
        .collect()
}

/// Lowercase tokens longer than two characters with stop words removed.
/// Keeps `+ # . -` inside tokens so `c++`, `node.js` and `ci-cd` survive.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '-' | '_')))
        .map(|t| t.trim_matches(|c: char| matches!(c, '.' | '-' | '_')))
        .filter(|t| t.chars().count() > 2 && !catalog::is_stop_word(t))
        .map(String::from)
        .collect()
}

/// Top `n` tokens by frequency; ties keep first-occurrence order.
pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in tokenize(text).into_iter().enumerate() {
        counts.entry(token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(n).map(|(token, _, _)| token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &[&SkillDef]) -> Vec<&'static str> {
        skills.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_term_boundaries() {
        assert!(contains_term("java and rust", "java"));
        assert!(!contains_term("javascript only", "java"));
        assert!(contains_term("modern c++ code", "c++"));
        assert!(contains_term("c#, .net", "c#"));
        assert!(contains_term("uses node.js.", "node.js"));
        assert!(!contains_term("leadership", "lead"));
        assert_eq!(count_term("go go gopher go", "go"), 3);
    }

    #[test]
    fn test_extract_skills_matches_names_and_aliases() {
        let text = "Deployed services on K8s with Postgres, written in Golang and C++.\n\
                    Frontend in React; familiar with Machine   Learning.";
        let found = names(&extract_skills(text));
        for expected in ["C++", "Go", "React", "PostgreSQL", "Kubernetes", "Machine Learning"] {
            assert!(found.contains(&expected), "missing {expected} in {found:?}");
        }
        assert!(!found.contains(&"Java"));
    }

    #[test]
    fn test_go_requires_capitalised_name_or_alias() {
        let found = names(&extract_skills("Ready to go live; good to go."));
        assert!(!found.contains(&"Go"), "unexpected Go in {found:?}");

        for text in ["Backend services in Go and Rust", "Golang microservices", "GO, golang"] {
            let found = names(&extract_skills(text));
            assert!(found.contains(&"Go"), "missing Go in {text:?}");
        }
    }

    #[test]
    fn test_extract_skills_distinguishes_java_from_javascript() {
        let found = names(&extract_skills("Senior JavaScript developer"));
        assert!(found.contains(&"JavaScript"));
        assert!(!found.contains(&"Java"));
    }

    #[test]
    fn test_experience_years_takes_maximum() {
        let text = "3 years of experience with Go, over 7 years in software overall";
        assert_eq!(extract_experience_years(text), Some(7));
    }

    #[test]
    fn test_experience_years_plus_form() {
        assert_eq!(
            extract_experience_years("Requires 5+ years of experience"),
            Some(5)
        );
        assert_eq!(extract_experience_years("10+ yrs exp preferred"), Some(10));
        assert_eq!(extract_experience_years("more than 4 years"), Some(4));
    }

    #[test]
    fn test_experience_years_absent() {
        assert_eq!(extract_experience_years("Enthusiastic graduate"), None);
    }

    #[test]
    fn test_job_titles_and_certifications() {
        let text = "Lead Software Engineer. AWS Certified Solutions Architect, PMP.";
        let titles = extract_job_titles(text);
        assert!(titles.contains(&"software engineer"));
        assert!(titles.contains(&"lead"));
        assert!(titles.contains(&"architect"));

        let certs = extract_certifications(text);
        assert_eq!(certs, vec!["AWS Certified", "PMP"]);
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("The C++ and Node.js developer, on AI.");
        assert_eq!(tokens, vec!["c++", "node.js", "developer"]);
    }

    #[test]
    fn test_extract_keywords_orders_by_frequency_then_position() {
        let text = "rust tokio rust axum tokio rust serde";
        assert_eq!(extract_keywords(text, 3), vec!["rust", "tokio", "axum"]);
    }
}
