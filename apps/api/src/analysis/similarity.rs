//! Lexical similarity measures. Stand-ins for embedding similarity: a smoothed
//! TF-IDF cosine between whole documents, and a skill-name similarity that
//! blends related-skill families with character overlap.

use std::collections::{HashMap, HashSet};

use crate::analysis::catalog;
use crate::analysis::extract::{contains_term, tokenize};
use crate::analysis::report::SemanticMatch;

/// Pairs at or below this similarity are not reported.
pub const SEMANTIC_THRESHOLD: f32 = 0.7;
pub const MAX_SEMANTIC_MATCHES: usize = 10;

/// One skill name containing the other as a whole word, e.g. "Spring" / "Spring Boot".
const CONTAINMENT_SIMILARITY: f32 = 0.85;

/// TF-IDF cosine similarity of two documents on a 0–100 scale.
/// IDF is smoothed (`ln((1+N)/(1+df)) + 1`) so shared terms still count.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let tf_a = term_frequencies(&tokens_a);
    let tf_b = term_frequencies(&tokens_b);
    let vocabulary: HashSet<&str> = tf_a.keys().chain(tf_b.keys()).copied().collect();

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for term in vocabulary {
        let fa = tf_a.get(term).copied().unwrap_or(0.0);
        let fb = tf_b.get(term).copied().unwrap_or(0.0);
        let df = (fa > 0.0) as u32 + (fb > 0.0) as u32;
        let idf = (3.0 / (1.0 + df as f64)).ln() + 1.0;

        let wa = fa * idf;
        let wb = fb * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt()) * 100.0).clamp(0.0, 100.0)
}

fn term_frequencies(tokens: &[String]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    let total = tokens.len() as f64;
    for value in counts.values_mut() {
        *value /= total;
    }
    counts
}

/// Similarity of two skill names in [0, 1].
pub fn skill_similarity(a: &str, b: &str) -> f32 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    if a_lower == b_lower {
        return 1.0;
    }

    let family = catalog::family_affinity(a, b).unwrap_or(0.0);
    let containment = if contains_term(&a_lower, &b_lower) || contains_term(&b_lower, &a_lower) {
        CONTAINMENT_SIMILARITY
    } else {
        0.0
    };
    let dice = bigram_dice(&a_lower, &b_lower);

    family.max(containment).max(dice)
}

fn bigrams(s: &str) -> Vec<(char, char)> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Sørensen–Dice coefficient over character bigrams (multiset intersection).
fn bigram_dice(a: &str, b: &str) -> f32 {
    let a_grams = bigrams(a);
    let mut b_grams = bigrams(b);
    if a_grams.is_empty() || b_grams.is_empty() {
        return 0.0;
    }
    let total = (a_grams.len() + b_grams.len()) as f32;

    let mut shared = 0usize;
    for gram in &a_grams {
        if let Some(pos) = b_grams.iter().position(|g| g == gram) {
            b_grams.swap_remove(pos);
            shared += 1;
        }
    }
    2.0 * shared as f32 / total
}

/// Pairs each missing JD skill with resume skills that are close but not identical.
/// Sorted by similarity, highest first, and capped at [`MAX_SEMANTIC_MATCHES`].
pub fn find_semantic_matches(resume_skills: &[&str], missing_jd_skills: &[&str]) -> Vec<SemanticMatch> {
    let mut matches: Vec<SemanticMatch> = Vec::new();

    for jd_skill in missing_jd_skills {
        for resume_skill in resume_skills {
            if resume_skill.eq_ignore_ascii_case(jd_skill) {
                continue;
            }
            let similarity = skill_similarity(resume_skill, jd_skill);
            if similarity > SEMANTIC_THRESHOLD {
                matches.push(SemanticMatch {
                    resume_skill: resume_skill.to_string(),
                    jd_skill: jd_skill.to_string(),
                    similarity: (similarity as f64 * 1000.0).round() / 1000.0,
                });
            }
        }
    }

    matches.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.jd_skill.cmp(&b.jd_skill))
            .then_with(|| a.resume_skill.cmp(&b.resume_skill))
    });
    matches.truncate(MAX_SEMANTIC_MATCHES);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_100() {
        let text = "Rust engineer building distributed systems with tokio";
        let score = text_similarity(text, text);
        assert!((score - 100.0).abs() < 1e-6, "score was {score}");
    }

    #[test]
    fn test_disjoint_documents_score_0() {
        assert_eq!(text_similarity("rust tokio axum", "painting sculpture gallery"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between() {
        let score = text_similarity(
            "python developer building data pipelines",
            "senior python developer for platform team",
        );
        assert!(score > 0.0 && score < 100.0, "score was {score}");
    }

    #[test]
    fn test_empty_document_scores_0() {
        assert_eq!(text_similarity("", "python developer"), 0.0);
    }

    #[test]
    fn test_skill_similarity_family_and_containment() {
        assert_eq!(skill_similarity("PostgreSQL", "postgresql"), 1.0);
        assert!((skill_similarity("PostgreSQL", "MySQL") - 0.8).abs() < 1e-6);
        assert!((skill_similarity("Spring", "Spring Boot") - 0.85).abs() < 1e-6);
        assert!(skill_similarity("Rust", "Excel") < SEMANTIC_THRESHOLD);
    }

    #[test]
    fn test_bigram_dice() {
        assert_eq!(bigram_dice("night", "night"), 1.0);
        // ni,ig,gh,ht vs na,ac,ch,ht → 1 shared of 8
        assert!((bigram_dice("night", "nacht") - 0.25).abs() < 1e-6);
        assert_eq!(bigram_dice("a", "b"), 0.0);
    }

    #[test]
    fn test_semantic_matches_sorted_and_filtered() {
        let matches = find_semantic_matches(
            &["MySQL", "React", "Excel", "TypeScript"],
            &["PostgreSQL", "JavaScript", "Kubernetes"],
        );
        let pairs: Vec<(&str, &str)> = matches
            .iter()
            .map(|m| (m.resume_skill.as_str(), m.jd_skill.as_str()))
            .collect();
        assert_eq!(pairs, vec![("TypeScript", "JavaScript"), ("MySQL", "PostgreSQL")]);
        assert_eq!(matches[0].similarity, 0.85);
    }

    #[test]
    fn test_semantic_matches_capped() {
        let resume: Vec<&str> = vec!["MySQL", "SQLite", "SQL Server", "Oracle"];
        let missing: Vec<&str> = vec!["PostgreSQL", "MySQL", "SQLite", "SQL Server", "Oracle"];
        let matches = find_semantic_matches(&resume, &missing);
        assert_eq!(matches.len(), MAX_SEMANTIC_MATCHES);
    }
}
