//! Match scoring — pluggable, trait-based scorer that measures a resume against a job description.
//!
//! Default: `KeywordMatchScorer` (catalog-driven, weighted by skill importance).
//! Alternative: `QuickMatchScorer` (flat skill ratio plus fixed heuristics).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup via `SCORER`.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::analysis::catalog::{
    certification_importance, Importance, SkillDef, ATS_ACTION_VERBS, CREDENTIAL_KEYWORDS,
    EXPERIENCE_KEYWORDS, QUICK_ATS_TERMS, QUICK_HIGH_IMPORTANCE,
};
use crate::analysis::extract::{
    contains_term, extract_certifications, extract_experience_years, extract_job_titles,
    extract_keywords, extract_skills, prepare, tokenize,
};
use crate::analysis::report::{
    round_score, AnalysisReport, CertificationMatch, ExperienceAnalysis, MatchBreakdown,
    ResumeProfile, SemanticMatch, SkillMatch, Suggestion,
};
use crate::analysis::similarity::{find_semantic_matches, text_similarity};
use crate::errors::AppError;
use crate::extraction::text::{extract_contact_info, extract_sections, word_count};

const MISSING_SKILLS_IN_SUGGESTION: usize = 5;
const JD_ATS_KEYWORDS: usize = 10;
const JD_ATS_MIN_LEN: usize = 5;
const BRIEF_RESUME_WORDS: usize = 200;
const LONG_RESUME_WORDS: usize = 800;
const NO_CERTS_REQUIRED_SCORE: f64 = 80.0;

// ────────────────────────────────────────────────────────────────────────────
// Backend selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScorerKind {
    #[default]
    Keyword,
    Quick,
}

impl FromStr for ScorerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(ScorerKind::Keyword),
            "quick" => Ok(ScorerKind::Quick),
            other => Err(anyhow!("unknown scorer '{other}' (expected 'keyword' or 'quick')")),
        }
    }
}

pub fn build_scorer(kind: ScorerKind) -> Arc<dyn MatchScorer> {
    match kind {
        ScorerKind::Keyword => Arc::new(KeywordMatchScorer),
        ScorerKind::Quick => Arc::new(QuickMatchScorer),
    }
}

/// Weights for combining the three sub-scores into the overall score.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub certifications: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            certifications: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn overall(&self, breakdown: &MatchBreakdown) -> f64 {
        self.skills * breakdown.skills_score
            + self.experience * breakdown.experience_score
            + self.certifications * breakdown.certification_score
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// the handlers or callers.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Label reported in `AnalysisReport::scorer_backend`.
    fn backend(&self) -> &'static str;

    async fn score(&self, resume_text: &str, job_description: &str)
        -> Result<AnalysisReport, AppError>;
}

/// Backend-specific portion of a report; the rest is shared.
struct ScoredMatch {
    breakdown: MatchBreakdown,
    matched_skills: Vec<SkillMatch>,
    missing_skills: Vec<String>,
    experience: ExperienceAnalysis,
    certifications: Vec<CertificationMatch>,
    suggestions: Vec<Suggestion>,
    ats_keywords: BTreeMap<String, bool>,
    semantic_matches: Vec<SemanticMatch>,
}

fn assemble_report(backend: &str, resume: &str, jd: &str, scored: ScoredMatch) -> AnalysisReport {
    let breakdown = MatchBreakdown {
        skills_score: round_score(scored.breakdown.skills_score),
        experience_score: round_score(scored.breakdown.experience_score),
        certification_score: round_score(scored.breakdown.certification_score),
    };
    let overall_score = round_score(ScoringWeights::default().overall(&scored.breakdown));

    let mut suggestions = scored.suggestions;
    suggestions.sort_by_key(|s| s.priority);

    AnalysisReport {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        scorer_backend: backend.to_string(),
        overall_score,
        match_breakdown: breakdown,
        matched_skills: scored.matched_skills,
        missing_skills: scored.missing_skills,
        experience_analysis: Some(scored.experience),
        certification_analysis: scored.certifications,
        detailed_suggestions: suggestions,
        ats_keywords: scored.ats_keywords,
        semantic_matches: scored.semantic_matches,
        text_similarity: round_score(text_similarity(resume, jd)),
        resume_profile: build_profile(resume),
    }
}

fn build_profile(resume: &str) -> ResumeProfile {
    ResumeProfile {
        contact: extract_contact_info(resume),
        sections_found: extract_sections(resume).into_iter().map(|b| b.section).collect(),
        word_count: word_count(resume),
    }
}

fn suggestion(category: &str, priority: Importance, text: String, action: &str) -> Suggestion {
    Suggestion {
        category: category.to_string(),
        priority,
        suggestion: text,
        specific_action: action.to_string(),
    }
}

fn weighted_ratio<I>(items: I) -> Option<f64>
where
    I: IntoIterator<Item = (Importance, bool)>,
{
    let (hit, total) = items
        .into_iter()
        .fold((0u32, 0u32), |(hit, total), (importance, matched)| {
            let w = importance.weight();
            (hit + if matched { w } else { 0 }, total + w)
        });
    (total > 0).then(|| hit as f64 / total as f64 * 100.0)
}

/// Splits JD skills into those the resume covers and those it lacks.
fn partition_skills(
    resume_skills: &[&'static SkillDef],
    jd_skills: &[&'static SkillDef],
) -> (Vec<&'static SkillDef>, Vec<&'static SkillDef>) {
    jd_skills
        .iter()
        .copied()
        .partition(|jd| resume_skills.iter().any(|r| r.name == jd.name))
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Catalog-driven scorer.
///
/// Algorithm:
/// 1. skills = Σ weight(matched JD skills) / Σ weight(JD skills) × 100,
///    weights high=3, medium=2, low=1
/// 2. experience = 60 for meeting the years requirement (pro-rated otherwise)
///    + 40 × share of JD job titles found in the resume
/// 3. certifications = weighted share of JD certifications held; 80 when none required
/// 4. overall = 0.5·skills + 0.3·experience + 0.2·certifications
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        Ok(compute_keyword_match(resume_text, job_description))
    }
}

fn compute_keyword_match(resume: &str, jd: &str) -> AnalysisReport {
    let resume_skills = extract_skills(resume);
    let jd_skills = extract_skills(jd);
    let (matched, mut missing) = partition_skills(&resume_skills, &jd_skills);
    missing.sort_by_key(|s| s.importance());

    let skills_score = weighted_ratio(
        matched
            .iter()
            .map(|s| (s.importance(), true))
            .chain(missing.iter().map(|s| (s.importance(), false))),
    )
    .unwrap_or(0.0);

    let experience = analyze_experience(resume, jd);
    let experience_score = experience_score(&experience);

    let certifications = analyze_certifications(resume, jd);
    let certification_score = weighted_ratio(
        certifications
            .iter()
            .map(|c| (c.importance, c.matched)),
    )
    .unwrap_or(NO_CERTS_REQUIRED_SCORE);

    let breakdown = MatchBreakdown {
        skills_score,
        experience_score,
        certification_score,
    };
    let overall = ScoringWeights::default().overall(&breakdown);

    let missing_names: Vec<&str> = missing.iter().map(|s| s.name).collect();
    let resume_names: Vec<&str> = resume_skills.iter().map(|s| s.name).collect();

    let suggestions = keyword_suggestions(
        resume,
        &missing_names,
        &experience,
        &certifications,
        overall,
    );

    ScoredMatch {
        breakdown,
        matched_skills: matched
            .iter()
            .map(|s| SkillMatch {
                skill: s.name.to_string(),
                matched: true,
                importance: s.importance(),
                category: Some(s.category),
            })
            .collect(),
        missing_skills: missing_names.iter().map(|s| s.to_string()).collect(),
        experience,
        certifications,
        suggestions,
        ats_keywords: keyword_ats(resume, jd),
        semantic_matches: find_semantic_matches(&resume_names, &missing_names),
    }
    .into_report("keyword", resume, jd)
}

impl ScoredMatch {
    fn into_report(self, backend: &str, resume: &str, jd: &str) -> AnalysisReport {
        assemble_report(backend, resume, jd, self)
    }
}

fn analyze_experience(resume: &str, jd: &str) -> ExperienceAnalysis {
    let found_years = extract_experience_years(resume);
    let required_years = extract_experience_years(jd);

    let resume_titles = extract_job_titles(resume);
    let jd_titles = extract_job_titles(jd);
    let (titles_matched, titles_missing): (Vec<&str>, Vec<&str>) = jd_titles
        .iter()
        .copied()
        .partition(|t| resume_titles.contains(t));

    let matched = match (required_years, found_years) {
        (Some(required), Some(found)) => found >= required,
        (Some(_), None) => false,
        (None, _) => true,
    };

    ExperienceAnalysis {
        matched,
        required_years,
        found_years,
        job_titles_matched: titles_matched.into_iter().map(String::from).collect(),
        missing_job_titles: titles_missing.into_iter().map(String::from).collect(),
    }
}

fn experience_score(experience: &ExperienceAnalysis) -> f64 {
    let years_part = if experience.matched {
        60.0
    } else {
        match (experience.found_years, experience.required_years) {
            (Some(found), Some(required)) if required > 0 => {
                (found as f64 / required as f64 * 60.0).min(60.0)
            }
            _ => 0.0,
        }
    };

    let total_titles = experience.job_titles_matched.len() + experience.missing_job_titles.len();
    let titles_part = if total_titles == 0 {
        40.0
    } else {
        experience.job_titles_matched.len() as f64 / total_titles as f64 * 40.0
    };

    (years_part + titles_part).min(100.0)
}

fn analyze_certifications(resume: &str, jd: &str) -> Vec<CertificationMatch> {
    let held = extract_certifications(resume);
    extract_certifications(jd)
        .into_iter()
        .map(|cert| CertificationMatch {
            certification: cert.to_string(),
            matched: held.contains(&cert),
            importance: certification_importance(cert),
        })
        .collect()
}

fn keyword_suggestions(
    resume: &str,
    missing_skills: &[&str],
    experience: &ExperienceAnalysis,
    certifications: &[CertificationMatch],
    overall: f64,
) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if !missing_skills.is_empty() {
        let top = missing_skills
            .iter()
            .take(MISSING_SKILLS_IN_SUGGESTION)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        out.push(Suggestion {
            category: "skills".to_string(),
            priority: Importance::High,
            suggestion: format!("Add these critical missing skills: {top}"),
            specific_action: format!(
                "Include {top} in your skills section and provide examples of usage in your experience descriptions."
            ),
        });
    }

    if !experience.matched {
        match (experience.required_years, experience.found_years) {
            (Some(required), Some(found)) => out.push(suggestion(
                "experience",
                Importance::High,
                format!(
                    "You need {} more years of experience for this role",
                    required.saturating_sub(found)
                ),
                "Highlight relevant projects, internships, or freelance work that demonstrate equivalent experience.",
            )),
            (Some(required), None) => out.push(suggestion(
                "experience",
                Importance::High,
                format!(
                    "Clearly state your years of experience (requirement: {required}+ years)"
                ),
                "Add a clear statement of your total years of experience in your summary or experience section.",
            )),
            _ => {}
        }
    }

    if !experience.missing_job_titles.is_empty() {
        out.push(suggestion(
            "experience",
            Importance::Medium,
            format!(
                "Consider highlighting experience related to: {}",
                experience.missing_job_titles.join(", ")
            ),
            "Reframe your job titles or descriptions to align with the required roles if your experience is relevant.",
        ));
    }

    let missing_high_value: Vec<&str> = certifications
        .iter()
        .filter(|c| !c.matched && c.importance == Importance::High)
        .map(|c| c.certification.as_str())
        .collect();
    if !missing_high_value.is_empty() {
        out.push(suggestion(
            "certifications",
            Importance::Medium,
            format!(
                "Consider obtaining these certifications: {}",
                missing_high_value.join(", ")
            ),
            "Research and plan to obtain these industry-recognized certifications to strengthen your profile.",
        ));
    }

    if overall < 70.0 {
        out.push(suggestion(
            "general",
            Importance::High,
            "Your resume needs significant optimization for this job".to_string(),
            "Focus on incorporating more relevant keywords, quantifying achievements, and better aligning your experience with job requirements.",
        ));
    } else if overall < 85.0 {
        out.push(suggestion(
            "general",
            Importance::Low,
            "Good match! Consider minor optimizations for better alignment".to_string(),
            "Fine-tune keyword usage and ensure all relevant skills and experiences are clearly highlighted.",
        ));
    }

    out.extend(content_suggestions(resume));
    out
}

/// Length and contact checks that apply regardless of the job description.
fn content_suggestions(resume: &str) -> Vec<Suggestion> {
    let mut out = Vec::new();

    let words = word_count(resume);
    if words < BRIEF_RESUME_WORDS {
        out.push(suggestion(
            "content",
            Importance::Medium,
            "Your resume seems brief; expand on your experience and achievements".to_string(),
            "Add detail to each role: responsibilities, technologies used, and measurable outcomes.",
        ));
    } else if words > LONG_RESUME_WORDS {
        out.push(suggestion(
            "content",
            Importance::Low,
            "Your resume is quite lengthy; consider condensing it".to_string(),
            "Focus on the experiences most relevant to this role and trim older or unrelated entries.",
        ));
    }

    if extract_contact_info(resume).email.is_none() {
        out.push(suggestion(
            "contact",
            Importance::Medium,
            "Ensure your contact information is clearly visible".to_string(),
            "Put a professional email address and phone number at the top of your resume.",
        ));
    }

    out
}

/// Action verbs found in the resume, plus the JD's most frequent long words.
fn keyword_ats(resume: &str, jd: &str) -> BTreeMap<String, bool> {
    let resume_prepared = prepare(resume);
    let mut status: BTreeMap<String, bool> = ATS_ACTION_VERBS
        .iter()
        .map(|verb| (verb.to_string(), contains_term(&resume_prepared, verb)))
        .collect();

    let jd_terms: Vec<String> = extract_keywords(jd, usize::MAX)
        .into_iter()
        .filter(|w| w.chars().count() >= JD_ATS_MIN_LEN && w.chars().all(char::is_alphabetic))
        .filter(|w| !status.contains_key(w))
        .take(JD_ATS_KEYWORDS)
        .collect();
    for term in jd_terms {
        let present = contains_term(&resume_prepared, &term);
        status.insert(term, present);
    }

    status
}

// ────────────────────────────────────────────────────────────────────────────
// QuickMatchScorer — flat heuristics
// ────────────────────────────────────────────────────────────────────────────

/// Lightweight scorer: unweighted skill ratio and fixed experience/credential heuristics.
pub struct QuickMatchScorer;

#[async_trait]
impl MatchScorer for QuickMatchScorer {
    fn backend(&self) -> &'static str {
        "quick"
    }

    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisReport, AppError> {
        Ok(compute_quick_match(resume_text, job_description))
    }
}

fn compute_quick_match(resume: &str, jd: &str) -> AnalysisReport {
    let resume_skills = extract_skills(resume);
    let jd_skills = extract_skills(jd);
    let (matched, missing) = partition_skills(&resume_skills, &jd_skills);

    let skills_score = if jd_skills.is_empty() {
        0.0
    } else {
        matched.len() as f64 / jd_skills.len() as f64 * 100.0
    };

    let resume_prepared = prepare(resume);
    let has_any = |words: &[&str]| words.iter().any(|w| contains_term(&resume_prepared, w));
    let experience_score = if has_any(EXPERIENCE_KEYWORDS) { 85.0 } else { 75.0 };
    let certification_score = if has_any(CREDENTIAL_KEYWORDS) { 80.0 } else { 60.0 };

    let missing_names: Vec<String> = missing.iter().map(|s| s.name.to_string()).collect();

    let mut suggestions = Vec::new();
    if !missing_names.is_empty() {
        let top: Vec<&str> = missing_names.iter().take(3).map(String::as_str).collect();
        suggestions.push(suggestion(
            "skills",
            Importance::High,
            "Add missing technical skills to strengthen your profile".to_string(),
            &format!("Consider adding: {}", top.join(", ")),
        ));
    }
    if experience_score < 80.0 {
        suggestions.push(suggestion(
            "experience",
            Importance::Medium,
            "Highlight your work experience more prominently".to_string(),
            "Include specific years of experience and quantifiable achievements",
        ));
    }
    if certification_score < 70.0 {
        suggestions.push(suggestion(
            "certifications",
            Importance::Low,
            "Consider adding relevant certifications".to_string(),
            "Look into industry-standard certifications for your field",
        ));
    }

    ScoredMatch {
        breakdown: MatchBreakdown {
            skills_score,
            experience_score,
            certification_score,
        },
        matched_skills: matched
            .iter()
            .map(|s| SkillMatch {
                skill: s.name.to_string(),
                matched: true,
                importance: if QUICK_HIGH_IMPORTANCE.contains(&s.name) {
                    Importance::High
                } else {
                    Importance::Medium
                },
                category: Some(s.category),
            })
            .collect(),
        missing_skills: missing_names,
        experience: ExperienceAnalysis {
            matched: experience_score > 80.0,
            required_years: extract_experience_years(jd),
            found_years: extract_experience_years(resume),
            job_titles_matched: vec![],
            missing_job_titles: vec![],
        },
        certifications: vec![],
        suggestions,
        ats_keywords: quick_ats(resume, jd),
        semantic_matches: vec![],
    }
    .into_report("quick", resume, jd)
}

/// Fixed ATS terms, marked present when both documents use them.
fn quick_ats(resume: &str, jd: &str) -> BTreeMap<String, bool> {
    let resume_tokens = tokenize(resume);
    let jd_tokens = tokenize(jd);
    QUICK_ATS_TERMS
        .iter()
        .map(|term| {
            let shared = resume_tokens.iter().any(|t| t == term) && jd_tokens.iter().any(|t| t == term);
            (term.to_string(), shared)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
