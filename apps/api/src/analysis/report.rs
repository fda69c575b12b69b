//! Wire types for analysis results. Shared by the server and the API client.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::catalog::{Importance, SkillCategory};
use crate::extraction::text::{ContactInfo, ResumeSection};

pub type Priority = Importance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub matched: bool,
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub skills_score: f64,
    pub experience_score: f64,
    pub certification_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAnalysis {
    pub matched: bool,
    pub required_years: Option<u32>,
    pub found_years: Option<u32>,
    #[serde(default)]
    pub job_titles_matched: Vec<String>,
    #[serde(default)]
    pub missing_job_titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationMatch {
    pub certification: String,
    pub matched: bool,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub priority: Priority,
    pub suggestion: String,
    pub specific_action: String,
}

/// A JD skill the resume lacks, paired with a close resume skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub resume_skill: String,
    pub jd_skill: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub contact: ContactInfo,
    pub sections_found: Vec<ResumeSection>,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    /// "keyword" | "quick"
    pub scorer_backend: String,
    pub overall_score: f64,
    pub match_breakdown: MatchBreakdown,
    pub matched_skills: Vec<SkillMatch>,
    pub missing_skills: Vec<String>,
    pub experience_analysis: Option<ExperienceAnalysis>,
    #[serde(default)]
    pub certification_analysis: Vec<CertificationMatch>,
    pub detailed_suggestions: Vec<Suggestion>,
    pub ats_keywords: BTreeMap<String, bool>,
    pub semantic_matches: Vec<SemanticMatch>,
    /// Document-level lexical similarity, 0–100.
    #[serde(default)]
    pub text_similarity: f64,
    #[serde(default)]
    pub resume_profile: ResumeProfile,
}

impl AnalysisReport {
    pub fn ats_hits(&self) -> usize {
        self.ats_keywords.values().filter(|present| **present).count()
    }
}

/// Rounds to one decimal and clamps into the 0–100 score range.
pub fn round_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    ((score.clamp(0.0, 100.0)) * 10.0).round() / 10.0
}
