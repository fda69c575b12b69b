pub mod catalog;
pub mod extract;
pub mod handlers;
pub mod report;
pub mod scorer;
pub mod similarity;

use std::time::Instant;

use tracing::info;

use crate::errors::AppError;
use crate::stats::UsageStats;

pub use report::AnalysisReport;
pub use scorer::{build_scorer, MatchScorer, ScorerKind};

pub const EMPTY_RESUME_MESSAGE: &str = "Resume text is empty. Please provide resume content.";
pub const EMPTY_JD_MESSAGE: &str = "Job description is empty. Please provide job description.";

/// Scores a resume against a job description and records the run in `stats`.
pub async fn analyze(
    scorer: &dyn MatchScorer,
    stats: &UsageStats,
    resume_text: &str,
    job_description: &str,
) -> Result<AnalysisReport, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_RESUME_MESSAGE.to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_JD_MESSAGE.to_string()));
    }

    let started = Instant::now();
    let report = scorer.score(resume_text, job_description).await?;
    let elapsed = started.elapsed();
    stats.record(report.overall_score, elapsed);

    info!(
        "Analysis {} ({}): overall={} matched={} missing={} in {:?}",
        report.analysis_id,
        report.scorer_backend,
        report.overall_score,
        report.matched_skills.len(),
        report.missing_skills.len(),
        elapsed
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_analyze_rejects_blank_inputs() {
        let scorer = build_scorer(ScorerKind::Keyword);
        let stats = UsageStats::new();

        let err = analyze(scorer.as_ref(), &stats, "   ", "Python developer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == EMPTY_RESUME_MESSAGE));

        let err = analyze(scorer.as_ref(), &stats, "Python developer", "\n")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == EMPTY_JD_MESSAGE));

        assert_eq!(stats.snapshot(10).total_analyses, 0);
    }

    #[tokio::test]
    async fn test_analyze_records_stats() {
        let scorer = build_scorer(ScorerKind::Quick);
        let stats = UsageStats::new();

        let report = analyze(
            scorer.as_ref(),
            &stats,
            "Python developer with 3 years of experience",
            "Python and Docker",
        )
        .await
        .unwrap();

        let snap = stats.snapshot(10);
        assert_eq!(snap.total_analyses, 1);
        assert_eq!(snap.average_score, report.overall_score);
    }
}
