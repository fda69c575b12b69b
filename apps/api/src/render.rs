//! Plain-text rendering of analysis reports for terminals.

use std::fmt::Write;

use crate::analysis::AnalysisReport;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "excellent",
            ScoreCategory::Good => "good",
            ScoreCategory::Fair => "fair",
            ScoreCategory::Poor => "poor",
        }
    }
}

pub fn score_category(score: f64) -> ScoreCategory {
    if score >= 85.0 {
        ScoreCategory::Excellent
    } else if score >= 70.0 {
        ScoreCategory::Good
    } else if score >= 50.0 {
        ScoreCategory::Fair
    } else {
        ScoreCategory::Poor
    }
}

pub fn score_description(score: f64) -> &'static str {
    match score_category(score) {
        ScoreCategory::Excellent => "Excellent match! Your resume aligns very well with this job.",
        ScoreCategory::Good => "Good match! Minor optimizations could improve your chances.",
        ScoreCategory::Fair => "Fair match. Consider significant improvements to better align.",
        ScoreCategory::Poor => "Poor match. Major changes needed to meet job requirements.",
    }
}

/// `[#########-----------]  45.0%`
pub fn score_bar(score: f64) -> String {
    let clamped = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        clamped
    )
}

/// Renders the overview, skills, recommendations and ATS sections.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    if let Err(err) = write_report(&mut out, report) {
        tracing::warn!("Report rendering stopped early: {err}");
    }
    out
}

fn write_report(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    write_overview(out, report)?;
    write_skills(out, report)?;
    write_recommendations(out, report)?;
    write_ats(out, report)
}

fn write_overview(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    let score = report.overall_score;
    writeln!(out, "== Overview ==")?;
    writeln!(
        out,
        "Overall match: {score:.1}% ({})",
        score_category(score).as_str()
    )?;
    writeln!(out, "{}", score_description(score))?;
    writeln!(out)?;

    let breakdown = &report.match_breakdown;
    writeln!(out, "  {:<16}{}", "Skills", score_bar(breakdown.skills_score))?;
    writeln!(out, "  {:<16}{}", "Experience", score_bar(breakdown.experience_score))?;
    writeln!(
        out,
        "  {:<16}{}",
        "Certifications",
        score_bar(breakdown.certification_score)
    )?;
    writeln!(out, "  {:<16}{}", "Text similarity", score_bar(report.text_similarity))?;

    if let Some(exp) = &report.experience_analysis {
        let years = |y: Option<u32>| y.map_or("not stated".to_string(), |y| format!("{y} years"));
        writeln!(
            out,
            "  Experience: found {}, required {}{}",
            years(exp.found_years),
            years(exp.required_years),
            if exp.matched { " (met)" } else { "" }
        )?;
    }
    writeln!(out)
}

fn write_skills(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(out, "== Skills Analysis ==")?;

    writeln!(out, "Matched skills ({}):", report.matched_skills.len())?;
    if report.matched_skills.is_empty() {
        writeln!(out, "  none")?;
    }
    for skill in &report.matched_skills {
        writeln!(out, "  + {} [{:?}]", skill.skill, skill.importance)?;
    }

    writeln!(out, "Missing skills ({}):", report.missing_skills.len())?;
    if report.missing_skills.is_empty() {
        writeln!(out, "  none, every requested skill was found")?;
    }
    for skill in &report.missing_skills {
        writeln!(out, "  - {skill}")?;
    }

    if !report.semantic_matches.is_empty() {
        writeln!(out, "Related skills:")?;
        for m in &report.semantic_matches {
            writeln!(
                out,
                "  ~ {} for {} ({:.0}% similar)",
                m.resume_skill,
                m.jd_skill,
                m.similarity * 100.0
            )?;
        }
    }
    writeln!(out)
}

fn write_recommendations(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(out, "== Recommendations ==")?;
    if report.detailed_suggestions.is_empty() {
        writeln!(out, "  No changes suggested.")?;
    }
    for (i, s) in report.detailed_suggestions.iter().enumerate() {
        let priority = format!("{:?}", s.priority).to_uppercase();
        writeln!(out, "{}. [{priority}] {}: {}", i + 1, s.category, s.suggestion)?;
        writeln!(out, "   -> {}", s.specific_action)?;
    }
    writeln!(out)
}

fn write_ats(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(out, "== ATS Keywords ==")?;
    writeln!(
        out,
        "Found {} of {} keywords",
        report.ats_hits(),
        report.ats_keywords.len()
    )?;
    for (keyword, present) in &report.ats_keywords {
        writeln!(out, "  [{}] {keyword}", if *present { "x" } else { " " })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_scorer, ScorerKind};

    #[test]
    fn test_score_category_boundaries() {
        assert_eq!(score_category(85.0), ScoreCategory::Excellent);
        assert_eq!(score_category(84.9), ScoreCategory::Good);
        assert_eq!(score_category(70.0), ScoreCategory::Good);
        assert_eq!(score_category(69.9), ScoreCategory::Fair);
        assert_eq!(score_category(50.0), ScoreCategory::Fair);
        assert_eq!(score_category(49.9), ScoreCategory::Poor);
    }

    #[test]
    fn test_score_description() {
        assert!(score_description(90.0).starts_with("Excellent match!"));
        assert!(score_description(10.0).starts_with("Poor match."));
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(50.0), "[##########----------]  50.0%");
        assert_eq!(score_bar(100.0), "[####################] 100.0%");
        assert_eq!(score_bar(-5.0), "[--------------------]   0.0%");
    }

    #[tokio::test]
    async fn test_render_report_sections() {
        let report = build_scorer(ScorerKind::Keyword)
            .score(
                "Python developer with 2 years of experience. Developed APIs.",
                "Python and Kubernetes engineer, 5+ years of experience",
            )
            .await
            .unwrap();
        let text = render_report(&report);

        for header in [
            "== Overview ==",
            "== Skills Analysis ==",
            "== Recommendations ==",
            "== ATS Keywords ==",
        ] {
            assert!(text.contains(header), "missing {header}");
        }
        assert!(text.contains("  + Python [High]"));
        assert!(text.contains("  - Kubernetes"));
        assert!(text.contains("found 2 years, required 5 years"));
        assert!(text.contains("[x] developed"));
        assert!(text.contains("[HIGH] skills"));
    }

    #[tokio::test]
    async fn test_sections_render_in_order() {
        let report = build_scorer(ScorerKind::Quick)
            .score("Rust developer", "Rust and Go engineer")
            .await
            .unwrap();
        let mut out = String::new();
        write_report(&mut out, &report).unwrap();
        assert_eq!(out, render_report(&report));

        let positions: Vec<usize> = [
            "== Overview ==",
            "== Skills Analysis ==",
            "== Recommendations ==",
            "== ATS Keywords ==",
        ]
        .iter()
        .map(|h| out.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
