use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::extraction::SUPPORTED_EXTENSIONS;

/// Running totals for analyses served by this process.
#[derive(Debug, Default)]
pub struct UsageStats {
    inner: Mutex<Totals>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    analyses: u64,
    score_sum: f64,
    elapsed: Duration,
}

/// GET /api/stats payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_analyses: u64,
    pub average_score: f64,
    pub supported_formats: Vec<String>,
    pub max_file_size: String,
    pub avg_processing_time: String,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, overall_score: f64, elapsed: Duration) {
        let mut totals = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        totals.analyses += 1;
        totals.score_sum += overall_score;
        totals.elapsed += elapsed;
    }

    pub fn snapshot(&self, max_upload_mb: u64) -> StatsResponse {
        let totals = *self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let (average_score, avg_secs) = if totals.analyses == 0 {
            (0.0, 0.0)
        } else {
            let n = totals.analyses as f64;
            (
                (totals.score_sum / n * 10.0).round() / 10.0,
                totals.elapsed.as_secs_f64() / n,
            )
        };

        StatsResponse {
            total_analyses: totals.analyses,
            average_score,
            supported_formats: SUPPORTED_EXTENSIONS
                .iter()
                .map(|e| e.to_ascii_uppercase())
                .collect(),
            max_file_size: format!("{max_upload_mb}MB"),
            avg_processing_time: format!("{avg_secs:.3}s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let stats = UsageStats::new();
        let snap = stats.snapshot(10);
        assert_eq!(snap.total_analyses, 0);
        assert_eq!(snap.average_score, 0.0);
        assert_eq!(snap.supported_formats, vec!["PDF", "DOCX", "DOC", "TXT"]);
        assert_eq!(snap.max_file_size, "10MB");
        assert_eq!(snap.avg_processing_time, "0.000s");
    }

    #[test]
    fn test_running_averages() {
        let stats = UsageStats::new();
        stats.record(80.0, Duration::from_millis(100));
        stats.record(65.0, Duration::from_millis(300));
        let snap = stats.snapshot(5);
        assert_eq!(snap.total_analyses, 2);
        assert_eq!(snap.average_score, 72.5);
        assert_eq!(snap.avg_processing_time, "0.200s");
        assert_eq!(snap.max_file_size, "5MB");
    }
}
