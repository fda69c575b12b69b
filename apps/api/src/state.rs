use std::sync::Arc;

use crate::analysis::{build_scorer, MatchScorer};
use crate::config::Config;
use crate::extraction::UploadStore;
use crate::stats::UsageStats;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable match scorer. Default: KeywordMatchScorer. Swap via SCORER env.
    pub scorer: Arc<dyn MatchScorer>,
    pub uploads: UploadStore,
    pub stats: Arc<UsageStats>,
}

impl AppState {
    /// Wires the scorer, upload staging directory and stats from configuration.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let uploads = UploadStore::new(&config.upload_dir, config.max_upload_bytes)?;
        Ok(Self {
            scorer: build_scorer(config.scorer),
            uploads,
            stats: Arc::new(UsageStats::new()),
            config,
        })
    }
}
