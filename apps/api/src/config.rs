use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::analysis::scorer::ScorerKind;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_MB: u64 = 10;
const DEFAULT_PREVIEW_CHARS: usize = 500;
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub scorer: ScorerKind,
    /// Built SPA served for non-API paths when present.
    pub static_dir: Option<PathBuf>,
    pub preview_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let max_upload_mb = match lookup("MAX_UPLOAD_MB") {
            Some(raw) => raw
                .parse::<u64>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };
        if max_upload_mb == 0 {
            bail!("MAX_UPLOAD_MB must be greater than zero");
        }
        // The request body limit adds multipart overhead on top, so leave room for it in usize.
        let max_upload_bytes = max_upload_mb
            .checked_mul(BYTES_PER_MB)
            .filter(|bytes| {
                usize::try_from(*bytes)
                    .ok()
                    .and_then(|b| b.checked_add(BYTES_PER_MB as usize))
                    .is_some()
            })
            .with_context(|| format!("MAX_UPLOAD_MB {max_upload_mb} is too large"))?;

        let scorer = match lookup("SCORER") {
            Some(raw) => raw
                .parse::<ScorerKind>()
                .with_context(|| format!("SCORER '{raw}' is not a known scorer backend"))?,
            None => ScorerKind::default(),
        };

        let preview_chars = match lookup("PREVIEW_CHARS") {
            Some(raw) => raw
                .parse::<usize>()
                .context("PREVIEW_CHARS must be a non-negative integer")?,
            None => DEFAULT_PREVIEW_CHARS,
        };

        let upload_dir = lookup("UPLOAD_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("resume-analyzer-uploads"));

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            upload_dir,
            max_upload_bytes,
            scorer,
            static_dir: lookup("STATIC_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            preview_chars,
        })
    }

    pub fn max_upload_mb(&self) -> u64 {
        self.max_upload_bytes / BYTES_PER_MB
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.max_upload_mb(), 10);
        assert_eq!(config.scorer, ScorerKind::Keyword);
        assert_eq!(config.preview_chars, 500);
        assert!(config.static_dir.is_none());
        assert!(config.upload_dir.ends_with("resume-analyzer-uploads"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("MAX_UPLOAD_MB", "4"),
            ("SCORER", "quick"),
            ("STATIC_DIR", "/srv/www"),
            ("UPLOAD_DIR", "/var/tmp/up"),
            ("PREVIEW_CHARS", "120"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_upload_bytes, 4 * 1024 * 1024);
        assert_eq!(config.scorer, ScorerKind::Quick);
        assert_eq!(config.static_dir, Some(PathBuf::from("/srv/www")));
        assert_eq!(config.upload_dir, PathBuf::from("/var/tmp/up"));
        assert_eq!(config.preview_chars, 120);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_upload_limit_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("MAX_UPLOAD_MB", "0")])).is_err());
    }

    #[test]
    fn test_oversized_upload_limit_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("MAX_UPLOAD_MB", "18446744073709551615")]))
            .unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_MB"));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_unknown_scorer_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("SCORER", "llm")])).unwrap_err();
        assert!(err.to_string().contains("llm"));
    }

    #[test]
    fn test_blank_static_dir_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("STATIC_DIR", "  ")])).unwrap();
        assert!(config.static_dir.is_none());
    }
}
