//! Typed HTTP client for the resume analysis API.
//!
//! Mirrors the browser flow: validate the file locally, send it (or pasted text)
//! with a job description, and map failure statuses onto user-facing errors.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::AnalysisReport;
use crate::extraction::handlers::UploadResponse;
use crate::extraction::{INVALID_FORMAT_MESSAGE, SUPPORTED_EXTENSIONS};
use crate::routes::health::HealthResponse;
use crate::stats::StatsResponse;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Client-side upload limit, checked before anything is sent.
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const FILE_TOO_LARGE_MESSAGE: &str = "File too large. Please select a file smaller than 10MB.";
const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    FileTooLarge(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Server error. Please try again later. (status {status}: {message})")]
    Server { status: u16, message: String },

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(err)
        }
    }
}

/// Where the resume comes from.
#[derive(Debug, Clone)]
pub enum ResumeInput {
    File(PathBuf),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health_check(&self) -> Result<HealthResponse, ClientError> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        decode(response).await
    }

    /// Uploads a resume file for text extraction only.
    pub async fn upload_resume(&self, path: &Path) -> Result<UploadResponse, ClientError> {
        let form = multipart::Form::new().part("file", file_part(path).await?);
        let response = self
            .client
            .post(self.url("/api/upload-resume"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    /// Scores a resume against a job description.
    pub async fn analyze(
        &self,
        resume: ResumeInput,
        job_description: &str,
    ) -> Result<AnalysisReport, ClientError> {
        let form = multipart::Form::new().text("job_description", job_description.to_string());
        let form = match resume {
            ResumeInput::File(path) => form.part("resume_file", file_part(&path).await?),
            ResumeInput::Text(text) => form.text("resume_text", text),
        };

        debug!("POST {}", self.url("/api/analyze"));
        let response = self
            .client
            .post(self.url("/api/analyze"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn skills(&self) -> Result<BTreeMap<String, Vec<String>>, ClientError> {
        let response = self.client.get(self.url("/api/skills")).send().await?;
        decode(response).await
    }

    pub async fn stats(&self) -> Result<StatsResponse, ClientError> {
        let response = self.client.get(self.url("/api/stats")).send().await?;
        decode(response).await
    }
}

/// Reads and validates a local file, ready to attach to a multipart form.
async fn file_part(path: &Path) -> Result<multipart::Part, ClientError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !is_valid_file_type(&filename) {
        return Err(ClientError::InvalidFormat(INVALID_FORMAT_MESSAGE.to_string()));
    }

    let io_err = |source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = tokio::fs::metadata(path).await.map_err(io_err)?.len();
    if !is_valid_file_size(size) {
        return Err(ClientError::FileTooLarge(FILE_TOO_LARGE_MESSAGE.to_string()));
    }

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    Ok(multipart::Part::bytes(bytes).file_name(filename))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    warn!("API returned {}: {}", status, message);

    let or_default = |fallback: &str| {
        if message.is_empty() {
            fallback.to_string()
        } else {
            message.clone()
        }
    };

    Err(match status.as_u16() {
        413 => ClientError::FileTooLarge(or_default(FILE_TOO_LARGE_MESSAGE)),
        422 => ClientError::InvalidFormat(or_default(INVALID_FORMAT_MESSAGE)),
        code if code >= 500 => ClientError::Server {
            status: code,
            message: or_default(SERVER_ERROR_MESSAGE),
        },
        code => ClientError::Api {
            status: code,
            message,
        },
    })
}

/// True for the extensions the API accepts, case-insensitively.
pub fn is_valid_file_type(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

pub fn is_valid_file_size(bytes: u64) -> bool {
    bytes <= MAX_FILE_SIZE_BYTES
}

/// Human-readable size, e.g. `"0 Bytes"`, `"1.5 KB"`, `"10 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[unit])
}
