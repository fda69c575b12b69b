use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind, Upload};

/// Text pulled out of a staged upload.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub filename: String,
    pub kind: DocumentKind,
    pub text: String,
}

/// Stages uploads on disk under the configured directory and extracts their text.
/// Staged files are self-deleting: they are removed when extraction finishes,
/// whether it succeeded or not.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: u64,
}

impl UploadStore {
    /// Creates the staging directory if needed.
    pub fn new(dir: impl Into<PathBuf>, max_bytes: u64) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;
        info!("Upload staging directory: {}", dir.display());
        Ok(Self { dir, max_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validates, stages and extracts an upload. Extraction runs on the blocking pool.
    pub async fn process(&self, upload: Upload) -> Result<ExtractedDocument, AppError> {
        let kind = upload.validate(self.max_bytes)?;
        let dir = self.dir.clone();
        let filename = upload.filename.clone();

        let text = tokio::task::spawn_blocking(move || stage_and_extract(&dir, kind, &upload))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

        debug!(
            "Extracted {} chars from {} ({})",
            text.chars().count(),
            filename,
            kind
        );

        Ok(ExtractedDocument {
            filename,
            kind,
            text,
        })
    }
}

fn stage_and_extract(dir: &Path, kind: DocumentKind, upload: &Upload) -> Result<String, AppError> {
    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&format!(".{}", kind.extension()))
        .tempfile_in(dir)
        .context("Failed to stage upload")?;

    write_staged(&mut staged, &upload.bytes)?;
    debug!("Staged {} at {}", upload.filename, staged.path().display());

    let mut contents = Vec::with_capacity(upload.bytes.len());
    staged
        .as_file_mut()
        .read_to_end(&mut contents)
        .context("Failed to read staged upload")?;

    // `staged` drops at the end of this scope, removing the file.
    extract_text(kind, &contents)
}

fn write_staged(staged: &mut NamedTempFile, bytes: &[u8]) -> Result<(), AppError> {
    let file = staged.as_file_mut();
    file.write_all(bytes).context("Failed to write staged upload")?;
    file.flush().context("Failed to flush staged upload")?;
    file.seek(SeekFrom::Start(0))
        .context("Failed to rewind staged upload")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_process_txt_upload_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), 1024 * 1024).unwrap();

        let doc = store
            .process(Upload::new("resume.txt", "Rust engineer\n\nAWS"))
            .await
            .unwrap();

        assert_eq!(doc.kind, DocumentKind::Txt);
        assert_eq!(doc.filename, "resume.txt");
        assert_eq!(doc.text, "Rust engineer\nAWS");
        assert_eq!(staged_files(store.dir()), 0);
    }

    #[tokio::test]
    async fn test_failed_extraction_still_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), 1024 * 1024).unwrap();

        let err = store
            .process(Upload::new("resume.pdf", "not a pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Extraction(_)));
        assert_eq!(staged_files(store.dir()), 0);
    }

    #[tokio::test]
    async fn test_rejects_before_staging() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), 4).unwrap();

        let err = store
            .process(Upload::new("resume.txt", "too many bytes"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));

        let err = store
            .process(Upload::new("resume.exe", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }
}
