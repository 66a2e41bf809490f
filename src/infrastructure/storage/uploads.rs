use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use chrono::Utc;
use rand::Rng;
use tokio::fs;

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";
const URL_PREFIX: &str = "/uploads/";

/// PDF files stored on local disk and served back under `/uploads/`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        UploadStore { root: root.into(), max_bytes }
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Rejects anything that is not a PDF within the size limit. `head` is
    /// the start of the file content, used to check the magic bytes.
    pub fn check_pdf(&self, declared: Option<&str>, size: usize, head: &[u8]) -> Result<(), AppError> {
        if size == 0 {
            return Err(AppError::InvalidInput("Uploaded file is empty".into()));
        }
        if size > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        if declared != Some(PDF_MIME) {
            return Err(AppError::InvalidContentType("Only PDF files are allowed".into()));
        }
        match infer::get(head) {
            Some(kind) if kind.mime_type() == PDF_MIME => Ok(()),
            _ => Err(AppError::InvalidContentType("File content is not a PDF".into())),
        }
    }

    /// Validates a multipart file and copies it into the store, returning
    /// the public URL.
    pub async fn store_pdf(&self, field: &str, file: &TempFile) -> Result<String, AppError> {
        let declared = file.content_type.as_ref().map(|m| m.essence_str());
        let head = read_head(file.file.path()).await?;
        self.check_pdf(declared, file.size, &head)?;
        self.persist(field, file.file.path()).await
    }

    pub async fn persist(&self, field: &str, source: &Path) -> Result<String, AppError> {
        let file_name = unique_file_name(field);
        fs::copy(source, self.root.join(&file_name)).await?;
        tracing::info!(file_name = %file_name, "Stored upload");
        Ok(format!("{URL_PREFIX}{file_name}"))
    }

    /// Maps a requested file name to a path inside the store. Names that
    /// could escape the directory are rejected.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, AppError> {
        let is_plain = !file_name.is_empty()
            && !file_name.contains(['/', '\\', '"'])
            && !file_name.chars().any(char::is_control)
            && !file_name.contains("..")
            && !file_name.starts_with('.');
        if !is_plain {
            return Err(AppError::InvalidInput("Invalid file name".into()));
        }
        Ok(self.root.join(file_name))
    }

    /// Deletes the file behind a stored URL. Failures are logged only.
    pub async fn remove(&self, file_url: &str) {
        let Some(file_name) = file_url.strip_prefix(URL_PREFIX) else {
            tracing::warn!(file_url, "Not an upload URL, nothing to remove");
            return;
        };
        match self.resolve(file_name) {
            Ok(path) => {
                if let Err(e) = fs::remove_file(&path).await {
                    tracing::warn!(file_url, "Failed to remove upload: {}", e);
                }
            }
            Err(_) => tracing::warn!(file_url, "Refusing to remove upload with unsafe name"),
        }
    }
}

async fn read_head(path: &Path) -> Result<Vec<u8>, AppError> {
    use tokio::io::AsyncReadExt;

    let mut head = Vec::with_capacity(512);
    fs::File::open(path).await?.take(512).read_to_end(&mut head).await?;
    Ok(head)
}

fn unique_file_name(field: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(100_000_000..1_000_000_000);
    format!("{}-{}-{}.pdf", field, Utc::now().timestamp_millis(), suffix)
}
