use std::sync::Arc;

use actix_multipart::form::tempfile::TempFile;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::ppt::{Ppt, PptInsert, PptMetadata},
    errors::AppError,
    repositories::ppt::PptRepository,
    storage::uploads::UploadStore,
};

#[derive(Clone)]
pub struct PptHandler {
    pub ppt_repo: Arc<dyn PptRepository>,
    pub uploads: UploadStore,
}

impl PptHandler {
    pub fn new(ppt_repo: Arc<dyn PptRepository>, uploads: UploadStore) -> Self {
        PptHandler { ppt_repo, uploads }
    }

    pub async fn list_ppts(&self) -> Result<Vec<Ppt>, AppError> {
        self.ppt_repo.list_ppts().await
    }

    /// Validates the metadata and the file before anything is written.
    pub async fn upload_ppt(&self, metadata: PptMetadata, file: &TempFile, uploaded_by: &Uuid) -> Result<Ppt, AppError> {
        metadata.validate()?;
        let file_url = self.uploads.store_pdf("ppt", file).await?;

        let insert = PptInsert {
            company_name: metadata.company_name.trim().to_string(),
            file_url: file_url.clone(),
            uploaded_by: *uploaded_by,
        };
        match self.ppt_repo.create_ppt(&insert).await {
            Ok(ppt) => Ok(ppt),
            Err(e) => {
                self.uploads.remove(&file_url).await;
                Err(e)
            }
        }
    }

    pub async fn delete_ppt(&self, id: &Uuid) -> Result<(), AppError> {
        let ppt = self
            .ppt_repo
            .delete_ppt(id)
            .await?
            .ok_or_else(|| AppError::NotFound("PPT not found".into()))?;
        self.uploads.remove(&ppt.file_url).await;
        tracing::info!(ppt_id = %id, "PPT deleted");
        Ok(())
    }
}
