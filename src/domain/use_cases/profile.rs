use std::sync::Arc;

use actix_multipart::form::tempfile::TempFile;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{
        profile::{ProfileChanges, StudentProfile, UpdateProfileRequest},
        user::Role,
    },
    errors::AppError,
    repositories::{profile::ProfileRepository, user::UserRepository},
    storage::uploads::UploadStore,
};

#[derive(Clone)]
pub struct ProfileHandler {
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub uploads: UploadStore,
}

impl ProfileHandler {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        user_repo: Arc<dyn UserRepository>,
        uploads: UploadStore,
    ) -> Self {
        ProfileHandler { profile_repo, user_repo, uploads }
    }

    pub async fn get_profile(&self, user_id: &Uuid) -> Result<Option<StudentProfile>, AppError> {
        self.profile_repo.get_profile(user_id).await
    }

    /// Applies a partial update, creating the profile on first write.
    pub async fn update_profile(&self, user_id: &Uuid, request: UpdateProfileRequest) -> Result<StudentProfile, AppError> {
        request.validate()?;
        let changes = ProfileChanges::from(request);
        let profile = self.profile_repo.upsert_profile(user_id, &changes).await?;
        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(profile)
    }

    /// Stores the PDF and records its URL on the profile. The stored file is
    /// removed again if the profile cannot be written.
    pub async fn upload_resume(&self, user_id: &Uuid, file: &TempFile) -> Result<String, AppError> {
        let file_url = self.uploads.store_pdf("resume", file).await?;

        match self
            .profile_repo
            .upsert_profile(user_id, &ProfileChanges::resume(file_url.clone()))
            .await
        {
            Ok(_) => {
                tracing::info!(user_id = %user_id, "Resume attached");
                Ok(file_url)
            }
            Err(e) => {
                self.uploads.remove(&file_url).await;
                Err(e)
            }
        }
    }

    pub async fn get_student_profile(&self, student_id: &Uuid) -> Result<Option<StudentProfile>, AppError> {
        self.ensure_student(student_id).await?;
        self.profile_repo.get_profile(student_id).await
    }

    pub async fn update_student_profile(
        &self,
        student_id: &Uuid,
        request: UpdateProfileRequest,
    ) -> Result<StudentProfile, AppError> {
        self.ensure_student(student_id).await?;
        self.update_profile(student_id, request).await
    }

    async fn ensure_student(&self, user_id: &Uuid) -> Result<(), AppError> {
        match self.user_repo.get_user_by_id(user_id).await? {
            Some(user) if user.role == Role::Student => Ok(()),
            _ => Err(AppError::NotFound("Student not found".into())),
        }
    }
}
