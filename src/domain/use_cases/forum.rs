use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::forum_post::{ForumPost, ForumPostWithAuthor, NewForumPostRequest},
    errors::AppError,
    repositories::forum::ForumRepository,
};

#[derive(Clone)]
pub struct ForumHandler {
    pub forum_repo: Arc<dyn ForumRepository>,
}

impl ForumHandler {
    pub fn new(forum_repo: Arc<dyn ForumRepository>) -> Self {
        ForumHandler { forum_repo }
    }

    pub async fn list_posts(&self) -> Result<Vec<ForumPostWithAuthor>, AppError> {
        self.forum_repo.list_posts().await
    }

    pub async fn create_post(&self, request: NewForumPostRequest, author_id: &Uuid) -> Result<ForumPost, AppError> {
        request.validate()?;
        let insert = request.prepare_for_insert(*author_id);
        if insert.content.trim().is_empty() {
            return Err(AppError::field("content", "Content is empty after removing markup"));
        }
        self.forum_repo.create_post(&insert).await
    }

    pub async fn delete_post(&self, id: &Uuid) -> Result<(), AppError> {
        if !self.forum_repo.delete_post(id).await? {
            return Err(AppError::NotFound("Forum post not found".into()));
        }
        tracing::info!(post_id = %id, "Forum post removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::forum::MockForumRepository;

    #[actix_rt::test]
    async fn script_only_content_is_rejected() {
        let mut repo = MockForumRepository::new();
        repo.expect_create_post().never();

        let request = NewForumPostRequest {
            company_name: "Infosys".into(),
            title: "Aptitude round".into(),
            content: "<script>alert(1)</script>".into(),
        };
        let err = ForumHandler::new(Arc::new(repo))
            .create_post(request, &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
