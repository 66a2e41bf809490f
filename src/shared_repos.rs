use std::sync::Arc;

use crate::repositories::{
    application::ApplicationRepository,
    event::EventRepository,
    forum::ForumRepository,
    job::JobRepository,
    notification::NotificationRepository,
    placement::PlacementRepository,
    ppt::PptRepository,
    profile::ProfileRepository,
    sqlx_repo::{
        SqlxApplicationRepo, SqlxEventRepo, SqlxForumRepo, SqlxJobRepo, SqlxNotificationRepo,
        SqlxPlacementRepo, SqlxPptRepo, SqlxProfileRepo, SqlxUserRepo,
    },
    user::UserRepository,
};

/// Every repository the application needs, behind trait objects so the
/// storage backend can be swapped.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub application_repo: Arc<dyn ApplicationRepository>,
    pub forum_repo: Arc<dyn ForumRepository>,
    pub ppt_repo: Arc<dyn PptRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub placement_repo: Arc<dyn PlacementRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
}

impl SharedRepositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: Arc::new(SqlxUserRepo::new(pool.clone())),
            profile_repo: Arc::new(SqlxProfileRepo::new(pool.clone())),
            job_repo: Arc::new(SqlxJobRepo::new(pool.clone())),
            application_repo: Arc::new(SqlxApplicationRepo::new(pool.clone())),
            forum_repo: Arc::new(SqlxForumRepo::new(pool.clone())),
            ppt_repo: Arc::new(SqlxPptRepo::new(pool.clone())),
            event_repo: Arc::new(SqlxEventRepo::new(pool.clone())),
            placement_repo: Arc::new(SqlxPlacementRepo::new(pool.clone())),
            notification_repo: Arc::new(SqlxNotificationRepo::new(pool)),
        }
    }
}
