use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{eligibility, entities, placement_stats, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, storage, utils};

use auth::jwt::JwtService;
use shared_repos::SharedRepositories;
use storage::uploads::UploadStore;
use use_cases::{
    access_gate::AccessGate,
    auth::AuthHandler,
    events::EventHandler,
    forum::ForumHandler,
    jobs::JobHandler,
    notifications::NotificationHandler,
    placements::PlacementHandler,
    ppts::PptHandler,
    profile::ProfileHandler,
};

pub struct AppState {
    pub gate: AccessGate,
    pub auth_handler: AuthHandler,
    pub profile_handler: ProfileHandler,
    pub job_handler: JobHandler,
    pub forum_handler: ForumHandler,
    pub ppt_handler: PptHandler,
    pub event_handler: EventHandler,
    pub placement_handler: PlacementHandler,
    pub notification_handler: NotificationHandler,
    pub uploads: UploadStore,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, repos: SharedRepositories) -> Self {
        let token_service = Arc::new(JwtService::new(config));
        let uploads = UploadStore::new(&config.upload_dir, config.max_upload_bytes);

        AppState {
            gate: AccessGate::new(token_service.clone()),
            auth_handler: AuthHandler::new(
                repos.user_repo.clone(),
                repos.profile_repo.clone(),
                token_service,
                config.allow_admin_signup,
            ),
            profile_handler: ProfileHandler::new(
                repos.profile_repo.clone(),
                repos.user_repo.clone(),
                uploads.clone(),
            ),
            job_handler: JobHandler::new(repos.job_repo, repos.profile_repo, repos.application_repo),
            forum_handler: ForumHandler::new(repos.forum_repo),
            ppt_handler: PptHandler::new(repos.ppt_repo, uploads.clone()),
            event_handler: EventHandler::new(repos.event_repo),
            placement_handler: PlacementHandler::new(repos.placement_repo),
            notification_handler: NotificationHandler::new(repos.notification_repo),
            uploads,
            secure_cookies: config.is_production(),
        }
    }
}
