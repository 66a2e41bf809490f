pub mod application;
pub mod event;
pub mod forum;
pub mod job;
pub mod notification;
pub mod placement;
pub mod ppt;
pub mod profile;
pub mod sqlx_repo;
pub mod token;
pub mod user;
