pub mod access_gate;
pub mod auth;
pub mod events;
pub mod extractors;
pub mod forum;
pub mod jobs;
pub mod notifications;
pub mod placements;
pub mod ppts;
pub mod profile;
