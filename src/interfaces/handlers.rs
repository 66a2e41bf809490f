pub mod auth;
pub mod events;
pub mod forums;
pub mod home;
pub mod jobs;
pub mod notifications;
pub mod placements;
pub mod ppts;
pub mod profile;
pub mod system;
pub mod uploads;
