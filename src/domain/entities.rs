pub mod application;
pub mod event;
pub mod forum_post;
pub mod grade;
pub mod job;
pub mod notification;
pub mod option_fields;
pub mod placement;
pub mod ppt;
pub mod profile;
pub mod token;
pub mod user;
pub mod validation;
