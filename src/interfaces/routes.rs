use actix_web::web;

use crate::handlers::{home::home, system::health_check, uploads::serve_upload};

mod auth;
mod community;
mod jobs;
mod json_error;
mod profile;

pub fn configure_routes(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.configure(|c| json_error::config_routes(c, max_upload_bytes));

    cfg.service(home);
    cfg.service(health_check);
    cfg.service(serve_upload);

    cfg.service(
        web::scope("/api")
            .configure(auth::config_routes)
            .configure(profile::config_routes)
            .configure(jobs::config_routes)
            .configure(community::config_routes)
    );
}
