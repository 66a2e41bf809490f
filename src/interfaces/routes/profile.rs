use actix_web::web;

use crate::handlers::profile;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(profile::get_profile)
        .service(profile::update_profile)
        .service(profile::upload_resume)
        .service(profile::get_student_profile)
        .service(profile::update_student_profile);
}
