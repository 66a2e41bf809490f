use actix_web::web;

use crate::handlers::jobs;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // `/eligible` must be registered ahead of `/{id}`
    cfg.service(
        web::scope("/jobs")
            .service(jobs::list_jobs)
            .service(jobs::eligible_jobs)
            .service(jobs::create_job)
            .service(jobs::job_applications)
            .service(jobs::get_job)
            .service(jobs::update_job)
            .service(jobs::delete_job)
    );

    cfg.service(
        web::scope("/applications")
            .service(jobs::apply)
            .service(jobs::my_applications)
    );
}
