use actix_web::web;

use crate::handlers::{events, forums, notifications, placements, ppts};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/forums")
            .service(forums::list_posts)
            .service(forums::create_post)
            .service(forums::delete_post)
    );

    cfg.service(
        web::scope("/ppts")
            .service(ppts::list_ppts)
            .service(ppts::upload_ppt)
            .service(ppts::delete_ppt)
    );

    cfg.service(
        web::scope("/events")
            .service(events::list_events)
            .service(events::create_event)
            .service(events::get_event)
            .service(events::update_event)
            .service(events::delete_event)
    );

    cfg.service(
        web::scope("/placements")
            .service(placements::list_placements)
            .service(placements::placement_stats)
            .service(placements::record_placement)
    );

    cfg.service(
        web::scope("/notifications")
            .service(notifications::list_notifications)
            .service(notifications::broadcast_notification)
    );
}
