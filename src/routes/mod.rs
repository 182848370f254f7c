use actix_web::web;

pub mod backend_health;
pub mod sensors;
pub mod session;
pub mod status;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Ingest and recording control
    cfg.service(sensors::update_sensors)
        .service(session::start_session)
        .service(session::stop_session);

    // Reporting
    cfg.service(status::get_rehab_status)
        .service(status::get_exercise_overview)
        .service(status::get_session_detail);
}
