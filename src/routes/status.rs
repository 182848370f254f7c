use actix_web::{get, web, HttpResponse};

use crate::handlers::status_handler;
use crate::services::SessionService;

#[get("/get-rehab-status")]
async fn get_rehab_status(service: web::Data<SessionService>) -> HttpResponse {
    status_handler::get_rehab_status(service).await
}

#[get("/exercise-overview")]
async fn get_exercise_overview(service: web::Data<SessionService>) -> HttpResponse {
    status_handler::get_exercise_overview(service).await
}

#[get("/sessions/{session_id}")]
async fn get_session_detail(
    path: web::Path<i64>,
    service: web::Data<SessionService>,
) -> HttpResponse {
    status_handler::get_session_detail(path, service).await
}
