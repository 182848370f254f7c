use actix_web::{post, web, HttpResponse};

use crate::handlers::session_handler;
use crate::services::SessionService;

#[post("/start-session")]
async fn start_session(service: web::Data<SessionService>) -> HttpResponse {
    session_handler::start_session(service).await
}

#[post("/stop-session")]
async fn stop_session(service: web::Data<SessionService>) -> HttpResponse {
    session_handler::stop_session(service).await
}
