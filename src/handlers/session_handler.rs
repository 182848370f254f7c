use actix_web::{web, HttpResponse};

use crate::handlers::session_error_response;
use crate::models::session::SessionMessage;
use crate::services::{SessionService, StopResult};

#[tracing::instrument(name = "Start session", skip(service))]
pub async fn start_session(service: web::Data<SessionService>) -> HttpResponse {
    service.start().await;
    HttpResponse::Ok().json(SessionMessage::new("Session started"))
}

#[tracing::instrument(name = "Stop session request", skip(service))]
pub async fn stop_session(service: web::Data<SessionService>) -> HttpResponse {
    match service.stop().await {
        Ok(StopResult::NotActive) => {
            HttpResponse::Ok().json(SessionMessage::new("Session was not active."))
        }
        Ok(StopResult::NoData) => HttpResponse::Ok().json(SessionMessage::new("No data recorded")),
        Ok(StopResult::Saved(response)) => {
            tracing::info!("SAVED SESSION ID {}", response.session_id);
            HttpResponse::Ok().json(response)
        }
        Err(e) => session_error_response(&e),
    }
}
