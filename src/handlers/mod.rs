use actix_web::HttpResponse;
use serde_json::json;

use crate::models::session::SessionError;

pub mod backend_health_handler;
pub mod sensor_handler;
pub mod session_handler;
pub mod status_handler;

pub(crate) fn session_error_response(error: &SessionError) -> HttpResponse {
    match error {
        SessionError::DatabaseNotConfigured => {
            tracing::error!("Request needs the database but none is configured");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Database not configured"
            }))
        }
        SessionError::NotFound(id) => HttpResponse::NotFound().json(json!({
            "status": "error",
            "message": format!("Session {} not found", id)
        })),
        SessionError::Database(e) => {
            tracing::error!("Database error: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Database error"
            }))
        }
    }
}
