use actix_web::{web, HttpResponse};

use crate::handlers::session_error_response;
use crate::services::SessionService;

pub async fn get_rehab_status(service: web::Data<SessionService>) -> HttpResponse {
    HttpResponse::Ok().json(service.status().await)
}

/// Last sessions plus a generated progress report over them.
#[tracing::instrument(name = "Get exercise overview", skip(service))]
pub async fn get_exercise_overview(service: web::Data<SessionService>) -> HttpResponse {
    match service.overview().await {
        Ok(overview) => {
            tracing::info!("Overview built from {} sessions", overview.history.len());
            HttpResponse::Ok().json(overview)
        }
        Err(e) => session_error_response(&e),
    }
}

#[tracing::instrument(name = "Get session detail", skip(service))]
pub async fn get_session_detail(
    path: web::Path<i64>,
    service: web::Data<SessionService>,
) -> HttpResponse {
    match service.session_detail(path.into_inner()).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => session_error_response(&e),
    }
}
