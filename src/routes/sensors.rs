use actix_web::{post, web, HttpResponse};

use crate::handlers::sensor_handler;
use crate::models::sensor::SensorData;
use crate::services::SessionService;

#[post("/update-sensors")]
async fn update_sensors(
    data: web::Json<SensorData>,
    service: web::Data<SessionService>,
) -> HttpResponse {
    sensor_handler::update_sensors(data, service).await
}
