use actix_web::{web, HttpResponse};

use crate::models::sensor::{SensorAck, SensorData};
use crate::services::SessionService;

#[tracing::instrument(
    name = "Update sensors",
    skip(data, service),
    fields(
        heart_rate = %data.heart_rate,
        wrist_angle = %data.wrist_angle
    )
)]
pub async fn update_sensors(
    data: web::Json<SensorData>,
    service: web::Data<SessionService>,
) -> HttpResponse {
    let buffered = service.ingest(data.into_inner()).await;
    tracing::debug!("Sensor sample received (buffered: {})", buffered);
    HttpResponse::Ok().json(SensorAck::received())
}
