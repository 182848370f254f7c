use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod monitor;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::services::SessionService;

pub fn run(
    listener: TcpListener,
    session_service: SessionService,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer.
    // Every worker shares the same recorder.
    let session_service = web::Data::new(session_service);

    let server = HttpServer::new( move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(session_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
