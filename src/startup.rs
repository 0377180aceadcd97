use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;

use crate::configuration::JwtSettings;
use crate::logger::RequestLogger;
use crate::middleware::JwtMiddleware;
use crate::routes::{
    get_joke, get_preferences, health_check, login, refresh, submit_feedback, update_preferences,
};

pub fn run(
    listener: TcpListener,
    connection: PgPool,
    jwt_config: JwtSettings,
) -> Result<Server, std::io::Error> {
    let connection = web::Data::new(connection);
    let jwt_config_data = web::Data::new(jwt_config.clone());

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(RequestLogger)
            // Shared state
            .app_data(connection.clone())
            .app_data(jwt_config_data.clone())
            // Public routes (no authentication required)
            .route("/health_check", web::get().to(health_check))
            .route("/auth/login", web::post().to(login))
            .route("/auth/refresh", web::post().to(refresh))
            .route("/joke", web::get().to(get_joke))
            .route("/feedback", web::post().to(submit_feedback))
            // Protected routes (require JWT authentication)
            .service(
                web::scope("/preferences")
                    .wrap(JwtMiddleware::new(jwt_config.clone()))
                    .route("", web::get().to(get_preferences))
                    .route("/update", web::put().to(update_preferences)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
