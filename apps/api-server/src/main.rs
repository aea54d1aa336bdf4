//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    if let Some(author) = config.default_author_id {
        tracing::warn!(
            user_id = author,
            "DEFAULT_AUTHOR_ID is set; unauthenticated post creation is attributed to it"
        );
    }

    // Build application state
    let state = AppState::new(&config).await;

    #[cfg(feature = "auth")]
    let token_service = config.jwt.as_ref().map(|jwt| {
        use std::sync::Arc;

        use blog_core::ports::TokenService;
        use blog_infra::{JwtConfig, JwtTokenService};

        let service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: jwt.secret.clone(),
            expiration_hours: jwt.expiration_hours,
            issuer: jwt.issuer.clone(),
        }));
        web::Data::new(service)
    });

    #[cfg(feature = "auth")]
    if token_service.is_none() {
        tracing::warn!("JWT_SECRET not set. Bearer authentication is disabled.");
    }

    #[cfg(not(feature = "auth"))]
    if config.jwt.is_some() {
        tracing::warn!("JWT_SECRET ignored: server built without the auth feature");
    }

    // Start HTTP server
    HttpServer::new(move || {
        let app = App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()));

        #[cfg(feature = "auth")]
        let app = match &token_service {
            Some(service) => app.app_data(service.clone()),
            None => app,
        };

        app.configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
