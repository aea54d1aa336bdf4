//! HTTP handlers and route configuration.

mod admin;
mod categories;
mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(form_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/blog")
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::index))
                        .route(web::post().to(posts::store)),
                )
                .route("/posts/check-slug", web::post().to(posts::check_slug))
                .service(
                    web::resource("/categories")
                        .route(web::get().to(categories::index))
                        .route(web::post().to(categories::store)),
                )
                .route("/categories/check-slug", web::post().to(categories::check_slug))
                .service(
                    web::resource("/categories/{id:\\d+}")
                        .route(web::get().to(categories::show))
                        .route(web::put().to(categories::update))
                        .route(web::delete().to(categories::destroy)),
                ),
        )
        .service(
            web::resource("/posts/{id:\\d+}")
                .route(web::get().to(posts::show))
                .route(web::patch().to(posts::update))
                .route(web::delete().to(posts::destroy)),
        )
        .configure(admin::configure);
}

/// Malformed or non-object JSON bodies become 400 problem responses.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

#[cfg(test)]
mod tests;
