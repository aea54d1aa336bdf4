//! Admin HTML surface under `/admin/blog`.
//!
//! Every handler takes an [`Identity`](crate::middleware::auth::Identity),
//! so the whole surface requires a bearer token. Successful writes redirect
//! to the index with `303 See Other`; invalid submissions re-render the form
//! with status 422.

pub mod categories;
pub mod posts;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};

use blog_core::{DomainError, Payload, ValidationErrors};

use crate::middleware::error::{AppError, AppResult};

/// Submitted url-encoded form, in field order.
pub type FormFields = web::Form<Vec<(String, String)>>;

/// Field values and messages shown by a create/edit form.
#[derive(Debug, Default)]
pub struct FormState {
    values: Payload,
    errors: ValidationErrors,
}

impl FormState {
    pub fn new(values: Payload) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
        }
    }

    pub fn with_errors(values: Payload, errors: ValidationErrors) -> Self {
        Self { values, errors }
    }

    pub fn value(&self, field: &str) -> String {
        self.values.text(field).unwrap_or_default()
    }

    pub fn error(&self, field: &str) -> String {
        self.errors.messages(field).join(" ")
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn checked(&self, field: &str) -> bool {
        matches!(self.value(field).as_str(), "1" | "true" | "on")
    }

    pub fn selected(&self, field: &str, id: i64) -> bool {
        self.value(field) == id.to_string()
    }
}

/// One entry of a `<select>`.
#[derive(Debug)]
pub struct SelectOption {
    pub id: i64,
    pub title: String,
    pub selected: bool,
}

pub fn form_payload(form: FormFields) -> Payload {
    Payload::from_form(form.into_inner())
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Split a write result into "re-render with these messages" and the rest.
pub fn validation_or<T>(result: Result<T, DomainError>) -> AppResult<Result<T, ValidationErrors>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(DomainError::Validation(errors)) => Ok(Err(errors)),
        Err(other) => Err(AppError::from(other)),
    }
}

/// Configure the admin routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/blog")
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::index))
                    .route(web::post().to(posts::store)),
            )
            .route("/posts/create", web::get().to(posts::create))
            .route("/posts/{id:\\d+}/edit", web::get().to(posts::edit))
            .route("/posts/{id:\\d+}/delete", web::post().to(posts::destroy))
            .service(
                web::resource("/posts/{id:\\d+}")
                    .route(web::put().to(posts::update))
                    .route(web::patch().to(posts::update))
                    .route(web::post().to(posts::update))
                    .route(web::delete().to(posts::destroy)),
            )
            .service(
                web::resource("/categories")
                    .route(web::get().to(categories::index))
                    .route(web::post().to(categories::store)),
            )
            .route("/categories/create", web::get().to(categories::create))
            .route("/categories/{id:\\d+}/edit", web::get().to(categories::edit))
            .service(
                web::resource("/categories/{id:\\d+}")
                    .route(web::put().to(categories::update))
                    .route(web::patch().to(categories::update))
                    .route(web::post().to(categories::update)),
            ),
    );
}
