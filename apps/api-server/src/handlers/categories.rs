//! Public category endpoints.

use actix_web::{HttpResponse, web};

use blog_core::Payload;
use blog_core::domain::CategoryId;
use blog_shared::MessageResponse;
use blog_shared::dto::{CheckSlugRequest, CheckSlugResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /blog/categories
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// POST /blog/categories
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    let category = state.categories.create(&body).await?;
    Ok(HttpResponse::Created().json(category))
}

/// GET /blog/categories/{id}
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// PUT /blog/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    let category = state.categories.update(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /blog/categories/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
) -> AppResult<HttpResponse> {
    state.categories.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(state.locale.category_deleted())))
}

/// POST /blog/categories/check-slug
pub async fn check_slug(
    state: web::Data<AppState>,
    body: web::Json<CheckSlugRequest>,
) -> AppResult<HttpResponse> {
    let exists = state.categories.slug_exists(&body.slug).await?;
    Ok(HttpResponse::Ok().json(CheckSlugResponse { exists }))
}
