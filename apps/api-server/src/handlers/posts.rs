//! Public post endpoints.

use actix_web::{HttpResponse, web};

use blog_core::Payload;
use blog_core::domain::{PageRequest, PostId};
use blog_shared::dto::{CheckSlugRequest, CheckSlugResponse, ListPostsQuery};
use blog_shared::{MessageResponse, Page};

use crate::middleware::auth::Author;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /blog/posts?per_page=N&page=M
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let per_page = state.pagination.per_page(query.per_page);
    let request = PageRequest::new(query.page.unwrap_or(1), per_page);

    let page = state.posts.list(request).await?;
    Ok(HttpResponse::Ok().json(Page::new(page.items, page.page, page.per_page, page.total)))
}

/// POST /blog/posts
pub async fn store(
    state: web::Data<AppState>,
    author: Author,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(&body, author.0).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<PostId>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    let post = state.posts.update(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(state.locale.post_deleted())))
}

/// POST /blog/posts/check-slug
pub async fn check_slug(
    state: web::Data<AppState>,
    body: web::Json<CheckSlugRequest>,
) -> AppResult<HttpResponse> {
    let exists = state.posts.slug_exists(&body.slug).await?;
    Ok(HttpResponse::Ok().json(CheckSlugResponse { exists }))
}
