//! Admin pages for posts.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use askama::Template;

use blog_core::Payload;
use blog_core::domain::{PageRequest, Post, PostId, PostWithRelations};
use blog_shared::dto::ListPostsQuery;

use super::{FormFields, FormState, SelectOption, form_payload, html, see_other, validation_or};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const INDEX: &str = "/admin/blog/posts";

pub struct PostRow {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub author: String,
    pub published: String,
}

impl From<PostWithRelations> for PostRow {
    fn from(item: PostWithRelations) -> Self {
        let published = match item.post.published_at {
            Some(at) if item.post.is_published => at.format("%Y-%m-%d %H:%M").to_string(),
            _ => "-".to_string(),
        };
        Self {
            id: item.post.id,
            title: item.post.title,
            slug: item.post.slug,
            category: item.category.map(|c| c.title).unwrap_or_default(),
            author: item.user.map(|u| u.name).unwrap_or_default(),
            published,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/posts/index.html")]
struct IndexPage {
    rows: Vec<PostRow>,
    page: u64,
    last_page: u64,
    total: u64,
    prev_page: Option<u64>,
    next_page: Option<u64>,
}

#[derive(Template)]
#[template(path = "admin/posts/form.html")]
struct FormPage {
    heading: &'static str,
    action: String,
    form: FormState,
    categories: Vec<SelectOption>,
}

fn post_values(post: &Post) -> Payload {
    Payload::new()
        .with("title", post.title.clone())
        .with("slug", post.slug.clone())
        .with("category_id", post.category_id)
        .with("excerpt", post.excerpt.clone())
        .with("content_raw", post.content_raw.clone())
        .with("is_published", post.is_published)
}

async fn render_form(
    state: &AppState,
    heading: &'static str,
    action: String,
    form: FormState,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let categories = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(|c| SelectOption {
            selected: form.selected("category_id", c.id),
            id: c.id,
            title: c.title,
        })
        .collect();

    let page = FormPage {
        heading,
        action,
        form,
        categories,
    };
    Ok(html(status, page.render()?))
}

/// GET /admin/blog/posts
pub async fn index(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let per_page = state.pagination.per_page(query.per_page);
    let page = state
        .posts
        .list(PageRequest::new(query.page.unwrap_or(1), per_page))
        .await?;

    let last_page = page.last_page();
    let view = IndexPage {
        page: page.page,
        last_page,
        total: page.total,
        prev_page: (page.page > 1).then(|| page.page - 1),
        next_page: (page.page < last_page).then(|| page.page + 1),
        rows: page.items.into_iter().map(PostRow::from).collect(),
    };
    Ok(html(StatusCode::OK, view.render()?))
}

/// GET /admin/blog/posts/create
pub async fn create(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    render_form(
        &state,
        "New post",
        INDEX.to_string(),
        FormState::default(),
        StatusCode::OK,
    )
    .await
}

/// POST /admin/blog/posts
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    form: FormFields,
) -> AppResult<HttpResponse> {
    let payload = form_payload(form);
    match validation_or(state.posts.create(&payload, identity.user_id).await)? {
        Ok(post) => {
            tracing::info!(
                post_id = post.id,
                user_id = identity.user_id,
                user = identity.name.as_deref(),
                "Post created from admin"
            );
            Ok(see_other(INDEX))
        }
        Err(errors) => {
            let form = FormState::with_errors(payload, errors);
            render_form(
                &state,
                "New post",
                INDEX.to_string(),
                form,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// GET /admin/blog/posts/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.get(id).await?.post;
    render_form(
        &state,
        "Edit post",
        format!("{INDEX}/{id}"),
        FormState::new(post_values(&post)),
        StatusCode::OK,
    )
    .await
}

/// PUT|PATCH|POST /admin/blog/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<PostId>,
    form: FormFields,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = form_payload(form);
    match validation_or(state.posts.update(id, &payload).await)? {
        Ok(_) => Ok(see_other(INDEX)),
        Err(errors) => {
            render_form(
                &state,
                "Edit post",
                format!("{INDEX}/{id}"),
                FormState::with_errors(payload, errors),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// DELETE /admin/blog/posts/{id}, or POST to `/delete` from the index form.
pub async fn destroy(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(see_other(INDEX))
}
