//! Admin pages for categories.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use askama::Template;

use blog_core::Payload;
use blog_core::domain::{Category, CategoryId};

use super::{FormFields, FormState, SelectOption, form_payload, html, see_other, validation_or};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const INDEX: &str = "/admin/blog/categories";

pub struct CategoryRow {
    pub id: CategoryId,
    pub title: String,
    pub slug: String,
    pub parent: String,
}

#[derive(Template)]
#[template(path = "admin/categories/index.html")]
struct IndexPage {
    rows: Vec<CategoryRow>,
}

#[derive(Template)]
#[template(path = "admin/categories/form.html")]
struct FormPage {
    heading: &'static str,
    action: String,
    form: FormState,
    parents: Vec<SelectOption>,
}

fn category_values(category: &Category) -> Payload {
    Payload::new()
        .with("title", category.title.clone())
        .with("slug", category.slug.clone())
        .with("parent_id", category.parent_id)
        .with("description", category.description.clone())
}

/// Render the form; `editing` is left out of the parent choices.
async fn render_form(
    state: &AppState,
    heading: &'static str,
    editing: Option<CategoryId>,
    form: FormState,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let parents = state
        .categories
        .list()
        .await?
        .into_iter()
        .filter(|c| Some(c.id) != editing)
        .map(|c| SelectOption {
            selected: form.selected("parent_id", c.id),
            id: c.id,
            title: c.title,
        })
        .collect();

    let action = match editing {
        Some(id) => format!("{INDEX}/{id}"),
        None => INDEX.to_string(),
    };
    let page = FormPage {
        heading,
        action,
        form,
        parents,
    };
    Ok(html(status, page.render()?))
}

/// GET /admin/blog/categories
pub async fn index(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id,
            title: c.title.clone(),
            slug: c.slug.clone(),
            parent: c
                .parent_id
                .and_then(|pid| categories.iter().find(|p| p.id == pid))
                .map(|p| p.title.clone())
                .unwrap_or_default(),
        })
        .collect();

    Ok(html(StatusCode::OK, IndexPage { rows }.render()?))
}

/// GET /admin/blog/categories/create
pub async fn create(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    render_form(
        &state,
        "New category",
        None,
        FormState::default(),
        StatusCode::OK,
    )
    .await
}

/// POST /admin/blog/categories
pub async fn store(
    state: web::Data<AppState>,
    _identity: Identity,
    form: FormFields,
) -> AppResult<HttpResponse> {
    let payload = form_payload(form);
    match validation_or(state.categories.create(&payload).await)? {
        Ok(_) => Ok(see_other(INDEX)),
        Err(errors) => {
            render_form(
                &state,
                "New category",
                None,
                FormState::with_errors(payload, errors),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// GET /admin/blog/categories/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<CategoryId>,
) -> AppResult<HttpResponse> {
    let category = state.categories.get(path.into_inner()).await?;
    render_form(
        &state,
        "Edit category",
        Some(category.id),
        FormState::new(category_values(&category)),
        StatusCode::OK,
    )
    .await
}

/// PUT|PATCH|POST /admin/blog/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<CategoryId>,
    form: FormFields,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = form_payload(form);
    match validation_or(state.categories.update(id, &payload).await)? {
        Ok(_) => Ok(see_other(INDEX)),
        Err(errors) => {
            render_form(
                &state,
                "Edit category",
                Some(id),
                FormState::with_errors(payload, errors),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}
