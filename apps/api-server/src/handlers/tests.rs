use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use blog_core::Locale;

use super::configure_routes;
use crate::config::{AppConfig, PaginationConfig};
use crate::state::AppState;

fn config(default_author_id: Option<i64>) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: None,
        locale: Locale::Uk,
        pagination: PaginationConfig::default(),
        default_author_id,
        jwt: None,
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! create_category {
    ($app:expr, $title:expr, $slug:expr) => {{
        let req = test::TestRequest::post()
            .uri("/blog/categories")
            .set_json(json!({ "title": $title, "slug": $slug }))
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        body
    }};
}

#[actix_web::test]
async fn test_health() {
    let app = test_app!(AppState::in_memory(&config(None)));

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["locale"], "uk");
}

#[actix_web::test]
async fn test_category_create_then_duplicate_slug() {
    let app = test_app!(AppState::in_memory(&config(None)));

    let body = create_category!(app, "News", "news");
    assert_eq!(body["slug"], "news");
    assert_eq!(body["title"], "News");
    assert_eq!(body["id"], 1);

    let req = test::TestRequest::post()
        .uri("/blog/categories")
        .set_json(json!({ "title": "News", "slug": "news" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 422);
    assert_eq!(body["errors"]["slug"][0], "The slug has already been taken.");
}

#[actix_web::test]
async fn test_category_validation_reports_every_field() {
    let app = test_app!(AppState::in_memory(&config(None)));

    let req = test::TestRequest::post()
        .uri("/blog/categories")
        .set_json(json!({ "parent_id": 77 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(res).await;
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("slug"));
    assert!(errors.contains_key("parent_id"));
}

#[actix_web::test]
async fn test_category_update_keeps_own_slug() {
    let app = test_app!(AppState::in_memory(&config(None)));
    create_category!(app, "News", "news");

    let req = test::TestRequest::put()
        .uri("/blog/categories/1")
        .set_json(json!({ "title": "World news", "slug": "news" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "World news");
}

#[actix_web::test]
async fn test_missing_resources_are_404_with_localized_detail() {
    let app = test_app!(AppState::in_memory(&config(None)));

    let res = test::call_service(&app, test::TestRequest::get().uri("/posts/999").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "Пост не знайдено");

    let req = test::TestRequest::delete().uri("/blog/categories/999").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "Категорію не знайдено");
}

#[actix_web::test]
async fn test_post_create_requires_an_author() {
    let app = test_app!(AppState::in_memory(&config(None)));
    create_category!(app, "News", "news");

    let req = test::TestRequest::post()
        .uri("/blog/posts")
        .set_json(json!({ "title": "Hello", "slug": "hello", "category_id": 1 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_post_lifecycle_with_default_author() {
    let app = test_app!(AppState::in_memory(&config(Some(1))));
    create_category!(app, "News", "news");

    let req = test::TestRequest::post()
        .uri("/blog/posts")
        .set_json(json!({
            "title": "Hello",
            "slug": "hello",
            "category_id": 1,
            "excerpt": "Short",
            "is_published": true
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["slug"], "hello");
    assert_eq!(created["user_id"], 1);
    assert!(created["published_at"].is_string());

    // slug is required on update as well
    let req = test::TestRequest::patch()
        .uri("/posts/1")
        .set_json(json!({ "title": "Updated" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert!(body["errors"]["slug"].is_array());

    let req = test::TestRequest::patch()
        .uri("/posts/1")
        .set_json(json!({
            "title": "Updated",
            "slug": "hello",
            "category_id": 1,
            "excerpt": null
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "Updated");
    assert!(body["excerpt"].is_null());
    assert_eq!(body["is_published"], true);

    let res = test::call_service(&app, test::TestRequest::get().uri("/posts/1").to_request()).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["user"]["name"], "Admin");
    assert_eq!(body["category"]["title"], "News");

    // the category is referenced by the post
    let req = test::TestRequest::delete().uri("/blog/categories/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete().uri("/posts/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Пост видалено");

    let req = test::TestRequest::delete().uri("/blog/categories/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Категорію видалено");
}

#[actix_web::test]
async fn test_post_slug_format() {
    let app = test_app!(AppState::in_memory(&config(Some(1))));
    create_category!(app, "News", "news");

    let req = test::TestRequest::post()
        .uri("/blog/posts")
        .set_json(json!({ "title": "Hello", "slug": "Hello World", "category_id": 1 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["errors"]["slug"][0], "The slug field format is invalid.");
}

#[actix_web::test]
async fn test_post_listing_pagination() {
    let app = test_app!(AppState::in_memory(&config(Some(1))));
    create_category!(app, "News", "news");

    for slug in ["one", "two", "three"] {
        let req = test::TestRequest::post()
            .uri("/blog/posts")
            .set_json(json!({ "title": slug, "slug": slug, "category_id": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/blog/posts?per_page=2&page=2")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["per_page"], 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["last_page"], 2);
    assert_eq!(body["from"], 3);
    assert_eq!(body["to"], 3);
    assert_eq!(body["data"][0]["slug"], "three");
    assert_eq!(body["data"][0]["user"]["id"], 1);

    let req = test::TestRequest::get().uri("/blog/posts?per_page=abc").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_post_listing_page_far_past_the_end_is_empty() {
    let app = test_app!(AppState::in_memory(&config(Some(1))));
    create_category!(app, "News", "news");

    let req = test::TestRequest::post()
        .uri("/blog/posts")
        .set_json(json!({ "title": "Hello", "slug": "hello", "category_id": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/blog/posts?page=18446744073709551615&per_page=10")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 1);
    assert!(body["from"].is_null());
    assert!(body["to"].is_null());
}

#[actix_web::test]
async fn test_check_slug() {
    let app = test_app!(AppState::in_memory(&config(None)));
    create_category!(app, "News", "news");

    for (slug, exists) in [("news", true), ("new", false)] {
        let req = test::TestRequest::post()
            .uri("/blog/categories/check-slug")
            .set_json(json!({ "slug": slug }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["exists"], exists);
    }

    let req = test::TestRequest::post()
        .uri("/blog/posts/check-slug")
        .set_json(json!({ "slug": "news" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["exists"], false);
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let app = test_app!(AppState::in_memory(&config(None)));

    let req = test::TestRequest::post()
        .uri("/blog/categories")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_admin_requires_bearer_token() {
    let app = test_app!(AppState::in_memory(&config(Some(1))));

    let req = test::TestRequest::get().uri("/admin/blog/posts").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[cfg(feature = "auth")]
mod authenticated {
    use std::sync::Arc;

    use blog_core::ports::TokenService;
    use blog_infra::{JwtConfig, JwtTokenService};

    use super::*;

    fn token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "blog-test".to_string(),
        }))
    }

    macro_rules! auth_app {
        ($tokens:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory(&config(None))))
                    .app_data(web::Data::new($tokens))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn bearer(tokens: &Arc<dyn TokenService>) -> (header::HeaderName, String) {
        let token = tokens.generate_token(1, Some("Admin")).unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_post_author_comes_from_token() {
        let tokens = token_service();
        let auth = bearer(&tokens);
        let app = auth_app!(tokens);
        create_category!(app, "News", "news");

        let req = test::TestRequest::post()
            .uri("/blog/posts")
            .insert_header(auth)
            .set_json(json!({ "title": "Hello", "slug": "hello", "category_id": 1 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["user_id"], 1);
    }

    #[actix_web::test]
    async fn test_invalid_token_is_rejected() {
        let app = auth_app!(token_service());

        let req = test::TestRequest::post()
            .uri("/blog/posts")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
            .set_json(json!({ "title": "Hello", "slug": "hello", "category_id": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_admin_category_form_flow() {
        let tokens = token_service();
        let auth = bearer(&tokens);
        let app = auth_app!(tokens);

        let req = test::TestRequest::get()
            .uri("/admin/blog/categories/create")
            .insert_header(auth.clone())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let content_type = res.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));

        // missing slug re-renders the form
        let req = test::TestRequest::post()
            .uri("/admin/blog/categories")
            .insert_header(auth.clone())
            .set_form([("title", "News"), ("slug", ""), ("parent_id", "")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(html.contains("The slug field is required."));
        assert!(html.contains("value=\"News\""));

        let req = test::TestRequest::post()
            .uri("/admin/blog/categories")
            .insert_header(auth.clone())
            .set_form([("title", "News"), ("slug", "news"), ("parent_id", "")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/admin/blog/categories"
        );

        let req = test::TestRequest::get()
            .uri("/admin/blog/categories")
            .insert_header(auth)
            .to_request();
        let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("news"));
    }

    #[actix_web::test]
    async fn test_admin_post_store_update_and_delete() {
        let tokens = token_service();
        let auth = bearer(&tokens);
        let app = auth_app!(tokens);
        create_category!(app, "News", "news");

        let req = test::TestRequest::post()
            .uri("/admin/blog/posts")
            .insert_header(auth.clone())
            .set_form([
                ("title", "Hello"),
                ("slug", "hello"),
                ("category_id", "1"),
                ("excerpt", ""),
                ("content_raw", "Body"),
                ("is_published", "0"),
                ("is_published", "1"),
            ])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let res = test::call_service(&app, test::TestRequest::get().uri("/posts/1").to_request()).await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["is_published"], true);
        assert!(body["excerpt"].is_null());

        // unchecking the box leaves only the hidden "0"
        let req = test::TestRequest::post()
            .uri("/admin/blog/posts/1")
            .insert_header(auth.clone())
            .set_form([
                ("title", "Hello"),
                ("slug", "hello"),
                ("category_id", "1"),
                ("is_published", "0"),
            ])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

        let res = test::call_service(&app, test::TestRequest::get().uri("/posts/1").to_request()).await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["is_published"], false);
        assert!(body["published_at"].is_null());

        let req = test::TestRequest::get()
            .uri("/admin/blog/posts/1/edit")
            .insert_header(auth.clone())
            .to_request();
        let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("value=\"hello\""));
        assert!(html.contains("action=\"/admin/blog/posts/1\""));

        let req = test::TestRequest::delete()
            .uri("/admin/blog/posts/1")
            .insert_header(auth)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

        let res = test::call_service(&app, test::TestRequest::get().uri("/posts/1").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
