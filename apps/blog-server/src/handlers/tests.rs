use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use blog_core::domain::{Category, Comment, Post, PostDraft, User};
use blog_infra::JwtConfig;

use crate::state::AppState;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(super::configure_routes),
        )
        .await
    };
}

struct Seed {
    state: AppState,
    author: User,
    reader: User,
    category: Category,
}

impl Seed {
    async fn new() -> Self {
        let state = AppState::in_memory(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "blog-test".to_string(),
        });

        let hash = state.passwords.hash("password123").unwrap();
        let author = User::new("author".into(), "author@example.com".into(), hash.clone());
        let reader = User::new("reader".into(), "reader@example.com".into(), hash);
        let category = Category::new("travel".into(), "Travel".into(), "Trips".into());

        state.repos.users.save(author.clone()).await.unwrap();
        state.repos.users.save(reader.clone()).await.unwrap();
        state.repos.categories.save(category.clone()).await.unwrap();

        Self {
            state,
            author,
            reader,
            category,
        }
    }

    fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        let token = self.state.tokens.generate_token(user.id, &user.username).unwrap();
        (header::AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn post(&self, title: &str, pub_date: DateTime<Utc>) -> Post {
        let draft = PostDraft {
            title: title.into(),
            text: "Body".into(),
            image: None,
            pub_date,
            is_published: true,
            location_id: None,
            category_id: Some(self.category.id),
        };
        let post = Post::new(self.author.id, draft, Utc::now());
        self.state.repos.posts.save(post).await.unwrap()
    }

    async fn comment(&self, post: &Post, author: &User) -> Comment {
        let comment = Comment::new(author.id, post.id, "Nice".into(), Utc::now());
        self.state.repos.comments.save(comment).await.unwrap()
    }

    fn post_body(&self, title: &str) -> Value {
        json!({
            "title": title,
            "text": "Body",
            "pub_date": Utc::now() - TimeDelta::minutes(1),
            "category_id": self.category.id,
        })
    }
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_health_check() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_home_feed_lists_only_public_posts() {
    let seed = Seed::new().await;
    seed.post("published", Utc::now() - TimeDelta::hours(1)).await;
    seed.post("scheduled", Utc::now() + TimeDelta::hours(1)).await;
    let app = app!(seed.state);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["context"]["kind"], "home");
    assert_eq!(body["page"]["count"], 1);
    assert_eq!(body["page"]["items"][0]["title"], "published");
    assert_eq!(body["page"]["items"][0]["author"]["username"], "author");
}

#[actix_web::test]
async fn test_page_parameter_is_forgiving() {
    let seed = Seed::new().await;
    for i in 0..15 {
        seed.post(&format!("post {i}"), Utc::now() - TimeDelta::minutes(i + 1))
            .await;
    }
    let app = app!(seed.state);

    let req = test::TestRequest::get().uri("/?page=abc").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"]["number"], 1);
    assert_eq!(body["page"]["has_next"], true);

    let req = test::TestRequest::get().uri("/?page=99").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"]["number"], 2);
    assert_eq!(body["page"]["items"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_unknown_category_is_not_found() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::get().uri("/category/nowhere/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
}

#[actix_web::test]
async fn test_hidden_post_detail_is_not_found_for_others() {
    let seed = Seed::new().await;
    let post = seed.post("scheduled", Utc::now() + TimeDelta::days(1)).await;
    let app = app!(seed.state);
    let uri = format!("/posts/{}/", post.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(seed.bearer(&seed.reader))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_owner"], true);
}

#[actix_web::test]
async fn test_anonymous_create_redirects_to_login() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .set_json(seed.post_body("Hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login/?next=/posts/create/");
}

#[actix_web::test]
async fn test_create_post_redirects_to_profile() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .insert_header(seed.bearer(&seed.author))
        .set_json(seed.post_body("Hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/author/");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["route"], "blog:profile");

    let req = test::TestRequest::get().uri("/profile/author/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"]["count"], 1);
    assert_eq!(body["context"]["profile"]["username"], "author");
}

#[actix_web::test]
async fn test_invalid_post_is_unprocessable() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .insert_header(seed.bearer(&seed.author))
        .set_json(seed.post_body(""))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"][0].as_str().unwrap().starts_with("title"));
}

#[actix_web::test]
async fn test_non_author_edit_falls_back_to_detail() {
    let seed = Seed::new().await;
    let post = seed.post("mine", Utc::now() - TimeDelta::hours(1)).await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", post.id))
        .insert_header(seed.bearer(&seed.reader))
        .set_json(seed.post_body("hijacked"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let unchanged: Option<Post> = seed.state.repos.posts.find_by_id(post.id).await.unwrap();
    assert_eq!(unchanged.unwrap().title, "mine");
}

#[actix_web::test]
async fn test_edit_form_returns_current_values() {
    let seed = Seed::new().await;
    let post = seed.post("mine", Utc::now() - TimeDelta::hours(1)).await;
    let app = app!(seed.state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/edit/", post.id))
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["title"], "mine");
    assert_eq!(body["category_id"], json!(seed.category.id));
}

#[actix_web::test]
async fn test_author_edit_redirects_to_detail() {
    let seed = Seed::new().await;
    let post = seed.post("mine", Utc::now() - TimeDelta::hours(1)).await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", post.id))
        .insert_header(seed.bearer(&seed.author))
        .set_json(seed.post_body("revised"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let stored: Option<Post> = seed.state.repos.posts.find_by_id(post.id).await.unwrap();
    let stored = stored.unwrap();
    assert_eq!(stored.title, "revised");
    assert_eq!(stored.created_at, post.created_at);
}

#[actix_web::test]
async fn test_comment_flow() {
    let seed = Seed::new().await;
    let post = seed.post("open", Utc::now() - TimeDelta::hours(1)).await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comment/", post.id))
        .insert_header(seed.bearer(&seed.reader))
        .set_json(json!({ "text": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/", post.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["post"]["comment_count"], 1);
    assert_eq!(body["comments"][0]["text"], "---Empty---");
    assert_eq!(body["comments"][0]["author"]["username"], "reader");
}

#[actix_web::test]
async fn test_non_author_comment_delete_keeps_comment() {
    let seed = Seed::new().await;
    let post = seed.post("open", Utc::now() - TimeDelta::hours(1)).await;
    let comment = seed.comment(&post, &seed.author).await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/delete_comment/{}/", post.id, comment.id))
        .insert_header(seed.bearer(&seed.reader))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}/", post.id));

    let kept: Option<Comment> = seed.state.repos.comments.find_by_id(comment.id).await.unwrap();
    assert!(kept.is_some());
}

#[actix_web::test]
async fn test_comment_under_wrong_post_is_not_found() {
    let seed = Seed::new().await;
    let post = seed.post("open", Utc::now() - TimeDelta::hours(1)).await;
    let comment = seed.comment(&post, &seed.author).await;
    let app = app!(seed.state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/edit_comment/{}/", Uuid::new_v4(), comment.id))
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_author_deletes_post() {
    let seed = Seed::new().await;
    let post = seed.post("doomed", Utc::now() - TimeDelta::hours(1)).await;
    seed.comment(&post, &seed.reader).await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/delete/", post.id))
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/author/");

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_token_is_anonymous() {
    let seed = Seed::new().await;
    let post = seed.post("open", Utc::now() - TimeDelta::hours(1)).await;
    let app = app!(seed.state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/", post.id))
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_owner"], false);

    let req = test::TestRequest::get()
        .uri("/edit_profile/")
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login/?next=/edit_profile/");
}

#[actix_web::test]
async fn test_register_then_login() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/auth/registration/")
        .set_json(json!({ "username": "newbie", "password": "long enough" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .set_json(json!({ "username": "newbie", "password": "long enough" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/newbie/");

    let body: Value = test::read_body_json(resp).await;
    let token = body["access_token"].as_str().unwrap();
    let claims = seed.state.tokens.validate_token(token).unwrap();
    assert_eq!(claims.username, "newbie");
}

#[actix_web::test]
async fn test_login_rejects_wrong_password() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .set_json(json!({ "username": "author", "password": "not-the-one" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_taken_username_conflicts() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/auth/registration/")
        .set_json(json!({ "username": "author", "password": "long enough" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_edit_profile_redirects_to_new_username() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/edit_profile/")
        .insert_header(seed.bearer(&seed.reader))
        .set_json(json!({ "username": "avid_reader", "first_name": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/avid_reader/");

    let req = test::TestRequest::get()
        .uri("/edit_profile/")
        .insert_header(seed.bearer(&seed.reader))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["first_name"], "Ada");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let seed = Seed::new().await;
    let app = app!(seed.state);

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
