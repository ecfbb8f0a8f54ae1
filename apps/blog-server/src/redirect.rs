//! Named routes the API redirects to.

use actix_web::HttpResponse;
use actix_web::http::header;
use blog_shared::RedirectResponse;
use uuid::Uuid;

pub fn index() -> RedirectResponse {
    RedirectResponse::new("blog:index", "/")
}

pub fn post_detail(post_id: Uuid) -> RedirectResponse {
    RedirectResponse::new("blog:post_detail", format!("/posts/{post_id}/"))
        .with_param("post_id", post_id)
}

pub fn profile(username: &str) -> RedirectResponse {
    RedirectResponse::new("blog:profile", format!("/profile/{username}/"))
        .with_param("username", username)
}

/// Sign-in page, returning to `next` afterwards.
pub fn login(next: &str) -> RedirectResponse {
    RedirectResponse::new("login", format!("/auth/login/?next={next}")).with_param("next", next)
}

/// `303 See Other` to `target`, with the route in the body.
pub fn see_other(target: RedirectResponse) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target.location.clone()))
        .json(target)
}
