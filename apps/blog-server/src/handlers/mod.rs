//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod content;
mod forms;
mod health;
mod posts;
mod profile;
mod views;

use actix_web::{HttpResponse, error::InternalError, web};
use blog_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/", web::get().to(content::index))
        .route("/category/{slug}/", web::get().to(content::category_posts))
        .route("/profile/{username}/", web::get().to(content::profile))
        .service(
            web::resource("/edit_profile/")
                .route(web::get().to(profile::edit_form))
                .route(web::post().to(profile::edit)),
        )
        .service(
            web::scope("/posts")
                .service(
                    web::resource("/create/")
                        .route(web::get().to(posts::create_form))
                        .route(web::post().to(posts::create)),
                )
                .route("/{post_id}/", web::get().to(content::post_detail))
                .service(
                    web::resource("/{post_id}/edit/")
                        .route(web::get().to(posts::edit_form))
                        .route(web::post().to(posts::edit)),
                )
                .service(
                    web::resource("/{post_id}/delete/")
                        .route(web::get().to(posts::delete_form))
                        .route(web::post().to(posts::delete)),
                )
                .route("/{post_id}/comment/", web::post().to(comments::add))
                .service(
                    web::resource("/{post_id}/edit_comment/{comment_id}/")
                        .route(web::get().to(comments::edit_form))
                        .route(web::post().to(comments::edit)),
                )
                .service(
                    web::resource("/{post_id}/delete_comment/{comment_id}/")
                        .route(web::get().to(comments::delete_form))
                        .route(web::post().to(comments::delete)),
                ),
        )
        .service(
            web::scope("/auth")
                .route("/registration/", web::post().to(auth::register))
                .route("/login/", web::post().to(auth::login)),
        );
}

/// Malformed JSON bodies answer with a problem document too.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::bad_request(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

#[cfg(test)]
mod tests;
