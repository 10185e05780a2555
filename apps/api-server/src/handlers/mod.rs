//! HTTP handlers and route configuration.

mod books;
mod borrows;
mod health;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::{json_error_handler, path_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/users")
                        .route("", web::post().to(users::create_user))
                        .route("", web::get().to(users::list_users))
                        .route("/by-email/{email}", web::get().to(users::get_user_by_email))
                        .route("/{id}", web::get().to(users::get_user))
                        .route("/{id}/borrows", web::get().to(users::list_user_borrows)),
                )
                .service(
                    web::scope("/books")
                        .route("", web::post().to(books::create_book))
                        .route("", web::get().to(books::list_books))
                        .route("/{id}", web::get().to(books::get_book))
                        .route("/{id}/copies", web::post().to(books::add_copy))
                        .route("/{id}/copies", web::get().to(books::list_copies)),
                )
                .route("/copies/{id}", web::get().to(books::get_copy))
                .service(
                    web::scope("/borrows")
                        .route("", web::post().to(borrows::borrow_copy))
                        .route("/{id}", web::get().to(borrows::get_borrow))
                        .route("/{id}/return", web::post().to(borrows::return_copy)),
                ),
        );
}
