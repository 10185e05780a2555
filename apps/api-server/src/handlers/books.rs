//! Catalogue handlers: books and their physical copies.

use actix_web::{HttpResponse, web};

use pageturner_core::domain::{NewBook, NewBookCopy};
use pageturner_shared::ApiResponse;
use pageturner_shared::dto::{BookCopyResponse, BookResponse, CreateBookRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/books
pub async fn create_book(
    state: web::Data<AppState>,
    body: web::Json<CreateBookRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_book = NewBook::new(req.title, req.author, req.isbn, req.published_year);
    new_book.validate()?;

    let book = state.repo.create_book(new_book).await?;
    tracing::info!(book_id = book.id, "Book created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(BookResponse::from(book))))
}

/// GET /api/v1/books
pub async fn list_books(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let books: Vec<BookResponse> = state
        .repo
        .get_all_books()
        .await?
        .into_iter()
        .map(BookResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(books)))
}

/// GET /api/v1/books/{id}
pub async fn get_book(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let book = state.repo.get_book_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BookResponse::from(book))))
}

/// POST /api/v1/books/{id}/copies
///
/// Adds one copy, shelved in the library.
pub async fn add_copy(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let book = state.repo.get_book_by_id(path.into_inner()).await?;
    let copy = state.repo.create_book_copy(NewBookCopy::new(book.id)).await?;
    tracing::info!(book_id = book.id, copy_id = copy.id, "Book copy added");

    Ok(HttpResponse::Created().json(ApiResponse::ok(BookCopyResponse::from(copy))))
}

/// GET /api/v1/books/{id}/copies
pub async fn list_copies(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let book = state.repo.get_book_by_id(path.into_inner()).await?;
    let copies: Vec<BookCopyResponse> = state
        .repo
        .get_copies_by_book_id(book.id)
        .await?
        .into_iter()
        .map(BookCopyResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(copies)))
}

/// GET /api/v1/copies/{id}
pub async fn get_copy(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let copy = state.repo.get_book_copy_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BookCopyResponse::from(copy))))
}
