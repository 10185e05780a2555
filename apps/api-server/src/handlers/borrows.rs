//! Lending handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use pageturner_core::domain::NewBorrow;
use pageturner_shared::ApiResponse;
use pageturner_shared::dto::{BorrowBookRequest, BorrowedBookResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/borrows
pub async fn borrow_copy(
    state: web::Data<AppState>,
    body: web::Json<BorrowBookRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let borrow = NewBorrow::new(req.user_id, req.copy_id, req.due_date);
    borrow.validate(Utc::now())?;

    let loan = state.repo.borrow_book_copy(borrow).await?;
    tracing::info!(
        borrow_id = loan.id,
        user_id = loan.user_id,
        copy_id = loan.copy_id,
        "Book copy borrowed"
    );

    Ok(HttpResponse::Created().json(ApiResponse::ok(BorrowedBookResponse::from(loan))))
}

/// GET /api/v1/borrows/{id}
pub async fn get_borrow(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let loan = state.repo.get_borrowed_book_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BorrowedBookResponse::from(loan))))
}

/// POST /api/v1/borrows/{id}/return
pub async fn return_copy(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let loan = state.repo.return_book_copy(path.into_inner()).await?;
    tracing::info!(borrow_id = loan.id, copy_id = loan.copy_id, "Book copy returned");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(BorrowedBookResponse::from(loan))))
}
