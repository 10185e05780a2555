//! User handlers.

use actix_web::{HttpResponse, web};

use pageturner_core::domain::NewUser;
use pageturner_shared::ApiResponse;
use pageturner_shared::dto::{BorrowedBookResponse, CreateUserRequest, UserResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_user = NewUser::new(req.uid, req.email, req.name);
    new_user.validate()?;

    let user = state.repo.create_user(new_user).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(UserResponse::from(user))))
}

/// GET /api/v1/users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .repo
        .get_all_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let user = state.repo.get_user_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserResponse::from(user))))
}

/// GET /api/v1/users/by-email/{email}
pub async fn get_user_by_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = state.repo.get_user_by_email(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserResponse::from(user))))
}

/// GET /api/v1/users/{id}/borrows
pub async fn list_user_borrows(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let user = state.repo.get_user_by_id(path.into_inner()).await?;
    let loans: Vec<BorrowedBookResponse> = state
        .repo
        .get_borrowed_books_by_user_id(user.id)
        .await?
        .into_iter()
        .map(BorrowedBookResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(loans)))
}
