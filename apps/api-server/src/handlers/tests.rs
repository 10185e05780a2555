//! Route tests against the real repository backed by SeaORM's mock database.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};

use pageturner_infra::PostgresRepository;
use pageturner_infra::database::entity::{book, book_copy, user};

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

fn state(db: DatabaseConnection) -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(PostgresRepository::new(db))))
}

macro_rules! test_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(state($db))
                .configure(configure_routes),
        )
        .await
    };
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn alice() -> user::Model {
    let now = Utc::now();
    user::Model {
        id: 1,
        uid: "u1".to_owned(),
        email: "a@x.com".to_owned(),
        name: "Alice".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn dune() -> book::Model {
    let now = Utc::now();
    book::Model {
        id: 10,
        title: "Dune".to_owned(),
        author: "Frank Herbert".to_owned(),
        published_year: 1965,
        isbn: "9780441013593".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[actix_web::test]
async fn health_is_ok() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn create_user_returns_created() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![alice()]])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"uid": "u1", "email": "a@x.com", "name": "Alice"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["email"], "a@x.com");
}

#[actix_web::test]
async fn invalid_email_is_rejected_before_the_store() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"uid": "u1", "email": "not-an-email", "name": "Alice"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "PARAMETER_INVALID");
    assert_eq!(body["title"], "email address is invalid");
    assert_eq!(body["context"]["field"], "email");
}

#[actix_web::test]
async fn malformed_json_is_parameter_invalid() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"uid\": ")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "PARAMETER_INVALID");
    assert_eq!(body["title"], "request body is invalid");
}

#[actix_web::test]
async fn non_numeric_id_is_parameter_invalid() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::get().uri("/api/v1/users/abc").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "path parameter is invalid");
}

#[actix_web::test]
async fn unknown_user_is_problem_details_with_request_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/42")
        .insert_header(("X-Request-ID", "req-42"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["title"], "user not found");
    assert_eq!(body["context"]["id"], 42);
    assert_eq!(body["request_id"], "req-42");
}

#[actix_web::test]
async fn list_users_wraps_data() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![alice()]])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::get().uri("/api/v1/users").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["uid"], "u1");
}

#[actix_web::test]
async fn copies_of_unknown_book_are_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<book::Model>::new()])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/v1/books/99/copies")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "book not found");
}

#[actix_web::test]
async fn added_copy_starts_in_library() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![dune()]])
        .append_query_results([vec![book_copy::Model {
            id: 100,
            book_id: 10,
            status: 0,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/v1/books/10/copies")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["book_id"], 10);
    assert_eq!(body["data"]["status"], "in_library");
}

#[actix_web::test]
async fn past_due_date_is_rejected() {
    let app = test_app!(empty_db());

    let req = test::TestRequest::post()
        .uri("/api/v1/borrows")
        .set_json(json!({
            "user_id": 1,
            "copy_id": 100,
            "due_date": Utc::now() - Duration::days(1),
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "due date must be in the future");
}

#[actix_web::test]
async fn borrowing_a_borrowed_copy_is_a_conflict() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![book_copy::Model {
            id: 100,
            book_id: 10,
            status: 1,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();
    let app = test_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/v1/borrows")
        .set_json(json!({
            "user_id": 1,
            "copy_id": 100,
            "due_date": now + Duration::days(14),
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "PARAMETER_INVALID");
    assert_eq!(body["title"], "book copy is not available");
    assert_eq!(body["context"]["copy_id"], 100);
}
