//! Query builder adapter.
//!
//! Statements are assembled with sea-query from an entity's declared column
//! set and rendered for whichever backend the connection speaks, so values
//! always travel as bound parameters and placeholder style (`$1` vs `?`)
//! never leaks into repository code.

use sea_orm::sea_query::{
    Expr, InsertStatement, IntoColumnRef, Order, Query, SelectStatement, SimpleExpr,
    UpdateStatement,
};
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, Iterable, SqlErr, StatementBuilder,
    Value,
};

use pageturner_core::error::{Detail, InvalidHttpStatus};
use pageturner_core::{DomainError, DomainResult, ErrorCode};

/// A value that can be written as one new row of `Entity`.
pub(crate) trait InsertRecord {
    type Entity: EntityTrait;

    /// Every column the caller supplies, paired with its value, in column
    /// order. Store-generated columns (id, timestamps) are left out.
    fn insert_values(&self) -> Vec<(<Self::Entity as EntityTrait>::Column, Value)>;
}

/// `INSERT ... RETURNING <all columns>` for one record.
pub(crate) fn insert_returning<R: InsertRecord>(record: &R) -> DomainResult<InsertStatement> {
    let (columns, values): (Vec<_>, Vec<SimpleExpr>) = record
        .insert_values()
        .into_iter()
        .map(|(column, value)| (column, SimpleExpr::from(value)))
        .unzip();

    let mut stmt = Query::insert();
    stmt.into_table(R::Entity::default())
        .columns(columns)
        .values(values)
        .map_err(|e| DomainError::new(ErrorCode::InternalProcess, e))?
        .returning(Query::returning().columns(<R::Entity as EntityTrait>::Column::iter()));
    Ok(stmt)
}

/// `SELECT <all columns> FROM <table>`.
pub(crate) fn select_all<E: EntityTrait>() -> SelectStatement {
    Query::select()
        .columns(E::Column::iter())
        .from(E::default())
        .to_owned()
}

/// `SELECT <all columns> FROM <table> WHERE <column> = ?`.
pub(crate) fn select_where<E: EntityTrait>(
    column: E::Column,
    value: impl Into<Value>,
) -> SelectStatement {
    select_all::<E>()
        .and_where(Expr::col(column).eq(value.into()))
        .to_owned()
}

/// Exact-match lookup limited to a single row.
pub(crate) fn select_one_where<E: EntityTrait>(
    column: E::Column,
    value: impl Into<Value>,
) -> SelectStatement {
    select_where::<E>(column, value).limit(1).to_owned()
}

/// Order most recently created first; `id` breaks ties between rows created
/// in the same instant.
pub(crate) fn newest_first<C>(stmt: &mut SelectStatement, created_at: C, id: C)
where
    C: IntoColumnRef,
{
    stmt.order_by(created_at, Order::Desc)
        .order_by(id, Order::Desc);
}

/// `UPDATE <table> SET ... , updated_at = CURRENT_TIMESTAMP WHERE <column> = ?`.
pub(crate) fn update_where<E: EntityTrait>(
    mut assignments: Vec<(E::Column, SimpleExpr)>,
    updated_at: E::Column,
    column: E::Column,
    value: impl Into<Value>,
) -> UpdateStatement {
    assignments.push((updated_at, Expr::current_timestamp().into()));
    Query::update()
        .table(E::default())
        .values(assignments)
        .and_where(Expr::col(column).eq(value.into()))
        .to_owned()
}

/// Run a statement expected to yield at most one row.
pub(crate) async fn get_one<M, C, S>(conn: &C, stmt: &S) -> DomainResult<Option<M>>
where
    M: FromQueryResult,
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let statement = conn.get_database_backend().build(stmt);
    let row = conn.query_one(statement).await.map_err(store_error)?;
    row.map(|row| M::from_query_result(&row, ""))
        .transpose()
        .map_err(decode_error)
}

/// Run a statement yielding any number of rows.
pub(crate) async fn select_many<M, C, S>(conn: &C, stmt: &S) -> DomainResult<Vec<M>>
where
    M: FromQueryResult,
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let statement = conn.get_database_backend().build(stmt);
    let rows = conn.query_all(statement).await.map_err(store_error)?;
    rows.iter()
        .map(|row| M::from_query_result(row, ""))
        .collect::<Result<Vec<_>, _>>()
        .map_err(decode_error)
}

/// Run a statement for its effect; returns the number of rows touched.
pub(crate) async fn exec<C, S>(conn: &C, stmt: &S) -> DomainResult<u64>
where
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let statement = conn.get_database_backend().build(stmt);
    let result = conn.execute(statement).await.map_err(store_error)?;
    Ok(result.rows_affected())
}

/// The store failed while executing. Unique-key clashes keep the category
/// but surface as 409 with a message the client can act on.
pub(crate) fn store_error(err: DbErr) -> DomainError {
    let violation = err.sql_err();
    classify_store_error(err, violation)
}

/// `violation` is the driver's reading of `err` (`DbErr::sql_err`).
fn classify_store_error(err: DbErr, violation: Option<SqlErr>) -> DomainError {
    let duplicate = matches!(violation, Some(SqlErr::UniqueConstraintViolation(_)));
    let error = DomainError::new(ErrorCode::RemoteProcess, err);
    if !duplicate {
        return error;
    }
    error
        .with_msg("resource already exists")
        .with_status(409)
        .unwrap_or_else(InvalidHttpStatus::into_error)
}

/// A row came back but could not be mapped onto the entity.
fn decode_error(err: DbErr) -> DomainError {
    DomainError::new(ErrorCode::InternalProcess, err)
}

/// A lookup by `key` matched no row.
pub(crate) fn not_found(
    entity: &'static str,
    key: &'static str,
    value: impl Into<serde_json::Value>,
) -> DomainError {
    let value = value.into();
    DomainError::new(
        ErrorCode::ResourceNotFound,
        format!("no {entity} row with {key} = {value}"),
    )
    .with_msg(format!("{entity} not found"))
    .with_detail(Detail::from_iter([(key.to_owned(), value)]))
}

/// A write with RETURNING produced nothing.
pub(crate) fn missing_returning(table: &'static str) -> DomainError {
    DomainError::new(
        ErrorCode::RemoteProcess,
        format!("store returned no row for write to {table}"),
    )
}
