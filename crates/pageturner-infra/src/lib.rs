//! # Page Turner Infrastructure
//!
//! Concrete implementations of the ports defined in `pageturner-core`.
//! The store is PostgreSQL through SeaORM; statements are built with
//! sea-query and executed through SeaORM's connection traits, so any backend
//! SeaORM supports (including its mock database) can stand in.

pub mod database;

pub use database::{DatabaseConfig, PostgresRepository, connect};
