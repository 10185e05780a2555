//! # Page Turner Core
//!
//! The domain layer of the library backend: entities, the domain error
//! taxonomy and the repository ports. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, DomainResult, ErrorCode};
