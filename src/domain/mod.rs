//! Domain layer
//!
//! Entities, validation and repository traits. Everything here is free of
//! I/O concerns; the concrete storage and crypto live in `infrastructure`.

pub mod auth;
pub mod board;
pub mod comment;
mod error;
pub mod user;

pub use error::DomainError;
