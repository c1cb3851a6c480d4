//! User infrastructure: repositories and the user service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{UpdateUserRequest, UserService};
