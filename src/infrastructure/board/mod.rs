//! Board infrastructure repositories

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresBoardRepository;
pub use repository::InMemoryBoardRepository;
