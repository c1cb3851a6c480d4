//! Board domain

mod entity;
mod repository;

pub use entity::validation::{validate_content, validate_title, BoardValidationError};
pub use entity::Board;
pub use repository::BoardRepository;
