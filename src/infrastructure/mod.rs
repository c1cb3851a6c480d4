pub mod auth;
pub mod board;
pub mod comment;
pub mod logging;
pub mod storage;
pub mod user;
