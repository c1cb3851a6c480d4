//! Authentication infrastructure: credential codec and token service

mod password;
mod token;

pub use password::{KdfDigest, KdfParams, PasswordCodec, SALT_LENGTH};
pub use token::{Claims, TokenService, TOKEN_TTL_SECS};
