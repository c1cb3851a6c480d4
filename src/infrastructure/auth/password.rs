//! Password hashing using PBKDF2 with per-user salts
//!
//! The KDF parameters come from deployment configuration and are validated
//! once at startup; a zero iteration count, a zero output length or an
//! unknown digest is a configuration error, never a silently weak hash.

use base64::{engine::general_purpose::STANDARD, Engine};
use pbkdf2::pbkdf2_hmac;
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::domain::DomainError;

/// Length of the per-user random salt ("password key")
pub const SALT_LENGTH: usize = 64;

/// Digest algorithm used inside PBKDF2-HMAC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfDigest {
    Sha256,
    Sha512,
}

impl std::str::FromStr for KdfDigest {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(DomainError::configuration(format!(
                "Unknown KDF digest '{}'. Use sha256 or sha512",
                other
            ))),
        }
    }
}

/// Validated key-derivation parameters
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    iterations: u32,
    key_length: usize,
    digest: KdfDigest,
}

impl KdfParams {
    /// Create parameters, rejecting values that would weaken the hash
    pub fn new(iterations: u32, key_length: usize, digest: KdfDigest) -> Result<Self, DomainError> {
        if iterations == 0 {
            return Err(DomainError::configuration(
                "KDF iteration count must be greater than zero",
            ));
        }

        if key_length == 0 {
            return Err(DomainError::configuration(
                "KDF key length must be greater than zero",
            ));
        }

        Ok(Self {
            iterations,
            key_length,
            digest,
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn key_length(&self) -> usize {
        self.key_length
    }

    pub fn digest(&self) -> KdfDigest {
        self.digest
    }
}

/// PBKDF2 credential codec
#[derive(Debug, Clone)]
pub struct PasswordCodec {
    params: KdfParams,
}

impl PasswordCodec {
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// Generate a fresh random salt, unique per call with overwhelming
    /// probability. Called once per user at registration and again on every
    /// password change.
    pub fn generate_salt(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Derive the salted digest of a plaintext password, base64-encoded.
    /// Deterministic: identical inputs always produce identical output, which
    /// is what makes verification by recomputation possible.
    pub fn derive(&self, password: &str, salt: &str) -> String {
        let mut out = vec![0u8; self.params.key_length];

        match self.params.digest {
            KdfDigest::Sha256 => pbkdf2_hmac::<Sha256>(
                password.as_bytes(),
                salt.as_bytes(),
                self.params.iterations,
                &mut out,
            ),
            KdfDigest::Sha512 => pbkdf2_hmac::<Sha512>(
                password.as_bytes(),
                salt.as_bytes(),
                self.params.iterations,
                &mut out,
            ),
        }

        STANDARD.encode(out)
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// The comparison is constant-time: it must not short-circuit on the
    /// first mismatching byte.
    pub fn verify(&self, password: &str, salt: &str, stored_hash: &str) -> bool {
        let derived = self.derive(password, salt);
        derived.as_bytes().ct_eq(stored_hash.as_bytes()).into()
    }
}
