//! Ownership-based authorization
//!
//! The gate is a pure comparison with no I/O. Callers must confirm that the
//! resource exists before invoking it, so that "not found" and "forbidden"
//! remain distinct failure modes.

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Allow a mutating action only when the requester owns the resource.
pub fn authorize_owner_action(
    resource_owner: &UserId,
    requester: &UserId,
) -> Result<(), DomainError> {
    if resource_owner == requester {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}
