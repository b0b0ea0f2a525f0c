//! Salted one-way password hashing.
//!
//! Both functions are CPU-bound; handlers call them through `web::block`.

use crate::error::AppError;

/// Cost factor used when `BCRYPT_COST` is not set.
pub const DEFAULT_HASH_COST: u32 = 10;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// `Ok(false)` on a mismatch. A stored hash that bcrypt cannot parse is an
/// internal error, not a failed login.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(password, stored_hash)?)
}
