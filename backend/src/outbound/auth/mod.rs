//! Credential adapters: signed bearer tokens and password hashing.

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::{JwtTokenService, MIN_SECRET_LEN};
