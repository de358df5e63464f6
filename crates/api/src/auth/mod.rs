//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`session`] -- credential checks and server-side session bookkeeping.

pub mod jwt;
pub mod password;
pub mod session;
