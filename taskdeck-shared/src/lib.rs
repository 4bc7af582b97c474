//! # Taskdeck Shared Library
//!
//! This crate contains the models, authentication primitives, and database
//! layer shared by the Taskdeck API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, session tokens, middleware, permission policy
//! - `audit`: History/notification recording alongside task mutations
//! - `db`: Connection pool, migrations, and one-time seeding

pub mod audit;
pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
