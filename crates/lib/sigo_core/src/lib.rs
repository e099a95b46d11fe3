//! # sigo_core
//!
//! Core domain logic for SIGO: principal model, user store, local
//! authentication primitives, and the SISGPO integration.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod sisgpo;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
