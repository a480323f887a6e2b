//! Identity provider abstraction
//!
//! The identity service that signs users in and issues short-lived identity
//! tokens is an external collaborator. Keeping it behind a trait lets any
//! identity SDK be plugged in, and lets tests run against a mock.

use anyhow::Result;
use async_trait::async_trait;

/// Trait for the external identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns true when a principal is currently signed in.
    async fn is_signed_in(&self) -> bool;

    /// Fetches a fresh short-lived identity token for the signed-in
    /// principal.
    ///
    /// Identity tokens are re-issued per call and must not be cached by the
    /// caller. Fails when no identity session exists.
    async fn id_token(&self) -> Result<String>;

    /// Terminates the identity session.
    async fn sign_out(&self) -> Result<()>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, RwLock};

    /// Mock identity provider for testing.
    ///
    /// Tracks how often an identity token was fetched so tests can assert on
    /// the exchange behaviour; clones share state.
    #[derive(Debug, Clone, Default)]
    pub struct MockIdentityProvider {
        signed_in: Arc<RwLock<bool>>,
        token: Arc<RwLock<String>>,
        token_fetches: Arc<AtomicUsize>,
    }

    impl MockIdentityProvider {
        /// Creates a provider with no identity session.
        pub fn signed_out() -> Self {
            Self::default()
        }

        /// Creates a provider with an active session issuing `token`.
        pub fn signed_in(token: &str) -> Self {
            let provider = Self::default();
            provider.sign_in(token);
            provider
        }

        /// Starts an identity session issuing `token`.
        pub fn sign_in(&self, token: &str) {
            *self.signed_in.write().unwrap() = true;
            *self.token.write().unwrap() = token.to_string();
        }

        /// Returns the number of identity-token fetches so far.
        pub fn token_fetches(&self) -> usize {
            self.token_fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        async fn is_signed_in(&self) -> bool {
            *self.signed_in.read().unwrap()
        }

        async fn id_token(&self) -> Result<String> {
            if !*self.signed_in.read().unwrap() {
                anyhow::bail!("No identity session");
            }
            self.token_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.token.read().unwrap().clone())
        }

        async fn sign_out(&self) -> Result<()> {
            *self.signed_in.write().unwrap() = false;
            Ok(())
        }
    }
}
