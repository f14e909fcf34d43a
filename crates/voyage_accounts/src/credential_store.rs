use async_trait::async_trait;
use thiserror::Error;

use crate::{password::HashedPassword, user_record::UserRecord};

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Persistence of user records, keyed by email.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, CredentialStoreError>;

    /// Fails with [`CredentialStoreError::DuplicateEmail`] when the email is taken.
    async fn insert(
        &self,
        email: &str,
        password_hash: &HashedPassword,
    ) -> Result<(), CredentialStoreError>;

    /// Releases connections, called once when the server stops.
    async fn shutdown(&self) {}
}
