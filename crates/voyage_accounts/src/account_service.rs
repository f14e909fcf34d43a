use std::sync::Arc;

use thiserror::Error;
use tracing::{Level, info, instrument};

use crate::{
    credential_store::{CredentialStore, CredentialStoreError},
    password::{HashingError, PasswordHashing},
};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error(transparent)]
    Store(CredentialStoreError),

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<CredentialStoreError> for AccountError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::DuplicateEmail => AccountError::EmailAlreadyRegistered,
            error => AccountError::Store(error),
        }
    }
}

/// Email and password, both present and non empty. Values are kept as sent.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: Option<String>, password: Option<String>) -> Result<Self, AccountError> {
        match (email, password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok(Credentials { email, password })
            }
            _ => Err(AccountError::MissingCredentials),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    hashing: Arc<dyn PasswordHashing>,
}

impl AccountService {
    pub fn new(store: Arc<dyn CredentialStore>, hashing: Arc<dyn PasswordHashing>) -> Self {
        Self { store, hashing }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    pub async fn register(&self, credentials: Credentials) -> Result<(), AccountError> {
        if self.store.find_by_email(&credentials.email).await?.is_some() {
            return Err(AccountError::EmailAlreadyRegistered);
        }

        let hashing = Arc::clone(&self.hashing);
        let Credentials { email, password } = credentials;
        let password_hash = tokio::task::spawn_blocking(move || hashing.hash(&password)).await??;

        // The unique index still catches a concurrent registration of the same email
        self.store.insert(&email, &password_hash).await?;

        info!("Registered a new user");
        Ok(())
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    pub async fn login(&self, credentials: Credentials) -> Result<(), AccountError> {
        let Some(user) = self.store.find_by_email(&credentials.email).await? else {
            return Err(AccountError::UserNotFound);
        };

        let hashing = Arc::clone(&self.hashing);
        let password = credentials.password;
        let is_valid =
            tokio::task::spawn_blocking(move || hashing.verify(&password, &user.password_hash))
                .await?;

        if is_valid {
            Ok(())
        } else {
            Err(AccountError::InvalidPassword)
        }
    }
}
