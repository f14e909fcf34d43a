use async_trait::async_trait;
use fxhash::FxHashMap;
use parking_lot::RwLock;

use crate::{
    credential_store::{CredentialStore, CredentialStoreError},
    password::HashedPassword,
    user_record::UserRecord,
};

/// Process local store, for development without a database and for tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<FxHashMap<String, UserRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, CredentialStoreError> {
        Ok(self.users.read().get(email).cloned())
    }

    async fn insert(
        &self,
        email: &str,
        password_hash: &HashedPassword,
    ) -> Result<(), CredentialStoreError> {
        let mut users = self.users.write();
        if users.contains_key(email) {
            return Err(CredentialStoreError::DuplicateEmail);
        }

        users.insert(
            email.to_string(),
            UserRecord {
                email: email.to_string(),
                password_hash: password_hash.clone(),
            },
        );

        Ok(())
    }
}
