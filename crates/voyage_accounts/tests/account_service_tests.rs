use std::sync::Arc;

use async_trait::async_trait;
use voyage_accounts::{
    AccountError, AccountService, CredentialStore, CredentialStoreError, Credentials,
    HashedPassword, InMemoryCredentialStore, ScryptPasswordHashing, UserRecord,
};

fn create_service() -> (AccountService, Arc<InMemoryCredentialStore>) {
    let store = Arc::new(InMemoryCredentialStore::new());
    let service = AccountService::new(
        store.clone(),
        Arc::new(ScryptPasswordHashing::fast().unwrap()),
    );
    (service, store)
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials::new(Some(email.to_string()), Some(password.to_string())).unwrap()
}

#[tokio::test]
async fn test_register_then_login() {
    let (service, store) = create_service();

    service
        .register(credentials("ana@example.com", "s3cret"))
        .await
        .unwrap();

    let record = store.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert_ne!(record.password_hash.as_str(), "s3cret");

    service
        .login(credentials("ana@example.com", "s3cret"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_twice_is_conflict() {
    let (service, store) = create_service();

    service
        .register(credentials("ana@example.com", "s3cret"))
        .await
        .unwrap();
    let result = service
        .register(credentials("ana@example.com", "other"))
        .await;

    assert!(matches!(result, Err(AccountError::EmailAlreadyRegistered)));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let (service, _) = create_service();

    service
        .register(credentials("ana@example.com", "s3cret"))
        .await
        .unwrap();
    let result = service.login(credentials("ana@example.com", "wrong")).await;

    assert!(matches!(result, Err(AccountError::InvalidPassword)));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (service, _) = create_service();

    let result = service.login(credentials("nobody@example.com", "s3cret")).await;

    assert!(matches!(result, Err(AccountError::UserNotFound)));
}

/// Simulates another request inserting the same email between the lookup and
/// the insert.
struct RacingStore;

#[async_trait]
impl CredentialStore for RacingStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>, CredentialStoreError> {
        Ok(None)
    }

    async fn insert(
        &self,
        _email: &str,
        _password_hash: &HashedPassword,
    ) -> Result<(), CredentialStoreError> {
        Err(CredentialStoreError::DuplicateEmail)
    }
}

#[tokio::test]
async fn test_concurrent_registration_is_conflict() {
    let service = AccountService::new(
        Arc::new(RacingStore),
        Arc::new(ScryptPasswordHashing::fast().unwrap()),
    );

    let result = service.register(credentials("ana@example.com", "s3cret")).await;

    assert!(matches!(result, Err(AccountError::EmailAlreadyRegistered)));
}
