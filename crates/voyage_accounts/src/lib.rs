//! User accounts: credential storage, password hashing and the
//! register/login flows built on top of them.

pub mod account_service;
pub mod credential_store;
pub mod memory_store;
pub mod mongo_store;
pub mod password;
pub mod user_record;

pub use account_service::{AccountError, AccountService, Credentials};
pub use credential_store::{CredentialStore, CredentialStoreError};
pub use memory_store::InMemoryCredentialStore;
pub use mongo_store::{MongoCredentialStore, MongoStoreParams};
pub use password::{HashedPassword, HashingError, PasswordHashing, ScryptPasswordHashing};
pub use user_record::UserRecord;
