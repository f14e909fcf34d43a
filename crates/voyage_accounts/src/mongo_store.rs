use async_trait::async_trait;
use mongodb::{
    Client, Collection, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::{Level, debug, info, instrument};

use crate::{
    credential_store::{CredentialStore, CredentialStoreError},
    password::HashedPassword,
    user_record::UserRecord,
};

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "trip-planner";
pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoStoreParams {
    pub uri: String,
    pub database: String,
}

impl Default for MongoStoreParams {
    fn default() -> Self {
        MongoStoreParams {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

pub struct MongoCredentialStore {
    client: Client,
    users: Collection<UserRecord>,
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

impl MongoCredentialStore {
    /// Connects, checks the server answers and makes sure emails are unique.
    pub async fn connect(params: &MongoStoreParams) -> Result<Self, CredentialStoreError> {
        let client = Client::with_uri_str(&params.uri).await?;
        let database = client.database(&params.database);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database {}", params.database);

        let users = database.collection::<UserRecord>(USERS_COLLECTION);
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(unique_email).await?;

        Ok(MongoCredentialStore { client, users })
    }
}

#[async_trait]
impl CredentialStore for MongoCredentialStore {
    #[instrument(skip_all, level = Level::DEBUG)]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, CredentialStoreError> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    async fn insert(
        &self,
        email: &str,
        password_hash: &HashedPassword,
    ) -> Result<(), CredentialStoreError> {
        let record = UserRecord {
            email: email.to_string(),
            password_hash: password_hash.clone(),
        };

        match self.users.insert_one(&record).await {
            Ok(result) => {
                debug!("Inserted user {:?}", result.inserted_id);
                Ok(())
            }
            Err(error) if is_duplicate_key(&error) => Err(CredentialStoreError::DuplicateEmail),
            Err(error) => Err(error.into()),
        }
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
    }
}
