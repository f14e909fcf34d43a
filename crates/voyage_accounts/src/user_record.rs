use serde::{Deserialize, Serialize};

use crate::password::HashedPassword;

/// Document stored in the `users` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: HashedPassword,
}
