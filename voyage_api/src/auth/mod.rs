pub mod login;
pub mod register;
pub mod routes;

use serde::{Deserialize, Serialize};
use voyage_accounts::{AccountError, Credentials};

#[derive(Deserialize, Debug, Default)]
pub struct AuthRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AuthRequest {
    pub fn into_credentials(self) -> Result<Credentials, AccountError> {
        Credentials::new(self.email, self.password)
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
