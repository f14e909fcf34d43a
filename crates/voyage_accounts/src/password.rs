use scrypt::{
    Params, Scrypt,
    password_hash::{
        Output, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum HashingError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] scrypt::password_hash::Error),

    #[error("invalid scrypt parameters: {0}")]
    Params(#[from] scrypt::errors::InvalidParams),
}

/// Stored form of a password, never the plaintext.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for HashedPassword {
    fn from(value: String) -> Self {
        HashedPassword(value)
    }
}

impl From<&str> for HashedPassword {
    fn from(value: &str) -> Self {
        HashedPassword(value.to_string())
    }
}

/// One-way password hashing. Implementations are CPU bound and blocking.
pub trait PasswordHashing: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<HashedPassword, HashingError>;

    /// A hash that cannot be parsed never verifies.
    fn verify(&self, plaintext: &str, hashed: &HashedPassword) -> bool;
}

/// scrypt producing PHC strings (`$scrypt$ln=..,r=..,p=..$salt$hash`).
///
/// Also verifies `scrypt:n:r:p$salt$hex` hashes written by the werkzeug based
/// server, so existing `trip-planner` databases keep working.
pub struct ScryptPasswordHashing {
    params: Params,
}

impl ScryptPasswordHashing {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Cheap parameters, for tests and local development only.
    pub fn fast() -> Result<Self, HashingError> {
        Ok(Self::new(Params::new(4, 8, 1, Params::RECOMMENDED_LEN)?))
    }
}

impl Default for ScryptPasswordHashing {
    fn default() -> Self {
        Self::new(Params::recommended())
    }
}

const LEGACY_KEY_LEN: usize = 64;

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|start| u8::from_str_radix(&hex[start..start + 2], 16).ok())
        .collect()
}

fn verify_legacy(plaintext: &str, hashed: &str) -> Option<bool> {
    let (method, rest) = hashed.split_once('$')?;
    let (salt, expected) = rest.split_once('$')?;

    let mut method_parts = method.split(':');
    if method_parts.next()? != "scrypt" {
        return None;
    }
    let n: u64 = method_parts.next()?.parse().ok()?;
    let r: u32 = method_parts.next()?.parse().ok()?;
    let p: u32 = method_parts.next()?.parse().ok()?;
    if !n.is_power_of_two() {
        return None;
    }

    let expected = Output::new(&decode_hex(expected)?).ok()?;
    if expected.len() != LEGACY_KEY_LEN {
        return None;
    }

    let params = Params::new(n.trailing_zeros() as u8, r, p, LEGACY_KEY_LEN).ok()?;
    let mut derived = [0u8; LEGACY_KEY_LEN];
    scrypt::scrypt(plaintext.as_bytes(), salt.as_bytes(), &params, &mut derived).ok()?;

    // `Output` compares in constant time
    Some(Output::new(&derived).ok()? == expected)
}

impl PasswordHashing for ScryptPasswordHashing {
    fn hash(&self, plaintext: &str) -> Result<HashedPassword, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt.hash_password_customized(
            plaintext.as_bytes(),
            None,
            None,
            self.params.clone(),
            &salt,
        )?;

        Ok(HashedPassword(hash.to_string()))
    }

    fn verify(&self, plaintext: &str, hashed: &HashedPassword) -> bool {
        if hashed.as_str().starts_with("scrypt:") {
            return verify_legacy(plaintext, hashed.as_str()).unwrap_or_else(|| {
                warn!("Stored legacy password hash is malformed");
                false
            });
        }

        match PasswordHash::new(hashed.as_str()) {
            Ok(parsed) => Scrypt.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
            Err(error) => {
                warn!("Stored password hash is malformed: {}", error);
                false
            }
        }
    }
}
