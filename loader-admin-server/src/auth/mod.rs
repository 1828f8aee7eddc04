//! Admin login: credential parsing, password check and token issuance.

pub mod password;
pub mod token;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{Result, ServerError};
use crate::store::AdminStore;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer, TOKEN_TTL_HOURS};

/// Username and password taken from a login request.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Extract credentials from a raw JSON request body.
    ///
    /// An empty body is treated as `{}`. Both fields must be non-empty
    /// strings.
    pub fn from_json_body(body: &[u8]) -> Result<Self> {
        let fields = if body.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(fields)) => fields,
                _ => return Err(ServerError::bad_request("Request body must be a JSON object")),
            }
        };

        let field = |name: &str| {
            fields
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match (field("username"), field("password")) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(ServerError::MissingCredentials),
        }
    }
}

/// Check credentials against the store and issue a token on success.
///
/// An unknown username and a wrong password both yield
/// [`ServerError::InvalidCredentials`].
pub async fn authenticate(
    store: &dyn AdminStore,
    tokens: &TokenIssuer,
    credentials: Credentials,
) -> Result<String> {
    let Credentials { username, password } = credentials;

    let Some(record) = store.find_by_username(&username).await? else {
        debug!("Login rejected: no admin record for {}", username);
        return Err(ServerError::InvalidCredentials);
    };

    if !verify_password(password, record.password_hash).await? {
        debug!("Login rejected: password mismatch for {}", username);
        return Err(ServerError::InvalidCredentials);
    }

    let token = tokens.issue(&username)?;
    info!("Admin {} logged in", username);
    Ok(token)
}
