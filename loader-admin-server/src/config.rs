//! Server configuration management.
//!
//! Configuration is loaded from environment variables with sensible defaults.
//! This allows for easy deployment in containerized environments.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use rand::Rng;

use crate::error::{Result, ServerError};

/// Length of the secret generated when `JWT_SECRET_KEY` is unset.
const GENERATED_SECRET_LEN: usize = 24;

/// HMAC secret used to sign bearer tokens.
///
/// The bytes never appear in `Debug` output, so the whole configuration
/// can be logged at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret {
    bytes: Vec<u8>,
    generated: bool,
}

impl JwtSecret {
    /// Wrap a secret supplied by the operator.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            generated: false,
        }
    }

    /// Generate a random per-process secret.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; GENERATED_SECRET_LEN];
        rand::rng().fill(&mut bytes[..]);
        Self {
            bytes,
            generated: true,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether this secret was generated rather than configured. Tokens
    /// signed with a generated secret do not survive a restart.
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSecret")
            .field("bytes", &"<redacted>")
            .field("generated", &self.generated)
            .finish()
    }
}

/// MongoDB connection string.
///
/// `Debug` and `Display` mask any `user:password@` section so the URI can
/// be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct MongoUri(String);

impl MongoUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The full URI, credentials included. Only for handing to the driver.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The URI with its userinfo replaced by `<redacted>`.
    pub fn redacted(&self) -> String {
        let Some(scheme_end) = self.0.find("://") else {
            return self.0.clone();
        };
        let rest = &self.0[scheme_end + 3..];
        let authority_end = rest.find(|c| c == '/' || c == '?').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{}<redacted>{}", &self.0[..scheme_end + 3], &rest[at..]),
            None => self.0.clone(),
        }
    }
}

impl fmt::Debug for MongoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MongoUri({:?})", self.redacted())
    }
}

impl fmt::Display for MongoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_host: IpAddr,
    /// HTTP server port (default: 8000)
    pub http_port: u16,
    /// MongoDB connection string
    pub mongodb_uri: MongoUri,
    /// Database holding the `admin` collection
    pub database_name: String,
    /// Token signing secret
    pub jwt_secret: JwtSecret,
    /// File served at `/`
    pub admin_page: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            http_port: 8000,
            mongodb_uri: MongoUri::new("mongodb://localhost:27017/"),
            database_name: String::from("loader_admin"),
            jwt_secret: JwtSecret::generate(),
            admin_page: PathBuf::from("admin.html"),
            static_dir: PathBuf::from("static"),
            log_level: String::from("info"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`: HTTP bind address (default: 0.0.0.0)
    /// - `PORT`: HTTP port (default: 8000)
    /// - `MONGODB_URI`: MongoDB connection string (default: mongodb://localhost:27017/)
    /// - `MONGODB_DATABASE`: Database name (default: loader_admin)
    /// - `JWT_SECRET_KEY`: Token signing secret (default: random per process)
    /// - `ADMIN_PAGE`: File served at `/` (default: admin.html)
    /// - `STATIC_DIR`: Directory served at `/static` (default: static)
    /// - `LOG_LEVEL`: Logging level
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("HOST") {
            config.http_host = val
                .parse()
                .map_err(|_| ServerError::config(format!("Invalid HTTP host: {}", val)))?;
        }

        if let Some(val) = lookup("PORT") {
            config.http_port = val
                .parse()
                .map_err(|_| ServerError::config(format!("Invalid HTTP port: {}", val)))?;
        }

        if let Some(val) = lookup("MONGODB_URI") {
            config.mongodb_uri = MongoUri::new(val);
        }

        if let Some(val) = lookup("MONGODB_DATABASE") {
            if val.is_empty() {
                return Err(ServerError::config("MONGODB_DATABASE must not be empty"));
            }
            config.database_name = val;
        }

        if let Some(val) = lookup("JWT_SECRET_KEY") {
            if !val.is_empty() {
                config.jwt_secret = JwtSecret::new(val.into_bytes());
            }
        }

        if let Some(val) = lookup("ADMIN_PAGE") {
            config.admin_page = PathBuf::from(val);
        }

        if let Some(val) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(val);
        }

        if let Some(val) = lookup("LOG_LEVEL") {
            config.log_level = val;
        }

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.static_dir.is_dir() {
            return Err(ServerError::config(format!(
                "Static directory {:?} does not exist",
                self.static_dir
            )));
        }

        Ok(())
    }

    /// Get the HTTP socket address.
    pub fn http_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::new(self.http_host, self.http_port)
    }
}
