//! Error types for gxwf-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for gxwf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gxwf-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No usable login has been configured yet
    #[error("No login details provided: {0}")]
    ConfigMissing(String),

    /// Configuration file exists but cannot be parsed or is inconsistent
    #[error("Configuration file is corrupt: {0}")]
    ConfigCorrupt(String),

    /// Configuration location or schema problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error (saved invocation files)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The Galaxy server could not be reached
    #[error("Could not connect to the Galaxy server: {0}")]
    Unreachable(String),

    /// The Galaxy server rejected the API key
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Alias name not present in the alias map
    #[error("Alias not found: {0}")]
    UnknownAlias(String),

    /// Login name not present in the config
    #[error("Sorry, no login is recorded under the name {0}.")]
    UnknownLogin(String),

    /// Login name already taken
    #[error("A login already exists with the name: {0}")]
    LoginExists(String),

    /// Attempt to delete the active login
    #[error("Sorry, {0} is the active login and cannot be deleted. Please activate a different login first.")]
    ActiveLogin(String),

    /// A delete command was given neither or both of its selectors
    #[error("{0}")]
    AmbiguousDelete(String),

    /// Remote resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server rejected the request as malformed (e.g. an invalid ID)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A delegated remote call failed
    #[error("Remote operation failed: {0}")]
    RemoteOperationFailed(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            // UsageError
            Error::AmbiguousDelete(_)
            | Error::BadRequest(_)
            | Error::Yaml(_)
            | Error::InvalidUrl(_) => 2,
            Error::Unreachable(_) => 3,  // NetworkError
            Error::Unauthorized(_) => 4, // AuthError
            Error::NotFound(_) | Error::UnknownAlias(_) | Error::UnknownLogin(_) => 5, // NotFound
            Error::LoginExists(_) | Error::ActiveLogin(_) => 6, // Conflict
            Error::ConfigMissing(_) => 7,                      // ConfigMissing
            Error::ConfigCorrupt(_) | Error::Config(_) => 8,   // ConfigCorrupt
            Error::RemoteOperationFailed(_) => 9,              // RemoteFailed
            _ => 1,                                            // GeneralError
        }
    }

    /// Whether the remote side answered that the requested object does not
    /// exist or the request did not identify one
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::BadRequest(_))
    }
}
