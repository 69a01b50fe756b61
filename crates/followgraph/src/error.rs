//! Error types for followgraph operations.
//!
//! Every fallible operation returns [`Error`]. The variants fall into three
//! classes, which callers can query instead of matching variants by hand:
//!
//! - **Transient**: a page request failed mid-walk (network, HTTP status,
//!   malformed body, cursor protocol). Nothing was persisted; the whole fetch
//!   can be retried.
//! - **Precondition**: the root account of a branch was never seeded. The
//!   branch transaction was rolled back.
//! - **Internal / contract**: storage failures, self-follow attempts, bad
//!   configuration.
//!
//! No failure inside the library is downgraded to a log line. Whatever goes
//! wrong reaches the caller.

use thiserror::Error;

use crate::types::AccountId;

/// Result type for followgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for followgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The page request could not be sent or its body could not be read
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status
    #[error("remote returned {status} for {url}")]
    Status {
        /// HTTP status of the failed page request
        status: reqwest::StatusCode,
        /// Endpoint that was requested (without query string)
        url: String,
    },

    /// A page body was not valid JSON or did not have the expected shape
    #[error("malformed page: {0}")]
    Decode(#[from] serde_json::Error),

    /// The remote broke the cursor protocol or sent an unusable record
    #[error("pagination protocol error: {0}")]
    Protocol(String),

    /// Branch ingest was attempted before the root account was stored
    #[error("account {0} must be seeded before its branch can be ingested")]
    MissingRoot(AccountId),

    /// A branch listed its own root as a follow target
    #[error("account {0} cannot follow itself")]
    SelfFollow(AccountId),

    /// Account ids must be positive
    #[error("invalid account id: {0}")]
    InvalidAccountId(i64),

    /// Text given as an account id is not a number
    #[error("account id {0:?} is not a number")]
    MalformedAccountId(String),

    /// A snapshot file could not be parsed
    #[error("snapshot line {line}: {message}")]
    Snapshot {
        /// 1-based line number of the offending line
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Requested entity doesn't exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Invariant broken inside followgraph itself
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns `true` if the failure happened while talking to the remote
    /// listing and retrying the whole fetch may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::Decode(_) | Self::Protocol(_)
        )
    }

    /// Returns `true` if the caller skipped a required step (seeding the root
    /// account) and must fix that before retrying.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingRoot(_))
    }
}
