//! Domain types for the follow graph.
//!
//! - **Entities**: [`Profile`] (one account, as fetched and as stored)
//! - **Transient**: [`Branch`] (a root account plus everything it follows)
//! - **Results**: [`BranchStats`], [`GraphStats`], [`Degree`]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ============================================================================
// Strongly-typed ID wrapper
// ============================================================================

/// Account id as issued by the remote service.
///
/// Ids are immutable and globally unique; handles are not, so the graph is
/// keyed exclusively by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Returns `true` for ids the remote service can actually issue.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for AccountId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::MalformedAccountId(s.to_string()))?;
        let id = Self(id);
        if id.is_valid() {
            Ok(id)
        } else {
            Err(Error::InvalidAccountId(id.0))
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// One account of the follow graph.
///
/// The fetcher produces these from raw listing pages, the store persists them
/// as vertices, and queries return them as full vertex records. Everything
/// except `id` is a mutable snapshot that is overwritten on every upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Primary identity
    pub id: AccountId,
    /// Current handle (screen name); can change, not unique over time
    pub handle: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Profile bio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Follower count at the time the profile was observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<i64>,
    /// Link the account pins to its profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_url: Option<String>,
    /// Public profile page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl Profile {
    /// Create a profile with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<AccountId>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: handle.into(),
            display_name: None,
            description: None,
            follower_count: None,
            pinned_url: None,
            profile_url: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the bio.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the observed follower count.
    #[must_use]
    pub fn with_follower_count(mut self, count: i64) -> Self {
        self.follower_count = Some(count);
        self
    }

    /// Set the pinned link.
    #[must_use]
    pub fn with_pinned_url(mut self, url: impl Into<String>) -> Self {
        self.pinned_url = Some(url.into());
        self
    }

    /// Set the profile page URL.
    #[must_use]
    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }
}

/// A root account plus the accounts one fetch found it following, in the
/// order the remote listing reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Root account whose following list this is
    pub source_id: AccountId,
    /// Followed accounts, in server order
    pub profiles: Vec<Profile>,
}

impl Branch {
    /// Pair a root with the profiles fetched for it.
    #[must_use]
    pub fn new(source_id: AccountId, profiles: Vec<Profile>) -> Self {
        Self {
            source_id,
            profiles,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of a committed branch ingest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BranchStats {
    /// Profiles upserted as vertices (duplicates in the input included).
    pub profiles_processed: usize,
    /// Follow edges the ingest tried to insert.
    pub edges_attempted: usize,
    /// Edges that did not exist before this ingest.
    pub edges_created: usize,
}

/// Size of the stored graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of stored accounts
    pub account_count: usize,
    /// Number of stored follow edges
    pub follow_count: usize,
    /// Accounts with at least one stored out-edge
    pub source_count: usize,
}

/// Stored edge counts of one account.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Degree {
    /// Stored accounts it follows
    pub following: usize,
    /// Stored accounts following it
    pub followers: usize,
}
