//! Helper functions for database row conversion and error mapping.
//!
//! Also provides SQL fragments shared across query modules so every listing
//! reads columns and orders rows the same way.

use rusqlite::ffi;

use crate::error::Error;
use crate::types::{AccountId, Profile};

/// SQL column list for the accounts table.
///
/// Use with `row_to_profile` for consistent column ordering.
pub(crate) const ACCOUNTS_COLUMNS: &str =
    "id, handle, display_name, description, follower_count, pinned_url, profile_url";

/// Popularity ranking used by every account listing.
///
/// Most-followed first, accounts without a follower count last, then by
/// handle so equal counts come out in a stable order. The trailing id only
/// matters for accounts sharing a handle.
pub(crate) const RANKING: &str = "follower_count DESC NULLS LAST, handle ASC, id ASC";

/// Convert a database row to a [`Profile`].
///
/// Expected columns: see [`ACCOUNTS_COLUMNS`].
pub(crate) fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: AccountId::from(row.get::<_, i64>(0)?),
        handle: row.get(1)?,
        display_name: row.get(2)?,
        description: row.get(3)?,
        follower_count: row.get(4)?,
        pinned_url: row.get(5)?,
        profile_url: row.get(6)?,
    })
}

/// Map a constraint failure raised while merging the branch of `source`.
///
/// Foreign-key failures can only come from the edge insert referencing an
/// unseeded root (targets are upserted earlier in the same transaction), and
/// check failures only from the self-follow guard.
pub(crate) fn classify_branch_error(err: rusqlite::Error, source: AccountId) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            Error::MissingRoot(source)
        }
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_CHECK => {
            Error::SelfFollow(source)
        }
        _ => Error::Database(err),
    }
}
