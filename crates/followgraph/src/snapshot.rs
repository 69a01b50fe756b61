//! JSONL archive of fetched branches.
//!
//! A snapshot stores what a crawl fetched so it can be ingested again later
//! without touching the remote service. Each line is one edge together with
//! the target's profile as observed at fetch time:
//!
//! ```text
//! {"source_id":1312083283,"profile":{"id":12,"handle":"jack","follower_count":6500000}}
//! ```
//!
//! Lines of one branch are contiguous and keep server order. A branch that
//! fetched no profiles has no lines, so it does not survive a round trip;
//! replaying it would have been a no-op anyway.
//!
//! # Atomicity
//!
//! Snapshots are written to a sibling `.tmp` file which is flushed and then
//! renamed over the target. On POSIX filesystems the rename is atomic, so a
//! crash leaves either the old file or the new one, never a torn write.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

use crate::db::GraphStore;
use crate::error::{Error, Result};
use crate::types::{AccountId, Branch, BranchStats, Profile};

#[derive(Serialize)]
struct EdgeLineRef<'a> {
    source_id: AccountId,
    profile: &'a Profile,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeLine {
    source_id: AccountId,
    profile: Profile,
}

/// Atomically write `branches` to `path` as JSONL.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed. The
/// original file, if any, is left untouched.
pub async fn write_snapshot(path: &Path, branches: &[Branch]) -> Result<()> {
    let temp_path = make_temp_path(path);

    if let Err(e) = write_lines(&temp_path, branches).await {
        // Best-effort cleanup of temp file
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;

    tracing::info!(
        path = %path.display(),
        branches = branches.len(),
        "Wrote snapshot"
    );
    Ok(())
}

/// Appends `.tmp` to the file name: `crawl.jsonl` becomes `crawl.jsonl.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_lines(temp_path: &Path, branches: &[Branch]) -> Result<()> {
    let file = File::create(temp_path).await?;
    let mut writer = BufWriter::new(file);

    for branch in branches {
        for profile in &branch.profiles {
            let line = serde_json::to_vec(&EdgeLineRef {
                source_id: branch.source_id,
                profile,
            })?;
            writer.write_all(&line).await?;
            writer.write_all(b"\n").await?;
        }
    }

    writer.flush().await?;
    writer.get_ref().sync_all().await?;
    Ok(())
}

/// Read a snapshot back into branches.
///
/// Consecutive lines with the same `source_id` form one branch; blank lines
/// are skipped.
///
/// # Errors
///
/// Returns [`Error::Snapshot`] with the 1-based line number of the first line
/// that is not a valid edge record, or [`Error::Io`] if the file cannot be
/// read.
pub async fn read_snapshot(path: &Path) -> Result<Vec<Branch>> {
    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut branches: Vec<Branch> = Vec::new();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let edge: EdgeLine = serde_json::from_str(trimmed).map_err(|e| Error::Snapshot {
            line: line_number,
            message: e.to_string(),
        })?;

        match branches.last_mut() {
            Some(branch) if branch.source_id == edge.source_id => branch.profiles.push(edge.profile),
            _ => branches.push(Branch::new(edge.source_id, vec![edge.profile])),
        }
    }

    tracing::debug!(
        path = %path.display(),
        lines = line_number,
        branches = branches.len(),
        "Read snapshot"
    );
    Ok(branches)
}

/// Ingest branches in order, stopping at the first one that fails.
///
/// Branches committed before the failure stay committed; the failing one is
/// rolled back as usual.
///
/// # Errors
///
/// Returns the first ingest error, e.g. [`Error::MissingRoot`] for a branch
/// whose root was never seeded in this store.
pub fn replay(store: &GraphStore, branches: &[Branch]) -> Result<Vec<BranchStats>> {
    branches
        .iter()
        .map(|branch| store.ingest_branch(branch.source_id, &branch.profiles))
        .collect()
}
