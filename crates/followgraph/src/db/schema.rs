//! Database schema definition for the follow graph.

/// Database schema definition.
///
/// The graph invariants live here rather than in application code: the
/// composite primary key makes duplicate edges detectable, the foreign keys
/// make a branch with an unseeded root fail, and the check constraint makes
/// self-follows impossible regardless of the caller.
pub(crate) const SCHEMA: &str = r"
-- Vertices: one row per account ever observed
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY,
    handle TEXT NOT NULL,
    display_name TEXT,
    description TEXT,
    follower_count INTEGER,
    pinned_url TEXT,
    profile_url TEXT
);

CREATE INDEX IF NOT EXISTS idx_accounts_handle ON accounts(handle);

-- Edges: source follows target
CREATE TABLE IF NOT EXISTS follows (
    source_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    target_id INTEGER NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
    PRIMARY KEY (source_id, target_id),
    CHECK (source_id <> target_id)
);

-- The primary key already covers lookups by source; intersections and
-- follower listings go through target.
CREATE INDEX IF NOT EXISTS idx_follows_target ON follows(target_id);
";
