//! Commit object
//!
//! Commits record the full state of the tracked file tree at one point in
//! time, together with the commit metadata.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! file <blob-digest> <path>
//! parent <commit-digest>
//! timestamp <epoch-seconds> <timezone>
//!
//! <commit message>
//! ```
//!
//! Snapshot lines come first, sorted by path, one per tracked file. A root
//! commit has no parent lines; a merge commit has two, the receiving branch
//! first. The commit's id is the SHA-1 digest of exactly these bytes, which
//! is why the timestamp is captured once at construction and serialized with
//! second precision: identical content committed at different instants gets
//! different ids.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::{Object, ObjectKind, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Mapping from tracked file path to blob digest
pub type Snapshot = BTreeMap<PathBuf, ObjectId>;

/// Commit object
///
/// Immutable once stored. Contains:
/// - Parent commit ids (empty for the root commit, two for merge commits)
/// - The snapshot of tracked files
/// - Creation timestamp
/// - Commit message
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Vec<ObjectId>,
    snapshot: Snapshot,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    message: String,
}

impl Commit {
    /// Create a new commit with the current timestamp
    pub fn new(parents: Vec<ObjectId>, snapshot: Snapshot, message: String) -> Self {
        Commit {
            parents,
            snapshot,
            timestamp: chrono::Local::now().fixed_offset(),
            message,
        }
    }

    /// Create a new commit with a specific timestamp
    pub fn new_with_timestamp(
        parents: Vec<ObjectId>,
        snapshot: Snapshot,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parents,
            snapshot,
            timestamp,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// The receiving-branch parent, followed by `log` and ancestor walks
    /// that only care about the primary lineage
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format the timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for (path, oid) in &self.snapshot {
            lines.push(format!("file {} {}", oid.as_ref(), path.display()));
        }
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(Bytes::from(lines.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(content: Bytes) -> anyhow::Result<Self> {
        let content = String::from_utf8(content.to_vec())?;
        let mut lines = content.lines();

        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;

        let mut snapshot = Snapshot::new();
        while let Some(entry) = next_line.strip_prefix("file ") {
            anyhow::ensure!(
                entry.len() > OBJECT_ID_LENGTH + 1,
                "Invalid commit object: truncated snapshot line"
            );
            let (digest, path) = entry.split_at(OBJECT_ID_LENGTH);
            let oid = ObjectId::try_parse(digest.to_string())?;
            snapshot.insert(PathBuf::from(&path[1..]), oid);

            next_line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }

        let mut parents = Vec::new();
        while let Some(parent) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing timestamp line")?;
        }

        let timestamp_line = next_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let (epoch, timezone) = timestamp_line
            .split_once(' ')
            .context("Invalid commit object: invalid timestamp line")?;
        let epoch = epoch
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid commit object: invalid timestamp"))?;

        // Recover the offset from the timezone string, then re-apply it to
        // the epoch instant so the round trip preserves both.
        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| anyhow::anyhow!("Invalid commit object: invalid timezone"))?
        .offset()
        .to_owned();
        let timestamp = chrono::DateTime::from_timestamp(epoch, 0)
            .context("Invalid commit object: timestamp out of range")?
            .with_timezone(&offset);

        // skip the blank separator line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new_with_timestamp(parents, snapshot, timestamp, message))
    }
}

impl Object for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }
}
