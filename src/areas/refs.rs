//! References (branches, HEAD)
//!
//! References are human-readable names pointing to commits, stored as flat
//! text files under the `branches/` directory of the control directory:
//!
//! - `branches/<name>`: a 40-character commit digest
//! - `branches/HEAD`: the name of the active branch
//!
//! Exactly one branch is active at a time. Branch pointers are the only
//! mutable part of the persisted history.

use crate::artifacts::branch::branch_name::{BranchName, HEAD_REF_NAME};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

/// Reference manager
///
/// Handles reading and writing branch pointers and the HEAD file.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the branches directory
    path: Box<Path>,
}

impl Refs {
    pub fn branches_path(&self) -> &Path {
        &self.path
    }

    fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.path.join(name.as_ref()).into_boxed_path()
    }

    /// Read the name of the active branch from the HEAD file
    pub fn read_head(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD file at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
    }

    /// Make the given branch the active one
    pub fn set_head(&self, name: &BranchName) -> anyhow::Result<()> {
        self.write_ref_file(self.head_path(), name.as_ref())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).exists()
    }

    /// Read the commit id a branch points at
    ///
    /// # Returns
    ///
    /// `None` when no branch of that name exists
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Move an existing branch pointer to a new commit
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref_file(self.branch_path(name), oid.as_ref())
    }

    /// Bind a new branch name to a commit
    ///
    /// The caller is responsible for rejecting names that already exist;
    /// this only performs the write.
    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref_file(self.branch_path(name), oid.as_ref())
    }

    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))
    }

    /// List all branches, sorted by name, HEAD excluded
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let mut branches = Vec::new();

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("failed to read branches directory at {:?}", self.path))?
        {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if file_name == HEAD_REF_NAME {
                continue;
            }
            branches.push(BranchName::try_parse(file_name)?);
        }

        branches.sort();
        Ok(branches)
    }

    /// The commit id of the active branch
    pub fn current_oid(&self) -> anyhow::Result<ObjectId> {
        let head = self.read_head()?;
        self.read_branch(&head)?
            .with_context(|| format!("active branch {} has no commit", head))
    }

    fn write_ref_file(&self, path: Box<Path>, content: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(&path, content)
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }
}
