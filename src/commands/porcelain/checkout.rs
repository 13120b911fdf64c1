use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::CommandError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Switch the working directory and HEAD to another branch
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;
        if name == head.as_ref() {
            anyhow::bail!(CommandError::state(
                "No need to checkout the current branch."
            ));
        }

        let branch = BranchName::try_parse(name.to_string())
            .map_err(|_| CommandError::not_found("No such branch exists."))?;
        let target_oid = self
            .refs()
            .read_branch(&branch)?
            .ok_or_else(|| CommandError::not_found("No such branch exists."))?;
        let target = self
            .database()
            .load_commit(&target_oid)?
            .with_context(|| format!("commit object {} missing from the database", target_oid))?;

        self.restore_snapshot(&target)?;
        self.refs().set_head(&branch)?;

        Ok(())
    }

    /// Overwrite a working file with its version in the current commit
    pub fn checkout_file_from_head(&self, path: &str) -> anyhow::Result<()> {
        let current = self.current_commit()?;
        self.checkout_file(&current, Path::new(path))
    }

    /// Overwrite a working file with its version in the given commit
    pub fn checkout_file_from_commit(&self, commit_id: &str, path: &str) -> anyhow::Result<()> {
        let oid = self.resolve_commit_id(commit_id)?;
        let commit = self
            .database()
            .load_commit(&oid)?
            .with_context(|| format!("commit object {} missing from the database", oid))?;

        self.checkout_file(&commit, Path::new(path))
    }

    fn checkout_file(&self, commit: &Commit, path: &Path) -> anyhow::Result<()> {
        let digest = commit
            .snapshot()
            .get(path)
            .ok_or_else(|| CommandError::not_found("File does not exist in that commit."))?;

        let blob = self.database().load_blob(digest)?;
        self.workspace().write_file(path, blob.content())
    }
}
