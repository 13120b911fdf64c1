use crate::areas::repository::Repository;
use anyhow::Context;

impl Repository {
    /// Move the current branch to the given commit and restore its snapshot
    ///
    /// Same untracked-file guard and file materialization as a branch
    /// checkout, but HEAD keeps naming the same branch; only the branch
    /// pointer moves.
    pub fn reset(&self, commit_id: &str) -> anyhow::Result<()> {
        let oid = self.resolve_commit_id(commit_id)?;
        let target = self
            .database()
            .load_commit(&oid)?
            .with_context(|| format!("commit object {} missing from the database", oid))?;

        self.restore_snapshot(&target)?;
        self.refs().update_branch(&self.refs().read_head()?, &oid)?;

        Ok(())
    }
}
