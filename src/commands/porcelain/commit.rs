use crate::areas::repository::Repository;
use crate::artifacts::core::CommandError;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        {
            let mut staging = self.staging();
            staging.rehydrate()?;
            if staging.is_empty() {
                anyhow::bail!(CommandError::state("No changes added to the commit."));
            }
        }

        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!(CommandError::state("Please enter a commit message."));
        }

        let current_oid = self.refs().current_oid()?;
        self.commit_with_parents(vec![current_oid], message.to_string())?;

        Ok(())
    }

    /// Record the staged changes as a new commit with the given parents and
    /// move the active branch pointer to it
    ///
    /// The new snapshot is the current commit's snapshot overlaid with every
    /// staged addition, minus every staged removal. The staging area is
    /// cleared on success. The regular commit command passes a single
    /// parent; the merge command records the merged-in branch's commit as a
    /// second parent.
    pub(crate) fn commit_with_parents(
        &self,
        parents: Vec<ObjectId>,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let current = self.current_commit()?;
        let mut snapshot = current.snapshot().clone();

        let mut staging = self.staging();
        staging.rehydrate()?;

        for (path, oid) in staging.added() {
            snapshot.insert(path.clone(), oid.clone());
        }
        for path in staging.removed() {
            snapshot.remove(path);
        }

        let oid = self.create_commit(parents, snapshot, message)?;
        self.refs().update_branch(&self.refs().read_head()?, &oid)?;

        staging.clear();
        staging.write_updates()?;

        Ok(oid)
    }
}
