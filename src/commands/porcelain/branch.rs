use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::CommandError;

impl Repository {
    /// Create a new branch pointing at the current commit
    ///
    /// The new branch is not checked out; HEAD stays where it is.
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(name.to_string())
            .map_err(|err| CommandError::usage(err.to_string()))?;

        if self.refs().branch_exists(&branch) {
            anyhow::bail!(CommandError::state(
                "A branch with that name already exists."
            ));
        }

        let current_oid = self.refs().current_oid()?;
        self.refs().create_branch(&branch, &current_oid)?;

        Ok(())
    }
}
