use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::CommandError;
use std::io::Write;

impl Repository {
    /// Delete a branch pointer
    ///
    /// Only the pointer goes away; the commits it pointed at stay in the
    /// object database.
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;
        if name == head.as_ref() {
            anyhow::bail!(CommandError::state("Cannot remove the current branch."));
        }

        let branch = BranchName::try_parse(name.to_string())
            .map_err(|_| CommandError::not_found("A branch with that name does not exist."))?;
        if !self.refs().branch_exists(&branch) {
            anyhow::bail!(CommandError::not_found(
                "A branch with that name does not exist."
            ));
        }

        self.refs().delete_branch(&branch)?;

        writeln!(self.writer(), "Branch {} removed.", branch)?;

        Ok(())
    }
}
