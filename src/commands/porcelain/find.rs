use crate::areas::repository::Repository;
use crate::artifacts::core::CommandError;
use std::io::Write;

impl Repository {
    /// Print the ids of all commits whose message matches exactly
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().commit_ids()? {
            if let Some(commit) = self.database().load_commit(&oid)?
                && commit.message() == message
            {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            anyhow::bail!(CommandError::not_found(
                "Found no commit with that message."
            ));
        }

        Ok(())
    }
}
