use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show the history of the current branch, newest first
    ///
    /// Follows the first parent from the current commit down to the root,
    /// so a merge commit shows the receiving branch's lineage; the merged-in
    /// lineage is referenced by the `Merge:` line.
    pub fn log(&self) -> anyhow::Result<()> {
        let mut current_oid = Some(self.refs().current_oid()?);

        while let Some(oid) = current_oid {
            let commit = self
                .database()
                .load_commit(&oid)?
                .with_context(|| format!("commit object {} missing from the database", oid))?;

            self.show_commit(&oid, &commit)?;

            current_oid = commit.first_parent().cloned();
        }

        Ok(())
    }

    pub(crate) fn show_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "{}", format!("commit {}", oid).as_str().yellow())?;
        if commit.is_merge() {
            let short_ids = commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {}", short_ids)?;
        }
        writeln!(self.writer(), "Date:   {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
