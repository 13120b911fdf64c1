use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;
        let branches = self.refs().list_branches()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        writeln!(self.writer(), "=== Branches ===")?;
        for branch in &branches {
            if branch == &head {
                writeln!(self.writer(), "{}", format!("*{}", branch).as_str().green())?;
            } else {
                writeln!(self.writer(), "{}", branch)?;
            }
        }

        writeln!(self.writer())?;
        writeln!(self.writer(), "=== Staged Files ===")?;
        for (path, _) in staging.added() {
            writeln!(self.writer(), "{}", path.display())?;
        }

        writeln!(self.writer())?;
        writeln!(self.writer(), "=== Removed Files ===")?;
        for path in staging.removed() {
            writeln!(self.writer(), "{}", path.display())?;
        }

        writeln!(self.writer())?;
        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        writeln!(self.writer())?;
        writeln!(self.writer(), "=== Untracked Files ===")?;

        Ok(())
    }
}
