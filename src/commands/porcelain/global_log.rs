use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print every commit ever recorded, in creation order
    ///
    /// The global log is an append-only file written as a side effect of
    /// every commit creation, so its order is creation order rather than
    /// any one branch's history.
    pub fn global_log(&self) -> anyhow::Result<()> {
        let log_path = self.global_log_path();
        let content = std::fs::read_to_string(&log_path)
            .with_context(|| format!("failed to read global log at {:?}", log_path))?;

        write!(self.writer(), "{}", content)?;

        Ok(())
    }
}
