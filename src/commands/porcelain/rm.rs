use crate::areas::repository::Repository;
use crate::artifacts::core::CommandError;
use std::path::PathBuf;

impl Repository {
    pub fn rm(&self, path: &str) -> anyhow::Result<()> {
        let path = PathBuf::from(path);
        let current = self.current_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        let tracked = current.snapshot().contains_key(&path);
        let staged = staging.is_staged_for_addition(&path);

        if tracked {
            // tracked files lose their working copy and are staged for
            // removal; a pending addition for the path is dropped with it
            self.workspace().remove_file(&path)?;
            staging.stage_removal(&path);
        } else if staged {
            staging.unstage(&path);
        } else {
            anyhow::bail!(CommandError::state("No reason to remove the file."));
        }

        staging.write_updates()?;

        Ok(())
    }
}
