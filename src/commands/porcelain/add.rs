use crate::areas::repository::Repository;
use crate::artifacts::core::CommandError;
use crate::artifacts::objects::blob::Blob;
use std::path::PathBuf;

impl Repository {
    pub fn add(&self, path: &str) -> anyhow::Result<()> {
        let current = self.current_commit()?;

        // "." expands to every regular file in the top level of the working
        // directory; anything else must name an existing file.
        let paths = if path == "." {
            self.workspace().list_files()?
        } else {
            let path = PathBuf::from(path);
            if !self.workspace().file_exists(&path) {
                anyhow::bail!(CommandError::not_found("File does not exist."));
            }
            vec![path]
        };

        let mut staging = self.staging();
        staging.rehydrate()?;

        for path in paths {
            let data = self.workspace().read_file(&path)?;
            let blob = Blob::new(data);
            let oid = self.database().store(&blob)?;

            staging.stage_addition(&path, oid, current.snapshot().get(&path));
        }

        staging.write_updates()?;

        Ok(())
    }
}
