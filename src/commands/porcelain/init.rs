use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::CommandError;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::ObjectKind;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";
const ROOT_COMMIT_MESSAGE: &str = "initial commit";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(CommandError::state(
                "A sprig version-control system already exists in the current directory."
            ));
        }

        fs::create_dir_all(self.database().container_path(ObjectKind::Blob))
            .context("Failed to create the blobs directory")?;
        fs::create_dir_all(self.database().container_path(ObjectKind::Commit))
            .context("Failed to create the commits directory")?;
        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create the branches directory")?;
        fs::create_dir_all(
            self.global_log_path()
                .parent()
                .context("Invalid global log path")?,
        )
        .context("Failed to create the global-log directory")?;

        // Every repository starts from the same shape: a root commit with an
        // empty snapshot, a default branch pointing at it, and HEAD on that
        // branch.
        let root_oid = self.create_commit(vec![], Snapshot::new(), ROOT_COMMIT_MESSAGE.to_string())?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .create_branch(&default_branch, &root_oid)
            .context("Failed to create the default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create the initial HEAD reference")?;

        let mut staging = self.staging();
        fs::create_dir_all(
            staging
                .path()
                .parent()
                .context("Invalid staging record path")?,
        )
        .context("Failed to create the staging directory")?;
        // clear marks the record dirty so the empty staging file gets written
        staging.clear();
        staging.write_updates()?;

        writeln!(
            self.writer(),
            "Initialized an empty sprig repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
