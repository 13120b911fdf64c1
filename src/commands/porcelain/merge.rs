use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::CommandError;
use crate::artifacts::merge::base_finder::SplitPointFinder;
use crate::artifacts::merge::resolution::{self, Resolution};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Merge the given branch into the current branch
    ///
    /// Finds the split point of the two branch tips and classifies every
    /// path that appears in either tip or the split point. Non-conflicting
    /// changes from the target branch are applied to the working directory
    /// and staged; if nothing conflicts, a merge commit recording both
    /// parents is created. Conflicting paths are materialized with conflict
    /// markers and left staged without a commit.
    pub fn merge(&self, target_name: &str) -> anyhow::Result<()> {
        let current_branch = self.refs().read_head()?;
        if target_name == current_branch.as_ref() {
            anyhow::bail!(CommandError::state("Cannot merge a branch with itself."));
        }

        {
            let mut staging = self.staging();
            staging.rehydrate()?;
            if !staging.is_empty() {
                anyhow::bail!(CommandError::state("You have uncommitted changes."));
            }
        }

        let target_branch = BranchName::try_parse(target_name.to_string())
            .map_err(|_| CommandError::not_found("A branch with that name does not exist."))?;
        let target_oid = self
            .refs()
            .read_branch(&target_branch)?
            .ok_or_else(|| CommandError::not_found("A branch with that name does not exist."))?;
        let current_oid = self.refs().current_oid()?;

        let finder = SplitPointFinder::new(|oid: &ObjectId| {
            self.database()
                .load_commit(oid)?
                .map(|commit| commit.parents().to_vec())
                .with_context(|| format!("commit object {} missing from the database", oid))
        });
        let split_oid = finder
            .find_split_point(&current_oid, &target_oid)?
            .context("no common ancestor between the current and target branches")?;

        if split_oid == target_oid {
            anyhow::bail!(CommandError::state(
                "Given branch is an ancestor of the current branch."
            ));
        }
        if split_oid == current_oid {
            // no divergence, just move along the existing history
            self.checkout_branch(target_name)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let current = self.load_merge_commit(&current_oid)?;
        let target = self.load_merge_commit(&target_oid)?;
        let split = self.load_merge_commit(&split_oid)?;

        let mut paths = BTreeSet::new();
        paths.extend(current.snapshot().keys());
        paths.extend(target.snapshot().keys());
        paths.extend(split.snapshot().keys());

        let resolutions = paths
            .into_iter()
            .map(|path| {
                let resolution = resolution::classify(
                    current.snapshot().get(path),
                    target.snapshot().get(path),
                    split.snapshot().get(path),
                );
                (path.clone(), resolution)
            })
            .collect::<Vec<(PathBuf, Resolution)>>();

        // Refuse to clobber untracked files before mutating anything at all.
        for (path, resolution) in &resolutions {
            if resolution.touches_working_file()
                && !current.snapshot().contains_key(path)
                && self.workspace().file_exists(path)
            {
                anyhow::bail!(CommandError::state(
                    "There is an untracked file in the way; delete it or add it first."
                ));
            }
        }

        let mut conflicted = false;
        {
            let mut staging = self.staging();
            staging.rehydrate()?;

            for (path, resolution) in &resolutions {
                match resolution {
                    Resolution::Keep => {}
                    Resolution::Take(digest) => {
                        let blob = self.database().load_blob(digest)?;
                        self.workspace().write_file(path, blob.content())?;
                        staging.stage_addition(path, digest.clone(), current.snapshot().get(path));
                    }
                    Resolution::Delete => {
                        self.workspace().remove_file(path)?;
                        staging.stage_removal(path);
                    }
                    Resolution::Conflict {
                        current: current_digest,
                        target: target_digest,
                    } => {
                        let current_content = self.load_optional_blob(current_digest)?;
                        let target_content = self.load_optional_blob(target_digest)?;
                        let content =
                            resolution::conflict_content(&current_content, &target_content);

                        let blob = Blob::new(content.clone());
                        let digest = self.database().store(&blob)?;
                        self.workspace().write_file(path, &content)?;
                        staging.stage_addition(path, digest, current.snapshot().get(path));

                        conflicted = true;
                    }
                }
            }

            staging.write_updates()?;
        }

        if conflicted {
            anyhow::bail!(CommandError::conflict("Encountered a merge conflict."));
        }

        let message = format!("Merged {} into {}.", target_branch, current_branch);
        self.commit_with_parents(vec![current_oid, target_oid], message)?;

        Ok(())
    }

    fn load_merge_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database()
            .load_commit(oid)?
            .with_context(|| format!("commit object {} missing from the database", oid))
    }

    fn load_optional_blob(&self, digest: &Option<ObjectId>) -> anyhow::Result<bytes::Bytes> {
        match digest {
            Some(oid) => Ok(bytes::Bytes::from(
                self.database().load_blob(oid)?.content().to_vec(),
            )),
            None => Ok(bytes::Bytes::new()),
        }
    }
}
