use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::CommandError;
use crate::artifacts::objects::commit::{Commit, Snapshot};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the control directory anchored in the working directory root
pub const CONTROL_DIR: &str = ".sprig";

/// High-level repository handle
///
/// Ties the persistent areas together and carries the output writer. One
/// instance per command invocation; all repository state lives on disk, so
/// multiple instances over the same directory see the same repository.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    staging: RefCell<Staging>,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let control_path = path.join(CONTROL_DIR);

        let database = Database::new(control_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(control_path.join("branches").into_boxed_path());
        let staging = Staging::new(control_path.join("staging").join("stage").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
            staging: RefCell::new(staging),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_path(&self) -> PathBuf {
        self.path.join(CONTROL_DIR)
    }

    pub fn global_log_path(&self) -> PathBuf {
        self.control_path().join("global-log").join("log")
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Borrow the staging area mutably
    ///
    /// Commands must not hold this borrow across calls that borrow the
    /// staging area again.
    pub fn staging(&'_ self) -> RefMut<'_, Staging> {
        self.staging.borrow_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.control_path().exists()
    }

    pub fn require_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!(CommandError::state(
                "Not in an initialized sprig repository."
            ));
        }
        Ok(())
    }

    /// The commit the active branch points at
    pub fn current_commit(&self) -> anyhow::Result<Commit> {
        let oid = self.refs.current_oid()?;
        self.database
            .load_commit(&oid)?
            .with_context(|| format!("commit object {} missing from the database", oid))
    }

    /// Construct and persist a commit, returning its id
    pub(crate) fn create_commit(
        &self,
        parents: Vec<ObjectId>,
        snapshot: Snapshot,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(parents, snapshot, message);
        let oid = self.database.store(&commit)?;

        // the global log is best-effort, a failed append never fails the commit
        let _ = self.append_global_log(&oid, &commit);

        Ok(oid)
    }

    fn append_global_log(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let log_path = self.global_log_path();
        let mut log_file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&log_path)
            .with_context(|| format!("failed to open global log at {:?}", log_path))?;

        writeln!(log_file, "===")?;
        writeln!(log_file, "commit {}", oid)?;
        if commit.is_merge() {
            let short_ids = commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(log_file, "Merge: {}", short_ids)?;
        }
        writeln!(log_file, "Date:   {}", commit.readable_timestamp())?;
        writeln!(log_file, "{}", commit.message())?;
        writeln!(log_file)?;

        Ok(())
    }

    /// Resolve a full or abbreviated commit id
    pub(crate) fn resolve_commit_id(&self, commit_id: &str) -> anyhow::Result<ObjectId> {
        let matches = self.database.find_commits_by_prefix(commit_id)?;

        match matches.as_slice() {
            [oid] => Ok(oid.clone()),
            [] => anyhow::bail!(CommandError::not_found("No commit with that id exists.")),
            _ => anyhow::bail!(CommandError::not_found(format!(
                "Ambiguous commit id prefix: {}.",
                commit_id
            ))),
        }
    }

    /// Replace the working directory contents with a commit's snapshot
    ///
    /// Guards against clobbering untracked files first and makes no changes
    /// when the guard fires: any file present in the target snapshot,
    /// absent from the current commit's snapshot and already existing on
    /// disk aborts the operation. Otherwise every file tracked only by the
    /// current commit is deleted, every blob in the target snapshot is
    /// materialized and the staging area is cleared.
    pub(crate) fn restore_snapshot(&self, target: &Commit) -> anyhow::Result<()> {
        let current = self.current_commit()?;

        for path in target.snapshot().keys() {
            if !current.snapshot().contains_key(path) && self.workspace.file_exists(path) {
                anyhow::bail!(CommandError::state(
                    "There is an untracked file in the way; delete it or add it first."
                ));
            }
        }

        for path in current.snapshot().keys() {
            if !target.snapshot().contains_key(path) {
                self.workspace.remove_file(path)?;
            }
        }

        for (path, digest) in target.snapshot() {
            let blob = self.database.load_blob(digest)?;
            self.workspace.write_file(path, blob.content())?;
        }

        let mut staging = self.staging();
        staging.rehydrate()?;
        staging.clear();
        staging.write_updates()?;

        Ok(())
    }
}
