use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectKind, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::path::{Path, PathBuf};

/// Content-addressed object database
///
/// Blobs live under `blobs/<digest>` and commits under `commits/<digest>`
/// inside the control directory. Objects are written at most once: a digest
/// that already exists on disk names identical bytes, so the write is
/// skipped.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn container_path(&self, kind: ObjectKind) -> PathBuf {
        self.path.join(kind.dir_name())
    }

    /// Store an object, returning its id
    ///
    /// Idempotent: an already-present digest is left untouched. New objects
    /// are written to a temp file and renamed into place, so a crashed
    /// write never leaves a partial object under its digest.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = self.container_path(object.kind()).join(oid.as_ref());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(oid)
    }

    /// Load a blob by digest
    ///
    /// Unlike commits, a missing blob digest is always a hard error: blob
    /// ids only come from snapshots and the staging area, which never refer
    /// to objects that were not stored first.
    pub fn load_blob(&self, oid: &ObjectId) -> anyhow::Result<Blob> {
        let object_path = self.container_path(ObjectKind::Blob).join(oid.as_ref());
        let content = std::fs::read(&object_path).context(format!(
            "Unable to read blob object {}",
            object_path.display()
        ))?;

        Blob::deserialize(content.into())
    }

    /// Load a commit by id
    ///
    /// # Returns
    ///
    /// `None` when no commit with that id exists; callers must check.
    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let object_path = self.container_path(ObjectKind::Commit).join(oid.as_ref());
        if !object_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read(&object_path).context(format!(
            "Unable to read commit object {}",
            object_path.display()
        ))?;

        Ok(Some(Commit::deserialize(content.into())?))
    }

    pub fn commit_exists(&self, oid: &ObjectId) -> bool {
        self.container_path(ObjectKind::Commit)
            .join(oid.as_ref())
            .exists()
    }

    /// List every stored commit id, sorted for stable output
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.container_path(ObjectKind::Commit);
        let mut ids = Vec::new();

        for entry in std::fs::read_dir(&commits_path).context(format!(
            "Unable to read commits directory {}",
            commits_path.display()
        ))? {
            let entry = entry?;
            let file_name = entry.file_name();
            // skip leftover temp files and anything else that is not a digest
            if let Ok(oid) = ObjectId::try_parse(file_name.to_string_lossy().to_string()) {
                ids.push(oid);
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// Used to resolve abbreviated commit ids to their full form. More than
    /// one match means the prefix is ambiguous; the caller decides how to
    /// report that.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.len() == OBJECT_ID_LENGTH {
            return match ObjectId::try_parse(prefix.to_string()) {
                Ok(oid) if self.commit_exists(&oid) => Ok(vec![oid]),
                _ => Ok(vec![]),
            };
        }

        Ok(self
            .commit_ids()?
            .into_iter()
            .filter(|oid| oid.as_ref().starts_with(prefix))
            .collect())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        std::fs::write(&temp_object_path, &object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
