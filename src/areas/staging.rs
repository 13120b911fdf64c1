//! Staging area
//!
//! The staging area buffers pending changes between working-directory edits
//! and the next commit. It maintains two sets:
//!
//! - `added`: files staged for addition, mapped to their blob digests
//! - `removed`: files staged for removal
//!
//! A path never occupies both sets at once: staging an addition clears a
//! pending removal for that path and vice versa. The whole record is
//! persisted at `staging/stage` in the binary format described in
//! `artifacts::staging` and cleared atomically on successful commit,
//! checkout and reset.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::checksum::Checksum;
use crate::artifacts::staging::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Staging area state and persistence
#[derive(Debug, Clone)]
pub struct Staging {
    /// Path to the staging record file
    path: Box<Path>,
    /// Files staged for addition, mapped to their blob digests
    added: BTreeMap<PathBuf, ObjectId>,
    /// Files staged for removal
    removed: BTreeSet<PathBuf>,
    /// Flag indicating unpersisted modifications
    changed: bool,
}

impl Staging {
    pub fn new(path: Box<Path>) -> Self {
        Staging {
            path,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.added.iter()
    }

    pub fn removed(&self) -> impl Iterator<Item = &PathBuf> {
        self.removed.iter()
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.added.contains_key(path)
    }

    /// Stage a file for addition
    ///
    /// When the digest equals what the current commit already records for
    /// the path, the working copy matches history and there is nothing to
    /// stage; any pending state for the path is dropped instead.
    pub fn stage_addition(
        &mut self,
        path: &Path,
        digest: ObjectId,
        committed: Option<&ObjectId>,
    ) {
        if committed == Some(&digest) {
            self.added.remove(path);
            self.removed.remove(path);
        } else {
            self.removed.remove(path);
            self.added.insert(path.to_path_buf(), digest);
        }
        self.changed = true;
    }

    /// Stage a tracked file for removal, dropping any pending addition
    pub fn stage_removal(&mut self, path: &Path) {
        self.added.remove(path);
        self.removed.insert(path.to_path_buf());
        self.changed = true;
    }

    /// Drop a pending addition without recording a removal
    pub fn unstage(&mut self, path: &Path) {
        self.added.remove(path);
        self.changed = true;
    }

    /// Empty both pending-change sets
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.changed = true;
    }

    fn reset(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.changed = false;
    }

    /// Load the staging record from disk
    ///
    /// Parses the header and entries and verifies the trailing checksum. A
    /// missing or empty file is a valid empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        if !self.path.exists() {
            return Ok(());
        }

        let mut stage_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        if stage_file.metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(&mut stage_file);
        let (added_count, removed_count) = Self::parse_header(&mut reader)?;
        self.parse_entries(added_count, removed_count, &mut reader)?;

        reader.verify()
    }

    /// Rewrite the whole staging record, if anything changed since loading
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut stage_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = Checksum::new(&mut stage_file);

        let mut header = Vec::with_capacity(HEADER_SIZE);
        header.extend_from_slice(SIGNATURE.as_bytes());
        header.write_u32::<BigEndian>(VERSION)?;
        header.write_u32::<BigEndian>(self.added.len() as u32)?;
        header.write_u32::<BigEndian>(self.removed.len() as u32)?;
        writer.write(&header)?;

        for (path, oid) in &self.added {
            let mut entry = Vec::new();
            Self::write_path(&mut entry, path)?;
            entry.extend_from_slice(oid.as_ref().as_bytes());
            writer.write(&entry)?;
        }

        for path in &self.removed {
            let mut entry = Vec::new();
            Self::write_path(&mut entry, path)?;
            writer.write(&entry)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<(u32, u32)> {
        let header = reader.read(HEADER_SIZE)?;

        if &header[..4] != SIGNATURE.as_bytes() {
            return Err(anyhow!("Invalid staging record signature"));
        }

        let version = BigEndian::read_u32(&header[4..8]);
        if version != VERSION {
            return Err(anyhow!("Unsupported staging record version: {}", version));
        }

        let added_count = BigEndian::read_u32(&header[8..12]);
        let removed_count = BigEndian::read_u32(&header[12..16]);

        Ok((added_count, removed_count))
    }

    fn parse_entries(
        &mut self,
        added_count: u32,
        removed_count: u32,
        reader: &mut Checksum,
    ) -> anyhow::Result<()> {
        for _ in 0..added_count {
            let path = Self::read_path(reader)?;
            let digest = reader.read(OBJECT_ID_LENGTH)?;
            let oid = ObjectId::try_parse(String::from_utf8(digest.to_vec())?)?;
            self.added.insert(path, oid);
        }

        for _ in 0..removed_count {
            let path = Self::read_path(reader)?;
            self.removed.insert(path);
        }

        Ok(())
    }

    fn write_path(entry: &mut Vec<u8>, path: &Path) -> anyhow::Result<()> {
        let path_bytes = path.to_string_lossy().into_owned().into_bytes();
        anyhow::ensure!(
            path_bytes.len() <= u16::MAX as usize,
            "staged path exceeds maximum length: {:?}",
            path
        );
        entry.write_u16::<BigEndian>(path_bytes.len() as u16)?;
        entry.extend_from_slice(&path_bytes);

        Ok(())
    }

    fn read_path(reader: &mut Checksum) -> anyhow::Result<PathBuf> {
        let length = BigEndian::read_u16(&reader.read(2)?);
        let path_bytes = reader.read(length as usize)?;

        Ok(PathBuf::from(String::from_utf8(path_bytes.to_vec())?))
    }
}
