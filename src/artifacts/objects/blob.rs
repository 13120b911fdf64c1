//! Blob object
//!
//! Blobs store tracked file content as full snapshots. The stored bytes are
//! exactly the file bytes, so a blob's id is the SHA-1 digest of the file
//! content itself.

use crate::artifacts::objects::object::{Object, ObjectKind, Packable, Unpackable};
use bytes::Bytes;
use derive_new::new;

/// Blob object representing one file's content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(content: Bytes) -> anyhow::Result<Self> {
        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }
}
