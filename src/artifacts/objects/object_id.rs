//! Object identifier (SHA-1 digest)
//!
//! Object ids are 40-character hexadecimal strings naming blobs and commits
//! in the object database. Blobs live under `.sprig/blobs/<id>` and commits
//! under `.sprig/commits/<id>`, so the id doubles as the file name.

use crate::artifacts::objects::OBJECT_ID_LENGTH;

/// Object identifier (SHA-1 digest)
///
/// A 40-character hexadecimal string that uniquely identifies an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or an error if the length or characters are invalid
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object id length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object id characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Get the abbreviated form of the object id
    ///
    /// # Returns
    ///
    /// The first 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
