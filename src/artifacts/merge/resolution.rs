//! Three-way merge classification
//!
//! Given one path and its blob digests in the current commit, the target
//! branch commit and their split point, `classify` decides what the merge
//! does with that path. An absent digest means the path does not exist in
//! that commit; treating absence as just another value keeps the
//! classification a pure comparison over three digests.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, Bytes, BytesMut};

pub const CONFLICT_MARKER_BEGIN: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_MARKER_MIDDLE: &str = "=======\n";
pub const CONFLICT_MARKER_END: &str = ">>>>>>>\n";

/// What the merge does with one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target branch introduces no change for this path, the current
    /// working and staged state stands
    Keep,
    /// Only the target branch changed the path, take its blob
    Take(ObjectId),
    /// The target branch deleted a path the current branch left untouched
    Delete,
    /// Both sides changed the path in incompatible ways
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

impl Resolution {
    /// Whether applying this resolution writes or deletes the working file
    pub fn touches_working_file(&self) -> bool {
        !matches!(self, Resolution::Keep)
    }
}

/// Classify one path by its digests in the current commit (`current`), the
/// target branch commit (`target`) and the split point (`base`).
pub fn classify(
    current: Option<&ObjectId>,
    target: Option<&ObjectId>,
    base: Option<&ObjectId>,
) -> Resolution {
    if target == current {
        // Identical on both sides, including absent on both
        return Resolution::Keep;
    }

    if target == base {
        // Unchanged in the target branch, whatever the current branch did
        // to the path stands
        return Resolution::Keep;
    }

    if current == base {
        // Changed only in the target branch
        return match target {
            Some(oid) => Resolution::Take(oid.clone()),
            None => Resolution::Delete,
        };
    }

    Resolution::Conflict {
        current: current.cloned(),
        target: target.cloned(),
    }
}

/// Materialize the conflict marker file content for one path
///
/// The current branch's content comes first, the target branch's second; a
/// side that deleted the path contributes nothing between its markers.
pub fn conflict_content(current: &[u8], target: &[u8]) -> Bytes {
    let mut content = BytesMut::with_capacity(
        CONFLICT_MARKER_BEGIN.len()
            + current.len()
            + CONFLICT_MARKER_MIDDLE.len()
            + target.len()
            + CONFLICT_MARKER_END.len(),
    );
    content.put_slice(CONFLICT_MARKER_BEGIN.as_bytes());
    content.put_slice(current);
    content.put_slice(CONFLICT_MARKER_MIDDLE.as_bytes());
    content.put_slice(target);
    content.put_slice(CONFLICT_MARKER_END.as_bytes());

    content.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::OBJECT_ID_LENGTH;
    use pretty_assertions::assert_eq;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(OBJECT_ID_LENGTH)).unwrap()
    }

    #[test]
    fn unchanged_in_target_keeps_current_state() {
        let base = oid('a');
        let current = oid('b');
        // current modified, target untouched since the split
        assert_eq!(
            classify(Some(&current), Some(&base), Some(&base)),
            Resolution::Keep
        );
        // added only in the current branch
        assert_eq!(classify(Some(&current), None, None), Resolution::Keep);
        // deleted only in the current branch
        assert_eq!(classify(None, Some(&base), Some(&base)), Resolution::Keep);
    }

    #[test]
    fn changed_only_in_target_takes_the_target_blob() {
        let base = oid('a');
        let target = oid('b');
        assert_eq!(
            classify(Some(&base), Some(&target), Some(&base)),
            Resolution::Take(target.clone())
        );
        // added only in the target branch
        assert_eq!(
            classify(None, Some(&target), None),
            Resolution::Take(target)
        );
    }

    #[test]
    fn identical_change_on_both_sides_needs_no_action() {
        let base = oid('a');
        let both = oid('b');
        assert_eq!(
            classify(Some(&both), Some(&both), Some(&base)),
            Resolution::Keep
        );
        // both sides deleted the path
        assert_eq!(classify(None, None, Some(&base)), Resolution::Keep);
    }

    #[test]
    fn deleted_in_target_with_untouched_current_deletes() {
        let base = oid('a');
        assert_eq!(
            classify(Some(&base), None, Some(&base)),
            Resolution::Delete
        );
    }

    #[test]
    fn divergent_changes_conflict() {
        let base = oid('a');
        let current = oid('b');
        let target = oid('c');

        // both modified differently
        assert_eq!(
            classify(Some(&current), Some(&target), Some(&base)),
            Resolution::Conflict {
                current: Some(current.clone()),
                target: Some(target.clone()),
            }
        );
        // modified in current, deleted in target
        assert_eq!(
            classify(Some(&current), None, Some(&base)),
            Resolution::Conflict {
                current: Some(current.clone()),
                target: None,
            }
        );
        // deleted in current, modified in target
        assert_eq!(
            classify(None, Some(&target), Some(&base)),
            Resolution::Conflict {
                current: None,
                target: Some(target.clone()),
            }
        );
        // added differently on both sides
        assert_eq!(
            classify(Some(&current), Some(&target), None),
            Resolution::Conflict {
                current: Some(current),
                target: Some(target),
            }
        );
    }

    #[test]
    fn conflict_content_is_byte_exact() {
        let content = conflict_content(b"hello\n", b"world\n");
        assert_eq!(
            &content[..],
            b"<<<<<<< HEAD\nhello\n=======\nworld\n>>>>>>>\n"
        );
    }

    #[test]
    fn conflict_content_with_an_absent_side_is_empty_between_markers() {
        let content = conflict_content(b"", b"world\n");
        assert_eq!(&content[..], b"<<<<<<< HEAD\n=======\nworld\n>>>>>>>\n");
    }
}
