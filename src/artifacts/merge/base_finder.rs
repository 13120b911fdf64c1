//! Split point finder for merge operations
//!
//! The split point of two branch tips is the baseline for the three-way
//! merge comparison: the lowest common ancestor of both commits in the
//! commit graph.
//!
//! ## Algorithm
//!
//! 1. Breadth-first traversal from each tip, fanning out over ALL parents
//!    of every commit (merge commits have two), recording the minimum depth
//!    at which each ancestor is reached.
//! 2. Mark every reached commit with the side(s) it was reached from.
//! 3. Commits reached from both sides are common ancestors; the one with
//!    the minimum combined depth is the split point. Picking by depth
//!    rather than by first intersection hit guarantees the NEAREST common
//!    ancestor even when the ancestor sets intersect at many points.
//!
//! Ties on combined depth (criss-cross histories) are broken by digest
//! order so the result is deterministic.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature flag
//! (`cargo build --features debug_merge`) to trace visit states, common
//! ancestors and the chosen split point on stderr.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH =
            Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

/// Finds the split point between two commits
///
/// Generic over a commit loader function so the algorithm works against any
/// storage backend (the object database in production, an in-memory map in
/// tests). The loader returns the parent ids of the given commit.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `tip` by following parent links,
    /// including `tip` itself
    ///
    /// Terminates because the commit graph is acyclic and bottoms out at
    /// parentless root commits.
    pub fn ancestors_of(&self, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        Ok(self.depths_from(tip)?.into_keys().collect())
    }

    /// Find the lowest common ancestor of `source` and `target`
    ///
    /// # Returns
    ///
    /// `None` only when the two commits share no ancestor at all, which
    /// cannot happen for histories grown from a single root commit.
    pub fn find_split_point(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_depths = self.depths_from(source)?;
        let target_depths = self.depths_from(target)?;

        let mut states: HashMap<&ObjectId, VisitState> = HashMap::new();
        for oid in source_depths.keys() {
            states.insert(oid, VisitState::VISITED_FROM_SOURCE);
        }
        for oid in target_depths.keys() {
            states
                .entry(oid)
                .and_modify(|state| state.insert(VisitState::VISITED_FROM_TARGET))
                .or_insert(VisitState::VISITED_FROM_TARGET);
        }

        let mut best: Option<(usize, &ObjectId)> = None;
        for (oid, state) in &states {
            if !state.contains(VisitState::VISITED_FROM_BOTH) {
                continue;
            }

            let combined_depth = source_depths[*oid] + target_depths[*oid];
            debug_log!(
                "common ancestor {} at combined depth {} ({:?})",
                oid,
                combined_depth,
                state
            );

            let better = match best {
                None => true,
                Some((best_depth, best_oid)) => {
                    combined_depth < best_depth
                        || (combined_depth == best_depth && *oid < best_oid)
                }
            };
            if better {
                best = Some((combined_depth, *oid));
            }
        }

        debug_log!(
            "split point of {} and {}: {:?}",
            source,
            target,
            best.map(|(_, oid)| oid)
        );

        Ok(best.map(|(_, oid)| oid.clone()))
    }

    /// Breadth-first traversal from `tip` recording the minimum number of
    /// parent links to reach each ancestor
    fn depths_from(&self, tip: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut depths = HashMap::new();
        let mut to_visit = VecDeque::new();

        depths.insert(tip.clone(), 0);
        to_visit.push_back(tip.clone());

        while let Some(oid) = to_visit.pop_front() {
            let depth = depths[&oid];

            for parent in (self.commit_loader)(&oid)? {
                if !depths.contains_key(&parent) {
                    depths.insert(parent.clone(), depth + 1);
                    to_visit.push_back(parent);
                }
            }
        }

        Ok(depths)
    }
}
