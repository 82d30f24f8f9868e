//! Explicit containment forest over contour indices.
//!
//! Contour extractors report containment as four per-contour references:
//! next sibling, previous sibling, first child and parent. This module wraps
//! that flat encoding as a validated forest with traversal helpers, instead
//! of leaving raw index arithmetic at call sites.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Neighbor references of one contour. `None` means "absent".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub next: Option<u32>,
    pub prev: Option<u32>,
    pub first_child: Option<u32>,
    pub parent: Option<u32>,
}

/// Errors from hierarchy construction.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("hierarchy entry {index} references {reference}, out of range for {len} contours")]
    ReferenceOutOfRange {
        index: usize,
        reference: u32,
        len: usize,
    },
    #[error("hierarchy entry {index} references itself")]
    SelfReference { index: usize },
}

/// Depth limit for descendant collection.
///
/// Replaces the conventional `-1` sentinel: `Bounded(0)` collects direct
/// children only, `Unbounded` recurses through every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthLimit {
    Unbounded,
    Bounded(u32),
}

impl DepthLimit {
    /// Depth limit for the next recursion level, or `None` when the current
    /// level's children must not be descended into.
    fn next_level(self) -> Option<DepthLimit> {
        match self {
            DepthLimit::Unbounded => Some(DepthLimit::Unbounded),
            DepthLimit::Bounded(0) => None,
            DepthLimit::Bounded(n) => Some(DepthLimit::Bounded(n - 1)),
        }
    }
}

/// Containment forest for one frame's contours.
///
/// Sibling order is a doubly linked list; multiple roots may coexist.
/// Well-formedness (no cycles) is an upstream extractor contract; this type
/// validates references and otherwise only bounds-checks.
#[derive(Clone, Debug, Default)]
pub struct ContourHierarchy {
    entries: Vec<HierarchyEntry>,
}

impl ContourHierarchy {
    /// Wrap raw entries, validating that every reference is in range and no
    /// entry references itself.
    pub fn new(entries: Vec<HierarchyEntry>) -> Result<Self, HierarchyError> {
        let len = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            for reference in [entry.next, entry.prev, entry.first_child, entry.parent]
                .into_iter()
                .flatten()
            {
                if reference as usize >= len {
                    return Err(HierarchyError::ReferenceOutOfRange {
                        index,
                        reference,
                        len,
                    });
                }
                if reference as usize == index {
                    return Err(HierarchyError::SelfReference { index });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Build the forest from per-contour parent links, chaining siblings in
    /// input order. Infallible: every link it creates is in range by
    /// construction. Parents must appear before their children, which holds
    /// for border-following extractors.
    pub fn from_parent_links(parents: &[Option<usize>]) -> Self {
        let mut entries = vec![HierarchyEntry::default(); parents.len()];
        // Last sibling seen so far per parent (roots keyed by None).
        let mut last: HashMap<Option<usize>, usize> = HashMap::new();
        for (index, &parent) in parents.iter().enumerate() {
            entries[index].parent = parent.map(|p| p as u32);
            match last.get(&parent) {
                Some(&prev) => {
                    entries[prev].next = Some(index as u32);
                    entries[index].prev = Some(prev as u32);
                }
                None => {
                    if let Some(p) = parent {
                        entries[p].first_child = Some(index as u32);
                    }
                }
            }
            last.insert(parent, index);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&HierarchyEntry> {
        self.entries.get(index)
    }

    /// Size of the sibling group containing `index`, inclusive of `index`,
    /// computed exactly as the reference detector does: walk `prev` links
    /// counting one per hop, then restart from `index` and walk `next` links
    /// counting one per hop, and return `backward + forward + 1`.
    ///
    /// This is the value carried on detection elements. See
    /// [`sibling_chain_len`](Self::sibling_chain_len) for the
    /// walk-to-head-then-count variant. An out-of-range `index` counts
    /// nothing, matching [`collect_descendants`](Self::collect_descendants).
    pub fn sibling_group_count(&self, index: usize) -> usize {
        if index >= self.entries.len() {
            return 0;
        }
        let mut count = 0usize;

        let mut cursor = index;
        while let Some(prev) = self.entries[cursor].prev {
            count += 1;
            cursor = prev as usize;
        }

        let mut cursor = index;
        while let Some(next) = self.entries[cursor].next {
            count += 1;
            cursor = next as usize;
        }

        count + 1
    }

    /// Length of the sibling chain containing `index`: walk to the chain
    /// head once, then count every node forward exactly once. An
    /// out-of-range `index` counts nothing.
    pub fn sibling_chain_len(&self, index: usize) -> usize {
        if index >= self.entries.len() {
            return 0;
        }
        let mut head = index;
        while let Some(prev) = self.entries[head].prev {
            head = prev as usize;
        }
        let mut count = 1usize;
        while let Some(next) = self.entries[head].next {
            count += 1;
            head = next as usize;
        }
        count
    }

    /// Collect the descendants of `index` in flattened pre-order: each child
    /// is followed by its own subtree before its next sibling. `index`
    /// itself is never included.
    pub fn collect_descendants(&self, index: usize, limit: DepthLimit) -> Vec<usize> {
        let mut out = Vec::new();
        if index < self.entries.len() {
            self.collect_into(index, limit, &mut out);
        }
        out
    }

    fn collect_into(&self, index: usize, limit: DepthLimit, out: &mut Vec<usize>) {
        let mut cursor = self.entries[index].first_child;
        while let Some(child) = cursor {
            let child = child as usize;
            out.push(child);
            if let Some(deeper) = limit.next_level() {
                self.collect_into(child, deeper, out);
            }
            cursor = self.entries[child].next;
        }
    }
}
