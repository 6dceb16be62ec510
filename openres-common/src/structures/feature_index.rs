/*
This code is part of the OpenRES hydrogeomorphic analysis library.
Authors: OpenRES developers
Created: 02/06/2025
Last Modified: 16/10/2026
License: MIT
*/

use super::BoundingBox;
use rstar::{RTree, RTreeObject, AABB};

/// A feature's bounding box tagged with the feature id.
#[derive(Debug, Clone)]
struct IndexedBox {
    id: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// An R-tree over feature bounding boxes. Queries are an approximate
/// prefilter: a returned feature's box overlaps the query box, but callers
/// must still verify that the geometries actually interact.
pub struct FeatureIndex {
    tree: RTree<IndexedBox>,
}

impl FeatureIndex {
    /// Builds the index from `(feature id, bounding box)` pairs. Empty boxes
    /// (features without vertices) are left out.
    pub fn new<I>(boxes: I) -> FeatureIndex
    where
        I: IntoIterator<Item = (usize, BoundingBox)>,
    {
        let entries: Vec<IndexedBox> = boxes
            .into_iter()
            .filter(|(_, bb)| !bb.is_empty())
            .map(|(id, bb)| IndexedBox {
                id,
                envelope: bb.to_aabb(),
            })
            .collect();
        FeatureIndex {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Returns the ids of all features whose bounding box overlaps `bb`, in
    /// ascending order.
    pub fn query(&self, bb: &BoundingBox) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&bb.to_aabb())
            .map(|b| b.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
