// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the route tree: node identifiers, edges, and query results.

use kurbo::{Line, Point};

/// Identifier for a node in the tree (generational).
///
/// A `NodeId` stays valid until its node is freed. Once the slot is reused,
/// the generation differs and the old identifier is reported as invalid
/// instead of aliasing the new node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this identifier.
    ///
    /// Slot indices are reused after a node is freed; use the full `NodeId`
    /// for identity.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of the slot at the time this identifier was handed out.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// One drawn segment of a route: an ordered `(parent, child)` pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Edge {
    /// The parent end of the segment.
    pub from: NodeId,
    /// The child end of the segment.
    pub to: NodeId,
}

impl Edge {
    /// Create an edge from `from` (parent) to `to` (child).
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

/// Render-ready view of an [`Edge`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    /// The tree edge this segment draws.
    pub edge: Edge,
    /// Segment geometry, from the parent position to the child position.
    pub line: Line,
    /// Whether the child end is a joint node and needs a branch marker.
    pub joint: bool,
}

/// Where a point sits on a segment, see [`crate::belongs_to_line`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LineHit {
    /// The point coincides with the first reference point.
    Start,
    /// The point coincides with the second reference point.
    End,
    /// The point lies strictly between the two reference points.
    Interior,
}

/// Result of a trajectory hit test against the whole route.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TrajectoryHit {
    /// An existing node was hit.
    Node(NodeId),
    /// The inside of an edge was hit.
    Edge(Edge),
}

/// What the pointer grabs when pressing near a route.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Grab {
    /// A single node.
    Node(NodeId),
    /// Both endpoints of a segment.
    Edge(Edge),
}

impl Grab {
    /// The grabbed node identifiers: one for a node, two for an edge.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        let (a, b) = match *self {
            Self::Node(n) => (n, None),
            Self::Edge(e) => (e.from, Some(e.to)),
        };
        core::iter::once(a).chain(b)
    }
}

/// Closest point of a route to some query position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NearestPoint {
    /// The closest point on the route.
    pub point: Point,
    /// The edge the point lies on.
    pub edge: Edge,
    /// Squared distance between the query position and `point`.
    pub distance_sq: f64,
}
