// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restartable traversal cursors.
//!
//! A cursor is plain data: it remembers where a walk stands and is advanced
//! against a borrowed [`RouteTree`]. Several cursors can walk the same tree in
//! an interleaved fashion, and a cursor can be kept across edits of the tree
//! as long as the nodes it has yet to visit are not freed in between.
//!
//! The borrowing iterators returned by [`RouteTree::children`],
//! [`RouteTree::subtree`], [`RouteTree::edges`] and [`RouteTree::segments`]
//! each own a fresh cursor.

use kurbo::Line;

use crate::error::Result;
use crate::tree::RouteTree;
use crate::types::{Edge, NodeId, Segment};

/// Walks the direct children of a node in chain order.
#[derive(Clone, Copy, Debug)]
pub struct ChildCursor {
    parent: NodeId,
    next: Option<NodeId>,
    started: bool,
}

impl ChildCursor {
    /// Create a cursor over the children of `parent`.
    pub fn new(parent: NodeId) -> Self {
        Self {
            parent,
            next: None,
            started: false,
        }
    }

    /// Rewind to the first child.
    pub fn restart(&mut self) {
        self.next = None;
        self.started = false;
    }

    /// Yield the next child, or `None` once the chain is exhausted.
    ///
    /// A stale parent yields nothing.
    pub fn advance(&mut self, tree: &RouteTree) -> Option<NodeId> {
        if !self.started {
            self.started = true;
            self.next = tree.node(self.parent).ok()?.first_child;
        }
        let current = self.next?;
        self.next = match tree.node(current) {
            Ok(n) => n.next_sibling,
            Err(_) => return None,
        };
        Some(current)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Walk {
    Fresh,
    At(NodeId),
    Done,
}

/// Pre-order walk of a node and all of its descendants.
///
/// The walk only follows the tree's own links (first child, next sibling,
/// parent); it needs no stack. It descends first, then moves to the next
/// sibling, then climbs back up past exhausted ancestors, and stops when it
/// climbs back to the start node. Siblings of the start node are never
/// visited.
#[derive(Clone, Copy, Debug)]
pub struct SubtreeCursor {
    start: NodeId,
    walk: Walk,
}

impl SubtreeCursor {
    /// Create a cursor over the subtree rooted at `start`.
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            walk: Walk::Fresh,
        }
    }

    /// The node this walk started from.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Rewind to the start node.
    pub fn restart(&mut self) {
        self.walk = Walk::Fresh;
    }

    /// Yield the next node in pre-order.
    pub fn advance(&mut self, tree: &RouteTree) -> Option<NodeId> {
        let next = match self.walk {
            Walk::Done => None,
            Walk::Fresh => tree.is_alive(self.start).then_some(self.start),
            Walk::At(current) => self.step(tree, current),
        };
        self.walk = next.map_or(Walk::Done, Walk::At);
        next
    }

    fn step(&self, tree: &RouteTree, current: NodeId) -> Option<NodeId> {
        let node = tree.node(current).ok()?;
        if let Some(child) = node.first_child {
            return Some(child);
        }
        let mut n = current;
        loop {
            if n == self.start {
                return None;
            }
            let node = tree.node(n).ok()?;
            if let Some(sibling) = node.next_sibling {
                return Some(sibling);
            }
            n = node.parent?;
        }
    }
}

/// Walks every edge below a start node exactly once, depth first.
#[derive(Clone, Copy, Debug)]
pub struct EdgeCursor {
    nodes: SubtreeCursor,
}

impl EdgeCursor {
    /// Create a cursor over the edges of the subtree rooted at `start`.
    pub fn new(start: NodeId) -> Self {
        Self {
            nodes: SubtreeCursor::new(start),
        }
    }

    /// Rewind to the first edge.
    pub fn restart(&mut self) {
        self.nodes.restart();
    }

    /// Yield the next `(parent, child)` edge.
    pub fn advance(&mut self, tree: &RouteTree) -> Option<Edge> {
        loop {
            let to = self.nodes.advance(tree)?;
            if to == self.nodes.start() {
                continue;
            }
            let from = tree.node(to).ok()?.parent?;
            return Some(Edge::new(from, to));
        }
    }
}

/// Iterator over the children of a node, see [`RouteTree::children`].
#[derive(Clone, Debug)]
pub struct Children<'a> {
    tree: &'a RouteTree,
    cursor: ChildCursor,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.cursor.advance(self.tree)
    }
}

/// Iterator over a subtree in pre-order, see [`RouteTree::subtree`].
#[derive(Clone, Debug)]
pub struct Subtree<'a> {
    tree: &'a RouteTree,
    cursor: SubtreeCursor,
}

impl Iterator for Subtree<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.cursor.advance(self.tree)
    }
}

/// Iterator over tree edges, see [`RouteTree::edges`].
#[derive(Clone, Debug)]
pub struct Edges<'a> {
    tree: &'a RouteTree,
    cursor: EdgeCursor,
}

impl Iterator for Edges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        self.cursor.advance(self.tree)
    }
}

/// Iterator over render-ready segments, see [`RouteTree::segments`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    edges: Edges<'a>,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let tree = self.edges.tree;
        let edge = self.edges.next()?;
        let from = tree.node(edge.from).ok()?;
        let to = tree.node(edge.to).ok()?;
        let joint = to
            .first_child
            .and_then(|c| tree.node(c).ok())
            .is_some_and(|c| c.next_sibling.is_some());
        Some(Segment {
            edge,
            line: Line::new(from.position, to.position),
            joint,
        })
    }
}

impl RouteTree {
    /// Iterate the direct children of a node in chain order.
    pub fn children(&self, id: NodeId) -> Result<Children<'_>> {
        self.node(id)?;
        Ok(Children {
            tree: self,
            cursor: ChildCursor::new(id),
        })
    }

    /// Iterate a node and all of its descendants in pre-order.
    pub fn subtree(&self, id: NodeId) -> Result<Subtree<'_>> {
        self.node(id)?;
        Ok(Subtree {
            tree: self,
            cursor: SubtreeCursor::new(id),
        })
    }

    /// Iterate every edge of the tree, depth first from the root.
    pub fn edges(&self) -> Edges<'_> {
        Edges {
            tree: self,
            cursor: EdgeCursor::new(self.root()),
        }
    }

    /// Iterate the edges of the subtree rooted at `id`.
    pub fn edges_from(&self, id: NodeId) -> Result<Edges<'_>> {
        self.node(id)?;
        Ok(Edges {
            tree: self,
            cursor: EdgeCursor::new(id),
        })
    }

    /// Iterate every edge with its geometry and branch-marker flag.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            edges: self.edges(),
        }
    }
}
