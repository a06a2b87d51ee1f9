// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node storage and topology updates.

use alloc::vec::Vec;
use kurbo::{Point, Vec2};
use tracing::trace;

use crate::error::{Result, RouteError};
use crate::table::NodeTable;
use crate::types::NodeId;

/// Default tolerance used by collinearity tests, in scene units.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// A branching polyline: the route a connector draws between its endpoints.
///
/// Nodes live in generational slots. Each node stores its position and the
/// links of a left-child/right-sibling encoding (`first_child`,
/// `next_sibling`), plus explicit `parent` and `prev_sibling` links so that
/// structural edits never need to search a sibling chain backwards.
///
/// A tree always has exactly one root. Nodes are freed by
/// [`RouteTree::remove_subtree`] and by the simplification passes, and freed
/// slots are reused by later insertions. Handles to freed nodes become
/// invalid and every operation reports them as [`RouteError::InvalidNode`].
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use understory_route_tree::RouteTree;
///
/// let mut tree = RouteTree::new(Point::new(0.0, 0.0));
/// let root = tree.root();
/// let corner = tree.append_child(root, Point::new(0.0, 50.0)).unwrap();
/// let end = tree.append_child(corner, Point::new(80.0, 50.0)).unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.parent_of(end).unwrap(), Some(corner));
/// assert_eq!(tree.edges().count(), 2);
/// ```
pub struct RouteTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    len: usize,
    /// bumped on every mutation
    stamp: u64,
    pub(crate) epsilon: f64,
}

impl core::fmt::Debug for RouteTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RouteTree")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) position: Point,
    pub(crate) parent: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

impl Node {
    fn new(generation: u32, position: Point) -> Self {
        Self {
            generation,
            position,
            parent: None,
            prev_sibling: None,
            first_child: None,
            next_sibling: None,
        }
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

impl RouteTree {
    /// Create a tree holding a single root node at `anchor`.
    pub fn new(anchor: Point) -> Self {
        Self::with_epsilon(anchor, DEFAULT_EPSILON)
    }

    /// Create a tree with a custom collinearity tolerance.
    pub fn with_epsilon(anchor: Point, epsilon: f64) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            len: 0,
            stamp: 0,
            epsilon,
        };
        tree.root = tree.allocate(anchor);
        tree
    }

    /// The current root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no live node; never true since the root is kept.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of physical slots, live or free.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Collinearity tolerance used by the geometric queries.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Iterate live nodes and their positions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                (NodeId::new(i as u32, n.generation), n.position)
            })
        })
    }

    /// Diagnostic view of every slot, printable with `{}`.
    pub fn node_table(&self) -> NodeTable<'_> {
        NodeTable::new(self)
    }

    /// Counter that changes whenever the tree is mutated.
    pub(crate) fn stamp(&self) -> u64 {
        self.stamp
    }

    pub(crate) fn slots(&self) -> &[Option<Node>] {
        &self.nodes
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        match self.nodes.get(id.idx()) {
            Some(Some(n)) if n.generation == id.1 => Ok(n),
            _ => Err(RouteError::InvalidNode(id)),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        match self.nodes.get_mut(id.idx()) {
            Some(Some(n)) if n.generation == id.1 => {
                self.stamp += 1;
                Ok(n)
            }
            _ => Err(RouteError::InvalidNode(id)),
        }
    }

    fn allocate(&mut self, position: Point) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, position));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, position)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        self.len += 1;
        self.stamp += 1;
        NodeId::new(idx, generation)
    }

    fn free(&mut self, id: NodeId) {
        if self.is_alive(id) {
            self.nodes[id.idx()] = None;
            self.free_list.push(id.idx());
            self.len -= 1;
            self.stamp += 1;
        }
    }

    /// Position of a live node.
    pub fn position(&self, id: NodeId) -> Result<Point> {
        Ok(self.node(id)?.position)
    }

    /// Move a node to `position`.
    pub fn set_position(&mut self, id: NodeId, position: Point) -> Result<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Move a node by `offset`.
    pub fn translate(&mut self, id: NodeId, offset: Vec2) -> Result<()> {
        let node = self.node_mut(id)?;
        node.position += offset;
        Ok(())
    }

    /// Returns the parent of a node, or `None` for the root.
    pub fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Head of the node's child chain.
    pub fn first_child(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.first_child)
    }

    /// Next node in the same child chain.
    pub fn next_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.next_sibling)
    }

    /// Previous node in the same child chain.
    pub fn prev_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.prev_sibling)
    }

    /// The classic left-child/right-sibling back-link: the previous sibling
    /// for a later child, the parent for a first child, `None` for the root.
    pub fn back_link(&self, id: NodeId) -> Result<Option<NodeId>> {
        let node = self.node(id)?;
        Ok(node.prev_sibling.or(node.parent))
    }

    /// Whether `child` heads the child chain of `parent`.
    pub fn is_parent(&self, parent: NodeId, child: NodeId) -> Result<bool> {
        Ok(self.node(parent)?.first_child == Some(child))
    }

    /// Number of direct children of a node.
    pub fn children_count(&self, id: NodeId) -> Result<usize> {
        Ok(self.children(id)?.count())
    }

    /// Whether the node is a branch point (more than one child).
    pub fn is_joint_node(&self, id: NodeId) -> Result<bool> {
        let Some(first) = self.node(id)?.first_child else {
            return Ok(false);
        };
        Ok(self.node(first)?.next_sibling.is_some())
    }

    /// Append a new node at the end of `parent`'s child chain.
    pub fn append_child(&mut self, parent: NodeId, position: Point) -> Result<NodeId> {
        let first = self.node(parent)?.first_child;
        let mut tail = None;
        let mut cursor = first;
        while let Some(c) = cursor {
            tail = Some(c);
            cursor = self.node(c)?.next_sibling;
        }

        let id = self.allocate(position);
        {
            let n = self.node_mut(id)?;
            n.parent = Some(parent);
            n.prev_sibling = tail;
        }
        match tail {
            Some(t) => self.node_mut(t)?.next_sibling = Some(id),
            None => self.node_mut(parent)?.first_child = Some(id),
        }
        trace!(parent = parent.slot(), node = id.slot(), "append child");
        Ok(id)
    }

    /// Insert a new node between `target` and its parent.
    ///
    /// The new node takes `target`'s place in its parent's child chain and
    /// `target` becomes its only child. If `target` is the root, the new node
    /// becomes the root.
    pub fn insert_before(&mut self, target: NodeId, position: Point) -> Result<NodeId> {
        let t = *self.node(target)?;
        let id = self.allocate(position);
        {
            let n = self.node_mut(id)?;
            n.parent = t.parent;
            n.prev_sibling = t.prev_sibling;
            n.next_sibling = t.next_sibling;
            n.first_child = Some(target);
        }
        if let Some(prev) = t.prev_sibling {
            self.node_mut(prev)?.next_sibling = Some(id);
        } else if let Some(parent) = t.parent {
            self.node_mut(parent)?.first_child = Some(id);
        }
        if let Some(next) = t.next_sibling {
            self.node_mut(next)?.prev_sibling = Some(id);
        }
        {
            let tn = self.node_mut(target)?;
            tn.parent = Some(id);
            tn.prev_sibling = None;
            tn.next_sibling = None;
        }
        if target == self.root {
            self.root = id;
        }
        trace!(target = target.slot(), node = id.slot(), "insert before");
        Ok(id)
    }

    /// Remove `target` and all of its descendants.
    ///
    /// Siblings that follow `target` stay attached to its parent.
    pub fn remove_subtree(&mut self, target: NodeId) -> Result<()> {
        if target == self.root {
            return Err(RouteError::RootRemoval);
        }
        let t = *self.node(target)?;
        let doomed: Vec<NodeId> = self.subtree(target)?.collect();

        self.unlink(&t)?;
        for id in &doomed {
            self.free(*id);
        }
        trace!(node = target.slot(), freed = doomed.len(), "remove subtree");
        Ok(())
    }

    /// Remove an interior node whose parent and child are collinear with it.
    ///
    /// Applies only to a node with a parent and exactly one child. Returns
    /// whether the node was removed.
    pub fn simplify_aligned_node(&mut self, id: NodeId) -> Result<bool> {
        if self.is_middle_of_line(id)?.is_none() {
            return Ok(false);
        }
        self.splice_out(id)
    }

    /// Remove the root when it sits on a straight line between its two
    /// children.
    ///
    /// The first child becomes the new root and the second child is appended
    /// to the new root's children. Returns whether the root was removed.
    pub fn simplify_root_node(&mut self) -> Result<bool> {
        let old_root = self.root;
        let r = *self.node(old_root)?;
        let Some(a) = r.first_child else {
            return Ok(false);
        };
        let Some(b) = self.node(a)?.next_sibling else {
            return Ok(false);
        };
        if self.node(b)?.next_sibling.is_some() {
            return Ok(false);
        }
        let (pa, pb) = (self.position(a)?, self.position(b)?);
        if crate::geometry::belongs_to_line(pa, pb, r.position, self.epsilon).is_none() {
            return Ok(false);
        }

        {
            let an = self.node_mut(a)?;
            an.parent = None;
            an.prev_sibling = None;
            an.next_sibling = None;
        }
        {
            let bn = self.node_mut(b)?;
            bn.prev_sibling = None;
            bn.next_sibling = None;
        }
        self.node_mut(old_root)?.first_child = None;
        self.root = a;
        self.free(old_root);
        self.adopt_last(a, b)?;
        trace!(root = a.slot(), "simplify root");
        Ok(true)
    }

    /// Replace a node with its only child in the parent's child chain.
    ///
    /// Returns `false` without changes unless the node has a parent and
    /// exactly one child.
    pub(crate) fn splice_out(&mut self, id: NodeId) -> Result<bool> {
        let n = *self.node(id)?;
        let (Some(parent), Some(child)) = (n.parent, n.first_child) else {
            return Ok(false);
        };
        if self.node(child)?.next_sibling.is_some() {
            return Ok(false);
        }
        {
            let c = self.node_mut(child)?;
            c.parent = Some(parent);
            c.prev_sibling = n.prev_sibling;
            c.next_sibling = n.next_sibling;
        }
        match n.prev_sibling {
            Some(prev) => self.node_mut(prev)?.next_sibling = Some(child),
            None => self.node_mut(parent)?.first_child = Some(child),
        }
        if let Some(next) = n.next_sibling {
            self.node_mut(next)?.prev_sibling = Some(child);
        }
        self.free(id);
        trace!(node = id.slot(), child = child.slot(), "splice out");
        Ok(true)
    }

    /// Detach a node from its parent's child chain.
    fn unlink(&mut self, n: &Node) -> Result<()> {
        match n.prev_sibling {
            Some(prev) => self.node_mut(prev)?.next_sibling = n.next_sibling,
            None => {
                if let Some(parent) = n.parent {
                    self.node_mut(parent)?.first_child = n.next_sibling;
                }
            }
        }
        if let Some(next) = n.next_sibling {
            self.node_mut(next)?.prev_sibling = n.prev_sibling;
        }
        Ok(())
    }

    /// Link a detached node as the last child of `parent`.
    fn adopt_last(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tail = None;
        let mut cursor = self.node(parent)?.first_child;
        while let Some(c) = cursor {
            tail = Some(c);
            cursor = self.node(c)?.next_sibling;
        }
        {
            let cn = self.node_mut(child)?;
            cn.parent = Some(parent);
            cn.prev_sibling = tail;
            cn.next_sibling = None;
        }
        match tail {
            Some(t) => self.node_mut(t)?.next_sibling = Some(child),
            None => self.node_mut(parent)?.first_child = Some(child),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Walk the back-links the classic way: climb until the node we came
    /// from heads the chain of the node we reached.
    fn parent_by_back_links(tree: &RouteTree, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let back = tree.back_link(current).unwrap()?;
            if tree.is_parent(back, current).unwrap() {
                return Some(back);
            }
            current = back;
        }
    }

    #[test]
    fn new_tree_has_single_root() {
        let tree = RouteTree::new(pt(1.0, 2.0));
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.position(tree.root()).unwrap(), pt(1.0, 2.0));
        assert_eq!(tree.parent_of(tree.root()).unwrap(), None);
    }

    #[test]
    fn append_child_links_parent_and_siblings() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let root = tree.root();
        let a = tree.append_child(root, pt(10.0, 0.0)).unwrap();
        let b = tree.append_child(root, pt(0.0, 10.0)).unwrap();
        let c = tree.append_child(root, pt(-10.0, 0.0)).unwrap();

        for id in [a, b, c] {
            assert_eq!(tree.parent_of(id).unwrap(), Some(root));
            assert_eq!(parent_by_back_links(&tree, id), Some(root));
        }
        assert_eq!(tree.back_link(a).unwrap(), Some(root));
        assert_eq!(tree.back_link(b).unwrap(), Some(a));
        assert_eq!(tree.back_link(c).unwrap(), Some(b));
        assert_eq!(tree.children_count(root).unwrap(), 3);
        assert!(tree.is_joint_node(root).unwrap());
        assert!(tree.is_parent(root, a).unwrap());
        assert!(!tree.is_parent(root, b).unwrap());
    }

    #[test]
    fn append_to_stale_parent_fails() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let a = tree.append_child(tree.root(), pt(10.0, 0.0)).unwrap();
        tree.remove_subtree(a).unwrap();
        assert_eq!(
            tree.append_child(a, pt(20.0, 0.0)),
            Err(RouteError::InvalidNode(a))
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn insert_before_splices_into_chain() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let root = tree.root();
        let a = tree.append_child(root, pt(10.0, 0.0)).unwrap();
        let b = tree.append_child(root, pt(0.0, 10.0)).unwrap();
        let c = tree.append_child(root, pt(-10.0, 0.0)).unwrap();

        let n = tree.insert_before(b, pt(0.0, 5.0)).unwrap();
        assert_eq!(tree.parent_of(b).unwrap(), Some(n));
        assert_eq!(tree.parent_of(n).unwrap(), Some(root));
        assert_eq!(tree.next_sibling(a).unwrap(), Some(n));
        assert_eq!(tree.next_sibling(n).unwrap(), Some(c));
        assert_eq!(tree.back_link(c).unwrap(), Some(n));
        assert_eq!(parent_by_back_links(&tree, c), Some(root));
        let children: Vec<_> = tree.children(root).unwrap().collect();
        assert_eq!(children, vec![a, n, c]);
    }

    #[test]
    fn insert_before_root_becomes_root() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let old_root = tree.root();
        let n = tree.insert_before(old_root, pt(-5.0, 0.0)).unwrap();
        assert_eq!(tree.root(), n);
        assert_eq!(tree.parent_of(old_root).unwrap(), Some(n));
        assert_eq!(tree.parent_of(n).unwrap(), None);
    }

    #[test]
    fn remove_subtree_frees_descendants_and_keeps_siblings() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let root = tree.root();
        let a = tree.append_child(root, pt(10.0, 0.0)).unwrap();
        let a1 = tree.append_child(a, pt(10.0, 10.0)).unwrap();
        let a2 = tree.append_child(a1, pt(20.0, 10.0)).unwrap();
        let b = tree.append_child(root, pt(0.0, 10.0)).unwrap();

        tree.remove_subtree(a).unwrap();
        for id in [a, a1, a2] {
            assert!(!tree.is_alive(id));
        }
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.first_child(root).unwrap(), Some(b));
        assert_eq!(tree.back_link(b).unwrap(), Some(root));
        assert_eq!(tree.children(root).unwrap().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn remove_root_is_rejected() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let stamp = tree.stamp();
        assert_eq!(tree.remove_subtree(tree.root()), Err(RouteError::RootRemoval));
        assert_eq!(tree.stamp(), stamp);
    }

    #[test]
    fn stamp_changes_on_every_mutation() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let mut last = tree.stamp();
        let mut changed = |tree: &RouteTree| {
            let moved = tree.stamp() != last;
            last = tree.stamp();
            moved
        };
        let a = tree.append_child(tree.root(), pt(10.0, 0.0)).unwrap();
        assert!(changed(&tree));
        tree.set_position(a, pt(20.0, 0.0)).unwrap();
        assert!(changed(&tree));
        tree.translate(a, Vec2::new(0.0, 5.0)).unwrap();
        assert!(changed(&tree));
        tree.remove_subtree(a).unwrap();
        assert!(changed(&tree));
        assert!(tree.set_position(a, pt(0.0, 0.0)).is_err());
        assert!(!changed(&tree));
    }

    #[test]
    fn freed_slots_are_reused_with_new_generation() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let a = tree.append_child(tree.root(), pt(10.0, 0.0)).unwrap();
        tree.remove_subtree(a).unwrap();
        let b = tree.append_child(tree.root(), pt(20.0, 0.0)).unwrap();
        assert_eq!(a.slot(), b.slot());
        assert!(b.generation() > a.generation());
        assert!(!tree.is_alive(a));
        assert_eq!(tree.position(a), Err(RouteError::InvalidNode(a)));
        assert_eq!(tree.slot_count(), 2);
    }

    #[test]
    fn len_counts_live_slots_only() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let root = tree.root();
        let a = tree.append_child(root, pt(1.0, 0.0)).unwrap();
        let _b = tree.append_child(root, pt(2.0, 0.0)).unwrap();
        let _c = tree.append_child(a, pt(3.0, 0.0)).unwrap();
        tree.remove_subtree(a).unwrap();
        let live = tree.slots().iter().filter(|s| s.is_some()).count();
        assert_eq!(tree.len(), live);
        assert_eq!(tree.iter().count(), live);
    }

    #[test]
    fn simplify_aligned_node_removes_collinear_interior() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let mid = tree.append_child(tree.root(), pt(50.0, 0.0)).unwrap();
        let end = tree.append_child(mid, pt(100.0, 0.0)).unwrap();

        assert!(tree.simplify_aligned_node(mid).unwrap());
        assert!(!tree.is_alive(mid));
        assert_eq!(tree.parent_of(end).unwrap(), Some(tree.root()));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn simplify_aligned_node_handles_vertical_lines() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let mid = tree.append_child(tree.root(), pt(0.0, 40.0)).unwrap();
        let _end = tree.append_child(mid, pt(0.0, 100.0)).unwrap();
        assert!(tree.simplify_aligned_node(mid).unwrap());
    }

    #[test]
    fn simplify_aligned_node_keeps_corners_and_joints() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let corner = tree.append_child(tree.root(), pt(0.0, 50.0)).unwrap();
        let leaf = tree.append_child(corner, pt(50.0, 50.0)).unwrap();
        assert!(!tree.simplify_aligned_node(corner).unwrap());

        let joint = tree.append_child(tree.root(), pt(50.0, 0.0)).unwrap();
        let _a = tree.append_child(joint, pt(100.0, 0.0)).unwrap();
        let _b = tree.append_child(joint, pt(50.0, 50.0)).unwrap();
        assert!(!tree.simplify_aligned_node(joint).unwrap());

        // Root has no parent, a leaf has no child.
        assert!(!tree.simplify_aligned_node(tree.root()).unwrap());
        assert!(!tree.simplify_aligned_node(leaf).unwrap());
    }

    #[test]
    fn simplify_aligned_node_preserves_following_siblings() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let root = tree.root();
        let mid = tree.append_child(root, pt(50.0, 0.0)).unwrap();
        let end = tree.append_child(mid, pt(100.0, 0.0)).unwrap();
        let other = tree.append_child(root, pt(0.0, 50.0)).unwrap();

        assert!(tree.simplify_aligned_node(mid).unwrap());
        assert_eq!(
            tree.children(root).unwrap().collect::<Vec<_>>(),
            vec![end, other]
        );
        assert_eq!(tree.back_link(other).unwrap(), Some(end));
    }

    #[test]
    fn simplify_root_node_reroots_on_straight_line() {
        let mut tree = RouteTree::new(pt(50.0, 0.0));
        let old_root = tree.root();
        let a = tree.append_child(old_root, pt(0.0, 0.0)).unwrap();
        let a1 = tree.append_child(a, pt(0.0, 50.0)).unwrap();
        let b = tree.append_child(old_root, pt(100.0, 0.0)).unwrap();

        assert!(tree.simplify_root_node().unwrap());
        assert_eq!(tree.root(), a);
        assert!(!tree.is_alive(old_root));
        assert_eq!(tree.children(a).unwrap().collect::<Vec<_>>(), vec![a1, b]);
        assert_eq!(tree.parent_of(b).unwrap(), Some(a));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn simplify_root_node_needs_two_aligned_children() {
        let mut tree = RouteTree::new(pt(0.0, 0.0));
        let root = tree.root();
        let _a = tree.append_child(root, pt(-10.0, 0.0)).unwrap();
        assert!(!tree.simplify_root_node().unwrap());
        let _b = tree.append_child(root, pt(0.0, 10.0)).unwrap();
        assert!(!tree.simplify_root_node().unwrap());
        assert_eq!(tree.root(), root);
    }
}
