// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive editing of a connector route.
//!
//! A [`Link`] owns a [`RouteTree`] and drives it from pointer input:
//!
//! - **Drawing.** [`Link::insert_line_at`] starts a new segment anchored on
//!   the route, [`Link::update_last_inserted_line`] follows the pointer, and
//!   the segment is committed with [`Link::simplify_last_inserted_line`] or
//!   discarded with [`Link::remove_last_inserted_line`].
//! - **Dragging.** The `select_area*` methods pick nodes,
//!   [`Link::displace_selected_area`] moves them and
//!   [`Link::simplify_selected_area`] removes points a drag made redundant.
//! - **Hit testing.** [`Link::is_part_of_link`] and friends answer whether a
//!   pointer position touches the route.
//!
//! Points are expected to be snapped by the caller already. Every edit that
//! changes geometry refreshes [`Link::bounds`] first and then records the
//! invalidated area, see [`Link::take_damage`].

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;
use tracing::debug;

use crate::damage::Damage;
use crate::error::Result;
use crate::path::PathMode;
use crate::query::DEFAULT_END_SNAP_RATIO;
use crate::tree::{DEFAULT_EPSILON, RouteTree};
use crate::types::{Grab, NodeId, TrajectoryHit};

/// Parameters of a [`Link`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkParams {
    /// Grid unit of the hosting scene. The bounding rectangle is padded by
    /// one unit on each side.
    pub grid_size: f64,
    /// Tolerance of the collinearity tests.
    pub epsilon: f64,
    /// Share of an edge's length near each end inside which a grab snaps to
    /// the endpoint, see [`RouteTree::grab`].
    pub end_snap_ratio: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            epsilon: DEFAULT_EPSILON,
            end_snap_ratio: DEFAULT_END_SNAP_RATIO,
        }
    }
}

/// The segment currently being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insertion {
    /// The anchor node the segment starts from.
    pub start: NodeId,
    /// The bend point, when the path mode has one.
    pub mid: Option<NodeId>,
    /// The node following the pointer.
    pub end: NodeId,
}

/// Editing session for one connector route.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use understory_route_tree::{Link, PathMode};
///
/// let mut link = Link::new(Point::new(0.0, 0.0));
/// link.insert_line_at(
///     Point::new(0.0, 0.0),
///     Point::new(50.0, 50.0),
///     PathMode::VerticalThenHorizontal,
/// )
/// .unwrap();
/// link.update_last_inserted_line(Point::new(80.0, 40.0), PathMode::VerticalThenHorizontal)
///     .unwrap();
/// link.simplify_last_inserted_line().unwrap();
///
/// // Root, bend at (0, 40), end at (80, 40).
/// assert_eq!(link.tree().len(), 3);
/// assert!(link.is_part_of_link(Point::new(0.0, 20.0)).is_some());
/// ```
#[derive(Debug)]
pub struct Link {
    tree: RouteTree,
    insertion: Option<Insertion>,
    selected: SmallVec<[NodeId; 2]>,
    path_mode: PathMode,
    bounds: Rect,
    params: LinkParams,
    damage: Damage,
    revision: u64,
}

impl Link {
    /// Create a link whose route starts at `anchor`.
    pub fn new(anchor: Point) -> Self {
        Self::with_params(anchor, LinkParams::default())
    }

    /// Create a link with explicit parameters.
    pub fn with_params(anchor: Point, params: LinkParams) -> Self {
        let tree = RouteTree::with_epsilon(anchor, params.epsilon);
        let bounds = padded_bounds(&tree, params.grid_size);
        Self {
            tree,
            insertion: None,
            selected: SmallVec::new(),
            path_mode: PathMode::default(),
            bounds,
            params,
            damage: Damage::default(),
            revision: 0,
        }
    }

    /// The route.
    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    /// Parameters this link was created with.
    pub fn params(&self) -> &LinkParams {
        &self.params
    }

    /// Path mode of the last drawn segment.
    pub fn path_mode(&self) -> PathMode {
        self.path_mode
    }

    /// The segment being drawn, if any.
    pub fn insertion(&self) -> Option<Insertion> {
        self.insertion
    }

    /// Whether a segment is being drawn.
    pub fn is_inserting(&self) -> bool {
        self.insertion.is_some()
    }

    /// Currently selected nodes.
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// Bounding rectangle of all nodes, padded by one grid unit.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Counter bumped on every geometry change.
    ///
    /// Freed nodes leave the selection at the same time.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take the damage accumulated since the last call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    /// Run a direct edit of the route.
    ///
    /// If the closure changed the tree, an insertion whose nodes were removed
    /// is forgotten and the geometry is refreshed, which also drops selected
    /// handles that no longer exist. A closure that changed nothing (for
    /// example one whose edit failed) leaves the revision and damage alone.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut RouteTree) -> R) -> R {
        let stamp = self.tree.stamp();
        let out = f(&mut self.tree);
        if self.tree.stamp() == stamp {
            return out;
        }
        if let Some(ins) = self.insertion
            && !self.insertion_alive(&ins)
        {
            self.insertion = None;
        }
        self.geometry_changed();
        out
    }

    /// Start drawing a segment from `start` towards `end`.
    ///
    /// A segment still being drawn is committed first. The new segment is
    /// anchored on the root when the route has a single node, on the node at
    /// `start` when there is one, or on a new node spliced into the edge that
    /// `start` lies on. Returns `Ok(false)` without changes when `start` is
    /// not on the route.
    pub fn insert_line_at(&mut self, start: Point, end: Point, mode: PathMode) -> Result<bool> {
        if self.insertion.is_some() {
            self.simplify_last_inserted_line()?;
        }
        let anchor = if self.tree.len() == 1 {
            self.tree.root()
        } else {
            match self.tree.is_on_trajectory(start) {
                Some(TrajectoryHit::Node(n)) => n,
                Some(TrajectoryHit::Edge(e)) => self.tree.insert_before(e.to, start)?,
                None => return Ok(false),
            }
        };

        let from = self.tree.position(anchor)?;
        let mid = match mode.midpoint(from, end) {
            Some(m) => Some(self.tree.append_child(anchor, m)?),
            None => None,
        };
        let end_id = self.tree.append_child(mid.unwrap_or(anchor), end)?;
        self.path_mode = mode;
        self.insertion = Some(Insertion {
            start: anchor,
            mid,
            end: end_id,
        });
        debug!(anchor = anchor.slot(), ?mode, "begin segment");
        self.geometry_changed();
        Ok(true)
    }

    /// Move the end of the segment being drawn to `end`.
    ///
    /// The bend point is recomputed for `mode`, added or removed as needed.
    /// Does nothing when no segment is being drawn.
    pub fn update_last_inserted_line(&mut self, end: Point, mode: PathMode) -> Result<()> {
        let Some(mut ins) = self.insertion else {
            return Ok(());
        };
        let from = self.tree.position(ins.start)?;
        match (mode.midpoint(from, end), ins.mid) {
            (Some(m), Some(mid)) => self.tree.set_position(mid, m)?,
            (Some(m), None) => ins.mid = Some(self.tree.insert_before(ins.end, m)?),
            (None, Some(mid)) => {
                self.tree.splice_out(mid)?;
                ins.mid = None;
            }
            (None, None) => {}
        }
        self.tree.set_position(ins.end, end)?;
        self.path_mode = mode;
        self.insertion = Some(ins);
        self.geometry_changed();
        Ok(())
    }

    /// Switch the path mode, re-routing the segment being drawn.
    pub fn set_path_mode(&mut self, mode: PathMode) -> Result<()> {
        match self.insertion {
            Some(ins) => {
                let end = self.tree.position(ins.end)?;
                self.update_last_inserted_line(end, mode)
            }
            None => {
                self.path_mode = mode;
                Ok(())
            }
        }
    }

    /// Commit the segment being drawn.
    ///
    /// A zero-length segment is dropped entirely; a bend point sitting on
    /// either end is removed. The anchor and its parent are then simplified
    /// so that straight runs do not keep redundant points. Returns whether a
    /// segment was being drawn.
    pub fn simplify_last_inserted_line(&mut self) -> Result<bool> {
        let Some(ins) = self.insertion.take() else {
            return Ok(false);
        };
        let start = self.tree.position(ins.start)?;
        let end = self.tree.position(ins.end)?;
        if start == end {
            self.tree.remove_subtree(ins.mid.unwrap_or(ins.end))?;
        } else if let Some(mid) = ins.mid {
            let m = self.tree.position(mid)?;
            if m == start || m == end {
                self.tree.splice_out(mid)?;
            }
        }

        let parent = self.tree.parent_of(ins.start)?;
        self.simplify_around(ins.start)?;
        if let Some(p) = parent
            && self.tree.is_alive(p)
        {
            self.simplify_around(p)?;
        }
        debug!(anchor = ins.start.slot(), nodes = self.tree.len(), "commit segment");
        self.geometry_changed();
        Ok(true)
    }

    /// Discard the segment being drawn. Returns whether there was one.
    pub fn remove_last_inserted_line(&mut self) -> Result<bool> {
        let Some(ins) = self.insertion.take() else {
            return Ok(false);
        };
        self.tree.remove_subtree(ins.mid.unwrap_or(ins.end))?;
        if self.tree.is_alive(ins.start) {
            self.simplify_around(ins.start)?;
        }
        debug!(anchor = ins.start.slot(), "cancel segment");
        self.geometry_changed();
        Ok(true)
    }

    /// Select every node whose position satisfies `contains`.
    pub fn select_area(&mut self, contains: impl Fn(Point) -> bool) -> &[NodeId] {
        self.selected = self
            .tree
            .iter()
            .filter(|(_, p)| contains(*p))
            .map(|(id, _)| id)
            .collect();
        &self.selected
    }

    /// Select only the first node whose position satisfies `contains`.
    pub fn select_area_first_item(&mut self, contains: impl Fn(Point) -> bool) -> Option<NodeId> {
        let hit = self
            .tree
            .iter()
            .find(|(_, p)| contains(*p))
            .map(|(id, _)| id);
        self.selected = hit.into_iter().collect();
        hit
    }

    /// Select what a press at `pos` grabs: a node or both ends of an edge.
    pub fn select_area_nearest_item(&mut self, pos: Point) -> Option<Grab> {
        let grab = self.tree.grab(pos, self.params.end_snap_ratio);
        self.selected = grab.iter().flat_map(Grab::nodes).collect();
        grab
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Move every selected node by `offset`.
    ///
    /// Either every selected node moves or, on error, none does.
    pub fn displace_selected_area(&mut self, offset: Vec2) -> Result<()> {
        if self.selected.is_empty() {
            return Ok(());
        }
        for &id in &self.selected {
            self.tree.position(id)?;
        }
        for &id in &self.selected {
            self.tree.translate(id, offset)?;
        }
        self.geometry_changed();
        Ok(())
    }

    /// Remove points made redundant by moving the selection.
    ///
    /// Each selected node's parent (or the root itself, which may get
    /// re-rooted) and each of its direct children are simplified. Selected
    /// nodes that were removed leave the selection. Returns whether any node
    /// was removed.
    pub fn simplify_selected_area(&mut self) -> Result<bool> {
        let selected = core::mem::take(&mut self.selected);
        let mut changed = false;
        for &id in &selected {
            if !self.tree.is_alive(id) {
                continue;
            }
            let children: SmallVec<[NodeId; 4]> = self.tree.children(id)?.collect();
            match self.tree.parent_of(id)? {
                Some(p) => changed |= self.simplify_around(p)?,
                None => changed |= self.tree.simplify_root_node()?,
            }
            for child in children {
                if self.tree.is_alive(child) {
                    changed |= self.tree.simplify_aligned_node(child)?;
                }
            }
        }
        let tree = &self.tree;
        self.selected = selected.into_iter().filter(|id| tree.is_alive(*id)).collect();
        if changed {
            debug!(nodes = self.tree.len(), "simplified selection");
            self.geometry_changed();
        }
        Ok(changed)
    }

    /// What the route has exactly at `point`.
    pub fn is_part_of_link(&self, point: Point) -> Option<TrajectoryHit> {
        self.tree.is_on_trajectory(point)
    }

    /// What the route has inside the pick rectangle `rect`.
    pub fn is_part_of_link_rect(&self, rect: Rect) -> Option<TrajectoryHit> {
        self.tree.is_on_trajectory_rect(rect)
    }

    /// Whether the route passes within `tolerance` (a linear distance) of
    /// `pos`.
    pub fn is_near_link(&self, pos: Point, tolerance: f64) -> bool {
        let limit = tolerance * tolerance;
        match self.tree.nearest_point(pos) {
            Some(near) => near.distance_sq <= limit,
            None => pos.distance_squared(self.tree.position(self.tree.root()).unwrap_or(pos)) <= limit,
        }
    }

    fn simplify_around(&mut self, id: NodeId) -> Result<bool> {
        if id == self.tree.root() {
            self.tree.simplify_root_node()
        } else {
            self.tree.simplify_aligned_node(id)
        }
    }

    fn insertion_alive(&self, ins: &Insertion) -> bool {
        self.tree.is_alive(ins.start)
            && self.tree.is_alive(ins.end)
            && ins.mid.is_none_or(|m| self.tree.is_alive(m))
    }

    /// Called after every mutation, including ones that freed nodes.
    fn geometry_changed(&mut self) {
        let tree = &self.tree;
        self.selected.retain(|id| tree.is_alive(*id));
        let old = self.bounds;
        self.bounds = padded_bounds(&self.tree, self.params.grid_size);
        self.damage.record(old, self.bounds);
        self.revision += 1;
    }
}

/// Bounding rectangle of all live nodes, padded by `grid` on each side.
fn padded_bounds(tree: &RouteTree, grid: f64) -> Rect {
    let mut points = tree.iter().map(|(_, p)| p);
    let Some(first) = points.next() else {
        return Rect::ZERO;
    };
    points
        .fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
        .inflate(grid, grid)
}
