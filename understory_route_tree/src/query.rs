// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing and nearest-item queries over a whole route.
//!
//! All distances returned here are squared. Callers holding a linear
//! tolerance should square it before comparing.

use kurbo::{Point, Rect};

use crate::error::Result;
use crate::geometry::{belongs_to_line, line_crosses_rect, nearest_on_segment};
use crate::tree::RouteTree;
use crate::types::{Edge, Grab, LineHit, NearestPoint, NodeId, TrajectoryHit};

/// Default share of an edge's length, measured from either end, inside which
/// a grab snaps to the endpoint instead of the edge.
pub const DEFAULT_END_SNAP_RATIO: f64 = 0.2;

impl RouteTree {
    /// Find the first edge (in depth-first order) that `point` lies on.
    ///
    /// A point that coincides with an edge endpoint reports that node. A tree
    /// without edges never matches.
    pub fn is_on_trajectory(&self, point: Point) -> Option<TrajectoryHit> {
        let eps = self.epsilon;
        self.first_edge_hit(|p1, p2| belongs_to_line(p1, p2, point, eps))
    }

    /// Find the first edge that passes within `rect`.
    ///
    /// This is the tolerant variant of [`RouteTree::is_on_trajectory`]: the
    /// rectangle is usually a small pick box centered on the pointer.
    pub fn is_on_trajectory_rect(&self, rect: Rect) -> Option<TrajectoryHit> {
        self.first_edge_hit(|p1, p2| line_crosses_rect(p1, p2, rect))
    }

    fn first_edge_hit(
        &self,
        mut test: impl FnMut(Point, Point) -> Option<LineHit>,
    ) -> Option<TrajectoryHit> {
        self.edges().find_map(|edge| {
            let (p1, p2) = self.edge_points(edge).ok()?;
            Some(match test(p1, p2)? {
                LineHit::Start => TrajectoryHit::Node(edge.from),
                LineHit::End => TrajectoryHit::Node(edge.to),
                LineHit::Interior => TrajectoryHit::Edge(edge),
            })
        })
    }

    /// Positions of both ends of an edge.
    pub fn edge_points(&self, edge: Edge) -> Result<(Point, Point)> {
        Ok((self.position(edge.from)?, self.position(edge.to)?))
    }

    /// If `id` is a redundant interior point, return its parent and child.
    ///
    /// A node is redundant when it has a parent and exactly one child, and
    /// it lies on the straight segment between the two.
    pub fn is_middle_of_line(&self, id: NodeId) -> Result<Option<(NodeId, NodeId)>> {
        let node = self.node(id)?;
        let (Some(parent), Some(child)) = (node.parent, node.first_child) else {
            return Ok(None);
        };
        let child_node = self.node(child)?;
        if child_node.next_sibling.is_some() {
            return Ok(None);
        }
        let from = self.position(parent)?;
        let hit = belongs_to_line(from, child_node.position, node.position, self.epsilon);
        Ok(hit.map(|_| (parent, child)))
    }

    /// The live node closest to `pos` and its squared distance.
    ///
    /// Ties keep the node in the lowest slot.
    pub fn nearest_node(&self, pos: Point) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for (id, p) in self.iter() {
            let d = pos.distance_squared(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best
    }

    /// The point of the route closest to `pos`.
    ///
    /// Each edge contributes the perpendicular projection of `pos` when it
    /// falls inside the segment, or the nearer endpoint otherwise. Returns
    /// `None` for a tree without edges.
    pub fn nearest_point(&self, pos: Point) -> Option<NearestPoint> {
        let mut best: Option<NearestPoint> = None;
        for edge in self.edges() {
            let Ok((p1, p2)) = self.edge_points(edge) else {
                continue;
            };
            let point = nearest_on_segment(p1, p2, pos);
            let distance_sq = pos.distance_squared(point);
            if best.is_none_or(|b| distance_sq < b.distance_sq) {
                best = Some(NearestPoint {
                    point,
                    edge,
                    distance_sq,
                });
            }
        }
        best
    }

    /// Decide what a press at `pos` grabs.
    ///
    /// The nearest node and the nearest edge are found independently. When
    /// the closest point on that edge lies within `end_snap_ratio` of the
    /// edge's length from one of its ends, the grab snaps to a node: the
    /// nearer of that end and the nearest node. Otherwise the nearest node
    /// wins if it is strictly closer than the edge, and the edge wins if not.
    ///
    /// A tree without edges grabs its root.
    pub fn grab(&self, pos: Point, end_snap_ratio: f64) -> Option<Grab> {
        let (node, node_dist) = self.nearest_node(pos)?;
        let Some(near) = self.nearest_point(pos) else {
            return Some(Grab::Node(node));
        };
        let (p1, p2) = self.edge_points(near.edge).ok()?;

        let (end, end_pos) = if near.point.distance_squared(p1) <= near.point.distance_squared(p2)
        {
            (near.edge.from, p1)
        } else {
            (near.edge.to, p2)
        };
        let snap_limit = end_snap_ratio * end_snap_ratio * p1.distance_squared(p2);
        if near.point.distance_squared(end_pos) < snap_limit {
            let picked = if pos.distance_squared(end_pos) <= node_dist {
                end
            } else {
                node
            };
            return Some(Grab::Node(picked));
        }

        if node_dist < near.distance_sq {
            Some(Grab::Node(node))
        } else {
            Some(Grab::Edge(near.edge))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> (RouteTree, NodeId, NodeId) {
        let mut tree = RouteTree::new(Point::new(0.0, 0.0));
        let root = tree.root();
        let end = tree.append_child(root, Point::new(100.0, 0.0)).unwrap();
        (tree, root, end)
    }

    #[test]
    fn trajectory_hits_edge_and_endpoints() {
        let (tree, root, end) = straight();
        let edge = Edge::new(root, end);
        assert_eq!(
            tree.is_on_trajectory(Point::new(50.0, 0.0)),
            Some(TrajectoryHit::Edge(edge))
        );
        assert_eq!(tree.is_on_trajectory(Point::new(50.0, 10.0)), None);
        assert_eq!(
            tree.is_on_trajectory(Point::new(100.0, 0.0)),
            Some(TrajectoryHit::Node(end))
        );
        assert_eq!(
            tree.is_on_trajectory(Point::new(0.0, 0.0)),
            Some(TrajectoryHit::Node(root))
        );
    }

    #[test]
    fn trajectory_first_match_wins() {
        let mut tree = RouteTree::new(Point::new(0.0, 0.0));
        let root = tree.root();
        let a = tree.append_child(root, Point::new(100.0, 0.0)).unwrap();
        let _b = tree.append_child(root, Point::new(0.0, 100.0)).unwrap();
        assert_eq!(
            tree.is_on_trajectory(Point::new(0.0, 0.0)),
            Some(TrajectoryHit::Node(root))
        );
        assert_eq!(
            tree.is_on_trajectory(Point::new(30.0, 0.0)),
            Some(TrajectoryHit::Edge(Edge::new(root, a)))
        );
    }

    #[test]
    fn trajectory_rect_is_tolerant() {
        let (tree, root, end) = straight();
        let pick = Rect::from_center_size((50.0, 2.0), (6.0, 6.0));
        assert_eq!(
            tree.is_on_trajectory_rect(pick),
            Some(TrajectoryHit::Edge(Edge::new(root, end)))
        );
        let miss = Rect::from_center_size((50.0, 20.0), (6.0, 6.0));
        assert_eq!(tree.is_on_trajectory_rect(miss), None);
    }

    #[test]
    fn empty_route_queries_do_not_match() {
        let tree = RouteTree::new(Point::new(5.0, 5.0));
        assert_eq!(tree.is_on_trajectory(Point::new(5.0, 5.0)), None);
        assert_eq!(tree.nearest_point(Point::new(0.0, 0.0)), None);
        assert_eq!(
            tree.grab(Point::new(0.0, 0.0), DEFAULT_END_SNAP_RATIO),
            Some(Grab::Node(tree.root()))
        );
    }

    #[test]
    fn middle_of_line_detection() {
        let mut tree = RouteTree::new(Point::new(0.0, 0.0));
        let root = tree.root();
        let mid = tree.append_child(root, Point::new(0.0, 50.0)).unwrap();
        let end = tree.append_child(mid, Point::new(0.0, 100.0)).unwrap();
        assert_eq!(tree.is_middle_of_line(mid).unwrap(), Some((root, end)));
        tree.set_position(mid, Point::new(10.0, 50.0)).unwrap();
        assert_eq!(tree.is_middle_of_line(mid).unwrap(), None);
        assert_eq!(tree.is_middle_of_line(root).unwrap(), None);
        assert_eq!(tree.is_middle_of_line(end).unwrap(), None);
    }

    #[test]
    fn nearest_point_projects_or_clamps() {
        let mut tree = RouteTree::new(Point::new(0.0, 0.0));
        let root = tree.root();
        let corner = tree.append_child(root, Point::new(0.0, 100.0)).unwrap();
        let end = tree.append_child(corner, Point::new(100.0, 100.0)).unwrap();

        let near = tree.nearest_point(Point::new(60.0, 90.0)).unwrap();
        assert_eq!(near.point, Point::new(60.0, 100.0));
        assert_eq!(near.edge, Edge::new(corner, end));
        assert_eq!(near.distance_sq, 100.0);

        let beyond = tree.nearest_point(Point::new(-10.0, -10.0)).unwrap();
        assert_eq!(beyond.point, Point::new(0.0, 0.0));
        assert_eq!(beyond.distance_sq, 200.0);
    }

    #[test]
    fn grab_snaps_near_endpoints() {
        let (tree, _root, end) = straight();
        assert_eq!(
            tree.grab(Point::new(98.0, 0.0), DEFAULT_END_SNAP_RATIO),
            Some(Grab::Node(end))
        );
    }

    #[test]
    fn grab_takes_edge_in_the_middle() {
        let (tree, root, end) = straight();
        assert_eq!(
            tree.grab(Point::new(50.0, 3.0), DEFAULT_END_SNAP_RATIO),
            Some(Grab::Edge(Edge::new(root, end)))
        );
    }

    #[test]
    fn grab_snap_prefers_closer_node_of_other_branch() {
        let mut tree = RouteTree::new(Point::new(0.0, 0.0));
        let root = tree.root();
        let _end = tree.append_child(root, Point::new(100.0, 0.0)).unwrap();
        let elbow = tree.append_child(root, Point::new(15.0, 50.0)).unwrap();
        let tip = tree.append_child(elbow, Point::new(15.0, 3.0)).unwrap();

        // The closest edge point (15, 0) is near the root end of the long
        // edge, but the tip of the other branch is nearer than the root.
        assert_eq!(
            tree.grab(Point::new(15.0, 0.5), DEFAULT_END_SNAP_RATIO),
            Some(Grab::Node(tip))
        );
        assert_eq!(
            tree.grab(Point::new(4.0, -0.5), DEFAULT_END_SNAP_RATIO),
            Some(Grab::Node(root))
        );
    }
}
