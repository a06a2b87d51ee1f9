// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Route Tree: the editable, branching polyline behind a diagram connector.
//!
//! A connector in a node editor or schematic tool is rarely a single segment. Users bend it,
//! branch it off at intermediate points, and drag pieces of it around. This crate models such a
//! route as a tree of points where every edge is a straight segment, and provides the editing
//! session that keeps the tree tidy while the user works.
//!
//! - [`RouteTree`]: generational node storage with explicit parent and sibling links.
//! - [`Link`]: an interactive session that draws, drags and simplifies a route.
//! - [`PathMode`]: how a newly drawn segment bends between its two ends.
//!
//! ## API overview
//!
//! Structure:
//! - [`RouteTree::append_child`], [`RouteTree::insert_before`] and [`RouteTree::remove_subtree`].
//! - [`RouteTree::simplify_aligned_node`] and [`RouteTree::simplify_root_node`] remove points that
//!   lie on a straight line between their neighbors.
//! - [`RouteTree::back_link`] exposes the classic left-child/right-sibling back pointer.
//!
//! Traversal:
//! - [`RouteTree::children`], [`RouteTree::subtree`], [`RouteTree::edges`] and
//!   [`RouteTree::segments`] are borrowing iterators.
//! - [`ChildCursor`], [`SubtreeCursor`] and [`EdgeCursor`] are restartable cursors that hold no
//!   borrow; several can walk one tree at once.
//!
//! Queries:
//! - [`belongs_to_line`] is the collinearity test everything else builds on.
//! - [`RouteTree::is_on_trajectory`] and [`RouteTree::is_on_trajectory_rect`] hit-test the route.
//! - [`RouteTree::nearest_point`] and [`RouteTree::grab`] decide what a press picks up.
//!
//! Editing, on [`Link`]:
//! - [`Link::insert_line_at`], [`Link::update_last_inserted_line`],
//!   [`Link::simplify_last_inserted_line`] and [`Link::remove_last_inserted_line`].
//! - [`Link::select_area`], [`Link::displace_selected_area`] and [`Link::simplify_selected_area`].
//! - [`Link::bounds`] and [`Link::take_damage`] for the rendering layer.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_route_tree::{Link, PathMode, TrajectoryHit};
//!
//! let mut link = Link::new(Point::new(0.0, 0.0));
//! link.insert_line_at(Point::new(0.0, 0.0), Point::new(100.0, 0.0), PathMode::Straight)
//!     .unwrap();
//! link.simplify_last_inserted_line().unwrap();
//!
//! assert!(matches!(
//!     link.is_part_of_link(Point::new(50.0, 0.0)),
//!     Some(TrajectoryHit::Edge(_))
//! ));
//! assert_eq!(link.is_part_of_link(Point::new(50.0, 10.0)), None);
//!
//! for segment in link.tree().segments() {
//!     let _ = (segment.line, segment.joint);
//! }
//! ```
//!
//! ## Units and tolerances
//!
//! Coordinates are scene units. Input points are expected to be snapped to a grid by the caller.
//! Collinearity uses a small absolute tolerance ([`DEFAULT_EPSILON`], configurable through
//! [`LinkParams`]). All distances reported by queries are squared.
//!
//! ## Logging
//!
//! Structural edits emit `tracing` events at `trace` level and session edits at `debug` level.
//! Nothing is logged unless a subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cursor;
mod damage;
mod error;
mod geometry;
mod link;
mod path;
mod query;
mod table;
mod tree;
mod types;

pub use cursor::{ChildCursor, Children, EdgeCursor, Edges, Segments, Subtree, SubtreeCursor};
pub use damage::Damage;
pub use error::{Result, RouteError};
pub use geometry::{belongs_to_line, line_crosses_rect, nearest_on_segment};
pub use link::{Insertion, Link, LinkParams};
pub use path::PathMode;
pub use query::DEFAULT_END_SNAP_RATIO;
pub use table::NodeTable;
pub use tree::{DEFAULT_EPSILON, RouteTree};
pub use types::{Edge, Grab, LineHit, NearestPoint, NodeId, Segment, TrajectoryHit};
