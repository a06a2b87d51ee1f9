// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic dump of the node slots.

use core::fmt;

use crate::tree::RouteTree;
use crate::types::NodeId;

/// Printable table of every slot of a [`RouteTree`].
///
/// One row per slot: slot index, generation, position, then the parent,
/// first child and next sibling slots (`-` when absent). Free slots print as
/// `free`.
///
/// ```rust
/// use kurbo::Point;
/// use understory_route_tree::RouteTree;
///
/// let mut tree = RouteTree::new(Point::new(0.0, 0.0));
/// tree.append_child(tree.root(), Point::new(10.0, 0.0)).unwrap();
/// let dump = tree.node_table().to_string();
/// assert!(dump.contains("(10, 0)"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NodeTable<'a> {
    tree: &'a RouteTree,
}

impl<'a> NodeTable<'a> {
    pub(crate) fn new(tree: &'a RouteTree) -> Self {
        Self { tree }
    }
}

struct Slot(Option<NodeId>);

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", id.slot()),
            None => f.write_str("-"),
        }
    }
}

impl fmt::Display for NodeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "slot gen point parent first next")?;
        for (i, slot) in self.tree.slots().iter().enumerate() {
            match slot {
                None => writeln!(f, "{i} free")?,
                Some(n) => writeln!(
                    f,
                    "{i} {} ({}, {}) {} {} {}",
                    n.generation(),
                    n.position.x,
                    n.position.y,
                    Slot(n.parent),
                    Slot(n.first_child),
                    Slot(n.next_sibling),
                )?,
            }
        }
        Ok(())
    }
}
