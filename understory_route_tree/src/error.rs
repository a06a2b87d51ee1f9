// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by tree and link operations.

use core::fmt;

use crate::types::NodeId;

/// Error returned when a route operation is given a handle it cannot use.
///
/// Both variants indicate a caller bug; they are reported instead of being
/// silently ignored so that stale handles surface as early as possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteError {
    /// The identifier is out of range or refers to a freed (or reused) slot.
    InvalidNode(NodeId),
    /// The root cannot be removed; the tree always keeps its anchor.
    RootRemoval,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode(id) => write!(
                f,
                "invalid node handle (slot {}, generation {})",
                id.slot(),
                id.generation()
            ),
            Self::RootRemoval => f.write_str("the root node cannot be removed"),
        }
    }
}

impl core::error::Error for RouteError {}

/// Result type used throughout this crate.
pub type Result<T, E = RouteError> = core::result::Result<T, E>;
