// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural lookup failures.

use crate::types::NodeKind;

/// A node did not sit where the menu structure requires it.
///
/// These indicate that a caller passed a node that does not belong to a valid
/// menu structure. They are never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// No ancestor of the requested kind before the top of the tree.
    #[error("cannot find `{kind:?}` ancestor")]
    NotFound {
        /// Kind that was searched for.
        kind: NodeKind,
    },
    /// Neither the node nor its parent is a suitable item.
    #[error("menu item not found (toggle required: {toggle})")]
    ItemNotFound {
        /// Whether the item was required to carry a toggle.
        toggle: bool,
    },
    /// The item has no matching control.
    #[error("menu link not found (toggle required: {toggle})")]
    LinkNotFound {
        /// Whether a toggle was requested.
        toggle: bool,
    },
    /// A toggle item has no submenu.
    #[error("cannot find submenu for the current toggle")]
    SubmenuNotFound,
}
