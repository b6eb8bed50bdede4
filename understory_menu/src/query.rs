// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance-free state queries.
//!
//! These work on any [`Tree`], with or without a [`Menu`](crate::Menu) attached.
//! `el` may be an item or one of its links; anything else fails with
//! [`LocateError::ItemNotFound`].
//!
//! ```
//! use understory_menu::query;
//! use understory_outline::{LocalNode, NodeKind, Tree};
//!
//! let mut tree = Tree::new();
//! let item = tree.insert(None, LocalNode::new(NodeKind::Item));
//! let link = tree.insert(Some(item), LocalNode::new(NodeKind::Link));
//!
//! query::set_disabled(&mut tree, link, true).unwrap();
//! assert!(query::is_disabled(&tree, item).unwrap());
//! assert!(!query::is_opened(&tree, item).unwrap());
//! ```

use understory_outline::{LocateError, NodeFlags, NodeId, Tree};

/// Enable or disable the item at `el`. Disabling closes it.
///
/// Prefer [`Menu::set_disabled`](crate::Menu::set_disabled) while a menu controls
/// the tree, so a pending transition on the item is dropped as well.
pub fn set_disabled(tree: &mut Tree, el: NodeId, disabled: bool) -> Result<(), LocateError> {
    let item = tree.item_from(el, false)?;
    tree.set_disabled(item, disabled);
    Ok(())
}

/// Returns true if the item at `el` matches the current route.
pub fn is_active(tree: &Tree, el: NodeId) -> Result<bool, LocateError> {
    has(tree, el, NodeFlags::ACTIVE)
}

/// Returns true if the item at `el` is open.
pub fn is_opened(tree: &Tree, el: NodeId) -> Result<bool, LocateError> {
    has(tree, el, NodeFlags::OPEN)
}

/// Returns true if the item at `el` is disabled.
pub fn is_disabled(tree: &Tree, el: NodeId) -> Result<bool, LocateError> {
    has(tree, el, NodeFlags::DISABLED)
}

fn has(tree: &Tree, el: NodeId, flag: NodeFlags) -> Result<bool, LocateError> {
    let item = tree.item_from(el, false)?;
    Ok(tree.has_flags(item, flag))
}
