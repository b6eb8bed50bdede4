// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural lookups over the live tree.
//!
//! These resolve items, their controls, and their submenus from any node the host
//! hands over (for example the target of a click), without a separate index.
//! Required relationships fail with a [`LocateError`]; callers that only probe
//! (such as [`Tree::is_root_item`]) treat a failure as "not present".

use alloc::vec::Vec;

use crate::error::LocateError;
use crate::tree::Tree;
use crate::types::{NodeId, NodeKind, Query};

impl Tree {
    /// Walk upward from `node` (exclusive) to the nearest ancestor of `kind`.
    pub fn ancestor_of_kind(&self, node: NodeId, kind: NodeKind) -> Result<NodeId, LocateError> {
        let mut cur = self.parent(node);
        while let Some(n) = cur {
            if self.kind(n) == Some(kind) {
                return Ok(n);
            }
            cur = self.parent(n);
        }
        Err(LocateError::NotFound { kind })
    }

    /// Immediate children of `node` matching every predicate in `query`, in document order.
    pub fn children_matching(&self, node: NodeId, query: Query) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.matches(c, query))
            .collect()
    }

    /// Descendants of `node` matching `query`, in document order.
    pub fn descendants_matching(&self, node: NodeId, query: Query) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&c| self.matches(c, query))
            .collect()
    }

    /// First submenu among `item`'s children.
    pub fn submenu_of(&self, item: NodeId) -> Result<NodeId, LocateError> {
        self.children(item)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == Some(NodeKind::Submenu))
            .ok_or(LocateError::SubmenuNotFound)
    }

    /// Resolve the item owning `node`.
    ///
    /// `node` may be the item itself, which must then have a matching control
    /// child, or a control whose parent is an item. With `toggle` set only toggles
    /// qualify; otherwise any link (toggles included) does.
    pub fn item_from(&self, node: NodeId, toggle: bool) -> Result<NodeId, LocateError> {
        let wanted = |k: NodeKind| if toggle { k == NodeKind::Toggle } else { k.is_link() };
        let item = match self.kind(node) {
            Some(NodeKind::Item) => self
                .children(node)
                .iter()
                .any(|&c| self.kind(c).is_some_and(wanted))
                .then_some(node),
            Some(k) if wanted(k) => self
                .parent(node)
                .filter(|&p| self.kind(p) == Some(NodeKind::Item)),
            _ => None,
        };
        item.ok_or(LocateError::ItemNotFound { toggle })
    }

    /// Resolve the clickable control of `node`.
    ///
    /// `node` may be the control itself or an item, in which case its first
    /// matching child is returned.
    pub fn link_from(&self, node: NodeId, toggle: bool) -> Result<NodeId, LocateError> {
        let wanted = |k: NodeKind| if toggle { k == NodeKind::Toggle } else { k.is_link() };
        let link = match self.kind(node) {
            Some(k) if wanted(k) => Some(node),
            Some(NodeKind::Item) => self
                .children(node)
                .iter()
                .copied()
                .find(|&c| self.kind(c).is_some_and(wanted)),
            _ => None,
        };
        link.ok_or(LocateError::LinkNotFound { toggle })
    }

    /// Returns true if `item` has no item ancestor.
    pub fn is_root_item(&self, item: NodeId) -> bool {
        self.ancestor_of_kind(item, NodeKind::Item).is_err()
    }

    /// Returns true if `item` has a toggle child.
    pub fn has_toggle(&self, item: NodeId) -> bool {
        self.link_from(item, true).is_ok()
    }

    /// Returns true if no item sits directly beneath `item`'s submenus.
    ///
    /// Leaf items can never be open.
    pub fn is_leaf(&self, item: NodeId) -> bool {
        !self.children(item).iter().any(|&c| {
            self.kind(c) == Some(NodeKind::Submenu)
                && self
                    .children(c)
                    .iter()
                    .any(|&i| self.kind(i) == Some(NodeKind::Item))
        })
    }

    fn matches(&self, node: NodeId, query: Query) -> bool {
        self.node_opt(node)
            .is_some_and(|n| query.matches(n.local.kind, n.local.flags))
    }
}
