// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State resolution: which items must change to reveal a target.
//!
//! ## Pivot
//!
//! Walking from the target up to the top level, the outermost item that is not
//! yet open is the pivot. It is the only item that goes through the full open
//! transition (hooks, animation). Items strictly below it on the chain snap open
//! immediately, since they are hidden inside the pivot until it expands.
//!
//! Leaf targets never open themselves; only their ancestors take part. In
//! horizontal layout, top-level ancestors of the target are hover-driven and are
//! left alone.
//! A disabled item anywhere on the chain makes the whole request a no-op.
//!
//! ## Accordion
//!
//! With accordion mode on, every item that snaps open closes its open siblings on
//! the spot, without hooks or animation, and with `close_children` also their
//! open descendants. The pivot's own siblings are closed by the transition
//! engine through the regular close path.

use alloc::vec::Vec;

use understory_outline::{LocateError, NodeFlags, NodeId, NodeKind, Query};

use crate::menu::Menu;
use crate::scheduler::Scheduler;
use crate::transition::Direction;

impl<S: Scheduler> Menu<S> {
    /// Find the pivot for revealing `target` and the chain items below it
    /// (target side first). `None` means there is nothing to open.
    pub(crate) fn find_pivot(&self, target: NodeId) -> Option<(NodeId, Vec<NodeId>)> {
        let mut chain = Vec::new();
        let mut pivot = None;
        let mut cur = Some(target);
        while let Some(item) = cur {
            let flags = self.tree.flags(item)?;
            if flags.contains(NodeFlags::DISABLED) {
                tracing::debug!(?target, disabled = ?item, "open blocked by disabled item");
                return None;
            }
            // Hover keeps horizontal top-level ancestors visible.
            let hover_root =
                self.config.horizontal() && item != target && self.tree.is_root_item(item);
            if !hover_root && !self.tree.is_leaf(item) {
                if !self.open_or_opening(item) {
                    pivot = Some(chain.len());
                }
                chain.push(item);
            }
            cur = self.tree.ancestor_of_kind(item, NodeKind::Item).ok();
        }
        let idx = pivot?;
        let pivot = chain[idx];
        chain.truncate(idx);
        Some((pivot, chain))
    }

    /// Returns true if `item` is open and not closing, or has an open transition underway.
    pub(crate) fn open_or_opening(&self, item: NodeId) -> bool {
        match self.animations.get(&item) {
            Some(handle) => handle.dir == Direction::Open,
            None => self.tree.has_flags(item, NodeFlags::OPEN),
        }
    }

    /// Snap every item in `below` open, applying accordion exclusivity at each level.
    ///
    /// A close still running or parked on one of them is dropped first.
    pub(crate) fn reveal(&mut self, below: &[NodeId], close_children: bool) {
        for &item in below {
            self.abort_animation(item);
            self.parked.remove(&item);
            self.tree.set_open(item, true);
            if self.config.accordion {
                for sibling in self.open_siblings(item) {
                    self.snap_closed(sibling, close_children);
                }
            }
        }
    }

    /// Open items sharing `item`'s parent, excluding `item`.
    pub(crate) fn open_siblings(&self, item: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.tree.parent(item) else {
            return Vec::new();
        };
        let mut open = self.tree.children_matching(parent, Query::open_items());
        open.retain(|&s| s != item);
        open
    }

    /// Close `item` immediately, skipping hooks and animation.
    pub(crate) fn snap_closed(&mut self, item: NodeId, close_children: bool) {
        self.abort_animation(item);
        self.tree.set_open(item, false);
        if close_children {
            self.close_descendants(item);
        }
    }

    /// Run every open sibling of `item` through the regular close path as an auto-close.
    pub(crate) fn close_others(&mut self, item: NodeId, close_children: bool) -> Result<(), LocateError> {
        for sibling in self.open_siblings(item) {
            if self.tree.has_toggle(sibling) {
                self.close_item(sibling, close_children, true)?;
            }
        }
        Ok(())
    }

    /// Close every open item beneath `item` immediately.
    pub(crate) fn close_descendants(&mut self, item: NodeId) {
        for nested in self.tree.descendants_matching(item, Query::open_items()) {
            self.abort_animation(nested);
            self.tree.set_open(nested, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use understory_outline::NodeFlags;

    use crate::MenuConfig;
    use crate::test_util::Fixture;

    #[test]
    fn pivot_is_the_outermost_closed_item() {
        let f = Fixture::new();
        let menu = f.menu(MenuConfig::default());
        // A and C closed: A is the pivot, C snaps open below it.
        let (pivot, below) = menu.find_pivot(f.c).unwrap();
        assert_eq!(pivot, f.a);
        assert_eq!(below, vec![f.c]);
    }

    #[test]
    fn leaf_targets_only_reveal_ancestors() {
        let f = Fixture::new();
        let menu = f.menu(MenuConfig::default());
        let (pivot, below) = menu.find_pivot(f.d).unwrap();
        assert_eq!(pivot, f.a);
        assert_eq!(below, vec![f.c]);
    }

    #[test]
    fn open_chain_yields_nothing() {
        let f = Fixture::new();
        let mut menu = f.menu(MenuConfig::default().with_animate(false));
        menu.open(f.c).unwrap();
        assert!(menu.find_pivot(f.c).is_none());
        assert!(menu.find_pivot(f.d).is_none());
    }

    #[test]
    fn disabled_anywhere_blocks() {
        let f = Fixture::new();
        let mut menu = f.menu(MenuConfig::default());
        menu.set_disabled(f.a, true).unwrap();
        assert!(menu.find_pivot(f.c).is_none());
        assert!(menu.find_pivot(f.a).is_none());
    }

    #[test]
    fn reveal_snaps_siblings_closed() {
        let f = Fixture::new();
        let mut menu = f.menu(MenuConfig::default().with_animate(false));
        menu.open(f.g).unwrap();
        assert!(menu.tree().has_flags(f.g, NodeFlags::OPEN));
        // G is C's sibling under A; revealing C must close it.
        menu.reveal(&[f.c], false);
        assert!(menu.tree().has_flags(f.c, NodeFlags::OPEN));
        assert!(!menu.tree().has_flags(f.g, NodeFlags::OPEN));
    }

    #[test]
    fn close_children_snaps_nested_items_too() {
        let f = Fixture::new();
        let mut menu = f.menu(MenuConfig::default().with_animate(false));
        menu.open(f.c).unwrap();
        menu.snap_closed(f.a, true);
        assert!(!menu.tree().has_flags(f.a, NodeFlags::OPEN));
        assert!(!menu.tree().has_flags(f.c, NodeFlags::OPEN));
    }

    #[test]
    fn closing_items_count_as_closed() {
        let f = Fixture::new();
        let mut menu = f.menu(MenuConfig::default());
        menu.open(f.a).unwrap();
        menu.run_until_idle().unwrap();
        menu.close(f.a).unwrap();
        menu.run_frame().unwrap();
        assert!(menu.tree().has_flags(f.a, NodeFlags::OPEN | NodeFlags::CLOSING));
        assert!(!menu.open_or_opening(f.a));
        assert_eq!(menu.find_pivot(f.a).map(|(p, _)| p), Some(f.a));
    }
}
