// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the outline: node identifiers, kinds, flags, and local data.

use kurbo::Size;

/// Identifier for a node in the outline.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Ordering
///
/// `NodeId` is totally ordered (slot, then generation) so it can key ordered maps.
/// The order carries no structural meaning; use [`Tree::children`](crate::Tree::children)
/// for document order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Structural role of a node.
///
/// A typical vertical menu looks like:
///
/// ```text
/// Menu
/// └── Inner                  (scrolling region, root boundary)
///     ├── Item
///     │   └── Link
///     └── Item
///         ├── Toggle
///         │   └── Other      (icon, label, ...)
///         └── Submenu
///             └── Item ...
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// The menu container the controller attaches to.
    Menu,
    /// The scrolling region holding the top-level items.
    Inner,
    /// An entry in the menu.
    Item,
    /// A plain navigable control.
    Link,
    /// A control that expands or collapses the owning item's submenu.
    ///
    /// A toggle also counts as a link for lookups that do not ask for a toggle.
    Toggle,
    /// The container of nested items beneath a toggle item.
    Submenu,
    /// Anything else (icons, labels, badges).
    Other,
}

impl NodeKind {
    /// Returns true for [`Link`](Self::Link) and [`Toggle`](Self::Toggle).
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Link | Self::Toggle)
    }
}

bitflags::bitflags! {
    /// Per-node state and presentation flags.
    ///
    /// [`OPEN`](Self::OPEN) and [`DISABLED`](Self::DISABLED) are only meaningful on
    /// items and are mutated through [`Tree::set_open`](crate::Tree::set_open) and
    /// [`Tree::set_disabled`](crate::Tree::set_disabled), which keep the tree's
    /// invariants.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// Item is expanded.
        const OPEN            = 0b0000_0000_0001;
        /// Item ignores open requests and is skipped by accordion closing.
        const DISABLED        = 0b0000_0000_0010;
        /// Item matches the current route.
        const ACTIVE          = 0b0000_0000_0100;
        /// Item has an in-flight height transition.
        const ANIMATING       = 0b0000_0000_1000;
        /// The in-flight transition is a collapse.
        const CLOSING         = 0b0000_0001_0000;
        /// Toggle is currently driven by hover; clicks on it do not toggle.
        const HOVER           = 0b0000_0010_0000;
        /// Menu container is configured without animation.
        const NO_ANIMATION    = 0b0000_0100_0000;
        /// Scrolling region uses native overflow instead of a custom scrollbar.
        const NATIVE_OVERFLOW = 0b0000_1000_0000;
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Structural role.
    pub kind: NodeKind,
    /// Rendered size as measured by the host's layout system.
    ///
    /// The outline never computes layout; animations read the toggle's and the
    /// submenu's heights from here.
    pub extent: Size,
    /// State and presentation flags.
    pub flags: NodeFlags,
}

impl LocalNode {
    /// A node of `kind` with zero extent and no flags.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            extent: Size::ZERO,
            flags: NodeFlags::empty(),
        }
    }

    /// Set the rendered height, keeping the width.
    pub fn with_height(mut self, height: f64) -> Self {
        self.extent.height = height;
        self
    }

    /// Add flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self::new(NodeKind::Other)
    }
}

/// Transient presentation overrides applied while an item animates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Explicit height; `None` lets content determine the height.
    pub height: Option<f64>,
    /// Clip overflowing content.
    pub clip: bool,
}

impl Overrides {
    /// Returns true if nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && !self.clip
    }
}

/// Classification predicates; a node matches when all of them hold.
///
/// Used by [`Tree::children_matching`](crate::Tree::children_matching) and
/// [`Tree::descendants_matching`](crate::Tree::descendants_matching).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// Required kind, if any.
    pub kind: Option<NodeKind>,
    /// Flags that must all be set.
    pub flags: NodeFlags,
}

impl Query {
    /// Match nodes of `kind`.
    pub const fn kind(kind: NodeKind) -> Self {
        Self {
            kind: Some(kind),
            flags: NodeFlags::empty(),
        }
    }

    /// Match open items.
    pub const fn open_items() -> Self {
        Self {
            kind: Some(NodeKind::Item),
            flags: NodeFlags::OPEN,
        }
    }

    /// Returns true if a node with `kind` and `flags` satisfies every predicate.
    pub fn matches(&self, kind: NodeKind, flags: NodeFlags) -> bool {
        self.kind.is_none_or(|k| k == kind) && flags.contains(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requires_all_predicates() {
        let q = Query::open_items();
        assert!(q.matches(NodeKind::Item, NodeFlags::OPEN | NodeFlags::ACTIVE));
        assert!(!q.matches(NodeKind::Item, NodeFlags::ACTIVE));
        assert!(!q.matches(NodeKind::Submenu, NodeFlags::OPEN));
        assert!(Query::default().matches(NodeKind::Other, NodeFlags::empty()));
    }

    #[test]
    fn toggle_counts_as_link() {
        assert!(NodeKind::Toggle.is_link());
        assert!(NodeKind::Link.is_link());
        assert!(!NodeKind::Item.is_link());
    }
}
