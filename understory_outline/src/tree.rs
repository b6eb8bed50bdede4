// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, state updates, and basic queries.

use alloc::vec::Vec;
use kurbo::Size;

use crate::types::{LocalNode, NodeFlags, NodeId, NodeKind, Overrides};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Menu outline.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let open = self
            .nodes
            .iter()
            .flatten()
            .filter(|n| n.local.flags.contains(NodeFlags::OPEN))
            .count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("nodes_open", &open)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) local: LocalNode,
    overrides: Overrides,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            overrides: Overrides::default(),
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// Flags that would break the tree's invariants are dropped: `OPEN` is never
    /// stored on a fresh node (it has no children yet), and `OPEN`/`DISABLED` are
    /// only kept on items.
    pub fn insert(&mut self, parent: Option<NodeId>, mut local: LocalNode) -> NodeId {
        local.flags.remove(NodeFlags::OPEN);
        if local.kind != NodeKind::Item {
            local.flags.remove(NodeFlags::DISABLED);
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
            self.close_if_leaf(parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.local.kind)
    }

    /// Parent of a live node, `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live node in document order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Returns true if `id` is live and has every flag in `flags`.
    pub fn has_flags(&self, id: NodeId, flags: NodeFlags) -> bool {
        self.flags(id).is_some_and(|f| f.contains(flags))
    }

    /// Rendered size of a live node.
    pub fn extent(&self, id: NodeId) -> Option<Size> {
        self.node_opt(id).map(|n| n.local.extent)
    }

    /// Update the rendered size reported by the host's layout system.
    pub fn set_extent(&mut self, id: NodeId, extent: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.extent = extent;
        }
    }

    /// Transient presentation overrides of a live node.
    pub fn overrides(&self, id: NodeId) -> Option<Overrides> {
        self.node_opt(id).map(|n| n.overrides)
    }

    /// Replace the presentation overrides.
    pub fn set_overrides(&mut self, id: NodeId, overrides: Overrides) {
        if let Some(n) = self.node_opt_mut(id) {
            n.overrides = overrides;
        }
    }

    /// Drop every presentation override.
    pub fn clear_overrides(&mut self, id: NodeId) {
        self.set_overrides(id, Overrides::default());
    }

    /// Open or close an item. Returns true if the item ends up in the requested state.
    ///
    /// Opening is refused for non-items, leaf items, and disabled items.
    /// Closing always succeeds on a live item.
    pub fn set_open(&mut self, id: NodeId, open: bool) -> bool {
        if self.kind(id) != Some(NodeKind::Item) {
            return false;
        }
        if open && (self.has_flags(id, NodeFlags::DISABLED) || self.is_leaf(id)) {
            return false;
        }
        self.node_mut(id).local.flags.set(NodeFlags::OPEN, open);
        true
    }

    /// Enable or disable an item. Disabling also closes it.
    ///
    /// Returns false if `id` is not a live item.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> bool {
        if self.kind(id) != Some(NodeKind::Item) {
            return false;
        }
        let flags = &mut self.node_mut(id).local.flags;
        flags.set(NodeFlags::DISABLED, disabled);
        if disabled {
            flags.remove(NodeFlags::OPEN);
        }
        true
    }

    /// Set or clear flags on a live node.
    ///
    /// `OPEN` and `DISABLED` are routed through [`set_open`](Self::set_open) and
    /// [`set_disabled`](Self::set_disabled); the other flags are applied as given.
    pub fn set_flag(&mut self, id: NodeId, flags: NodeFlags, on: bool) {
        if !self.is_alive(id) {
            return;
        }
        if flags.contains(NodeFlags::DISABLED) {
            self.set_disabled(id, on);
        }
        if flags.contains(NodeFlags::OPEN) {
            self.set_open(id, on);
        }
        let plain = flags - (NodeFlags::OPEN | NodeFlags::DISABLED);
        self.node_mut(id).local.flags.set(plain, on);
    }

    /// Path from the topmost ancestor to `id` (inclusive); empty for stale ids.
    pub fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Iterate every live node in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            n.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                NodeId::new(i as u32, n.generation)
            })
        })
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    // Removing the last nested item turns its owner into a leaf, which must not stay open.
    fn close_if_leaf(&mut self, from: NodeId) {
        let owner = if self.kind(from) == Some(NodeKind::Submenu) {
            self.parent(from)
        } else {
            Some(from)
        };
        if let Some(owner) = owner
            && self.kind(owner) == Some(NodeKind::Item)
            && self.is_leaf(owner)
        {
            self.node_mut(owner).local.flags.remove(NodeFlags::OPEN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn item_with_child(tree: &mut Tree) -> (NodeId, NodeId, NodeId) {
        let item = tree.insert(None, LocalNode::new(NodeKind::Item));
        let _toggle = tree.insert(Some(item), LocalNode::new(NodeKind::Toggle));
        let sub = tree.insert(Some(item), LocalNode::new(NodeKind::Submenu));
        let child = tree.insert(Some(sub), LocalNode::new(NodeKind::Item));
        (item, sub, child)
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::new(NodeKind::Inner));
        let a = tree.insert(Some(root), LocalNode::new(NodeKind::Item));

        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        // Remove child; id becomes stale.
        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(tree.children(root).is_empty());

        // Reuse slot by inserting a new node; old id must remain stale; new id is live.
        let b = tree.insert(Some(root), LocalNode::new(NodeKind::Item));
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn insert_never_stores_open() {
        let mut tree = Tree::new();
        let item = tree.insert(
            None,
            LocalNode::new(NodeKind::Item).with_flags(NodeFlags::OPEN),
        );
        assert!(!tree.has_flags(item, NodeFlags::OPEN));
        let link = tree.insert(
            Some(item),
            LocalNode::new(NodeKind::Link).with_flags(NodeFlags::DISABLED),
        );
        assert_eq!(tree.flags(link), Some(NodeFlags::empty()));
    }

    #[test]
    fn leaf_items_refuse_open() {
        let mut tree = Tree::new();
        let leaf = tree.insert(None, LocalNode::new(NodeKind::Item));
        assert!(!tree.set_open(leaf, true));
        assert!(!tree.has_flags(leaf, NodeFlags::OPEN));

        let (item, _, _) = item_with_child(&mut tree);
        assert!(tree.set_open(item, true));
        assert!(tree.has_flags(item, NodeFlags::OPEN));
    }

    #[test]
    fn disabling_closes_and_blocks_open() {
        let mut tree = Tree::new();
        let (item, _, _) = item_with_child(&mut tree);
        tree.set_open(item, true);
        assert!(tree.set_disabled(item, true));
        assert!(!tree.has_flags(item, NodeFlags::OPEN));
        assert!(!tree.set_open(item, true));
        tree.set_disabled(item, false);
        assert!(tree.set_open(item, true));
    }

    #[test]
    fn set_flag_routes_state_through_setters() {
        let mut tree = Tree::new();
        let leaf = tree.insert(None, LocalNode::new(NodeKind::Item));
        tree.set_flag(leaf, NodeFlags::OPEN | NodeFlags::ACTIVE, true);
        assert_eq!(tree.flags(leaf), Some(NodeFlags::ACTIVE));
    }

    #[test]
    fn removing_last_child_closes_owner() {
        let mut tree = Tree::new();
        let (item, _, child) = item_with_child(&mut tree);
        tree.set_open(item, true);
        tree.remove(child);
        assert!(!tree.has_flags(item, NodeFlags::OPEN));
    }

    #[test]
    fn descendants_in_document_order() {
        let mut tree = Tree::new();
        let (item, sub, child) = item_with_child(&mut tree);
        let toggle = tree.children(item)[0];
        assert_eq!(tree.descendants(item), vec![toggle, sub, child]);
        assert_eq!(tree.path_to_root(child), vec![item, sub, child]);
    }

    #[test]
    fn stale_ids_read_as_absent() {
        let mut tree = Tree::new();
        let n = tree.insert(None, LocalNode::new(NodeKind::Item).with_height(12.0));
        assert_eq!(tree.extent(n).map(|s| s.height), Some(12.0));
        tree.remove(n);
        assert_eq!(tree.kind(n), None);
        assert_eq!(tree.flags(n), None);
        assert!(tree.children(n).is_empty());
        assert!(tree.path_to_root(n).is_empty());
        assert!(!tree.set_open(n, true));
    }
}
