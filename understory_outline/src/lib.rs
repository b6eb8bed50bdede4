// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_outline --heading-base-level=0

//! Understory Outline: the structural model behind collapsible navigation menus.
//!
//! Understory Outline is the tree a menu controller works over.
//!
//! - Represents a hierarchy of menu nodes (items, links, toggles, submenus) in a generational arena.
//! - Keeps per-item state (open, disabled, active, animating) behind setters that enforce the tree's invariants.
//! - Resolves structural relationships from any node the host hands over: owning item, toggle, submenu, ancestors.
//!
//! The menu controller lives in `understory_menu`; this crate holds no policy beyond the invariants.
//!
//! ## Where this fits
//!
//! Rendering technology is somebody else's problem.
//! A host mirrors its rendered menu into a [`Tree`], reports measured sizes with
//! [`Tree::set_extent`], and reads back state flags and transient [`Overrides`] to present.
//!
//! ## Invariants
//!
//! - A leaf item (no item beneath its submenu) is never [`NodeFlags::OPEN`].
//! - A [`NodeFlags::DISABLED`] item is never open; disabling an item closes it.
//! - Only items carry `OPEN` or `DISABLED`.
//!
//! Every mutation of these flags goes through [`Tree::set_open`], [`Tree::set_disabled`], or [`Tree::set_flag`].
//!
//! ## API overview
//!
//! - [`Tree`]: arena of nodes with structure and state accessors.
//! - [`LocalNode`]: per-node data (kind, rendered extent, flags).
//! - [`NodeKind`]: structural role.
//! - [`NodeFlags`]: state and presentation flags.
//! - [`NodeId`]: generational handle of a node.
//! - [`Query`]: "all of these predicates" classification used by child/descendant lookups.
//! - [`LocateError`]: structural lookup failures.
//!
//! Key lookups:
//! - [`Tree::ancestor_of_kind`], [`Tree::children_matching`], [`Tree::descendants_matching`]
//! - [`Tree::item_from`], [`Tree::link_from`], [`Tree::submenu_of`]
//! - [`Tree::is_root_item`], [`Tree::is_leaf`]
//!
//! ### Minimal usage
//!
//! ```
//! use understory_outline::{LocalNode, NodeFlags, NodeKind, Query, Tree};
//!
//! let mut tree = Tree::new();
//! let menu = tree.insert(None, LocalNode::new(NodeKind::Menu));
//! let inner = tree.insert(Some(menu), LocalNode::new(NodeKind::Inner));
//!
//! let section = tree.insert(Some(inner), LocalNode::new(NodeKind::Item));
//! let toggle = tree.insert(Some(section), LocalNode::new(NodeKind::Toggle).with_height(40.0));
//! let sub = tree.insert(Some(section), LocalNode::new(NodeKind::Submenu).with_height(80.0));
//! let page = tree.insert(Some(sub), LocalNode::new(NodeKind::Item));
//! let link = tree.insert(Some(page), LocalNode::new(NodeKind::Link));
//!
//! // Clicking the toggle resolves to the section.
//! assert_eq!(tree.item_from(toggle, true), Ok(section));
//! assert_eq!(tree.submenu_of(section), Ok(sub));
//!
//! // Leaves never open; sections do.
//! assert!(!tree.set_open(page, true));
//! assert!(tree.set_open(section, true));
//! assert_eq!(tree.children_matching(inner, Query::open_items()), vec![section]);
//!
//! // A disabled item is closed.
//! tree.set_disabled(section, true);
//! assert!(!tree.has_flags(section, NodeFlags::OPEN));
//! # let _ = link;
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod locate;
mod tree;
mod types;

pub use error::LocateError;
pub use tree::Tree;
pub use types::{LocalNode, NodeFlags, NodeId, NodeKind, Overrides, Query};

pub use kurbo::Size;
