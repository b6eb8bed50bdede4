// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: a deterministic, `no_std` controller for collapsible navigation menus.
//!
//! ## Overview
//!
//! This crate drives the open/close state of a hierarchical sidebar menu held in an
//! [`understory_outline::Tree`]. It does not render anything.
//! The host mirrors its rendered menu into the tree, forwards input and scheduler
//! events, and presents the flags and height overrides the controller leaves behind.
//!
//! ## Operations
//!
//! - [`Menu::open`] reveals an item: every closed item above it opens, with only
//!   the outermost one running a full transition (see [`resolve`]).
//! - [`Menu::close`], [`Menu::toggle`], and [`Menu::close_all`] collapse items,
//!   optionally with all their open descendants.
//! - In accordion mode, opening an item closes its open siblings.
//! - [`query`] reads and writes item state without a controller.
//!
//! ## Hooks
//!
//! [`Hooks::on_open`] and [`Hooks::on_close`] gate each transition with a
//! [`Verdict`]; [`Hooks::on_opened`] and [`Hooks::on_closed`] observe its end.
//! A cancelled gate leaves the tree untouched and the matching notify hook never runs.
//!
//! ## Animation
//!
//! Transitions are driven through a [`Scheduler`](scheduler::Scheduler): a frame to
//! pin the starting height, a short timer to commit the end height, and a
//! fallback timer racing the host's [`Menu::transition_end`] signal. See
//! [`transition`] for the full lifecycle. [`scheduler::ManualScheduler`] runs the
//! whole thing on a virtual clock.
//!
//! ## Minimal example
//!
//! ```
//! use understory_menu::{Menu, MenuConfig};
//! use understory_menu::scheduler::ManualScheduler;
//! use understory_outline::{LocalNode, NodeFlags, NodeKind, Tree};
//!
//! let mut tree = Tree::new();
//! let container = tree.insert(None, LocalNode::new(NodeKind::Menu));
//! let inner = tree.insert(Some(container), LocalNode::new(NodeKind::Inner));
//! let section = tree.insert(Some(inner), LocalNode::new(NodeKind::Item));
//! let toggle = tree.insert(Some(section), LocalNode::new(NodeKind::Toggle).with_height(40.0));
//! let sub = tree.insert(Some(section), LocalNode::new(NodeKind::Submenu).with_height(80.0));
//! let page = tree.insert(Some(sub), LocalNode::new(NodeKind::Item));
//! tree.insert(Some(page), LocalNode::new(NodeKind::Link));
//!
//! let mut menu = Menu::new(tree, container, MenuConfig::default(), ManualScheduler::new()).unwrap();
//! menu.toggle(toggle).unwrap();
//!
//! // The first frame pins the section to its header and marks it open.
//! menu.run_frame().unwrap();
//! assert!(menu.tree().has_flags(section, NodeFlags::OPEN | NodeFlags::ANIMATING));
//!
//! // The host reports the end of the height transition.
//! menu.advance(understory_menu::COMMIT_DELAY).unwrap();
//! menu.transition_end(section).unwrap();
//! assert!(!menu.is_animating(section));
//!
//! let (tree, _scheduler) = menu.destroy();
//! assert!(!tree.has_flags(section, NodeFlags::OPEN));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod menu;
pub mod query;
pub mod resolve;
pub mod scheduler;
pub mod scroll;
pub mod transition;
pub mod types;

#[cfg(test)]
mod test_util;

pub use menu::Menu;
pub use transition::{COMMIT_DELAY, Direction, FALLBACK_SLACK};
pub use types::{GateHook, HookContext, Hooks, Layout, MenuConfig, NotifyHook, Verdict};
