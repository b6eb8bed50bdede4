// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use understory_outline::{LocalNode, NodeId, NodeKind, Tree};

use crate::Menu;
use crate::scheduler::ManualScheduler;
use crate::types::{MenuConfig, Verdict};

/// Hook invocation, in call order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Open(NodeId),
    Opened(NodeId),
    Close(NodeId, bool),
    Closed(NodeId),
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, e: Event) {
        self.0.borrow_mut().push(e);
    }

    /// Drain everything recorded so far.
    pub(crate) fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Install hooks on `config` that record every call and always proceed.
pub(crate) fn recording(config: MenuConfig) -> (MenuConfig, Log) {
    let log = Log::default();
    let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
    let config = config
        .on_open(move |_, cx| {
            l1.push(Event::Open(cx.item));
            Verdict::Proceed
        })
        .on_opened(move |_, cx| l2.push(Event::Opened(cx.item)))
        .on_close(move |_, cx| {
            l3.push(Event::Close(cx.item, cx.auto_close));
            Verdict::Proceed
        })
        .on_closed(move |_, cx| l4.push(Event::Closed(cx.item)));
    (config, log)
}

/// Ids of the test menu:
///
/// ```text
/// container ── inner ─┬─ A (toggle 40, submenu 120) ─┬─ B (link)
///                     │                              ├─ C (toggle 40, submenu 80) ─┬─ D (link)
///                     │                              │                             └─ E (link)
///                     │                              └─ G (toggle 40, submenu 40) ── H (link)
///                     └─ F (toggle 40, submenu 40) ── I (link)
/// ```
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fixture {
    pub(crate) container: NodeId,
    pub(crate) inner: NodeId,
    pub(crate) a: NodeId,
    pub(crate) a_toggle: NodeId,
    pub(crate) a_sub: NodeId,
    pub(crate) b: NodeId,
    pub(crate) b_link: NodeId,
    pub(crate) c: NodeId,
    pub(crate) c_toggle: NodeId,
    pub(crate) d: NodeId,
    pub(crate) e: NodeId,
    pub(crate) f: NodeId,
    pub(crate) g: NodeId,
    pub(crate) h: NodeId,
    pub(crate) i: NodeId,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::build().1
    }

    fn build() -> (Tree, Self) {
        let mut t = Tree::new();
        let container = t.insert(None, LocalNode::new(NodeKind::Menu));
        let inner = t.insert(Some(container), LocalNode::new(NodeKind::Inner));

        let a = t.insert(Some(inner), LocalNode::new(NodeKind::Item));
        let a_toggle = t.insert(Some(a), LocalNode::new(NodeKind::Toggle).with_height(40.0));
        let a_sub = t.insert(Some(a), LocalNode::new(NodeKind::Submenu).with_height(120.0));
        let b = t.insert(Some(a_sub), LocalNode::new(NodeKind::Item));
        let b_link = t.insert(Some(b), LocalNode::new(NodeKind::Link).with_height(40.0));
        let c = t.insert(Some(a_sub), LocalNode::new(NodeKind::Item));
        let c_toggle = t.insert(Some(c), LocalNode::new(NodeKind::Toggle).with_height(40.0));
        let c_sub = t.insert(Some(c), LocalNode::new(NodeKind::Submenu).with_height(80.0));
        let d = leaf(&mut t, c_sub);
        let e = leaf(&mut t, c_sub);
        let g = t.insert(Some(a_sub), LocalNode::new(NodeKind::Item));
        t.insert(Some(g), LocalNode::new(NodeKind::Toggle).with_height(40.0));
        let g_sub = t.insert(Some(g), LocalNode::new(NodeKind::Submenu).with_height(40.0));
        let h = leaf(&mut t, g_sub);

        let f = t.insert(Some(inner), LocalNode::new(NodeKind::Item));
        t.insert(Some(f), LocalNode::new(NodeKind::Toggle).with_height(40.0));
        let f_sub = t.insert(Some(f), LocalNode::new(NodeKind::Submenu).with_height(40.0));
        let i = leaf(&mut t, f_sub);

        let ids = Self {
            container,
            inner,
            a,
            a_toggle,
            a_sub,
            b,
            b_link,
            c,
            c_toggle,
            d,
            e,
            f,
            g,
            h,
            i,
        };
        (t, ids)
    }

    /// A fresh tree with the same ids.
    pub(crate) fn tree(&self) -> Tree {
        Self::build().0
    }

    pub(crate) fn menu(&self, config: MenuConfig) -> Menu<ManualScheduler> {
        self.menu_with(config, |_| {})
    }

    /// Build a menu after preparing a fresh tree with `prep`.
    pub(crate) fn menu_with(
        &self,
        config: MenuConfig,
        prep: impl FnOnce(&mut Tree),
    ) -> Menu<ManualScheduler> {
        let mut tree = self.tree();
        prep(&mut tree);
        Menu::new(tree, self.container, config, ManualScheduler::new()).unwrap()
    }
}

fn leaf(t: &mut Tree, parent: NodeId) -> NodeId {
    let item = t.insert(Some(parent), LocalNode::new(NodeKind::Item));
    t.insert(Some(item), LocalNode::new(NodeKind::Link).with_height(40.0));
    item
}
