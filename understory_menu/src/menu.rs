// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu controller: construction, public operations, host events, and teardown.
//!
//! ## Overview
//!
//! A [`Menu`] owns the [`Tree`] it controls, its [`MenuConfig`], a [`Scheduler`],
//! and an optional scrollbar collaborator.
//! Public operations resolve the node they are given, decide what must change
//! (see [`resolve`](crate::resolve)), and run each affected item through the
//! transition engine (see [`transition`](crate::transition)).
//!
//! ## Host events
//!
//! The menu never registers callbacks with anything. The host forwards events:
//!
//! - [`Menu::wake`] when a scheduler ticket fires,
//! - [`Menu::transition_end`] when a rendered height transition reports completion,
//! - [`Menu::settle`] when a deferred gate hook has made up its mind,
//! - [`Menu::handle_click`] and [`Menu::handle_resize`] for input.
//!
//! ## Teardown
//!
//! [`Menu::destroy`] consumes the controller, so nothing can reach it afterwards.
//! It cancels every pending ticket, strips transient state from the tree, and
//! hands the tree and scheduler back.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::time::Duration;

use understory_outline::{LocateError, NodeFlags, NodeId, NodeKind, Query, Size, Tree};

use crate::scheduler::{ManualScheduler, Scheduler, Ticket};
use crate::scroll::{Scroll, ScrollbarProvider};
use crate::transition::{AnimationHandle, Parked, Step};
use crate::types::{HookContext, MenuConfig};

/// Collapsible menu controller.
///
/// ## Usage
///
/// - Mirror the rendered menu into a [`Tree`]: a container node holding an
///   [`Inner`](NodeKind::Inner) scrolling region whose children are the top-level items.
/// - Construct with [`Menu::new`], or [`Menu::with_scrollbar`] to supply a custom scrollbar.
/// - Drive it with [`open`](Menu::open), [`close`](Menu::close), [`toggle`](Menu::toggle),
///   [`close_all`](Menu::close_all), and forward host events.
/// - Read state back from [`Menu::tree`], for example with [`crate::query`].
pub struct Menu<S: Scheduler> {
    pub(crate) tree: Tree,
    pub(crate) container: NodeId,
    pub(crate) inner: NodeId,
    pub(crate) config: MenuConfig,
    pub(crate) scheduler: S,
    pub(crate) scroll: Scroll,
    pub(crate) click_bound: bool,
    pub(crate) resize_bound: bool,
    pub(crate) last_width: f64,
    pub(crate) animations: BTreeMap<NodeId, AnimationHandle>,
    pub(crate) tickets: BTreeMap<Ticket, (NodeId, Step)>,
    pub(crate) parked: BTreeMap<NodeId, Parked>,
}

impl<S: Scheduler> core::fmt::Debug for Menu<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Menu")
            .field("tree", &self.tree)
            .field("container", &self.container)
            .field("config", &self.config)
            .field("scroll", &self.scroll)
            .field("animations", &self.animations.len())
            .field("parked", &self.parked.len())
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler> Menu<S> {
    /// Attach a controller to `container`, falling back to native overflow scrolling.
    ///
    /// Fails with [`LocateError::NotFound`] if `container` has no
    /// [`Inner`](NodeKind::Inner) child.
    pub fn new(
        tree: Tree,
        container: NodeId,
        config: MenuConfig,
        scheduler: S,
    ) -> Result<Self, LocateError> {
        Self::build(tree, container, config, scheduler, None)
    }

    /// Attach a controller whose scrolling region uses scrollbars from `provider`
    /// whenever the viewport is at least as wide as the configured breakpoint.
    pub fn with_scrollbar(
        tree: Tree,
        container: NodeId,
        config: MenuConfig,
        scheduler: S,
        provider: impl ScrollbarProvider + 'static,
    ) -> Result<Self, LocateError> {
        Self::build(tree, container, config, scheduler, Some(Box::new(provider)))
    }

    fn build(
        mut tree: Tree,
        container: NodeId,
        config: MenuConfig,
        scheduler: S,
        provider: Option<Box<dyn ScrollbarProvider>>,
    ) -> Result<Self, LocateError> {
        let inner = tree
            .children_matching(container, Query::kind(NodeKind::Inner))
            .first()
            .copied()
            .ok_or(LocateError::NotFound {
                kind: NodeKind::Inner,
            })?;
        if !config.animate {
            tree.set_flag(container, NodeFlags::NO_ANIMATION, true);
        }
        let mut scroll = Scroll::new(provider, inner);
        if !config.horizontal() {
            scroll.manage(&mut tree, config.viewport_width, config.breakpoint);
        }
        tracing::debug!(
            ?container,
            animate = config.animate,
            accordion = config.accordion,
            touch = config.touch,
            "menu attached"
        );
        Ok(Self {
            tree,
            container,
            inner,
            click_bound: config.touch,
            resize_bound: true,
            last_width: config.viewport_width,
            config,
            scheduler,
            scroll,
            animations: BTreeMap::new(),
            tickets: BTreeMap::new(),
            parked: BTreeMap::new(),
        })
    }

    /// The controlled tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The configuration captured at construction.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// The container the menu is attached to.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The scrolling region holding the top-level items.
    pub fn inner(&self) -> NodeId {
        self.inner
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The scheduler, mutably (for hosts that drive it themselves).
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Viewport width from construction or the latest resize.
    pub fn viewport_width(&self) -> f64 {
        self.last_width
    }

    /// Returns true if a custom scrollbar currently drives the scrolling region.
    pub fn uses_custom_scrollbar(&self) -> bool {
        self.scroll.is_custom()
    }

    /// Returns true if `item` has a transition scheduled or in flight.
    pub fn is_animating(&self, item: NodeId) -> bool {
        self.animations.contains_key(&item)
    }

    /// Returns true if a gate hook for `item` is waiting on [`Menu::settle`].
    pub fn is_parked(&self, item: NodeId) -> bool {
        self.parked.contains_key(&item)
    }

    /// Open the item at `el` with the configured `close_children` default.
    pub fn open(&mut self, el: NodeId) -> Result<(), LocateError> {
        self.open_with(el, self.config.close_children)
    }

    /// Reveal the item at `el`.
    ///
    /// Every closed item between the top level and `el` ends up open: items below
    /// the outermost closed one snap open, and that one runs the full, possibly
    /// animated, open transition. `el` may resolve to a leaf item, in which case
    /// only its ancestors open.
    ///
    /// A no-op if everything is already open or if `el` or any item above it is
    /// disabled.
    ///
    /// The snapped items are marked open before the pivot's
    /// [`on_open`](crate::Hooks::on_open) gate runs. If the gate cancels, they stay
    /// open, hidden under the still-closed pivot.
    pub fn open_with(&mut self, el: NodeId, close_children: bool) -> Result<(), LocateError> {
        let target = self.tree.item_from(el, false)?;
        let Some((pivot, below)) = self.find_pivot(target) else {
            return Ok(());
        };
        let parts = self.parts(pivot, false)?;
        self.reveal(&below, close_children);
        self.gate_open(parts, close_children)
    }

    /// Close the toggle item at `el` with the configured `close_children` default.
    pub fn close(&mut self, el: NodeId) -> Result<(), LocateError> {
        self.close_with(el, self.config.close_children)
    }

    /// Close the toggle item at `el`. A no-op if it is not open (or already
    /// closing) or is disabled.
    pub fn close_with(&mut self, el: NodeId, close_children: bool) -> Result<(), LocateError> {
        self.close_item(el, close_children, false)
    }

    pub(crate) fn close_item(
        &mut self,
        el: NodeId,
        close_children: bool,
        auto_close: bool,
    ) -> Result<(), LocateError> {
        let item = self.tree.item_from(el, true)?;
        let parts = self.parts(item, auto_close)?;
        if !self.open_or_opening(item) || self.tree.has_flags(item, NodeFlags::DISABLED) {
            return Ok(());
        }
        self.gate_close(parts, close_children)
    }

    /// Toggle the item at `el` with the configured `close_children` default.
    pub fn toggle(&mut self, el: NodeId) -> Result<(), LocateError> {
        self.toggle_with(el, self.config.close_children)
    }

    /// Close the toggle item at `el` if it is open, open it otherwise.
    pub fn toggle_with(&mut self, el: NodeId, close_children: bool) -> Result<(), LocateError> {
        let item = self.tree.item_from(el, true)?;
        if self.open_or_opening(item) {
            self.close_with(item, close_children)
        } else {
            self.open_with(item, close_children)
        }
    }

    /// Close every open top-level item with the configured `close_children` default.
    pub fn close_all(&mut self) -> Result<(), LocateError> {
        self.close_all_with(self.config.close_children)
    }

    /// Close every open top-level item.
    pub fn close_all_with(&mut self, close_children: bool) -> Result<(), LocateError> {
        for item in self.tree.children_matching(self.inner, Query::open_items()) {
            self.close_item(item, close_children, false)?;
        }
        Ok(())
    }

    /// Recompute the custom scrollbar's metrics, if there is one.
    pub fn update(&mut self) {
        self.scroll.update();
    }

    /// Enable or disable the item at `el`.
    ///
    /// Disabling closes the item on the spot and abandons its pending transition.
    pub fn set_disabled(&mut self, el: NodeId, disabled: bool) -> Result<(), LocateError> {
        let item = self.tree.item_from(el, false)?;
        if disabled {
            self.abort_animation(item);
            self.parked.remove(&item);
        }
        self.tree.set_disabled(item, disabled);
        Ok(())
    }

    /// Report a node's rendered size from the host's layout system.
    pub fn set_extent(&mut self, node: NodeId, extent: Size) {
        self.tree.set_extent(node, extent);
    }

    /// Mark a toggle as hover-driven; clicks on it are then consumed without toggling.
    pub fn set_hover(&mut self, toggle: NodeId, hover: bool) {
        self.tree.set_flag(toggle, NodeFlags::HOVER, hover);
    }

    /// Mark the item at `el` as matching the current route.
    pub fn set_active(&mut self, el: NodeId, active: bool) -> Result<(), LocateError> {
        let item = self.tree.item_from(el, false)?;
        self.tree.set_flag(item, NodeFlags::ACTIVE, active);
        Ok(())
    }

    /// Delegated click on `node`.
    ///
    /// Only handled in touch contexts. A click on or inside a toggle toggles its
    /// item unless the toggle is hover-driven. Returns true if the click belonged
    /// to a toggle; the host should then suppress the click's default action.
    pub fn handle_click(&mut self, node: NodeId) -> Result<bool, LocateError> {
        if !self.click_bound {
            return Ok(false);
        }
        let toggle = if self.tree.kind(node) == Some(NodeKind::Toggle) {
            Some(node)
        } else {
            self.tree.ancestor_of_kind(node, NodeKind::Toggle).ok()
        };
        let Some(toggle) = toggle else {
            return Ok(false);
        };
        if !self.tree.has_flags(toggle, NodeFlags::HOVER) {
            self.toggle(toggle)?;
        }
        Ok(true)
    }

    /// The window was resized to `width`.
    ///
    /// Refreshes scrollbar metrics and, in vertical layout, switches between the
    /// custom scrollbar and native overflow across the breakpoint.
    pub fn handle_resize(&mut self, width: f64) {
        if !self.resize_bound {
            return;
        }
        self.update();
        self.last_width = width;
        if !self.config.horizontal() {
            self.scroll
                .manage(&mut self.tree, width, self.config.breakpoint);
        }
    }

    /// Tear the controller down and return the tree and scheduler.
    ///
    /// Every pending ticket is cancelled so no hook fires afterwards, every item
    /// loses its open and animating state and its overrides, and any custom
    /// scrollbar is destroyed.
    pub fn destroy(mut self) -> (Tree, S) {
        self.click_bound = false;
        self.resize_bound = false;
        for ticket in core::mem::take(&mut self.tickets).into_keys() {
            self.scheduler.cancel(ticket);
        }
        self.animations.clear();
        self.parked.clear();
        let transient = NodeFlags::OPEN | NodeFlags::ANIMATING | NodeFlags::CLOSING;
        for item in self
            .tree
            .descendants_matching(self.container, Query::kind(NodeKind::Item))
        {
            self.tree.set_flag(item, transient, false);
            self.tree.clear_overrides(item);
        }
        self.tree
            .set_flag(self.container, NodeFlags::NO_ANIMATION, false);
        self.scroll.teardown(&mut self.tree);
        tracing::debug!(container = ?self.container, "menu destroyed");
        (self.tree, self.scheduler)
    }

    pub(crate) fn parts(&self, item: NodeId, auto_close: bool) -> Result<HookContext, LocateError> {
        Ok(HookContext {
            item,
            link: self.tree.link_from(item, true)?,
            submenu: self.tree.submenu_of(item)?,
            auto_close,
        })
    }
}

impl Menu<ManualScheduler> {
    /// Deliver every pending frame ticket.
    pub fn run_frame(&mut self) -> Result<(), LocateError> {
        for ticket in self.scheduler.take_frames() {
            self.wake(ticket)?;
        }
        Ok(())
    }

    /// Move the virtual clock forward by `by`, delivering frames and due timers in order.
    ///
    /// Pending frames run before each timer, so work scheduled while advancing is
    /// picked up in the same call when it falls due.
    pub fn advance(&mut self, by: Duration) -> Result<(), LocateError> {
        let until = self.scheduler.now() + by;
        loop {
            self.run_frame()?;
            match self.scheduler.pop_due(until) {
                Some(ticket) => self.wake(ticket)?,
                None => break,
            }
        }
        self.scheduler.set_now(until);
        Ok(())
    }

    /// Advance until nothing is pending.
    pub fn run_until_idle(&mut self) -> Result<(), LocateError> {
        while self.scheduler.pending() > 0 {
            self.advance(self.config.transition + crate::FALLBACK_SLACK)?;
        }
        Ok(())
    }
}
