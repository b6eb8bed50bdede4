// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition engine: the open/close lifecycle of one item.
//!
//! ## Lifecycle
//!
//! Each item moves `Closed → Opening → Open → Closing → Closed`:
//!
//! 1. The gate hook ([`on_open`](crate::Hooks::on_open) or [`on_close`](crate::Hooks::on_close))
//!    decides with a [`Verdict`]. `Cancel` abandons the operation untouched,
//!    `Defer` parks it until [`Menu::settle`].
//! 2. Without animation the state flips on the spot and the notify hook runs.
//! 3. With animation, a frame is requested. On that frame the item is pinned to
//!    its starting height (clipped) and flagged [`ANIMATING`](NodeFlags::ANIMATING);
//!    opening items become [`OPEN`](NodeFlags::OPEN) right away, closing items
//!    [`CLOSING`](NodeFlags::CLOSING).
//! 4. [`COMMIT_DELAY`] later the end height is applied, which the host renders as
//!    the animated change.
//! 5. The transition finishes on [`Menu::transition_end`] for that exact item, or
//!    after the configured transition plus [`FALLBACK_SLACK`], whichever comes first.
//!    Overrides are cleared, the scrollbar refreshed, and the notify hook runs.
//!
//! Starting a transition on an item cancels its previous one along with all of its
//! tickets, so an item never sees two terminal events.
//!
//! Top-level items in horizontal layout are hover-driven: they only notify.

use core::time::Duration;

use understory_outline::{LocateError, NodeFlags, NodeId, Overrides};

use crate::menu::Menu;
use crate::scheduler::{Scheduler, Ticket};
use crate::types::{HookContext, Verdict};

/// Delay between pinning the starting height and applying the end height.
pub const COMMIT_DELAY: Duration = Duration::from_millis(50);

/// Grace period after the transition duration before a transition finishes on its own.
pub const FALLBACK_SLACK: Duration = Duration::from_millis(50);

/// Direction of a transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Expanding.
    Open,
    /// Collapsing.
    Close,
}

/// What a ticket stands for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    Frame,
    Commit,
    Fallback,
}

/// An in-flight transition of one item.
#[derive(Clone, Debug)]
pub(crate) struct AnimationHandle {
    pub(crate) dir: Direction,
    parts: HookContext,
    close_children: bool,
    frame: Option<Ticket>,
    commit: Option<Ticket>,
    // Set once the transition is visibly running; only then does an end signal count.
    fallback: Option<Ticket>,
    target: f64,
}

impl AnimationHandle {
    fn tickets(&self) -> impl Iterator<Item = Ticket> {
        [self.frame, self.commit, self.fallback].into_iter().flatten()
    }
}

/// An operation waiting on a deferred gate hook.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Parked {
    dir: Direction,
    parts: HookContext,
    close_children: bool,
}

impl<S: Scheduler> Menu<S> {
    /// A scheduler ticket fired.
    ///
    /// Tickets the menu no longer knows (cancelled, already delivered, or never its
    /// own) are ignored.
    pub fn wake(&mut self, ticket: Ticket) -> Result<(), LocateError> {
        let Some((item, step)) = self.tickets.remove(&ticket) else {
            tracing::trace!(?ticket, "unknown ticket ignored");
            return Ok(());
        };
        if !self.tree.is_alive(item) {
            self.drop_handle(item);
            return Ok(());
        }
        match step {
            Step::Frame => {
                self.start_animation(item);
                Ok(())
            }
            Step::Commit => {
                self.commit(item);
                Ok(())
            }
            Step::Fallback => {
                tracing::trace!(?item, "transition finished by fallback");
                self.finish(item)
            }
        }
    }

    /// The host observed the end of `node`'s rendered height transition.
    ///
    /// Only finishes a transition when `node` is the animating item itself and its
    /// transition is running; signals bubbling up from other nodes are ignored.
    pub fn transition_end(&mut self, node: NodeId) -> Result<(), LocateError> {
        match self.animations.get(&node) {
            Some(handle) if handle.fallback.is_some() => self.finish(node),
            _ => {
                tracing::trace!(?node, "transition end ignored");
                Ok(())
            }
        }
    }

    /// Resolve a deferred gate hook for `item`.
    ///
    /// [`Verdict::Proceed`] continues the parked operation, [`Verdict::Cancel`]
    /// drops it, and [`Verdict::Defer`] keeps it parked. A no-op if nothing is parked.
    pub fn settle(&mut self, item: NodeId, verdict: Verdict) -> Result<(), LocateError> {
        let Some(parked) = self.parked.remove(&item) else {
            tracing::trace!(?item, "nothing parked");
            return Ok(());
        };
        match verdict {
            Verdict::Proceed => {
                // The item may have reached the target state while parked.
                if (parked.dir == Direction::Open) == self.open_or_opening(item) {
                    return Ok(());
                }
                self.proceed(parked.dir, parked.parts, parked.close_children)
            }
            Verdict::Cancel => {
                tracing::debug!(?item, dir = ?parked.dir, "deferred transition cancelled");
                Ok(())
            }
            Verdict::Defer => {
                self.parked.insert(item, parked);
                Ok(())
            }
        }
    }

    pub(crate) fn gate_open(
        &mut self,
        parts: HookContext,
        close_children: bool,
    ) -> Result<(), LocateError> {
        self.gate(Direction::Open, parts, close_children)
    }

    pub(crate) fn gate_close(
        &mut self,
        parts: HookContext,
        close_children: bool,
    ) -> Result<(), LocateError> {
        self.gate(Direction::Close, parts, close_children)
    }

    fn gate(
        &mut self,
        dir: Direction,
        parts: HookContext,
        close_children: bool,
    ) -> Result<(), LocateError> {
        self.parked.remove(&parts.item);
        let hook = match dir {
            Direction::Open => self.config.hooks.on_open.as_mut(),
            Direction::Close => self.config.hooks.on_close.as_mut(),
        };
        let verdict = hook.map_or(Verdict::Proceed, |h| h(&self.tree, &parts));
        match verdict {
            Verdict::Proceed => self.proceed(dir, parts, close_children),
            Verdict::Cancel => {
                tracing::debug!(item = ?parts.item, ?dir, "transition cancelled by hook");
                Ok(())
            }
            Verdict::Defer => {
                tracing::trace!(item = ?parts.item, ?dir, "transition parked");
                self.parked.insert(
                    parts.item,
                    Parked {
                        dir,
                        parts,
                        close_children,
                    },
                );
                Ok(())
            }
        }
    }

    fn proceed(
        &mut self,
        dir: Direction,
        parts: HookContext,
        close_children: bool,
    ) -> Result<(), LocateError> {
        let item = parts.item;
        if !self.tree.is_alive(item) {
            return Ok(());
        }
        if self.config.horizontal() && self.tree.is_root_item(item) {
            self.notify(dir, &parts);
            return Ok(());
        }
        if self.config.animate {
            self.schedule(dir, parts, close_children);
            return Ok(());
        }
        match dir {
            Direction::Open => {
                if !self.tree.set_open(item, true) {
                    tracing::debug!(?item, "open refused");
                    return Ok(());
                }
                self.notify(dir, &parts);
                if self.config.accordion {
                    self.close_others(item, close_children)?;
                }
            }
            Direction::Close => {
                self.tree.set_open(item, false);
                if close_children {
                    self.close_descendants(item);
                }
                self.notify(dir, &parts);
            }
        }
        Ok(())
    }

    fn schedule(&mut self, dir: Direction, parts: HookContext, close_children: bool) {
        let item = parts.item;
        self.abort_animation(item);
        let frame = self.scheduler.request_frame();
        self.tickets.insert(frame, (item, Step::Frame));
        self.animations.insert(
            item,
            AnimationHandle {
                dir,
                parts,
                close_children,
                frame: Some(frame),
                commit: None,
                fallback: None,
                target: 0.0,
            },
        );
        tracing::trace!(?item, ?dir, "transition scheduled");
    }

    fn start_animation(&mut self, item: NodeId) {
        let Some(handle) = self.animations.get_mut(&item) else {
            return;
        };
        handle.frame = None;
        let (dir, parts) = (handle.dir, handle.parts);
        let header = self.rounded_height(parts.link);
        let full = header + self.rounded_height(parts.submenu);
        let (from, to) = match dir {
            Direction::Open => {
                if !self.tree.set_open(item, true) {
                    tracing::debug!(?item, "open refused, transition dropped");
                    self.abort_animation(item);
                    return;
                }
                (header, full)
            }
            Direction::Close => {
                self.tree.set_flag(item, NodeFlags::CLOSING, true);
                (full, header)
            }
        };
        self.tree.set_overrides(
            item,
            Overrides {
                height: Some(from),
                clip: true,
            },
        );
        self.tree.set_flag(item, NodeFlags::ANIMATING, true);
        let commit = self.scheduler.set_timeout(COMMIT_DELAY);
        let fallback = self
            .scheduler
            .set_timeout(self.config.transition + FALLBACK_SLACK);
        self.tickets.insert(commit, (item, Step::Commit));
        self.tickets.insert(fallback, (item, Step::Fallback));
        if let Some(handle) = self.animations.get_mut(&item) {
            handle.commit = Some(commit);
            handle.fallback = Some(fallback);
            handle.target = to;
        }
        tracing::debug!(?item, ?dir, from, to, "transition started");
    }

    fn commit(&mut self, item: NodeId) {
        let Some(handle) = self.animations.get_mut(&item) else {
            return;
        };
        handle.commit = None;
        let height = handle.target;
        self.tree.set_overrides(
            item,
            Overrides {
                height: Some(height),
                clip: true,
            },
        );
    }

    fn finish(&mut self, item: NodeId) -> Result<(), LocateError> {
        let Some(handle) = self.animations.remove(&item) else {
            return Ok(());
        };
        self.cancel_tickets(&handle);
        self.clear_presentation(item);
        if handle.dir == Direction::Close {
            self.tree.set_open(item, false);
            if handle.close_children {
                self.close_descendants(item);
            }
        }
        if !self.config.horizontal() {
            self.scroll.update();
        }
        tracing::debug!(?item, dir = ?handle.dir, "transition finished");
        self.notify(handle.dir, &handle.parts);
        if handle.dir == Direction::Open && self.config.accordion {
            self.close_others(item, handle.close_children)?;
        }
        Ok(())
    }

    /// Drop `item`'s transition without finishing it. Open state is left as is.
    pub(crate) fn abort_animation(&mut self, item: NodeId) {
        if let Some(handle) = self.animations.remove(&item) {
            self.cancel_tickets(&handle);
            self.clear_presentation(item);
            tracing::trace!(?item, dir = ?handle.dir, "transition aborted");
        }
    }

    fn drop_handle(&mut self, item: NodeId) {
        if let Some(handle) = self.animations.remove(&item) {
            self.cancel_tickets(&handle);
        }
    }

    fn cancel_tickets(&mut self, handle: &AnimationHandle) {
        for ticket in handle.tickets() {
            self.scheduler.cancel(ticket);
            self.tickets.remove(&ticket);
        }
    }

    fn clear_presentation(&mut self, item: NodeId) {
        self.tree
            .set_flag(item, NodeFlags::ANIMATING | NodeFlags::CLOSING, false);
        self.tree.clear_overrides(item);
    }

    fn notify(&mut self, dir: Direction, parts: &HookContext) {
        let hook = match dir {
            Direction::Open => self.config.hooks.on_opened.as_mut(),
            Direction::Close => self.config.hooks.on_closed.as_mut(),
        };
        if let Some(h) = hook {
            h(&self.tree, parts);
        }
    }

    fn rounded_height(&self, node: NodeId) -> f64 {
        self.tree.extent(node).map_or(0.0, |s| s.round().height)
    }
}
