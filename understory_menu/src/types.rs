// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the menu: configuration, hooks, and verdicts.
//!
//! ## Overview
//!
//! [`MenuConfig`] is captured once when a [`Menu`](crate::Menu) is built and never changes afterwards.
//! Its [`Hooks`] let the host observe and gate every open and close.

use alloc::boxed::Box;
use core::time::Duration;

use understory_outline::{NodeId, Tree};

/// How the menu is laid out.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Layout {
    /// Sidebar: every item expands in place.
    #[default]
    Vertical,
    /// Top bar: top-level items are driven by hover and never animate.
    Horizontal,
}

/// Answer of a gate hook ([`Hooks::on_open`] / [`Hooks::on_close`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// Go ahead with the transition.
    Proceed,
    /// Abandon the transition without touching any state.
    Cancel,
    /// Decide later with [`Menu::settle`](crate::Menu::settle).
    ///
    /// The operation parks until settled. Starting another transition on the same
    /// item discards the parked one.
    Defer,
}

/// What a hook is told about the item in transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HookContext {
    /// The item opening or closing.
    pub item: NodeId,
    /// Its toggle.
    pub link: NodeId,
    /// Its submenu.
    pub submenu: NodeId,
    /// True when the close was triggered by accordion exclusivity rather than
    /// requested directly. Always false for open hooks.
    pub auto_close: bool,
}

/// A hook that may stop a transition before it starts.
pub type GateHook = Box<dyn FnMut(&Tree, &HookContext) -> Verdict>;

/// A hook notified once a transition has finished.
pub type NotifyHook = Box<dyn FnMut(&Tree, &HookContext)>;

/// Lifecycle hooks. Each is optional; a missing gate hook proceeds.
///
/// Hooks receive a read-only view of the menu's tree.
#[derive(Default)]
pub struct Hooks {
    /// Before an item opens.
    pub on_open: Option<GateHook>,
    /// After an item has opened.
    pub on_opened: Option<NotifyHook>,
    /// Before an item closes.
    pub on_close: Option<GateHook>,
    /// After an item has closed.
    pub on_closed: Option<NotifyHook>,
}

impl core::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_open", &self.on_open.is_some())
            .field("on_opened", &self.on_opened.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_closed", &self.on_closed.is_some())
            .finish()
    }
}

/// Menu configuration.
///
/// Build with [`MenuConfig::default`] and the `with_*` methods.
#[derive(Debug)]
pub struct MenuConfig {
    /// Animate height transitions. Default: true.
    pub animate: bool,
    /// Opening an item closes its open siblings. Default: true.
    pub accordion: bool,
    /// Closing an item also closes its open descendants. Default: false.
    pub close_children: bool,
    /// Layout mode. Default: [`Layout::Vertical`].
    pub layout: Layout,
    /// Duration of the height transition. Default: 300 ms.
    ///
    /// A transition whose end is never signalled finishes anyway after this
    /// duration plus [`FALLBACK_SLACK`](crate::FALLBACK_SLACK).
    pub transition: Duration,
    /// The host is a touch/mobile context; only then are clicks delegated to the menu.
    pub touch: bool,
    /// Viewport width at construction.
    pub viewport_width: f64,
    /// Viewport width below which the scrolling region uses native overflow. Default: 1200.
    pub breakpoint: f64,
    /// Lifecycle hooks.
    pub hooks: Hooks,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            animate: true,
            accordion: true,
            close_children: false,
            layout: Layout::Vertical,
            transition: Duration::from_millis(300),
            touch: false,
            viewport_width: 0.0,
            breakpoint: 1200.0,
            hooks: Hooks::default(),
        }
    }
}

impl MenuConfig {
    /// Set whether transitions animate.
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Set accordion mode.
    pub fn with_accordion(mut self, accordion: bool) -> Self {
        self.accordion = accordion;
        self
    }

    /// Set the default for closing descendants along with an item.
    pub fn with_close_children(mut self, close_children: bool) -> Self {
        self.close_children = close_children;
        self
    }

    /// Set the layout mode.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the transition duration.
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Describe the host viewport.
    pub fn with_viewport(mut self, width: f64, touch: bool) -> Self {
        self.viewport_width = width;
        self.touch = touch;
        self
    }

    /// Set the layout breakpoint.
    pub fn with_breakpoint(mut self, breakpoint: f64) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Gate openings.
    pub fn on_open(mut self, f: impl FnMut(&Tree, &HookContext) -> Verdict + 'static) -> Self {
        self.hooks.on_open = Some(Box::new(f));
        self
    }

    /// Observe finished openings.
    pub fn on_opened(mut self, f: impl FnMut(&Tree, &HookContext) + 'static) -> Self {
        self.hooks.on_opened = Some(Box::new(f));
        self
    }

    /// Gate closings.
    pub fn on_close(mut self, f: impl FnMut(&Tree, &HookContext) -> Verdict + 'static) -> Self {
        self.hooks.on_close = Some(Box::new(f));
        self
    }

    /// Observe finished closings.
    pub fn on_closed(mut self, f: impl FnMut(&Tree, &HookContext) + 'static) -> Self {
        self.hooks.on_closed = Some(Box::new(f));
        self
    }

    pub(crate) fn horizontal(&self) -> bool {
        self.layout == Layout::Horizontal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = MenuConfig::default();
        assert!(c.animate);
        assert!(c.accordion);
        assert!(!c.close_children);
        assert_eq!(c.layout, Layout::Vertical);
        assert_eq!(c.transition, Duration::from_millis(300));
        assert!(c.hooks.on_open.is_none());
    }

    #[test]
    fn builders_set_fields() {
        let c = MenuConfig::default()
            .with_animate(false)
            .with_accordion(false)
            .with_close_children(true)
            .with_layout(Layout::Horizontal)
            .with_viewport(800.0, true)
            .on_open(|_, _| Verdict::Cancel);
        assert!(!c.animate && !c.accordion && c.close_children);
        assert!(c.horizontal());
        assert!(c.touch);
        assert_eq!(c.viewport_width, 800.0);
        assert!(c.hooks.on_open.is_some());
        assert!(c.hooks.on_closed.is_none());
    }
}
