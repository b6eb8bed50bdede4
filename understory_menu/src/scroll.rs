// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollbar collaborator.
//!
//! The menu's scrolling region is either driven by a custom scrollbar supplied by
//! a [`ScrollbarProvider`], or falls back to native overflow (flagged on the region
//! with [`NodeFlags::NATIVE_OVERFLOW`]). Exactly one of the two is in effect at
//! any time, and switching tears the previous one down first.

use alloc::boxed::Box;

use understory_outline::{NodeFlags, NodeId, Tree};

/// A custom scrollbar attached to the scrolling region.
pub trait Scrollbar {
    /// Recompute metrics after the content changed size.
    fn update(&mut self);
    /// Release every resource. Called exactly once, before the scrollbar is dropped.
    fn destroy(&mut self);
}

/// Creates custom scrollbars on demand.
pub trait ScrollbarProvider {
    /// Attach a scrollbar to `region`, or `None` if none is available.
    fn attach(&mut self, tree: &Tree, region: NodeId) -> Option<Box<dyn Scrollbar>>;
}

pub(crate) enum ScrollMode {
    Custom(Box<dyn Scrollbar>),
    Native,
}

impl core::fmt::Debug for ScrollMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom"),
            Self::Native => f.write_str("Native"),
        }
    }
}

pub(crate) struct Scroll {
    provider: Option<Box<dyn ScrollbarProvider>>,
    mode: ScrollMode,
    region: NodeId,
}

impl core::fmt::Debug for Scroll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scroll")
            .field("mode", &self.mode)
            .field("region", &self.region)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

impl Scroll {
    pub(crate) fn new(provider: Option<Box<dyn ScrollbarProvider>>, region: NodeId) -> Self {
        Self {
            provider,
            mode: ScrollMode::Native,
            region,
        }
    }

    pub(crate) fn is_custom(&self) -> bool {
        matches!(self.mode, ScrollMode::Custom(_))
    }

    pub(crate) fn update(&mut self) {
        if let ScrollMode::Custom(bar) = &mut self.mode {
            bar.update();
        }
    }

    /// Pick custom or native scrolling for a viewport of `width`.
    pub(crate) fn manage(&mut self, tree: &mut Tree, width: f64, breakpoint: f64) {
        if width < breakpoint {
            self.use_native(tree);
            return;
        }
        if self.is_custom() {
            return;
        }
        let region = self.region;
        let attached = self
            .provider
            .as_mut()
            .and_then(|p| p.attach(&*tree, region));
        match attached {
            Some(bar) => {
                tree.set_flag(self.region, NodeFlags::NATIVE_OVERFLOW, false);
                self.mode = ScrollMode::Custom(bar);
                tracing::debug!(region = ?self.region, "custom scrollbar attached");
            }
            None => tree.set_flag(self.region, NodeFlags::NATIVE_OVERFLOW, true),
        }
    }

    pub(crate) fn use_native(&mut self, tree: &mut Tree) {
        if let ScrollMode::Custom(mut bar) = core::mem::replace(&mut self.mode, ScrollMode::Native) {
            bar.destroy();
            tracing::debug!(region = ?self.region, "custom scrollbar destroyed");
        }
        tree.set_flag(self.region, NodeFlags::NATIVE_OVERFLOW, true);
    }

    /// Destroy any custom scrollbar and restore the region's presentation.
    pub(crate) fn teardown(&mut self, tree: &mut Tree) {
        if let ScrollMode::Custom(mut bar) = core::mem::replace(&mut self.mode, ScrollMode::Native) {
            bar.destroy();
        }
        tree.set_flag(self.region, NodeFlags::NATIVE_OVERFLOW, false);
    }
}
