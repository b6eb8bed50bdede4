// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation scheduling: frames and timers as tickets.
//!
//! ## Overview
//!
//! The menu never waits on anything itself. It asks a [`Scheduler`] for a
//! rendering frame or a timeout and gets back a [`Ticket`]; when the ticket fires,
//! the host hands it to [`Menu::wake`](crate::Menu::wake). Tickets that are
//! cancelled must never be delivered.
//!
//! [`ManualScheduler`] is a deterministic virtual clock for tests, demos, and
//! headless hosts. `Menu<ManualScheduler>` drives it directly with
//! [`Menu::run_frame`](crate::Menu::run_frame) and [`Menu::advance`](crate::Menu::advance).
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_menu::scheduler::{ManualScheduler, Scheduler};
//!
//! let mut s = ManualScheduler::new();
//! let frame = s.request_frame();
//! let late = s.set_timeout(Duration::from_millis(50));
//! let early = s.set_timeout(Duration::from_millis(10));
//! s.cancel(late);
//!
//! assert_eq!(s.take_frames(), vec![frame]);
//! let until = s.now() + Duration::from_millis(100);
//! assert_eq!(s.pop_due(until), Some(early));
//! assert_eq!(s.pop_due(until), None);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

/// Handle of a scheduled frame or timer callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Ticket(u64);

impl Ticket {
    /// Wrap a scheduler-chosen value. Values must be unique per scheduler.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Source of rendering frames and timers.
pub trait Scheduler {
    /// Request a callback on the next rendering frame.
    fn request_frame(&mut self) -> Ticket;
    /// Request a callback after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> Ticket;
    /// Forget a ticket; it must not be delivered afterwards. Unknown tickets are ignored.
    fn cancel(&mut self, ticket: Ticket);
}

/// Deterministic scheduler over a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next: u64,
    frames: Vec<Ticket>,
    // (deadline, ticket); ties fire in request order.
    timers: Vec<(Duration, Ticket)>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of frame and timer tickets not yet delivered.
    pub fn pending(&self) -> usize {
        self.frames.len() + self.timers.len()
    }

    /// Take every requested frame ticket, in request order.
    pub fn take_frames(&mut self) -> Vec<Ticket> {
        core::mem::take(&mut self.frames)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Ticket> {
        let (i, &(deadline, ticket)) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (d, _))| *d <= until)
            .min_by_key(|(_, (d, t))| (*d, *t))?;
        self.timers.remove(i);
        self.now = self.now.max(deadline);
        Some(ticket)
    }

    /// Move the clock forward to `to` without delivering anything.
    pub fn set_now(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    fn issue(&mut self) -> Ticket {
        self.next += 1;
        Ticket(self.next)
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Ticket {
        let t = self.issue();
        self.frames.push(t);
        t
    }

    fn set_timeout(&mut self, delay: Duration) -> Ticket {
        let t = self.issue();
        self.timers.push((self.now + delay, t));
        t
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.frames.retain(|t| *t != ticket);
        self.timers.retain(|(_, t)| *t != ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn timers_fire_in_deadline_then_request_order() {
        let mut s = ManualScheduler::new();
        let a = s.set_timeout(Duration::from_millis(20));
        let b = s.set_timeout(Duration::from_millis(10));
        let c = s.set_timeout(Duration::from_millis(10));
        let until = Duration::from_millis(20);
        assert_eq!(s.pop_due(until), Some(b));
        assert_eq!(s.now(), Duration::from_millis(10));
        assert_eq!(s.pop_due(until), Some(c));
        assert_eq!(s.pop_due(until), Some(a));
        assert_eq!(s.pop_due(until), None);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn timers_are_relative_to_now() {
        let mut s = ManualScheduler::new();
        s.set_now(Duration::from_millis(100));
        let t = s.set_timeout(Duration::from_millis(50));
        assert_eq!(s.pop_due(Duration::from_millis(149)), None);
        assert_eq!(s.pop_due(Duration::from_millis(150)), Some(t));
    }

    #[test]
    fn cancelled_tickets_are_never_delivered() {
        let mut s = ManualScheduler::new();
        let f = s.request_frame();
        let t = s.set_timeout(Duration::ZERO);
        s.cancel(f);
        s.cancel(t);
        // Unknown tickets are ignored.
        s.cancel(Ticket::new(999));
        assert!(s.take_frames().is_empty());
        assert_eq!(s.pop_due(Duration::MAX), None);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut s = ManualScheduler::new();
        s.set_now(Duration::from_millis(10));
        s.set_now(Duration::from_millis(5));
        assert_eq!(s.now(), Duration::from_millis(10));
        let f = s.request_frame();
        assert_eq!(s.take_frames(), vec![f]);
    }
}
