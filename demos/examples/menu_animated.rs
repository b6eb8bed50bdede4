// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated transitions on a virtual clock.
//!
//! Prints the height override a renderer would apply at each step, then shows
//! that tearing the menu down mid-transition cancels everything.
//!
//! Run:
//! - `cargo run -p understory_demos --example menu_animated`

mod common;

use std::time::Duration;

use kurbo::Size;
use understory_menu::scheduler::ManualScheduler;
use understory_menu::{COMMIT_DELAY, Menu, MenuConfig};
use understory_outline::{NodeFlags, NodeId};

fn show(menu: &Menu<ManualScheduler>, label: &str, item: NodeId) {
    let flags = menu.tree().flags(item).unwrap_or_default();
    let height = menu.tree().overrides(item).and_then(|o| o.height);
    println!(
        "  t={:>4}ms {label:<18} open={} animating={} height={height:?}",
        menu.scheduler().now().as_millis(),
        flags.contains(NodeFlags::OPEN),
        flags.contains(NodeFlags::ANIMATING),
    );
}

fn main() {
    common::init_tracing();
    let s = common::sidebar();
    let config = MenuConfig::default().with_transition(Duration::from_millis(200));
    let mut menu = Menu::new(s.tree, s.container, config, ManualScheduler::new())
        .expect("sidebar has an inner region");

    println!("== Open 'Leave' ==");
    menu.toggle(s.leave_toggle).unwrap();
    show(&menu, "requested", s.leave);
    menu.run_frame().unwrap();
    show(&menu, "frame", s.leave);
    menu.advance(COMMIT_DELAY).unwrap();
    show(&menu, "committed", s.leave);
    // The renderer reports the end of its height transition.
    menu.transition_end(s.leave).unwrap();
    show(&menu, "transition end", s.leave);
    assert!(!menu.is_animating(s.leave));

    println!("== Close 'Leave' (no end signal) ==");
    menu.toggle(s.leave_toggle).unwrap();
    menu.run_frame().unwrap();
    show(&menu, "frame", s.leave);
    menu.advance(Duration::from_millis(200)).unwrap();
    show(&menu, "duration elapsed", s.leave);
    menu.advance(Duration::from_millis(50)).unwrap();
    show(&menu, "fallback", s.leave);
    assert!(!menu.tree().has_flags(s.leave, NodeFlags::OPEN));

    println!("== Destroy mid-transition ==");
    // The renderer re-measured the header after a font change.
    menu.set_extent(s.attendance_toggle, Size::new(240.0, 40.0));
    menu.open(s.attendance).unwrap();
    menu.run_frame().unwrap();
    show(&menu, "frame", s.attendance);
    let (tree, scheduler) = menu.destroy();
    println!("  pending tickets after destroy: {}", scheduler.pending());
    assert_eq!(scheduler.pending(), 0);
    assert!(!tree.has_flags(s.attendance, NodeFlags::OPEN));
}
