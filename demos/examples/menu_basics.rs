// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open, close, and query a static (non-animated) sidebar.
//!
//! Run:
//! - `cargo run -p understory_demos --example menu_basics`
//! - `RUST_LOG=understory_menu=trace cargo run -p understory_demos --example menu_basics`

mod common;

use understory_menu::scheduler::ManualScheduler;
use understory_menu::{Menu, MenuConfig, query};

fn main() {
    common::init_tracing();
    let s = common::sidebar();

    let config = MenuConfig::default().with_animate(false);
    let mut menu = Menu::new(s.tree, s.container, config, ManualScheduler::new())
        .expect("sidebar has an inner region");

    // Revealing a nested page opens every section above it.
    menu.open(s.approvals_pending).expect("pending approvals is a menu item");
    println!("== Open 'Pending approvals' ==");
    println!("  Leave opened:     {}", query::is_opened(menu.tree(), s.leave).unwrap());
    println!("  Approvals opened: {}", query::is_opened(menu.tree(), s.approvals).unwrap());
    assert!(query::is_opened(menu.tree(), s.leave).unwrap());
    assert!(query::is_opened(menu.tree(), s.approvals).unwrap());

    // Pages are leaves and never open.
    assert!(!query::is_opened(menu.tree(), s.approvals_pending).unwrap());

    // Disabled sections are inert.
    menu.set_disabled(s.attendance, true).unwrap();
    menu.toggle(s.attendance_toggle).unwrap();
    println!("== Toggle disabled 'Attendance' ==");
    println!("  Attendance opened: {}", query::is_opened(menu.tree(), s.attendance).unwrap());
    assert!(!query::is_opened(menu.tree(), s.attendance).unwrap());

    // Plain pages have no toggle.
    println!("== Toggle 'Users' ==\n  {:?}", menu.toggle(s.users));
    assert!(menu.toggle(s.users).is_err());

    menu.set_active(s.requests, true).unwrap();
    menu.close_all_with(true).unwrap();
    println!("== Close all ==");
    println!("  Leave opened:     {}", query::is_opened(menu.tree(), s.leave).unwrap());
    println!("  Approvals opened: {}", query::is_opened(menu.tree(), s.approvals).unwrap());
    println!("  Requests active:  {}", query::is_active(menu.tree(), s.requests).unwrap());
    assert!(!query::is_opened(menu.tree(), s.approvals).unwrap());

    let _ = menu.destroy();
}
