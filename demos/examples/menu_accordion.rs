// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion exclusivity and gate hooks.
//!
//! Opening one section closes the other; the close is reported as an auto-close.
//! A gate hook keeps the "Users" area locked.
//!
//! Run:
//! - `cargo run -p understory_demos --example menu_accordion`

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use understory_menu::scheduler::ManualScheduler;
use understory_menu::{Menu, MenuConfig, Verdict, query};

fn main() {
    common::init_tracing();
    let s = common::sidebar();
    let log: Rc<RefCell<Vec<String>>> = Rc::default();

    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    let locked = s.attendance;
    let config = MenuConfig::default()
        .with_animate(false)
        .on_open(move |_, cx| {
            if cx.item == locked {
                l1.borrow_mut().push(format!("open {:?} refused", cx.item));
                return Verdict::Cancel;
            }
            Verdict::Proceed
        })
        .on_opened(move |_, cx| l2.borrow_mut().push(format!("opened {:?}", cx.item)))
        .on_close(move |_, cx| {
            l3.borrow_mut()
                .push(format!("close {:?} (auto: {})", cx.item, cx.auto_close));
            Verdict::Proceed
        });
    let mut menu = Menu::new(s.tree, s.container, config, ManualScheduler::new())
        .expect("sidebar has an inner region");

    menu.open(s.leave).unwrap();
    menu.open(s.attendance).unwrap();
    assert!(query::is_opened(menu.tree(), s.leave).unwrap());
    assert!(!query::is_opened(menu.tree(), s.attendance).unwrap());

    let mut menu = {
        // Rebuild without the lock to show the accordion.
        let (tree, scheduler) = menu.destroy();
        let config = MenuConfig::default().with_animate(false).on_close({
            let log = log.clone();
            move |_, cx| {
                log.borrow_mut()
                    .push(format!("close {:?} (auto: {})", cx.item, cx.auto_close));
                Verdict::Proceed
            }
        });
        Menu::new(tree, s.container, config, scheduler).expect("sidebar has an inner region")
    };
    menu.open(s.leave).unwrap();
    menu.open(s.attendance).unwrap();
    assert!(!query::is_opened(menu.tree(), s.leave).unwrap());
    assert!(query::is_opened(menu.tree(), s.attendance).unwrap());

    println!("== Hook log ==");
    for line in log.borrow().iter() {
        println!("  {line}");
    }
}
