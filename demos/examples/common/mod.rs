// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the menu demos.

use understory_outline::{LocalNode, NodeId, NodeKind, Tree};

/// An HR dashboard sidebar.
#[allow(dead_code, reason = "each demo uses a different subset")]
pub struct Sidebar {
    pub tree: Tree,
    pub container: NodeId,
    pub leave: NodeId,
    pub leave_toggle: NodeId,
    pub requests: NodeId,
    pub approvals: NodeId,
    pub approvals_pending: NodeId,
    pub attendance: NodeId,
    pub attendance_toggle: NodeId,
    pub users: NodeId,
}

/// Build:
///
/// ```text
/// Leave ─┬─ Requests
///        └─ Approvals ─┬─ Pending
///                      └─ History
/// Attendance ─┬─ Clock-ins
///             └─ Overtime
/// Users
/// ```
pub fn sidebar() -> Sidebar {
    let mut tree = Tree::new();
    let container = tree.insert(None, LocalNode::new(NodeKind::Menu));
    let inner = tree.insert(Some(container), LocalNode::new(NodeKind::Inner));

    let (leave, leave_toggle, leave_sub) = section(&mut tree, inner, 96.0);
    let requests = page(&mut tree, leave_sub);
    let (approvals, _, approvals_sub) = section(&mut tree, leave_sub, 64.0);
    let approvals_pending = page(&mut tree, approvals_sub);
    page(&mut tree, approvals_sub);

    let (attendance, attendance_toggle, attendance_sub) = section(&mut tree, inner, 64.0);
    page(&mut tree, attendance_sub);
    page(&mut tree, attendance_sub);

    let users = page(&mut tree, inner);

    Sidebar {
        tree,
        container,
        leave,
        leave_toggle,
        requests,
        approvals,
        approvals_pending,
        attendance,
        attendance_toggle,
        users,
    }
}

fn section(tree: &mut Tree, parent: NodeId, sub_height: f64) -> (NodeId, NodeId, NodeId) {
    let item = tree.insert(Some(parent), LocalNode::new(NodeKind::Item));
    let toggle = tree.insert(Some(item), LocalNode::new(NodeKind::Toggle).with_height(32.4));
    let sub = tree.insert(
        Some(item),
        LocalNode::new(NodeKind::Submenu).with_height(sub_height),
    );
    (item, toggle, sub)
}

fn page(tree: &mut Tree, parent: NodeId) -> NodeId {
    let item = tree.insert(Some(parent), LocalNode::new(NodeKind::Item));
    tree.insert(Some(item), LocalNode::new(NodeKind::Link).with_height(32.0));
    item
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("understory_menu=debug")),
        )
        .init();
}
