// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_menu::scheduler::ManualScheduler;
use understory_menu::{Menu, MenuConfig};
use understory_outline::{LocalNode, NodeId, NodeKind, Query, Tree};

struct Outline {
    tree: Tree,
    container: NodeId,
    // Deepest item of each top-level section, in order.
    deepest: Vec<NodeId>,
}

/// `sections` top-level sections, each a chain `depth` items deep with `fanout`
/// leaf pages per level.
fn gen_outline(sections: usize, depth: usize, fanout: usize) -> Outline {
    let mut tree = Tree::new();
    let container = tree.insert(None, LocalNode::new(NodeKind::Menu));
    let inner = tree.insert(Some(container), LocalNode::new(NodeKind::Inner));
    let mut deepest = Vec::with_capacity(sections);
    for _ in 0..sections {
        let mut parent = inner;
        let mut last = None;
        for _ in 0..depth {
            let item = tree.insert(Some(parent), LocalNode::new(NodeKind::Item));
            tree.insert(Some(item), LocalNode::new(NodeKind::Toggle).with_height(32.0));
            let sub = tree.insert(
                Some(item),
                LocalNode::new(NodeKind::Submenu).with_height(32.0 * fanout as f64),
            );
            for _ in 0..fanout {
                let page = tree.insert(Some(sub), LocalNode::new(NodeKind::Item));
                tree.insert(Some(page), LocalNode::new(NodeKind::Link).with_height(32.0));
            }
            last = Some(item);
            parent = sub;
        }
        deepest.extend(last);
    }
    Outline {
        tree,
        container,
        deepest,
    }
}

fn menu(outline: Outline, config: MenuConfig) -> (Menu<ManualScheduler>, Vec<NodeId>) {
    let menu = Menu::new(
        outline.tree,
        outline.container,
        config,
        ManualScheduler::new(),
    )
    .unwrap();
    (menu, outline.deepest)
}

fn bench_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_reveal_deep");
    for &depth in &[4_usize, 16, 64] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("depth={depth}"), |b| {
            b.iter_batched(
                || menu(gen_outline(8, depth, 4), MenuConfig::default().with_animate(false)),
                |(mut menu, deepest)| {
                    for &target in &deepest {
                        menu.open(black_box(target)).unwrap();
                    }
                    black_box(menu);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_animated_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_animated_cycle");
    for &sections in &[8_usize, 64] {
        group.throughput(Throughput::Elements(sections as u64));
        group.bench_function(format!("sections={sections}"), |b| {
            b.iter_batched(
                || menu(gen_outline(sections, 2, 4), MenuConfig::default()),
                |(mut menu, deepest)| {
                    // Accordion: each reveal auto-closes the previous section.
                    for &target in &deepest {
                        menu.open(target).unwrap();
                        menu.run_until_idle().unwrap();
                    }
                    black_box(menu.destroy());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_query_open(c: &mut Criterion) {
    let outline = gen_outline(32, 8, 8);
    let (mut menu, deepest) = menu(outline, MenuConfig::default().with_animate(false).with_accordion(false));
    for &target in &deepest {
        menu.open(target).unwrap();
    }
    let inner = menu.inner();
    c.bench_function("descendants_matching_open_items", |b| {
        b.iter(|| {
            black_box(
                menu.tree()
                    .descendants_matching(black_box(inner), Query::open_items())
                    .len(),
            )
        });
    });
}

criterion_group!(benches, bench_reveal, bench_animated_cycle, bench_query_open);
criterion_main!(benches);
