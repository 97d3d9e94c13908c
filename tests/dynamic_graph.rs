mod common;

use common::{assert_same_connectivity, init_logger, BruteForceGraph};
use dynamic_connectivity::{DynamicConnectivity, FastDynamicGraph};
use rand::{Rng, SeedableRng};

#[test]
fn scenario_diamond_then_remove_two() {
    init_logger();
    let mut g = FastDynamicGraph::new(4);
    let mut components = vec![];
    let mut connected_0_2 = vec![];
    for (u, v) in [(0, 1), (1, 2), (2, 3), (0, 3)] {
        g.add_edge(u, v);
        components.push(g.component_count());
        connected_0_2.push(g.is_connected(0, 2));
    }
    g.remove_edge(0, 1);
    components.push(g.component_count());
    connected_0_2.push(g.is_connected(0, 2));
    g.remove_edge(2, 3);
    components.push(g.component_count());
    connected_0_2.push(g.is_connected(0, 2));

    // A 4-cycle has exactly one redundant edge; cutting two distinct cycle edges always
    // leaves exactly two components, whichever edge happened to be recorded as non-tree.
    assert_eq!(components, [3, 2, 1, 1, 1, 2]);
    assert_eq!(connected_0_2, [false, true, true, true, true, false]);
}

#[test]
fn scenario_parallel_edges() {
    init_logger();
    let mut g = FastDynamicGraph::new(2);
    g.add_edge(0, 1);
    g.add_edge(0, 1);
    g.add_edge(0, 1);
    assert_eq!(g.component_count(), 1);
    g.remove_edge(0, 1);
    assert_eq!(g.component_count(), 1);
    g.remove_edge(0, 1);
    assert_eq!(g.component_count(), 1);
    g.remove_edge(0, 1);
    assert_eq!(g.component_count(), 2);
}

#[test]
fn scenario_cycle_then_two_cuts() {
    init_logger();
    let mut g = FastDynamicGraph::new(6);
    let mut components = vec![];
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)] {
        g.add_edge(u, v);
        components.push(g.component_count());
    }
    assert_eq!(components, [5, 4, 3, 2, 1, 1]);

    g.remove_edge(5, 0);
    assert_eq!(g.component_count(), 1);
    g.remove_edge(2, 3);
    assert_eq!(g.component_count(), 2);
}

#[test]
fn scenario_bridge_removal_splits() {
    init_logger();
    let mut g = FastDynamicGraph::new(5);
    let mut components = vec![];
    for (u, v) in [(0, 1), (2, 3), (1, 2), (3, 4)] {
        g.add_edge(u, v);
        components.push(g.component_count());
    }
    g.remove_edge(1, 2);
    components.push(g.component_count());
    assert_eq!(components, [4, 3, 2, 1, 2]);
    assert!(!g.is_connected(0, 4));
}

#[test]
fn scenario_complete_binary_tree_root_cut() {
    init_logger();
    let mut g = FastDynamicGraph::new(8);
    // complete binary tree rooted at 0, vertices 1..=6, plus a leaf 7 hung off vertex 3.
    let edges = [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)];
    let mut components = vec![];
    for (u, v) in edges {
        g.add_edge(u, v);
        components.push(g.component_count());
    }
    g.add_edge(3, 7);
    components.push(g.component_count());
    assert_eq!(components, [7, 6, 5, 4, 3, 2, 1]);

    g.remove_edge(0, 1);
    assert_eq!(g.component_count(), 2);
}

#[test]
fn scenario_self_loop_is_inert() {
    init_logger();
    let mut g = FastDynamicGraph::new(3);
    let mut components = vec![g.component_count()];
    g.add_edge(0, 0);
    components.push(g.component_count());
    g.add_edge(0, 1);
    components.push(g.component_count());
    g.remove_edge(0, 0);
    components.push(g.component_count());
    assert_eq!(components, [3, 3, 2, 2]);
}

#[test]
fn boundary_single_vertex() {
    let mut g = FastDynamicGraph::new(1);
    assert_eq!(g.component_count(), 1);
    assert!(g.is_connected(0, 0));
}

#[test]
fn boundary_self_loop_removable() {
    let mut g = FastDynamicGraph::new(3);
    g.add_edge(1, 1);
    assert_eq!(g.component_count(), 3);
    assert!(g.remove_edge(1, 1));
    assert_eq!(g.component_count(), 3);
}

#[test]
fn round_trip_add_remove_restores_state() {
    let mut g = FastDynamicGraph::new(6);
    g.add_edge(0, 1);
    g.add_edge(2, 3);
    let before_connected = g.is_connected(0, 1);
    let before_components = g.component_count();

    g.add_edge(0, 2);
    g.remove_edge(0, 2);

    assert_eq!(g.is_connected(0, 1), before_connected);
    assert_eq!(g.component_count(), before_components);
}

#[test]
fn stress_against_brute_force() {
    init_logger();
    let mut rng = rand::rngs::StdRng::seed_from_u64(4815162342);
    for trial in 0..20 {
        let n = rng.gen_range(1..12);
        let mut g = FastDynamicGraph::with_seed(n, trial);
        let mut oracle = BruteForceGraph::new(n);
        let mut present: Vec<(usize, usize)> = Vec::new();

        for _ in 0..400 {
            if present.is_empty() || rng.gen_bool(0.6) {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                g.add_edge(u, v);
                oracle.add_edge(u, v);
                present.push((u, v));
            } else {
                let idx = rng.gen_range(0..present.len());
                let (u, v) = present.swap_remove(idx);
                assert!(g.remove_edge(u, v));
                assert!(oracle.remove_edge(u, v));
            }
            assert_same_connectivity(&mut g, &mut oracle);
        }
    }
}

#[test]
#[ignore]
fn stress_indefinitely() {
    init_logger();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);
    loop {
        let n = rng.gen_range(1..20);
        let mut g = FastDynamicGraph::with_seed(n, rng.gen());
        let mut oracle = BruteForceGraph::new(n);
        let mut present: Vec<(usize, usize)> = Vec::new();
        for _ in 0..5000 {
            if present.is_empty() || rng.gen_bool(0.55) {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                g.add_edge(u, v);
                oracle.add_edge(u, v);
                present.push((u, v));
            } else {
                let idx = rng.gen_range(0..present.len());
                let (u, v) = present.swap_remove(idx);
                assert!(g.remove_edge(u, v));
                assert!(oracle.remove_edge(u, v));
            }
            assert_same_connectivity(&mut g, &mut oracle);
        }
    }
}
