use std::collections::{BTreeSet, VecDeque};

use dynamic_connectivity::DynamicConnectivity;

/// Deliberately naive reference graph: a plain adjacency multiset plus a BFS for every
/// connectivity query. Used to check the real [DynamicGraph](dynamic_connectivity::dynamic_graph::DynamicGraph)
/// against, never for anything performance sensitive.
pub struct BruteForceGraph {
    num_vertices: usize,
    adjacency: Vec<Vec<usize>>,
    next_edge_id: u64,
}

impl BruteForceGraph {
    fn component_id(&self, start: usize) -> Vec<bool> {
        let mut seen = vec![false; self.num_vertices];
        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u] {
                if !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        seen
    }
}

impl DynamicConnectivity for BruteForceGraph {
    fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            adjacency: vec![Vec::new(); num_vertices],
            next_edge_id: 0,
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) -> u64 {
        self.adjacency[u].push(v);
        if u != v {
            self.adjacency[v].push(u);
        }
        let e = self.next_edge_id;
        self.next_edge_id += 1;
        e
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let Some(pos) = self.adjacency[u].iter().position(|&x| x == v) else {
            return false;
        };
        self.adjacency[u].remove(pos);
        if u != v {
            let pos = self.adjacency[v]
                .iter()
                .position(|&x| x == u)
                .expect("undirected adjacency must be symmetric");
            self.adjacency[v].remove(pos);
        }
        true
    }

    fn is_connected(&mut self, u: usize, v: usize) -> bool {
        self.component_id(u)[v]
    }

    fn component_count(&self) -> usize {
        let mut seen = vec![false; self.num_vertices];
        let mut count = 0;
        for start in 0..self.num_vertices {
            if seen[start] {
                continue;
            }
            count += 1;
            let reachable = self.component_id(start);
            for (v, &r) in reachable.iter().enumerate() {
                seen[v] = seen[v] || r;
            }
        }
        count
    }

    fn num_vertices(&self) -> usize {
        self.num_vertices
    }
}

/// All current edges as a sorted multiset of `(min, max)` pairs, for sanity checks that don't
/// need full BFS (e.g. round-trip tests).
#[allow(dead_code)]
pub fn edge_multiset(g: &BruteForceGraph) -> BTreeSet<(usize, usize)> {
    let mut set = BTreeSet::new();
    for (u, neighbors) in g.adjacency.iter().enumerate() {
        for &v in neighbors {
            set.insert((u.min(v), u.max(v)));
        }
    }
    set
}
