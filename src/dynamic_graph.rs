//! Level-indexed fully dynamic graph connectivity (Holm-Lichtenberg-Thorup).
//!
//! Maintains a spanning forest at each of `level_count` levels, each forest held in its own
//! [`Ett`] instance, plus per-level per-vertex incidence lists of non-tree edges. `AddEdge` is
//! O(lg n) amortized; `RemoveEdge` is O(lg² n) amortized, since it may need to search for a
//! replacement edge across levels.

use std::collections::{BTreeMap, VecDeque};

use crate::euler_tour_tree::{EdgeRef, Ett, MarkUnion};
use crate::lists::{treap::Treaps, Idx, Lists};

/// The reference implementation's fixed RNG seed, used when no explicit seed is requested.
pub const DEFAULT_SEED: u64 = 228;

/// An edge identity, assigned in increasing order and never reused, even across removal.
pub type EdgeId = u64;

/// `new`/`add_edge`/`remove_edge`/`is_connected`/`component_count`/`num_vertices`, the public
/// surface every fully dynamic connectivity structure in this crate exposes.
pub trait DynamicConnectivity {
    /// A fresh graph on `num_vertices` isolated vertices.
    fn new(num_vertices: usize) -> Self;
    /// Adds an edge between `u` and `v` (self-loops and parallel edges are both allowed).
    /// Returns the id assigned to the new edge.
    fn add_edge(&mut self, u: usize, v: usize) -> EdgeId;
    /// Removes the oldest still-present edge between `u` and `v`. Returns whether one existed.
    fn remove_edge(&mut self, u: usize, v: usize) -> bool;
    /// Whether `u` and `v` are connected by a path of current edges.
    fn is_connected(&mut self, u: usize, v: usize) -> bool;
    /// Number of connected components over the current edges.
    fn component_count(&self) -> usize;
    /// Number of vertices (fixed at construction).
    fn num_vertices(&self) -> usize;
}

/// One of an edge's two occurrence-sets, valid across however many levels it currently spans.
struct TreeEdge {
    refs: Vec<EdgeRef>,
}

/// Fully dynamic graph connectivity structure, generic over the list backend used by its
/// Euler-tour forests (a bottom-up treap by default).
pub struct DynamicGraph<L: Lists<MarkUnion> = Treaps<MarkUnion>> {
    num_vertices: usize,
    level_count: usize,
    levels: Vec<Ett<L>>,
    components: usize,
    next_edge_id: EdgeId,

    endpoints: Vec<(usize, usize)>,
    /// -1 once the edge has been removed.
    edge_level: Vec<i32>,
    tree_edge: Vec<Option<TreeEdge>>,
    /// Per level, first occurrence node id -> edge id, for tree edges owning that level.
    tree_edge_at: Vec<BTreeMap<Idx, EdgeId>>,
    edge_visited: Vec<bool>,

    /// `(min, max) -> queue of edge ids`, oldest first, for `remove_edge`'s "oldest match" rule.
    all_edges: BTreeMap<(usize, usize), VecDeque<EdgeId>>,

    /// Doubly linked incidence lists of non-tree edges. A "slot" `2*e` is the occurrence of
    /// edge `e` stored in the list of its max-endpoint (pointing back at the min endpoint);
    /// `2*e + 1` is stored in the list of its min-endpoint. `-1` marks the end of a list, `-2`
    /// marks a slot not currently linked into any list.
    incidence_head: Vec<Vec<i64>>,
    incidence_next: Vec<i64>,
    incidence_prev: Vec<i64>,
}

impl<L: Lists<MarkUnion>> DynamicGraph<L> {
    /// Like [`DynamicConnectivity::new`], but seeds the underlying treaps explicitly so runs
    /// are reproducible.
    pub fn with_seed(num_vertices: usize, seed: u64) -> Self {
        assert!(num_vertices >= 1, "a graph needs at least one vertex");
        let level_count = (num_vertices.ilog2() as usize + 1).min(16);
        let levels = (0..level_count)
            .map(|l| Ett::with_seed(num_vertices, seed.wrapping_add(l as u64)))
            .collect();
        log::debug!("new graph: {num_vertices} vertices, {level_count} levels, seed {seed}");
        Self {
            num_vertices,
            level_count,
            levels,
            components: num_vertices,
            next_edge_id: 0,
            endpoints: Vec::new(),
            edge_level: Vec::new(),
            tree_edge: Vec::new(),
            tree_edge_at: vec![BTreeMap::new(); level_count],
            edge_visited: Vec::new(),
            all_edges: BTreeMap::new(),
            incidence_head: vec![vec![-1; num_vertices]; level_count],
            incidence_next: Vec::new(),
            incidence_prev: Vec::new(),
        }
    }

    fn insert_slot(&mut self, level: usize, vertex: usize, slot: i64) {
        let head = self.incidence_head[level][vertex];
        self.incidence_next[slot as usize] = head;
        self.incidence_prev[slot as usize] = -1;
        if head != -1 {
            self.incidence_prev[head as usize] = slot;
        } else {
            self.levels[level].change_vertex_mark(vertex, true);
        }
        self.incidence_head[level][vertex] = slot;
    }

    fn delete_slot(&mut self, level: usize, vertex: usize, slot: i64) {
        let prev = self.incidence_prev[slot as usize];
        let next = self.incidence_next[slot as usize];
        if prev != -1 {
            self.incidence_next[prev as usize] = next;
        } else {
            self.incidence_head[level][vertex] = next;
        }
        if next != -1 {
            self.incidence_prev[next as usize] = prev;
        }
        if self.incidence_head[level][vertex] == -1 {
            self.levels[level].change_vertex_mark(vertex, false);
        }
    }

    fn insert_nontree_edge(&mut self, e: EdgeId, level: usize) {
        let (a, b) = self.endpoints[e as usize];
        if a == b {
            return;
        }
        self.insert_slot(level, b, 2 * e as i64);
        self.insert_slot(level, a, 2 * e as i64 + 1);
    }

    fn delete_nontree_edge(&mut self, e: EdgeId, level: usize) {
        let (a, b) = self.endpoints[e as usize];
        if a == b {
            return;
        }
        self.delete_slot(level, b, 2 * e as i64);
        self.delete_slot(level, a, 2 * e as i64 + 1);
    }

    fn add_tree_edge(&mut self, e: EdgeId) {
        let (u, v) = self.endpoints[e as usize];
        let level = self.edge_level[e as usize] as usize;
        let mut refs = Vec::with_capacity(level + 1);
        for l in 0..=level {
            let r = self.levels[l].link(u, v);
            self.tree_edge_at[l].insert(r.0, e);
            if l == level {
                self.levels[l].change_edge_mark(r, true);
            }
            refs.push(r);
        }
        self.tree_edge[e as usize] = Some(TreeEdge { refs });
        log::trace!("edge {e} ({u}, {v}) becomes a tree edge up to level {level}");
    }

    /// Searches for a replacement for the tree edge that was just cut from levels `0..=level`
    /// at `level`, recursing to lower levels if none is found. Returns whether one was found.
    fn replace(&mut self, level: usize, u: usize, v: usize) -> bool {
        let tree_u = self.levels[level].tree_ref(u);
        let tree_v = self.levels[level].tree_ref(v);
        let small = if self.levels[level].tree_size(u) <= self.levels[level].tree_size(v) {
            tree_u
        } else {
            tree_v
        };

        let mut marked_vertices = Vec::new();
        self.levels[level].enum_marked_vertices(small, |x| {
            marked_vertices.push(x);
            true
        });

        let mut sampled = Vec::new();
        let mut replacement = None;
        'search: for x in marked_vertices {
            let mut slot = self.incidence_head[level][x];
            while slot != -1 {
                let next_slot = self.incidence_next[slot as usize];
                let e = (slot as usize / 2) as EdgeId;
                if !self.edge_visited[e as usize] {
                    self.edge_visited[e as usize] = true;
                    sampled.push(e);
                    let (a, b) = self.endpoints[e as usize];
                    if !self.levels[level].is_connected(a, b) {
                        replacement = Some(e);
                        break 'search;
                    }
                }
                slot = next_slot;
            }
        }
        for &e in &sampled {
            self.edge_visited[e as usize] = false;
        }

        if let Some(e) = replacement {
            log::debug!("replace: edge {e} reconnects level {level} after a cut");
            self.delete_nontree_edge(e, level);
            self.edge_level[e as usize] = level as i32;
            self.add_tree_edge(e);
            return true;
        }

        if level + 1 < self.level_count {
            for &e in &sampled {
                self.delete_nontree_edge(e, level);
                self.edge_level[e as usize] += 1;
                self.insert_nontree_edge(e, level + 1);
            }
            let mut promote = Vec::new();
            self.levels[level].enum_marked_edges(small, |edge_ref| {
                promote.push(edge_ref);
                true
            });
            for edge_ref in promote {
                let e = self.tree_edge_at[level]
                    .remove(&edge_ref.0)
                    .expect("every edge-marked node is tracked as a tree edge");
                self.levels[level].change_edge_mark(edge_ref, false);
                self.edge_level[e as usize] += 1;
                let (a, b) = self.endpoints[e as usize];
                let new_ref = self.levels[level + 1].link(a, b);
                self.levels[level + 1].change_edge_mark(new_ref, true);
                self.tree_edge_at[level + 1].insert(new_ref.0, e);
                self.tree_edge[e as usize]
                    .as_mut()
                    .expect("edge just promoted was a tree edge")
                    .refs
                    .push(new_ref);
            }
        }

        if level > 0 {
            self.replace(level - 1, u, v)
        } else {
            false
        }
    }
}

impl<L: Lists<MarkUnion>> DynamicConnectivity for DynamicGraph<L> {
    fn new(num_vertices: usize) -> Self {
        Self::with_seed(num_vertices, DEFAULT_SEED)
    }

    fn add_edge(&mut self, u: usize, v: usize) -> EdgeId {
        assert!(
            u < self.num_vertices && v < self.num_vertices,
            "vertex out of range for graph of size {}",
            self.num_vertices
        );
        let e = self.next_edge_id;
        self.next_edge_id += 1;
        let key = (u.min(v), u.max(v));
        self.endpoints.push(key);
        self.edge_level.push(0);
        self.tree_edge.push(None);
        self.edge_visited.push(false);
        self.incidence_next.push(-2);
        self.incidence_next.push(-2);
        self.incidence_prev.push(-2);
        self.incidence_prev.push(-2);
        self.all_edges.entry(key).or_default().push_back(e);

        if self.levels[0].is_connected(u, v) {
            if u != v {
                self.insert_nontree_edge(e, 0);
            }
        } else {
            self.add_tree_edge(e);
            self.components -= 1;
        }
        log::debug!("add_edge({u}, {v}) -> {e}");
        e
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let key = (u.min(v), u.max(v));
        let Some(e) = self
            .all_edges
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
        else {
            return false;
        };
        if self.all_edges[&key].is_empty() {
            self.all_edges.remove(&key);
        }

        let level = self.edge_level[e as usize] as usize;
        if let Some(tree_edge) = self.tree_edge[e as usize].take() {
            for (l, edge_ref) in tree_edge.refs.iter().enumerate() {
                self.tree_edge_at[l].remove(&edge_ref.0);
                self.levels[l].cut(*edge_ref);
            }
            self.edge_level[e as usize] = -1;
            log::debug!("remove_edge({u}, {v}) cuts tree edge {e} at level {level}");
            if !self.replace(level, u, v) {
                self.components += 1;
            }
        } else {
            self.delete_nontree_edge(e, level);
            self.edge_level[e as usize] = -1;
            log::trace!("remove_edge({u}, {v}) drops non-tree edge {e}");
        }
        true
    }

    fn is_connected(&mut self, u: usize, v: usize) -> bool {
        assert!(u < self.num_vertices && v < self.num_vertices);
        self.levels[0].is_connected(u, v)
    }

    fn component_count(&self) -> usize {
        self.components
    }

    fn num_vertices(&self) -> usize {
        self.num_vertices
    }
}

