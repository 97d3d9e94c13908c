//! Euler Tour Tree with two independent subtree-mark aggregates.
//!
//! Represents an unrooted forest: each vertex owns a permanent node (created once, at
//! construction, indices `0..num_vertices`); each tree edge owns two further nodes, created
//! when the edge is linked and discarded when it is cut. The in-order sequence of a tree's
//! nodes is an Euler tour of that tree, so `tree_size(v) == (len(v) + 2) / 3` (`k` vertex
//! nodes plus `2(k-1)` edge-occurrence nodes for a `k`-vertex tree).
//!
//! Every node carries an edge mark and a vertex mark plus a subtree-union aggregate of each,
//! so [`Ett::enum_marked_edges`] and [`Ett::enum_marked_vertices`] can skip whole subtrees
//! that contain no marked node.

use std::fmt::Debug;

use crate::lists::{treap::Treaps, AggregatedData, Idx, Lists};

/// Data stored on a single Euler-tour-tree node (either a vertex or one occurrence of a tree
/// edge). Only one of the two marks is ever set on a given node: vertex marks live on vertex
/// nodes (index `< num_vertices`), edge marks live on the "first" occurrence of a tree edge.
#[derive(Debug, Clone, Default)]
pub struct SlotData {
    pub edge_mark: bool,
    pub vertex_mark: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkUnion {
    pub edge_union: bool,
    pub vertex_union: bool,
}

impl AggregatedData for MarkUnion {
    type Data = SlotData;
    fn from(data: &Self::Data) -> Self {
        Self {
            edge_union: data.edge_mark,
            vertex_union: data.vertex_mark,
        }
    }
    fn merge(self, right: Self) -> Self {
        Self {
            edge_union: self.edge_union || right.edge_union,
            vertex_union: self.vertex_union || right.vertex_union,
        }
    }
}

/// A tree edge's two occurrences: `.0` is the "first" occurrence (the one edge marks attach
/// to), `.0 + 1` is the "second".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef(pub Idx);

/// An Euler tour tree over a fixed vertex set, backed by list implementation `L` (a bottom-up
/// treap by default).
pub struct Ett<L: Lists<MarkUnion> = Treaps<MarkUnion>> {
    l: L,
    num_vertices: usize,
}

impl<L: Lists<MarkUnion>> Debug for Ett<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ett({:?})", self.l)
    }
}

impl<L: Lists<MarkUnion>> Ett<L> {
    /// A forest on `num_vertices` isolated vertices, no tree edges.
    pub fn new(num_vertices: usize) -> Self {
        Self::with_seed(num_vertices, 228)
    }

    /// Like [`Ett::new`], but seeds the backing list's randomness explicitly.
    pub fn with_seed(num_vertices: usize, seed: u64) -> Self {
        let mut l = L::new_seeded(num_vertices + 2 * num_vertices.saturating_sub(1), seed);
        for v in 0..num_vertices {
            let idx = l.create(SlotData::default());
            debug_assert_eq!(idx, v);
        }
        Self { l, num_vertices }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Any node id in the tree containing `v`; reusable as a `tree` argument elsewhere.
    pub fn tree_ref(&mut self, v: usize) -> Idx {
        self.l.root(v)
    }

    pub fn is_connected(&mut self, u: usize, v: usize) -> bool {
        self.l.on_same_list(u, v)
    }

    /// Number of vertices in the tree containing `v`.
    pub fn tree_size(&mut self, v: usize) -> usize {
        (self.l.len(v) + 2) / 3
    }

    fn reroot(&mut self, u: usize) {
        if !self.l.is_first(u) {
            let (before_u, u_and_after, _) = self.l.split(u, self.l.order(u)..);
            self.l.concat(u_and_after, before_u);
        }
    }

    /// Links `u` and `w`, which must not already be connected, as a new tree edge. Returns the
    /// reference to the two occurrence nodes created for it.
    pub fn link(&mut self, u: usize, w: usize) -> EdgeRef {
        debug_assert!(!self.is_connected(u, w));
        self.reroot(w);
        let uw = self.l.create(SlotData::default());
        let wu = self.l.create(SlotData::default());
        let (_, until_u, after_u) = self.l.split(u, 0..=self.l.order(u));
        self.l.concat_all([until_u, uw, w, wu, after_u]);
        EdgeRef(uw)
    }

    /// Cuts the tree edge at `edge`, splitting its tree in two. Returns a node reference into
    /// each resulting tree: `(rest, cutoff)`. `rest` contains whichever side the occurrence at
    /// `edge.0` used to precede in the tour, `cutoff` the side between the two occurrences.
    pub fn cut(&mut self, edge: EdgeRef) -> (Idx, Idx) {
        let (e1, e2) = (edge.0, edge.0 + 1);
        debug_assert!(self.l.on_same_list(e1, e2));
        let (a, b) = (self.l.order(e1), self.l.order(e2));
        let (left, middle, right) = self.l.split(e1, a.min(b)..=a.max(b));
        let (_, middle, _) = self.l.split(middle, 1..self.l.len(middle) - 1);
        let rest = self.l.concat(left, right);
        (self.l.first(rest), self.l.first(middle))
    }

    pub fn change_edge_mark(&mut self, edge: EdgeRef, mark: bool) {
        self.l.mutate_data(edge.0, |d| d.edge_mark = mark);
    }

    pub fn change_vertex_mark(&mut self, v: usize, mark: bool) {
        self.l.mutate_data(v, |d| d.vertex_mark = mark);
    }

    pub fn vertex_mark(&mut self, v: usize) -> bool {
        self.l.data(v).vertex_mark
    }

    /// Visits, in tour order, every tree edge in the tree containing `tree` whose first
    /// occurrence is marked. Stops early if `visit` returns false.
    pub fn enum_marked_edges(&mut self, tree: Idx, mut visit: impl FnMut(EdgeRef) -> bool) -> bool {
        self.l.enumerate(
            tree,
            |ag: &MarkUnion| ag.edge_union,
            |l, idx| {
                if l.data(idx).edge_mark {
                    visit(EdgeRef(idx))
                } else {
                    true
                }
            },
        )
    }

    /// Visits, in tour order, every marked vertex in the tree containing `tree`. Stops early
    /// if `visit` returns false.
    pub fn enum_marked_vertices(&mut self, tree: Idx, mut visit: impl FnMut(usize) -> bool) -> bool {
        self.l.enumerate(
            tree,
            |ag: &MarkUnion| ag.vertex_union,
            |l, idx| {
                if l.data(idx).vertex_mark {
                    visit(idx)
                } else {
                    true
                }
            },
        )
    }
}
