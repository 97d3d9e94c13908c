//! A bottom-up randomized treap: a balanced binary search tree over list position where
//! balance comes from weighting random choices by subtree size rather than from stored
//! priorities. Every node is equally entitled to end up near the root; `merge` walks down
//! picking a side with probability proportional to the size on that side, which keeps the
//! expected depth logarithmic without ever storing or comparing a priority field.

use std::fmt::{Debug, Display, Formatter};

use debug_tree::{add_branch_to, add_leaf_to, AsTree, TreeBuilder};
use derivative::Derivative;
use rand::{rngs, Rng, SeedableRng};

use super::{AggregatedData, Idx, Lists, SearchData, SearchDirection};

pub(crate) fn node_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == usize::MAX {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}
pub(crate) fn node2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    node_fmt(u, f)?;
    write!(f, ", ")?;
    node_fmt(v, f)?;
    write!(f, "]")
}

/// Used to pretty print a Idx, outputting ∅ if it is EMPTY.
pub struct PrettyIdx(pub Idx);

impl Display for PrettyIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        node_fmt(&self.0, f)
    }
}

impl Debug for PrettyIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

#[allow(unused_imports)]
use PrettyIdx as I;

#[derive(Derivative)]
#[derivative(Debug)]
struct Node<Ag: AggregatedData> {
    #[derivative(Debug(format_with = "node_fmt"))]
    parent: Idx,
    /// Left and right child
    #[derivative(Debug(format_with = "node2_fmt"))]
    child: [Idx; 2],
    /// Data for this node
    data: Ag::Data,
    /// Aggregated data for this node's subtree
    ag_data: Ag,
    size: usize,
}

impl<Ag: AggregatedData> Node<Ag> {
    fn new(data: Ag::Data) -> Self {
        Self {
            ag_data: Ag::from(&data),
            data,
            child: [Treaps::<Ag>::EMPTY; 2],
            parent: Treaps::<Ag>::EMPTY,
            size: 1,
        }
    }
}

/// Data structure that maintains multiple bottom-up treaps.
pub struct Treaps<Ag: AggregatedData = ()> {
    nodes: Vec<Node<Ag>>,
    rng: rngs::StdRng,
}

impl<Ag: AggregatedData> Debug for Treaps<Ag> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        add_branch_to!(builder, "Treaps");
        for u in 0..self.nodes.len() {
            if self.nodes[u].parent == Self::EMPTY {
                self.tree_inorder_dbg(u, &builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<Ag: AggregatedData> Treaps<Ag> {
    #[allow(dead_code)]
    fn tree_preorder_dbg<T: AsTree>(&self, u: Idx, tree: &T) {
        let nu = &self.nodes[u];
        add_branch_to!(*tree, "[{u}] {nu:?}");
        if nu.child == [Self::EMPTY, Self::EMPTY] {
            return;
        }
        for c in nu.child {
            if c != Self::EMPTY {
                self.tree_preorder_dbg(c, tree);
            } else {
                add_leaf_to!(*tree, "<no edge>");
            }
        }
    }
    #[allow(dead_code)]
    fn tree_inorder_dbg<T: AsTree>(&self, u: Idx, tree: &T) {
        let nu = &self.nodes[u];
        if nu.child[0] != Self::EMPTY {
            add_branch_to!(*tree, "left child of {u}");
            self.tree_inorder_dbg(nu.child[0], tree);
        }
        add_branch_to!(*tree, "[{u}] {nu:?}");
        if nu.child[1] != Self::EMPTY {
            self.tree_inorder_dbg(nu.child[1], tree);
        }
    }
    fn size(&self, u: Idx) -> usize {
        if u == Self::EMPTY {
            0
        } else {
            self.nodes[u].size
        }
    }
    fn parent(&self, u: Idx) -> Idx {
        if u == Self::EMPTY {
            Self::EMPTY
        } else {
            self.nodes[u].parent
        }
    }
    fn ag_data(&self, u: Idx) -> Ag {
        if u == Self::EMPTY {
            Ag::default()
        } else {
            self.nodes[u].ag_data.clone()
        }
    }
    /// Attaches `child` as the left (dir = false) or right (dir = true) child of `u`,
    /// detaching and returning whatever used to be there. Panics if `u` is EMPTY.
    fn set_child(&mut self, u: Idx, dir: bool, child: Idx) -> Idx {
        let old = self.nodes[u].child[dir as usize];
        if old != Self::EMPTY {
            self.nodes[old].parent = Self::EMPTY;
        }
        self.nodes[u].child[dir as usize] = child;
        if child != Self::EMPTY {
            self.nodes[child].parent = u;
        }
        old
    }
    /// Recomputes size and aggregate of `u` from its current children. Does not propagate.
    fn recalc(&mut self, u: Idx) {
        if u == Self::EMPTY {
            return;
        }
        let [l, r] = self.nodes[u].child;
        self.nodes[u].size = self.size(l) + 1 + self.size(r);
        self.nodes[u].ag_data = self
            .ag_data(l)
            .merge(Ag::from(&self.nodes[u].data))
            .merge(self.ag_data(r));
    }
    /// Propagates a recalc from `u` up to its (new) root.
    fn recalc_path(&mut self, mut u: Idx) {
        while u != Self::EMPTY {
            self.recalc(u);
            u = self.parent(u);
        }
    }
    /// Merges two disjoint treaps, returning the list `u` followed by `v`. A node is chosen
    /// to end up on the left spine of the join with probability proportional to the size of
    /// the side it came from, which is what makes the join balanced in expectation without
    /// any priority bookkeeping.
    fn merge_inner(&mut self, u: Idx, v: Idx) -> Idx {
        if u == Self::EMPTY {
            return v;
        }
        if v == Self::EMPTY {
            return u;
        }
        let (su, sv) = (self.size(u), self.size(v));
        if self.rng.gen_range(0..su + sv) < su {
            let r = self.nodes[u].child[1];
            let new_r = self.merge_inner(r, v);
            self.set_child(u, true, new_r);
            self.recalc(u);
            u
        } else {
            let l = self.nodes[v].child[0];
            let new_l = self.merge_inner(u, l);
            self.set_child(v, false, new_l);
            self.recalc(v);
            v
        }
    }
    /// Splits `u` into the first `k` elements and the rest.
    fn split_k(&mut self, u: Idx, k: usize) -> (Idx, Idx) {
        if u == Self::EMPTY || k == 0 {
            return (Self::EMPTY, u);
        }
        let szl = self.size(self.nodes[u].child[0]);
        if k <= szl {
            let l = self.set_child(u, false, Self::EMPTY);
            let (ll, lr) = self.split_k(l, k);
            (ll, self.merge_inner(lr, u))
        } else {
            let r = self.set_child(u, true, Self::EMPTY);
            let (rl, rr) = self.split_k(r, k - szl - 1);
            (self.merge_inner(u, rl), rr)
        }
    }
    /// Inserts a fresh singleton node `single` into `tree` at a position chosen by the same
    /// size-weighted coin flip used by merge, i.e. proportionally to subtree size.
    fn cons_inner(&mut self, single: Idx, tree: Idx) -> Idx {
        if tree == Self::EMPTY {
            return single;
        }
        let (stree, _) = (self.size(tree), 1);
        if self.rng.gen_range(0..stree + 1) < stree {
            let l = self.nodes[tree].child[0];
            let new_l = self.cons_inner(single, l);
            self.set_child(tree, false, new_l);
            self.recalc(tree);
            tree
        } else {
            self.set_child(single, true, tree);
            self.recalc(single);
            single
        }
    }
    fn range_agg_lr_inner(&self, u: Idx, ql: usize, qr: usize) -> Ag {
        if u == Self::EMPTY || ql >= qr {
            return Ag::default();
        }
        if ql == 0 && qr >= self.size(u) {
            return self.ag_data(u);
        }
        let [l, r] = self.nodes[u].child;
        let szl = self.size(l);
        let mut ag = Ag::default();
        if ql < szl {
            ag = self.range_agg_lr_inner(l, ql, qr.min(szl));
        }
        if ql <= szl && qr > szl {
            ag = ag.merge(Ag::from(&self.nodes[u].data));
        }
        if qr > szl + 1 {
            let rag = self.range_agg_lr_inner(r, ql.saturating_sub(szl + 1), qr - (szl + 1));
            ag = ag.merge(rag);
        }
        ag
    }
    fn enumerate_inner(
        &mut self,
        u: Idx,
        keep: &mut impl FnMut(&Ag) -> bool,
        visit: &mut impl FnMut(&mut Self, Idx) -> bool,
    ) -> bool {
        if u == Self::EMPTY || !keep(&self.nodes[u].ag_data) {
            return true;
        }
        let [l, r] = self.nodes[u].child;
        if !self.enumerate_inner(l, keep, visit) {
            return false;
        }
        if !visit(self, u) {
            return false;
        }
        self.enumerate_inner(r, keep, visit)
    }
}

impl<Ag: AggregatedData> Lists<Ag> for Treaps<Ag> {
    const EMPTY: Idx = usize::MAX;

    fn new(capacity: usize) -> Self {
        Self::new_seeded(capacity, 2012)
    }

    fn new_seeded(capacity: usize, seed: u64) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    fn create(&mut self, data: Ag::Data) -> Idx {
        let idx = self.nodes.len();
        self.nodes.push(Node::new(data));
        idx
    }

    fn total_size(&self) -> usize {
        self.nodes.len()
    }

    fn root(&mut self, mut u: Idx) -> Idx {
        while self.parent(u) != Self::EMPTY {
            u = self.nodes[u].parent;
        }
        u
    }

    fn data(&self, u: Idx) -> &Ag::Data {
        &self.nodes[u].data
    }

    fn mutate_data(&mut self, u: Idx, f: impl FnOnce(&mut Ag::Data)) {
        f(&mut self.nodes[u].data);
        self.recalc_path(u);
    }

    fn order(&mut self, u: Idx) -> usize {
        if u == Self::EMPTY {
            return 0;
        }
        let mut ord = self.size(self.nodes[u].child[0]);
        let (mut cur, mut par) = (u, self.parent(u));
        while par != Self::EMPTY {
            if self.nodes[par].child[1] == cur {
                ord += self.size(self.nodes[par].child[0]) + 1;
            }
            cur = par;
            par = self.parent(par);
        }
        ord
    }

    fn find_element(
        &mut self,
        u: Idx,
        mut search_strategy: impl FnMut(SearchData<'_, Ag>) -> SearchDirection,
    ) -> Idx {
        let mut u = self.root(u);
        use SearchDirection::*;
        while u != Self::EMPTY {
            let [l, r] = self.nodes[u].child;
            match search_strategy(SearchData {
                current_data: self.data(u),
                left_agg: &self.ag_data(l),
                right_agg: &self.ag_data(r),
            }) {
                Found => return u,
                NotFound => return Self::EMPTY,
                Left => u = l,
                Right => u = r,
            }
        }
        Self::EMPTY
    }

    fn find_kth(&mut self, u: Idx, mut k: usize) -> Idx {
        let mut u = self.root(u);
        while u != Self::EMPTY {
            let [l, r] = self.nodes[u].child;
            let sl = self.size(l);
            if sl > k {
                u = l;
            } else if sl == k {
                return u;
            } else {
                k -= sl + 1;
                u = r;
            }
        }
        Self::EMPTY
    }

    fn len(&mut self, u: Idx) -> usize {
        if u == Self::EMPTY {
            0
        } else {
            let u = self.root(u);
            self.nodes[u].size
        }
    }

    fn range_agg_lr(&mut self, u: Idx, ql: usize, qr: usize) -> Ag {
        let u = self.root(u);
        self.range_agg_lr_inner(u, ql, qr)
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        let (u, v) = (self.root(u), self.root(v));
        if u == v {
            return u;
        }
        self.merge_inner(u, v)
    }

    fn split_lr(&mut self, u: Idx, ql: usize, qr: usize) -> (Idx, Idx, Idx) {
        let u = self.root(u);
        let (l, mr) = self.split_k(u, ql);
        let (m, r) = self.split_k(mr, qr - ql);
        (l, m, r)
    }

    fn is_root(&mut self, u: Idx) -> bool {
        self.parent(u) == Self::EMPTY
    }

    fn enumerate(
        &mut self,
        u: Idx,
        mut keep: impl FnMut(&Ag) -> bool,
        mut visit: impl FnMut(&mut Self, Idx) -> bool,
    ) -> bool {
        let root = self.root(u);
        self.enumerate_inner(root, &mut keep, &mut visit)
    }
}

/// Inserts `single` (already a fresh one-node tree) into `tree` at a size-weighted random
/// position. Exposed alongside `Lists` because it is specific to the bottom-up treap and has
/// no equivalent in a generic balanced-BST interface: a caller must already know `single` is
/// a bare singleton.
impl<Ag: AggregatedData> Treaps<Ag> {
    pub fn cons(&mut self, single: Idx, tree: Idx) -> Idx {
        let tree = self.root(tree);
        self.cons_inner(single, tree)
    }
}
