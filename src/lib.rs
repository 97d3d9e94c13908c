//! This crate implements fully dynamic graph connectivity: online insertion and removal of
//! undirected edges on a fixed vertex set, with connectivity queries and a running component
//! count, each in `O(lg n)` amortized time for additions and `O(lg² n)` amortized time for
//! removals. See the trait [DynamicConnectivity].
//!
//! ## Usage
//!
//! ```
//! use dynamic_connectivity::{DynamicConnectivity, FastDynamicGraph};
//!
//! let mut graph = FastDynamicGraph::new(5);
//! graph.add_edge(0, 1);
//! graph.add_edge(1, 2);
//! assert!(graph.is_connected(0, 2));
//! assert_eq!(graph.component_count(), 3);
//! graph.remove_edge(0, 1);
//! assert!(!graph.is_connected(0, 2));
//! ```
//!
//! You can see example usage at `src/bin/example.rs` and run it with `cargo run`.
//!
//! ## Implementation
//!
//! This is the Holm-Lichtenberg-Thorup algorithm: a spanning forest per level, each
//! represented as an Euler tour tree, with non-tree edges demoted to per-level incidence
//! lists and promoted a level at a time as replacement searches fail to find them. The Euler
//! tour trees are themselves backed by a bottom-up randomized treap.
//!
//! To read the implementation of the algorithm, see `impl DynamicConnectivity for
//! DynamicGraph` in `src/dynamic_graph.rs`. For the data structures:
//! - Treaps: see `impl Lists for Treaps` in `src/lists/treap.rs`.
//! - Euler Tour Tree: see `impl Ett` in `src/euler_tour_tree.rs`.
//!
//! ## Testing
//!
//! Run the tests using:
//!
//! ```skip
//! cargo test
//! ```
//!
//! Add `-- --ignored` to run the stress tests (which run indefinitely with random data until
//! they fail). Use `cargo bench` to see the benchmarks.
pub mod dynamic_graph;
pub mod euler_tour_tree;
pub mod lists;
pub use dynamic_graph::DynamicConnectivity;

use dynamic_graph::DynamicGraph;
use euler_tour_tree::MarkUnion;
use lists::treap::Treaps;

/// The fastest graph implemented in this crate: a [DynamicGraph] backed by [Treaps].
pub type FastDynamicGraph = DynamicGraph<Treaps<MarkUnion>>;
