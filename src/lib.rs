#![doc(html_root_url = "https://docs.rs/keyed-forest/0.1.0")]
//! A keyed union-find forest whose groups can be enumerated.
//!
//! Nodes are shared handles identified by a string key. A
//! [`Forest`](struct.Forest.html) tracks one representative per disjoint
//! group and supports:
//!
//! |                  | operation | returns |
//! | :--------------- | :-------- | :------ |
//! | register a node  | [`make_set`](struct.Forest.html#method.make_set) | — |
//! | representative   | [`find`](struct.Forest.html#method.find) | live node |
//! | lookup by key    | [`find_by_id`](struct.Forest.html#method.find_by_id) | live node or copy |
//! | merge two groups | [`union`](struct.Forest.html#method.union) | whether anything changed |
//! | enumerate group  | [`copy_set`](struct.Forest.html#method.copy_set) | copies |
//!
//! `find` does path compression and `union` is rank-balanced. Besides the
//! parent tree, every group keeps its members on a circular `next` list, so
//! a group can be listed without scanning the whole forest.
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! keyed-forest = "0.1.0"
//! ```
//!
//! Enable the `serde` feature to serialize node [`Record`](struct.Record.html)s
//! and [`Value`](enum.Value.html)s. The forest itself is not serializable.
//!
//! # Examples
//!
//! Kruskal’s algorithm to find the minimum spanning tree of a graph:
//!
//! ```
//! use keyed_forest::{Forest, Node};
//! use std::collections::{HashMap, HashSet};
//!
//! fn mst(vertices: &[&str], mut edges: Vec<(&str, &str, u32)>)
//!        -> HashSet<(String, String)> {
//!
//!     let mut forest: Forest = Forest::new();
//!     let mut nodes = HashMap::new();
//!
//!     for &vertex in vertices {
//!         let node: Node = Node::new(vertex);
//!         forest.make_set(&node, true);
//!         nodes.insert(vertex, node);
//!     }
//!
//!     edges.sort_by_key(|&(_, _, weight)| weight);
//!
//!     let mut result = HashSet::new();
//!     for (src, dst, _) in edges {
//!         if forest.union(&nodes[src], &nodes[dst]) {
//!             result.insert((src.to_owned(), dst.to_owned()));
//!         }
//!     }
//!
//!     assert_eq!(1, forest.size());
//!     result
//! }
//!
//! fn main() {
//!     //      4       5       6
//!     //  a ----- b ----- d ----- f
//!     //   \      |     / |      /
//!     //  1 \   2 |  8 /  | 3   / 7
//!     //     \    |   /   |    /
//!     //      `-- c -'    e --'
//!     let edges = vec![
//!         ("a", "b", 4), ("a", "c", 1), ("b", "c", 2), ("b", "d", 5),
//!         ("c", "d", 8), ("d", "e", 3), ("d", "f", 6), ("e", "f", 7),
//!     ];
//!
//!     let expected = vec![ ("a", "c"), ("b", "c"), ("d", "e"),
//!                          ("b", "d"), ("d", "f"), ]
//!         .into_iter()
//!         .map(|(s, d)| (s.to_owned(), d.to_owned()))
//!         .collect::<HashSet<_>>();
//!
//!     assert_eq!(expected, mst(&["a", "b", "c", "d", "e", "f"], edges));
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod forest;
mod node;
mod traits;
mod validate;

pub use error::*;
pub use forest::*;
pub use node::*;
pub use traits::*;
