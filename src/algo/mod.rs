/*!
# Graph Algorithms

This module provides the **analyses** of a route network built on top of the graph
representations in this crate. All algorithms are re-exported at the top level of this module,
so you can simply do:
```rust
use routenet::algo::*;
```
and gain access to traversal, cheapest paths, maximum flow, spanning trees, Eulerian and
Hamiltonian analysis and conflict-free scheduling.
Where it fits, algorithms are provided as **iterators** (e.g. BFS or the augmentations of
Edmonds–Karp) or as configurable structs using the *Builder* / *Setter* pattern; the common
entry points are traits implemented on the graphs themselves.

No analysis mutates the graph it runs on; derived structures (residual networks, edge copies,
subgraphs, conflict graphs) are built privately.
*/

mod coloring;
mod dijkstra;
mod eulerian;
mod hamiltonian;
mod line_graph;
mod network_flow;
mod spanning_tree;
mod subgraph;
mod traversal;

use crate::prelude::*;

pub use coloring::*;
pub use dijkstra::*;
pub use eulerian::*;
pub use hamiltonian::*;
pub use line_graph::*;
pub use network_flow::*;
pub use spanning_tree::*;
pub use subgraph::*;
pub use traversal::*;
