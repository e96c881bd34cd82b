/*!
`routenet` is a library for analysing logistics route networks: hubs connected by directed
routes that carry a non-negative weight (cost of travel) and a non-negative capacity
(amount of flow the route can carry).

# Representation

Vertices wrap a user-supplied value (see [`vertex::Label`]) and are addressed internally by
their insertion index, a `u32` in the range `0..n`.
Routes are stored as [`Route`](crate::edge::Route) values: origin, destination, weight and capacity.

### Available Representations

See the [`repr`] module:

- [`AdjList`](crate::repr::AdjList) for sparse networks; parallel routes are kept
- [`AdjMatrix`](crate::repr::AdjMatrix) for dense networks; one route per ordered pair
- [`AnyGraph`](crate::repr::AnyGraph) holding either, picked by edge density when loading

All algorithms are written against the capability traits in [`ops`] and therefore run on
every representation.

# Design

Algorithms that need tuning are provided as configurable structs (e.g.
[`HamiltonianSearch`](crate::algo::HamiltonianSearch)) using the *Builder* / *Setter* pattern.
The commonly used functionality is additionally implemented via traits on the graph itself,
e.g. `graph.cheapest_path(u, v)` or `graph.eulerian(EulerStrategy::Hierholzer)`.

# Usage

- [`prelude`] includes nodes, routes, vertices, errors, the graph operation traits and all representations,
- [`algo`] includes traversal, shortest routes, maximum flow, spanning trees, Eulerian and Hamiltonian analysis and maintenance scheduling,
- [`io`] reads route list files,
- [`analysis`] turns an algorithm run into a text report, and [`report_log`] appends those reports to per-graph log files.

In most use-cases, `use routenet::{prelude::*, algo::*};` suffices.
*/

pub mod algo;
pub mod analysis;
pub mod config;
pub mod edge;
pub mod error;
pub mod io;
pub mod logging;
pub mod node;
pub mod ops;
pub mod repr;
pub mod report_log;
pub(crate) mod testing;
pub mod vertex;

/// `routenet::prelude` includes nodes, routes, vertices, errors, all graph operation traits as well as all representations.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{GraphError, Result},
        node::*,
        ops::*,
        repr::*,
        vertex::*,
    };
}
