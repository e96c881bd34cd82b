use std::fmt::{Debug, Display};

use crate::node::Node;

/// An edge is defined by two nodes/endpoints.
/// Routes are directed, so `Edge(u, v)` and `Edge(v, u)` are distinct.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Cost of travelling along a route
pub type Weight = u64;

/// Largest weight accepted from route list files.
/// A simple path has fewer than `2^32` routes, so its total weight always fits into a [`Weight`].
pub const MAX_ROUTE_WEIGHT: Weight = u32::MAX as Weight;

/// Amount of flow a route can carry
pub type Capacity = u64;

/// Weight assigned to a route if none is given
pub const DEFAULT_WEIGHT: Weight = 1;

/// Capacity assigned to a route if none is given
pub const DEFAULT_CAPACITY: Capacity = 0;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Returns true if both edges have at least one endpoint in common
    pub fn shares_endpoint_with(&self, other: &Edge) -> bool {
        self.0 == other.0 || self.0 == other.1 || self.1 == other.0 || self.1 == other.1
    }
}

/// A directed route between two hubs together with its cost and capacity.
///
/// Parallel routes between the same ordered pair are distinct values; graphs never
/// deduplicate them on their own.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Route {
    pub origin: Node,
    pub destination: Node,
    pub weight: Weight,
    pub capacity: Capacity,
}

impl Route {
    /// Creates a new route from `origin` to `destination`
    pub fn new(origin: Node, destination: Node, weight: Weight, capacity: Capacity) -> Self {
        Self {
            origin,
            destination,
            weight,
            capacity,
        }
    }

    /// Creates a route with [`DEFAULT_WEIGHT`] and [`DEFAULT_CAPACITY`]
    pub fn unit(origin: Node, destination: Node) -> Self {
        Self::new(origin, destination, DEFAULT_WEIGHT, DEFAULT_CAPACITY)
    }

    /// Returns the endpoints of the route
    pub fn edge(&self) -> Edge {
        Edge(self.origin, self.destination)
    }

    /// Returns true if the route starts and ends at the same hub
    pub fn is_loop(&self) -> bool {
        self.origin == self.destination
    }
}
