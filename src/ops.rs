/*!
# Graph Capabilities

Every representation exposes its functionality through a small set of capability traits.
Algorithms only ever ask for the capabilities they need (e.g. BFS requires an
[`AdjacencyList`], Dijkstra additionally requires a [`RouteList`]), which allows them to run
on auxiliary structures such as residual networks or undirected mirrors as well.

[`Graph`] is the umbrella trait bundling all capabilities of a labelled route network; it is
implemented automatically for every type providing them.
*/

use std::ops::Range;

use stream_bitset::prelude::*;

use crate::prelude::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns the range of all nodes.
    /// In contrast to self.vertices(), the range does not borrow self.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph (parallel edges are counted individually)
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices().map(|u| self.$single(u))
        }
    };
}

/// Traits pertaining getters for (outgoing) neighborhoods
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the out-neighbors of a given vertex.
    /// A neighbor is repeated once per parallel edge.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of outgoing edges of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns a NodeBitSet with bit `v` set iff `(u, v)` is an edge.
    /// ** Panics if `u >= n` **
    fn neighbors_of_as_bitset(&self, u: Node) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(self.number_of_nodes(), self.neighbors_of(u))
    }

    /// Returns the number of distinct out-neighbors of `u`
    /// ** Panics if `u >= n` **
    fn distinct_degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of_as_bitset(u).cardinality()
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    node_iterator!(degrees, degree_of, NumNodes);
}

/// Access to the weighted & capacitated routes of a graph
pub trait RouteList: AdjacencyList {
    /// Returns an iterator over the routes leaving `u` in insertion order.
    /// ** Panics if `u >= n` **
    fn routes_of(&self, u: Node) -> impl Iterator<Item = Route> + '_;

    /// Returns an iterator over all routes of the graph, grouped by origin
    fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        self.vertices_range().flat_map(move |u| self.routes_of(u))
    }

    /// Returns the number of incoming routes for every node
    fn in_degrees(&self) -> Vec<NumNodes> {
        let mut in_degrees = vec![0; self.len()];
        for route in self.routes() {
            in_degrees[route.destination as usize] += 1;
        }
        in_degrees
    }
}

/// Trait to test existence of routes and query their attributes in O(1) or O(deg).
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns the first route from `u` to `v` if one exists.
    /// ** Panics if `u >= n || v >= n` **
    fn route_between(&self, u: Node, v: Node) -> Option<Route>;

    /// Returns *true* if the edge (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.route_between(u, v).is_some()
    }

    /// Returns the weight of the route (u,v) if it exists
    fn weight_of(&self, u: Node, v: Node) -> Option<Weight> {
        self.route_between(u, v).map(|r| r.weight)
    }

    /// Returns the capacity of the route (u,v) if it exists
    fn capacity_of(&self, u: Node, v: Node) -> Option<Capacity> {
        self.route_between(u, v).map(|r| r.capacity)
    }

    /// Returns *true* if there exists an edge (u,v) or (v,u) in the graph.
    fn has_edge_either_way(&self, u: Node, v: Node) -> bool {
        self.has_edge(u, v) || self.has_edge(v, u)
    }
}

/// Translation between dense node indices and the domain values of hubs
pub trait Labelled<T: Label>: GraphNodeOrder {
    /// Returns the vertex stored at index `u`.
    /// ** Panics if `u >= n` **
    fn vertex(&self, u: Node) -> &Vertex<T>;

    /// Returns the index of the vertex wrapping `value`, if present
    fn node_of(&self, value: &T) -> Option<Node>;

    /// Returns the index of the vertex wrapping `value` or [`GraphError::VertexNotFound`]
    fn try_node_of(&self, value: &T) -> Result<Node> {
        self.node_of(value)
            .ok_or_else(|| GraphError::vertex_not_found(value))
    }

    /// Returns an iterator over all vertices in insertion order
    fn labelled_vertices(&self) -> impl Iterator<Item = &Vertex<T>> + '_ {
        self.vertices_range().map(move |u| self.vertex(u))
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph that can hold (at least) `n` vertices
    fn with_capacity(n: NumNodes) -> Self;
}

/// Provides functions to insert vertices and routes
pub trait GraphEditing<T: Label>: Labelled<T> + Sized {
    /// Inserts a vertex wrapping `value` and returns its index.
    /// If a vertex with equal value exists, its index is returned and the graph is unchanged.
    fn add_vertex(&mut self, value: T) -> Result<Node>;

    /// Inserts the route. Both endpoints must already be part of the graph.
    fn add_route(&mut self, route: Route) -> Result<()>;

    /// Inserts a route between the vertices wrapping `origin` and `destination`.
    fn add_edge(
        &mut self,
        origin: &T,
        destination: &T,
        weight: Weight,
        capacity: Capacity,
    ) -> Result<()> {
        let u = self.try_node_of(origin)?;
        let v = self.try_node_of(destination)?;
        self.add_route(Route::new(u, v, weight, capacity))
    }

    /// Creates an empty graph of the same representation (and capacity)
    fn empty_like(&self) -> Self;
}

/// Reports which storage backs a graph
pub trait GraphType {
    fn representation(&self) -> Representation;
}

/// Umbrella trait of a labelled route network.
///
/// Implemented for every type providing all capabilities; in particular for
/// [`AdjList`], [`AdjMatrix`] and [`AnyGraph`].
pub trait Graph<T: Label>:
    RouteList + AdjacencyTest + GraphEdgeOrder + GraphEditing<T> + GraphType
{
    /// Returns `(vertex, out-degree)` pairs in insertion order
    fn degree_pairs(&self) -> impl Iterator<Item = (&Vertex<T>, NumNodes)> + '_ {
        self.vertices_range()
            .map(move |u| (self.vertex(u), self.degree_of(u)))
    }

    /// Renders the graph as text, one line per vertex listing its outgoing routes
    fn render(&self) -> String {
        let mut out = String::new();
        for u in self.vertices_range() {
            out.push_str(&format!("{}:", self.vertex(u)));
            for route in self.routes_of(u) {
                out.push_str(&format!(
                    " -> {} (weight: {}, capacity: {})",
                    self.vertex(route.destination),
                    route.weight,
                    route.capacity
                ));
            }
            out.push('\n');
        }
        out
    }
}

impl<T, G> Graph<T> for G
where
    T: Label,
    G: RouteList + AdjacencyTest + GraphEdgeOrder + GraphEditing<T> + GraphType,
{
}
