use stream_bitset::prelude::*;
use tracing::warn;

use super::{macros::*, *};
use crate::testing::test_graph_ops;

/// Adjacency-matrix representation with a capacity fixed at construction.
///
/// Weights and capacities are stored in two flattened `capacity x capacity` matrices indexed by
/// insertion order. Edge presence is tracked separately per row, so routes with weight `0` are
/// still routes. Every ordered pair holds at most one route: adding another one overwrites it.
#[derive(Debug, Clone)]
pub struct AdjMatrix<T: Label> {
    capacity: NumNodes,
    vertices: Vec<Vertex<T>>,
    present: Vec<NodeBitSet>,
    weights: Vec<Weight>,
    capacities: Vec<Capacity>,
    num_edges: NumEdges,
}

impl<T: Label> AdjMatrix<T> {
    /// Returns the maximum number of vertices this matrix can hold
    pub fn capacity(&self) -> NumNodes {
        self.capacity
    }

    #[inline]
    fn cell(&self, u: Node, v: Node) -> usize {
        u as usize * self.capacity as usize + v as usize
    }
}

impl_common_graph_ops!(AdjMatrix => Representation::AdjacencyMatrix);

impl<T: Label> AdjacencyList for AdjMatrix<T> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.present[u as usize].bitmask_stream().iter_set_bits()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.present[u as usize].cardinality()
    }
}

impl<T: Label> RouteList for AdjMatrix<T> {
    fn routes_of(&self, u: Node) -> impl Iterator<Item = Route> + '_ {
        self.neighbors_of(u).map(move |v| {
            let cell = self.cell(u, v);
            Route::new(u, v, self.weights[cell], self.capacities[cell])
        })
    }
}

impl<T: Label> AdjacencyTest for AdjMatrix<T> {
    fn route_between(&self, u: Node, v: Node) -> Option<Route> {
        self.has_edge(u, v).then(|| {
            let cell = self.cell(u, v);
            Route::new(u, v, self.weights[cell], self.capacities[cell])
        })
    }

    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.present[u as usize].get_bit(v)
    }
}

impl<T: Label> Labelled<T> for AdjMatrix<T> {
    fn vertex(&self, u: Node) -> &Vertex<T> {
        &self.vertices[u as usize]
    }

    fn node_of(&self, value: &T) -> Option<Node> {
        self.vertices
            .iter()
            .position(|x| x.value() == value)
            .map(|u| u as Node)
    }
}

impl<T: Label> GraphNew for AdjMatrix<T> {
    fn with_capacity(n: NumNodes) -> Self {
        let cells = n as usize * n as usize;
        Self {
            capacity: n,
            vertices: Vec::with_capacity(n as usize),
            present: vec![NodeBitSet::new(n); n as usize],
            weights: vec![0; cells],
            capacities: vec![0; cells],
            num_edges: 0,
        }
    }
}

impl<T: Label> GraphEditing<T> for AdjMatrix<T> {
    fn add_vertex(&mut self, value: T) -> Result<Node> {
        if let Some(u) = self.node_of(&value) {
            return Ok(u);
        }

        if self.number_of_nodes() == self.capacity {
            return Err(GraphError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let u = self.number_of_nodes();
        self.vertices.push(Vertex::new(value));
        Ok(u)
    }

    fn add_route(&mut self, route: Route) -> Result<()> {
        self.check_node(route.origin)?;
        self.check_node(route.destination)?;

        let Route {
            origin: u,
            destination: v,
            weight,
            capacity,
        } = route;

        if self.present[u as usize].set_bit(v) {
            warn!(
                origin = %self.vertex(u),
                destination = %self.vertex(v),
                "adjacency matrix already holds a route for this pair; overwriting it"
            );
        } else {
            self.num_edges += 1;
        }

        let cell = self.cell(u, v);
        self.weights[cell] = weight;
        self.capacities[cell] = capacity;
        Ok(())
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity(self.capacity)
    }
}


test_graph_ops!(
    test_adj_matrix,
    AdjMatrix,
    (GraphNew, GraphEditing, AdjacencyList, RouteList, AdjacencyTest)
);
