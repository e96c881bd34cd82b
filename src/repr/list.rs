use fxhash::FxHashMap;

use super::{macros::*, *};
use crate::testing::test_graph_ops;

/// Adjacency-list representation: every vertex stores its outgoing routes in insertion order.
///
/// Vertex lookup by value uses a hash index, parallel routes are kept as individual entries.
#[derive(Debug, Clone)]
pub struct AdjList<T: Label> {
    vertices: Vec<Vertex<T>>,
    index: FxHashMap<T, Node>,
    routes: Vec<Vec<Route>>,
    num_edges: NumEdges,
}

impl<T: Label> AdjList<T> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: Label> Default for AdjList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl_common_graph_ops!(AdjList => Representation::AdjacencyList);

impl<T: Label> AdjacencyList for AdjList<T> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.routes[u as usize].iter().map(|r| r.destination)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.routes[u as usize].len() as NumNodes
    }
}

impl<T: Label> RouteList for AdjList<T> {
    fn routes_of(&self, u: Node) -> impl Iterator<Item = Route> + '_ {
        self.routes[u as usize].iter().copied()
    }
}

impl<T: Label> AdjacencyTest for AdjList<T> {
    fn route_between(&self, u: Node, v: Node) -> Option<Route> {
        self.routes[u as usize]
            .iter()
            .find(|r| r.destination == v)
            .copied()
    }
}

impl<T: Label> Labelled<T> for AdjList<T> {
    fn vertex(&self, u: Node) -> &Vertex<T> {
        &self.vertices[u as usize]
    }

    fn node_of(&self, value: &T) -> Option<Node> {
        self.index.get(value).copied()
    }
}

impl<T: Label> GraphNew for AdjList<T> {
    fn with_capacity(n: NumNodes) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(n as usize);
        Self {
            vertices: Vec::with_capacity(n as usize),
            index,
            routes: Vec::with_capacity(n as usize),
            num_edges: 0,
        }
    }
}

impl<T: Label> GraphEditing<T> for AdjList<T> {
    fn add_vertex(&mut self, value: T) -> Result<Node> {
        if let Some(&u) = self.index.get(&value) {
            return Ok(u);
        }

        let u = self.number_of_nodes();
        self.index.insert(value.clone(), u);
        self.vertices.push(Vertex::new(value));
        self.routes.push(Vec::new());
        Ok(u)
    }

    fn add_route(&mut self, route: Route) -> Result<()> {
        self.check_node(route.origin)?;
        self.check_node(route.destination)?;

        self.routes[route.origin as usize].push(route);
        self.num_edges += 1;
        Ok(())
    }

    fn empty_like(&self) -> Self {
        Self::with_capacity(self.number_of_nodes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn parallel_routes_are_kept() {
        let mut graph = AdjList::new();
        for hub in ["A", "B"] {
            graph.add_vertex(hub).unwrap();
        }
        graph.add_edge(&"A", &"B", 5, 2).unwrap();
        graph.add_edge(&"A", &"B", 3, 7).unwrap();

        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.degree_of(0), 2);
        assert_eq!(graph.distinct_degree_of(0), 1);
        assert_eq!(
            graph.routes().collect_vec(),
            vec![Route::new(0, 1, 5, 2), Route::new(0, 1, 3, 7)]
        );

        // the first inserted route answers point queries
        assert_eq!(graph.weight_of(0, 1), Some(5));
        assert_eq!(graph.capacity_of(0, 1), Some(2));
        assert_eq!(graph.weight_of(1, 0), None);
    }

    #[test]
    fn hash_index() {
        let mut graph = AdjList::new();
        let hubs = (0..100u32).map(|x| x * 7).collect_vec();
        for &h in &hubs {
            graph.add_vertex(h).unwrap();
        }
        for (u, h) in hubs.iter().enumerate() {
            assert_eq!(graph.node_of(h), Some(u as Node));
        }
        assert_eq!(graph.node_of(&1), None);
    }
}

test_graph_ops!(
    test_adj_list,
    AdjList,
    (GraphNew, GraphEditing, AdjacencyList, RouteList, AdjacencyTest)
);
