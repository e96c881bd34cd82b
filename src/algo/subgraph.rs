/*!
# Derived Graphs

Analyses never mutate the graph they are given. Instead they build private derived structures:

- [`VertexSubgraph::vertex_only_subgraph`] copies all vertices (but no routes) into a fresh graph
  of the same representation; the spanning tree algorithms populate it with the accepted routes.
- [`EdgeCopy`] is a mutable copy of the adjacency structure (optionally mirrored to ignore
  direction) that supports removing and re-inserting individual edges.
*/

use super::*;

/// Creates graphs sharing the vertex set of an existing one
pub trait VertexSubgraph<T: Label>: Graph<T> {
    /// Returns a graph of the same representation holding the same vertices, in the same order,
    /// but no routes. Node indices are therefore valid in both graphs.
    fn vertex_only_subgraph(&self) -> Result<Self> {
        let mut subgraph = self.empty_like();
        for vertex in self.labelled_vertices() {
            subgraph.add_vertex(vertex.value().clone())?;
        }
        Ok(subgraph)
    }
}

impl<T: Label, G: Graph<T>> VertexSubgraph<T> for G {}

/// Mutable copy of the edges of a graph.
///
/// Out-neighbors are kept in route order (one entry per route). In-degrees are tracked so that
/// vertices without any remaining incident edge can be recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCopy {
    out: Vec<Vec<Node>>,
    in_degree: Vec<NumNodes>,
}

impl EdgeCopy {
    /// Copies every route of `graph` as a directed edge
    pub fn directed<G: RouteList>(graph: &G) -> Self {
        let mut copy = Self::empty(graph.number_of_nodes());
        for Route {
            origin, destination, ..
        } in graph.routes()
        {
            copy.push_edge(origin, destination);
        }
        copy
    }

    /// Copies every route of `graph` in both directions
    pub fn undirected_mirror<G: RouteList>(graph: &G) -> Self {
        let mut copy = Self::empty(graph.number_of_nodes());
        for Route {
            origin, destination, ..
        } in graph.routes()
        {
            copy.push_edge(origin, destination);
            copy.push_edge(destination, origin);
        }
        copy
    }

    fn empty(n: NumNodes) -> Self {
        Self {
            out: vec![Vec::new(); n as usize],
            in_degree: vec![0; n as usize],
        }
    }

    fn push_edge(&mut self, u: Node, v: Node) {
        self.out[u as usize].push(v);
        self.in_degree[v as usize] += 1;
    }

    /// Returns the out-neighbors of `u` in their current order
    pub fn out_neighbors(&self, u: Node) -> &[Node] {
        &self.out[u as usize]
    }

    /// Removes the `i`-th outgoing edge of `u` and returns its head.
    /// ** Panics if `i >= deg(u)` **
    pub fn remove_edge_at(&mut self, u: Node, i: usize) -> Node {
        let v = self.out[u as usize].remove(i);
        self.in_degree[v as usize] -= 1;
        v
    }

    /// Re-inserts the edge `(u, v)` as the `i`-th outgoing edge of `u`.
    /// ** Panics if `i > deg(u)` **
    pub fn insert_edge_at(&mut self, u: Node, i: usize, v: Node) {
        self.out[u as usize].insert(i, v);
        self.in_degree[v as usize] += 1;
    }

    /// Returns *true* if `u` still has an incoming or outgoing edge
    pub fn is_active(&self, u: Node) -> bool {
        !self.out[u as usize].is_empty() || self.in_degree[u as usize] > 0
    }

    /// Returns the number of vertices with at least one remaining edge
    pub fn number_of_active_nodes(&self) -> NumNodes {
        self.vertices().filter(|&u| self.is_active(u)).count() as NumNodes
    }

    /// Returns the number of vertices with at least one remaining edge reachable from `u`
    pub fn number_of_active_nodes_reachable_from(&self, u: Node) -> NumNodes {
        self.bfs(u).filter(|&v| self.is_active(v)).count() as NumNodes
    }

    /// Returns the total number of remaining edges
    pub fn number_of_edges(&self) -> usize {
        self.out.iter().map(|nbs| nbs.len()).sum()
    }
}

impl GraphNodeOrder for EdgeCopy {
    fn number_of_nodes(&self) -> NumNodes {
        self.out.len() as NumNodes
    }
}

impl AdjacencyList for EdgeCopy {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.out[u as usize].len() as NumNodes
    }
}
