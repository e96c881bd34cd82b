use itertools::Either;

use super::*;

/// Tagged variant over both storage backends.
///
/// Every capability is implemented by dispatching to the wrapped representation, so algorithms
/// can be run on an `AnyGraph` without knowing which backend the loader picked.
#[derive(Debug, Clone)]
pub enum AnyGraph<T: Label> {
    List(AdjList<T>),
    Matrix(AdjMatrix<T>),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            AnyGraph::List($g) => $body,
            AnyGraph::Matrix($g) => $body,
        }
    };
}

macro_rules! dispatch_iter {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            AnyGraph::List($g) => Either::Left($body),
            AnyGraph::Matrix($g) => Either::Right($body),
        }
    };
}

impl<T: Label> AnyGraph<T> {
    /// Creates an empty graph of the requested representation.
    /// `n` is the capacity of a matrix and a size hint for a list.
    pub fn new(representation: Representation, n: NumNodes) -> Self {
        match representation {
            Representation::AdjacencyList => AnyGraph::List(AdjList::with_capacity(n)),
            Representation::AdjacencyMatrix => AnyGraph::Matrix(AdjMatrix::with_capacity(n)),
        }
    }
}

impl<T: Label> From<AdjList<T>> for AnyGraph<T> {
    fn from(graph: AdjList<T>) -> Self {
        AnyGraph::List(graph)
    }
}

impl<T: Label> From<AdjMatrix<T>> for AnyGraph<T> {
    fn from(graph: AdjMatrix<T>) -> Self {
        AnyGraph::Matrix(graph)
    }
}

impl<T: Label> GraphType for AnyGraph<T> {
    fn representation(&self) -> Representation {
        dispatch!(self, g => g.representation())
    }
}

impl<T: Label> GraphNodeOrder for AnyGraph<T> {
    fn number_of_nodes(&self) -> NumNodes {
        dispatch!(self, g => g.number_of_nodes())
    }
}

impl<T: Label> GraphEdgeOrder for AnyGraph<T> {
    fn number_of_edges(&self) -> NumEdges {
        dispatch!(self, g => g.number_of_edges())
    }
}

impl<T: Label> AdjacencyList for AnyGraph<T> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        dispatch_iter!(self, g => g.neighbors_of(u))
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        dispatch!(self, g => g.degree_of(u))
    }
}

impl<T: Label> RouteList for AnyGraph<T> {
    fn routes_of(&self, u: Node) -> impl Iterator<Item = Route> + '_ {
        dispatch_iter!(self, g => g.routes_of(u))
    }
}

impl<T: Label> AdjacencyTest for AnyGraph<T> {
    fn route_between(&self, u: Node, v: Node) -> Option<Route> {
        dispatch!(self, g => g.route_between(u, v))
    }

    fn has_edge(&self, u: Node, v: Node) -> bool {
        dispatch!(self, g => g.has_edge(u, v))
    }
}

impl<T: Label> Labelled<T> for AnyGraph<T> {
    fn vertex(&self, u: Node) -> &Vertex<T> {
        dispatch!(self, g => g.vertex(u))
    }

    fn node_of(&self, value: &T) -> Option<Node> {
        dispatch!(self, g => g.node_of(value))
    }
}

impl<T: Label> GraphEditing<T> for AnyGraph<T> {
    fn add_vertex(&mut self, value: T) -> Result<Node> {
        dispatch!(self, g => g.add_vertex(value))
    }

    fn add_route(&mut self, route: Route) -> Result<()> {
        dispatch!(self, g => g.add_route(route))
    }

    fn empty_like(&self) -> Self {
        match self {
            AnyGraph::List(g) => AnyGraph::List(g.empty_like()),
            AnyGraph::Matrix(g) => AnyGraph::Matrix(g.empty_like()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn triangle(representation: Representation) -> AnyGraph<u32> {
        let mut graph = AnyGraph::new(representation, 3);
        for hub in 1..=3 {
            graph.add_vertex(hub).unwrap();
        }
        graph.add_edge(&1, &2, 5, 10).unwrap();
        graph.add_edge(&1, &3, 10, 5).unwrap();
        graph.add_edge(&2, &3, 3, 4).unwrap();
        graph
    }

    #[test]
    fn dispatch_is_transparent() {
        let list = triangle(Representation::AdjacencyList);
        let matrix = triangle(Representation::AdjacencyMatrix);

        assert_eq!(list.representation(), Representation::AdjacencyList);
        assert_eq!(matrix.representation(), Representation::AdjacencyMatrix);

        assert_eq!(list.number_of_nodes(), matrix.number_of_nodes());
        assert_eq!(list.number_of_edges(), matrix.number_of_edges());
        assert_eq!(
            list.routes().collect_vec(),
            matrix.routes().collect_vec()
        );
        assert_eq!(list.render(), matrix.render());
        assert_eq!(
            list.degree_pairs()
                .map(|(v, d)| (*v.value(), d))
                .collect_vec(),
            vec![(1, 2), (2, 1), (3, 0)]
        );
    }

    #[test]
    fn render_lists_routes() {
        let graph = triangle(Representation::AdjacencyMatrix);
        assert_eq!(
            graph.render(),
            "1: -> 2 (weight: 5, capacity: 10) -> 3 (weight: 10, capacity: 5)\n\
             2: -> 3 (weight: 3, capacity: 4)\n\
             3:\n"
        );
    }

    #[test]
    fn empty_like_keeps_representation() {
        for repr in [Representation::AdjacencyList, Representation::AdjacencyMatrix] {
            let graph = triangle(repr);
            let empty = graph.empty_like();
            assert_eq!(empty.representation(), repr);
            assert!(empty.is_empty());
            assert!(empty.is_singleton_graph());
        }
    }

    #[test]
    fn missing_vertex_is_structural() {
        let mut graph = triangle(Representation::AdjacencyList);
        assert!(matches!(
            graph.add_edge(&1, &9, 1, 1),
            Err(GraphError::VertexNotFound(v)) if v == "9"
        ));
        assert!(matches!(
            graph.add_route(Route::unit(0, 3)),
            Err(GraphError::VertexNotFound(_))
        ));
        assert_eq!(graph.number_of_edges(), 3);
    }
}
