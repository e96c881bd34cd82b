/*!
# Minimum Spanning Trees

Two interchangeable strategies computing a spanning structure of minimum total weight:

- **Prim** grows a single tree from the first vertex. In every round it scans all routes leaving
  an included vertex towards a vertex not yet included and takes the cheapest one. Routes are
  followed in their stored direction only. If no such route exists while vertices remain outside,
  the graph is not connected from the first vertex and [`GraphError::Disconnected`] is returned.
- **Kruskal** considers all routes by ascending weight and accepts a route iff its endpoints lie
  in different components; components are merged by relabelling every member of one of them.
  Route direction is ignored. On a disconnected graph the result is a spanning forest.

Which one to use is a performance policy: by default the list representation uses Prim and the
matrix representation uses Kruskal (see [`SpanningStrategy::for_representation`]).
Both strategies additionally populate a [vertex-only copy](super::VertexSubgraph) of the input
with the accepted routes.
*/

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use tracing::{debug, instrument};

use super::*;

/// Algorithm used to compute a spanning tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanningStrategy {
    Prim,
    Kruskal,
}

impl SpanningStrategy {
    /// Default strategy for a representation: Prim on lists, Kruskal on matrices
    pub fn for_representation(representation: Representation) -> Self {
        match representation {
            Representation::AdjacencyList => SpanningStrategy::Prim,
            Representation::AdjacencyMatrix => SpanningStrategy::Kruskal,
        }
    }
}

impl FromStr for SpanningStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prim" => Ok(SpanningStrategy::Prim),
            "kruskal" => Ok(SpanningStrategy::Kruskal),
            _ => Err(GraphError::invalid_value("spanning tree strategy", s)),
        }
    }
}

impl Display for SpanningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpanningStrategy::Prim => write!(f, "Prim"),
            SpanningStrategy::Kruskal => write!(f, "Kruskal"),
        }
    }
}

/// Result of a spanning tree computation
#[derive(Debug, Clone)]
pub struct SpanningTree<G> {
    pub strategy: SpanningStrategy,
    /// Accepted routes in order of acceptance
    pub routes: Vec<Route>,
    /// Sum of the weights of all accepted routes
    pub total_weight: Weight,
    /// Copy of the vertices of the input holding exactly the accepted routes
    pub subgraph: G,
}

impl<G> SpanningTree<G> {
    /// Returns *true* if the accepted routes connect all `n` vertices.
    /// Only Kruskal can return a result for which this is *false* (a spanning forest).
    pub fn is_spanning(&self, n: NumNodes) -> bool {
        self.routes.len() + 1 >= n as usize
    }
}

/// Minimum spanning tree computations on route networks
pub trait MinimumSpanningTree<T: Label>: Graph<T> {
    /// Computes a minimum spanning tree with Prim's algorithm, starting at the first vertex.
    /// Fails with [`GraphError::Disconnected`] if some vertex cannot be reached.
    ///
    /// # Examples
    /// ```
    /// use routenet::{prelude::*, algo::*};
    ///
    /// let mut g = AdjList::new();
    /// for hub in 1..=3u32 {
    ///     g.add_vertex(hub).unwrap();
    /// }
    /// for (u, v, w) in [(1, 2, 5), (1, 3, 10), (2, 3, 3)] {
    ///     g.add_edge(&u, &v, w, 0).unwrap();
    ///     g.add_edge(&v, &u, w, 0).unwrap();
    /// }
    ///
    /// assert_eq!(g.prim().unwrap().total_weight, 8);
    /// ```
    #[instrument(level = "debug", skip(self), fields(n = self.number_of_nodes()))]
    fn prim(&self) -> Result<SpanningTree<Self>> {
        let mut subgraph = self.vertex_only_subgraph()?;
        let mut routes = Vec::new();

        if self.is_empty() {
            return Ok(SpanningTree {
                strategy: SpanningStrategy::Prim,
                routes,
                total_weight: 0,
                subgraph,
            });
        }

        let mut included = self.vertex_bitset_unset();
        let mut order: Vec<Node> = vec![0];
        included.set_bit(0);

        while order.len() < self.len() {
            let cheapest = order
                .iter()
                .flat_map(|&u| self.routes_of(u))
                .filter(|r| !included.get_bit(r.destination))
                .reduce(|best, r| if r.weight < best.weight { r } else { best });

            let Some(route) = cheapest else {
                return Err(GraphError::Disconnected {
                    reached: order.len() as NumNodes,
                    total: self.number_of_nodes(),
                });
            };

            included.set_bit(route.destination);
            order.push(route.destination);
            subgraph.add_route(route)?;
            routes.push(route);
        }

        let total_weight = routes.iter().map(|r| r.weight).sum();
        debug!(total_weight, "Prim finished");

        Ok(SpanningTree {
            strategy: SpanningStrategy::Prim,
            routes,
            total_weight,
            subgraph,
        })
    }

    /// Computes a minimum spanning forest with Kruskal's algorithm.
    /// Routes of equal weight are considered in route order.
    #[instrument(level = "debug", skip(self), fields(n = self.number_of_nodes()))]
    fn kruskal(&self) -> Result<SpanningTree<Self>> {
        let mut subgraph = self.vertex_only_subgraph()?;
        let mut routes = Vec::new();

        // component[u] is the representative of the component of u
        let mut component: Vec<Node> = self.vertices_range().collect();
        let target = self.len().saturating_sub(1);

        for route in self.routes().sorted_by_key(|r| r.weight) {
            if routes.len() >= target {
                break;
            }

            let keep = component[route.origin as usize];
            let merge = component[route.destination as usize];
            if keep == merge {
                continue;
            }

            for c in component.iter_mut().filter(|c| **c == merge) {
                *c = keep;
            }

            subgraph.add_route(route)?;
            routes.push(route);
        }

        let total_weight = routes.iter().map(|r| r.weight).sum();
        debug!(total_weight, accepted = routes.len(), "Kruskal finished");

        Ok(SpanningTree {
            strategy: SpanningStrategy::Kruskal,
            routes,
            total_weight,
            subgraph,
        })
    }

    /// Computes a minimum spanning tree with the given strategy, or the default strategy of
    /// the representation if `None`.
    fn spanning_tree(&self, strategy: Option<SpanningStrategy>) -> Result<SpanningTree<Self>> {
        match strategy.unwrap_or_else(|| SpanningStrategy::for_representation(self.representation()))
        {
            SpanningStrategy::Prim => self.prim(),
            SpanningStrategy::Kruskal => self.kruskal(),
        }
    }
}

impl<T: Label, G: Graph<T>> MinimumSpanningTree<T> for G {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_pcg::Pcg64Mcg;

    fn reciprocal(
        representation: Representation,
        n: NumNodes,
        routes: &[(Node, Node, Weight)],
    ) -> AnyGraph<Node> {
        let mut graph = AnyGraph::new(representation, n);
        for u in 0..n {
            graph.add_vertex(u).unwrap();
        }
        for &(u, v, w) in routes {
            graph.add_route(Route::new(u, v, w, 0)).unwrap();
            graph.add_route(Route::new(v, u, w, 0)).unwrap();
        }
        graph
    }

    #[test]
    fn triangle() {
        for repr in [Representation::AdjacencyList, Representation::AdjacencyMatrix] {
            let graph = reciprocal(repr, 3, &[(0, 1, 5), (0, 2, 10), (1, 2, 3)]);

            for strategy in [SpanningStrategy::Prim, SpanningStrategy::Kruskal] {
                let tree = graph.spanning_tree(Some(strategy)).unwrap();
                assert_eq!(tree.strategy, strategy);
                assert_eq!(tree.total_weight, 8);
                assert_eq!(tree.routes.len(), 2);
                assert!(tree.is_spanning(3));
                assert!(tree.routes.iter().all(|r| r.weight != 10));

                assert_eq!(tree.subgraph.representation(), repr);
                assert_eq!(tree.subgraph.number_of_edges(), 2);
                assert!(!tree.subgraph.has_edge_either_way(0, 2));
            }
        }
    }

    #[test]
    fn default_strategy_follows_representation() {
        let list = reciprocal(Representation::AdjacencyList, 2, &[(0, 1, 1)]);
        assert_eq!(list.spanning_tree(None).unwrap().strategy, SpanningStrategy::Prim);

        let matrix = reciprocal(Representation::AdjacencyMatrix, 2, &[(0, 1, 1)]);
        assert_eq!(
            matrix.spanning_tree(None).unwrap().strategy,
            SpanningStrategy::Kruskal
        );
    }

    #[test]
    fn disconnected() {
        let graph = reciprocal(Representation::AdjacencyList, 4, &[(0, 1, 1), (2, 3, 2)]);

        assert!(matches!(
            graph.prim(),
            Err(GraphError::Disconnected {
                reached: 2,
                total: 4
            })
        ));

        let forest = graph.kruskal().unwrap();
        assert_eq!(forest.routes.len(), 2);
        assert_eq!(forest.total_weight, 3);
        assert!(!forest.is_spanning(4));
    }

    #[test]
    fn prim_follows_direction() {
        let mut graph = AdjList::new();
        for u in 0..2u32 {
            graph.add_vertex(u).unwrap();
        }
        graph.add_route(Route::new(1, 0, 4, 0)).unwrap();
        assert!(graph.prim().is_err());
        assert_eq!(graph.kruskal().unwrap().total_weight, 4);
    }

    #[test]
    fn trivial_graphs() {
        let graph: AdjList<Node> = AdjList::new();
        assert!(graph.prim().unwrap().routes.is_empty());
        assert!(graph.kruskal().unwrap().routes.is_empty());

        let graph = reciprocal(Representation::AdjacencyMatrix, 1, &[]);
        assert_eq!(graph.prim().unwrap().total_weight, 0);
        assert!(graph.kruskal().unwrap().is_spanning(1));
    }

    #[test]
    fn parse_strategy() {
        assert_eq!(
            "Kruskal".parse::<SpanningStrategy>().unwrap(),
            SpanningStrategy::Kruskal
        );
        assert!("boruvka".parse::<SpanningStrategy>().is_err());
    }

    #[test]
    fn prim_equals_kruskal_on_distinct_weights() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [5 as NumNodes, 10, 20] {
            for _ in 0..20 {
                // random spanning path plus random chords, all weights distinct
                let mut order: Vec<Node> = (0..n).collect();
                order.shuffle(rng);

                let mut pairs: Vec<(Node, Node)> =
                    order.windows(2).map(|w| (w[0], w[1])).collect();
                for _ in 0..n {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    if u != v {
                        pairs.push((u, v));
                    }
                }

                let mut weights: Vec<Weight> = (1..=pairs.len() as Weight).collect();
                weights.shuffle(rng);

                let routes = pairs
                    .iter()
                    .zip(weights)
                    .map(|(&(u, v), w)| (u, v, w))
                    .collect_vec();

                let graph = reciprocal(Representation::AdjacencyList, n, &routes);
                let prim = graph.prim().unwrap();
                let kruskal = graph.kruskal().unwrap();

                assert_eq!(prim.total_weight, kruskal.total_weight);
                assert_eq!(prim.routes.len(), n as usize - 1);
                assert_eq!(kruskal.routes.len(), n as usize - 1);
            }
        }
    }
}
