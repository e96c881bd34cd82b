/*!
# Eulerian Paths & Circuits

A directed graph has an **Eulerian circuit** iff every vertex has equal in- and out-degree and
all vertices with at least one incident route lie in a single (weakly) connected component.
It has an **Eulerian path** iff the same connectivity holds, exactly one vertex has one more
outgoing than incoming route (the start), exactly one has one more incoming than outgoing route
(the end), and all other vertices are balanced.

If a trail exists it can be constructed by either of two strategies:
- [`EulerStrategy::Hierholzer`] walks unused routes with an explicit stack in `O(m)`,
- [`EulerStrategy::Fleury`] never crosses a bridge of the remaining routes unless forced to,
  testing each candidate with a reachability search (`O(m^2)`).

Both consume every route exactly once and return `m + 1` vertices.
*/

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;
use tracing::{debug, instrument};

use super::*;

/// Construction strategy for Eulerian trails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EulerStrategy {
    #[default]
    Hierholzer,
    Fleury,
}

impl FromStr for EulerStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hierholzer" => Ok(EulerStrategy::Hierholzer),
            "fleury" => Ok(EulerStrategy::Fleury),
            _ => Err(GraphError::invalid_value("Euler strategy", s)),
        }
    }
}

impl Display for EulerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EulerStrategy::Hierholzer => write!(f, "Hierholzer"),
            EulerStrategy::Fleury => write!(f, "Fleury"),
        }
    }
}

/// Reason why a graph has no Eulerian trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EulerObstruction {
    /// The graph has no vertices at all
    NoVertices,
    /// Vertices whose out-degree minus in-degree violates the degree conditions
    Imbalanced { unbalanced: Vec<(Node, i64)> },
    /// The routes do not form a single (weakly) connected component
    Disconnected,
}

/// Outcome of the Eulerian analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EulerianAnalysis {
    /// Closed trail; first and last vertex coincide
    Circuit { trail: Vec<Node> },
    /// Open trail from the unique out-excess vertex to the unique in-excess vertex
    Path { trail: Vec<Node> },
    Infeasible(EulerObstruction),
}

impl EulerianAnalysis {
    /// Returns the constructed trail, if any
    pub fn trail(&self) -> Option<&[Node]> {
        match self {
            EulerianAnalysis::Circuit { trail } | EulerianAnalysis::Path { trail } => Some(trail),
            EulerianAnalysis::Infeasible(_) => None,
        }
    }

    /// Returns *true* if a trail was constructed
    pub fn is_feasible(&self) -> bool {
        self.trail().is_some()
    }
}

/// Start vertex of an Eulerian trail and whether the trail is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EulerStart {
    pub start: Node,
    pub closed: bool,
}

/// Eulerian analysis of directed route networks
pub trait EulerianAnalyzer: RouteList + Sized {
    /// Checks the degree and connectivity conditions.
    /// Returns where a trail has to start or why none exists.
    fn euler_start(&self) -> std::result::Result<EulerStart, EulerObstruction> {
        if self.is_empty() {
            return Err(EulerObstruction::NoVertices);
        }

        let in_degrees = self.in_degrees();
        let unbalanced: Vec<(Node, i64)> = self
            .vertices()
            .map(|u| (u, self.degree_of(u) as i64 - in_degrees[u as usize] as i64))
            .filter(|&(_, excess)| excess != 0)
            .collect();

        let start = match unbalanced.as_slice() {
            [] => EulerStart {
                start: self.vertices().find(|&u| self.degree_of(u) > 0).unwrap_or(0),
                closed: true,
            },
            [(a, 1), (_, -1)] | [(_, -1), (a, 1)] => EulerStart {
                start: *a,
                closed: false,
            },
            _ => return Err(EulerObstruction::Imbalanced { unbalanced }),
        };

        let mirror = EdgeCopy::undirected_mirror(self);
        if mirror.number_of_active_nodes_reachable_from(start.start)
            < mirror.number_of_active_nodes()
        {
            return Err(EulerObstruction::Disconnected);
        }

        Ok(start)
    }

    /// Constructs an Eulerian trail from `start` with Hierholzer's algorithm.
    /// The result is only meaningful if `start` was returned by [`EulerianAnalyzer::euler_start`].
    fn hierholzer(&self, start: Node) -> Vec<Node> {
        let routes = EdgeCopy::directed(self);
        let mut next_route = vec![0usize; self.len()];

        let mut stack = vec![start];
        let mut trail = Vec::with_capacity(routes.number_of_edges() + 1);

        while let Some(&u) = stack.last() {
            let cursor = &mut next_route[u as usize];
            if let Some(&v) = routes.out_neighbors(u).get(*cursor) {
                *cursor += 1;
                stack.push(v);
            } else {
                trail.push(u);
                stack.pop();
            }
        }

        trail.reverse();
        trail
    }

    /// Constructs an Eulerian trail from `start` with Fleury's algorithm.
    /// The result is only meaningful if `start` was returned by [`EulerianAnalyzer::euler_start`].
    fn fleury(&self, start: Node) -> Vec<Node> {
        let mut routes = EdgeCopy::directed(self);
        let mut trail = Vec::with_capacity(routes.number_of_edges() + 1);
        trail.push(start);

        let mut u = start;
        while routes.degree_of(u) > 0 {
            let options = routes.degree_of(u) as usize;
            let chosen = if options == 1 {
                0
            } else {
                (0..options)
                    .find(|&i| !is_bridge(&mut routes, u, i))
                    .unwrap_or(0)
            };

            u = routes.remove_edge_at(u, chosen);
            trail.push(u);
        }

        trail
    }

    /// Decides whether an Eulerian path or circuit exists and constructs it with `strategy`
    ///
    /// # Examples
    /// ```
    /// use routenet::{prelude::*, algo::*};
    ///
    /// let mut g = AdjList::new();
    /// for hub in 1..=4u32 {
    ///     g.add_vertex(hub).unwrap();
    /// }
    /// for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
    ///     g.add_edge(&u, &v, 1, 0).unwrap();
    /// }
    ///
    /// let analysis = g.eulerian(EulerStrategy::Hierholzer);
    /// assert_eq!(analysis.trail(), Some([0, 1, 2, 3, 0].as_slice()));
    /// ```
    #[instrument(level = "debug", skip(self))]
    fn eulerian(&self, strategy: EulerStrategy) -> EulerianAnalysis {
        let EulerStart { start, closed } = match self.euler_start() {
            Ok(start) => start,
            Err(obstruction) => {
                debug!(?obstruction, "no Eulerian trail");
                return EulerianAnalysis::Infeasible(obstruction);
            }
        };

        let trail = match strategy {
            EulerStrategy::Hierholzer => self.hierholzer(start),
            EulerStrategy::Fleury => self.fleury(start),
        };
        debug!(start, closed, length = trail.len(), "constructed Eulerian trail");

        if closed {
            EulerianAnalysis::Circuit { trail }
        } else {
            EulerianAnalysis::Path { trail }
        }
    }
}

impl<G> EulerianAnalyzer for G where G: RouteList + Sized {}

/// Returns *true* if removing the `i`-th route of `u` leaves some remaining route unreachable
/// from its head. The route is re-inserted at its position afterwards.
fn is_bridge(routes: &mut EdgeCopy, u: Node, i: usize) -> bool {
    let v = routes.remove_edge_at(u, i);
    let bridge =
        routes.number_of_active_nodes_reachable_from(v) < routes.number_of_active_nodes();
    routes.insert_edge_at(u, i, v);
    bridge
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashMap;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    const STRATEGIES: [EulerStrategy; 2] = [EulerStrategy::Hierholzer, EulerStrategy::Fleury];

    fn graph_from_edges(n: NumNodes, edges: &[(Node, Node)]) -> AdjList<Node> {
        let mut graph = AdjList::new();
        for u in 0..n {
            graph.add_vertex(u).unwrap();
        }
        for &(u, v) in edges {
            graph.add_route(Route::unit(u, v)).unwrap();
        }
        graph
    }

    fn assert_uses_every_route_once<G: RouteList>(graph: &G, trail: &[Node]) {
        assert_eq!(trail.len(), graph.routes().count() + 1);

        let mut unused: FxHashMap<Edge, usize> = FxHashMap::default();
        for route in graph.routes() {
            *unused.entry(route.edge()).or_insert(0) += 1;
        }
        for w in trail.windows(2) {
            let left = unused.get_mut(&Edge(w[0], w[1])).unwrap();
            assert!(*left > 0, "route {} used too often", Edge(w[0], w[1]));
            *left -= 1;
        }
        assert!(unused.values().all(|&c| c == 0));
    }

    #[test]
    fn four_cycle() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        for strategy in STRATEGIES {
            assert_eq!(
                graph.eulerian(strategy),
                EulerianAnalysis::Circuit {
                    trail: vec![0, 1, 2, 3, 0]
                }
            );
        }
    }

    #[test]
    fn open_path() {
        // 1 -> 2 -> 0 -> 1 -> 3
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 0), (1, 3)]);
        let start = graph.euler_start().unwrap();
        assert_eq!(
            start,
            EulerStart {
                start: 1,
                closed: false
            }
        );

        for strategy in STRATEGIES {
            let analysis = graph.eulerian(strategy);
            assert!(matches!(analysis, EulerianAnalysis::Path { .. }));
            let trail = analysis.trail().unwrap();
            assert_eq!(trail.first(), Some(&1));
            assert_eq!(trail.last(), Some(&3));
            assert_uses_every_route_once(&graph, trail);
        }
    }

    #[test]
    fn fleury_avoids_bridges() {
        // the first route 1 -> 3 leads into a dead end, so Fleury must take the cycle
        // 1 -> 2 -> 0 -> 1 first; Hierholzer takes it but splices the cycle in afterwards
        let graph = graph_from_edges(4, &[(0, 1), (1, 3), (1, 2), (2, 0)]);
        assert_eq!(graph.euler_start().unwrap().start, 1);
        assert_eq!(graph.fleury(1), vec![1, 2, 0, 1, 3]);
        assert_eq!(graph.hierholzer(1), vec![1, 2, 0, 1, 3]);
    }

    #[test]
    fn obstructions() {
        let graph = graph_from_edges(0, &[]);
        assert_eq!(
            graph.eulerian(EulerStrategy::Hierholzer),
            EulerianAnalysis::Infeasible(EulerObstruction::NoVertices)
        );

        let graph = graph_from_edges(3, &[(0, 1), (0, 2)]);
        assert_eq!(
            graph.euler_start(),
            Err(EulerObstruction::Imbalanced {
                unbalanced: vec![(0, 2), (1, -1), (2, -1)]
            })
        );

        // two disjoint cycles are balanced but not connected
        let graph = graph_from_edges(4, &[(0, 1), (1, 0), (2, 3), (3, 2)]);
        assert_eq!(graph.euler_start(), Err(EulerObstruction::Disconnected));
    }

    #[test]
    fn isolated_vertices_are_ignored() {
        let graph = graph_from_edges(5, &[(1, 2), (2, 3), (3, 1)]);
        for strategy in STRATEGIES {
            assert_eq!(graph.eulerian(strategy).trail(), Some([1, 2, 3, 1].as_slice()));
        }

        let graph = graph_from_edges(2, &[]);
        assert_eq!(
            graph.eulerian(EulerStrategy::Fleury),
            EulerianAnalysis::Circuit { trail: vec![0] }
        );
    }

    #[test]
    fn random_walks_are_reconstructed() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [3 as NumNodes, 6, 12] {
            for _ in 0..30 {
                // a random walk is an Eulerian trail of the routes it traverses
                let length = rng.random_range(1..(n as usize * 4));
                let mut walk = vec![rng.random_range(0..n)];
                for _ in 0..length {
                    walk.push(rng.random_range(0..n));
                }
                let closed = rng.random_bool(0.5);
                if closed {
                    walk.push(walk[0]);
                }

                let edges: Vec<_> = walk.windows(2).map(|w| (w[0], w[1])).collect();
                let graph = graph_from_edges(n, &edges);

                for strategy in STRATEGIES {
                    let analysis = graph.eulerian(strategy);
                    let trail = analysis.trail().unwrap();
                    assert_uses_every_route_once(&graph, trail);

                    if matches!(analysis, EulerianAnalysis::Circuit { .. }) {
                        assert_eq!(trail.first(), trail.last());
                    }
                }
            }
        }
    }
}
