/*!
# Cheapest Routes

Dijkstra's algorithm with a linear scan for the next node instead of a priority queue.
Every step selects the unvisited node of minimum tentative distance in `O(n)`, resulting in
`O(n^2 + m)` overall, which is the better bound for the dense graphs stored as matrices.

Weights are unsigned, so the non-negativity assumption of the algorithm always holds.
Routes whose tentative distance would overflow a [`Weight`] are skipped; this cannot happen for
weights up to [`MAX_ROUTE_WEIGHT`].
*/

use itertools::Itertools;
use stream_bitset::prelude::*;
use tracing::{debug, instrument, warn};

use super::*;

/// A path together with its total weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedPath {
    /// Nodes in travel order, starting with the origin and ending with the destination
    pub nodes: Vec<Node>,
    /// Sum of the weights of the travelled routes
    pub distance: Weight,
}

impl WeightedPath {
    /// Returns the traversed edges in travel order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| Edge(u, v))
    }

    /// Returns the number of traversed edges
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Single-source shortest path computation.
///
/// Use [`Dijkstra::new`] followed by [`Dijkstra::run`] to compute all distances from one origin,
/// or [`ShortestWeightedPath::cheapest_path`] for a single origin/destination query.
pub struct Dijkstra<'a, G: RouteList> {
    graph: &'a G,
    origin: Node,
    distance: Vec<Option<Weight>>,
    predecessor: Vec<Option<OptionalNode>>,
    unvisited: NodeBitSet,
}

impl<'a, G: RouteList> Dijkstra<'a, G> {
    /// Prepares a search from `origin`: its distance is `0`, all others are unknown.
    pub fn new(graph: &'a G, origin: Node) -> Self {
        let mut distance = vec![None; graph.len()];
        distance[origin as usize] = Some(0);

        Self {
            graph,
            origin,
            distance,
            predecessor: vec![None; graph.len()],
            unvisited: NodeBitSet::new_all_set(graph.number_of_nodes()),
        }
    }

    /// Returns the unvisited node with minimum finite distance (ties go to the smaller index)
    fn select_next(&self) -> Option<Node> {
        self.unvisited
            .iter_set_bits()
            .filter_map(|u| self.distance[u as usize].map(|d| (d, u)))
            .min()
            .map(|(_, u)| u)
    }

    /// Settles nodes until every remaining node is unreachable.
    /// Stops early once `target` (if given) is settled.
    pub fn run_until(&mut self, target: Option<Node>) {
        while let Some(u) = self.select_next() {
            self.unvisited.clear_bit(u);
            if Some(u) == target {
                break;
            }

            let du = self.distance[u as usize].unwrap_or_default();
            for route in self.graph.routes_of(u) {
                let v = route.destination;
                let Some(candidate) = du.checked_add(route.weight) else {
                    warn!(from = u, to = v, "distance overflows, ignoring route");
                    continue;
                };
                if self.distance[v as usize].is_none_or(|dv| candidate < dv) {
                    self.distance[v as usize] = Some(candidate);
                    self.predecessor[v as usize] = OptionalNode::new(u);
                }
            }
        }
    }

    /// Settles all nodes reachable from the origin
    pub fn run(&mut self) {
        self.run_until(None);
    }

    /// Returns the computed distance to `v`, `None` if `v` was not reached
    pub fn distance_to(&self, v: Node) -> Option<Weight> {
        self.distance[v as usize]
    }

    /// Reconstructs the path to `v` by walking predecessor links back to the origin
    pub fn path_to(&self, v: Node) -> Option<WeightedPath> {
        let distance = self.distance_to(v)?;

        let mut nodes = vec![v];
        let mut u = v;
        while u != self.origin {
            u = self.predecessor[u as usize]?.get();
            nodes.push(u);
        }
        nodes.reverse();

        Some(WeightedPath { nodes, distance })
    }
}

/// Cheapest path queries on weighted graphs
pub trait ShortestWeightedPath: RouteList + Sized {
    /// Returns the path of minimum total weight from `origin` to `destination`, or `None`
    /// if `destination` is unreachable.
    ///
    /// # Examples
    /// ```
    /// use routenet::{prelude::*, algo::*};
    ///
    /// let mut g = AdjList::new();
    /// for hub in 1..=3u32 {
    ///     g.add_vertex(hub).unwrap();
    /// }
    /// g.add_edge(&1, &2, 5, 0).unwrap();
    /// g.add_edge(&1, &3, 10, 0).unwrap();
    /// g.add_edge(&2, &3, 3, 0).unwrap();
    ///
    /// let path = g.cheapest_path(0, 2).unwrap();
    /// assert_eq!(path.distance, 8);
    /// assert_eq!(path.nodes, vec![0, 1, 2]);
    /// ```
    #[instrument(level = "debug", skip(self))]
    fn cheapest_path(&self, origin: Node, destination: Node) -> Option<WeightedPath> {
        let mut dijkstra = Dijkstra::new(self, origin);
        dijkstra.run_until(Some(destination));

        let path = dijkstra.path_to(destination);
        debug!(
            distance = path.as_ref().map(|p| p.distance),
            "shortest path search finished"
        );
        path
    }
}

impl<G> ShortestWeightedPath for G where G: RouteList + Sized {}
