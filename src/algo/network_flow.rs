/*!
# Maximum Flow (Edmonds–Karp)

Computes a maximum flow between a source and a sink hub using the capacities of the routes.

## Core concepts
- The [`ResidualNetwork`] keeps **one residual capacity per ordered node pair**. Parallel routes
  between the same ordered pair are merged by summing their capacities, and every pair is
  accompanied by its reverse pair (seeded with the capacity of the opposite routes, `0` if none).
- [`EdmondsKarp`] repeatedly searches a path with the fewest edges along pairs of positive
  residual capacity (see [`Traversal::shortest_path_where`]) and augments it by its bottleneck.
  Each augmentation is yielded by the iterator, so the computation can be observed step by step.
- After termination, the net flow of a pair `(u, v)` is its original capacity minus its remaining
  residual capacity. Positive net flows are attributed to the original routes of the pair in
  insertion order, filling each route up to its capacity.

Self-loops never carry flow and are ignored.
*/

use fxhash::FxHashMap;
use tracing::{debug, instrument};

use super::*;

/// Residual capacities of a route network keyed by ordered node pair.
///
/// Implements [`AdjacencyList`]: the neighbors of `u` are all `v` such that a route `(u, v)` or
/// `(v, u)` exists, regardless of their current residual capacity.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    residual: FxHashMap<Edge, Capacity>,
    partners: Vec<Vec<Node>>,
}

impl ResidualNetwork {
    /// Builds the residual network of `graph` before any flow has been sent
    pub fn new<G: RouteList>(graph: &G) -> Self {
        let mut residual: FxHashMap<Edge, Capacity> = FxHashMap::default();
        let mut partners = vec![Vec::new(); graph.len()];

        for route in graph.routes().filter(|r| !r.is_loop()) {
            let edge = route.edge();
            if !residual.contains_key(&edge) && !residual.contains_key(&edge.reverse()) {
                partners[edge.0 as usize].push(edge.1);
                partners[edge.1 as usize].push(edge.0);
            }

            *residual.entry(edge).or_insert(0) += route.capacity;
            residual.entry(edge.reverse()).or_insert(0);
        }

        Self { residual, partners }
    }

    /// Returns the remaining capacity from `u` to `v`
    pub fn residual(&self, u: Node, v: Node) -> Capacity {
        self.residual.get(&Edge(u, v)).copied().unwrap_or(0)
    }

    /// Sends `delta` units from `u` to `v`.
    /// The residual capacity of `(u, v)` must be at least `delta`.
    fn push(&mut self, u: Node, v: Node, delta: Capacity) {
        let forward = self.residual.entry(Edge(u, v)).or_insert(0);
        debug_assert!(*forward >= delta);
        *forward -= delta;
        *self.residual.entry(Edge(v, u)).or_insert(0) += delta;
    }
}

impl GraphNodeOrder for ResidualNetwork {
    fn number_of_nodes(&self) -> NumNodes {
        self.partners.len() as NumNodes
    }
}

impl AdjacencyList for ResidualNetwork {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.partners[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.partners[u as usize].len() as NumNodes
    }
}

/// One augmenting path together with the amount of flow sent along it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation {
    pub path: Vec<Edge>,
    pub bottleneck: Capacity,
}

/// Implementation of the Edmonds–Karp algorithm.
///
/// Iterating yields one [`Augmentation`] per augmenting path; the iterator terminates when no
/// augmenting path remains. As every augmentation sends at least one unit of flow, termination
/// is guaranteed for integral capacities.
pub struct EdmondsKarp {
    residual_network: ResidualNetwork,
    source: Node,
    sink: Node,
}

impl EdmondsKarp {
    /// Creates the solver on the residual network of `graph`
    pub fn new<G: RouteList>(graph: &G, source: Node, sink: Node) -> Self {
        Self {
            residual_network: ResidualNetwork::new(graph),
            source,
            sink,
        }
    }

    /// Returns the residual network in its current state
    pub fn residual_network(&self) -> &ResidualNetwork {
        &self.residual_network
    }

    /// Returns the shortest augmenting path (by number of edges) or `None`
    fn augmenting_path(&self) -> Option<Vec<Edge>> {
        if self.source == self.sink {
            return None;
        }

        let network = &self.residual_network;
        network.shortest_path_where(self.source, self.sink, |u, v| network.residual(u, v) > 0)
    }
}

impl Iterator for EdmondsKarp {
    type Item = Augmentation;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.augmenting_path()?;

        let bottleneck = path
            .iter()
            .map(|&Edge(u, v)| self.residual_network.residual(u, v))
            .min()?;

        for &Edge(u, v) in &path {
            self.residual_network.push(u, v, bottleneck);
        }

        debug!(hops = path.len(), bottleneck, "augmented flow");
        Some(Augmentation { path, bottleneck })
    }
}

/// Result of a maximum flow computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxFlow {
    pub source: Node,
    pub sink: Node,
    /// Total amount of flow from source to sink
    pub value: Capacity,
    /// Every original route carrying positive flow, in route order
    pub route_flows: Vec<(Route, Capacity)>,
    /// Number of augmenting paths used
    pub augmentations: usize,
}

impl MaxFlow {
    /// Returns the net flow leaving minus the net flow entering `u`
    pub fn excess_out_of(&self, u: Node) -> i128 {
        self.route_flows
            .iter()
            .map(|(r, f)| {
                let f = *f as i128;
                match (r.origin == u, r.destination == u) {
                    (true, false) => f,
                    (false, true) => -f,
                    _ => 0,
                }
            })
            .sum()
    }
}

/// Maximum flow computations on capacitated graphs
pub trait NetworkFlow: RouteList + Sized {
    /// Computes a maximum flow from `source` to `sink`.
    /// If `source == sink`, the flow is empty.
    ///
    /// # Examples
    /// ```
    /// use routenet::{prelude::*, algo::*};
    ///
    /// let mut g = AdjList::new();
    /// for hub in 1..=3u32 {
    ///     g.add_vertex(hub).unwrap();
    /// }
    /// g.add_edge(&1, &2, 1, 10).unwrap();
    /// g.add_edge(&2, &3, 1, 4).unwrap();
    /// g.add_edge(&1, &3, 1, 5).unwrap();
    ///
    /// assert_eq!(g.max_flow(0, 2).value, 9);
    /// ```
    #[instrument(level = "debug", skip(self))]
    fn max_flow(&self, source: Node, sink: Node) -> MaxFlow {
        let mut solver = EdmondsKarp::new(self, source, sink);

        let mut value: Capacity = 0;
        let mut augmentations = 0;
        for augmentation in solver.by_ref() {
            value += augmentation.bottleneck;
            augmentations += 1;
        }

        // net flow per ordered pair = original capacity - remaining residual capacity
        let network = solver.residual_network();
        let mut capacity_of_pair: FxHashMap<Edge, Capacity> = FxHashMap::default();
        for route in self.routes().filter(|r| !r.is_loop()) {
            *capacity_of_pair.entry(route.edge()).or_insert(0) += route.capacity;
        }

        let mut remaining: FxHashMap<Edge, Capacity> = capacity_of_pair
            .iter()
            .map(|(&e, &c)| (e, c.saturating_sub(network.residual(e.0, e.1))))
            .collect();

        let mut route_flows = Vec::new();
        for route in self.routes().filter(|r| !r.is_loop()) {
            if let Some(left) = remaining.get_mut(&route.edge()) {
                let flow = (*left).min(route.capacity);
                if flow > 0 {
                    *left -= flow;
                    route_flows.push((route, flow));
                }
            }
        }

        debug!(value, augmentations, "maximum flow computed");
        MaxFlow {
            source,
            sink,
            value,
            route_flows,
            augmentations,
        }
    }
}

impl<G> NetworkFlow for G where G: RouteList + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn network(n: NumNodes, routes: &[(Node, Node, Capacity)]) -> AdjList<Node> {
        let mut graph = AdjList::new();
        for u in 0..n {
            graph.add_vertex(u).unwrap();
        }
        for &(u, v, c) in routes {
            graph.add_route(Route::new(u, v, 1, c)).unwrap();
        }
        graph
    }

    fn assert_valid_flow<G: RouteList>(graph: &G, flow: &MaxFlow) {
        for (route, f) in &flow.route_flows {
            assert!(*f > 0);
            assert!(*f <= route.capacity);
        }
        for u in graph.vertices() {
            let excess = flow.excess_out_of(u);
            if flow.source == flow.sink {
                assert_eq!(excess, 0);
            } else if u == flow.source {
                assert_eq!(excess, flow.value as i128);
            } else if u == flow.sink {
                assert_eq!(excess, -(flow.value as i128));
            } else {
                assert_eq!(excess, 0, "conservation violated at {u}");
            }
        }
    }

    #[test]
    fn two_paths() {
        let graph = network(3, &[(0, 1, 10), (1, 2, 4), (0, 2, 5)]);
        let flow = graph.max_flow(0, 2);
        assert_eq!(flow.value, 9);
        assert_eq!(
            flow.route_flows,
            vec![
                (Route::new(0, 1, 1, 10), 4),
                (Route::new(0, 2, 1, 5), 5),
                (Route::new(1, 2, 1, 4), 4)
            ]
        );
        assert_valid_flow(&graph, &flow);
    }

    #[test]
    fn cancellation_of_reverse_flow() {
        // the first augmenting path uses 1->2 which must later be cancelled
        //   0 -> 1 -> 3
        //   0 -> 2 -> 3
        //        1 -> 2
        let graph = network(
            4,
            &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (0, 2, 1), (1, 3, 1)],
        );
        let flow = graph.max_flow(0, 3);
        assert_eq!(flow.value, 2);
        assert_valid_flow(&graph, &flow);
    }

    #[test]
    fn antiparallel_routes() {
        let graph = network(3, &[(0, 1, 5), (1, 0, 3), (1, 2, 4)]);
        let flow = graph.max_flow(0, 2);
        assert_eq!(flow.value, 4);
        assert_valid_flow(&graph, &flow);
        assert_eq!(flow.route_flows[0], (Route::new(0, 1, 1, 5), 4));
    }

    #[test]
    fn parallel_capacities_are_summed() {
        let graph = network(2, &[(0, 1, 3), (0, 1, 4), (0, 0, 100)]);
        let flow = graph.max_flow(0, 1);
        assert_eq!(flow.value, 7);
        assert_eq!(flow.route_flows.len(), 2);
        assert_valid_flow(&graph, &flow);
    }

    #[test]
    fn degenerate_queries() {
        let graph = network(3, &[(0, 1, 3)]);
        assert_eq!(graph.max_flow(0, 2).value, 0);
        assert_eq!(graph.max_flow(0, 0).value, 0);
        assert!(graph.max_flow(0, 0).route_flows.is_empty());
    }

    #[test]
    fn random_flows_are_valid() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [4 as NumNodes, 8, 16] {
            for _ in 0..20 {
                let routes: Vec<_> = (0..n * 3)
                    .map(|_| {
                        (
                            rng.random_range(0..n),
                            rng.random_range(0..n),
                            rng.random_range(0..10),
                        )
                    })
                    .collect();
                let graph = network(n, &routes);

                let flow = graph.max_flow(0, n - 1);
                assert_valid_flow(&graph, &flow);

                // max flow is bounded by the capacity leaving the source
                let out_of_source: Capacity = graph
                    .routes_of(0)
                    .filter(|r| !r.is_loop())
                    .map(|r| r.capacity)
                    .sum();
                assert!(flow.value <= out_of_source);
            }
        }
    }
}
