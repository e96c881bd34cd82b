/*!
# Welsh–Powell Coloring

Greedy coloring in order of descending degree. Each round (color) scans the vertices in that
order and takes every uncolored vertex that is not adjacent to a vertex already taken in the
same round. The number of rounds is at most the maximum degree plus one, but not necessarily
minimal.

Applied to a [conflict graph](super::LineGraph), every round is a set of routes that can be
serviced simultaneously.
*/

use std::cmp::Reverse;

use itertools::Itertools;
use tracing::{debug, instrument};

use super::*;

/// Partition of the vertices into rounds of pairwise non-adjacent vertices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coloring {
    /// Vertices of every round, in processing order
    pub rounds: Vec<Vec<Node>>,
}

impl Coloring {
    /// Returns the number of rounds (colors) used
    pub fn number_of_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Returns the (0-indexed) round of `u`, if `u` was colored
    pub fn round_of(&self, u: Node) -> Option<usize> {
        self.rounds.iter().position(|round| round.contains(&u))
    }

    /// Returns *true* if no two vertices of a round are adjacent in `graph`
    pub fn is_proper<G: AdjacencyTest>(&self, graph: &G) -> bool {
        self.rounds.iter().all(|round| {
            round
                .iter()
                .tuple_combinations()
                .all(|(&u, &v)| !graph.has_edge_either_way(u, v))
        })
    }
}

/// Greedy coloring of graphs
pub trait WelshPowell: AdjacencyList + AdjacencyTest {
    /// Colors all vertices with the Welsh–Powell heuristic.
    /// Ties in degree are broken by node index.
    #[instrument(level = "debug", skip(self), fields(n = self.number_of_nodes()))]
    fn welsh_powell(&self) -> Coloring {
        let order = self
            .vertices()
            .sorted_by_key(|&u| Reverse(self.degree_of(u)))
            .collect_vec();

        let mut colored = self.vertex_bitset_unset();
        let mut uncolored = order.len();
        let mut rounds = Vec::new();

        while uncolored > 0 {
            let mut round: Vec<Node> = Vec::new();
            for &u in &order {
                if colored.get_bit(u) || round.iter().any(|&w| self.has_edge_either_way(u, w)) {
                    continue;
                }
                colored.set_bit(u);
                round.push(u);
            }

            uncolored -= round.len();
            debug!(round = rounds.len() + 1, size = round.len(), "round completed");
            rounds.push(round);
        }

        Coloring { rounds }
    }
}

impl<G> WelshPowell for G where G: AdjacencyList + AdjacencyTest {}
