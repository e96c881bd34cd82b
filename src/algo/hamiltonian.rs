/*!
# Hamiltonian Paths & Cycles

Searches a path visiting every vertex exactly once along directed routes.

- Graphs with at most [`DEFAULT_EXACT_LIMIT`] vertices are searched **exactly** by backtracking
  from every start vertex. Neighbors are tried in order of ascending degree, which tends to fill
  in hard-to-reach vertices early. The search stops at the first path visiting all vertices.
- Larger graphs use **Warnsdorff's rule** from a bounded number of start vertices: always move to
  the unvisited neighbor with the fewest unvisited onward options and give up at a dead end.
  This heuristic is incomplete: if it reports no path, a path may still exist.

A found path is classified as a cycle iff a route leads from its last vertex back to its first.
With [`HamiltonianSearch::require_cycle`] only paths that close into a cycle are accepted.
*/

use std::fmt::Display;

use itertools::Itertools;
use stream_bitset::prelude::*;
use tracing::{debug, instrument};

use super::*;

/// Largest number of vertices searched exactly
pub const DEFAULT_EXACT_LIMIT: NumNodes = 20;

/// Number of start vertices tried by the heuristic
pub const DEFAULT_HEURISTIC_STARTS: NumNodes = 64;

/// Method that produced a [`HamiltonianAnalysis`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HamiltonianMethod {
    /// Exhaustive backtracking; a missing path proves that none exists
    Exact,
    /// Warnsdorff heuristic; a missing path proves nothing
    Heuristic,
}

impl Display for HamiltonianMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HamiltonianMethod::Exact => write!(f, "exact backtracking"),
            HamiltonianMethod::Heuristic => write!(f, "Warnsdorff heuristic"),
        }
    }
}

/// Outcome of a Hamiltonian search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HamiltonianAnalysis {
    pub method: HamiltonianMethod,
    /// Vertices in visiting order, if a path was found
    pub path: Option<Vec<Node>>,
    /// *true* if the path can be closed into a cycle
    pub is_cycle: bool,
}

impl HamiltonianAnalysis {
    /// Returns *true* if the absence of a path is proven
    pub fn is_conclusive(&self) -> bool {
        self.path.is_some() || self.method == HamiltonianMethod::Exact
    }
}

/// Configurable Hamiltonian path search.
///
/// Create it with [`HamiltonianAnalyzer::hamiltonian`], adjust it with the setters and call
/// [`HamiltonianSearch::run`].
pub struct HamiltonianSearch<'a, G> {
    graph: &'a G,
    exact_limit: NumNodes,
    heuristic_starts: NumNodes,
    require_cycle: bool,
}

impl<'a, G> HamiltonianSearch<'a, G>
where
    G: AdjacencyList + AdjacencyTest,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            exact_limit: DEFAULT_EXACT_LIMIT,
            heuristic_starts: DEFAULT_HEURISTIC_STARTS,
            require_cycle: false,
        }
    }

    /// Sets the largest number of vertices for which the exact search is used
    pub fn set_exact_limit(&mut self, limit: NumNodes) {
        self.exact_limit = limit;
    }

    /// Sets the largest number of vertices for which the exact search is used
    pub fn exact_limit(mut self, limit: NumNodes) -> Self {
        self.set_exact_limit(limit);
        self
    }

    /// Sets the number of start vertices tried by the heuristic
    pub fn set_heuristic_starts(&mut self, starts: NumNodes) {
        self.heuristic_starts = starts;
    }

    /// Sets the number of start vertices tried by the heuristic
    pub fn heuristic_starts(mut self, starts: NumNodes) -> Self {
        self.set_heuristic_starts(starts);
        self
    }

    /// If set, only paths that close into a cycle are accepted
    pub fn set_require_cycle(&mut self, require: bool) {
        self.require_cycle = require;
    }

    /// If set, only paths that close into a cycle are accepted
    pub fn require_cycle(mut self, require: bool) -> Self {
        self.set_require_cycle(require);
        self
    }

    /// Runs the exact search or the heuristic depending on the size of the graph
    #[instrument(level = "debug", skip(self), fields(n = self.graph.number_of_nodes()))]
    pub fn run(&self) -> HamiltonianAnalysis {
        let candidates = self.candidates();

        let (method, path) = if self.graph.number_of_nodes() <= self.exact_limit {
            (
                HamiltonianMethod::Exact,
                self.graph
                    .vertices()
                    .find_map(|start| self.backtrack_from(start, &candidates)),
            )
        } else {
            (
                HamiltonianMethod::Heuristic,
                self.graph
                    .vertices()
                    .take(self.heuristic_starts as usize)
                    .find_map(|start| self.warnsdorff_from(start, &candidates)),
            )
        };

        let is_cycle = path.as_ref().is_some_and(|path| self.closes(path));
        debug!(%method, found = path.is_some(), is_cycle, "Hamiltonian search finished");

        HamiltonianAnalysis {
            method,
            path,
            is_cycle,
        }
    }

    /// Distinct out-neighbors of every vertex, by ascending degree
    fn candidates(&self) -> Vec<Vec<Node>> {
        let degree = self
            .graph
            .vertices()
            .map(|u| self.graph.distinct_degree_of(u))
            .collect_vec();

        self.graph
            .vertices()
            .map(|u| {
                self.graph
                    .neighbors_of_as_bitset(u)
                    .iter_set_bits()
                    .filter(|&v| v != u)
                    .sorted_by_key(|&v| degree[v as usize])
                    .collect()
            })
            .collect()
    }

    fn closes(&self, path: &[Node]) -> bool {
        match (path.first(), path.last()) {
            (Some(&first), Some(&last)) => self.graph.has_edge(last, first),
            _ => false,
        }
    }

    fn accepts(&self, path: &[Node]) -> bool {
        path.len() == self.graph.len() && (!self.require_cycle || self.closes(path))
    }

    /// Depth-first backtracking with an explicit stack of candidate cursors
    fn backtrack_from(&self, start: Node, candidates: &[Vec<Node>]) -> Option<Vec<Node>> {
        let mut visited = self.graph.vertex_bitset_unset();
        visited.set_bit(start);

        let mut path = vec![start];
        let mut cursors = vec![0usize];

        while let Some(&u) = path.last() {
            if self.accepts(&path) {
                return Some(path);
            }

            let depth = path.len() - 1;
            let options = &candidates[u as usize];
            if path.len() < self.graph.len() {
                if let Some(offset) = options[cursors[depth]..]
                    .iter()
                    .position(|&v| !visited.get_bit(v))
                {
                    let v = options[cursors[depth] + offset];
                    cursors[depth] += offset + 1;

                    visited.set_bit(v);
                    path.push(v);
                    cursors.push(0);
                    continue;
                }
            }

            visited.clear_bit(u);
            path.pop();
            cursors.pop();
        }

        None
    }

    /// Greedy walk always moving to the neighbor with the fewest unvisited onward options
    fn warnsdorff_from(&self, start: Node, candidates: &[Vec<Node>]) -> Option<Vec<Node>> {
        let mut visited = self.graph.vertex_bitset_unset();
        visited.set_bit(start);

        let mut path = vec![start];
        let mut u = start;

        loop {
            let next = candidates[u as usize]
                .iter()
                .copied()
                .filter(|&v| !visited.get_bit(v))
                .min_by_key(|&v| {
                    candidates[v as usize]
                        .iter()
                        .filter(|&&w| !visited.get_bit(w))
                        .count()
                });

            let Some(v) = next else {
                break;
            };
            visited.set_bit(v);
            path.push(v);
            u = v;
        }

        self.accepts(&path).then_some(path)
    }
}

/// Hamiltonian path search on route networks
pub trait HamiltonianAnalyzer: AdjacencyList + AdjacencyTest {
    /// Returns a search with default settings
    ///
    /// # Examples
    /// ```
    /// use routenet::{prelude::*, algo::*};
    ///
    /// let mut g = AdjList::new();
    /// for hub in 1..=3u32 {
    ///     g.add_vertex(hub).unwrap();
    /// }
    /// g.add_edge(&1, &2, 1, 0).unwrap();
    /// g.add_edge(&2, &3, 1, 0).unwrap();
    ///
    /// let analysis = g.hamiltonian().run();
    /// assert_eq!(analysis.path, Some(vec![0, 1, 2]));
    /// assert!(!analysis.is_cycle);
    /// ```
    fn hamiltonian(&self) -> HamiltonianSearch<'_, Self> {
        HamiltonianSearch::new(self)
    }
}

impl<G> HamiltonianAnalyzer for G where G: AdjacencyList + AdjacencyTest {}
