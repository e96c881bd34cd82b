/*!
# Graph Representations

Two storage backends share one capability contract (see [`crate::ops`]):

- [`AdjList`] stores the outgoing routes of every vertex in insertion order.
  Vertex and route insertion are O(1); parallel routes are kept.
- [`AdjMatrix`] stores weights and capacities in two fixed-capacity `V x V` matrices.
  Route lookups are O(1), vertex lookups by value are O(V) and each ordered pair holds at most
  one route.

[`AnyGraph`] is the tagged variant over both and is what the loader produces.
Which backend to use is decided once, from the edge density of the input
(see [`Representation::for_density`]).
*/

use std::{fmt::Display, str::FromStr};

use crate::prelude::*;

mod any;
mod list;
mod matrix;

pub use any::*;
pub use list::*;
pub use matrix::*;

/// Density at or above which the matrix representation is chosen
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.30;

/// Tag naming the storage backend of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    #[default]
    AdjacencyList,
    AdjacencyMatrix,
}

impl Representation {
    /// Picks the representation for a graph with `n` vertices and `m` routes:
    /// the list below `threshold`, the matrix at or above it.
    /// Graphs with less than two vertices always use the list.
    pub fn for_density(n: NumNodes, m: NumEdges, threshold: f64) -> Self {
        match density(n, m) {
            Some(d) if d >= threshold => Representation::AdjacencyMatrix,
            _ => Representation::AdjacencyList,
        }
    }
}

/// Returns `m / (n * (n - 1))` or `None` if `n < 2`
pub fn density(n: NumNodes, m: NumEdges) -> Option<f64> {
    (n >= 2).then(|| m as f64 / (n as f64 * (n as f64 - 1.0)))
}

impl FromStr for Representation {
    type Err = GraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "adjacency-list" => Ok(Representation::AdjacencyList),
            "matrix" | "adjacency-matrix" => Ok(Representation::AdjacencyMatrix),
            _ => Err(GraphError::UnknownRepresentation(s.to_string())),
        }
    }
}

impl Display for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Representation::AdjacencyList => write!(f, "adjacency list"),
            Representation::AdjacencyMatrix => write!(f, "adjacency matrix"),
        }
    }
}

pub(crate) mod macros {
    macro_rules! impl_common_graph_ops {
        ($struct:ident => $repr:expr) => {
            impl<T: Label> GraphType for $struct<T> {
                fn representation(&self) -> Representation {
                    $repr
                }
            }

            impl<T: Label> GraphNodeOrder for $struct<T> {
                fn number_of_nodes(&self) -> NumNodes {
                    self.vertices.len() as NumNodes
                }
            }

            impl<T: Label> GraphEdgeOrder for $struct<T> {
                fn number_of_edges(&self) -> NumEdges {
                    self.num_edges
                }
            }

            impl<T: Label> $struct<T> {
                /// Fails with [`GraphError::VertexNotFound`] if `u` is not a node of the graph
                fn check_node(&self, u: Node) -> Result<()> {
                    if u < self.number_of_nodes() {
                        Ok(())
                    } else {
                        Err(GraphError::vertex_not_found(format!("#{u}")))
                    }
                }
            }
        };
    }

    pub(super) use impl_common_graph_ops;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_representation() {
        assert_eq!(
            "list".parse::<Representation>().unwrap(),
            Representation::AdjacencyList
        );
        assert_eq!(
            "Adjacency-Matrix".parse::<Representation>().unwrap(),
            Representation::AdjacencyMatrix
        );
        assert_eq!(
            " MATRIX ".parse::<Representation>().unwrap(),
            Representation::AdjacencyMatrix
        );
        assert!(matches!(
            "csr".parse::<Representation>(),
            Err(GraphError::UnknownRepresentation(s)) if s == "csr"
        ));
    }

    #[test]
    fn density_rule() {
        // 10 vertices allow 90 directed edges
        assert_eq!(
            Representation::for_density(10, 26, DEFAULT_DENSITY_THRESHOLD),
            Representation::AdjacencyList
        );
        assert_eq!(
            Representation::for_density(10, 27, DEFAULT_DENSITY_THRESHOLD),
            Representation::AdjacencyMatrix
        );
        assert_eq!(
            Representation::for_density(1, 5, DEFAULT_DENSITY_THRESHOLD),
            Representation::AdjacencyList
        );
        assert_eq!(
            Representation::for_density(0, 0, DEFAULT_DENSITY_THRESHOLD),
            Representation::AdjacencyList
        );
        assert_eq!(density(3, 3), Some(0.5));
    }
}
