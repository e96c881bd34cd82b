//! # Route List
//!
//! The route list format consists of a header line `N M` followed by `M` lines
//! `u v weight capacity`, each describing a route from hub `u` to hub `v` (both in `1..=N`).
//! Empty lines and lines starting with the comment identifier are skipped.
//!
//! All fields are non-negative integers; in particular, negative weights are rejected here.
//! Weights are bounded by [`MAX_ROUTE_WEIGHT`].

use std::io::{ErrorKind, Lines};

use tracing::{debug, warn};

use super::*;

/// Default limit on the number of hubs announced by a header
pub const DEFAULT_MAX_HUBS: NumNodes = 1 << 20;

/// Default limit on the number of hubs stored in an adjacency matrix (`n * n` cells)
pub const DEFAULT_MAX_MATRIX_HUBS: NumNodes = 1 << 12;

/// A GraphReader for the route list format.
///
/// The representation of the resulting graph is picked by the density rule (see
/// [`Representation::for_density`]) unless set explicitly.
///
/// Nothing is allocated from the header alone: all routes are read and validated before the
/// graph is built, and headers announcing more than `max_hubs` hubs are rejected.
/// Graphs with more than `max_matrix_hubs` hubs never use the matrix representation.
#[derive(Debug, Clone)]
pub struct RouteListReader {
    representation: Option<Representation>,
    density_threshold: f64,
    max_hubs: NumNodes,
    max_matrix_hubs: NumNodes,
    comment_identifier: String,
}

impl Default for RouteListReader {
    fn default() -> Self {
        Self {
            representation: None,
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            max_hubs: DEFAULT_MAX_HUBS,
            max_matrix_hubs: DEFAULT_MAX_MATRIX_HUBS,
            comment_identifier: "#".to_string(),
        }
    }
}

impl RouteListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the representation of the loaded graph (`None` applies the density rule)
    pub fn representation(mut self, representation: Option<Representation>) -> Self {
        self.representation = representation;
        self
    }

    /// Updates the density at or above which the matrix representation is chosen
    pub fn density_threshold(mut self, threshold: f64) -> Self {
        self.density_threshold = threshold;
        self
    }

    /// Updates the largest number of hubs a header may announce
    pub fn max_hubs(mut self, limit: NumNodes) -> Self {
        self.max_hubs = limit;
        self
    }

    /// Updates the largest number of hubs stored in an adjacency matrix
    pub fn max_matrix_hubs(mut self, limit: NumNodes) -> Self {
        self.max_matrix_hubs = limit;
        self
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> Self {
        self.comment_identifier = c.into();
        self
    }

    /// Applies the override or the density rule, keeping matrices within `max_matrix_hubs`
    fn pick_representation(&self, n: NumNodes, m: NumEdges) -> Result<Representation> {
        match self.representation {
            Some(Representation::AdjacencyMatrix) => {
                raise_error_unless!(
                    n <= self.max_matrix_hubs,
                    ErrorKind::InvalidData,
                    format!(
                        "{n} hubs exceed the adjacency matrix limit of {}",
                        self.max_matrix_hubs
                    )
                );
                Ok(Representation::AdjacencyMatrix)
            }
            Some(representation) => Ok(representation),
            None => match Representation::for_density(n, m, self.density_threshold) {
                Representation::AdjacencyMatrix if n > self.max_matrix_hubs => {
                    warn!(
                        n,
                        limit = self.max_matrix_hubs,
                        "too many hubs for an adjacency matrix, using an adjacency list"
                    );
                    Ok(Representation::AdjacencyList)
                }
                representation => Ok(representation),
            },
        }
    }
}

impl GraphReader<AnyGraph<Node>> for RouteListReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<AnyGraph<Node>> {
        let mut lines = ContentLines::new(reader, &self.comment_identifier);

        let Some((line_no, header)) = lines.next_line()? else {
            return Err(io_error!(ErrorKind::InvalidData, "header `N M` not found").into());
        };
        let mut parts = header.split_whitespace();
        let n: NumNodes = parse_next_value!(parts, "number of hubs", line_no);
        let m: NumEdges = parse_next_value!(parts, "number of routes", line_no);

        raise_error_unless!(
            n <= self.max_hubs,
            ErrorKind::InvalidData,
            format!("line {line_no}: {n} hubs exceed the limit of {}", self.max_hubs)
        );

        let mut routes = Vec::new();
        for _ in 0..m {
            let Some((line_no, line)) = lines.next_line()? else {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("expected {m} routes, but the input ended early")
                )
                .into());
            };

            let mut parts = line.split_whitespace();
            let origin: Node = parse_next_value!(parts, "origin", line_no);
            let destination: Node = parse_next_value!(parts, "destination", line_no);
            let weight: Weight = parse_next_value!(parts, "weight", line_no);
            let capacity: Capacity = parse_next_value!(parts, "capacity", line_no);

            for hub in [origin, destination] {
                raise_error_unless!(
                    (1..=n).contains(&hub),
                    ErrorKind::InvalidData,
                    format!("line {line_no}: hub {hub} is not in 1..={n}")
                );
            }
            raise_error_unless!(
                weight <= MAX_ROUTE_WEIGHT,
                ErrorKind::InvalidData,
                format!("line {line_no}: weight {weight} exceeds {MAX_ROUTE_WEIGHT}")
            );

            routes.push(Route::new(origin - 1, destination - 1, weight, capacity));
        }

        if let Some((line_no, _)) = lines.next_line()? {
            warn!(line_no, "ignoring content after the last route");
        }

        let representation = self.pick_representation(n, m)?;
        debug!(n, m, %representation, "building route network");

        let mut graph = AnyGraph::new(representation, n);
        for hub in 1..=n {
            graph.add_vertex(hub)?;
        }
        for route in routes {
            graph.add_route(route)?;
        }

        Ok(graph)
    }
}

/// Iterates over the non-empty, non-comment lines of a reader together with their line numbers
struct ContentLines<'a, R> {
    lines: Lines<R>,
    line_no: usize,
    comment_identifier: &'a str,
}

impl<'a, R: BufRead> ContentLines<'a, R> {
    fn new(reader: R, comment_identifier: &'a str) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            comment_identifier,
        }
    }

    /// Returns the next content line (1-indexed line number) or propagates an IO error
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty()
                || (!self.comment_identifier.is_empty()
                    && trimmed.starts_with(self.comment_identifier))
            {
                continue;
            }
            return Ok(Some((self.line_no, trimmed.to_string())));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    const TRIANGLE: &str = "3 3\n1 2 5 10\n1 3 10 5\n2 3 3 4\n";

    fn read(input: &str) -> Result<AnyGraph<Node>> {
        RouteListReader::new().try_read_graph(input.as_bytes())
    }

    fn assert_invalid_data(result: Result<AnyGraph<Node>>) {
        match result {
            Err(GraphError::Io(err)) => assert_eq!(err.kind(), ErrorKind::InvalidData),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn read_triangle() {
        let graph = read(TRIANGLE).unwrap();

        // density 3 / 6 >= 0.3
        assert_eq!(graph.representation(), Representation::AdjacencyMatrix);
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(
            graph.labelled_vertices().map(|v| *v.value()).collect_vec(),
            vec![1, 2, 3]
        );
        assert_eq!(graph.route_between(0, 2), Some(Route::new(0, 2, 10, 5)));
    }

    #[test]
    fn representation_override_and_threshold() {
        let graph = RouteListReader::new()
            .representation(Some(Representation::AdjacencyList))
            .try_read_graph(TRIANGLE.as_bytes())
            .unwrap();
        assert_eq!(graph.representation(), Representation::AdjacencyList);

        let graph = RouteListReader::new()
            .density_threshold(0.9)
            .try_read_graph(TRIANGLE.as_bytes())
            .unwrap();
        assert_eq!(graph.representation(), Representation::AdjacencyList);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let graph = read("# hubs and routes\n\n2 1\n\n  1 2 7 1  \n").unwrap();
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.weight_of(0, 1), Some(7));

        let graph = RouteListReader::new()
            .comment_identifier("c")
            .try_read_graph("c comment\n2 0\n".as_bytes())
            .unwrap();
        assert_eq!(graph.number_of_nodes(), 2);
    }

    #[test]
    fn malformed_input() {
        assert_invalid_data(read(""));
        assert_invalid_data(read("3\n"));
        assert_invalid_data(read("3 2\n1 2 1 1\n"));
        assert_invalid_data(read("3 1\n1 2 -4 1\n"));
        assert_invalid_data(read("3 1\n1 2 x 1\n"));
        assert_invalid_data(read("3 1\n1 2 1\n"));
        assert_invalid_data(read("3 1\n0 2 1 1\n"));
        assert_invalid_data(read("3 1\n1 4 1 1\n"));
        assert_invalid_data(read("3 1\n1 2 4294967296 1\n"));
        assert_invalid_data(read("4000000000 0\n"));
        assert_invalid_data(read("70000 1500000000\n1 2 1 1\n"));
    }

    #[test]
    fn size_limits() {
        assert_eq!(read("3 1\n1 2 4294967295 1\n").unwrap().weight_of(0, 1), Some(4294967295));

        assert_invalid_data(
            RouteListReader::new()
                .max_hubs(2)
                .try_read_graph(TRIANGLE.as_bytes()),
        );

        // dense, but too large for a matrix
        let reader = RouteListReader::new().max_matrix_hubs(2);
        let graph = reader.clone().try_read_graph(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(graph.representation(), Representation::AdjacencyList);
        assert_eq!(graph.number_of_edges(), 3);

        assert_invalid_data(
            reader
                .representation(Some(Representation::AdjacencyMatrix))
                .try_read_graph(TRIANGLE.as_bytes()),
        );
    }

    #[test]
    fn trailing_lines_are_ignored() {
        let graph = read("2 1\n1 2 1 1\n2 1 1 1\n").unwrap();
        assert_eq!(graph.number_of_edges(), 1);
    }
}
