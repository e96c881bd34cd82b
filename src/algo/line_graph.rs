/*!
# Conflict Graphs

The conflict graph (line graph) of a route network has one vertex per route; two of them are
adjacent iff the underlying routes share at least one hub. Routes adjacent in the conflict graph
cannot be closed for maintenance at the same time.
*/

use std::fmt::Display;

use super::*;

/// Identifies one route of a base graph by its position in route order and its endpoint values.
///
/// The position keeps parallel routes apart even though they render identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId<T> {
    pub index: usize,
    pub origin: T,
    pub destination: T,
}

impl<T: Display> Display for RouteId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.origin, self.destination)
    }
}

/// Conflict graphs are always stored as matrices with one slot per base route
pub type ConflictGraph<T> = AdjMatrix<RouteId<T>>;

/// Builds the conflict graph of a route network
pub trait LineGraph<T: Label>: Graph<T> {
    /// Creates the conflict graph: vertex `i` stands for the `i`-th route in route order.
    /// Conflicts are stored in both directions with weight `1` and capacity `0`.
    fn conflict_graph(&self) -> Result<ConflictGraph<T>> {
        let routes: Vec<Route> = self.routes().collect();
        let mut conflicts = ConflictGraph::with_capacity(routes.len() as NumNodes);

        for (index, route) in routes.iter().enumerate() {
            conflicts.add_vertex(RouteId {
                index,
                origin: self.vertex(route.origin).value().clone(),
                destination: self.vertex(route.destination).value().clone(),
            })?;
        }

        for (i, a) in routes.iter().enumerate() {
            for (j, b) in routes.iter().enumerate().skip(i + 1) {
                if a.edge().shares_endpoint_with(&b.edge()) {
                    let (i, j) = (i as Node, j as Node);
                    conflicts.add_route(Route::unit(i, j))?;
                    conflicts.add_route(Route::unit(j, i))?;
                }
            }
        }

        Ok(conflicts)
    }
}

impl<T: Label, G: Graph<T>> LineGraph<T> for G {}
