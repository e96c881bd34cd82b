/*!
# Analyses

The operations offered on a loaded route network. Each [`Analysis`] resolves the hubs it refers
to, runs the corresponding algorithm of [`crate::algo`] and renders its typed result as a
plain-text report. Analyses perform no IO; persisting and echoing reports is up to the caller
(see [`crate::report_log`]).

Negative outcomes (no route, no Eulerian trail, no Hamiltonian path) are part of the report.
Structural problems (an unknown hub, Prim on a disconnected network) are returned as errors.
*/

use itertools::Itertools;
use tracing::info;

use crate::{algo::*, config::AnalysisConfig, prelude::*};

const RULE: &str = "-------------------------------------";

/// One operation on a route network whose hubs are identified by values of type `T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis<T> {
    /// Summary line followed by the outgoing routes of every hub
    Overview,
    /// Cheapest route between two hubs (Dijkstra)
    ShortestPath { origin: T, destination: T },
    /// Maximum flow between two hubs (Edmonds–Karp)
    MaxFlow { source: T, sink: T },
    /// Minimum spanning tree; `None` picks the strategy matching the representation
    SpanningTree { strategy: Option<SpanningStrategy> },
    /// Conflict-free maintenance rounds (Welsh–Powell on the conflict graph)
    MaintenanceSchedule,
    /// Eulerian and Hamiltonian single-visit tours
    Inspection,
}

impl<T: Label> Analysis<T> {
    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Analysis::Overview => "overview",
            Analysis::ShortestPath { .. } => "shortest-path",
            Analysis::MaxFlow { .. } => "max-flow",
            Analysis::SpanningTree { .. } => "spanning-tree",
            Analysis::MaintenanceSchedule => "schedule",
            Analysis::Inspection => "inspect",
        }
    }

    /// Runs the analysis on `graph` and returns its report
    pub fn run<G: Graph<T>>(&self, graph: &G, config: &AnalysisConfig) -> Result<String> {
        info!(
            analysis = self.name(),
            n = graph.number_of_nodes(),
            m = graph.number_of_edges(),
            "running analysis"
        );

        match self {
            Analysis::Overview => Ok(overview_report(graph)),
            Analysis::ShortestPath {
                origin,
                destination,
            } => {
                let u = graph.try_node_of(origin)?;
                let v = graph.try_node_of(destination)?;
                Ok(shortest_path_report(graph, u, v, graph.cheapest_path(u, v)))
            }
            Analysis::MaxFlow { source, sink } => {
                let s = graph.try_node_of(source)?;
                let t = graph.try_node_of(sink)?;
                Ok(max_flow_report(graph, &graph.max_flow(s, t)))
            }
            Analysis::SpanningTree { strategy } => {
                let tree = graph.spanning_tree(*strategy)?;
                Ok(spanning_tree_report(graph, &tree))
            }
            Analysis::MaintenanceSchedule => {
                let conflicts = graph.conflict_graph()?;
                Ok(schedule_report(&conflicts, &conflicts.welsh_powell()))
            }
            Analysis::Inspection => {
                let euler = graph.eulerian(config.euler_strategy);
                let hamilton = graph
                    .hamiltonian()
                    .exact_limit(config.hamiltonian_exact_limit)
                    .heuristic_starts(config.hamiltonian_heuristic_starts)
                    .require_cycle(config.require_hamiltonian_cycle)
                    .run();

                Ok(format!(
                    "{}\n{}",
                    eulerian_report(graph, config.euler_strategy, &euler),
                    hamiltonian_report(graph, &hamilton, config.require_hamiltonian_cycle)
                ))
            }
        }
    }
}

/// Joins the values of the vertices in `nodes` with `separator`
fn join_values<T: Label, G: Labelled<T>>(graph: &G, nodes: &[Node], separator: &str) -> String {
    nodes.iter().map(|&u| graph.vertex(u)).join(separator)
}

fn overview_report<T: Label, G: Graph<T>>(graph: &G) -> String {
    format!(
        "Graph ({}): {} hubs, {} routes\n{}",
        graph.representation(),
        graph.number_of_nodes(),
        graph.number_of_edges(),
        graph.render()
    )
}

fn shortest_path_report<T: Label, G: Graph<T>>(
    graph: &G,
    origin: Node,
    destination: Node,
    path: Option<WeightedPath>,
) -> String {
    let (from, to) = (graph.vertex(origin), graph.vertex(destination));

    let mut out = String::from("--- Cheapest Route (Dijkstra) ---\n");
    match path {
        None => {
            out.push_str(&format!("No route found from {from} to {to}.\n"));
        }
        Some(path) => {
            out.push_str(&format!("Cheapest route from {from} to {to}:\n"));
            out.push_str(&format!("Total distance: {}\n", path.distance));
            out.push_str(&format!("Route: {}.\n", join_values(graph, &path.nodes, " - ")));
        }
    }
    out
}

fn max_flow_report<T: Label, G: Graph<T>>(graph: &G, flow: &MaxFlow) -> String {
    let mut out = String::from("--- Maximum Flow (Edmonds-Karp) ---\n");
    out.push_str(&format!(
        "Source: {}, Sink: {}\n",
        graph.vertex(flow.source),
        graph.vertex(flow.sink)
    ));
    out.push_str(&format!("Maximum total flow: {}\n", flow.value));
    out.push_str(&format!("Augmenting paths: {}\n", flow.augmentations));
    out.push('\n');

    out.push_str("Flow per route:\n");
    for (route, f) in &flow.route_flows {
        out.push_str(&format!(
            "Route ({} -> {}): flow = {} of {}\n",
            graph.vertex(route.origin),
            graph.vertex(route.destination),
            f,
            route.capacity
        ));
    }
    out
}

fn spanning_tree_report<T: Label, G: Graph<T>>(graph: &G, tree: &SpanningTree<G>) -> String {
    let mut out = format!("Running {}'s algorithm...\n", tree.strategy);

    out.push_str("\n--- Minimum Spanning Tree ---\n");
    for route in &tree.routes {
        out.push_str(&format!(
            "Origin: {} -> Destination: {} | Weight: {} | Capacity: {}\n",
            graph.vertex(route.origin),
            graph.vertex(route.destination),
            route.weight,
            route.capacity
        ));
    }
    out.push_str(&format!("Total weight: {}\n", tree.total_weight));

    if !tree.is_spanning(graph.number_of_nodes()) {
        out.push_str(&format!(
            "The network is not connected: this is a spanning forest of {} routes for {} hubs.\n",
            tree.routes.len(),
            graph.number_of_nodes()
        ));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

fn schedule_report<T: Label>(conflicts: &ConflictGraph<T>, coloring: &Coloring) -> String {
    let mut out = format!(
        " -> Conflicts mapped: {} maintenance tasks.\n",
        conflicts.number_of_nodes()
    );

    out.push_str("\n--- Welsh-Powell ---\n");
    out.push_str(&format!(
        "Maintenance rounds ({}):\n",
        coloring.number_of_rounds()
    ));
    for (i, round) in coloring.rounds.iter().enumerate() {
        out.push_str(&format!("[Round {}]:\n", i + 1));
        for &task in round {
            out.push_str(&format!("   - Maintenance on route: {}\n", conflicts.vertex(task)));
        }
        out.push('\n');
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

fn eulerian_report<T: Label, G: Graph<T>>(
    graph: &G,
    strategy: EulerStrategy,
    analysis: &EulerianAnalysis,
) -> String {
    let mut out = String::from("Route tour\n=== Eulerian path / circuit ===\n");

    match analysis {
        EulerianAnalysis::Infeasible(EulerObstruction::NoVertices) => {
            out.push_str("Empty graph. There is no Eulerian path or circuit.\n");
        }
        EulerianAnalysis::Infeasible(EulerObstruction::Disconnected) => {
            out.push_str("The routes are not connected. There is no Eulerian path or circuit.\n");
        }
        EulerianAnalysis::Infeasible(EulerObstruction::Imbalanced { unbalanced }) => {
            out.push_str(&format!(
                "There is no Eulerian path or circuit. Unbalanced hubs (out - in): {}\n",
                unbalanced
                    .iter()
                    .map(|&(u, excess)| format!("{} ({:+})", graph.vertex(u), excess))
                    .join(", ")
            ));
        }
        EulerianAnalysis::Circuit { trail } | EulerianAnalysis::Path { trail } => {
            if graph.is_singleton_graph() {
                out.push_str("The graph has no routes. There is a trivial Eulerian circuit.\n");
            } else {
                let kind = if matches!(analysis, EulerianAnalysis::Circuit { .. }) {
                    "CIRCUIT"
                } else {
                    "PATH"
                };
                out.push_str(&format!("An Eulerian {kind} exists.\n"));
                out.push_str(&format!("Eulerian trail ({strategy}):\n"));
                out.push_str(&format!("  {}\n", join_values(graph, trail, " -> ")));
            }
        }
    }
    out
}

fn hamiltonian_report<T: Label, G: Graph<T>>(
    graph: &G,
    analysis: &HamiltonianAnalysis,
    require_cycle: bool,
) -> String {
    let mut out = String::from("Hub tour\n=== Hamiltonian path / cycle ===\n");
    let wanted = if require_cycle { "cycle" } else { "path" };

    if graph.is_empty() {
        out.push_str("Empty graph.\n");
        return out;
    }

    let heuristic = analysis.method == HamiltonianMethod::Heuristic;
    if heuristic {
        out.push_str(&format!(
            "Graph with {} hubs: exact search is infeasible, using the {}.\n",
            graph.number_of_nodes(),
            analysis.method
        ));
    }

    match &analysis.path {
        Some(path) => {
            out.push_str(&format!(
                "Hamiltonian {wanted} found{}:\n",
                if heuristic { " (heuristic)" } else { "" }
            ));
            out.push_str(&format!("  {}\n", join_values(graph, path, " -> ")));
            if analysis.is_cycle {
                out.push_str("This path forms a Hamiltonian cycle.\n");
            }
        }
        None if heuristic => {
            out.push_str(&format!(
                "No Hamiltonian {wanted} found (heuristic). One may still exist.\n"
            ));
        }
        None => {
            out.push_str(&format!("No Hamiltonian {wanted} exists.\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hubs `1..=n` with the given routes `(origin, destination, weight, capacity)`
    fn network(
        representation: Representation,
        n: u32,
        routes: &[(u32, u32, Weight, Capacity)],
    ) -> AnyGraph<u32> {
        let mut graph = AnyGraph::new(representation, n);
        for hub in 1..=n {
            graph.add_vertex(hub).unwrap();
        }
        for &(u, v, w, c) in routes {
            graph.add_edge(&u, &v, w, c).unwrap();
        }
        graph
    }

    fn triangle(representation: Representation) -> AnyGraph<u32> {
        network(
            representation,
            3,
            &[(1, 2, 5, 10), (1, 3, 10, 5), (2, 3, 3, 4)],
        )
    }

    fn run(analysis: Analysis<u32>, graph: &AnyGraph<u32>) -> Result<String> {
        analysis.run(graph, &AnalysisConfig::default())
    }

    #[test]
    fn shortest_path() {
        for repr in [Representation::AdjacencyList, Representation::AdjacencyMatrix] {
            let graph = triangle(repr);
            let report = run(
                Analysis::ShortestPath {
                    origin: 1,
                    destination: 3,
                },
                &graph,
            )
            .unwrap();
            assert!(report.contains("Total distance: 8\n"));
            assert!(report.contains("Route: 1 - 2 - 3.\n"));

            let report = run(
                Analysis::ShortestPath {
                    origin: 3,
                    destination: 1,
                },
                &graph,
            )
            .unwrap();
            assert!(report.contains("No route found from 3 to 1."));
        }
    }

    #[test]
    fn report_lines_are_complete() {
        let graph = triangle(Representation::AdjacencyList);
        let report = run(
            Analysis::ShortestPath {
                origin: 1,
                destination: 3,
            },
            &graph,
        )
        .unwrap();
        assert_eq!(
            report,
            "--- Cheapest Route (Dijkstra) ---\n\
             Cheapest route from 1 to 3:\n\
             Total distance: 8\n\
             Route: 1 - 2 - 3.\n"
        );

        let report = run(Analysis::MaxFlow { source: 3, sink: 1 }, &graph).unwrap();
        assert_eq!(
            report,
            "--- Maximum Flow (Edmonds-Karp) ---\n\
             Source: 3, Sink: 1\n\
             Maximum total flow: 0\n\
             Augmenting paths: 0\n\
             \n\
             Flow per route:\n"
        );
    }

    #[test]
    fn unknown_hub_is_an_error() {
        let graph = triangle(Representation::AdjacencyList);
        let result = run(Analysis::MaxFlow { source: 1, sink: 9 }, &graph);
        assert!(matches!(result, Err(GraphError::VertexNotFound(v)) if v == "9"));
    }

    #[test]
    fn max_flow() {
        let graph = triangle(Representation::AdjacencyMatrix);
        let report = run(Analysis::MaxFlow { source: 1, sink: 3 }, &graph).unwrap();
        assert!(report.contains("Source: 1, Sink: 3\n"));
        assert!(report.contains("Maximum total flow: 9\n"));
        assert!(report.contains("Route (1 -> 2): flow = 4 of 10\n"));
        assert!(report.contains("Route (1 -> 3): flow = 5 of 5\n"));
        assert!(report.contains("Route (2 -> 3): flow = 4 of 4\n"));
    }

    #[test]
    fn spanning_tree() {
        let graph = network(
            Representation::AdjacencyList,
            3,
            &[
                (1, 2, 5, 0),
                (2, 1, 5, 0),
                (1, 3, 10, 0),
                (3, 1, 10, 0),
                (2, 3, 3, 0),
                (3, 2, 3, 0),
            ],
        );
        let report = run(Analysis::SpanningTree { strategy: None }, &graph).unwrap();
        assert!(report.starts_with("Running Prim's algorithm...\n"));
        assert!(report.contains("Origin: 1 -> Destination: 2 | Weight: 5 | Capacity: 0\n"));
        assert!(report.contains("Origin: 2 -> Destination: 3 | Weight: 3 | Capacity: 0\n"));
        assert!(report.contains("Total weight: 8\n"));
        assert!(!report.contains("forest"));
    }

    #[test]
    fn spanning_forest_and_disconnected_prim() {
        let graph = network(Representation::AdjacencyList, 3, &[(1, 2, 4, 0)]);

        let report = run(
            Analysis::SpanningTree {
                strategy: Some(SpanningStrategy::Kruskal),
            },
            &graph,
        )
        .unwrap();
        assert!(report.contains("spanning forest of 1 routes for 3 hubs"));

        assert!(matches!(
            run(Analysis::SpanningTree { strategy: None }, &graph),
            Err(GraphError::Disconnected { .. })
        ));
    }

    #[test]
    fn maintenance_schedule() {
        let graph = network(
            Representation::AdjacencyList,
            4,
            &[(1, 2, 1, 0), (1, 3, 1, 0), (4, 1, 1, 0)],
        );
        let report = run(Analysis::MaintenanceSchedule, &graph).unwrap();
        assert!(report.starts_with(" -> Conflicts mapped: 3 maintenance tasks.\n"));
        assert!(report.contains("Maintenance rounds (3):\n"));
        assert!(report.contains("[Round 3]:\n"));
        assert!(report.contains("   - Maintenance on route: 4-1\n"));
    }

    #[test]
    fn inspection() {
        let graph = network(
            Representation::AdjacencyMatrix,
            4,
            &[(1, 2, 1, 0), (2, 3, 1, 0), (3, 4, 1, 0), (4, 1, 1, 0)],
        );
        let report = run(Analysis::Inspection, &graph).unwrap();
        assert!(report.contains("An Eulerian CIRCUIT exists.\n"));
        assert!(report.contains("Eulerian trail (Hierholzer):\n  1 -> 2 -> 3 -> 4 -> 1\n"));
        assert!(report.contains("Hamiltonian path found:\n  1 -> 2 -> 3 -> 4\n"));
        assert!(report.contains("This path forms a Hamiltonian cycle.\n"));

        let config = AnalysisConfig {
            euler_strategy: EulerStrategy::Fleury,
            require_hamiltonian_cycle: true,
            ..Default::default()
        };
        let report = Analysis::Inspection.run(&graph, &config).unwrap();
        assert!(report.contains("Eulerian trail (Fleury):"));
        assert!(report.contains("Hamiltonian cycle found:"));
    }

    #[test]
    fn inspection_negative_outcomes() {
        let graph = network(
            Representation::AdjacencyList,
            3,
            &[(1, 2, 1, 0), (1, 3, 1, 0)],
        );
        let report = run(Analysis::Inspection, &graph).unwrap();
        assert!(report.contains("Unbalanced hubs (out - in): 1 (+2), 2 (-1), 3 (-1)"));
        assert!(report.contains("No Hamiltonian path exists."));

        let graph = network(Representation::AdjacencyList, 2, &[]);
        let report = run(Analysis::Inspection, &graph).unwrap();
        assert!(report.contains("trivial Eulerian circuit"));
    }

    #[test]
    fn overview() {
        let graph = triangle(Representation::AdjacencyList);
        let report = run(Analysis::Overview, &graph).unwrap();
        assert_eq!(
            report,
            "Graph (adjacency list): 3 hubs, 3 routes\n\
             1: -> 2 (weight: 5, capacity: 10) -> 3 (weight: 10, capacity: 5)\n\
             2: -> 3 (weight: 3, capacity: 4)\n\
             3:\n"
        );
    }
}
