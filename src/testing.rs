/// Every representation should fulfil the same contract for `GraphNew`, `GraphEditing`,
/// `AdjacencyList`, `RouteList` and `AdjacencyTest`
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{prelude::*, testing::test_graph_ops};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use stream_bitset::prelude::*;
            use itertools::Itertools;

            /// Creates a list of at most `m_ub` random routes for nodes `0..n`, at most one per
            /// ordered pair
            fn random_routes<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<Route> {
                let mut routes = (0..m_ub)
                    .map(|_| {
                        Route::new(
                            rng.random_range(0..n),
                            rng.random_range(0..n),
                            rng.random_range(0..100),
                            rng.random_range(0..100),
                        )
                    })
                    .collect_vec();
                routes.sort_unstable_by_key(|r| (r.origin, r.destination));
                routes.dedup_by_key(|r| (r.origin, r.destination));

                routes
            }

            /// Creates a graph holding hubs `100, 101, ...` and the given routes
            fn build(n: NumNodes, routes: &[Route]) -> $graph<u32> {
                let mut graph = <$graph<u32>>::with_capacity(n);
                for u in 0..n {
                    assert_eq!(graph.add_vertex(100 + u).unwrap(), u);
                }
                for &route in routes {
                    graph.add_route(route).unwrap();
                }
                graph
            }

            $(
                test_graph_ops!($graph: $trait);
            )*
        }
    };
    ($graph:ident: GraphNew) => {
        #[test]
        fn graph_new() {
            for n in [0 as NumNodes, 1, 10, 49] {
                let graph = <$graph<u32>>::with_capacity(n);

                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), 0);
                assert!(graph.is_empty());
                assert_eq!(graph.empty_like().number_of_nodes(), 0);
            }
        }
    };
    ($graph:ident: GraphEditing) => {
        #[test]
        fn graph_editing() {
            let n = 20;
            let mut graph = build(n, &[]);

            assert_eq!(graph.number_of_nodes(), n);
            assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());

            // re-adding a hub returns its index
            assert_eq!(graph.add_vertex(107).unwrap(), 7);
            assert_eq!(graph.number_of_nodes(), n);

            for u in graph.vertices_range() {
                assert_eq!(*graph.vertex(u).value(), 100 + u);
                assert_eq!(graph.node_of(&(100 + u)), Some(u));
            }
            assert_eq!(graph.node_of(&99), None);
            assert!(matches!(graph.try_node_of(&99), Err(GraphError::VertexNotFound(_))));

            assert!(matches!(
                graph.add_route(Route::unit(0, n)),
                Err(GraphError::VertexNotFound(_))
            ));
            assert!(matches!(
                graph.add_edge(&100, &5, 1, 1),
                Err(GraphError::VertexNotFound(_))
            ));
            assert_eq!(graph.number_of_edges(), 0);

            graph.add_edge(&100, &105, 3, 4).unwrap();
            assert_eq!(graph.route_between(0, 5), Some(Route::new(0, 5, 3, 4)));
        }
    };
    ($graph:ident: AdjacencyList) => {
        #[test]
        fn adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5] {
                    let routes = random_routes(rng, n, m_ub as NumEdges);
                    let graph = build(n, &routes);

                    let mut adj = vec![NodeBitSet::new(n); n as usize];
                    for r in &routes {
                        adj[r.origin as usize].set_bit(r.destination);
                    }

                    for u in graph.vertices_range() {
                        assert_eq!(graph.neighbors_of_as_bitset(u), adj[u as usize]);
                        assert_eq!(graph.degree_of(u), adj[u as usize].cardinality());
                        assert_eq!(graph.distinct_degree_of(u), graph.degree_of(u));
                    }

                    assert_eq!(
                        graph.routes().map(|r| r.edge()).sorted().collect_vec(),
                        routes.iter().map(|r| r.edge()).collect_vec()
                    );
                }
            }
        }
    };
    ($graph:ident: RouteList) => {
        #[test]
        fn route_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [10 as NumNodes, 30] {
                let routes = random_routes(rng, n, 4 * n as NumEdges);
                let graph = build(n, &routes);

                assert_eq!(graph.number_of_edges() as usize, routes.len());

                let mut stored = graph.routes().collect_vec();
                stored.sort_unstable_by_key(|r| (r.origin, r.destination));
                assert_eq!(stored, routes);

                let mut in_degrees = vec![0; n as usize];
                for r in &routes {
                    in_degrees[r.destination as usize] += 1;
                }
                assert_eq!(graph.in_degrees(), in_degrees);

                for u in graph.vertices_range() {
                    assert!(graph.routes_of(u).all(|r| r.origin == u));
                }
            }
        }
    };
    ($graph:ident: AdjacencyTest) => {
        #[test]
        fn adjacency_test() {
            let rng = &mut Pcg64Mcg::seed_from_u64(7);

            let n = 25;
            let routes = random_routes(rng, n, 3 * n as NumEdges);
            let graph = build(n, &routes);

            for u in 0..n {
                for v in 0..n {
                    let expected = routes
                        .iter()
                        .find(|r| r.origin == u && r.destination == v)
                        .copied();

                    assert_eq!(graph.route_between(u, v), expected);
                    assert_eq!(graph.has_edge(u, v), expected.is_some());
                    assert_eq!(graph.weight_of(u, v), expected.map(|r| r.weight));
                    assert_eq!(graph.capacity_of(u, v), expected.map(|r| r.capacity));
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
