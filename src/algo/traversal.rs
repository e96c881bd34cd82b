/*!
Graph traversal and the breadth-first path finder.

This module provides:
- A generic breadth-first traversal iterator, with and without predecessor tracking.
- An edge filter on every traversal, so that searches can be restricted to admissible edges
  (e.g. edges with positive residual capacity during max-flow computations).
- A high-level `Traversal` trait that exposes traversal algorithms
  directly as methods on graph data structures.
*/

use super::*;
use std::{collections::VecDeque, marker::PhantomData};

/// Abstraction for items yielded by a traversal iterator.
///
/// Two implementations are provided:
/// - [`Node`]: stores only the node (no predecessor information).
/// - [`PredecessorOfNode`]: stores `(predecessor, node)` pairs.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of the node, if known.
    fn predecessor(&self) -> Option<Node>;

    /// Returns both predecessor and node as a tuple.
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }

    fn new_without_predecessor(item: Node) -> Self {
        item
    }

    fn item(&self) -> Node {
        *self
    }

    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// A traversal item that records the predecessor of a node.
/// The start node is its own predecessor.
pub type PredecessorOfNode = (Node, Node);

impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }

    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }

    fn item(&self) -> Node {
        self.1
    }

    fn predecessor(&self) -> Option<Node> {
        (self.0 != self.1).then_some(self.0)
    }
}

/// Frontier of a traversal
pub trait NodeSequencer<T> {
    /// Creates a new sequencer initialized with a single element.
    fn init(u: T) -> Self;

    /// Pushes an element into the sequencer.
    fn push(&mut self, item: T);

    /// Removes and returns the next element to visit.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of elements currently stored.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Filter type of a traversal that takes every edge
pub type AdmitAll = fn(Node, Node) -> bool;

fn admit_all(_: Node, _: Node) -> bool {
    true
}

/// Generic breadth-first traversal iterator.
///
/// Maintains a queue as frontier, a set of visited nodes and an edge filter.
/// An edge `(u, v)` is only followed if the filter admits it. Every node is visited at most once.
pub struct TraversalSearch<'a, G, S, I, F = AdmitAll>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    F: FnMut(Node, Node) -> bool,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    stop_at: Option<Node>,
    admit: F,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;

/// A BFS traversal iterator that records predecessor information.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode>;

impl<G, S, I, F> Iterator for TraversalSearch<'_, G, S, I, F>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    F: FnMut(Node, Node) -> bool,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.get_bit(v) && (self.admit)(u, v) {
                    self.sequencer.push(I::new_with_predecessor(u, v));
                    self.visited.set_bit(v);
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(self.graph.len() - self.visited.cardinality() as usize + self.sequencer.cardinality()),
        )
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start` that follows every edge.
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut visited = graph.vertex_bitset_unset();
        visited.set_bit(start);
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            admit: admit_all,
            _item: PhantomData,
        }
    }
}

impl<'a, G, S, I, F> TraversalSearch<'a, G, S, I, F>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    F: FnMut(Node, Node) -> bool,
{
    /// Restricts the traversal to edges `(u, v)` for which `admit(u, v)` holds.
    ///
    /// # Warning
    /// Should be called directly after the constructor; edges already pushed are not re-checked.
    pub fn with_edge_filter<P>(self, admit: P) -> TraversalSearch<'a, G, S, I, P>
    where
        P: FnMut(Node, Node) -> bool,
    {
        TraversalSearch {
            graph: self.graph,
            visited: self.visited,
            sequencer: self.sequencer,
            stop_at: self.stop_at,
            admit,
            _item: PhantomData,
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Consumes the traversal and returns the number of visited nodes (including the start)
    pub fn count_reachable(self) -> NumNodes {
        self.count() as NumNodes
    }
}

impl<'a, G, S, F> TraversalSearch<'a, G, S, PredecessorOfNode, F>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
    F: FnMut(Node, Node) -> bool,
{
    /// Consumes the traversal until `target` is visited and returns the edges on the
    /// implied tree path from the start to `target`, or `None` if `target` is never visited.
    pub fn path_to(mut self, target: Node) -> Option<Vec<Edge>> {
        let mut parent: Vec<Option<OptionalNode>> = vec![None; self.graph.len()];

        for item in self.by_ref() {
            let (pred, u) = item.predecessor_with_item();
            parent[u as usize] = pred.and_then(OptionalNode::new);

            if u != target {
                continue;
            }

            let mut path = Vec::new();
            let mut v = u;
            while let Some(p) = parent[v as usize] {
                path.push(Edge(p.get(), v));
                v = p.get();
            }
            path.reverse();
            return Some(path);
        }

        None
    }
}

/// Provides convenient traversal methods directly on graphs
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Returns the number of nodes reachable from `start` (including `start`)
    fn number_of_reachable_nodes(&self, start: Node) -> NumNodes {
        self.bfs(start).count_reachable()
    }

    /// Computes a path with the **fewest edges** from `origin` to `destination` that only uses
    /// edges `(u, v)` admitted by `admit`.
    ///
    /// - Returns `Some(edges)` in travel order if `destination` is reachable.
    ///   If `origin == destination`, the path is empty.
    /// - Returns `None` otherwise.
    ///
    /// # Examples
    /// ```
    /// use routenet::{prelude::*, algo::*};
    ///
    /// let mut g = AdjList::new();
    /// for hub in 0..3u32 {
    ///     g.add_vertex(hub).unwrap();
    /// }
    /// g.add_edge(&0, &1, 1, 0).unwrap();
    /// g.add_edge(&1, &2, 1, 0).unwrap();
    /// g.add_edge(&0, &2, 1, 0).unwrap();
    ///
    /// assert_eq!(g.shortest_path_where(0, 2, |_, _| true), Some(vec![Edge(0, 2)]));
    /// assert_eq!(
    ///     g.shortest_path_where(0, 2, |u, v| Edge(u, v) != Edge(0, 2)),
    ///     Some(vec![Edge(0, 1), Edge(1, 2)])
    /// );
    /// ```
    fn shortest_path_where<F>(&self, origin: Node, destination: Node, admit: F) -> Option<Vec<Edge>>
    where
        F: FnMut(Node, Node) -> bool,
    {
        self.bfs_with_predecessor(origin)
            .with_edge_filter(admit)
            .stop_at(destination)
            .path_to(destination)
    }

    /// Computes a path with the fewest edges from `origin` to `destination`,
    /// see [`Traversal::shortest_path_where`].
    fn shortest_path(&self, origin: Node, destination: Node) -> Option<Vec<Edge>> {
        self.shortest_path_where(origin, destination, admit_all)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}
