/*!
# Node Representation

Hubs carry an arbitrary domain value (see [`Vertex`](crate::vertex::Vertex)), but every graph
additionally assigns each hub a dense index `Node = u32` in insertion order.
All algorithms operate on these indices and only translate back to domain values when a
result is rendered.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Nodes are dense indices from `0` to `n - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need `Vec<Option<Node>>` for predecessor arrays. This instead uses the
/// `NonZero`-Wrapper to assign a constant value as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_roundtrip() {
        assert_eq!(OptionalNode::new(INVALID_NODE), None);
        for u in [0, 1, 17, INVALID_NODE - 1] {
            assert_eq!(OptionalNode::new(u).map(|x| x.get()), Some(u));
        }
        assert_eq!(
            std::mem::size_of::<Option<OptionalNode>>(),
            std::mem::size_of::<Node>()
        );
    }
}
