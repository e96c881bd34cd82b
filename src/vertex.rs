/*!
# Vertex Values

A [`Vertex`] wraps the domain value of a hub. Two vertices are equal iff their wrapped values
are equal, and a graph never stores two vertices with equal value. Vertices are immutable once
created: graphs hand out shared references only.
*/

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Requirements on values that identify hubs
pub trait Label: Clone + Eq + Hash + Display + Debug {}

impl<T> Label for T where T: Clone + Eq + Hash + Display + Debug {}

/// Immutable wrapper around the domain value of a hub
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex<T>(T);

impl<T> Vertex<T> {
    /// Wraps `value`
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns a reference to the wrapped value
    pub fn value(&self) -> &T {
        &self.0
    }

    /// Consumes the vertex and returns the wrapped value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Vertex<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Display> Display for Vertex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashSet;

    #[test]
    fn equality_follows_value() {
        assert_eq!(Vertex::new(3u32), Vertex::from(3u32));
        assert_ne!(Vertex::new("a"), Vertex::new("b"));

        let set: FxHashSet<_> = [Vertex::new(1), Vertex::new(2), Vertex::new(1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_is_transparent() {
        assert_eq!(Vertex::new("Hub-7").to_string(), "Hub-7");
        assert_eq!(*Vertex::new(42).value(), 42);
        assert_eq!(Vertex::new(42).into_inner(), 42);
    }
}
