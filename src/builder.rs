use super::{Crc32Hasher, FnHasher, Node, Position, Ring, RingHasher, SharedRing};

/// Ring builder.
///
/// ```
/// use crcring::RingBuilder;
///
/// let ring = RingBuilder::<String>::new(100)
///     .with_nodes(["cache-1", "cache-2", "cache-3"])
///     .build();
/// assert!(ring.get("user:42").is_some());
/// ```
pub struct RingBuilder<N: Node, H: RingHasher = Crc32Hasher> {
    replicas: usize,
    nodes: Vec<N>,
    hasher: H,
}

impl<N: Node> RingBuilder<N> {
    /// Create new ring builder, with `replicas` virtual nodes per node.
    pub fn new(replicas: usize) -> Self {
        Self {
            replicas,
            nodes: Vec::new(),
            hasher: Crc32Hasher,
        }
    }
}

impl<N: Node, H: RingHasher> RingBuilder<N, H> {
    /// Nodes to add to the ring once it is built.
    pub fn with_nodes<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<N>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Transform the builder into one with a different hasher.
    pub fn with_hasher<CustomH: RingHasher>(self, hasher: CustomH) -> RingBuilder<N, CustomH> {
        RingBuilder {
            replicas: self.replicas,
            nodes: self.nodes,
            hasher,
        }
    }

    /// Transform the builder into one hashing with the given function.
    pub fn with_hash_fn<F>(self, f: F) -> RingBuilder<N, FnHasher<F>>
    where
        F: Fn(&[u8]) -> Position,
    {
        self.with_hasher(FnHasher::new(f))
    }

    /// Build the ring.
    pub fn build(self) -> Ring<N, H> {
        let mut ring = Ring::with_hasher(self.replicas, self.hasher);
        if !self.nodes.is_empty() {
            ring.add(self.nodes);
        }
        ring
    }

    /// Build the ring, wrapped for concurrent use.
    pub fn build_shared(self) -> SharedRing<N, H> {
        SharedRing::from(self.build())
    }
}
