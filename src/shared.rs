use {
    super::{Crc32Hasher, Node, Position, Ring, RingHasher, RingResult},
    parking_lot::{RwLock, RwLockReadGuard},
};

/// Ring that can be shared between threads.
///
/// Lookups take a shared lock, topology changes an exclusive one, so a lookup
/// never observes a partially applied `add` or `remove`.
pub struct SharedRing<N: Node, H: RingHasher = Crc32Hasher> {
    inner: RwLock<Ring<N, H>>,
}

impl<N: Node> SharedRing<N> {
    /// Creates an empty ring using the default (CRC32) hasher.
    pub fn new(replicas: usize) -> Self {
        Self::from(Ring::new(replicas))
    }
}

impl<N: Node, H: RingHasher> From<Ring<N, H>> for SharedRing<N, H> {
    fn from(ring: Ring<N, H>) -> Self {
        Self {
            inner: RwLock::new(ring),
        }
    }
}

impl<N: Node, H: RingHasher> SharedRing<N, H> {
    /// Adds nodes to the ring.
    pub fn add<I>(&self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<N>,
    {
        self.inner.write().add(nodes)
    }

    /// Removes a node from the ring.
    pub fn remove(&self, node: &N) -> RingResult<N> {
        self.inner.write().remove(node)
    }

    /// Returns (a copy of) the node responsible for the given key.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<N>
    where
        N: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn position<K: AsRef<[u8]>>(&self, key: K) -> Position {
        self.inner.read().position(key)
    }

    /// Locks the ring for reading.
    ///
    /// Useful for batches of lookups which must all see the same topology.
    pub fn read(&self) -> RwLockReadGuard<'_, Ring<N, H>> {
        self.inner.read()
    }

    pub fn version(&self) -> u64 {
        self.inner.read().version()
    }

    pub fn into_inner(self) -> Ring<N, H> {
        self.inner.into_inner()
    }
}
