use {auto_impl::auto_impl, std::fmt};

/// Position of a virtual node (or of a key) on the ring.
pub type Position = u32;

/// Hash function used to place virtual nodes and keys on the ring.
///
/// Implementations must be deterministic across process runs: the ring
/// guarantees stable key assignment only as long as the same input always
/// lands on the same position.
#[auto_impl(&, Box, Arc)]
pub trait RingHasher {
    /// Hashes the given bytes into a ring position.
    fn hash_bytes(&self, bytes: &[u8]) -> Position;
}

/// Default hasher for the ring.
///
/// CRC32 with the IEEE polynomial.
#[derive(Debug, Default, Clone, Copy)]
pub struct Crc32Hasher;

impl RingHasher for Crc32Hasher {
    fn hash_bytes(&self, bytes: &[u8]) -> Position {
        crc32fast::hash(bytes)
    }
}

/// Rapidhash, truncated to the lower 32 bits.
///
/// Spreads labels which differ only in a trailing digit better than CRC32
/// does, at the cost of positions being incompatible with CRC32-based rings.
#[derive(Debug, Default, Clone, Copy)]
pub struct RapidHasher;

impl RingHasher for RapidHasher {
    fn hash_bytes(&self, bytes: &[u8]) -> Position {
        rapidhash::rapidhash(bytes) as Position
    }
}

/// Adapter for plain functions and closures.
#[derive(Clone, Copy)]
pub struct FnHasher<F>(F);

impl<F> FnHasher<F>
where
    F: Fn(&[u8]) -> Position,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> RingHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> Position,
{
    fn hash_bytes(&self, bytes: &[u8]) -> Position {
        (self.0)(bytes)
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnHasher")
    }
}
