#[cfg(test)]
mod ring_test;

use {
    crate::{
        error::{RingError, RingResult},
        hash::{Crc32Hasher, Position, RingHasher},
        node::{Node, NodeIdx, Nodes},
    },
    log::{debug, trace},
    std::{collections::HashMap, fmt},
};

/// Consistent hash ring.
///
/// Every node is placed on the ring `replicas` times (virtual nodes), at the
/// positions `hash(label + i)` for `i` in `0..replicas`. A key is owned by
/// the first virtual node found when walking the ring clockwise from the
/// key's own position, wrapping around past the largest position.
pub struct Ring<N: Node, H: RingHasher = Crc32Hasher> {
    /// Hash function used for both virtual nodes and keys.
    hasher: H,

    /// Number of virtual nodes per node.
    replicas: usize,

    /// Positions of all virtual nodes (sorted in ascending order).
    ///
    /// May contain duplicates: re-adding a node, or two virtual nodes hashing
    /// to the same position, appends the position again.
    positions: Vec<Position>,

    /// Owners of each position, one entry per occurrence in `positions`.
    ///
    /// On collision, the last added node (top of the stack) wins; removing it
    /// hands the position back to the node it shadowed.
    owners: HashMap<Position, Vec<NodeIdx>>,

    nodes: Nodes<N>,
}

impl<N: Node> Ring<N> {
    /// Creates an empty ring using the default (CRC32) hasher.
    pub fn new(replicas: usize) -> Self {
        Self::with_hasher(replicas, Crc32Hasher)
    }
}

impl<N: Node, H: RingHasher> Ring<N, H> {
    /// Creates an empty ring using the given hasher.
    ///
    /// With zero `replicas` nodes never make it to the ring.
    pub fn with_hasher(replicas: usize, hasher: H) -> Self {
        Self {
            hasher,
            replicas,
            positions: Vec::new(),
            owners: HashMap::new(),
            nodes: Nodes::new(),
        }
    }

    /// Adds nodes to the ring.
    ///
    /// Each node claims `replicas` positions. Adding a node which is already
    /// on the ring replaces the stored node and appends its positions once
    /// more, skewing the distribution but keeping the ring consistent.
    pub fn add<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<N>,
    {
        if self.replicas == 0 {
            return;
        }

        let mut added = 0;
        for node in nodes {
            let node: N = node.into();
            let label = node.label().to_owned();
            let idx = self.nodes.insert(node);

            for i in 0..self.replicas {
                let position = self.hasher.hash_bytes(format!("{label}{i}").as_bytes());
                let owners = self.owners.entry(position).or_default();
                if owners.last().is_some_and(|prev| *prev != idx) {
                    trace!("virtual node {label}{i} shadows another node at {position}");
                }
                owners.push(idx);
                self.positions.push(position);
            }
            added += 1;
        }

        self.positions.sort_unstable();
        debug!(
            "added {added} node(s), ring has {} node(s) at {} position(s)",
            self.nodes.len(),
            self.positions.len()
        );
    }

    /// Removes a node, along with all its virtual nodes, from the ring.
    ///
    /// Positions where the node shadowed another one go back to the shadowed
    /// node; the rest leave the ring.
    pub fn remove(&mut self, node: &N) -> RingResult<N> {
        let idx = self.nodes.idx(node);
        let removed = self
            .nodes
            .remove(idx)
            .ok_or_else(|| RingError::UnknownNode(node.label().to_owned()))?;

        // Number of occurrences of each position owned by the removed node.
        let mut dropped = HashMap::<Position, usize>::new();
        self.owners.retain(|position, owners| {
            let before = owners.len();
            owners.retain(|owner| *owner != idx);
            if owners.len() < before {
                dropped.insert(*position, before - owners.len());
            }
            !owners.is_empty()
        });
        self.positions.retain(|position| match dropped.get_mut(position) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        });

        debug!(
            "removed node {}, ring has {} node(s) at {} position(s)",
            removed.label(),
            self.nodes.len(),
            self.positions.len()
        );

        Ok(removed)
    }

    /// Returns the node responsible for the given key.
    ///
    /// If the ring is empty (no virtual nodes), `None` is returned.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&N> {
        if self.positions.is_empty() {
            return None;
        }

        let position = self.position(key);
        let mut idx = self.positions.partition_point(|p| *p < position);
        if idx == self.positions.len() {
            idx = 0;
        }

        self.owner(self.positions[idx])
    }

    /// Node currently owning the given virtual node position.
    fn owner(&self, position: Position) -> Option<&N> {
        let idx = self.owners.get(&position)?.last()?;
        self.nodes.get(*idx)
    }

    /// Returns ring position to which a given key hashes.
    pub fn position<K: AsRef<[u8]>>(&self, key: K) -> Position {
        self.hasher.hash_bytes(key.as_ref())
    }

    /// Sorted virtual node positions along with their owners.
    pub fn tokens(&self) -> impl Iterator<Item = (Position, &N)> {
        self.positions
            .iter()
            .filter_map(move |position| Some((*position, self.owner(*position)?)))
    }

    /// Nodes on the ring, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(self.nodes.idx(node))
    }

    /// Number of virtual nodes per node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of distinct nodes on the ring.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the ring has no nodes.
    ///
    /// Every node on the ring holds at least one virtual node, so an empty
    /// ring is also one where every lookup yields `None`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topology version, bumped whenever a node is added or removed.
    pub fn version(&self) -> u64 {
        self.nodes.version()
    }
}

impl<N: Node, H: RingHasher> fmt::Debug for Ring<N, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("replicas", &self.replicas)
            .field("nodes", &self.nodes.iter().map(|node| node.label()).collect::<Vec<_>>())
            .field("positions", &self.positions.len())
            .finish()
    }
}
