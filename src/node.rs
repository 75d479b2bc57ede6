use {
    auto_impl::auto_impl,
    std::{collections::HashMap, rc::Rc, sync::Arc},
};

/// Node that owns a portion of the ring.
///
/// The ring knows nothing about a node beyond its label: virtual node
/// positions are derived from the label, and two nodes with the same label
/// are the same node as far as the ring is concerned.
#[auto_impl(&)]
pub trait Node {
    /// Label of the node, e.g. `"host-1"` or `"10.0.0.1:11211"`.
    fn label(&self) -> &str;
}

macro_rules! impl_node {
    ($($t:ty),*) => {
        $(
            impl Node for $t {
                fn label(&self) -> &str {
                    self
                }
            }
        )*
    };
}

impl_node!(String, Box<str>, Arc<str>, Rc<str>);

/// Node handle (hash of the node's label).
pub(crate) type NodeIdx = u64;

/// Nodes collection.
///
/// The collection assigns each node an index (by hashing its label), which
/// serves as a handle throughout the rest of the ring. This way every virtual
/// position stores an 8 byte index instead of a copy of the node.
pub(crate) struct Nodes<N: Node> {
    nodes: HashMap<NodeIdx, N>,
    version: u64,
}

impl<N: Node> Default for Nodes<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> Nodes<N> {
    /// Creates a new empty nodes collection.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            version: 0,
        }
    }

    /// Adds a node to the collection, replacing a node with the same label.
    ///
    /// Returns the index of the node in the collection.
    pub fn insert(&mut self, node: N) -> NodeIdx {
        let idx = self.idx(&node);
        self.nodes.insert(idx, node);
        self.version += 1;

        idx
    }

    /// Removes and returns (if existed) a node from the collection.
    pub fn remove(&mut self, idx: NodeIdx) -> Option<N> {
        let node = self.nodes.remove(&idx)?;
        self.version += 1;
        Some(node)
    }

    /// Returns index of a given node.
    pub fn idx(&self, node: &N) -> NodeIdx {
        rapidhash::rapidhash(node.label().as_bytes())
    }

    /// Returns a reference to the node with given index.
    pub fn get(&self, idx: NodeIdx) -> Option<&N> {
        self.nodes.get(&idx)
    }

    pub fn contains(&self, idx: NodeIdx) -> bool {
        self.nodes.contains_key(&idx)
    }

    /// Returns the version of the collection.
    ///
    /// Bumped on every insertion and removal.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of nodes in the collection.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterator over the nodes in the collection.
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }
}
