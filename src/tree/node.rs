use crate::foundation::core::Point;
use crate::foundation::error::{FractreeError, FractreeResult};

/// Index of a [`Node`] inside the [`NodeArena`] of the current generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A point of the branching structure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Position on the drawing surface.
    pub pos: Point,
    /// Orientation in radians, measured from vertical; children derive their angles from it.
    pub angle: f64,
    /// Depth from the root (0 at the root).
    pub layer: u32,
    /// Node whose branch feeds into this one; `None` for the root.
    pub parent: Option<NodeId>,
}

/// All nodes of one generation pass, in emission (breadth-first) order.
///
/// Cleared wholesale at the start of the next pass; ids from a previous pass must not be reused.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) fn push(&mut self, node: Node) -> FractreeResult<NodeId> {
        let id = u32::try_from(self.nodes.len())
            .map_err(|_| FractreeError::validation("tree exceeds u32::MAX nodes"))?;
        self.nodes.push(node);
        Ok(NodeId(id))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the pass produced no nodes (zero roots).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node `id`.
    pub fn get(&self, id: NodeId) -> FractreeResult<&Node> {
        self.nodes
            .get(id.0 as usize)
            .ok_or_else(|| FractreeError::contract(format!("node {} not in this pass", id.0)))
    }

    /// Nodes in emission order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Start of the branch ending at `node`: the parent's position, or the node's own position
    /// for the root.
    pub fn branch_start(&self, node: &Node) -> FractreeResult<Point> {
        match node.parent {
            Some(parent) => Ok(self.get(parent)?.pos),
            None => Ok(node.pos),
        }
    }

    /// Highest layer present, `None` for an empty arena.
    pub fn max_layer(&self) -> Option<u32> {
        self.nodes.iter().map(|n| n.layer).max()
    }
}
