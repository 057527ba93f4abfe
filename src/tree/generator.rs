use std::collections::VecDeque;

use crate::foundation::core::Point;
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::style::branch_style::BranchStyle;
use crate::tree::node::{Node, NodeArena, NodeId};

/// Deepest tree the generator will expand; `2^(N+1)` nodes per root grows quickly.
pub const MAX_LAYERS: u32 = 20;

/// Largest node count of one generation pass, across all root trees.
pub const MAX_NODES: u64 = 1 << 22;

/// Nodes emitted for `num_roots` trees of depth `num_layers` sharing one root:
/// `1 + num_roots * (2^(N+1) - 2)`, or `0` without roots. `None` on overflow.
pub fn node_count(num_layers: u32, num_roots: u32) -> Option<u64> {
    if num_roots == 0 {
        return Some(0);
    }
    let per_tree = 1u64.checked_shl(num_layers.checked_add(1)?)?.checked_sub(2)?;
    per_tree.checked_mul(u64::from(num_roots))?.checked_add(1)
}

/// Geometry inputs of one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeParams {
    /// Depth of every tree; nodes at this layer are terminal.
    pub num_layers: u32,
    /// Half-angle between sibling branches, in degrees.
    pub angle_offset_deg: f64,
    /// Number of trees fanned radially around the shared root.
    pub num_roots: u32,
    /// Shared root position.
    pub root: Point,
}

impl TreeParams {
    /// Orientation offset (radians) of root tree `k`: `360° * k / num_roots`.
    pub fn root_offset(&self, k: u32) -> f64 {
        if self.num_roots == 0 {
            return 0.0;
        }
        (360.0 * f64::from(k) / f64::from(self.num_roots)).to_radians()
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    id: NodeId,
    root_offset: f64,
}

/// Breadth-first tree expander.
///
/// Keeps its arena and work queue between passes so steady-state animation does not reallocate.
#[derive(Debug, Default)]
pub struct TreeGenerator {
    arena: NodeArena,
    queue: VecDeque<Pending>,
}

impl TreeGenerator {
    /// New generator with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes of the most recent pass.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Expand a single tree from `root` (angle 0).
    ///
    /// `angle_offset` and `root_offset` are in radians. Each child sits at
    /// `parent.angle ± angle_offset + root_offset`, one `length(parent.layer)` away.
    pub fn generate(
        &mut self,
        style: &BranchStyle,
        num_layers: u32,
        angle_offset: f64,
        root_offset: f64,
        root: Point,
    ) -> FractreeResult<&NodeArena> {
        self.expand(style, num_layers, angle_offset, &[root_offset], root)?;
        Ok(&self.arena)
    }

    /// Expand `params.num_roots` trees sharing one root node, fanned by
    /// [`TreeParams::root_offset`].
    #[tracing::instrument(skip(self, style))]
    pub fn generate_forest(
        &mut self,
        style: &BranchStyle,
        params: &TreeParams,
    ) -> FractreeResult<&NodeArena> {
        let offsets: Vec<f64> = (0..params.num_roots).map(|k| params.root_offset(k)).collect();
        let angle = params.angle_offset_deg;
        if !angle.is_finite() {
            return Err(FractreeError::validation("angle offset must be finite"));
        }
        self.expand(
            style,
            params.num_layers,
            angle.to_radians(),
            &offsets,
            params.root,
        )?;
        Ok(&self.arena)
    }

    fn expand(
        &mut self,
        style: &BranchStyle,
        num_layers: u32,
        angle_offset: f64,
        root_offsets: &[f64],
        root: Point,
    ) -> FractreeResult<()> {
        self.arena.clear();
        self.queue.clear();

        if num_layers > MAX_LAYERS {
            return Err(FractreeError::validation(format!(
                "num_layers {num_layers} exceeds the maximum of {MAX_LAYERS}"
            )));
        }
        if style.num_layers() != Some(num_layers) {
            return Err(FractreeError::contract(format!(
                "style built for {:?} layers, generation asked for {num_layers}",
                style.num_layers()
            )));
        }
        if !root.x.is_finite() || !root.y.is_finite() {
            return Err(FractreeError::validation("root position must be finite"));
        }
        if root_offsets.is_empty() {
            return Ok(());
        }

        let roots = u32::try_from(root_offsets.len()).unwrap_or(u32::MAX);
        let total = node_count(num_layers, roots)
            .filter(|&n| n <= MAX_NODES)
            .ok_or_else(|| {
                FractreeError::validation(format!(
                    "{roots} trees of {num_layers} layers exceed {MAX_NODES} nodes"
                ))
            })?;
        self.arena.reserve(total as usize);

        let root_id = self.arena.push(Node {
            pos: root,
            angle: 0.0,
            layer: 0,
            parent: None,
        })?;
        for &root_offset in root_offsets {
            self.queue.push_back(Pending {
                id: root_id,
                root_offset,
            });
        }

        while let Some(Pending { id, root_offset }) = self.queue.pop_front() {
            let node = *self.arena.get(id)?;
            if node.layer >= num_layers {
                continue;
            }
            let length = style.length(node.layer)?;
            for angle in [
                node.angle + angle_offset + root_offset,
                node.angle - angle_offset + root_offset,
            ] {
                let child = self.arena.push(Node {
                    pos: Point::new(
                        node.pos.x - length * angle.sin(),
                        node.pos.y - length * angle.cos(),
                    ),
                    angle,
                    layer: node.layer + 1,
                    parent: Some(id),
                })?;
                self.queue.push_back(Pending {
                    id: child,
                    root_offset,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/generator.rs"]
mod tests;
