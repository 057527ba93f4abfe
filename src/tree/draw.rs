use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::FractreeResult;
use crate::style::snapshot::StyleSnapshot;
use crate::style::value::Symbol;
use crate::tree::node::{Node, NodeArena};

/// Radius of node markers, in pixels.
pub const MARKER_RADIUS: f64 = 3.0;
/// Stroke width of ring markers, in pixels.
pub const MARKER_STROKE_WIDTH: f64 = 2.0;

/// Which of the two full passes over a node sequence is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Branch lines.
    Line,
    /// Node markers; always drawn after every line of the frame.
    Symbol,
}

/// Stroke parameters of a branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStroke {
    /// Stroke color.
    pub color: Rgb8,
    /// Stroke width, clamped to `>= 0`.
    pub width: f64,
    /// Opacity, clamped to `0..=1`.
    pub opacity: f64,
}

/// One drawing step, independent of the surface that executes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawInstruction {
    /// Branch from the parent node to this node.
    Line {
        /// Parent position.
        from: Point,
        /// Node position.
        to: Point,
        /// Stroke parameters.
        stroke: LineStroke,
    },
    /// Marker centered on a node.
    Marker {
        /// Node position.
        center: Point,
        /// Marker radius.
        radius: f64,
        /// Marker shape; never [`Symbol::None`].
        symbol: Symbol,
        /// Fill (dot) or stroke (circle) color.
        color: Rgb8,
    },
}

/// Instruction for `node` in `mode`, or `None` when nothing is drawn (the root's line, or a
/// layer whose marker is [`Symbol::None`]).
pub fn instruction_for(
    arena: &NodeArena,
    node: &Node,
    snapshot: &StyleSnapshot,
    mode: RenderMode,
) -> FractreeResult<Option<DrawInstruction>> {
    let style = snapshot.layer(node.layer)?;
    match mode {
        RenderMode::Line => {
            if node.parent.is_none() {
                return Ok(None);
            }
            Ok(Some(DrawInstruction::Line {
                from: arena.branch_start(node)?,
                to: node.pos,
                stroke: LineStroke {
                    color: style.color,
                    width: style.width.max(0.0),
                    opacity: style.opacity.clamp(0.0, 1.0),
                },
            }))
        }
        RenderMode::Symbol => {
            if !style.symbol.is_visible() {
                return Ok(None);
            }
            Ok(Some(DrawInstruction::Marker {
                center: node.pos,
                radius: MARKER_RADIUS,
                symbol: style.symbol,
                color: style.symbol_color,
            }))
        }
    }
}

/// Instructions for a contiguous slice of nodes in one mode, preserving node order.
pub fn instructions_for_slice(
    arena: &NodeArena,
    nodes: &[Node],
    snapshot: &StyleSnapshot,
    mode: RenderMode,
) -> FractreeResult<Vec<DrawInstruction>> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Some(ins) = instruction_for(arena, node, snapshot, mode)? {
            out.push(ins);
        }
    }
    Ok(out)
}

/// Full frame: every line, then every marker.
pub fn build_frame(
    arena: &NodeArena,
    snapshot: &StyleSnapshot,
) -> FractreeResult<Vec<DrawInstruction>> {
    let mut out = instructions_for_slice(arena, arena.nodes(), snapshot, RenderMode::Line)?;
    out.extend(instructions_for_slice(
        arena,
        arena.nodes(),
        snapshot,
        RenderMode::Symbol,
    )?);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/tree/draw.rs"]
mod tests;
