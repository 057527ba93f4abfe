use crate::foundation::error::FractreeResult;
use crate::render::surface::DrawSurface;
use crate::style::snapshot::StyleSnapshot;
use crate::style::value::Symbol;
use crate::tree::draw::{DrawInstruction, MARKER_STROKE_WIDTH, RenderMode, instruction_for};
use crate::tree::node::NodeArena;

/// Execute one instruction.
pub fn execute(surface: &mut dyn DrawSurface, ins: &DrawInstruction) -> FractreeResult<()> {
    match *ins {
        DrawInstruction::Line { from, to, stroke } => {
            surface.begin_path();
            surface.move_to(from);
            surface.line_to(to);
            surface.stroke(&stroke)
        }
        DrawInstruction::Marker {
            center,
            radius,
            symbol,
            color,
        } => match symbol {
            Symbol::Dot => surface.fill_arc(center, radius, color),
            Symbol::Circle => surface.stroke_arc(center, radius, MARKER_STROKE_WIDTH, color),
            Symbol::None => Ok(()),
        },
    }
}

/// Clear `surface`, then execute `instructions` in order.
pub fn paint_instructions(
    surface: &mut dyn DrawSurface,
    instructions: &[DrawInstruction],
) -> FractreeResult<()> {
    surface.clear()?;
    for ins in instructions {
        execute(surface, ins)?;
    }
    Ok(())
}

/// Clear `surface` and paint the nodes of `arena`: one full line pass, then one full symbol pass.
#[tracing::instrument(skip_all, fields(nodes = arena.len()))]
pub fn paint_tree(
    surface: &mut dyn DrawSurface,
    arena: &NodeArena,
    snapshot: &StyleSnapshot,
) -> FractreeResult<()> {
    surface.clear()?;
    for mode in [RenderMode::Line, RenderMode::Symbol] {
        for node in arena.nodes() {
            if let Some(ins) = instruction_for(arena, node, snapshot, mode)? {
                execute(surface, &ins)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
