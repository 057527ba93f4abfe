use super::*;
use crate::style::attribute::StyleAttribute;
use crate::style::branch_style::BranchStyle;
use crate::style::store::MemoryStore;
use crate::tree::generator::{TreeGenerator, TreeParams};

fn style(num_layers: u32, symbol_end: &str) -> BranchStyle {
    let mut style = BranchStyle::new(Box::new(MemoryStore::new()));
    style.set_bounds(StyleAttribute::Length, "10", "10").unwrap();
    style.set_bounds(StyleAttribute::Width, "3", "1").unwrap();
    style.set_bounds(StyleAttribute::Opacity, "1.5", "0.5").unwrap();
    style.set_bounds(StyleAttribute::Symbol, "none", symbol_end).unwrap();
    style.set_bounds(StyleAttribute::SymbolColor, "#000000", "#ff00ff").unwrap();
    style.set_num_layers(num_layers).unwrap();
    style
}

fn forest(style: &BranchStyle, num_layers: u32) -> NodeArena {
    let mut generator = TreeGenerator::new();
    generator
        .generate_forest(
            style,
            &TreeParams {
                num_layers,
                angle_offset_deg: 30.0,
                num_roots: 1,
                root: Point::new(50.0, 50.0),
            },
        )
        .unwrap()
        .clone()
}

#[test]
fn root_draws_no_line() {
    let style = style(2, "none");
    let arena = forest(&style, 2);
    let snap = style.snapshot().unwrap();
    let root = arena.nodes()[0];
    assert_eq!(
        instruction_for(&arena, &root, &snap, RenderMode::Line).unwrap(),
        None
    );
}

#[test]
fn lines_precede_markers_and_cover_every_branch() {
    let style = style(3, "dot");
    let arena = forest(&style, 3);
    let snap = style.snapshot().unwrap();
    let frame = build_frame(&arena, &snap).unwrap();

    let lines = frame
        .iter()
        .filter(|i| matches!(i, DrawInstruction::Line { .. }))
        .count();
    let markers = frame.len() - lines;
    assert_eq!(lines, arena.len() - 1);
    assert_eq!(markers, 8);

    let first_marker = frame
        .iter()
        .position(|i| matches!(i, DrawInstruction::Marker { .. }))
        .unwrap();
    assert!(
        frame[first_marker..]
            .iter()
            .all(|i| matches!(i, DrawInstruction::Marker { .. }))
    );
}

#[test]
fn line_connects_parent_to_node_with_clamped_style() {
    let style = style(1, "none");
    let arena = forest(&style, 1);
    let snap = style.snapshot().unwrap();
    let child = arena.nodes()[1];
    let Some(DrawInstruction::Line { from, to, stroke }) =
        instruction_for(&arena, &child, &snap, RenderMode::Line).unwrap()
    else {
        panic!("expected a line");
    };
    assert_eq!(from, Point::new(50.0, 50.0));
    assert_eq!(to, child.pos);
    assert_eq!(stroke.width, 1.0);
    assert_eq!(stroke.opacity, 0.5);

    let root_style = snap.layer(0).unwrap();
    assert_eq!(root_style.opacity, 1.5);
}

#[test]
fn circle_markers_use_symbol_color() {
    let style = style(1, "circle");
    let arena = forest(&style, 1);
    let snap = style.snapshot().unwrap();
    let markers = instructions_for_slice(&arena, arena.nodes(), &snap, RenderMode::Symbol).unwrap();
    assert_eq!(markers.len(), 2);
    for m in markers {
        assert_eq!(
            m,
            DrawInstruction::Marker {
                center: match m {
                    DrawInstruction::Marker { center, .. } => center,
                    _ => unreachable!(),
                },
                radius: MARKER_RADIUS,
                symbol: Symbol::Circle,
                color: Rgb8::new(255, 0, 255),
            }
        );
    }
}
