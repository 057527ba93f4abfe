use super::*;
use crate::foundation::core::Point;
use crate::render::painter::paint_tree;
use crate::render::surface::RecordingSurface;
use crate::style::attribute::StyleAttribute;
use crate::style::branch_style::BranchStyle;
use crate::style::store::MemoryStore;
use crate::tree::generator::{TreeGenerator, TreeParams};

fn scene() -> (NodeArena, StyleSnapshot) {
    let mut style = BranchStyle::new(Box::new(MemoryStore::new()));
    style.set_bounds(StyleAttribute::Symbol, "none", "dot").unwrap();
    style.set_num_layers(6).unwrap();
    let mut generator = TreeGenerator::new();
    let arena = generator
        .generate_forest(
            &style,
            &TreeParams {
                num_layers: 6,
                angle_offset_deg: 35.0,
                num_roots: 3,
                root: Point::new(200.0, 200.0),
            },
        )
        .unwrap()
        .clone();
    (arena, style.snapshot().unwrap())
}

#[test]
fn zero_threads_is_rejected() {
    let err = RenderWorkers::new(&WorkerOpts {
        threads: Some(0),
        chunk_size: 8,
    })
    .err()
    .unwrap();
    assert!(matches!(err, FractreeError::Validation(_)));
}

#[test]
fn parallel_paint_matches_sequential_paint() {
    let (arena, snap) = scene();
    let workers = RenderWorkers::new(&WorkerOpts {
        threads: Some(3),
        chunk_size: 17,
    })
    .unwrap();
    assert_eq!(workers.threads(), 3);

    let mut sequential = RecordingSurface::new();
    paint_tree(&mut sequential, &arena, &snap).unwrap();
    let mut parallel = RecordingSurface::new();
    workers.paint_tree(&mut parallel, &arena, &snap).unwrap();

    assert_eq!(sequential.commands(), parallel.commands());
}

#[test]
fn rounds_are_split_by_mode() {
    let (arena, snap) = scene();
    let workers = RenderWorkers::new(&WorkerOpts {
        threads: Some(2),
        chunk_size: 64,
    })
    .unwrap();

    let lines: usize = workers
        .dispatch_round(&arena, &snap, RenderMode::Line)
        .unwrap()
        .iter()
        .map(Vec::len)
        .sum();
    let markers = workers
        .dispatch_round(&arena, &snap, RenderMode::Symbol)
        .unwrap();
    assert_eq!(lines, arena.len() - 1);
    assert!(
        markers
            .iter()
            .flatten()
            .all(|i| matches!(i, DrawInstruction::Marker { .. }))
    );
    assert_eq!(markers.iter().map(Vec::len).sum::<usize>(), 3 * 64);
}

#[test]
fn empty_arena_dispatches_nothing() {
    let (_, snap) = scene();
    let workers = RenderWorkers::new(&WorkerOpts::default()).unwrap();
    let rounds = workers
        .dispatch_round(&NodeArena::new(), &snap, RenderMode::Line)
        .unwrap();
    assert!(rounds.is_empty());
}
