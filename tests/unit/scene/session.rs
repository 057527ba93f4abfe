use std::time::Duration;

use super::*;
use crate::animation::clock::{Clock as _, ManualClock};
use crate::animation::pacer::{AnimationPacer, PacerControl};
use crate::render::surface::RecordingSurface;
use crate::render::workers::WorkerOpts;
use crate::scene::params::NumericControl;
use crate::style::store::MemoryStore;

fn session(layers: i64, roots: i64) -> TreeSession {
    let mut params = SceneParams::default();
    params.layers.set_value(layers);
    params.roots.set_value(roots);
    TreeSession::new(
        BranchStyle::new(Box::new(MemoryStore::new())),
        params,
        Canvas {
            width: 400,
            height: 300,
        },
    )
    .unwrap()
}

#[test]
fn regenerate_builds_style_and_paints_both_passes() {
    let mut s = session(3, 2);
    assert_eq!(s.style().num_layers(), None);

    let mut surface = RecordingSurface::new();
    s.regenerate(&mut surface).unwrap();

    assert_eq!(s.style().num_layers(), Some(3));
    assert_eq!(s.arena().len(), 1 + 2 * 14);
    assert_eq!(surface.clear_count(), 1);
    assert_eq!(surface.stroke_count(), 28);
    // Built-in symbols switch on only at the last layer.
    assert_eq!(surface.arc_count(), 2 * 8);
    assert_eq!(s.arena().nodes()[0].pos, s.canvas().center());
}

#[test]
fn layer_change_rebuilds_style_tables() {
    let mut s = session(2, 1);
    let mut surface = RecordingSurface::new();
    s.regenerate(&mut surface).unwrap();
    s.params_mut().layers.set_value(5);
    s.regenerate(&mut surface).unwrap();
    assert_eq!(s.style().num_layers(), Some(5));
    assert_eq!(s.arena().len(), 63);
    assert_eq!(surface.clear_count(), 2);
}

#[test]
fn zero_roots_paints_an_empty_frame() {
    let mut s = session(4, 0);
    let mut surface = RecordingSurface::new();
    s.regenerate(&mut surface).unwrap();
    assert!(s.arena().is_empty());
    assert_eq!(surface.commands().len(), 1);
}

#[test]
fn invalid_params_are_rejected() {
    let mut params = SceneParams::default();
    params.layers = NumericControl::new(3, 0, 40).unwrap();
    let err = TreeSession::new(
        BranchStyle::new(Box::new(MemoryStore::new())),
        params,
        Canvas::default(),
    )
    .err()
    .unwrap();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn workers_paint_the_same_frame() {
    let mut sequential = RecordingSurface::new();
    session(5, 3).regenerate(&mut sequential).unwrap();

    let workers = RenderWorkers::new(&WorkerOpts {
        threads: Some(3),
        chunk_size: 7,
    })
    .unwrap();
    let mut parallel = RecordingSurface::new();
    session(5, 3)
        .with_workers(workers)
        .regenerate(&mut parallel)
        .unwrap();

    assert_eq!(sequential.commands(), parallel.commands());
}

#[test]
fn sweep_target_reads_and_clamps_the_selected_control() {
    let mut s = session(3, 2);
    let mut surface = RecordingSurface::new();
    let mut target = s.sweep(SweepParam::Roots, &mut surface);
    assert_eq!(target.param(), SweepParam::Roots);
    assert_eq!(target.value(), 2);
    let b = target.bounds().unwrap();
    assert_eq!((b.min(), b.max()), (0, 12));

    target.set_value(99).unwrap();
    assert_eq!(target.value(), 12);
    target.redraw().unwrap();
    assert_eq!(target.session().arena().len(), 1 + 12 * 14);
}

struct Limited<'a> {
    inner: SessionSweep<'a, RecordingSurface>,
    control: PacerControl,
    left: usize,
}

impl SweepTarget for Limited<'_> {
    fn bounds(&self) -> FractreeResult<SweepBounds> {
        self.inner.bounds()
    }

    fn value(&self) -> i64 {
        self.inner.value()
    }

    fn set_value(&mut self, value: i64) -> FractreeResult<()> {
        self.inner.set_value(value)
    }

    fn redraw(&mut self) -> FractreeResult<()> {
        self.inner.redraw()?;
        self.left -= 1;
        if self.left == 0 {
            self.control.stop();
        }
        Ok(())
    }
}

#[test]
fn pacer_sweeps_layers_through_the_session() {
    let mut s = session(0, 1);
    s.params_mut().layers.set_range(0, 3).unwrap();
    let mut surface = RecordingSurface::new();

    let clock = ManualClock::new();
    let mut pacer = AnimationPacer::new(clock.clone(), Some(50.0));
    let mut target = Limited {
        inner: s.sweep(SweepParam::Layers, &mut surface),
        control: pacer.control(),
        left: 5,
    };
    let stats = pacer.start(&mut target).unwrap();
    assert_eq!(stats.updates, 5);
    drop(target);

    // 0 -> 1 -> 2 -> 3 -> 2 -> 1
    assert_eq!(s.params().layers.value(), 1);
    assert_eq!(s.style().num_layers(), Some(1));
    assert_eq!(s.arena().len(), 3);
    assert_eq!(surface.clear_count(), 5);
    assert_eq!(clock.now(), Duration::from_millis(20) * 5);
}
