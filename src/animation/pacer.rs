use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::animation::clock::Clock;
use crate::animation::sweep::{Direction, SweepBounds, sweep};
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::foundation::numeric::coerce_rate;

/// Value the pacer sweeps, plus the redraw it triggers after every update.
pub trait SweepTarget {
    /// Current inclusive bounds. Read again before every update.
    fn bounds(&self) -> FractreeResult<SweepBounds>;
    /// Current value.
    fn value(&self) -> i64;
    /// Store a new value (always inside the bounds last returned).
    fn set_value(&mut self, value: i64) -> FractreeResult<()>;
    /// Redraw for the value just stored.
    fn redraw(&mut self) -> FractreeResult<()>;
}

/// Lifecycle of a pacer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacerState {
    /// Not advancing.
    Idle,
    /// Inside [`AnimationPacer::start`].
    Running,
}

#[derive(Debug)]
struct Shared {
    running: AtomicBool,
    rate_bits: AtomicU64,
}

/// Cross-thread handle: stop a running pacer and adjust its rate.
///
/// Stopping is cooperative. The update in flight finishes its redraw, then the loop exits.
#[derive(Clone, Debug)]
pub struct PacerControl {
    shared: Arc<Shared>,
}

impl PacerControl {
    fn new(rate: f64) -> Self {
        Self {
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                rate_bits: AtomicU64::new(rate.to_bits()),
            }),
        }
    }

    /// Request the loop to stop.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }

    /// Current state.
    pub fn state(&self) -> PacerState {
        if self.is_running() {
            PacerState::Running
        } else {
            PacerState::Idle
        }
    }

    /// `true` while the loop runs.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Target updates per second; non-numeric or sub-1 rates become 1.
    pub fn set_rate(&self, rate: Option<f64>) {
        let rate = coerce_rate(rate);
        self.shared.rate_bits.store(rate.to_bits(), Ordering::SeqCst);
    }

    /// Current target updates per second.
    pub fn rate(&self) -> f64 {
        f64::from_bits(self.shared.rate_bits.load(Ordering::SeqCst))
    }

    /// Time budget of one update at the current rate.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate())
    }

    fn try_start(&self) -> bool {
        self.shared
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Counters of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PacerStats {
    /// Applied updates (one redraw each).
    pub updates: u64,
    /// Sum of steps over all updates.
    pub steps: u64,
    /// Iterations that found the loop behind schedule and grew the step batch.
    pub catch_ups: u64,
}

/// Advances a [`SweepTarget`] at a fixed rate and stays in wall-clock sync.
///
/// Update `k` is scheduled at `start + k * budget`. When rendering falls behind, the missed
/// updates are folded into one larger step instead of being replayed, so the swept value tracks
/// elapsed time rather than frame count. Overshoot at either bound reflects and flips direction.
#[derive(Debug)]
pub struct AnimationPacer<C: Clock> {
    clock: C,
    control: PacerControl,
    direction: Direction,
    pending_steps: u32,
    last_frame: Duration,
}

impl<C: Clock> AnimationPacer<C> {
    /// Idle pacer at `rate` updates per second (coerced to at least 1).
    pub fn new(clock: C, rate: Option<f64>) -> Self {
        Self {
            clock,
            control: PacerControl::new(coerce_rate(rate)),
            direction: Direction::Forward,
            pending_steps: 1,
            last_frame: Duration::ZERO,
        }
    }

    /// Handle for stopping the loop from another thread or from inside the target.
    pub fn control(&self) -> PacerControl {
        self.control.clone()
    }

    /// Current state.
    pub fn state(&self) -> PacerState {
        self.control.state()
    }

    /// Direction the next update moves in. Persists across runs.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Run the pacing loop until [`PacerControl::stop`] is observed or the target fails.
    ///
    /// This is the play half of play/pause: the loop blocks its caller, so pausing goes through
    /// a [`PacerControl`] handle taken beforehand. The state is back to idle on return,
    /// including the error path. Direction is kept, so the next run resumes the sweep.
    pub fn start<T: SweepTarget + ?Sized>(&mut self, target: &mut T) -> FractreeResult<PacerStats> {
        if !self.control.try_start() {
            return Err(FractreeError::animation("pacer is already running"));
        }
        let out = self.run_loop(target);
        self.control.stop();
        out
    }

    fn run_loop<T: SweepTarget + ?Sized>(&mut self, target: &mut T) -> FractreeResult<PacerStats> {
        let mut stats = PacerStats::default();
        self.pending_steps = 1;
        self.last_frame = self.clock.now();
        tracing::debug!(rate = self.control.rate(), "pacer started");

        while self.control.is_running() {
            let expected = self.control.frame_budget() * self.pending_steps;
            let elapsed = self.clock.now().saturating_sub(self.last_frame);

            if elapsed < expected {
                self.clock.sleep(expected - elapsed);
                if !self.control.is_running() {
                    break;
                }
            } else if elapsed > expected {
                self.pending_steps = self.pending_steps.saturating_add(1);
                stats.catch_ups += 1;
                tracing::debug!(
                    pending_steps = self.pending_steps,
                    behind_ms = (elapsed - expected).as_secs_f64() * 1000.0,
                    "pacer behind schedule"
                );
                continue;
            }

            self.apply(target)?;
            stats.updates += 1;
            stats.steps += u64::from(self.pending_steps);
            self.last_frame += expected;
            self.pending_steps = 1;
        }

        tracing::debug!(updates = stats.updates, steps = stats.steps, "pacer stopped");
        Ok(stats)
    }

    fn apply<T: SweepTarget + ?Sized>(&mut self, target: &mut T) -> FractreeResult<()> {
        let bounds = target.bounds()?;
        let (value, direction) = sweep(target.value(), self.pending_steps, self.direction, bounds);
        target.set_value(value)?;
        self.direction = direction;
        target.redraw()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pacer.rs"]
mod tests;
