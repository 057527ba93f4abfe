use crate::foundation::error::{FractreeError, FractreeResult};

/// Direction of a ping-pong sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Increasing values.
    #[default]
    Forward,
    /// Decreasing values.
    Reverse,
}

impl Direction {
    /// The other direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Inclusive `[min, max]` range of a swept value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepBounds {
    min: i64,
    max: i64,
}

impl SweepBounds {
    /// Bounds with `min <= max`.
    pub fn new(min: i64, max: i64) -> FractreeResult<Self> {
        if min > max {
            return Err(FractreeError::validation(format!(
                "sweep bounds inverted: min {min} > max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(self) -> i64 {
        self.min
    }

    /// Upper bound.
    pub fn max(self) -> i64 {
        self.max
    }

    /// `value` clamped into the bounds.
    pub fn clamp(self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Move `value` by `steps` in `direction`, reflecting any overshoot off the bound it reached.
///
/// Reaching a bound exactly also flips the direction. Overshoot longer than the range keeps
/// bouncing, so the result is where `steps` single steps would have left the value. A
/// degenerate `min == max` range holds the value and flips every call.
pub fn sweep(
    value: i64,
    steps: u32,
    direction: Direction,
    bounds: SweepBounds,
) -> (i64, Direction) {
    let value = bounds.clamp(value);
    let range = i128::from(bounds.max) - i128::from(bounds.min);
    if range == 0 {
        return (value, direction.flipped());
    }

    // Phase on one full forward-and-back cycle: `0..range` rising, `range..2*range` falling.
    let period = 2 * range;
    let offset = i128::from(value) - i128::from(bounds.min);
    let phase = match direction {
        Direction::Forward => offset,
        Direction::Reverse => period - offset,
    };
    let phase = (phase + i128::from(steps)).rem_euclid(period);
    let (offset, dir) = if phase < range {
        (phase, Direction::Forward)
    } else {
        (period - phase, Direction::Reverse)
    };
    // `offset <= range`, so the result lies inside the bounds.
    let next = i64::try_from(i128::from(bounds.min) + offset).unwrap_or(bounds.max);
    (next, dir)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sweep.rs"]
mod tests;
