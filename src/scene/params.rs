use std::fmt;
use std::str::FromStr;

use crate::animation::sweep::SweepBounds;
use crate::foundation::core::Point;
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::foundation::numeric::coerce_count;
use crate::tree::generator::{MAX_LAYERS, MAX_NODES, TreeParams, node_count};

/// A bounded integer input: a slider with its current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NumericControl {
    value: i64,
    min: i64,
    max: i64,
}

impl NumericControl {
    /// Control over `[min, max]`; `value` is clamped into range.
    pub fn new(value: i64, min: i64, max: i64) -> FractreeResult<Self> {
        let bounds = SweepBounds::new(min, max)?;
        Ok(Self {
            value: bounds.clamp(value),
            min,
            max,
        })
    }

    /// Current position.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Move to `value`, clamped into range.
    pub fn set_value(&mut self, value: i64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Replace the range; the current value is clamped into it.
    pub fn set_range(&mut self, min: i64, max: i64) -> FractreeResult<()> {
        *self = Self::new(self.value, min, max)?;
        Ok(())
    }

    /// Range as sweep bounds.
    pub fn bounds(&self) -> FractreeResult<SweepBounds> {
        SweepBounds::new(self.min, self.max)
    }

    fn check(&self) -> FractreeResult<()> {
        self.bounds()?;
        if self.value < self.min || self.value > self.max {
            return Err(FractreeError::validation(format!(
                "control value {} outside [{}, {}]",
                self.value, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Scene control a pacer can sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepParam {
    /// Layer count.
    Layers,
    /// Branch angle offset, degrees.
    Angle,
    /// Root count.
    Roots,
}

impl SweepParam {
    /// Every sweepable control.
    pub const ALL: [SweepParam; 3] = [Self::Layers, Self::Angle, Self::Roots];

    /// Selector name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Layers => "layers",
            Self::Angle => "angle",
            Self::Roots => "roots",
        }
    }
}

impl fmt::Display for SweepParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepParam {
    type Err = FractreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                FractreeError::validation(format!(
                    "unknown sweep target '{s}' (expected layers, angle or roots)"
                ))
            })
    }
}

/// The tree inputs of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Layer count, `0..=MAX_LAYERS`.
    pub layers: NumericControl,
    /// Branch angle offset in degrees.
    pub angle: NumericControl,
    /// Number of root trees.
    pub roots: NumericControl,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            layers: NumericControl {
                value: 8,
                min: 0,
                max: 12,
            },
            angle: NumericControl {
                value: 30,
                min: 0,
                max: 180,
            },
            roots: NumericControl {
                value: 4,
                min: 0,
                max: 12,
            },
        }
    }
}

impl SceneParams {
    /// Reject inverted ranges, out-of-range values, layer ranges past [`MAX_LAYERS`] and control
    /// ranges whose largest scene exceeds [`MAX_NODES`].
    pub fn validate(&self) -> FractreeResult<()> {
        for p in SweepParam::ALL {
            self.control(p).check()?;
        }
        if self.layers.min < 0 || self.roots.min < 0 {
            return Err(FractreeError::validation(
                "layer and root controls cannot go below 0",
            ));
        }
        if self.layers.max > i64::from(MAX_LAYERS) {
            return Err(FractreeError::validation(format!(
                "layer control max {} exceeds {MAX_LAYERS}",
                self.layers.max
            )));
        }
        let (layers, roots) = (coerce_count(self.layers.max), coerce_count(self.roots.max));
        if node_count(layers, roots).is_none_or(|n| n > MAX_NODES) {
            return Err(FractreeError::validation(format!(
                "{roots} roots of {layers} layers exceed {MAX_NODES} nodes"
            )));
        }
        Ok(())
    }

    /// The control behind `param`.
    pub fn control(&self, param: SweepParam) -> &NumericControl {
        match param {
            SweepParam::Layers => &self.layers,
            SweepParam::Angle => &self.angle,
            SweepParam::Roots => &self.roots,
        }
    }

    /// Mutable access to the control behind `param`.
    pub fn control_mut(&mut self, param: SweepParam) -> &mut NumericControl {
        match param {
            SweepParam::Layers => &mut self.layers,
            SweepParam::Angle => &mut self.angle,
            SweepParam::Roots => &mut self.roots,
        }
    }

    /// Generator input for the current control positions, rooted at `root`.
    pub fn tree_params(&self, root: Point) -> TreeParams {
        TreeParams {
            num_layers: coerce_count(self.layers.value),
            angle_offset_deg: self.angle.value as f64,
            num_roots: coerce_count(self.roots.value),
            root,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/params.rs"]
mod tests;
