use crate::foundation::core::Rgb8;
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::style::value::{StyleValue, ValueKind};

/// Interpolation law spreading a `start`/`end` bound pair over layers `0..=num_layers`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpLaw {
    /// Straight-line numeric interpolation.
    Linear(LinearMode),
    /// Color that is pinned to `end` at the last layer and converges geometrically toward
    /// `start` moving back to the root (channel ratio halves every layer).
    Geometric,
    /// Step function: `start` everywhere except the last layer, which takes `end`.
    Threshold,
}

/// Variant of [`InterpLaw::Linear`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearMode {
    /// `start + (end - start) * L / N`.
    Proportional,
    /// Layer 0 is `start`; layers `1..=N` follow `start + (end - start) * (L - 1) / (N - 1)`.
    PinnedRoot,
}

impl InterpLaw {
    /// Compute the value table for layers `0..=num_layers`.
    pub fn table(
        self,
        start: &StyleValue,
        end: &StyleValue,
        num_layers: u32,
    ) -> FractreeResult<Vec<StyleValue>> {
        if start.kind() != end.kind() {
            return Err(FractreeError::validation(format!(
                "bounds disagree on kind: start {start:?}, end {end:?}"
            )));
        }
        match self {
            Self::Linear(mode) => {
                let (StyleValue::Number(s), StyleValue::Number(e)) = (start, end) else {
                    return Err(kind_error("linear", ValueKind::Number, start));
                };
                Ok(linear_table(mode, *s, *e, num_layers)
                    .into_iter()
                    .map(StyleValue::Number)
                    .collect())
            }
            Self::Geometric => {
                let (StyleValue::Color(s), StyleValue::Color(e)) = (start, end) else {
                    return Err(kind_error("geometric", ValueKind::Color, start));
                };
                Ok(geometric_color_table(*s, *e, num_layers)
                    .into_iter()
                    .map(StyleValue::Color)
                    .collect())
            }
            Self::Threshold => {
                let n = num_layers as usize;
                let mut out = vec![*start; n];
                out.push(*end);
                Ok(out)
            }
        }
    }
}

fn kind_error(law: &str, expected: ValueKind, got: &StyleValue) -> FractreeError {
    FractreeError::validation(format!(
        "{law} interpolation needs {expected:?} bounds, got {:?}",
        got.kind()
    ))
}

fn linear_table(mode: LinearMode, start: f64, end: f64, num_layers: u32) -> Vec<f64> {
    let n = f64::from(num_layers);
    let diff = end - start;
    (0..=num_layers)
        .map(|layer| {
            let l = f64::from(layer);
            match mode {
                _ if num_layers == 0 => start,
                LinearMode::Proportional => start + diff * (l / n),
                LinearMode::PinnedRoot if layer == 0 => start,
                LinearMode::PinnedRoot if num_layers == 1 => end,
                LinearMode::PinnedRoot => start + diff * ((l - 1.0) / (n - 1.0)),
            }
        })
        .collect()
}

fn geometric_color_table(start: Rgb8, end: Rgb8, num_layers: u32) -> Vec<Rgb8> {
    let s = start.channels();
    let e = end.channels();
    let mut out = vec![end; num_layers as usize + 1];
    let mut ratio = 1.0_f64;
    for slot in out.iter_mut().rev() {
        let mut ch = [0u8; 3];
        for i in 0..3 {
            let sc = f64::from(s[i]);
            let ec = f64::from(e[i]);
            ch[i] = (sc + (ec - sc) * ratio).round().clamp(0.0, 255.0) as u8;
        }
        *slot = Rgb8::from_channels(ch);
        ratio *= 0.5;
    }
    out
}

/// Per-layer value table for one attribute.
///
/// The domain is exactly `0..=num_layers` of the most recent successful build; anything else is a
/// contract violation.
#[derive(Clone, Debug)]
pub struct StyleAttributeMap {
    law: InterpLaw,
    values: Vec<StyleValue>,
    num_layers: Option<u32>,
}

impl StyleAttributeMap {
    /// An unbuilt map using `law`.
    pub fn new(law: InterpLaw) -> Self {
        Self {
            law,
            values: Vec::new(),
            num_layers: None,
        }
    }

    /// Build a map in one step.
    pub fn built(
        law: InterpLaw,
        start: &StyleValue,
        end: &StyleValue,
        num_layers: u32,
    ) -> FractreeResult<Self> {
        let mut map = Self::new(law);
        map.build(start, end, num_layers)?;
        Ok(map)
    }

    /// Interpolation law of this map.
    pub fn law(&self) -> InterpLaw {
        self.law
    }

    /// Layer count of the current build, `None` before the first successful build.
    pub fn num_layers(&self) -> Option<u32> {
        self.num_layers
    }

    /// Rebuild for `num_layers`. On error the previous table is left untouched.
    pub fn build(
        &mut self,
        start: &StyleValue,
        end: &StyleValue,
        num_layers: u32,
    ) -> FractreeResult<()> {
        let values = self.law.table(start, end, num_layers)?;
        self.values = values;
        self.num_layers = Some(num_layers);
        Ok(())
    }

    /// Value at `layer`.
    pub fn get(&self, layer: u32) -> FractreeResult<&StyleValue> {
        let Some(n) = self.num_layers else {
            return Err(FractreeError::contract(format!(
                "style map queried for layer {layer} before it was built"
            )));
        };
        self.values.get(layer as usize).ok_or_else(|| {
            FractreeError::contract(format!("layer {layer} outside built domain 0..={n}"))
        })
    }

    /// The full table, indexed by layer.
    pub fn values(&self) -> &[StyleValue] {
        &self.values
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/layer_map.rs"]
mod tests;
