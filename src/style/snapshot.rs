use crate::foundation::core::Rgb8;
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::style::value::Symbol;

/// Every style attribute resolved for one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    /// Branch stroke color.
    pub color: Rgb8,
    /// Branch stroke width.
    pub width: f64,
    /// Length of branches grown out of this layer.
    pub length: f64,
    /// Branch stroke opacity (unclamped).
    pub opacity: f64,
    /// Node marker.
    pub symbol: Symbol,
    /// Node marker color.
    pub symbol_color: Rgb8,
}

/// Immutable per-frame style table, shareable with render workers.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSnapshot {
    layers: Vec<LayerStyle>,
}

impl StyleSnapshot {
    pub(crate) fn new(layers: Vec<LayerStyle>) -> Self {
        Self { layers }
    }

    /// Highest layer index covered.
    pub fn num_layers(&self) -> u32 {
        self.layers.len().saturating_sub(1) as u32
    }

    /// Resolved style of `layer`.
    pub fn layer(&self, layer: u32) -> FractreeResult<&LayerStyle> {
        self.layers.get(layer as usize).ok_or_else(|| {
            FractreeError::contract(format!(
                "layer {layer} outside snapshot domain 0..={}",
                self.num_layers()
            ))
        })
    }
}
