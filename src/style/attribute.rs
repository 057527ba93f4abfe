use std::fmt;
use std::str::FromStr;

use crate::foundation::error::FractreeError;
use crate::style::layer_map::{InterpLaw, LinearMode};
use crate::style::value::ValueKind;

/// The fixed set of per-layer style attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleAttribute {
    /// Branch stroke color.
    Color,
    /// Branch stroke width.
    Width,
    /// Length of the branches grown out of a layer.
    Length,
    /// Branch stroke opacity.
    Opacity,
    /// Marker drawn at a node.
    Symbol,
    /// Marker color.
    SymbolColor,
}

impl StyleAttribute {
    /// Every attribute, in table order.
    pub const ALL: [StyleAttribute; 6] = [
        Self::Color,
        Self::Width,
        Self::Length,
        Self::Opacity,
        Self::Symbol,
        Self::SymbolColor,
    ];

    /// Number of attributes; the size of per-attribute tables.
    pub const COUNT: usize = Self::ALL.len();

    /// Position in per-attribute tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used by the control surface and the defaults document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Width => "width",
            Self::Length => "length",
            Self::Opacity => "opacity",
            Self::Symbol => "symbol",
            Self::SymbolColor => "symbolColor",
        }
    }

    /// Prefix of the persisted `<name>Start` / `<name>End` keys.
    pub fn storage_name(self) -> &'static str {
        match self {
            Self::Color => "branchColor",
            Self::Width => "branchWidth",
            Self::Length => "branchLength",
            Self::Opacity => "branchOpacity",
            Self::Symbol => "symbol",
            Self::SymbolColor => "symbolColor",
        }
    }

    /// Store key holding the `start` bound.
    pub fn start_key(self) -> String {
        format!("{}Start", self.storage_name())
    }

    /// Store key holding the `end` bound.
    pub fn end_key(self) -> String {
        format!("{}End", self.storage_name())
    }

    /// Type of the values this attribute maps layers to.
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Color | Self::SymbolColor => ValueKind::Color,
            Self::Width | Self::Length | Self::Opacity => ValueKind::Number,
            Self::Symbol => ValueKind::Symbol,
        }
    }

    /// How start/end bounds spread across layers.
    pub fn law(self) -> InterpLaw {
        match self {
            Self::Color => InterpLaw::Geometric,
            Self::Width | Self::Length | Self::Opacity => InterpLaw::Linear(LinearMode::PinnedRoot),
            Self::Symbol | Self::SymbolColor => InterpLaw::Threshold,
        }
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleAttribute {
    type Err = FractreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| FractreeError::unknown_attribute(s))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/attribute.rs"]
mod tests;
