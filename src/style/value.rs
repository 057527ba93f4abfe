use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::foundation::numeric::parse_number;

/// Marker drawn at a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// No marker.
    #[default]
    None,
    /// Filled disc.
    Dot,
    /// Stroked ring.
    Circle,
}

impl Symbol {
    /// External tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dot => "dot",
            Self::Circle => "circle",
        }
    }

    /// `true` when something is drawn for this marker.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl FromStr for Symbol {
    type Err = FractreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "dot" => Ok(Self::Dot),
            "circle" => Ok(Self::Circle),
            other => Err(FractreeError::validation(format!(
                "unknown symbol \"{other}\" (expected none, dot or circle)"
            ))),
        }
    }
}

/// Value type carried by a style attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// `#rrggbb` color.
    Color,
    /// Finite real number.
    Number,
    /// Symbol tag.
    Symbol,
}

/// One attribute value at one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleValue {
    /// Color value.
    Color(Rgb8),
    /// Numeric value.
    Number(f64),
    /// Symbol value.
    Symbol(Symbol),
}

impl StyleValue {
    /// Parse the textual form used by the bounds store and the control surface.
    pub fn parse(kind: ValueKind, raw: &str) -> FractreeResult<Self> {
        match kind {
            ValueKind::Color => Rgb8::parse_hex(raw).map(Self::Color),
            ValueKind::Number => parse_number(raw).map(Self::Number).ok_or_else(|| {
                FractreeError::validation(format!("\"{raw}\" is not a finite number"))
            }),
            ValueKind::Symbol => raw.parse().map(Self::Symbol),
        }
    }

    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Color(_) => ValueKind::Color,
            Self::Number(_) => ValueKind::Number,
            Self::Symbol(_) => ValueKind::Symbol,
        }
    }

    /// Color payload, or a contract violation for any other kind.
    pub fn as_color(&self) -> FractreeResult<Rgb8> {
        match self {
            Self::Color(c) => Ok(*c),
            other => Err(FractreeError::contract(format!(
                "expected a color style value, got {other:?}"
            ))),
        }
    }

    /// Numeric payload, or a contract violation for any other kind.
    pub fn as_number(&self) -> FractreeResult<f64> {
        match self {
            Self::Number(v) => Ok(*v),
            other => Err(FractreeError::contract(format!(
                "expected a numeric style value, got {other:?}"
            ))),
        }
    }

    /// Symbol payload, or a contract violation for any other kind.
    pub fn as_symbol(&self) -> FractreeResult<Symbol> {
        match self {
            Self::Symbol(s) => Ok(*s),
            other => Err(FractreeError::contract(format!(
                "expected a symbol style value, got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "{c}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Symbol(s) => f.write_str(s.tag()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/value.rs"]
mod tests;
