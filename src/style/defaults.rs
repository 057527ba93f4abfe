use std::path::Path;

use crate::foundation::error::{FractreeError, FractreeResult};
use crate::style::attribute::StyleAttribute;
use crate::style::value::StyleValue;

/// A bound value as written in the defaults document: JSON string or number.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    /// String form (`"#42d9c8"`, `"dot"`, `"0.5"`).
    Text(String),
    /// Bare JSON number.
    Number(f64),
}

impl SeedValue {
    /// Textual form, as the bounds store holds it.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(v) => v.to_string(),
        }
    }
}

/// `{start, end}` seed pair of one attribute.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundSeed {
    /// Seed for the `start` bound.
    pub start: SeedValue,
    /// Seed for the `end` bound.
    pub end: SeedValue,
}

/// Style defaults resource, keyed by attribute name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleDefaults {
    /// Branch color seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<BoundSeed>,
    /// Branch width seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<BoundSeed>,
    /// Branch length seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<BoundSeed>,
    /// Branch opacity seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<BoundSeed>,
    /// Symbol seeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<BoundSeed>,
    /// Symbol color seeds.
    #[serde(
        default,
        rename = "symbolColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol_color: Option<BoundSeed>,
}

impl StyleDefaults {
    /// Parse a defaults document.
    pub fn from_json_str(text: &str) -> FractreeResult<Self> {
        serde_json::from_str(text).map_err(|e| FractreeError::serde(e.to_string()))
    }

    /// Load a defaults document from disk.
    pub fn load(path: &Path) -> FractreeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FractreeError::resource(format!(
                "could not load default tree styles '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text).map_err(|e| {
            FractreeError::resource(format!(
                "could not parse default tree styles '{}': {e}",
                path.display()
            ))
        })
    }

    /// Defaults compiled into the crate; every attribute is present.
    pub fn builtin() -> Self {
        fn text(start: &str, end: &str) -> Option<BoundSeed> {
            Some(BoundSeed {
                start: SeedValue::Text(start.to_owned()),
                end: SeedValue::Text(end.to_owned()),
            })
        }
        fn number(start: f64, end: f64) -> Option<BoundSeed> {
            Some(BoundSeed {
                start: SeedValue::Number(start),
                end: SeedValue::Number(end),
            })
        }

        Self {
            color: text("#42d9c8", "#ad343e"),
            width: number(4.0, 0.5),
            length: number(90.0, 12.0),
            opacity: number(1.0, 0.5),
            symbol: text("none", "dot"),
            symbol_color: text("#f2e94e", "#f2e94e"),
        }
    }

    /// Seed pair for `attr`, if the document has one.
    pub fn seed(&self, attr: StyleAttribute) -> Option<&BoundSeed> {
        match attr {
            StyleAttribute::Color => self.color.as_ref(),
            StyleAttribute::Width => self.width.as_ref(),
            StyleAttribute::Length => self.length.as_ref(),
            StyleAttribute::Opacity => self.opacity.as_ref(),
            StyleAttribute::Symbol => self.symbol.as_ref(),
            StyleAttribute::SymbolColor => self.symbol_color.as_ref(),
        }
    }

    /// Seed pair for `attr` parsed into typed bounds.
    pub fn bounds(&self, attr: StyleAttribute) -> Option<FractreeResult<BoundPair>> {
        let seed = self.seed(attr)?;
        Some(BoundPair::parse(attr, &seed.start.to_text(), &seed.end.to_text()))
    }
}

/// Typed `start`/`end` bounds of one attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundPair {
    /// Value the interpolation starts from.
    pub start: StyleValue,
    /// Value the interpolation ends at.
    pub end: StyleValue,
}

impl BoundPair {
    /// Parse both bounds with `attr`'s value type.
    pub fn parse(attr: StyleAttribute, start: &str, end: &str) -> FractreeResult<Self> {
        let kind = attr.kind();
        Ok(Self {
            start: StyleValue::parse(kind, start)?,
            end: StyleValue::parse(kind, end)?,
        })
    }

    /// Built-in bounds for `attr`.
    pub fn builtin(attr: StyleAttribute) -> Self {
        match attr {
            StyleAttribute::Color => Self::colors(0x42d9c8, 0xad343e),
            StyleAttribute::Width => Self::numbers(4.0, 0.5),
            StyleAttribute::Length => Self::numbers(90.0, 12.0),
            StyleAttribute::Opacity => Self::numbers(1.0, 0.5),
            StyleAttribute::Symbol => Self {
                start: StyleValue::Symbol(crate::style::value::Symbol::None),
                end: StyleValue::Symbol(crate::style::value::Symbol::Dot),
            },
            StyleAttribute::SymbolColor => Self::colors(0xf2e94e, 0xf2e94e),
        }
    }

    fn numbers(start: f64, end: f64) -> Self {
        Self {
            start: StyleValue::Number(start),
            end: StyleValue::Number(end),
        }
    }

    fn colors(start: u32, end: u32) -> Self {
        fn rgb(v: u32) -> StyleValue {
            let [_, r, g, b] = v.to_be_bytes();
            StyleValue::Color(crate::foundation::core::Rgb8::new(r, g, b))
        }
        Self {
            start: rgb(start),
            end: rgb(end),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/defaults.rs"]
mod tests;
