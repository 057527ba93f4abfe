use std::path::Path;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::style::attribute::StyleAttribute;
use crate::style::defaults::{BoundPair, StyleDefaults};
use crate::style::layer_map::StyleAttributeMap;
use crate::style::snapshot::{LayerStyle, StyleSnapshot};
use crate::style::store::BoundsStore;
use crate::style::value::{StyleValue, Symbol};

/// Per-layer presentation of a tree: one [`StyleAttributeMap`] per [`StyleAttribute`] plus the
/// persisted `start`/`end` bounds they are built from.
///
/// Maps are only ever replaced as a complete set, so a reader sees either the previous layer
/// count everywhere or the new one everywhere.
pub struct BranchStyle {
    store: Box<dyn BoundsStore>,
    bounds: [BoundPair; StyleAttribute::COUNT],
    maps: Option<[StyleAttributeMap; StyleAttribute::COUNT]>,
}

impl BranchStyle {
    /// Create a style over `store`. Bounds come from the store where it holds a parseable value and
    /// from the built-in defaults elsewhere; nothing is written back until [`Self::initialise`].
    pub fn new(store: Box<dyn BoundsStore>) -> Self {
        let bounds = StyleAttribute::ALL.map(BoundPair::builtin);
        let mut style = Self {
            store,
            bounds,
            maps: None,
        };
        style.reload_bounds();
        style
    }

    /// Seed the bounds from `defaults`.
    ///
    /// Without `force_overwrite`, only bounds the store lacks (or holds in unparseable form) are
    /// taken from the document. With it, every bound the document provides is overwritten. Taken
    /// bounds apply in memory first and are persisted best-effort. `None` means the defaults
    /// resource was unavailable: cached bounds stay, built-ins fill the gaps.
    pub fn initialise(
        &mut self,
        defaults: Option<&StyleDefaults>,
        force_overwrite: bool,
    ) -> FractreeResult<()> {
        self.reload_bounds();
        if let Some(defaults) = defaults {
            for attr in StyleAttribute::ALL {
                let Some(seed) = defaults.seed(attr) else {
                    continue;
                };
                let (start_text, end_text) = (seed.start.to_text(), seed.end.to_text());
                let pair = match BoundPair::parse(attr, &start_text, &end_text) {
                    Ok(pair) => pair,
                    Err(e) => {
                        tracing::warn!(
                            attribute = %attr,
                            error = %e,
                            "ignoring invalid default bounds"
                        );
                        continue;
                    }
                };
                let start_key = attr.start_key();
                if force_overwrite || self.cached(attr, &start_key).is_none() {
                    self.bounds[attr.index()].start = pair.start;
                    self.persist(&start_key, &start_text);
                }
                let end_key = attr.end_key();
                if force_overwrite || self.cached(attr, &end_key).is_none() {
                    self.bounds[attr.index()].end = pair.end;
                    self.persist(&end_key, &end_text);
                }
            }
        }
        self.rebuild_current()
    }

    /// Load the defaults document at `path` and [`Self::initialise`] from it. A load failure is
    /// logged and treated as an absent document.
    pub fn initialise_from_path(
        &mut self,
        path: &Path,
        force_overwrite: bool,
    ) -> FractreeResult<()> {
        match StyleDefaults::load(path) {
            Ok(defaults) => self.initialise(Some(&defaults), force_overwrite),
            Err(e) => {
                tracing::warn!(error = %e, "could not load default tree styles");
                self.initialise(None, force_overwrite)
            }
        }
    }

    /// Overwrite every stored bound from `defaults`.
    pub fn reset_to_defaults(&mut self, defaults: &StyleDefaults) -> FractreeResult<()> {
        self.initialise(Some(defaults), true)
    }

    /// Current bounds of `attr`.
    pub fn bounds(&self, attr: StyleAttribute) -> BoundPair {
        self.bounds[attr.index()]
    }

    /// Replace the bounds of `attr` from their textual form, persist them, and rebuild that
    /// attribute's map if maps are built. Invalid text leaves everything unchanged.
    pub fn set_bounds(
        &mut self,
        attr: StyleAttribute,
        start: &str,
        end: &str,
    ) -> FractreeResult<()> {
        let pair = BoundPair::parse(attr, start, end)?;
        if let Some(maps) = &mut self.maps {
            let n = maps[attr.index()]
                .num_layers()
                .ok_or_else(|| FractreeError::contract("built style holds an unbuilt map"))?;
            maps[attr.index()].build(&pair.start, &pair.end, n)?;
        }
        self.bounds[attr.index()] = pair;
        self.persist(&attr.start_key(), &pair.start.to_string());
        self.persist(&attr.end_key(), &pair.end.to_string());
        Ok(())
    }

    /// Rebuild every attribute map for `num_layers`. All-or-nothing: on error the previous maps
    /// (or the unbuilt state) remain.
    pub fn set_num_layers(&mut self, num_layers: u32) -> FractreeResult<()> {
        let mut built = Vec::with_capacity(StyleAttribute::COUNT);
        for attr in StyleAttribute::ALL {
            let pair = &self.bounds[attr.index()];
            built.push(StyleAttributeMap::built(
                attr.law(),
                &pair.start,
                &pair.end,
                num_layers,
            )?);
        }
        let maps: [StyleAttributeMap; StyleAttribute::COUNT] = built
            .try_into()
            .map_err(|_| FractreeError::contract("style map table has the wrong arity"))?;
        self.maps = Some(maps);
        tracing::debug!(num_layers, "rebuilt branch style maps");
        Ok(())
    }

    /// Layer count the maps are built for.
    pub fn num_layers(&self) -> Option<u32> {
        self.maps
            .as_ref()
            .and_then(|maps| maps[0].num_layers())
    }

    /// Value of `attr` at `layer`.
    pub fn get_value(&self, attr: StyleAttribute, layer: u32) -> FractreeResult<&StyleValue> {
        let maps = self.maps.as_ref().ok_or_else(|| {
            FractreeError::contract(format!(
                "style queried for {attr} at layer {layer} before the layer count was set"
            ))
        })?;
        maps[attr.index()].get(layer)
    }

    /// Value of the attribute called `name` at `layer`.
    pub fn get_value_by_name(&self, name: &str, layer: u32) -> FractreeResult<&StyleValue> {
        self.get_value(name.parse()?, layer)
    }

    /// Branch color at `layer`.
    pub fn color(&self, layer: u32) -> FractreeResult<Rgb8> {
        self.get_value(StyleAttribute::Color, layer)?.as_color()
    }

    /// Branch width at `layer`.
    pub fn width(&self, layer: u32) -> FractreeResult<f64> {
        self.get_value(StyleAttribute::Width, layer)?.as_number()
    }

    /// Length of branches grown out of `layer`.
    pub fn length(&self, layer: u32) -> FractreeResult<f64> {
        self.get_value(StyleAttribute::Length, layer)?.as_number()
    }

    /// Branch opacity at `layer`.
    pub fn opacity(&self, layer: u32) -> FractreeResult<f64> {
        self.get_value(StyleAttribute::Opacity, layer)?.as_number()
    }

    /// Marker at `layer`.
    pub fn symbol(&self, layer: u32) -> FractreeResult<Symbol> {
        self.get_value(StyleAttribute::Symbol, layer)?.as_symbol()
    }

    /// Marker color at `layer`.
    pub fn symbol_color(&self, layer: u32) -> FractreeResult<Rgb8> {
        self.get_value(StyleAttribute::SymbolColor, layer)?.as_color()
    }

    /// Resolve every attribute at every built layer into an immutable table.
    pub fn snapshot(&self) -> FractreeResult<StyleSnapshot> {
        let n = self.num_layers().ok_or_else(|| {
            FractreeError::contract("style snapshot requested before the layer count was set")
        })?;
        let mut layers = Vec::with_capacity(n as usize + 1);
        for layer in 0..=n {
            layers.push(LayerStyle {
                color: self.color(layer)?,
                width: self.width(layer)?,
                length: self.length(layer)?,
                opacity: self.opacity(layer)?,
                symbol: self.symbol(layer)?,
                symbol_color: self.symbol_color(layer)?,
            });
        }
        Ok(StyleSnapshot::new(layers))
    }

    fn cached(&self, attr: StyleAttribute, key: &str) -> Option<StyleValue> {
        let raw = self.store.get(key)?;
        match StyleValue::parse(attr.kind(), &raw) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, value = %raw, error = %e, "ignoring unparseable stored bound");
                None
            }
        }
    }

    fn reload_bounds(&mut self) {
        for attr in StyleAttribute::ALL {
            let current = self.bounds[attr.index()];
            let start = self.cached(attr, &attr.start_key()).unwrap_or(current.start);
            let end = self.cached(attr, &attr.end_key()).unwrap_or(current.end);
            self.bounds[attr.index()] = BoundPair { start, end };
        }
    }

    fn rebuild_current(&mut self) -> FractreeResult<()> {
        match self.num_layers() {
            Some(n) => self.set_num_layers(n),
            None => Ok(()),
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, error = %e, "failed to persist style bound");
        }
    }
}

impl std::fmt::Debug for BranchStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchStyle")
            .field("bounds", &self.bounds)
            .field("num_layers", &self.num_layers())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/branch_style.rs"]
mod tests;
