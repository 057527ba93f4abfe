//! JSON scene configuration: canvas, controls, style resources and animation settings.

use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::foundation::numeric::coerce_rate;
use crate::render::workers::{RenderWorkers, WorkerOpts};
use crate::scene::params::{SceneParams, SweepParam};
use crate::scene::session::TreeSession;
use crate::style::branch_style::BranchStyle;
use crate::style::defaults::StyleDefaults;
use crate::style::store::{BoundsStore, JsonFileStore, MemoryStore};

/// Pacer settings of a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Target updates per second; values below 1 are raised to 1.
    pub rate: f64,
    /// Control swept by the pacer.
    pub target: SweepParam,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rate: 30.0,
            target: SweepParam::Angle,
        }
    }
}

impl AnimationConfig {
    /// Rate after coercion.
    pub fn effective_rate(&self) -> f64 {
        coerce_rate(Some(self.rate))
    }
}

/// A complete scene description. Every field has a default, so `{}` is a valid document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Output size; trees are rooted at its center.
    pub canvas: Canvas,
    /// Fill behind the trees; `None` leaves the frame transparent.
    pub background: Option<Rgb8>,
    /// Tree controls.
    pub params: SceneParams,
    /// Style defaults document. The built-in defaults are used when absent.
    pub defaults_path: Option<PathBuf>,
    /// Persisted bounds file. Bounds live in memory only when absent.
    pub store_path: Option<PathBuf>,
    /// Render worker threads; `None` paints on the calling thread.
    pub threads: Option<usize>,
    /// Pacer settings.
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Some(Rgb8::new(0x10, 0x14, 0x18)),
            params: SceneParams::default(),
            defaults_path: None,
            store_path: None,
            threads: None,
            animation: AnimationConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a scene document.
    pub fn from_json_str(text: &str) -> FractreeResult<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| FractreeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a scene document from disk.
    pub fn load(path: &Path) -> FractreeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FractreeError::resource(format!("read scene config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Structural checks that serde cannot express.
    pub fn validate(&self) -> FractreeResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FractreeError::validation("canvas width/height must be non-zero"));
        }
        if self.threads == Some(0) {
            return Err(FractreeError::validation("threads must be >= 1 when set"));
        }
        self.params.validate()
    }

    /// Bounds store named by `store_path`, or a fresh in-memory one.
    ///
    /// A store file that cannot be read or parsed is logged and replaced by an in-memory store;
    /// the file itself is left untouched.
    pub fn open_store(&self) -> Box<dyn BoundsStore> {
        let Some(path) = &self.store_path else {
            return Box::new(MemoryStore::new());
        };
        match JsonFileStore::open(path.clone()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "bounds store unavailable, using defaults in memory");
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Style over [`Self::open_store`], seeded from the defaults document.
    ///
    /// `force_overwrite` replaces every stored bound, as a reset to defaults does.
    pub fn open_style(&self, force_overwrite: bool) -> FractreeResult<BranchStyle> {
        let mut style = BranchStyle::new(self.open_store());
        match &self.defaults_path {
            Some(path) => style.initialise_from_path(path, force_overwrite)?,
            None => style.initialise(Some(&StyleDefaults::builtin()), force_overwrite)?,
        }
        Ok(style)
    }

    /// Session for this scene, with render workers when `threads` is set.
    pub fn open_session(&self) -> FractreeResult<TreeSession> {
        let session = TreeSession::new(self.open_style(false)?, self.params, self.canvas)?;
        Ok(match self.threads {
            Some(threads) => session.with_workers(RenderWorkers::new(&WorkerOpts {
                threads: Some(threads),
                ..WorkerOpts::default()
            })?),
            None => session,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
