use crate::animation::pacer::SweepTarget;
use crate::animation::sweep::SweepBounds;
use crate::foundation::core::Canvas;
use crate::foundation::error::FractreeResult;
use crate::render::painter::paint_tree;
use crate::render::surface::DrawSurface;
use crate::render::workers::RenderWorkers;
use crate::scene::params::{SceneParams, SweepParam};
use crate::style::branch_style::BranchStyle;
use crate::tree::generator::{TreeGenerator, TreeParams};
use crate::tree::node::NodeArena;

/// Style, controls and generator of one drawing: the unit a control surface drives.
///
/// Every control change goes through [`TreeSession::regenerate`], which rebuilds the style
/// tables when the layer count moved, re-expands the trees and repaints the surface from scratch.
pub struct TreeSession {
    style: BranchStyle,
    params: SceneParams,
    canvas: Canvas,
    generator: TreeGenerator,
    workers: Option<RenderWorkers>,
}

impl TreeSession {
    /// New session; `params` must validate.
    pub fn new(style: BranchStyle, params: SceneParams, canvas: Canvas) -> FractreeResult<Self> {
        params.validate()?;
        Ok(Self {
            style,
            params,
            canvas,
            generator: TreeGenerator::new(),
            workers: None,
        })
    }

    /// Resolve draw instructions on a worker pool instead of the calling thread.
    pub fn with_workers(mut self, workers: RenderWorkers) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Style of this session.
    pub fn style(&self) -> &BranchStyle {
        &self.style
    }

    /// Mutable style, for bound edits. Call [`TreeSession::regenerate`] afterwards.
    pub fn style_mut(&mut self) -> &mut BranchStyle {
        &mut self.style
    }

    /// Current controls.
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Mutable controls. Call [`TreeSession::regenerate`] afterwards.
    pub fn params_mut(&mut self) -> &mut SceneParams {
        &mut self.params
    }

    /// Drawing area; trees are rooted at its center.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Nodes of the last regeneration.
    pub fn arena(&self) -> &NodeArena {
        self.generator.arena()
    }

    /// Generator input for the current controls.
    pub fn tree_params(&self) -> TreeParams {
        self.params.tree_params(self.canvas.center())
    }

    /// Rebuild style tables if needed, regenerate every tree and repaint `surface`.
    #[tracing::instrument(skip_all)]
    pub fn regenerate(&mut self, surface: &mut dyn DrawSurface) -> FractreeResult<()> {
        let params = self.tree_params();
        if self.style.num_layers() != Some(params.num_layers) {
            self.style.set_num_layers(params.num_layers)?;
        }
        self.generator.generate_forest(&self.style, &params)?;
        let snapshot = self.style.snapshot()?;
        let arena = self.generator.arena();
        match &self.workers {
            Some(workers) => workers.paint_tree(surface, arena, &snapshot),
            None => paint_tree(surface, arena, &snapshot),
        }
    }

    /// Pacer target sweeping `param` and repainting `surface` after every update.
    pub fn sweep<'a, S: DrawSurface>(
        &'a mut self,
        param: SweepParam,
        surface: &'a mut S,
    ) -> SessionSweep<'a, S> {
        SessionSweep {
            session: self,
            surface,
            param,
        }
    }
}

/// [`SweepTarget`] over one control of a [`TreeSession`].
pub struct SessionSweep<'a, S: DrawSurface> {
    session: &'a mut TreeSession,
    surface: &'a mut S,
    param: SweepParam,
}

impl<S: DrawSurface> SessionSweep<'_, S> {
    /// Swept control.
    pub fn param(&self) -> SweepParam {
        self.param
    }

    /// The session being driven.
    pub fn session(&self) -> &TreeSession {
        &*self.session
    }

    /// The surface being painted.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: DrawSurface> SweepTarget for SessionSweep<'_, S> {
    fn bounds(&self) -> FractreeResult<SweepBounds> {
        self.session.params.control(self.param).bounds()
    }

    fn value(&self) -> i64 {
        self.session.params.control(self.param).value()
    }

    fn set_value(&mut self, value: i64) -> FractreeResult<()> {
        self.session.params.control_mut(self.param).set_value(value);
        Ok(())
    }

    fn redraw(&mut self) -> FractreeResult<()> {
        self.session.regenerate(&mut *self.surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/session.rs"]
mod tests;
