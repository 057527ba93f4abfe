use rayon::prelude::*;

use crate::foundation::error::{FractreeError, FractreeResult};
use crate::render::painter::execute;
use crate::render::surface::DrawSurface;
use crate::style::snapshot::StyleSnapshot;
use crate::tree::draw::{DrawInstruction, RenderMode, instructions_for_slice};
use crate::tree::node::{Node, NodeArena};

/// One unit of worker input: a disjoint slice of the frame's nodes, the style needed to resolve
/// them, and the pass it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct RenderJob<'a> {
    /// Nodes to resolve.
    pub nodes: &'a [Node],
    /// Arena the nodes belong to (parents are looked up here).
    pub arena: &'a NodeArena,
    /// Resolved style of the frame.
    pub style: &'a StyleSnapshot,
    /// Pass this job belongs to.
    pub mode: RenderMode,
}

impl RenderJob<'_> {
    /// Resolve this job into draw instructions, in node order.
    pub fn run(&self) -> FractreeResult<Vec<DrawInstruction>> {
        instructions_for_slice(self.arena, self.nodes, self.style, self.mode)
    }
}

/// Threading and chunking controls for worker fan-out.
#[derive(Clone, Debug)]
pub struct WorkerOpts {
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Nodes per job.
    pub chunk_size: usize,
}

impl Default for WorkerOpts {
    fn default() -> Self {
        Self {
            threads: None,
            chunk_size: 4096,
        }
    }
}

/// Fans instruction resolution out over a rayon pool.
///
/// Every frame is issued as two dispatch rounds, lines then symbols, so no marker is painted
/// before every line of the frame is.
pub struct RenderWorkers {
    pool: rayon::ThreadPool,
    chunk_size: usize,
}

impl RenderWorkers {
    /// Build a dedicated pool.
    pub fn new(opts: &WorkerOpts) -> FractreeResult<Self> {
        Ok(Self {
            pool: build_thread_pool(opts.threads)?,
            chunk_size: opts.chunk_size.max(1),
        })
    }

    /// Worker thread count.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Clear `surface` and paint `arena` in two rounds.
    #[tracing::instrument(skip_all, fields(nodes = arena.len(), chunk = self.chunk_size))]
    pub fn paint_tree(
        &self,
        surface: &mut dyn DrawSurface,
        arena: &NodeArena,
        style: &StyleSnapshot,
    ) -> FractreeResult<()> {
        surface.clear()?;
        for mode in [RenderMode::Line, RenderMode::Symbol] {
            for batch in self.dispatch_round(arena, style, mode)? {
                for ins in &batch {
                    execute(surface, ins)?;
                }
            }
        }
        Ok(())
    }

    /// Run one round of jobs over the whole arena; batches come back in node order.
    pub fn dispatch_round(
        &self,
        arena: &NodeArena,
        style: &StyleSnapshot,
        mode: RenderMode,
    ) -> FractreeResult<Vec<Vec<DrawInstruction>>> {
        let chunk = self.chunk_size;
        self.pool.install(|| {
            arena
                .nodes()
                .par_chunks(chunk)
                .map(|nodes| {
                    RenderJob {
                        nodes,
                        arena,
                        style,
                        mode,
                    }
                    .run()
                })
                .collect()
        })
    }
}

fn build_thread_pool(threads: Option<usize>) -> FractreeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FractreeError::validation(
            "render worker 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FractreeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/workers.rs"]
mod tests;
