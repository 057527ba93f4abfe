//! Fractree draws radially-symmetric, layered branching trees.
//!
//! A scene is a set of root trees fanned around a shared root. Every layer of every tree has its
//! own style (color, width, length, opacity, end-point symbol), interpolated between persisted
//! `start`/`end` bounds. A drift-correcting pacer can sweep one scene control over time.
//!
//! - Configure a [`SceneConfig`] (or build a [`BranchStyle`] + [`SceneParams`] by hand)
//! - Open a [`TreeSession`] and [`TreeSession::regenerate`] it onto any [`DrawSurface`]
//! - Rasterize with [`CpuSurface`] and export a [`FrameRGBA`], or drive the session with an
//!   [`AnimationPacer`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// JSON scene configuration.
pub mod config;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod style;
pub(crate) mod tree;

pub use crate::foundation::core::{Canvas, Point, Rgb8, Vec2};
pub use crate::foundation::error::{FractreeError, FractreeResult};
pub use crate::foundation::numeric::{
    coerce_count, coerce_degrees, coerce_rate, parse_count, parse_number,
};

pub use crate::style::attribute::StyleAttribute;
pub use crate::style::branch_style::BranchStyle;
pub use crate::style::defaults::{BoundPair, BoundSeed, SeedValue, StyleDefaults};
pub use crate::style::layer_map::{InterpLaw, LinearMode, StyleAttributeMap};
pub use crate::style::snapshot::{LayerStyle, StyleSnapshot};
pub use crate::style::store::{BoundsStore, JsonFileStore, MemoryStore};
pub use crate::style::value::{StyleValue, Symbol, ValueKind};

pub use crate::tree::draw::{
    DrawInstruction, LineStroke, MARKER_RADIUS, MARKER_STROKE_WIDTH, RenderMode, build_frame,
    instruction_for, instructions_for_slice,
};
pub use crate::tree::generator::{MAX_LAYERS, MAX_NODES, TreeGenerator, TreeParams, node_count};
pub use crate::tree::node::{Node, NodeArena, NodeId};

pub use crate::render::cpu::{CpuSurface, FrameRGBA};
pub use crate::render::painter::{execute, paint_instructions, paint_tree};
pub use crate::render::surface::{DrawSurface, RecordingSurface, SurfaceCommand};
pub use crate::render::workers::{RenderJob, RenderWorkers, WorkerOpts};

pub use crate::animation::clock::{Clock, ManualClock, SystemClock};
pub use crate::animation::pacer::{
    AnimationPacer, PacerControl, PacerState, PacerStats, SweepTarget,
};
pub use crate::animation::sweep::{Direction, SweepBounds, sweep};

pub use crate::config::{AnimationConfig, SceneConfig};
pub use crate::scene::params::{NumericControl, SceneParams, SweepParam};
pub use crate::scene::session::{SessionSweep, TreeSession};
