use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::FractreeResult;
use crate::tree::draw::LineStroke;

/// Sink executing drawing primitives.
///
/// Path state follows the usual immediate-mode model: `begin_path` discards the current path,
/// `move_to`/`line_to` extend it, `stroke` paints it.
pub trait DrawSurface {
    /// Reset the surface before a full regeneration.
    fn clear(&mut self) -> FractreeResult<()>;
    /// Start a new, empty path.
    fn begin_path(&mut self);
    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Point);
    /// Extend the current subpath to `p`.
    fn line_to(&mut self, p: Point);
    /// Stroke the current path.
    fn stroke(&mut self, stroke: &LineStroke) -> FractreeResult<()>;
    /// Fill a full circle.
    fn fill_arc(&mut self, center: Point, radius: f64, color: Rgb8) -> FractreeResult<()>;
    /// Stroke a full circle.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Rgb8,
    ) -> FractreeResult<()>;
}

/// A primitive captured by [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceCommand {
    /// `clear`
    Clear,
    /// `begin_path`
    BeginPath,
    /// `move_to`
    MoveTo(Point),
    /// `line_to`
    LineTo(Point),
    /// `stroke`
    Stroke(LineStroke),
    /// `fill_arc`
    FillArc {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Fill color.
        color: Rgb8,
    },
    /// `stroke_arc`
    StrokeArc {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgb8,
    },
}

/// In-memory surface for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    clears: usize,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the last `clear` (the `Clear` itself included).
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Number of `clear` calls over the surface lifetime.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Number of `stroke` commands in the current recording.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Stroke(_)))
            .count()
    }

    /// Number of arc commands in the current recording.
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    SurfaceCommand::FillArc { .. } | SurfaceCommand::StrokeArc { .. }
                )
            })
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) -> FractreeResult<()> {
        self.commands.clear();
        self.commands.push(SurfaceCommand::Clear);
        self.clears += 1;
        Ok(())
    }

    fn begin_path(&mut self) {
        self.commands.push(SurfaceCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(SurfaceCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(SurfaceCommand::LineTo(p));
    }

    fn stroke(&mut self, stroke: &LineStroke) -> FractreeResult<()> {
        self.commands.push(SurfaceCommand::Stroke(*stroke));
        Ok(())
    }

    fn fill_arc(&mut self, center: Point, radius: f64, color: Rgb8) -> FractreeResult<()> {
        self.commands.push(SurfaceCommand::FillArc {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Rgb8,
    ) -> FractreeResult<()> {
        self.commands.push(SurfaceCommand::StrokeArc {
            center,
            radius,
            width,
            color,
        });
        Ok(())
    }
}
