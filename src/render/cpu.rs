use std::path::Path;

use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{FractreeError, FractreeResult};
use crate::render::surface::DrawSurface;
use crate::tree::draw::LineStroke;

/// Tolerance used when flattening marker circles.
const ARC_TOLERANCE: f64 = 0.05;

/// Rendered frame pixels.
///
/// Pixels are RGBA8 and **premultiplied**; `premultiplied` is included to make this explicit at
/// API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA8 copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            for px in out.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
        out
    }

    /// Straight-alpha pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        let a = u16::from(px[3]);
        if !self.premultiplied || a == 0 {
            return Some([px[0], px[1], px[2], px[3]]);
        }
        let un = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
        Some([un(px[0]), un(px[1]), un(px[2]), px[3]])
    }

    /// Write the frame as a PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> FractreeResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                FractreeError::render(format!(
                    "failed to create output dir '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| FractreeError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Raster surface backed by `vello_cpu`.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    background: Option<Rgb8>,
    path: vello_cpu::kurbo::BezPath,
}

impl CpuSurface {
    /// Surface of `canvas` size, cleared to `background` (transparent when `None`).
    pub fn new(canvas: Canvas, background: Option<Rgb8>) -> FractreeResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FractreeError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FractreeError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(FractreeError::render("surface must be at least 1x1"));
        }
        let mut surface = Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            background,
            path: vello_cpu::kurbo::BezPath::new(),
        };
        surface.clear()?;
        Ok(surface)
    }

    /// Rasterize everything drawn since the last `clear`.
    pub fn finish(&mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn paint(color: Rgb8, opacity: f64) -> vello_cpu::peniko::Color {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, a)
    }

    fn circle(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
        use vello_cpu::kurbo::Shape as _;

        vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius.max(0.0)).to_path(ARC_TOLERANCE)
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self) -> FractreeResult<()> {
        self.ctx.reset();
        self.path = vello_cpu::kurbo::BezPath::new();
        if let Some(bg) = self.background {
            self.ctx.set_paint(Self::paint(bg, 1.0));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path = vello_cpu::kurbo::BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(point_to_cpu(p));
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(point_to_cpu(p));
    }

    fn stroke(&mut self, stroke: &LineStroke) -> FractreeResult<()> {
        if stroke.width <= 0.0 || stroke.opacity <= 0.0 {
            return Ok(());
        }
        self.ctx.set_paint(Self::paint(stroke.color, stroke.opacity));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(stroke.width).with_join(vello_cpu::kurbo::Join::Round),
        );
        self.ctx.stroke_path(&self.path);
        Ok(())
    }

    fn fill_arc(&mut self, center: Point, radius: f64, color: Rgb8) -> FractreeResult<()> {
        let circle = Self::circle(center, radius);
        self.ctx.set_paint(Self::paint(color, 1.0));
        self.ctx.fill_path(&circle);
        Ok(())
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Rgb8,
    ) -> FractreeResult<()> {
        let circle = Self::circle(center, radius);
        self.ctx.set_paint(Self::paint(color, 1.0));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width.max(0.0)));
        self.ctx.stroke_path(&circle);
        Ok(())
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
