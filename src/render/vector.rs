use image::{Rgba, RgbaImage};
use kurbo::{Point, Rect};

use crate::assets::font::{TextBrushRgba8, TextLine};
use crate::foundation::error::{PhotopostError, PhotopostResult};
use crate::render::compositor::over_premul_buffer;

/// Where a text line sits relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextPlacement {
    /// Anchor the line's box is centered on.
    pub(crate) center: Point,
    /// Horizontal squeeze factor; `1.0` leaves glyphs untouched. Height is never scaled.
    pub(crate) x_scale: f64,
}

impl TextPlacement {
    pub(crate) fn centered(x: f64, y: f64) -> Self {
        Self {
            center: Point::new(x, y),
            x_scale: 1.0,
        }
    }

    /// Squeeze horizontally so a line of `width` px never exceeds `max_width` px.
    pub(crate) fn fit_width(mut self, width: f64, max_width: f64) -> Self {
        if width > max_width && width > 0.0 {
            self.x_scale = max_width / width;
        }
        self
    }
}

/// Vector drawing layer rasterized by `vello_cpu` and composited onto a straight RGBA image.
pub(crate) struct VectorLayer {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl VectorLayer {
    pub(crate) fn for_image(base: &RgbaImage) -> PhotopostResult<Self> {
        let width: u16 = base
            .width()
            .try_into()
            .map_err(|_| PhotopostError::render("layer width exceeds u16"))?;
        let height: u16 = base
            .height()
            .try_into()
            .map_err(|_| PhotopostError::render("layer height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(PhotopostError::render("layer is zero-sized"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    pub(crate) fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(to_cpu_point(*first));
        for p in rest {
            path.line_to(to_cpu_point(*p));
        }
        path.close_path();

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&path);
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    pub(crate) fn fill_text(&mut self, line: &TextLine, placement: TextPlacement) {
        let w = f64::from(line.width());
        let h = f64::from(line.height());
        let transform = vello_cpu::kurbo::Affine::translate((placement.center.x, placement.center.y))
            * vello_cpu::kurbo::Affine::scale_non_uniform(placement.x_scale, 1.0)
            * vello_cpu::kurbo::Affine::translate((-w / 2.0, -h / 2.0));
        self.ctx.set_transform(transform);

        for row in line.layout().lines() {
            for item in row.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush: TextBrushRgba8 = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(line.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far and source-over it onto `base`.
    pub(crate) fn composite_onto(mut self, base: &mut RgbaImage) -> PhotopostResult<()> {
        if base.width() != u32::from(self.width) || base.height() != u32::from(self.height) {
            return Err(PhotopostError::render("layer and base image sizes differ"));
        }
        // `vello_cpu` renders into a fresh buffer, so composite the result afterwards.
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        over_premul_buffer(base, pixmap.data_as_u8_slice())
    }
}

fn to_cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn to_cpu_color(c: Rgba<u8>) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.0;
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}
