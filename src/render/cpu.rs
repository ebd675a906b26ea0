use crate::field::build::WaveField;
use crate::foundation::core::BezPath;
use crate::foundation::error::WavefieldResult;
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};

/// CPU backend powered by `vello_cpu`.
///
/// The render context and target pixmap are reused across frames of the same size.
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl CpuBackend {
    /// Create a backend with the given settings.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            pixmap: None,
        }
    }

    fn take_ctx(&mut self, width: u16, height: u16) -> vello_cpu::RenderContext {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx
    }

    fn take_pixmap(&mut self, width: u16, height: u16) -> vello_cpu::Pixmap {
        match self.pixmap.take() {
            Some(mut pm) if pm.width() == width && pm.height() == height => {
                pm.data_as_u8_slice_mut().fill(0);
                pm
            }
            _ => vello_cpu::Pixmap::new(width, height),
        }
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip_all)]
    fn render_field(&mut self, field: &WaveField) -> WavefieldResult<FrameRGBA> {
        let canvas = field.canvas();
        let (w, h) = canvas.size_u16()?;
        let mut ctx = self.take_ctx(w, h);
        let mut pixmap = self.take_pixmap(w, h);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }

        for wave in field.paths() {
            let path = bezpath_to_cpu(&wave.path().to_bezpath());

            let [r, g, b, a] = wave.fill().to_rgba8();
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_path(&path);

            if wave.stroke_width() > 0.0 {
                let [r, g, b, a] = wave.stroke().to_rgba8();
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(wave.stroke_width()));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.stroke_path(&path);
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let out = FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.ctx = Some(ctx);
        self.pixmap = Some(pixmap);
        Ok(out)
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
