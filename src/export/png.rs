use std::io::Cursor;

use egui::{Color32, Pos2, Rect, Vec2};
use futures::channel::oneshot;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::drawing::Drawing;
use crate::stroke::Stroke;
use crate::view::ViewTransform;

use super::{ExportError, ExportResult};

/// Everything needed to rasterize the drawing, detached from the live app
/// state so it can be rendered elsewhere.
#[derive(Debug, Clone)]
pub struct RasterJob {
    pub drawing: Drawing,
    pub background: Color32,
    pub view: ViewTransform,
    pub width: u32,
    pub height: u32,
}

impl RasterJob {
    /// Capture the drawing as currently shown in `canvas`.
    pub fn snapshot(drawing: &Drawing, background: Color32, view: ViewTransform, canvas: Rect) -> Self {
        Self {
            drawing: drawing.clone(),
            background,
            view,
            width: canvas.width().round().max(0.0) as u32,
            height: canvas.height().round().max(0.0) as u32,
        }
    }
}

/// Paint the job into an RGBA image: background fill, then every stroke as
/// a run of discs along its segments.
pub fn rasterize(job: &RasterJob) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(job.width, job.height, Rgba(job.background.to_srgba_unmultiplied()));
    let canvas = Rect::from_min_size(Pos2::ZERO, Vec2::new(job.width as f32, job.height as f32));

    for stroke in job.drawing.strokes() {
        let points: Vec<Pos2> = stroke
            .points()
            .iter()
            .map(|p| job.view.local_to_screen(*p, canvas))
            .collect();
        let radius = (stroke.width() * job.view.zoom() / 2.0).max(0.5);
        paint_stroke(&mut image, stroke, &points, radius);
    }

    image
}

/// Coverage of one stroke over its bounding box. Taking the maximum per
/// pixel keeps overlapping discs of a translucent stroke from darkening.
struct CoverageMask {
    min_x: i64,
    min_y: i64,
    width: usize,
    height: usize,
    coverage: Vec<f32>,
}

impl CoverageMask {
    fn new(bounds: Rect, image_width: u32, image_height: u32) -> Option<Self> {
        let min_x = (bounds.min.x.floor() as i64).max(0);
        let min_y = (bounds.min.y.floor() as i64).max(0);
        let max_x = (bounds.max.x.ceil() as i64).min(image_width as i64);
        let max_y = (bounds.max.y.ceil() as i64).min(image_height as i64);
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        let width = (max_x - min_x) as usize;
        let height = (max_y - min_y) as usize;
        Some(Self {
            min_x,
            min_y,
            width,
            height,
            coverage: vec![0.0; width * height],
        })
    }

    fn stamp_disc(&mut self, center: Pos2, radius: f32) {
        let x0 = ((center.x - radius - 1.0).floor() as i64).max(self.min_x);
        let y0 = ((center.y - radius - 1.0).floor() as i64).max(self.min_y);
        let x1 = ((center.x + radius + 1.0).ceil() as i64).min(self.min_x + self.width as i64);
        let y1 = ((center.y + radius + 1.0).ceil() as i64).min(self.min_y + self.height as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = pixel_center.distance(center);
                // One pixel of antialiasing at the rim
                let alpha = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if alpha > 0.0 {
                    let index = (y - self.min_y) as usize * self.width + (x - self.min_x) as usize;
                    let cell = &mut self.coverage[index];
                    *cell = cell.max(alpha);
                }
            }
        }
    }

    fn stamp_segment(&mut self, start: Pos2, end: Pos2, radius: f32) {
        let distance = start.distance(end);
        if distance < 0.1 {
            self.stamp_disc(start, radius);
            return;
        }
        let steps = distance.ceil() as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_disc(start.lerp(end, t), radius);
        }
    }
}

fn paint_stroke(image: &mut RgbaImage, stroke: &Stroke, points: &[Pos2], radius: f32) {
    let Some(first) = points.first() else {
        return;
    };
    let bounds = Rect::from_points(points).expand(radius + 1.0);
    let Some(mut mask) = CoverageMask::new(bounds, image.width(), image.height()) else {
        return;
    };

    if points.len() == 1 {
        mask.stamp_disc(*first, radius);
    }
    for pair in points.windows(2) {
        mask.stamp_segment(pair[0], pair[1], radius);
    }

    let [r, g, b, a] = stroke.color().to_srgba_unmultiplied();
    let color = [r as f32, g as f32, b as f32];
    let opacity = a as f32 / 255.0;

    for row in 0..mask.height {
        for col in 0..mask.width {
            let coverage = mask.coverage[row * mask.width + col] * opacity;
            if coverage <= 0.0 {
                continue;
            }
            let x = (mask.min_x as usize + col) as u32;
            let y = (mask.min_y as usize + row) as u32;
            blend(image.get_pixel_mut(x, y), color, coverage);
        }
    }
}

/// Source-over blend of an unpremultiplied color.
fn blend(pixel: &mut Rgba<u8>, color: [f32; 3], alpha: f32) {
    let dst_alpha = pixel[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for (channel, src) in color.into_iter().enumerate() {
        let dst = pixel[channel] as f32;
        let value = (src * alpha + dst * dst_alpha * (1.0 - alpha)) / out_alpha;
        pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    pixel[3] = (out_alpha * 255.0).round() as u8;
}

pub fn encode_png(image: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Rasterize and encode in one go.
pub fn render_png(job: &RasterJob) -> ExportResult<Vec<u8>> {
    if job.width == 0 || job.height == 0 {
        return Err(ExportError::EmptyImage {
            width: job.width,
            height: job.height,
        });
    }
    let bytes = encode_png(&rasterize(job))?;
    log::debug!("Encoded {}x{} PNG ({} bytes)", job.width, job.height, bytes.len());
    Ok(bytes)
}

#[cfg(not(target_arch = "wasm32"))]
fn run(work: impl FnOnce() + Send + 'static) {
    if let Err(err) = std::thread::Builder::new().name("png-export".to_owned()).spawn(work) {
        // The closure and its sender are dropped, so the task reports Cancelled
        log::error!("Failed to start PNG export thread: {}", err);
    }
}

#[cfg(target_arch = "wasm32")]
fn run(work: impl FnOnce()) {
    work();
}

/// A PNG export in flight.
///
/// Native builds render on a worker thread; the web build renders before
/// `spawn` returns. Either way the bytes arrive through the same channel.
#[derive(Debug)]
pub struct PngTask {
    receiver: oneshot::Receiver<ExportResult<Vec<u8>>>,
}

impl PngTask {
    pub fn spawn(job: RasterJob) -> Self {
        let (sender, receiver) = oneshot::channel();
        let work = move || {
            // The receiver may already be gone if the app shut down
            let _ = sender.send(render_png(&job));
        };

        run(work);
        Self { receiver }
    }

    /// The result, once it is ready.
    pub fn try_poll(&mut self) -> Option<ExportResult<Vec<u8>>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ExportError::Cancelled)),
        }
    }

    /// Wait for the result.
    pub async fn finish(self) -> ExportResult<Vec<u8>> {
        self.receiver.await.unwrap_or(Err(ExportError::Cancelled))
    }
}
