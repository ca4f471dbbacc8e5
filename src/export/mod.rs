//! Getting drawings out of (and back into) the app: JSON scene dumps, SVG,
//! and PNG rasters, plus handing the bytes to the user as a file.

mod json;
mod png;
mod svg;

pub use json::{export_json, import_json};
pub use png::{PngTask, RasterJob, encode_png, rasterize, render_png};
pub use svg::{ImportedSvg, export_svg, import_svg};

use egui::Rect;
use thiserror::Error;

use crate::drawing::Drawing;
use crate::settings::BrushSettings;
use crate::view::ViewTransform;

pub const PNG_FILE_NAME: &str = "mandala.png";
pub const SVG_FILE_NAME: &str = "mandala.svg";
pub const JSON_FILE_NAME: &str = "mandala.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize drawing: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot export an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
    #[error("export task was cancelled")]
    Cancelled,
    #[error("download failed: {0}")]
    Download(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("root element is <{0}>, not <svg>")]
    NotSvg(String),
    #[error("invalid drawing JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Output formats for the current drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
    Json,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Png => PNG_FILE_NAME,
            ExportFormat::Svg => SVG_FILE_NAME,
            ExportFormat::Json => JSON_FILE_NAME,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Hand `bytes` to the user as a file called `name`.
///
/// Native builds write into the working directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_bytes(name: &str, bytes: &[u8], _mime: &str) -> ExportResult<()> {
    std::fs::write(name, bytes)?;
    log::info!("Wrote {} ({} bytes)", name, bytes.len());
    Ok(())
}

/// Hand `bytes` to the user as a file called `name`.
///
/// The web build triggers a browser download through a Blob URL.
#[cfg(target_arch = "wasm32")]
pub fn save_bytes(name: &str, bytes: &[u8], mime: &str) -> ExportResult<()> {
    use wasm_bindgen::JsCast;

    let js_err = |err: wasm_bindgen::JsValue| ExportError::Download(format!("{:?}", err));

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("not an anchor element".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;

    log::info!("Downloaded {} ({} bytes)", name, bytes.len());
    Ok(())
}

/// Runs export requests and keeps track of the one in flight.
///
/// JSON and SVG are produced on the spot; PNG goes through a [`PngTask`]
/// that [`Exporter::poll`] checks once per frame.
#[derive(Debug, Default)]
pub struct Exporter {
    png: Option<PngTask>,
    status: Option<String>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a PNG is being rendered.
    pub fn is_busy(&self) -> bool {
        self.png.is_some()
    }

    /// Message describing the last finished export.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn request(
        &mut self,
        format: ExportFormat,
        drawing: &Drawing,
        settings: &BrushSettings,
        view: &ViewTransform,
        canvas: Rect,
    ) {
        log::info!("Export requested: {:?}", format);
        match format {
            ExportFormat::Png => {
                if self.png.is_some() {
                    log::warn!("PNG export already running; ignoring request");
                    return;
                }
                let job = RasterJob::snapshot(drawing, settings.background_color(), *view, canvas);
                self.png = Some(PngTask::spawn(job));
            }
            ExportFormat::Svg => {
                let svg = export_svg(drawing, settings.background_color(), canvas.size());
                self.finish(format, save_bytes(format.file_name(), svg.as_bytes(), format.mime()));
            }
            ExportFormat::Json => {
                let result = export_json(drawing)
                    .and_then(|json| save_bytes(format.file_name(), json.as_bytes(), format.mime()));
                self.finish(format, result);
            }
        }
    }

    /// Deliver the PNG if its task has finished. Returns true when it did.
    pub fn poll(&mut self) -> bool {
        let Some(task) = self.png.as_mut() else {
            return false;
        };
        let Some(result) = task.try_poll() else {
            return false;
        };
        self.png = None;

        let format = ExportFormat::Png;
        let result = result.and_then(|bytes| save_bytes(format.file_name(), &bytes, format.mime()));
        self.finish(format, result);
        true
    }

    fn finish(&mut self, format: ExportFormat, result: ExportResult<()>) {
        self.status = Some(match result {
            Ok(()) => format!("Saved {}", format.file_name()),
            Err(err) => {
                log::error!("Export of {} failed: {}", format.file_name(), err);
                format!("Export failed: {}", err)
            }
        });
    }
}
