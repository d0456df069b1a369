//! PNG rasterisation of chart documents.

use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};
use tracing::debug;

use super::svg::{HEIGHT, WIDTH};
use crate::error::{ReportError, Result};

/// Output pixels per SVG user unit.
///
/// A 640x480 chart becomes 1280x960 pixels, a 6.4x4.8 inch figure at 200 dpi.
pub const RASTER_SCALE: f32 = 2.0;

/// Pixel size of rasterised charts
pub fn raster_size() -> (u32, u32) {
    (
        (WIDTH as f32 * RASTER_SCALE).round() as u32,
        (HEIGHT as f32 * RASTER_SCALE).round() as u32,
    )
}

fn font_database() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "System fonts loaded");
            Arc::new(db)
        })
        .clone()
}

/// Rasterise an SVG document to PNG bytes.
///
/// Text is drawn with whatever system fonts are available; without any,
/// the chart is still produced with lines and frame only.
pub fn svg_to_png(document: &str) -> Result<Vec<u8>> {
    let mut options = Options::default();
    options.fontdb = font_database();
    options.font_family = "DejaVu Sans".to_string();

    let tree = Tree::from_str(document, &options)
        .map_err(|e| ReportError::Render(format!("invalid chart document: {e}")))?;

    let (width, height) = raster_size();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| ReportError::Render(format!("cannot allocate {width}x{height} image")))?;
    resvg::render(
        &tree,
        Transform::from_scale(RASTER_SCALE, RASTER_SCALE),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| ReportError::Render(format!("PNG encoding failed: {e}")))
}
