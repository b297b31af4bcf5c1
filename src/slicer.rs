use std::fs;
use std::path::{Path, PathBuf};

use image::buffer::ConvertBuffer;
use image::{imageops, imageops::FilterType, GrayImage, ImageBuffer, ImageFormat, Luma, RgbaImage};

use crate::config::SlicePlan;
use crate::crop::Rect;
use crate::error::{Error, Result, RowError};
use crate::loader::CoordinateTable;

/// Requested output size; `None` on both axes means no scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSize {
    pub height: Option<u32>,
    pub width: Option<u32>,
}

impl OutputSize {
    /// `(width, height)` to resample a `crop_width` x `crop_height` crop to,
    /// or `None` when the crop is written as-is. An unset axis keeps the
    /// crop's own size.
    pub fn target(&self, crop_width: u32, crop_height: u32) -> Option<(u32, u32)> {
        if self.height.is_none() && self.width.is_none() {
            return None;
        }
        Some((
            self.width.unwrap_or(crop_width),
            self.height.unwrap_or(crop_height),
        ))
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceReport {
    /// Written files, in row order.
    pub written: Vec<PathBuf>,
    /// Rows that were skipped, in row order.
    pub skipped: Vec<RowError>,
}

/// `slice_<base>_<index>.gif`, with the index zero-padded to three digits.
pub fn slice_filename(image_base: &str, index: usize) -> String {
    format!("slice_{}_{:03}.gif", image_base, index)
}

/// Copies the pixels under `rect` out of `grey`; parts outside the image are black.
pub fn crop(grey: &GrayImage, rect: &Rect) -> GrayImage {
    let (width, height) = rect.dimensions().unwrap_or((0, 0));
    let (img_width, img_height) = grey.dimensions();

    ImageBuffer::from_fn(width, height, |x, y| {
        let sx = rect.left() + x as i64;
        let sy = rect.top() + y as i64;
        if (0..img_width as i64).contains(&sx) && (0..img_height as i64).contains(&sy) {
            *grey.get_pixel(sx as u32, sy as u32)
        } else {
            Luma([0])
        }
    })
}

/// Crops `rect` and, if a size was requested, resamples it with Lanczos3.
pub fn render_slice(grey: &GrayImage, rect: &Rect, size: &OutputSize) -> GrayImage {
    let cropped = crop(grey, rect);
    let (crop_width, crop_height) = cropped.dimensions();
    match size.target(crop_width, crop_height) {
        Some((width, height)) => imageops::resize(&cropped, width, height, FilterType::Lanczos3),
        None => cropped,
    }
}

/// Writes one slice as a GIF
///
/// The grey values are expanded to RGBA first; with at most 256 distinct
/// colours the GIF encoder builds an exact palette, so every level survives.
pub fn write_slice(slice: &GrayImage, path: &Path) -> Result<()> {
    let rgba: RgbaImage = slice.convert();
    rgba.save_with_format(path, ImageFormat::Gif)
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Renders and writes every valid row of `table`
///
/// Rows are handled strictly in order. Each invalid row is logged, handed to
/// `on_skip` as soon as it is reached and collected in the report; the first
/// write failure aborts the run and leaves earlier slices on disk.
pub fn write_slices<F>(
    grey: &GrayImage,
    table: &CoordinateTable,
    plan: &SlicePlan,
    mut on_skip: F,
) -> Result<SliceReport>
where
    F: FnMut(&RowError),
{
    fs::create_dir_all(&plan.out_dir).map_err(|source| Error::OutputDir {
        path: plan.out_dir.clone(),
        source,
    })?;

    let mut report = SliceReport::default();
    for (index, row) in table.rows().iter().enumerate() {
        let rect = match row {
            Ok(rect) => rect,
            Err(err) => {
                tracing::warn!("Skipping row: {}", err);
                on_skip(err);
                report.skipped.push(err.clone());
                continue;
            }
        };

        let slice = render_slice(grey, rect, &plan.output_size);
        let path = plan.out_dir.join(slice_filename(&plan.image_base, index));
        write_slice(&slice, &path)?;
        tracing::debug!(
            "Wrote {} ({}x{}) from {:?}",
            path.display(),
            slice.width(),
            slice.height(),
            rect.coords()
        );
        report.written.push(path);
    }

    tracing::info!(
        "Wrote {} slices to {} ({} rows skipped)",
        report.written.len(),
        plan.out_dir.display(),
        report.skipped.len()
    );
    Ok(report)
}
