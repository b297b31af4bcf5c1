mod config;
mod crop;
mod error;
pub mod loader;
pub mod normalize;
pub mod slicer;

pub use config::{SliceConfig, SlicePlan};
pub use crop::{Rect, MAX_SIDE};
pub use error::{Error, Result, RowError};
pub use loader::{load_image, CoordinateTable};
pub use normalize::enhanced_greyscale;
pub use slicer::{OutputSize, SliceReport};

/// Slices an image into GIF files using rectangles from a CSV
///
/// Resolves `config`, loads the image and coordinate table, normalizes the
/// image to enhanced greyscale and writes one slice per valid row.
/// Malformed rows are skipped and returned in [`SliceReport::skipped`].
///
/// # Parameters
/// * `config: &SliceConfig` - Paths and output size for the run
///
/// # Returns
/// * `Result<SliceReport>` - Written files and skipped rows, or the first fatal error
///
/// # Example
/// ```rust,no_run
/// use image_slicer::{slice_image, SliceConfig};
///
/// fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SliceConfig::new()
///         .set_slice_csv("scans/page.png.csv")
///         .set_out_dir("slices")
///         .set_out_height(64);
///     let report = slice_image(&config)?;
///     for row in &report.skipped {
///         println!("{}", row);
///     }
///     Ok(())
/// }
/// ```
pub fn slice_image(config: &SliceConfig) -> Result<SliceReport> {
    slice_image_with(config, |_| {})
}

/// Same as [`slice_image`], but calls `on_skip` for each malformed row the
/// moment it is skipped, so diagnostics survive a later fatal error.
///
/// # Example
/// ```rust,no_run
/// use image_slicer::{slice_image_with, SliceConfig};
///
/// let config = SliceConfig::new().set_slice_csv("scans/page.png.csv");
/// slice_image_with(&config, |row| println!("{}", row))?;
/// # Ok::<(), image_slicer::Error>(())
/// ```
pub fn slice_image_with<F>(config: &SliceConfig, on_skip: F) -> Result<SliceReport>
where
    F: FnMut(&RowError),
{
    let plan = config.resolve()?;

    let source = load_image(&plan.image_path)?;
    let table = CoordinateTable::load(&plan.csv_path)?;
    let grey = enhanced_greyscale(&source);

    slicer::write_slices(&grey, &table, &plan, on_skip)
}
