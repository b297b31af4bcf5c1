use std::path::{Path, PathBuf};

use crate::crop::MAX_SIDE;
use crate::error::{Error, Result};
use crate::slicer::OutputSize;

/// Options for a slicing run
///
/// Every field is optional at construction time. `resolve` applies the
/// fallback rules once and produces the [`SlicePlan`] the pipeline runs on.
#[derive(Clone, Debug, Default)]
pub struct SliceConfig {
    /// CSV file holding one rectangle per row. Required.
    pub slice_csv: Option<PathBuf>,

    /// Image to slice
    ///
    /// Defaults to the CSV path with its last extension removed, so
    /// `scans/page.png.csv` slices `scans/page.png`.
    pub image: Option<PathBuf>,

    /// Directory receiving the slices. Defaults to the image's directory.
    pub out_dir: Option<PathBuf>,

    /// Height to scale every slice to. Defaults to no scaling.
    pub out_height: Option<u32>,

    /// Width to scale every slice to. Defaults to no scaling.
    pub out_width: Option<u32>,
}

impl SliceConfig {
    // Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    // Set the coordinate CSV
    pub fn set_slice_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.slice_csv = Some(path.into());
        self
    }

    // Set the source image
    pub fn set_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    // Set the output directory
    pub fn set_out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    // Set output height
    pub fn set_out_height(mut self, height: u32) -> Self {
        self.out_height = Some(height);
        self
    }

    // Set output width
    pub fn set_out_width(mut self, width: u32) -> Self {
        self.out_width = Some(width);
        self
    }

    /// Applies the fallback rules and returns the resolved plan
    ///
    /// Performs no I/O; the image and CSV are only checked when loaded.
    ///
    /// # Example
    /// ```rust
    /// use image_slicer::SliceConfig;
    /// use std::path::Path;
    ///
    /// let plan = SliceConfig::new().set_slice_csv("scans/page.png.csv").resolve()?;
    /// assert_eq!(plan.image_path, Path::new("scans/page.png"));
    /// assert_eq!(plan.out_dir, Path::new("scans"));
    /// assert_eq!(plan.image_base, "page");
    /// # Ok::<(), image_slicer::Error>(())
    /// ```
    pub fn resolve(&self) -> Result<SlicePlan> {
        let csv_path = self
            .slice_csv
            .clone()
            .ok_or(Error::MissingArgument("slice-csv"))?;

        let image_path = match &self.image {
            Some(path) => path.clone(),
            None => csv_path.with_extension(""),
        };

        let image_base = image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::InvalidPath(format!("no file name in {}", image_path.display()))
            })?;

        for size in [self.out_height, self.out_width].into_iter().flatten() {
            if size == 0 || size > MAX_SIDE {
                return Err(Error::InvalidOutputSize(size));
            }
        }

        let out_dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => image_dir(&image_path),
        };

        Ok(SlicePlan {
            csv_path,
            image_path,
            image_base,
            out_dir,
            output_size: OutputSize {
                height: self.out_height,
                width: self.out_width,
            },
        })
    }
}

/// Fully resolved inputs and outputs of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlicePlan {
    pub csv_path: PathBuf,
    pub image_path: PathBuf,
    /// Image file name without extension; used in slice file names.
    pub image_base: String,
    pub out_dir: PathBuf,
    pub output_size: OutputSize,
}

fn image_dir(image_path: &Path) -> PathBuf {
    match image_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
