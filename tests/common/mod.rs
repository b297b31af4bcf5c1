pub mod synthetic_image;

use std::fs;
use std::path::{Path, PathBuf};

/// Writes a 20x20 `page.png` and its `page.png.csv` into `dir`; returns the CSV path.
pub fn write_page_inputs(dir: &Path, csv: &str) -> PathBuf {
    synthetic_image::scanned_page(20, 20)
        .save(dir.join("page.png"))
        .unwrap();
    let csv_path = dir.join("page.png.csv");
    fs::write(&csv_path, csv).unwrap();
    csv_path
}
