//! Reading the two inputs of a run: the source image and the coordinate CSV.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use image::{GenericImageView, ImageError, RgbImage};

use crate::crop::Rect;
use crate::error::{Error, Result, RowError};

/// Fields every coordinate row must carry: two corners, two values each.
pub const FIELDS_PER_ROW: usize = 4;

/// Opens the source image and converts it to 8-bit RGB
///
/// Alpha is dropped. A missing file is reported as [`Error::ImageNotFound`];
/// anything else the decoder rejects surfaces as [`Error::Image`].
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|err| match err {
        ImageError::IoError(io) if io.kind() == ErrorKind::NotFound => {
            Error::ImageNotFound(path.to_path_buf())
        }
        other => Error::Image(other),
    })?;
    let (width, height) = img.dimensions();
    tracing::info!("Loaded {} ({}x{})", path.display(), width, height);
    Ok(img.into_rgb8())
}

/// Rows of a coordinate CSV, in file order
///
/// Each row is either a rectangle or the reason it was rejected. Row indices
/// count every data row, valid or not, and so fix the slice file names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    rows: Vec<std::result::Result<Rect, RowError>>,
}

impl CoordinateTable {
    /// Reads and parses a CSV file. A read failure is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadCsv {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text);
        tracing::info!(
            "Read {} rows from {} ({} invalid)",
            table.len(),
            path.display(),
            table.invalid().count()
        );
        Ok(table)
    }

    /// Parses CSV text. Never fails; malformed rows become [`RowError`]s.
    ///
    /// Blank lines and `#` comments are skipped without taking a row index.
    pub fn parse(text: &str) -> Self {
        let rows = text
            .lines()
            .map(strip_comment)
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(line, text)| parse_row(line, text))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[std::result::Result<Rect, RowError>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Valid rectangles with their row index.
    pub fn valid(&self) -> impl Iterator<Item = (usize, &Rect)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.as_ref().ok().map(|rect| (i, rect)))
    }

    pub fn invalid(&self) -> impl Iterator<Item = &RowError> + '_ {
        self.rows.iter().filter_map(|row| row.as_ref().err())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_row(line: usize, text: &str) -> std::result::Result<Rect, RowError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != FIELDS_PER_ROW {
        return Err(RowError::FieldCount {
            line,
            got: fields.len(),
        });
    }

    let mut points = [0.0f64; FIELDS_PER_ROW];
    for (point, field) in points.iter_mut().zip(&fields) {
        *point = match field.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                return Err(RowError::NotNumeric {
                    line,
                    field: field.to_string(),
                })
            }
        };
    }

    let rect = Rect::from_corners(points[0], points[1], points[2], points[3]);
    let (width, height) = rect.extent();
    if width == 0 || height == 0 {
        return Err(RowError::EmptyRegion { line });
    }
    if rect.dimensions().is_none() {
        return Err(RowError::TooLarge { line, width, height });
    }
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_rows_in_order() {
        let table = CoordinateTable::parse("0,0,10,10\n5, 5, 3, 3\n");
        assert_eq!(table.len(), 2);
        let rects: Vec<_> = table.valid().map(|(i, r)| (i, r.coords())).collect();
        assert_eq!(rects, vec![(0, (0, 0, 10, 10)), (1, (3, 3, 5, 5))]);
    }

    #[test]
    fn wrong_field_count_is_reported_and_keeps_its_index() {
        let table = CoordinateTable::parse("1,2,3\n0,0,4,4\n1,2,3,4,5\n2,2,6,6\n");
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.rows()[0],
            Err(RowError::FieldCount { line: 0, got: 3 })
        );
        assert_eq!(
            table.rows()[2],
            Err(RowError::FieldCount { line: 2, got: 5 })
        );
        let indices: Vec<_> = table.valid().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn diagnostic_names_line_and_field_count() {
        let table = CoordinateTable::parse("1,2,3\n");
        let err = table.invalid().next().unwrap();
        assert_eq!(err.to_string(), "Error on line 0. Expected 4 points, got 3");
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        let table = CoordinateTable::parse("a,0,4,4\n0,,4,4\n0,0,nan,4\n");
        let errors: Vec<_> = table.invalid().cloned().collect();
        assert_eq!(
            errors,
            vec![
                RowError::NotNumeric {
                    line: 0,
                    field: "a".into()
                },
                RowError::NotNumeric {
                    line: 1,
                    field: String::new()
                },
                RowError::NotNumeric {
                    line: 2,
                    field: "nan".into()
                },
            ]
        );
    }

    #[test]
    fn empty_rectangles_are_rejected() {
        let table = CoordinateTable::parse("3,0,3,8\n");
        assert_eq!(table.rows()[0], Err(RowError::EmptyRegion { line: 0 }));
    }

    #[test]
    fn oversized_rectangles_are_rejected_and_later_rows_kept() {
        let table = CoordinateTable::parse("0,0,3000000000,3000000000\n0,0,1e10,1e10\n0,0,1,70000\n0,0,2,2\n");
        assert_eq!(
            table.rows()[0],
            Err(RowError::TooLarge {
                line: 0,
                width: 3_000_000_000,
                height: 3_000_000_000
            })
        );
        assert_eq!(
            table.rows()[1],
            Err(RowError::TooLarge {
                line: 1,
                width: 10_000_000_000,
                height: 10_000_000_000
            })
        );
        assert_eq!(
            table.rows()[2],
            Err(RowError::TooLarge {
                line: 2,
                width: 70_000,
                height: 1
            })
        );
        assert_eq!(
            table.rows()[2].as_ref().unwrap_err().to_string(),
            "Error on line 2. Rectangle 70000x1 exceeds the 65535 pixel limit per side"
        );
        let indices: Vec<_> = table.valid().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![3]);
    }

    #[test]
    fn blank_lines_and_comments_take_no_index() {
        let table = CoordinateTable::parse("# top, left, bottom, right\n\n0,0,2,2\n   \n1,1,3,3 # second\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.invalid().count(), 0);
        assert_eq!(table.rows()[1], Ok(Rect::from_corners(1.0, 1.0, 3.0, 3.0)));
    }

    #[test]
    fn decimal_coordinates_are_accepted() {
        let table = CoordinateTable::parse("0.2,1.7,9.6,4.4\r\n");
        assert_eq!(table.rows()[0].as_ref().unwrap().coords(), (0, 2, 10, 4));
    }

    #[test]
    fn load_reports_missing_csv() {
        let dir = TempDir::new().unwrap();
        let err = CoordinateTable::load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::ReadCsv { .. }));
    }

    #[test]
    fn load_image_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.png");
        match load_image(&path) {
            Err(Error::ImageNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected ImageNotFound, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn load_image_drops_alpha() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgba.png");
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 0]));
        rgba.save(&path).unwrap();
        let rgb = load_image(&path).unwrap();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(2, 1).0, [10, 20, 30]);
    }
}
