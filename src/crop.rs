/// An axis-aligned rectangle normalized from two arbitrary corner points
///
/// The corners are given as `(p1, p2)` and `(p3, p4)`, each as `(row, column)`.
/// Construction rounds every coordinate to the nearest pixel and takes the
/// per-axis min/max, so the stored bounds always satisfy `top <= bottom` and
/// `left <= right` whatever order the corners arrive in.
///
/// `bottom` and `right` are exclusive. Bounds may lie outside the image; the
/// slicer fills that part of a crop with black.
///
/// # Example
/// ```rust
/// use image_slicer::Rect;
///
/// let rect = Rect::from_corners(5.0, 5.0, 3.0, 3.0);
/// assert_eq!(rect.coords(), (3, 3, 5, 5));
/// assert_eq!(rect.dimensions(), Some((2, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    top: i64,
    left: i64,
    bottom: i64,
    right: i64,
}

impl Rect {
    pub fn from_corners(p1: f64, p2: f64, p3: f64, p4: f64) -> Self {
        let (p1, p2, p3, p4) = (to_pixel(p1), to_pixel(p2), to_pixel(p3), to_pixel(p4));
        Self {
            top: p1.min(p3),
            left: p2.min(p4),
            bottom: p1.max(p3),
            right: p2.max(p4),
        }
    }

    /// The `(top, left, bottom, right)` tuple.
    pub fn coords(&self) -> (i64, i64, i64, i64) {
        (self.top, self.left, self.bottom, self.right)
    }

    pub fn top(&self) -> i64 {
        self.top
    }

    pub fn left(&self) -> i64 {
        self.left
    }

    pub fn bottom(&self) -> i64 {
        self.bottom
    }

    pub fn right(&self) -> i64 {
        self.right
    }

    /// Raw `(width, height)`, without any limit applied.
    pub fn extent(&self) -> (u64, u64) {
        (
            self.right.saturating_sub(self.left) as u64,
            self.bottom.saturating_sub(self.top) as u64,
        )
    }

    /// `(width, height)` in pixels, or `None` when the rectangle has no area
    /// or either side exceeds [`MAX_SIDE`].
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let (width, height) = self.extent();
        if width == 0 || height == 0 || width > MAX_SIDE as u64 || height > MAX_SIDE as u64 {
            return None;
        }
        Some((width as u32, height as u32))
    }
}

/// Largest side a slice may have; GIF stores each axis in 16 bits.
pub const MAX_SIDE: u32 = u16::MAX as u32;

// Saturating float-to-int cast; callers reject non-finite input first.
fn to_pixel(coord: f64) -> i64 {
    coord.round() as i64
}
