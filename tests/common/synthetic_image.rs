use image::{Rgb, RgbImage};

/// Warm, unevenly lit "paper" with a dark horizontal stroke across the middle.
pub fn scanned_page(width: u32, height: u32) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    RgbImage::from_fn(width, height, |x, y| {
        // Lighting falls off towards the right edge.
        let light = 230 - (x * 60 / width) as u8;
        if y == height / 2 {
            Rgb([light / 4, light / 4, light / 5])
        } else {
            Rgb([light, light - 10, light - 25])
        }
    })
}
