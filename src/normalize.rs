//! Background-normalizing greyscale transform.
//!
//! A white-point estimate is built by blurring the source and taking a local
//! maximum. Each pixel is then divided by that estimate channel by channel,
//! which flattens uneven lighting and leaves line work and faint marks dark
//! on a white field.
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::filter::Kernel;

/// Full-scale grey value a ratio of 1.0 maps to.
pub const GREY_LEVELS: f32 = 255.0;

/// Side length of the square local-maximum window.
pub const MAX_FILTER_SIZE: u32 = 15;

/// 5x5 blur weights, row-major: a ring of ones around a zero core.
#[rustfmt::skip]
pub const BLUR_KERNEL: [f32; 25] = [
    1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0,
];

const BLUR_DIVISOR: f32 = 16.0;

/// Produces the illumination-corrected greyscale image
///
/// Output has the same dimensions as `img`, which is left untouched.
///
/// # Example
/// ```rust
/// use image::{Rgb, RgbImage};
/// use image_slicer::enhanced_greyscale;
///
/// let paper = RgbImage::from_pixel(32, 32, Rgb([180, 170, 160]));
/// let grey = enhanced_greyscale(&paper);
/// assert!(grey.pixels().all(|p| p.0[0] == 255));
/// ```
pub fn enhanced_greyscale(img: &RgbImage) -> GrayImage {
    let background = estimate_background(img);
    greyscale_ratio(img, &background)
}

/// Local white-point estimate: [`blur`] followed by [`max_filter`].
pub fn estimate_background(img: &RgbImage) -> RgbImage {
    max_filter(&blur(img), MAX_FILTER_SIZE)
}

/// Convolves every channel with [`BLUR_KERNEL`] over 16, padding by edge continuity.
pub fn blur(img: &RgbImage) -> RgbImage {
    Kernel::new(&BLUR_KERNEL, 5, 5).filter(img, |channel: &mut u8, acc: f32| {
        *channel = (acc / BLUR_DIVISOR).round().min(255.0) as u8;
    })
}

/// Per-channel maximum over a `size` x `size` window centred on each pixel
///
/// Runs as a horizontal pass then a vertical pass; samples beyond the border
/// repeat the edge pixel. `size` should be odd.
pub fn max_filter(img: &RgbImage, size: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    let radius = (size / 2) as i64;

    let horizontal: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        window_max(radius, |offset| {
            *img.get_pixel(clamp_index(x as i64 + offset, width), y)
        })
    });

    ImageBuffer::from_fn(width, height, |x, y| {
        window_max(radius, |offset| {
            *horizontal.get_pixel(x, clamp_index(y as i64 + offset, height))
        })
    })
}

/// Maximum over channels of `img / background`, scaled to [`GREY_LEVELS`]
///
/// Background values are clamped to at least 1 so a black background never
/// divides by zero; the scaled result saturates at 255.
pub fn greyscale_ratio(img: &RgbImage, background: &RgbImage) -> GrayImage {
    debug_assert_eq!(img.dimensions(), background.dimensions());
    let (width, height) = img.dimensions();

    ImageBuffer::from_fn(width, height, |x, y| {
        let px = img.get_pixel(x, y);
        let bg = background.get_pixel(x, y);
        let mut ratio = 0.0f32;
        for (&v, &white) in px.0.iter().zip(bg.0.iter()) {
            ratio = ratio.max(v as f32 / white.max(1) as f32);
        }
        Luma([(ratio * GREY_LEVELS).round().min(GREY_LEVELS) as u8])
    })
}

fn window_max(radius: i64, sample: impl Fn(i64) -> Rgb<u8>) -> Rgb<u8> {
    let mut max = [0u8; 3];
    for offset in -radius..=radius {
        let px = sample(offset);
        for (m, &v) in max.iter_mut().zip(px.0.iter()) {
            *m = (*m).max(v);
        }
    }
    Rgb(max)
}

fn clamp_index(i: i64, len: u32) -> u32 {
    i.clamp(0, len as i64 - 1) as u32
}
