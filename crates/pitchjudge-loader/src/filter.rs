//! Decorative-image filter: discard logos, separators, and flat backgrounds.

use image::GenericImageView;

/// Minimum pixel area (`w*h`) for an image to be considered non-decorative.
const MIN_AREA: u64 = 30_000;
/// Minimum luminance variance for an image to be considered non-flat.
const MIN_LUMINANCE_VARIANCE: f64 = 50.0;

/// True when `jpeg_bytes` decodes to an image judged worth keeping as
/// evidence: not tiny, and not a near-flat fill.
pub fn is_worth_keeping(jpeg_bytes: &[u8]) -> bool {
    let Ok(img) = image::load_from_memory(jpeg_bytes) else {
        return false;
    };
    let (w, h) = img.dimensions();
    if (w as u64) * (h as u64) < MIN_AREA {
        return false;
    }
    luminance_variance(&img) >= MIN_LUMINANCE_VARIANCE
}

fn luminance_variance(img: &image::DynamicImage) -> f64 {
    let gray = img.to_luma8();
    let pixels: Vec<f64> = gray.pixels().map(|p| p.0[0] as f64).collect();
    if pixels.is_empty() {
        return 0.0;
    }
    let mean = pixels.iter().sum::<f64>() / pixels.len() as f64;
    pixels.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / pixels.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn encode_jpeg(img: &image::DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Jpeg)
            .unwrap();
        buf
    }

    #[test]
    fn tiny_image_is_rejected() {
        let img = ImageBuffer::from_fn(50, 50, |_, _| Rgb([200u8, 10, 10]));
        let bytes = encode_jpeg(&image::DynamicImage::ImageRgb8(img));
        assert!(!is_worth_keeping(&bytes));
    }

    #[test]
    fn flat_large_image_is_rejected() {
        let img = ImageBuffer::from_fn(300, 300, |_, _| Rgb([128u8, 128, 128]));
        let bytes = encode_jpeg(&image::DynamicImage::ImageRgb8(img));
        assert!(!is_worth_keeping(&bytes));
    }

    #[test]
    fn noisy_large_image_is_kept() {
        let img = ImageBuffer::from_fn(300, 300, |x, y| {
            let v = (((x * 37 + y * 91) % 256) as u8).wrapping_add((x ^ y) as u8);
            Rgb([v, 255 - v, v / 2])
        });
        let bytes = encode_jpeg(&image::DynamicImage::ImageRgb8(img));
        assert!(is_worth_keeping(&bytes));
    }
}
