//! Image preprocessing matching the validation transforms the model was trained with:
//! center crop to a square, resize, scale to `[0, 1]`, ImageNet normalization, NCHW layout.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::ClassifierError;

pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// Decodes an image file in any supported format.
pub fn load_image(path: &Path) -> Result<DynamicImage, ClassifierError> {
    image::open(path).map_err(|e| ClassifierError::Image {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Crops the largest centered square.
pub fn center_crop(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let side = w.min(h);
    img.crop_imm((w - side) / 2, (h - side) / 2, side, side)
}

/// Returns a `[1, 3, size, size]` buffer in row-major NCHW order.
pub fn to_input_tensor(img: &DynamicImage, size: u32) -> Vec<f32> {
    let rgb = center_crop(img).to_rgb8();
    let resized = image::imageops::resize(&rgb, size, size, FilterType::Triangle);

    let plane = (size as usize) * (size as usize);
    let mut data = vec![0f32; 3 * plane];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = (y as usize) * (size as usize) + x as usize;
        for c in 0..3 {
            let value = pixel[c] as f32 / 255.0;
            data[c * plane + offset] = (value - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
        }
    }
    data
}
