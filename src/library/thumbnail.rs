use image::{imageops::FilterType, DynamicImage};

use crate::state::data::Thumbnail;

/// Center-crop the image to a square and scale it to `size` x `size`
pub fn square_thumbnail(img: &DynamicImage, size: u32) -> Thumbnail {
    let (width, height) = (img.width(), img.height());
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;

    let thumbnail = img
        .crop_imm(left, top, side, side)
        .resize_exact(size, size, FilterType::Lanczos3);

    Thumbnail {
        size,
        rgba: thumbnail.to_rgba8().into_raw(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_thumbnail_is_square() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(300, 120));
        let thumb = square_thumbnail(&img, 90);

        assert_eq!(thumb.size, 90);
        assert_eq!(thumb.rgba.len(), 90 * 90 * 4);
    }

    #[test]
    fn test_thumbnail_keeps_center() {
        // Left and right thirds red, center third green: a center crop is all green
        let img = RgbImage::from_fn(300, 100, |x, _| {
            if (100..200).contains(&x) {
                Rgb([0, 255, 0])
            } else {
                Rgb([255, 0, 0])
            }
        });
        let thumb = square_thumbnail(&DynamicImage::ImageRgb8(img), 10);

        let center = &thumb.rgba[(5 * 10 + 5) * 4..(5 * 10 + 5) * 4 + 4];
        assert_eq!(center, &[0, 255, 0, 255]);
    }
}
