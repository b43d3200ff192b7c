//! Vertical stacking of rasters.

use image::{imageops, Rgba, RgbaImage};

use crate::error::{Error, Result};

/// Stack `images` top to bottom in the given order.
///
/// The result is as wide as the widest input and as tall as all inputs
/// together. Each input sits at the cumulative height of the ones before
/// it and is centered horizontally; uncovered or transparent pixels show
/// `background`.
pub fn stitch_vertical(images: &[RgbaImage], background: Rgba<u8>) -> Result<RgbaImage> {
    if images.is_empty() {
        return Err(Error::validation("nothing to stitch"));
    }

    let width = images.iter().map(|i| i.width()).max().unwrap_or(0);
    let height: u32 = images.iter().map(|i| i.height()).sum();
    let mut canvas = RgbaImage::from_pixel(width, height, background);

    let mut offset = 0i64;
    for img in images {
        let x = (width - img.width()) / 2;
        imageops::overlay(&mut canvas, img, x as i64, offset);
        offset += img.height() as i64;
    }

    Ok(canvas)
}

/// Top-left placement of each input inside the stitched result.
pub fn stitch_offsets(sizes: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let width = sizes.iter().map(|(w, _)| *w).max().unwrap_or(0);
    let mut y = 0;
    sizes
        .iter()
        .map(|(w, h)| {
            let pos = ((width - w) / 2, y);
            y += h;
            pos
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_stitch_dimensions_and_placement() {
        let red = RgbaImage::from_pixel(10, 4, Rgba([255, 0, 0, 255]));
        let blue = RgbaImage::from_pixel(30, 6, Rgba([0, 0, 255, 255]));
        let out = stitch_vertical(&[red, blue], WHITE).unwrap();
        assert_eq!(out.dimensions(), (30, 10));
        // red is centered: columns 10..20 of rows 0..4
        assert_eq!(out.get_pixel(9, 0), &WHITE);
        assert_eq!(out.get_pixel(10, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(19, 3), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(20, 3), &WHITE);
        // blue starts right below
        assert_eq!(out.get_pixel(0, 4), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_stitch_empty() {
        assert!(stitch_vertical(&[], WHITE).is_err());
    }

    #[test]
    fn test_transparent_pixels_show_background() {
        let clear = RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 0]));
        let out = stitch_vertical(&[clear], WHITE).unwrap();
        assert_eq!(out.get_pixel(2, 2), &WHITE);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(
            stitch_offsets(&[(10, 4), (30, 6), (20, 2)]),
            vec![(10, 0), (0, 4), (5, 10)]
        );
    }
}
