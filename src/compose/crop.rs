//! Cropping selections out of a rendered page.

use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as PixelPoint;

use super::RenderScale;
use crate::error::{Error, Result};
use crate::model::{Point, Shape};

/// Copy the pixels under `shape` from a rendered page.
///
/// `shape` is in display coordinates; it is multiplied by `scale` to find
/// the source rectangle on `surface`. The result always measures the scaled
/// width and height rounded to whole pixels, and any part of it that falls
/// off the page is left fully transparent. For a freeform outline every pixel
/// outside the outline is made transparent as well.
pub fn crop(surface: &RgbaImage, shape: &Shape, scale: RenderScale) -> Result<RgbaImage> {
    let bounds = scale.rect(&shape.bounds());
    let width = bounds.width.round().max(0.0) as u32;
    let height = bounds.height.round().max(0.0) as u32;
    let ox = bounds.x.round() as i64;
    let oy = bounds.y.round() as i64;

    let on_page_x = ox < surface.width() as i64 && ox + width as i64 > 0;
    let on_page_y = oy < surface.height() as i64 && oy + height as i64 > 0;
    if width == 0 || height == 0 || !on_page_x || !on_page_y {
        return Err(Error::validation("selection lies outside the page"));
    }

    let mut out = RgbaImage::new(width, height);
    imageops::replace(&mut out, surface, -ox, -oy);

    if let Shape::Freeform { points } = shape {
        let outline = pixel_outline(points, scale, ox, oy)?;
        clip_to_outline(&mut out, &outline);
    }

    Ok(out)
}

/// Outline vertices in crop-local pixel space, without repeated vertices.
fn pixel_outline(
    points: &[Point],
    scale: RenderScale,
    ox: i64,
    oy: i64,
) -> Result<Vec<PixelPoint<i32>>> {
    let mut outline: Vec<PixelPoint<i32>> = Vec::with_capacity(points.len());
    for p in points {
        let sp = scale.point(p);
        let px = PixelPoint::new(
            (sp.x.round() as i64 - ox) as i32,
            (sp.y.round() as i64 - oy) as i32,
        );
        if outline.last() != Some(&px) {
            outline.push(px);
        }
    }
    // the polygon is closed implicitly
    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    if outline.len() < 3 {
        return Err(Error::validation("freeform selection needs at least three points"));
    }
    Ok(outline)
}

fn clip_to_outline(image: &mut RgbaImage, outline: &[PixelPoint<i32>]) {
    let mut mask = GrayImage::new(image.width(), image.height());
    draw_polygon_mut(&mut mask, outline, Luma([255u8]));
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if mask.get_pixel(x, y)[0] == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}
