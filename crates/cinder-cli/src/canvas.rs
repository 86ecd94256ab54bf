//! Software `DrawSurface` that rasterizes particles into an RGBA image

use cinder_particles::{BlendMode, DrawSurface};
use image::{Rgba, RgbaImage};

pub struct Canvas {
    image: RgbaImage,
    blend: BlendMode,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
            blend: BlendMode::Normal,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl DrawSurface for Canvas {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [u8; 3], alpha: f32) {
        let Some((x0, x1)) = span(x, width, self.image.width()) else {
            return;
        };
        let Some((y0, y1)) = span(y, height, self.image.height()) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let dst = self.image.get_pixel_mut(px, py);
                for c in 0..3 {
                    let src = f32::from(color[c]) * alpha;
                    let out = match self.blend {
                        BlendMode::Additive => f32::from(dst[c]) + src,
                        BlendMode::Normal => src + f32::from(dst[c]) * (1.0 - alpha),
                    };
                    dst[c] = out.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }
}

/// Pixel range covered by `[start, start + len)`, clipped to `[0, limit)`.
/// Anything visible covers at least one pixel.
fn span(start: f32, len: f32, limit: u32) -> Option<(u32, u32)> {
    if !start.is_finite() || !len.is_finite() {
        return None;
    }
    let lo = start.round() as i64;
    let hi = ((start + len).round() as i64).max(lo + 1);
    let lo = lo.max(0);
    let hi = hi.min(i64::from(limit));
    (lo < hi).then_some((lo as u32, hi as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_blend_mixes_with_background() {
        let mut canvas = Canvas::new(4, 4, [0, 0, 100]);
        canvas.fill_rect(1.0, 1.0, 2.0, 2.0, [200, 0, 0], 0.5);
        assert_eq!(canvas.image().get_pixel(1, 1).0, [100, 0, 50, 255]);
        assert_eq!(canvas.image().get_pixel(2, 2).0, [100, 0, 50, 255]);
        assert_eq!(canvas.image().get_pixel(0, 0).0, [0, 0, 100, 255]);
        assert_eq!(canvas.image().get_pixel(3, 3).0, [0, 0, 100, 255]);
    }

    #[test]
    fn additive_blend_saturates() {
        let mut canvas = Canvas::new(2, 2, [200, 10, 0]);
        canvas.set_blend_mode(BlendMode::Additive);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, [100, 100, 100], 1.0);
        assert_eq!(canvas.image().get_pixel(0, 0).0, [255, 110, 100, 255]);
    }

    #[test]
    fn offscreen_fills_are_clipped() {
        let mut canvas = Canvas::new(4, 4, [0, 0, 0]);
        canvas.fill_rect(-10.0, -10.0, 3.0, 3.0, [255, 255, 255], 1.0);
        canvas.fill_rect(3.0, 3.0, 10.0, 10.0, [255, 255, 255], 1.0);
        let lit = canvas.image().pixels().filter(|p| p.0[0] > 0).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn sub_pixel_fill_covers_one_pixel() {
        assert_eq!(span(1.2, 0.3, 10), Some((1, 2)));
        assert_eq!(span(9.7, 0.3, 10), None);
        assert_eq!(span(f32::NAN, 1.0, 10), None);
    }
}
