use image::RgbaImage;

use crate::surface::{from_hex, with_alpha, Color, Fill, PixelCanvas, WHITE};

const FOOD_RED: Color = from_hex(0xff4444);
const HIGHLIGHT: Color = with_alpha(WHITE, 128);

/// A small RGBA raster, drawn with `Surface::draw_image`.
#[derive(Clone, Debug)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    pub fn from_canvas(canvas: PixelCanvas) -> Self {
        Sprite { image: canvas.into_image() }
    }

    /// Red apple with a soft highlight in the upper left.
    pub fn food(size: u32) -> Self {
        let s = size as f32;
        let mut canvas = PixelCanvas::new(size, size);

        canvas.fill_circle((s * 0.5, s * 0.5), s * 0.4, &Fill::Solid(FOOD_RED));
        canvas.fill_circle((s * 0.35, s * 0.35), s * 0.15, &Fill::Solid(HIGHLIGHT));

        Sprite::from_canvas(canvas)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TRANSPARENT;

    #[test]
    fn food_sprite_shape() {
        let sprite = Sprite::food(20);
        let image = sprite.image();
        assert_eq!(image.dimensions(), (20, 20));

        assert_eq!(*image.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*image.get_pixel(19, 19), TRANSPARENT);
        assert_eq!(*image.get_pixel(12, 12), FOOD_RED);

        let highlight = image.get_pixel(6, 6);
        assert_eq!(highlight[3], 255);
        assert!(highlight[1] > FOOD_RED[1] && highlight[2] > FOOD_RED[2]);
    }
}
