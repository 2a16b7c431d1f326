//! The drawing surface the renderer paints on, plus an RGBA canvas
//! implementing it on top of `image`.

use image::{imageops, imageops::FilterType, Pixel, Rgba, RgbaImage};

use crate::sprite::Sprite;

pub type Color = Rgba<u8>;

pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);
pub const BLACK: Color = from_hex(0x000000);
pub const WHITE: Color = from_hex(0xffffff);

/// Opaque colour from `0xRRGGBB`.
pub const fn from_hex(hex: u32) -> Color {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

pub const fn with_alpha(color: Color, a: u8) -> Color {
    Rgba([color.0[0], color.0[1], color.0[2], a])
}

pub fn lerp(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    from.map2(&to, |a, b| (a as f32 + (b as f32 - a as f32) * t).round() as u8)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }
}

/// Corner radii in canvas order: top-left, top-right, bottom-right, bottom-left.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        CornerRadii { top_left, top_right, bottom_right, bottom_left }
    }

    pub const fn uniform(r: f32) -> Self {
        CornerRadii::new(r, r, r, r)
    }

    fn clamped(self, w: f32, h: f32) -> Self {
        let max = w.min(h) / 2.0;
        let c = |r: f32| r.clamp(0.0, max);
        CornerRadii::new(c(self.top_left), c(self.top_right), c(self.bottom_right), c(self.bottom_left))
    }

    /// Whether the local point (`x`, `y`) falls inside a `w`x`h` box with these corners.
    fn contains(self, x: f32, y: f32, w: f32, h: f32) -> bool {
        let r = self.clamped(w, h);

        let (cx, cy, radius) = if x < r.top_left && y < r.top_left {
            (r.top_left, r.top_left, r.top_left)
        } else if x > w - r.top_right && y < r.top_right {
            (w - r.top_right, r.top_right, r.top_right)
        } else if x > w - r.bottom_right && y > h - r.bottom_right {
            (w - r.bottom_right, h - r.bottom_right, r.bottom_right)
        } else if x < r.bottom_left && y > h - r.bottom_left {
            (r.bottom_left, h - r.bottom_left, r.bottom_left)
        } else {
            return true;
        };

        (x - cx).powi(2) + (y - cy).powi(2) <= radius * radius
    }
}

/// Two-stop linear gradient between two canvas points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub from: Color,
    pub to: Color,
}

impl LinearGradient {
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.from;
        }

        let t = ((x - self.start.0) * dx + (y - self.start.1) * dy) / len_sq;
        lerp(self.from, self.to, t)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Color),
    Gradient(LinearGradient),
}

impl Fill {
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        match self {
            Fill::Solid(color) => *color,
            Fill::Gradient(gradient) => gradient.color_at(x, y),
        }
    }
}

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resets every pixel in `rect` to transparent.
    fn clear(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, fill: &Fill);
    fn fill_round_rect(&mut self, rect: Rect, radii: CornerRadii, fill: &Fill);
    /// Draws `image` scaled to `dest`.
    fn draw_image(&mut self, image: &Sprite, dest: Rect);

    fn clear_all(&mut self) {
        let rect = Rect::new(0, 0, self.width(), self.height());
        self.clear(rect);
    }
}

#[derive(Clone, Debug)]
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        PixelCanvas { image: RgbaImage::from_pixel(width, height, TRANSPARENT) }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.image.get_pixel(x, y)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn fill_circle(&mut self, center: (f32, f32), radius: f32, fill: &Fill) {
        let rect = Rect::new(
            (center.0 - radius).floor() as i32,
            (center.1 - radius).floor() as i32,
            (radius * 2.0).ceil() as u32 + 1,
            (radius * 2.0).ceil() as u32 + 1,
        );

        self.paint(rect, fill, |px, py| {
            (px - center.0).powi(2) + (py - center.1).powi(2) <= radius * radius
        });
    }

    /// Pixel ranges of `rect` that lie on the canvas, or `None` if it misses entirely.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = (rect.x as i64 + rect.width as i64).min(self.image.width() as i64);
        let y1 = (rect.y as i64 + rect.height as i64).min(self.image.height() as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Blends `fill` over every pixel of `rect` whose centre passes `inside`.
    fn paint<F>(&mut self, rect: Rect, fill: &Fill, inside: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        let (x0, y0, x1, y1) = match self.clip(rect) {
            Some(bounds) => bounds,
            None => return,
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                if inside(px, py) {
                    self.image.get_pixel_mut(x, y).blend(&fill.color_at(px, py));
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn clear(&mut self, rect: Rect) {
        if let Some((x0, y0, x1, y1)) = self.clip(rect) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.image.put_pixel(x, y, TRANSPARENT);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        self.paint(rect, fill, |_, _| true);
    }

    fn fill_round_rect(&mut self, rect: Rect, radii: CornerRadii, fill: &Fill) {
        let (w, h) = (rect.width as f32, rect.height as f32);
        let (ox, oy) = (rect.x as f32, rect.y as f32);

        self.paint(rect, fill, |px, py| radii.contains(px - ox, py - oy, w, h));
    }

    fn draw_image(&mut self, image: &Sprite, dest: Rect) {
        if dest.width == 0 || dest.height == 0 {
            return;
        }

        let source = image.image();
        if source.dimensions() == (dest.width, dest.height) {
            imageops::overlay(&mut self.image, source, dest.x as i64, dest.y as i64);
        } else {
            let scaled = imageops::resize(source, dest.width, dest.height, FilterType::Nearest);
            imageops::overlay(&mut self.image, &scaled, dest.x as i64, dest.y as i64);
        }
    }
}
