//! # Sprites
//!
//! A sprite is a [`Surface`] drawn at a signed position, optionally framed as an
//! animation strip. With transparency on, the first pixel of the current frame
//! is the color key: every pixel equal to it is skipped. A sprite pixel that
//! happens to match the key is dropped too; assets are authored around that.

use crate::animation::{FrameStrip, Framing};
use crate::bitmap::Image;
use crate::collision::CollisionBox;
use crate::frame::Canvas;
use crate::surface::{Mirror, Surface};

#[derive(Debug, Clone)]
pub struct Sprite {
    surface: Surface,
    strip: FrameStrip,
    transparent: bool,
    x: i32,
    y: i32,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            surface: Surface::new(),
            strip: FrameStrip::default(),
            transparent: true,
            x: 0,
            y: 0,
        }
    }
}

impl Sprite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take over a decoded image and frame it. `frames` only matters for strips.
    pub fn load(&mut self, image: Image, framing: Framing, frames: u32) {
        self.surface.load(image);
        if framing != Framing::Single {
            self.strip.set_frames(frames, &self.surface);
        }
        self.strip.set_framing(framing, &self.surface);
    }

    pub fn load_image(&mut self, image: Image) {
        self.load(image, Framing::Single, 1);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn framing(&self) -> Framing {
        self.strip.framing()
    }

    pub fn set_framing(&mut self, framing: Framing) {
        self.strip.set_framing(framing, &self.surface);
    }

    pub fn set_frames(&mut self, amount: u32) {
        self.strip.set_frames(amount, &self.surface);
    }

    pub fn frames(&self) -> u32 {
        self.strip.animation().frames()
    }

    pub fn frame(&self) -> u32 {
        self.strip.animation().frame()
    }

    pub fn set_frame(&mut self, target: u32) {
        self.strip.set_frame(target, &self.surface);
    }

    pub fn step(&mut self) {
        self.strip.step(&self.surface);
    }

    pub fn mirror(&mut self, kind: Mirror) {
        self.surface.mirror(kind);
        self.strip.configure(&self.surface);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.strip.configure(&self.surface);
    }

    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn set_transparent(&mut self, enabled: bool) {
        self.transparent = enabled;
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn increase_x(&mut self) {
        self.increase_x_by(1);
    }

    pub fn decrease_x(&mut self) {
        self.decrease_x_by(1);
    }

    pub fn increase_y(&mut self) {
        self.increase_y_by(1);
    }

    pub fn decrease_y(&mut self) {
        self.decrease_y_by(1);
    }

    pub fn increase_x_by(&mut self, amount: i32) {
        self.x = self.x.wrapping_add(amount);
    }

    pub fn decrease_x_by(&mut self, amount: i32) {
        self.x = self.x.wrapping_sub(amount);
    }

    pub fn increase_y_by(&mut self, amount: i32) {
        self.y = self.y.wrapping_add(amount);
    }

    pub fn decrease_y_by(&mut self, amount: i32) {
        self.y = self.y.wrapping_sub(amount);
    }

    /// Width of one frame.
    pub fn width(&self) -> u32 {
        self.strip.region().width
    }

    /// Height of one frame.
    pub fn height(&self) -> u32 {
        self.strip.region().height
    }

    pub fn collision_box(&self) -> CollisionBox {
        CollisionBox::new(self.x, self.y, self.width(), self.height())
    }

    /// Draw the current frame at the sprite's position. Returns the number of
    /// pixels that landed on the canvas.
    pub fn draw(&self, canvas: &mut impl Canvas) -> usize {
        let region = self.strip.region();
        let key = if self.transparent { self.surface.pixel(region.start) } else { None };
        self.surface.blit(
            canvas,
            region.start,
            region.width,
            region.height,
            self.x as i64,
            self.y as i64,
            key,
        )
    }

    pub fn draw_at(&mut self, canvas: &mut impl Canvas, x: i32, y: i32) -> usize {
        self.set_position(x, y);
        self.draw(canvas)
    }

    pub fn draw_with(&mut self, canvas: &mut impl Canvas, transparent: bool) -> usize {
        self.set_transparent(transparent);
        self.draw(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{tga, Rgb};
    use crate::frame::{pack_rgb565, PixelBuffer};

    fn checker() -> Image {
        // 3x2, key color black in the corner, two lit pixels
        let black = Rgb::BLACK;
        let white = Rgb::new(255, 255, 255);
        Image::new(3, 2, vec![black, white, black, black, black, white]).unwrap()
    }

    #[test]
    fn loads_default_to_a_single_transparent_frame() {
        let mut sprite = Sprite::new();
        sprite.load_image(checker());
        assert!(sprite.transparent());
        assert_eq!((sprite.width(), sprite.height()), (3, 2));
        assert_eq!((sprite.frame(), sprite.frames()), (1, 1));
    }

    #[test]
    fn transparent_draw_skips_the_key_color() {
        let mut sprite = Sprite::new();
        sprite.load_image(checker());
        let mut canvas = PixelBuffer::new(8, 8).unwrap();

        assert_eq!(sprite.draw_at(&mut canvas, 2, 3), 2);
        assert_eq!(canvas.pixels()[canvas.offset(3, 3)], 0xFFFF);
        assert_eq!(canvas.pixels()[canvas.offset(4, 4)], 0xFFFF);
        assert_eq!(canvas.pixels().iter().filter(|&&p| p != 0).count(), 2);

        assert_eq!(sprite.draw_with(&mut canvas, false), 6);
    }

    #[test]
    fn pixels_off_the_canvas_are_dropped() {
        let mut sprite = Sprite::new();
        sprite.load_image(checker());
        sprite.set_transparent(false);
        let mut canvas = PixelBuffer::new(4, 4).unwrap();

        assert_eq!(sprite.draw_at(&mut canvas, -2, -1), 1);
        assert_eq!(sprite.draw_at(&mut canvas, 3, 3), 1);
    }

    #[test]
    fn horizontal_strip_frame_lands_in_place() {
        // 4x4 truecolor asset, two 2x4 frames side by side
        let mut body = Vec::new();
        for i in 0..16u8 {
            body.extend_from_slice(&[i * 3, i * 2, i * 10]);
        }
        let image = tga::decode(&tga::tests::tga(tga::UNCOMPRESSED_TRUECOLOR, 4, 4, &body)).unwrap();
        let source = image.clone();

        let mut sprite = Sprite::new();
        sprite.load(image, Framing::HorizontalStrip, 2);
        sprite.set_frame(2);
        sprite.set_transparent(false);

        let mut canvas = PixelBuffer::new(100, 100).unwrap();
        assert_eq!(sprite.draw_at(&mut canvas, 10, 10), 8);

        for (offset, &packed) in canvas.pixels().iter().enumerate() {
            let (x, y) = ((offset % 100) as u32, (offset / 100) as u32);
            if (10..12).contains(&x) && (10..14).contains(&y) {
                let pixel = source.pixels()[(x - 10 + 2 + (y - 10) * 4) as usize];
                assert_eq!(packed, pack_rgb565(pixel.red, pixel.green, pixel.blue));
            } else {
                assert_eq!(packed, 0);
            }
        }
    }

    #[test]
    fn stepping_walks_the_strip() {
        let pixels = (0..8).map(|i| Rgb::new(i, 0, 0)).collect();
        let mut sprite = Sprite::new();
        sprite.load(Image::new(4, 2, pixels).unwrap(), Framing::VerticalStrip, 2);
        assert_eq!((sprite.width(), sprite.height()), (4, 1));

        sprite.set_transparent(false);
        let mut canvas = PixelBuffer::new(4, 1).unwrap();
        sprite.step();
        sprite.draw(&mut canvas);
        assert_eq!(canvas.pixels()[0], pack_rgb565(4, 0, 0));

        sprite.step();
        assert_eq!(sprite.frame(), 1);
    }

    #[test]
    fn movement_and_collision_box_follow_position() {
        let mut sprite = Sprite::new();
        sprite.load_image(checker());
        sprite.set_position(5, 5);
        sprite.increase_x();
        sprite.decrease_y_by(7);
        assert_eq!(sprite.collision_box(), CollisionBox::new(6, -2, 3, 2));
    }

    #[test]
    fn clones_are_independent() {
        let mut sprite = Sprite::new();
        sprite.load(checker(), Framing::HorizontalStrip, 3);
        let mut copy = sprite.clone();
        copy.mirror(Mirror::Horizontal);
        copy.set_frame(3);

        assert_eq!(sprite.frame(), 1);
        assert_ne!(sprite.surface(), copy.surface());
        assert_eq!(copy.width(), 1);
    }
}
