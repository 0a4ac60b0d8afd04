//! Bitmap font text. A font is one sprite holding 128 glyphs in a horizontal
//! strip, indexed by ASCII code.

use crate::animation::Framing;
use crate::bitmap::Image;
use crate::frame::Canvas;
use crate::sprite::Sprite;

pub const GLYPHS: u32 = 128;
const FIRST_PRINTABLE: u8 = 32;

#[derive(Debug, Clone, Default)]
pub struct Text {
    font: Sprite,
    x: i32,
    y: i32,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, image: Image) {
        self.font.load(image, Framing::HorizontalStrip, GLYPHS);
    }

    /// Use an already loaded sprite as the font, reframing it as a glyph strip.
    pub fn set_font(&mut self, mut font: Sprite) {
        font.set_frames(GLYPHS);
        font.set_framing(Framing::HorizontalStrip);
        self.font = font;
    }

    pub fn font(&self) -> &Sprite {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Sprite {
        &mut self.font
    }

    pub fn glyph_width(&self) -> u32 {
        self.font.width()
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.font.set_position(x, y);
    }

    /// Draw one glyph at the font's current position. Control codes and bytes
    /// outside the 128 glyph table draw nothing.
    pub fn draw_character(&mut self, canvas: &mut impl Canvas, character: u8) -> usize {
        if !is_printable(character) {
            return 0;
        }
        self.font.set_frame(character as u32 + 1);
        self.font.draw(canvas)
    }

    /// Draw `text` left to right starting at the configured origin.
    pub fn draw_text(&mut self, canvas: &mut impl Canvas, text: &str) -> usize {
        self.font.set_position(self.x, self.y);
        let advance = self.glyph_width() as i32;
        let mut written = 0;
        for character in text.bytes().filter(|&c| is_printable(c)) {
            written += self.draw_character(canvas, character);
            self.font.increase_x_by(advance);
        }
        written
    }

    pub fn draw_character_at(&mut self, canvas: &mut impl Canvas, x: i32, y: i32, character: u8) -> usize {
        self.set_position(x, y);
        self.draw_character(canvas, character)
    }

    pub fn draw_text_at(&mut self, canvas: &mut impl Canvas, x: i32, y: i32, text: &str) -> usize {
        self.set_position(x, y);
        self.draw_text(canvas, text)
    }
}

#[inline(always)]
fn is_printable(character: u8) -> bool {
    (FIRST_PRINTABLE..GLYPHS as u8).contains(&character)
}
