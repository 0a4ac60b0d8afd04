//! # Surfaces
//!
//! A [`Surface`] owns the decoded truecolor pixels of one visual object. Every
//! transform builds a complete new pixel array and swaps it in, so width, height
//! and pixels always change together and no transform ever reads a pixel it has
//! already overwritten.

use log::warn;

use crate::bitmap::{Image, Rgb};
use crate::frame::{nearest, Canvas};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mirror {
    /// Left and right swap.
    Horizontal,
    /// Top and bottom swap.
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    image: Vec<Rgb>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_image(image: Image) -> Self {
        let mut surface = Self::new();
        surface.load(image);
        surface
    }

    /// Take ownership of a decoded image, replacing whatever was loaded before.
    pub fn load(&mut self, image: Image) {
        let (width, height, pixels) = image.into_parts();
        self.replace(width, height, pixels);
    }

    #[inline(always)]
    fn replace(&mut self, width: u32, height: u32, image: Vec<Rgb>) {
        debug_assert_eq!(image.len(), width as usize * height as usize);
        self.width = width;
        self.height = height;
        self.image = image;
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.image
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    /// `start + x + y * stride`
    #[inline(always)]
    pub fn offset_in(start: usize, x: u32, y: u32, stride: u32) -> usize {
        start + x as usize + y as usize * stride as usize
    }

    /// `start + x + y * width`
    #[inline(always)]
    pub fn offset(&self, start: usize, x: u32, y: u32) -> usize {
        Self::offset_in(start, x, y, self.width)
    }

    #[inline]
    pub fn pixel(&self, offset: usize) -> Option<Rgb> {
        self.image.get(offset).copied()
    }

    /// Whether the pixels at two offsets match in all three channels.
    /// Offsets past the end never match.
    pub fn pixel_equal(&self, first: usize, second: usize) -> bool {
        match (self.image.get(first), self.image.get(second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn mirror(&mut self, kind: Mirror) {
        let (width, height) = (self.width, self.height);
        let mut mirrored = Vec::with_capacity(self.image.len());

        for y in 0..height {
            for x in 0..width {
                let source = match kind {
                    Mirror::Horizontal => self.offset(0, width - 1 - x, y),
                    Mirror::Vertical => self.offset(0, x, height - 1 - y),
                };
                mirrored.push(self.image[source]);
            }
        }

        self.replace(width, height, mirrored);
    }

    pub fn horizontal_mirror(&mut self) {
        self.mirror(Mirror::Horizontal)
    }

    pub fn vertical_mirror(&mut self) {
        self.mirror(Mirror::Vertical)
    }

    /// Nearest-neighbor resize: destination `(x, y)` samples
    /// `(floor(x * width / new_width), floor(y * height / new_height))`.
    ///
    /// Zero target dimensions and empty surfaces are left untouched.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 || self.is_empty() {
            warn!(
                "ignoring resize of {}x{} surface to {}x{}",
                self.width, self.height, new_width, new_height
            );
            return;
        }

        let x_ratio = self.width as f32 / new_width as f32;
        let y_ratio = self.height as f32 / new_height as f32;
        let mut scaled = Vec::with_capacity(new_width as usize * new_height as usize);

        for y in 0..new_height {
            let source_y = nearest(y, y_ratio, self.height);
            for x in 0..new_width {
                let source_x = nearest(x, x_ratio, self.width);
                scaled.push(self.image[self.offset(0, source_x, source_y)]);
            }
        }

        self.replace(new_width, new_height, scaled);
    }

    /// Copy a `width x height` block starting at pixel offset `start` to
    /// `(x, y)` on the canvas. `key`, when given, names a color that is skipped.
    /// Returns how many pixels were written.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn blit(
        &self,
        canvas: &mut impl Canvas,
        start: usize,
        width: u32,
        height: u32,
        x: i64,
        y: i64,
        key: Option<Rgb>,
    ) -> usize {
        let mut written = 0;
        for row in 0..height {
            for column in 0..width {
                let Some(pixel) = self.pixel(self.offset(start, column, row)) else {
                    continue;
                };
                if key == Some(pixel) {
                    continue;
                }
                if canvas.plot(x + column as i64, y + row as i64, pixel) {
                    written += 1;
                }
            }
        }
        written
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A surface whose pixel at offset `i` is `(i, i * 2, i * 3)`.
    pub(crate) fn numbered(width: u32, height: u32) -> Surface {
        let pixels = (0..width * height)
            .map(|i| Rgb::new(i as u8, (i * 2) as u8, (i * 3) as u8))
            .collect();
        Surface::from_image(Image::new(width, height, pixels).unwrap())
    }

    #[test]
    fn offsets_are_row_major() {
        let surface = numbered(4, 3);
        assert_eq!(surface.offset(0, 1, 2), 9);
        assert_eq!(surface.offset(2, 1, 2), 11);
        assert_eq!(Surface::offset_in(0, 1, 2, 10), 21);
    }

    #[test]
    fn horizontal_mirror_reverses_rows() {
        let mut surface = numbered(3, 2);
        surface.mirror(Mirror::Horizontal);
        let reds: Vec<u8> = surface.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn vertical_mirror_reverses_columns() {
        let mut surface = numbered(2, 3);
        surface.vertical_mirror();
        let reds: Vec<u8> = surface.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn mirroring_twice_is_identity() {
        let original = numbered(5, 3);
        let mut surface = original.clone();
        surface.horizontal_mirror();
        assert_ne!(surface, original);
        surface.horizontal_mirror();
        assert_eq!(surface, original);

        surface.vertical_mirror();
        surface.vertical_mirror();
        assert_eq!(surface, original);
    }

    #[test]
    fn resize_to_the_same_size_changes_nothing() {
        let original = numbered(7, 5);
        let mut surface = original.clone();
        surface.resize(7, 5);
        assert_eq!(surface, original);
    }

    #[test]
    fn resize_samples_nearest_pixels() {
        let mut surface = numbered(2, 2);
        surface.resize(4, 4);
        assert_eq!((surface.width(), surface.height()), (4, 4));
        let reds: Vec<u8> = surface.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3]);

        surface.resize(1, 2);
        let reds: Vec<u8> = surface.pixels().iter().map(|p| p.red).collect();
        assert_eq!(reds, vec![0, 2]);
    }

    #[test]
    fn degenerate_resizes_are_ignored() {
        let original = numbered(3, 3);
        let mut surface = original.clone();
        surface.resize(0, 4);
        assert_eq!(surface, original);

        let mut empty = Surface::new();
        empty.resize(4, 4);
        assert!(empty.is_empty());
    }

    #[test]
    fn pixel_equality_compares_every_channel() {
        let pixels = vec![Rgb::new(1, 2, 3), Rgb::new(1, 2, 3), Rgb::new(1, 2, 4)];
        let surface = Surface::from_image(Image::new(3, 1, pixels).unwrap());
        assert!(surface.pixel_equal(0, 1));
        assert!(!surface.pixel_equal(1, 2));
        assert!(!surface.pixel_equal(0, 3));
    }
}
