//! # Packed-pixel display buffers
//!
//! [`PixelBuffer`] is the hardware-facing side of the kit: a 16 bit per pixel
//! (RGB565) primary buffer that gets flushed to the screen, plus an equally sized
//! shadow buffer used to cache a finished frame.
//!
//! ```text
//!  15      11 10        5 4       0
//! ┌──────────┬───────────┬─────────┐
//! │ red >> 3 │ green >> 2│ blue >> 3│
//! └──────────┴───────────┴─────────┘
//! ```
//!
//! Everything that draws goes through the [`Canvas`] contract, so sprites and
//! backgrounds never care whether they land in a screen, an off-screen [`Plane`]
//! or a test double.

use bit_field::BitField;
use log::debug;

use crate::bitmap::Rgb;
use crate::error::{GdkError, Result};

/// Pack an 8 bit per channel color into RGB565.
#[inline(always)]
pub fn pack_rgb565(red: u8, green: u8, blue: u8) -> u16 {
    let mut packed = 0u16;
    packed.set_bits(0..5, (blue >> 3) as u16);
    packed.set_bits(5..11, (green >> 2) as u16);
    packed.set_bits(11..16, (red >> 3) as u16);
    packed
}

/// Expand RGB565 back to 8 bits per channel. The dropped low bits come back as zero.
#[inline(always)]
pub fn unpack_rgb565(packed: u16) -> Rgb {
    Rgb {
        red: (packed.get_bits(11..16) as u8) << 3,
        green: (packed.get_bits(5..11) as u8) << 2,
        blue: (packed.get_bits(0..5) as u8) << 3,
    }
}

/// Reserve and zero a buffer, reporting `what` if the allocator refuses.
pub(crate) fn allocate_zeroed<T: Copy + Default>(len: usize, what: &'static str) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| GdkError::Allocation(what))?;
    buffer.resize(len, T::default());
    Ok(buffer)
}

/// Nearest-neighbor source coordinate for `dest` scaled by `ratio` (source / destination).
#[inline(always)]
pub(crate) fn nearest(dest: u32, ratio: f32, source_dim: u32) -> u32 {
    ((ratio * dest as f32) as u32).min(source_dim.saturating_sub(1))
}

/// Anything the kit can draw into.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Write one pixel. Out-of-bounds writes are dropped and report `false`.
    fn draw_pixel(&mut self, x: u32, y: u32, pixel: Rgb) -> bool;

    /// Copy the visible buffer into the shadow copy.
    fn save(&mut self);

    /// Copy the shadow copy back into the visible buffer.
    fn restore(&mut self);

    /// Signed-coordinate form of [`Canvas::draw_pixel`]; anything left of or above
    /// the origin is dropped.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, pixel: Rgb) -> bool {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.draw_pixel(x, y, pixel),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: usize,
    buffer: Vec<u16>,
    shadow: Vec<u16>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut frame = Self::default();
        frame.set_size(width, height)?;
        Ok(frame)
    }

    /// Resize the buffer. Both primary and shadow are reallocated and zeroed.
    /// On failure the buffer keeps its previous size and contents.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GdkError::Allocation("render buffer"))?;
        let buffer = allocate_zeroed(pixels, "render buffer")?;
        let shadow = allocate_zeroed(pixels, "shadow buffer")?;

        self.width = width;
        self.height = height;
        self.pixels = pixels;
        self.buffer = buffer;
        self.shadow = shadow;
        debug!("allocated {}x{} pixel buffer ({} bytes each)", width, height, self.byte_length());
        Ok(())
    }

    /// (Re)allocate primary and shadow at the current size, both zero-filled.
    pub fn allocate(&mut self) -> Result<()> {
        self.set_size(self.width, self.height)
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
    pub fn pixel_count(&self) -> usize {
        self.pixels
    }

    #[inline]
    pub fn byte_length(&self) -> usize {
        self.pixels * core::mem::size_of::<u16>()
    }

    #[inline]
    pub fn pixels(&self) -> &[u16] {
        &self.buffer
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u16] {
        &mut self.buffer
    }

    #[inline]
    pub fn shadow(&self) -> &[u16] {
        &self.shadow
    }

    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    /// Write a truecolor pixel as RGB565. Returns whether the write happened.
    #[inline]
    pub fn write_pixel(&mut self, x: u32, y: u32, red: u8, green: u8, blue: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let offset = self.offset(x, y);
        self.buffer[offset] = pack_rgb565(red, green, blue);
        true
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// primary -> shadow
    pub fn save(&mut self) {
        self.shadow.copy_from_slice(&self.buffer);
    }

    /// shadow -> primary
    pub fn restore(&mut self) {
        self.buffer.copy_from_slice(&self.shadow);
    }

    /// Restore a rectangle from the shadow buffer. Rectangles that are not
    /// fully inside the buffer are ignored.
    pub fn restore_region(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let (Some(stop_x), Some(stop_y)) = (x.checked_add(width), y.checked_add(height)) else {
            return;
        };
        if x >= self.width || y >= self.height || stop_x > self.width || stop_y > self.height {
            return;
        }
        for row in y..stop_y {
            let start = self.offset(x, row);
            let end = start + width as usize;
            self.buffer[start..end].copy_from_slice(&self.shadow[start..end]);
        }
    }
}

impl Canvas for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_pixel(&mut self, x: u32, y: u32, pixel: Rgb) -> bool {
        self.write_pixel(x, y, pixel.red, pixel.green, pixel.blue)
    }

    fn save(&mut self) {
        PixelBuffer::save(self)
    }

    fn restore(&mut self) {
        PixelBuffer::restore(self)
    }
}

/// An off-screen buffer at a fixed logical resolution, scaled onto the real
/// display on [`Plane::transfer`].
#[derive(Debug, Clone)]
pub struct Plane {
    frame: PixelBuffer,
}

impl Plane {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            frame: PixelBuffer::new(width, height)?,
        })
    }

    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut PixelBuffer {
        &mut self.frame
    }

    /// Nearest-neighbor copy of the whole plane over the whole of `target`.
    pub fn transfer(&self, target: &mut PixelBuffer) {
        let (src_w, src_h) = (self.frame.width(), self.frame.height());
        let (dst_w, dst_h) = (target.width(), target.height());
        if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
            return;
        }

        let x_ratio = src_w as f32 / dst_w as f32;
        let y_ratio = src_h as f32 / dst_h as f32;
        let source = self.frame.pixels();
        let destination = target.pixels_mut();

        for y in 0..dst_h {
            let src_y = nearest(y, y_ratio, src_h) as usize;
            for x in 0..dst_w {
                let src_x = nearest(x, x_ratio, src_w) as usize;
                destination[x as usize + y as usize * dst_w as usize] = source[src_x + src_y * src_w as usize];
            }
        }
    }
}

impl Canvas for Plane {
    fn width(&self) -> u32 {
        self.frame.width()
    }

    fn height(&self) -> u32 {
        self.frame.height()
    }

    fn draw_pixel(&mut self, x: u32, y: u32, pixel: Rgb) -> bool {
        self.frame.draw_pixel(x, y, pixel)
    }

    fn save(&mut self) {
        self.frame.save()
    }

    fn restore(&mut self) {
        self.frame.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_keeps_the_high_bits_of_each_channel() {
        for red in (0..=255u16).step_by(7) {
            for green in (0..=255u16).step_by(11) {
                for blue in (0..=255u16).step_by(13) {
                    let packed = pack_rgb565(red as u8, green as u8, blue as u8);
                    assert_eq!(packed >> 11, red >> 3);
                    assert_eq!((packed >> 5) & 0b11_1111, green >> 2);
                    assert_eq!(packed & 0b1_1111, blue >> 3);
                }
            }
        }
        assert_eq!(pack_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(pack_rgb565(255, 0, 0), 0xF800);
    }

    #[test]
    fn unpacking_drops_only_the_low_bits() {
        let pixel = unpack_rgb565(pack_rgb565(0xFF, 0x86, 0x13));
        assert_eq!(pixel, Rgb::new(0xF8, 0x84, 0x10));
    }

    #[test]
    fn new_buffers_are_zeroed_and_sized() {
        let frame = PixelBuffer::new(8, 4).unwrap();
        assert_eq!(frame.pixel_count(), 32);
        assert_eq!(frame.byte_length(), 64);
        assert_eq!(frame.pixels().len(), 32);
        assert_eq!(frame.shadow().len(), 32);
        assert!(frame.pixels().iter().chain(frame.shadow()).all(|&p| p == 0));
    }

    #[test]
    fn resizing_rezeroes_both_buffers() {
        let mut frame = PixelBuffer::new(2, 2).unwrap();
        frame.write_pixel(1, 1, 255, 255, 255);
        frame.save();

        frame.set_size(3, 5).unwrap();
        assert_eq!((frame.width(), frame.height(), frame.pixel_count()), (3, 5, 15));
        assert_eq!(frame.pixels().len(), 15);
        assert_eq!(frame.shadow().len(), 15);
        assert!(frame.pixels().iter().chain(frame.shadow()).all(|&p| p == 0));

        frame.write_pixel(2, 4, 255, 0, 0);
        frame.allocate().unwrap();
        assert!(frame.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn failed_resize_keeps_the_old_buffers() {
        let mut frame = PixelBuffer::new(2, 2).unwrap();
        frame.write_pixel(0, 0, 255, 255, 255);

        assert!(matches!(frame.set_size(u32::MAX, u32::MAX), Err(GdkError::Allocation(_))));
        assert_eq!((frame.width(), frame.height(), frame.pixel_count()), (2, 2, 4));
        assert_eq!(frame.pixels().len(), 4);
        assert_eq!(frame.shadow().len(), 4);
        assert_eq!(frame.pixels()[0], 0xFFFF);

        frame.save();
        frame.restore();
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut frame = PixelBuffer::new(4, 3).unwrap();
        assert!(!frame.write_pixel(4, 0, 255, 255, 255));
        assert!(!frame.write_pixel(0, 3, 255, 255, 255));
        assert!(frame.pixels().iter().all(|&p| p == 0));

        assert!(frame.write_pixel(3, 2, 255, 255, 255));
        assert_eq!(frame.pixels()[11], 0xFFFF);
    }

    #[test]
    fn save_and_restore_round_trip_through_the_shadow() {
        let mut frame = PixelBuffer::new(2, 2).unwrap();
        frame.write_pixel(1, 1, 255, 0, 0);
        frame.save();
        frame.clear();
        assert_eq!(frame.pixels()[3], 0);
        frame.restore();
        assert_eq!(frame.pixels()[3], 0xF800);
    }

    #[test]
    fn region_restore_touches_only_the_rectangle() {
        let mut frame = PixelBuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                frame.write_pixel(x, y, 255, 255, 255);
            }
        }
        frame.save();
        frame.clear();

        frame.restore_region(1, 1, 2, 2);
        let lit: Vec<usize> = frame.pixels().iter().enumerate().filter(|&(_, &p)| p != 0).map(|(i, _)| i).collect();
        assert_eq!(lit, vec![5, 6, 9, 10]);

        // partially outside: no-op
        frame.clear();
        frame.restore_region(3, 3, 2, 2);
        assert!(frame.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn signed_plot_drops_negative_coordinates() {
        let mut frame = PixelBuffer::new(2, 2).unwrap();
        assert!(!frame.plot(-1, 0, Rgb::new(1, 2, 3)));
        assert!(frame.plot(1, 0, Rgb::new(255, 255, 255)));
    }

    #[test]
    fn plane_transfer_scales_up_by_nearest_neighbor() {
        let mut plane = Plane::new(2, 1).unwrap();
        plane.draw_pixel(0, 0, Rgb::new(255, 0, 0));
        plane.draw_pixel(1, 0, Rgb::new(0, 0, 255));

        let mut screen = PixelBuffer::new(4, 2).unwrap();
        plane.transfer(&mut screen);
        assert_eq!(screen.pixels(), &[0xF800, 0xF800, 0x001F, 0x001F, 0xF800, 0xF800, 0x001F, 0x001F]);
    }
}
