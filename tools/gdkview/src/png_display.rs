use std::path::Path;

use gdk_core::frame::unpack_rgb565;
use gdk_core::screen::Display;
use gdk_core::GdkError;
use image::{ImageFormat, RgbImage};
use tracing::debug;

/// A headless display: every presented frame replaces the held image, which
/// can then be written out as a PNG.
pub struct PngDisplay {
    width: u32,
    height: u32,
    image: RgbImage,
    presented: usize,
}

impl PngDisplay {
    /// Fails with [`GdkError::Allocation`] when the image cannot be reserved.
    pub fn new(width: u32, height: u32) -> gdk_core::Result<Self> {
        let length = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(3))
            .ok_or(GdkError::Allocation("png image"))?;

        let mut raw = Vec::new();
        raw.try_reserve_exact(length)
            .map_err(|_| GdkError::Allocation("png image"))?;
        raw.resize(length, 0);

        let image = RgbImage::from_raw(width, height, raw).ok_or(GdkError::Allocation("png image"))?;
        Ok(Self {
            width,
            height,
            image,
            presented: 0,
        })
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.image.save_with_format(path.as_ref(), ImageFormat::Png)?;
        debug!("wrote {}", path.as_ref().display());
        Ok(())
    }
}

impl Display for PngDisplay {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &[u16]) -> gdk_core::Result<()> {
        let expected = self.width as usize * self.height as usize;
        if frame.len() != expected {
            return Err(GdkError::Display(format!(
                "frame of {} pixels presented to a {}x{} display",
                frame.len(),
                self.width,
                self.height
            )));
        }

        for (pixel, &packed) in self.image.pixels_mut().zip(frame) {
            let rgb = unpack_rgb565(packed);
            pixel.0 = [rgb.red, rgb.green, rgb.blue];
        }
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_displays_are_refused() {
        assert!(matches!(PngDisplay::new(u32::MAX, u32::MAX), Err(GdkError::Allocation(_))));
    }

    #[test]
    fn presented_frames_are_unpacked() {
        let mut png = PngDisplay::new(2, 1).unwrap();
        png.present(&[0xF800, 0x001F]).unwrap();
        assert_eq!(png.presented(), 1);
        assert_eq!(png.image.get_pixel(0, 0).0, [248, 0, 0]);
        assert_eq!(png.image.get_pixel(1, 0).0, [0, 0, 248]);
        assert!(png.present(&[0]).is_err());
    }
}
