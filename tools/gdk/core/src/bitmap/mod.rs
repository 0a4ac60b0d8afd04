//! # Bitmap assets
//!
//! Two decoders feed the kit, both producing a flat truecolor [`Image`]:
//!
//! | Format | Module   | Compression                                   |
//! |--------|----------|-----------------------------------------------|
//! | TGA    | [`tga`]  | none, or literal/repeat pixel packets         |
//! | PCX    | [`pcx`]  | byte runs, then planar -> interleaved channels |
//!
//! Malformed assets are authoring errors, not runtime conditions: every decode
//! failure is a [`GdkError`] meant to end the program.

pub mod pcx;
pub mod tga;

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use log::debug;

use crate::error::{GdkError, Result};

/// One truecolor pixel. No alpha.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// A decoded asset: `width * height` pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Image {
    /// Wrap an already decoded pixel array. The length must match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(GdkError::InvalidImage(format!(
                "{} pixels don't fill a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Read an asset from disk, picking the decoder by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let bytes = std::fs::read(path)?;
        debug!("loading {} ({} bytes)", path.display(), bytes.len());

        match extension.as_deref() {
            Some("tga") => tga::decode(&bytes),
            Some("pcx") => pcx::decode(&bytes),
            _ => Err(GdkError::InvalidImage(format!("unsupported asset: {}", path.display()))),
        }
    }

    pub fn load_tga(path: impl AsRef<Path>) -> Result<Self> {
        tga::decode(&std::fs::read(path)?)
    }

    pub fn load_pcx(path: impl AsRef<Path>) -> Result<Self> {
        pcx::decode(&std::fs::read(path)?)
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
        &self.pixels
    }

    /// Raw interleaved bytes, three per pixel in red, green, blue order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn into_parts(self) -> (u32, u32, Vec<Rgb>) {
        (self.width, self.height, self.pixels)
    }
}

/// Allocate the output pixel array for a `width * height` decode.
pub(crate) fn pixel_buffer(width: u32, height: u32) -> Result<Vec<Rgb>> {
    let len = width as usize * height as usize;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| GdkError::Allocation("image buffer"))?;
    Ok(pixels)
}

#[inline(always)]
pub(crate) fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}
