//! Truecolor TGA, uncompressed (type 2) or run-length encoded (type 10).
//!
//! Only 24 bit images without a color map are accepted. Pixels are stored
//! blue, green, red; rows are taken in file order.
//!
//! Run-length packets start with a control byte:
//!
//! * `0..=127`   - literal: `control + 1` raw pixels follow
//! * `128..=255` - repeat: one pixel follows, emitted `control - 127` times

use bytemuck::{Pod, Zeroable};
use log::debug;

use crate::bitmap::{pixel_buffer, read_u16, Image, Rgb};
use crate::error::{GdkError, Result};

pub const HEADER_LENGTH: usize = 18;

pub const UNCOMPRESSED_TRUECOLOR: u8 = 2;
pub const RLE_TRUECOLOR: u8 = 10;

/// File order of a TGA pixel.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Bgr {
    blue: u8,
    green: u8,
    red: u8,
}

impl From<Bgr> for Rgb {
    #[inline(always)]
    fn from(pixel: Bgr) -> Self {
        Rgb::new(pixel.red, pixel.green, pixel.blue)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Header {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
}

impl Header {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let head = bytes
            .get(..HEADER_LENGTH)
            .ok_or(GdkError::TruncatedImage("tga header"))?;

        // bytes 3..8 are the color map specification, 8..12 the image origin
        Ok(Self {
            id_length: head[0],
            color_map_type: head[1],
            image_type: head[2],
            width: read_u16(head, 12),
            height: read_u16(head, 14),
            bits_per_pixel: head[16],
            descriptor: head[17],
        })
    }

    pub fn is_compressed(&self) -> bool {
        self.image_type == RLE_TRUECOLOR
    }

    fn validate(&self) -> Result<()> {
        if self.color_map_type != 0 {
            return Err(GdkError::InvalidImage("color-mapped tga images are not supported".into()));
        }
        if self.bits_per_pixel != 24 {
            return Err(GdkError::InvalidImage(format!(
                "unsupported tga color depth: {} bits",
                self.bits_per_pixel
            )));
        }
        if self.image_type != UNCOMPRESSED_TRUECOLOR && self.image_type != RLE_TRUECOLOR {
            return Err(GdkError::InvalidImage(format!("unsupported tga image type: {}", self.image_type)));
        }
        Ok(())
    }
}

pub fn decode(bytes: &[u8]) -> Result<Image> {
    let header = Header::parse(bytes)?;
    header.validate()?;

    let (width, height) = (header.width as u32, header.height as u32);
    let count = width as usize * height as usize;
    debug!(
        "tga {}x{}, type {}, descriptor {:08b}",
        width, height, header.image_type, header.descriptor
    );

    let data = bytes
        .get(HEADER_LENGTH + header.id_length as usize..)
        .ok_or(GdkError::TruncatedImage("tga image id"))?;

    let mut pixels = pixel_buffer(width, height)?;
    if header.is_compressed() {
        decode_runs(data, count, &mut pixels)?;
    } else {
        let raw = data
            .get(..count * 3)
            .ok_or(GdkError::TruncatedImage("tga pixel data"))?;
        pixels.extend(bytemuck::cast_slice::<u8, Bgr>(raw).iter().map(|&p| Rgb::from(p)));
    }

    Image::new(width, height, pixels)
}

fn decode_runs(data: &[u8], count: usize, pixels: &mut Vec<Rgb>) -> Result<()> {
    let mut position = 0;

    while pixels.len() < count {
        let control = *data
            .get(position)
            .ok_or(GdkError::TruncatedImage("tga run-length packet"))?;
        position += 1;

        let run = if control < 128 { control as usize + 1 } else { control as usize - 127 };
        if pixels.len() + run > count {
            return Err(GdkError::InvalidImage("tga run-length packet overruns the image".into()));
        }

        if control < 128 {
            let raw = data
                .get(position..position + run * 3)
                .ok_or(GdkError::TruncatedImage("tga literal packet"))?;
            pixels.extend(bytemuck::cast_slice::<u8, Bgr>(raw).iter().map(|&p| Rgb::from(p)));
            position += run * 3;
        } else {
            let raw = data
                .get(position..position + 3)
                .ok_or(GdkError::TruncatedImage("tga repeat packet"))?;
            let pixel = Rgb::from(*bytemuck::from_bytes::<Bgr>(raw));
            pixels.extend(core::iter::repeat(pixel).take(run));
            position += 3;
        }
    }

    Ok(())
}
