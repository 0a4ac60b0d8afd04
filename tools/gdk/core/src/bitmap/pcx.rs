//! 24 bit planar PCX (three 8 bit planes, byte run-length encoded).
//!
//! Each scanline is stored as `planes * plane_length` bytes: the whole red plane
//! row, then green, then blue. Decoding happens in two passes, first expanding
//! the byte runs into the planar buffer, then gathering one byte per plane into
//! interleaved pixels.
//!
//! Byte runs: a byte below `0xC0` is a literal; `0xC0 | n` repeats the next byte
//! `n` times.

use log::debug;

use crate::bitmap::{pixel_buffer, read_u16, Image, Rgb};
use crate::error::{GdkError, Result};

pub const HEADER_LENGTH: usize = 128;

pub const SIGNATURE: u8 = 0x0A;
const RUN_LENGTH_ENCODING: u8 = 1;
const RUN_MARKER: u8 = 0xC0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Header {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_plane: u8,
    pub min_x: u16,
    pub min_y: u16,
    pub max_x: u16,
    pub max_y: u16,
    pub planes: u8,
    pub plane_length: u16,
}

impl Header {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let head = bytes
            .get(..HEADER_LENGTH)
            .ok_or(GdkError::TruncatedImage("pcx header"))?;

        Ok(Self {
            manufacturer: head[0],
            version: head[1],
            encoding: head[2],
            bits_per_plane: head[3],
            min_x: read_u16(head, 4),
            min_y: read_u16(head, 6),
            max_x: read_u16(head, 8),
            max_y: read_u16(head, 10),
            planes: head[65],
            plane_length: read_u16(head, 66),
        })
    }

    /// `None` when the window is inverted.
    pub fn width(&self) -> Option<u32> {
        (self.max_x as u32 + 1).checked_sub(self.min_x as u32)
    }

    pub fn height(&self) -> Option<u32> {
        (self.max_y as u32 + 1).checked_sub(self.min_y as u32)
    }

    fn dimensions(&self) -> Result<(u32, u32)> {
        match (self.width(), self.height()) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Ok((width, height)),
            _ => Err(GdkError::InvalidImage("pcx window is inverted".into())),
        }
    }

    /// Check everything the decoder relies on and return the image size.
    fn validate(&self) -> Result<(u32, u32)> {
        if self.manufacturer != SIGNATURE {
            return Err(GdkError::InvalidImage(format!("bad pcx signature: {:#04x}", self.manufacturer)));
        }
        if self.encoding != RUN_LENGTH_ENCODING {
            return Err(GdkError::InvalidImage(format!("unsupported pcx encoding: {}", self.encoding)));
        }
        if self.bits_per_plane != 8 {
            return Err(GdkError::InvalidImage(format!(
                "unsupported pcx color depth: {} bits per plane",
                self.bits_per_plane
            )));
        }
        if self.planes != 3 {
            return Err(GdkError::InvalidImage(format!(
                "unsupported pcx plane count: {} (palette images are not supported)",
                self.planes
            )));
        }
        let (width, height) = self.dimensions()?;
        if (self.plane_length as u32) < width {
            return Err(GdkError::InvalidImage(format!(
                "pcx plane length {} is shorter than the image width {}",
                self.plane_length, width
            )));
        }
        Ok((width, height))
    }
}

pub fn decode(bytes: &[u8]) -> Result<Image> {
    let header = Header::parse(bytes)?;
    let (width, height) = header.validate()?;
    let plane_length = header.plane_length as usize;
    let line = header.planes as usize * plane_length;
    debug!("pcx {}x{}, version {}, {} bytes per plane row", width, height, header.version, plane_length);

    let planar = expand_runs(&bytes[HEADER_LENGTH..], line * height as usize)?;

    let mut pixels = pixel_buffer(width, height)?;
    for y in 0..height as usize {
        let row = y * line;
        for x in 0..width as usize {
            let position = row + x;
            pixels.push(Rgb::new(
                planar[position],
                planar[position + plane_length],
                planar[position + 2 * plane_length],
            ));
        }
    }

    Image::new(width, height, pixels)
}

/// Expand byte runs until `length` bytes are produced. Anything after that
/// (such as a trailing palette) is ignored.
fn expand_runs(body: &[u8], length: usize) -> Result<Vec<u8>> {
    let mut planar = Vec::new();
    planar
        .try_reserve_exact(length)
        .map_err(|_| GdkError::Allocation("image buffer"))?;

    let mut index = 0;
    while planar.len() < length {
        let byte = *body
            .get(index)
            .ok_or(GdkError::TruncatedImage("pcx scanline data"))?;

        if byte < RUN_MARKER {
            planar.push(byte);
            index += 1;
        } else {
            let count = (byte - RUN_MARKER) as usize;
            let value = *body
                .get(index + 1)
                .ok_or(GdkError::TruncatedImage("pcx byte run"))?;
            let count = count.min(length - planar.len());
            planar.extend(core::iter::repeat(value).take(count));
            index += 2;
        }
    }

    Ok(planar)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn pcx(width: u16, height: u16, plane_length: u16, body: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LENGTH];
        bytes[0] = SIGNATURE;
        bytes[1] = 5;
        bytes[2] = RUN_LENGTH_ENCODING;
        bytes[3] = 8;
        bytes[8..10].copy_from_slice(&(width - 1).to_le_bytes());
        bytes[10..12].copy_from_slice(&(height - 1).to_le_bytes());
        bytes[65] = 3;
        bytes[66..68].copy_from_slice(&plane_length.to_le_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn planes_are_gathered_into_pixels() {
        // 2x1, one scanline: red plane, green plane, blue plane
        let body = [10, 11, 20, 21, 30, 31];
        let image = decode(&pcx(2, 1, 2, &body)).unwrap();
        assert_eq!(image.pixels(), &[Rgb::new(10, 20, 30), Rgb::new(11, 21, 31)]);
    }

    #[test]
    fn byte_runs_expand_before_deinterleaving() {
        // 2x2, every scanline: red run of 2, green run of 2, blue literals
        let row = [0xC2, 200, 0xC2, 100, 1, 2];
        let body: Vec<u8> = row.iter().chain(row.iter()).copied().collect();
        let image = decode(&pcx(2, 2, 2, &body)).unwrap();
        assert_eq!(
            image.pixels(),
            &[Rgb::new(200, 100, 1), Rgb::new(200, 100, 2), Rgb::new(200, 100, 1), Rgb::new(200, 100, 2)]
        );
    }

    #[test]
    fn literal_bytes_above_the_marker_need_a_run_of_one() {
        let body = [0xC1, 0xFF, 0xC1, 0xC0, 0x05];
        let image = decode(&pcx(1, 1, 1, &body)).unwrap();
        assert_eq!(image.pixels(), &[Rgb::new(0xFF, 0xC0, 0x05)]);
    }

    #[test]
    fn scanline_padding_is_skipped() {
        // width 1, plane length 2: the second byte of each plane row is padding
        let body = [7, 0, 8, 0, 9, 0];
        let image = decode(&pcx(1, 1, 2, &body)).unwrap();
        assert_eq!(image.pixels(), &[Rgb::new(7, 8, 9)]);
    }

    #[test]
    fn rejects_palette_images_and_foreign_signatures() {
        let mut paletted = pcx(1, 1, 1, &[0; 3]);
        paletted[65] = 1;
        assert!(matches!(decode(&paletted), Err(GdkError::InvalidImage(_))));

        let mut foreign = pcx(1, 1, 1, &[0; 3]);
        foreign[0] = 0x42;
        assert!(matches!(decode(&foreign), Err(GdkError::InvalidImage(_))));

        let mut shallow = pcx(1, 1, 1, &[0; 3]);
        shallow[3] = 1;
        assert!(matches!(decode(&shallow), Err(GdkError::InvalidImage(_))));

        let mut unencoded = pcx(1, 1, 1, &[0; 3]);
        unencoded[2] = 0;
        assert!(matches!(decode(&unencoded), Err(GdkError::InvalidImage(_))));
    }

    #[test]
    fn inverted_windows_are_rejected_not_wrapped() {
        let mut inverted = pcx(1, 1, 1, &[0; 3]);
        inverted[4..6].copy_from_slice(&5u16.to_le_bytes());
        let header = Header::parse(&inverted).unwrap();
        assert_eq!(header.width(), None);
        assert_eq!(header.height(), Some(1));
        assert!(matches!(decode(&inverted), Err(GdkError::InvalidImage(_))));

        let header = Header::parse(&pcx(3, 2, 4, &[])).unwrap();
        assert_eq!((header.width(), header.height()), (Some(3), Some(2)));
    }

    #[test]
    fn short_bodies_are_fatal() {
        assert!(matches!(decode(&pcx(2, 1, 2, &[1, 2, 3])), Err(GdkError::TruncatedImage(_))));
        assert!(matches!(decode(&pcx(1, 1, 1, &[1, 2, 0xC1])), Err(GdkError::TruncatedImage(_))));
        assert!(matches!(decode(&[SIGNATURE; 20]), Err(GdkError::TruncatedImage(_))));
    }
}
