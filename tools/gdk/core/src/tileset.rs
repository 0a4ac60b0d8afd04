//! Tile grids. The image is cut into `rows x columns` equal tiles; `row` walks
//! the grid horizontally and `column` vertically, so tile `(row, column)` starts
//! at pixel `(row * tile_width, column * tile_height)`.

use log::warn;

use crate::bitmap::Image;
use crate::frame::Canvas;
use crate::surface::Surface;

#[derive(Debug, Clone, Default)]
pub struct Tileset {
    surface: Surface,
    rows: u32,
    columns: u32,
    tile_width: u32,
    tile_height: u32,
    offset: usize,
}

impl Tileset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take over `image` as a `rows x columns` grid. A zero in either count
    /// leaves the tileset as it was.
    pub fn load(&mut self, image: Image, rows: u32, columns: u32) {
        if rows == 0 || columns == 0 {
            warn!("ignoring {}x{} tile grid", rows, columns);
            return;
        }
        self.surface.load(image);
        self.rows = rows;
        self.columns = columns;
        self.tile_width = self.surface.width() / rows;
        self.tile_height = self.surface.height() / columns;
        self.offset = 0;
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Select the tile drawn by [`Tileset::draw_tile`]. Out-of-range requests keep
    /// the previous selection.
    pub fn select(&mut self, row: u32, column: u32) {
        if row < self.rows && column < self.columns {
            self.offset = self.surface.offset(0, row * self.tile_width, column * self.tile_height);
        } else {
            warn!("ignoring tile {},{} of {}x{}", row, column, self.rows, self.columns);
        }
    }

    pub fn draw_tile(&self, canvas: &mut impl Canvas, x: i32, y: i32) -> usize {
        self.surface
            .blit(canvas, self.offset, self.tile_width, self.tile_height, x as i64, y as i64, None)
    }

    pub fn draw_tile_at(&mut self, canvas: &mut impl Canvas, row: u32, column: u32, x: i32, y: i32) -> usize {
        self.select(row, column);
        self.draw_tile(canvas, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Rgb;
    use crate::frame::{pack_rgb565, PixelBuffer};

    /// 4x4 image of four 2x2 tiles, each a solid shade: 10, 20 on top, 30, 40 below.
    fn quads() -> Image {
        let shade = |x: u32, y: u32| (10 + 10 * (x / 2) + 20 * (y / 2)) as u8;
        let pixels = (0..16).map(|i| Rgb::new(shade(i % 4, i / 4), 0, 0)).collect();
        Image::new(4, 4, pixels).unwrap()
    }

    #[test]
    fn grid_dimensions_divide_the_image() {
        let mut tiles = Tileset::new();
        tiles.load(quads(), 2, 2);
        assert_eq!((tiles.tile_width(), tiles.tile_height()), (2, 2));

        tiles.load(quads(), 0, 2);
        assert_eq!(tiles.rows(), 2);
    }

    #[test]
    fn row_selects_across_and_column_selects_down() {
        let mut tiles = Tileset::new();
        tiles.load(quads(), 2, 2);
        let mut canvas = PixelBuffer::new(2, 2).unwrap();

        assert_eq!(tiles.draw_tile_at(&mut canvas, 1, 0, 0, 0), 4);
        assert!(canvas.pixels().iter().all(|&p| p == pack_rgb565(20, 0, 0)));

        tiles.draw_tile_at(&mut canvas, 0, 1, 0, 0);
        assert!(canvas.pixels().iter().all(|&p| p == pack_rgb565(30, 0, 0)));
    }

    #[test]
    fn out_of_range_selection_keeps_the_previous_tile() {
        let mut tiles = Tileset::new();
        tiles.load(quads(), 2, 2);
        tiles.select(1, 1);
        tiles.select(2, 0);
        tiles.select(0, 5);

        let mut canvas = PixelBuffer::new(4, 4).unwrap();
        tiles.draw_tile(&mut canvas, 2, 2);
        assert_eq!(canvas.pixels()[canvas.offset(3, 3)], pack_rgb565(40, 0, 0));
        assert_eq!(canvas.pixels()[canvas.offset(1, 1)], 0);
    }
}
