use crate::bitmap::Rgb;
use crate::frame::Canvas;

/// Solid-color line and rectangle drawing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Pen {
    color: Rgb,
}

impl Pen {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.color = Rgb::new(red, green, blue);
    }

    /// DDA line from `(x1, y1)` to `(x2, y2)`. The start point itself is not
    /// plotted; the end point is. Intermediate positions are floored.
    pub fn draw_line(&self, canvas: &mut impl Canvas, x1: i32, y1: i32, x2: i32, y2: i32) {
        let delta_x = x2 as i64 - x1 as i64;
        let delta_y = y2 as i64 - y1 as i64;
        let steps = delta_x.abs().max(delta_y.abs());
        if steps == 0 {
            return;
        }

        let shift_x = delta_x as f64 / steps as f64;
        let shift_y = delta_y as f64 / steps as f64;
        let (mut x, mut y) = (x1 as f64, y1 as f64);
        for _ in 0..steps {
            x += shift_x;
            y += shift_y;
            canvas.plot(x.floor() as i64, y.floor() as i64, self.color);
        }
    }

    /// Outline whose far corner is `(x + width, y + height)`.
    pub fn draw_rectangle(&self, canvas: &mut impl Canvas, x: i32, y: i32, width: u32, height: u32) {
        let stop_x = x.saturating_add_unsigned(width);
        let stop_y = y.saturating_add_unsigned(height);
        self.draw_line(canvas, x, y, stop_x, y);
        self.draw_line(canvas, x, stop_y, stop_x, stop_y);
        self.draw_line(canvas, x, y, x, stop_y);
        self.draw_line(canvas, stop_x, y, stop_x, stop_y);
    }

    pub fn draw_filled_rectangle(&self, canvas: &mut impl Canvas, x: i32, y: i32, width: u32, height: u32) {
        for row in 0..height as i64 {
            for column in 0..width as i64 {
                canvas.plot(x as i64 + column, y as i64 + row, self.color);
            }
        }
    }
}
