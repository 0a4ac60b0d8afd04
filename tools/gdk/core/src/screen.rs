//! # Screens
//!
//! A [`Screen`] pairs a [`PixelBuffer`] sized to a [`Display`]'s resolution with
//! that display and a clock. Drawing goes into the buffer; [`Screen::update`]
//! hands the finished RGB565 frame to the display and counts it.

use log::info;

use crate::bitmap::Rgb;
use crate::error::Result;
use crate::frame::{Canvas, PixelBuffer};
use crate::timer::{FpsCounter, TimeDaemon};

/// The device side of a screen: something that can show a packed frame.
pub trait Display {
    fn resolution(&self) -> (u32, u32);

    /// Show one `width * height` RGB565 frame, row-major.
    fn present(&mut self, frame: &[u16]) -> Result<()>;
}

pub struct Screen<D: Display, C: TimeDaemon> {
    frame: PixelBuffer,
    display: D,
    clock: C,
    counter: FpsCounter,
}

impl<D: Display, C: TimeDaemon> Screen<D, C> {
    pub fn new(display: D, clock: C) -> Result<Self> {
        let (width, height) = display.resolution();
        let frame = PixelBuffer::new(width, height)?;
        let counter = FpsCounter::new(&clock);
        info!("screen {}x{}", width, height);
        Ok(Self { frame, display, clock, counter })
    }

    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut PixelBuffer {
        &mut self.frame
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn clear_screen(&mut self) {
        self.frame.clear();
    }

    /// Present the primary buffer and count the frame.
    pub fn update(&mut self) -> Result<()> {
        self.display.present(self.frame.pixels())?;
        self.counter.update_counter(&self.clock);
        Ok(())
    }

    /// Frames presented during the last complete second.
    pub fn fps(&self) -> u32 {
        self.counter.fps()
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

impl<D: Display, C: TimeDaemon> Canvas for Screen<D, C> {
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
