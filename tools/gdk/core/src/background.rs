//! # Backgrounds
//!
//! A background is drawn from the canvas origin and clipped to the canvas size.
//! Recompositing a full-screen image every tick is the most expensive thing a
//! game loop does, so the first draw of a frame is cached in the canvas's shadow
//! buffer and every following draw of the same frame just restores it.
//!
//! Anything that changes what the background looks like (a new image, a
//! transform, different framing) drops the cache.

use log::debug;

use crate::animation::{FrameStrip, Framing};
use crate::bitmap::Image;
use crate::frame::Canvas;
use crate::surface::{Mirror, Surface};

/// What a [`Background::draw`] call had to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Every pixel was redrawn and the result saved to the shadow buffer.
    Recomposited,
    /// The cached frame was copied back from the shadow buffer.
    Restored,
}

#[derive(Debug, Clone, Default)]
pub struct Background {
    surface: Surface,
    strip: FrameStrip,
    last_drawn: Option<u32>,
}

impl Background {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, image: Image, framing: Framing, frames: u32) {
        self.surface.load(image);
        if framing != Framing::Single {
            self.strip.set_frames(frames, &self.surface);
        }
        self.strip.set_framing(framing, &self.surface);
        self.invalidate();
    }

    pub fn load_image(&mut self, image: Image) {
        self.load(image, Framing::Single, 1);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn set_framing(&mut self, framing: Framing) {
        self.strip.set_framing(framing, &self.surface);
        self.invalidate();
    }

    pub fn set_setting(&mut self, framing: Framing, frames: u32) {
        if framing != Framing::Single {
            self.strip.set_frames(frames, &self.surface);
        }
        self.set_framing(framing);
    }

    pub fn framing(&self) -> Framing {
        self.strip.framing()
    }

    pub fn frame(&self) -> u32 {
        self.strip.animation().frame()
    }

    pub fn frames(&self) -> u32 {
        self.strip.animation().frames()
    }

    pub fn set_frame(&mut self, target: u32) {
        self.strip.set_frame(target, &self.surface);
    }

    pub fn step(&mut self) {
        self.strip.step(&self.surface);
    }

    pub fn mirror(&mut self, kind: Mirror) {
        self.surface.mirror(kind);
        self.strip.configure(&self.surface);
        self.invalidate();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.strip.configure(&self.surface);
        self.invalidate();
    }

    /// Width of one frame, before clipping to a canvas.
    pub fn width(&self) -> u32 {
        self.strip.region().width
    }

    /// Height of one frame, before clipping to a canvas.
    pub fn height(&self) -> u32 {
        self.strip.region().height
    }

    /// Force the next draw to recomposite.
    pub fn invalidate(&mut self) {
        self.last_drawn = None;
    }

    pub fn draw(&mut self, canvas: &mut impl Canvas) -> Refresh {
        let frame = self.frame();
        if self.last_drawn == Some(frame) {
            canvas.restore();
            return Refresh::Restored;
        }

        let region = self.strip.region();
        let width = region.width.min(canvas.width());
        let height = region.height.min(canvas.height());
        debug!("recompositing background frame {} ({}x{})", frame, width, height);

        self.surface.blit(canvas, region.start, width, height, 0, 0, None);
        canvas.save();
        self.last_drawn = Some(frame);
        Refresh::Recomposited
    }
}
