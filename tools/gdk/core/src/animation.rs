//! # Frame indexing and strip framing
//!
//! One asset can hold several equally sized frames laid out side by side
//! ([`Framing::HorizontalStrip`]) or stacked ([`Framing::VerticalStrip`]).
//! [`Animation`] tracks which frame is current, [`Framing::region`] turns that
//! into the sub-rectangle of the surface to draw.
//!
//! ```text
//!  HorizontalStrip, frames = 3        VerticalStrip, frames = 2
//! ┌───────┬───────┬───────┐          ┌───────────┐
//! │   1   │   2   │   3   │          │     1     │
//! └───────┴───────┴───────┘          ├───────────┤
//!                                     │     2     │
//!                                     └───────────┘
//! ```

use log::warn;

use crate::surface::Surface;

/// Current frame (1-based) out of a frame count. `1 <= frame <= frames` always holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Animation {
    frame: u32,
    frames: u32,
}

impl Default for Animation {
    fn default() -> Self {
        Self { frame: 1, frames: 1 }
    }
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Jump to `target`. Requests outside `1..=frames` are ignored.
    pub fn set_frame(&mut self, target: u32) {
        if (1..=self.frames).contains(&target) {
            self.frame = target;
        } else {
            warn!("ignoring frame {} of {}", target, self.frames);
        }
    }

    /// Step to the next frame, wrapping from the last back to the first.
    pub fn advance(&mut self) {
        self.frame = if self.frame >= self.frames { 1 } else { self.frame + 1 };
    }

    /// Change the frame count. Zero is ignored; shrinking below the current
    /// frame rewinds to the first one.
    pub fn set_frames(&mut self, amount: u32) {
        if amount == 0 {
            warn!("ignoring zero frame count");
            return;
        }
        self.frames = amount;
        if self.frame > amount {
            self.frame = 1;
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Framing {
    /// The whole surface is one frame.
    #[default]
    Single,
    /// Frames sit side by side, left to right.
    HorizontalStrip,
    /// Frames are stacked, top to bottom.
    VerticalStrip,
}

/// The part of a surface holding the current frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub width: u32,
    pub height: u32,
    /// Pixel offset of the region's top-left corner within the surface.
    pub start: usize,
}

impl Framing {
    pub fn region(self, width: u32, height: u32, animation: &Animation) -> Region {
        let before = (animation.frame() - 1) as usize;
        match self {
            Framing::Single => Region { width, height, start: 0 },
            Framing::HorizontalStrip => {
                let width = width / animation.frames();
                Region { width, height, start: before * width as usize }
            }
            Framing::VerticalStrip => {
                let height = height / animation.frames();
                Region { width, height, start: before * width as usize * height as usize }
            }
        }
    }
}

/// Framing state shared by sprites and backgrounds. The region is recomputed
/// on every change, so it can never describe a stale frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStrip {
    animation: Animation,
    framing: Framing,
    region: Region,
}

impl FrameStrip {
    #[inline]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    #[inline]
    pub fn framing(&self) -> Framing {
        self.framing
    }

    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn configure(&mut self, surface: &Surface) {
        self.region = self.framing.region(surface.width(), surface.height(), &self.animation);
    }

    pub fn set_framing(&mut self, framing: Framing, surface: &Surface) {
        self.framing = framing;
        self.configure(surface);
    }

    pub fn set_frames(&mut self, amount: u32, surface: &Surface) {
        self.animation.set_frames(amount);
        self.configure(surface);
    }

    pub fn set_frame(&mut self, target: u32, surface: &Surface) {
        self.animation.set_frame(target);
        self.configure(surface);
    }

    pub fn step(&mut self, surface: &Surface) {
        self.animation.advance();
        self.configure(surface);
    }
}
