use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use gdk_core::animation::Framing;
use gdk_core::background::Background;
use gdk_core::bitmap::Image;
use gdk_core::frame::Canvas;
use gdk_core::sprite::Sprite;
use gdk_core::surface::Mirror;
use gdk_core::text::Text;
use tracing::info;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Strip {
    Horizontal,
    Vertical,
}

impl From<Strip> for Framing {
    fn from(strip: Strip) -> Self {
        match strip {
            Strip::Horizontal => Framing::HorizontalStrip,
            Strip::Vertical => Framing::VerticalStrip,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Flip {
    Horizontal,
    Vertical,
}

impl From<Flip> for Mirror {
    fn from(flip: Flip) -> Self {
        match flip {
            Flip::Horizontal => Mirror::Horizontal,
            Flip::Vertical => Mirror::Vertical,
        }
    }
}

/// `X,Y` on the command line.
pub fn parse_point(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{}`", value))?;
    let x = x.trim().parse().map_err(|e| format!("bad x coordinate `{}`: {}", x, e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y coordinate `{}`: {}", y, e))?;
    Ok((x, y))
}

pub struct SpriteLayer {
    pub path: PathBuf,
    pub framing: Framing,
    pub frames: u32,
    pub frame: u32,
    pub at: (i32, i32),
    pub opaque: bool,
    pub mirror: Option<Mirror>,
}

pub struct TextLayer {
    pub text: String,
    pub font: PathBuf,
    pub at: (i32, i32),
}

#[derive(Default)]
pub struct Scene {
    pub background: Option<PathBuf>,
    pub fit: bool,
    pub sprite: Option<SpriteLayer>,
    pub text: Option<TextLayer>,
}

fn load(path: &Path) -> anyhow::Result<Image> {
    Image::load(path).with_context(|| format!("failed to load {}", path.display()))
}

impl Scene {
    /// Draw every layer, back to front.
    pub fn compose(&self, canvas: &mut impl Canvas) -> anyhow::Result<()> {
        if let Some(path) = &self.background {
            let mut background = Background::new();
            background.load_image(load(path)?);
            if self.fit {
                background.resize(canvas.width(), canvas.height());
            }
            let refresh = background.draw(canvas);
            info!("background {}x{}: {:?}", background.width(), background.height(), refresh);
        }

        if let Some(layer) = &self.sprite {
            let mut sprite = Sprite::new();
            sprite.load(load(&layer.path)?, layer.framing, layer.frames);
            if let Some(kind) = layer.mirror {
                sprite.mirror(kind);
            }
            sprite.set_frame(layer.frame);
            sprite.set_transparent(!layer.opaque);
            let written = sprite.draw_at(canvas, layer.at.0, layer.at.1);
            info!(
                "sprite frame {}/{} ({}x{}) at {:?}: {} pixels",
                sprite.frame(),
                sprite.frames(),
                sprite.width(),
                sprite.height(),
                layer.at,
                written
            );
        }

        if let Some(layer) = &self.text {
            let mut text = Text::new();
            text.load_font(load(&layer.font)?);
            let written = text.draw_text_at(canvas, layer.at.0, layer.at.1, &layer.text);
            info!("text {:?} at {:?}: {} pixels", layer.text, layer.at, written);
        }

        Ok(())
    }
}
