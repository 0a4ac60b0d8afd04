mod png_display;
mod scene;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use gdk_core::animation::Framing;
use gdk_core::bitmap::Image;
use gdk_core::screen::Screen;
use gdk_core::timer::SystemClock;
use tracing::{info, Level};
use tracing_subscriber::util::SubscriberInitExt;

use crate::png_display::PngDisplay;
use crate::scene::{parse_point, Flip, Scene, SpriteLayer, Strip, TextLayer};

#[derive(Parser)]
#[command(name = "gdkview")]
#[command(version, about = "gopher gdk asset viewer", long_about = None)]
struct Cli {
    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode assets and print their format and size
    Info {
        /// TGA or PCX files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Compose a scene on a headless screen and save it as a PNG
    Render {
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Screen width in pixels
        #[arg(long, default_value_t = 320)]
        width: u32,

        /// Screen height in pixels
        #[arg(long, default_value_t = 240)]
        height: u32,

        /// Background asset, drawn from the top-left corner
        #[arg(long)]
        background: Option<PathBuf>,

        /// Scale the background to the screen size
        #[arg(long, requires = "background")]
        fit: bool,

        /// Sprite asset
        #[arg(long)]
        sprite: Option<PathBuf>,

        /// Number of frames in the sprite strip
        #[arg(long, default_value_t = 1, requires = "sprite")]
        frames: u32,

        /// How the sprite frames are laid out
        #[arg(long, value_enum, requires = "sprite")]
        strip: Option<Strip>,

        /// Sprite frame to draw, starting at 1
        #[arg(long, default_value_t = 1, requires = "sprite")]
        frame: u32,

        /// Sprite position as X,Y
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        at: (i32, i32),

        /// Draw the sprite without color-key transparency
        #[arg(long, requires = "sprite")]
        opaque: bool,

        /// Mirror the sprite before drawing
        #[arg(long, value_enum, requires = "sprite")]
        mirror: Option<Flip>,

        /// Text to draw with --font
        #[arg(long, requires = "font")]
        text: Option<String>,

        /// Font asset: 128 glyphs in a horizontal strip
        #[arg(long, requires = "text")]
        font: Option<PathBuf>,

        /// Text origin as X,Y
        #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
        text_at: (i32, i32),
    },
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Info { files } => {
            for path in files {
                let image = Image::load(&path).with_context(|| format!("failed to load {}", path.display()))?;
                let format = path
                    .extension()
                    .map(|ext| ext.to_string_lossy().to_ascii_uppercase())
                    .unwrap_or_default();
                println!("{}: {} {}x{}", path.display(), format, image.width(), image.height());
            }
        }
        Commands::Render {
            output,
            width,
            height,
            background,
            fit,
            sprite,
            frames,
            strip,
            frame,
            at,
            opaque,
            mirror,
            text,
            font,
            text_at,
        } => {
            let scene = Scene {
                background,
                fit,
                sprite: sprite.map(|path| SpriteLayer {
                    path,
                    framing: strip.map(Framing::from).unwrap_or(Framing::Single),
                    frames,
                    frame,
                    at,
                    opaque,
                    mirror: mirror.map(Into::into),
                }),
                text: text.zip(font).map(|(text, font)| TextLayer { text, font, at: text_at }),
            };

            let mut screen = Screen::new(PngDisplay::new(width, height)?, SystemClock::default())?;
            scene.compose(&mut screen)?;
            screen.update()?;

            let png = screen.into_display();
            info!("presented {} frame(s)", png.presented());
            png.save(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
    }

    Ok(())
}
