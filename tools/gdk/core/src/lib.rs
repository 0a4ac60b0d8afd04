pub mod error;
pub mod frame;
pub mod bitmap;
pub mod surface;
pub mod animation;
pub mod sprite;
pub mod background;
pub mod tileset;
pub mod text;
pub mod collision;
pub mod primitive;
pub mod screen;
pub mod timer;
pub mod inputs;
pub mod sound;
pub mod wave;

pub use error::{GdkError, Result};
