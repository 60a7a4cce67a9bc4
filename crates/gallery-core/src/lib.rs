//! Platform-free core of the orbiting gallery.
//!
//! Nothing in here touches the DOM or the GPU. The web front-end feeds input
//! events, asset results and frame times into a [`Gallery`] and implements
//! [`RenderSurface`] for the actual drawing.

pub mod assets;
pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod frame;
pub mod input;
pub mod lifecycle;
pub mod scene;
pub mod sequence;
pub mod state;
pub mod tween;

pub use assets::*;
pub use config::*;
pub use easing::*;
pub use error::*;
pub use frame::*;
pub use input::*;
pub use lifecycle::*;
pub use scene::*;
pub use sequence::*;
pub use state::*;
pub use tween::*;
