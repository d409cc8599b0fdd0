pub mod composer;
pub mod frame;
pub mod projection;
pub mod types;

pub use composer::{Simulation, layout};
pub use frame::{FrameRenderer, Readout};
pub use types::Viewport;
