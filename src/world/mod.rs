mod camera;
mod road;

pub use camera::{Camera, focal_factor};
pub use road::{Road, RoadError, Segment};
