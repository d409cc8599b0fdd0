//! Pseudo-3D highway: a finite table of flat road segments projected
//! through a translate-only perspective camera, wrapped so it never ends,
//! and drawn twice per frame (forward view + rear-view mirror).
//!
//! ```text
//! world   Camera, Road            – data
//! sim     CameraController, Settings – per-frame state changes
//! engine  projection, FrameRenderer, Simulation – maths and passes
//! renderer DrawCall, Renderer, Software – pixels
//! ```
//!
//! The host calls [`engine::Simulation::tick`] once per display frame and
//! hands the returned draw calls to a [`renderer::Renderer`].

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
