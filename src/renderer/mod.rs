//! Rendering abstraction layer.
//!
//! *The road engine never touches a pixel buffer directly.*
//! It produces a list of [`DrawCall`]s in paint order and hands them to a
//! type that implements [`Renderer`].
//!
//! * Back-ends (`renderer::software`, a canvas, a GPU path …) plug in
//!   without changing the projection or traversal code.
//! * A blanket-impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.

use bitflags::bitflags;
use glam::Vec2;

use crate::engine::Viewport;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// What a stroke depicts.  Back-ends pick colours from this.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrokeKind {
    LeftEdge,
    RightEdge,
    CenterDash,
    Horizon,
    MirrorFrame,
}

/// One straight stroke in surface pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub kind: StrokeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// Paint a rectangle with the background colour of an inset view.
    Fill(Viewport),
    /// Restrict following strokes to a rectangle (`None` = whole surface).
    Clip(Option<Viewport>),
    Stroke(Line),
}

bitflags! {
    /// Which parts of the scene get emitted.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Layers: u8 {
        const EDGES       = 1 << 0;
        const CENTER_LINE = 1 << 1;
        const HORIZON     = 1 << 2;
        const MIRROR      = 1 << 3;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Layers::all()
    }
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill a rectangle with the inset background.
    fn fill(&mut self, area: &Viewport);

    /// Limit subsequent strokes to `area`, or lift the limit.
    fn set_clip(&mut self, area: Option<&Viewport>);

    /// Rasterise one stroke.
    fn draw_line(&mut self, line: &Line);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, width: usize, height: usize, calls: &[DrawCall], submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height);
        for c in calls {
            match c {
                DrawCall::Fill(area) => self.fill(area),
                DrawCall::Clip(area) => self.set_clip(area.as_ref()),
                DrawCall::Stroke(line) => self.draw_line(line),
            }
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::Software;
