//! ---------------------------------------------------------------------------
//! Software (CPU) line renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Every stroke is clipped (Liang–Barsky) to the active clip rectangle
//!   before the integer Bresenham walk, so wildly off-screen projections
//!   cost nothing.
//! ---------------------------------------------------------------------------

use glam::{DVec2, dvec2};

use crate::{
    engine::Viewport,
    renderer::{Line, Renderer, Rgba, StrokeKind},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Palette                                 */
/*───────────────────────────────────────────────────────────────────────*/

pub const BACKGROUND: Rgba = 0x00_F4_F1_E8;
pub const INSET_BACKGROUND: Rgba = 0x00_DD_E4_EE;
pub const ROAD_INK: Rgba = 0x00_10_20_40;
pub const DASH_INK: Rgba = 0x00_C0_80_20;
pub const HORIZON_INK: Rgba = 0x00_60_70_90;

fn ink(kind: StrokeKind) -> Rgba {
    match kind {
        StrokeKind::LeftEdge | StrokeKind::RightEdge | StrokeKind::MirrorFrame => ROAD_INK,
        StrokeKind::CenterDash => DASH_INK,
        StrokeKind::Horizon => HORIZON_INK,
    }
}

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Integer pixel rectangle, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PixelRect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    clip: Option<PixelRect>, // None = empty intersection
}

impl Software {
    fn frame_rect(&self) -> Option<PixelRect> {
        (self.width > 0 && self.height > 0).then(|| PixelRect {
            x0: 0,
            y0: 0,
            x1: self.width as i32 - 1,
            y1: self.height as i32 - 1,
        })
    }

    /// Surface rectangle → pixel rectangle, intersected with the frame.
    fn pixel_rect(&self, area: &Viewport) -> Option<PixelRect> {
        let frame = self.frame_rect()?;
        let lo = area.origin;
        let hi = area.max();
        let r = PixelRect {
            x0: (lo.x.ceil() as i32).max(frame.x0),
            y0: (lo.y.ceil() as i32).max(frame.y0),
            x1: (hi.x.ceil() as i32 - 1).min(frame.x1),
            y1: (hi.y.ceil() as i32 - 1).min(frame.y1),
        };
        (r.x0 <= r.x1 && r.y0 <= r.y1).then_some(r)
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Integer Bresenham line-drawing algorithm.
    fn bresenham(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, colour: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, colour);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x0 == x1 {
                    break;
                }
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                if y0 == y1 {
                    break;
                }
                err += dx;
                y0 += sy;
            }
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(BACKGROUND);
        self.clip = self.frame_rect();
    }

    fn fill(&mut self, area: &Viewport) {
        let Some(r) = self.pixel_rect(area) else {
            return;
        };
        for y in r.y0..=r.y1 {
            let row = y as usize * self.width;
            self.scratch[row + r.x0 as usize..=row + r.x1 as usize].fill(INSET_BACKGROUND);
        }
    }

    fn set_clip(&mut self, area: Option<&Viewport>) {
        self.clip = match area {
            Some(a) => self.pixel_rect(a),
            None => self.frame_rect(),
        };
    }

    fn draw_line(&mut self, line: &Line) {
        let Some(r) = self.clip else {
            return;
        };
        // f64 so huge near-camera coordinates don't eat the precision
        let lo = dvec2(r.x0 as f64, r.y0 as f64);
        let hi = dvec2(r.x1 as f64, r.y1 as f64);
        if let Some((a, b)) = clip_segment(line.from.as_dvec2(), line.to.as_dvec2(), lo, hi) {
            self.bresenham(
                a.x.round() as i32,
                a.y.round() as i32,
                b.x.round() as i32,
                b.y.round() as i32,
                ink(line.kind),
            );
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/// Liang–Barsky: clip `a → b` to the box `lo ..= hi`.
/// Returns `None` if nothing is left or an endpoint is not finite.
fn clip_segment(a: DVec2, b: DVec2, lo: DVec2, hi: DVec2) -> Option<(DVec2, DVec2)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-d.x, a.x - lo.x),
        (d.x, hi.x - a.x),
        (-d.y, a.y - lo.y),
        (d.y, hi.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None; // parallel and outside
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}

/*──────────────────────────────── Tests ───────────────────────────────*/
