use std::fmt;

use glam::{Vec3, vec2, vec3};

use crate::{
    engine::{projection, types::Viewport},
    renderer::{DrawCall, Layers, Line, StrokeKind},
    sim::Window,
    world::{Camera, Road, RoadError},
};

/// Turns one segment window into strokes for a single viewport.
#[derive(Clone, Copy, Debug)]
pub struct FrameRenderer {
    pub road_width: f32, // half-width: edges sit at lateral ± road_width
    pub layers: Layers,
}

impl FrameRenderer {
    pub fn new(road_width: f32) -> Self {
        Self {
            road_width,
            layers: Layers::default(),
        }
    }

    /// Emit the road strip and horizon seen through `vp`.
    ///
    /// * forward: segment pairs `(offset+i, offset+i+1)`
    /// * `mirrored`: pairs `(offset-i+1, offset-i)`, same camera.
    ///
    /// A lookup outside the road is a window-maths bug upstream and aborts
    /// the pass with [`RoadError::OutOfRange`].
    pub fn render_view(
        &self,
        cam: &Camera,
        road: &Road,
        vp: &Viewport,
        window: Window,
        mirrored: bool,
        out: &mut Vec<DrawCall>,
    ) -> Result<(), RoadError> {
        let half_len = road.segment_length() * 0.5;
        let w = self.road_width;
        let offset = window.offset as isize;

        let mut stroke = |a: Vec3, b: Vec3, kind: StrokeKind| {
            out.push(DrawCall::Stroke(Line {
                from: vp.to_surface(projection::transform_point(cam, a, vp)),
                to: vp.to_surface(projection::transform_point(cam, b, vp)),
                kind,
            }));
        };

        for i in 0..window.draw_count as isize {
            let (near, far) = if mirrored {
                (offset - i + 1, offset - i)
            } else {
                (offset + i, offset + i + 1)
            };
            let s0 = road.segment_at(near)?;
            let s1 = road.segment_at(far)?;
            let (x0, z0) = (s0.lateral, s0.z);
            let (x1, z1) = (s1.lateral, s1.z);

            if self.layers.contains(Layers::EDGES) {
                stroke(vec3(x0 - w, 0.0, z0), vec3(x1 - w, 0.0, z1), StrokeKind::LeftEdge);
                stroke(vec3(x1 + w, 0.0, z1), vec3(x0 + w, 0.0, z0), StrokeKind::RightEdge);
            }
            if self.layers.contains(Layers::CENTER_LINE) {
                // dash runs half a segment; rear view anchors it on the far anchor
                let dash_z = if mirrored { z1 } else { z0 } + half_len;
                stroke(
                    vec3(x0, 0.0, z0),
                    vec3((x0 + x1) * 0.5, 0.0, dash_z),
                    StrokeKind::CenterDash,
                );
            }
        }

        if self.layers.contains(Layers::HORIZON) {
            let distance = window.draw_count as f32 * road.segment_length();
            let y = projection::horizon(cam, distance, vp);
            out.push(DrawCall::Stroke(Line {
                from: vp.to_surface(vec2(0.0, y)),
                to: vp.to_surface(vec2(vp.width, y)),
                kind: StrokeKind::Horizon,
            }));
        }
        Ok(())
    }
}

/// Diagnostic line `Camera: x, y, z (offset)`.
///
/// z is rounded to the nearest 100 so it doesn't flicker every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Readout {
    pub pos: Vec3,
    pub offset: usize,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera: {:.2}, {:.2}, {} ({})",
            self.pos.x,
            self.pos.y,
            (self.pos.z / 100.0).round() * 100.0,
            self.offset
        )
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
