// Read-only table of road anchors.  Built once at start-up, never edited
// while the simulation runs.

/// One longitudinal slice of road.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub lateral: f32, // centre-line offset from x = 0
    pub z: f32,       // distance from the start of the table
}

/// Things that can go wrong when building or querying a road table.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RoadError {
    /// Requested index is outside `0 .. road.len()`.
    #[error("segment index {index} out of range (road has {len} segments)")]
    OutOfRange { index: isize, len: usize },

    /// A table needs at least one full segment (two anchors).
    #[error("road needs at least 2 anchors, got {0}")]
    TooShort(usize),

    /// Waypoints must move strictly forward.
    #[error("anchor {index} at z = {z} does not advance past z = {prev}")]
    NotMonotonic { index: usize, prev: f32, z: f32 },

    #[error("segment length must be positive and finite, got {0}")]
    BadSegmentLength(f32),
}

/// Fixed-size, ordered road table.
///
/// * `segment_length` is the nominal spacing used by the window maths.
/// * Anchors are strictly increasing in `z`.
#[derive(Clone, Debug)]
pub struct Road {
    segments: Vec<Segment>,
    segment_length: f32,
}

impl Road {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// `n` evenly spaced anchors on the centre line.
    pub fn straight(n: usize, segment_length: f32) -> Result<Self, RoadError> {
        Self::generate(n, segment_length, |_| 0.0)
    }

    /// `n` evenly spaced anchors swinging `amplitude` units left and right,
    /// one full swing every `2π · period` segments.
    pub fn winding(
        n: usize,
        segment_length: f32,
        amplitude: f32,
        period: f32,
    ) -> Result<Self, RoadError> {
        Self::generate(n, segment_length, |i| (i as f32 / period).cos() * amplitude)
    }

    /// Adopt a table authored elsewhere, e.g. by a curve editor.
    ///
    /// Spacing may vary, but `z` must strictly increase.
    pub fn from_waypoints<I>(segment_length: f32, waypoints: I) -> Result<Self, RoadError>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        check_length(segment_length)?;
        let segments: Vec<Segment> = waypoints
            .into_iter()
            .map(|(lateral, z)| Segment { lateral, z })
            .collect();
        if segments.len() < 2 {
            return Err(RoadError::TooShort(segments.len()));
        }
        for (index, pair) in segments.windows(2).enumerate() {
            if !(pair[1].z > pair[0].z) {
                return Err(RoadError::NotMonotonic {
                    index: index + 1,
                    prev: pair[0].z,
                    z: pair[1].z,
                });
            }
        }
        Ok(Self {
            segments,
            segment_length,
        })
    }

    fn generate(
        n: usize,
        segment_length: f32,
        lateral: impl Fn(usize) -> f32,
    ) -> Result<Self, RoadError> {
        check_length(segment_length)?;
        if n < 2 {
            return Err(RoadError::TooShort(n));
        }
        let segments = (0..n)
            .map(|i| Segment {
                lateral: lateral(i),
                z: i as f32 * segment_length,
            })
            .collect();
        Ok(Self {
            segments,
            segment_length,
        })
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of anchors `N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Bounds-checked lookup.  Signed so reverse traversals can report the
    /// index they actually asked for.
    pub fn segment_at(&self, index: isize) -> Result<Segment, RoadError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.segments.get(i))
            .copied()
            .ok_or(RoadError::OutOfRange {
                index,
                len: self.segments.len(),
            })
    }
}

fn check_length(segment_length: f32) -> Result<(), RoadError> {
    if segment_length.is_finite() && segment_length > 0.0 {
        Ok(())
    } else {
        Err(RoadError::BadSegmentLength(segment_length))
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
