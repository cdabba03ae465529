//! Facial landmark types

use serde::{Deserialize, Serialize};

/// A landmark in normalized frame coordinates (0..1 on both axes)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for LandmarkPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// All landmarks detected for one face in one frame.
///
/// Points are normalized; `frame_width`/`frame_height` give the pixel
/// projection used when measuring distances, so ratios keep their meaning
/// on non-square frames.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<LandmarkPoint>,
    frame_width: f32,
    frame_height: f32,
}

impl LandmarkSet {
    /// Landmarks measured in unit space (no pixel projection)
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self {
            points,
            frame_width: 1.0,
            frame_height: 1.0,
        }
    }

    /// Project distances onto a frame of the given pixel size
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width as f32;
        self.frame_height = height as f32;
        self
    }

    /// Normalized point at `index`
    pub fn get(&self, index: usize) -> Option<LandmarkPoint> {
        self.points.get(index).copied()
    }

    /// Point at `index` projected to pixel space
    pub fn pixel(&self, index: usize) -> Option<(f32, f32)> {
        self.get(index)
            .map(|p| (p.x * self.frame_width, p.y * self.frame_height))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The six landmark indices describing one eye.
///
/// Order: outer corner, two upper lid points, inner corner, two lower lid
/// points. Points 1/4 span the eye horizontally, 2↔6 and 3↔5 are the
/// vertical lid pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeDefinition(pub [usize; 6]);

impl EyeDefinition {
    /// Left eye in the 468/478-point face mesh topology
    pub const LEFT: EyeDefinition = EyeDefinition([33, 160, 158, 133, 153, 144]);

    /// Right eye in the 468/478-point face mesh topology
    pub const RIGHT: EyeDefinition = EyeDefinition([362, 385, 387, 263, 373, 380]);

    pub fn indices(&self) -> &[usize; 6] {
        &self.0
    }

    /// Highest landmark index this eye reads
    pub fn max_index(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_projection() {
        let set = LandmarkSet::new(vec![LandmarkPoint::new(0.5, 0.25)]).with_frame_size(640, 480);
        assert_eq!(set.pixel(0), Some((320.0, 120.0)));
        assert_eq!(set.pixel(1), None);
    }

    #[test]
    fn test_unit_space_by_default() {
        let set = LandmarkSet::new(vec![(0.2, 0.4).into()]);
        assert_eq!(set.pixel(0), Some((0.2, 0.4)));
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_default_eyes_fit_face_mesh() {
        assert!(EyeDefinition::LEFT.max_index() < 468);
        assert!(EyeDefinition::RIGHT.max_index() < 468);
        assert_eq!(EyeDefinition::LEFT.indices()[0], 33);
    }
}
