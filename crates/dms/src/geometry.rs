//! Eye aspect ratio (EAR)
//!
//! EAR = (|p2.y - p6.y| + |p3.y - p5.y|) / (2 * |p1.x - p4.x|)
//!
//! Roughly 0.3 for an open eye, approaching 0 as the lids close. The
//! ratio is invariant under uniform scaling of the frame.

use crate::landmarks::{EyeDefinition, LandmarkSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a frame yields no openness measurement
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Eye corners project onto the same column (or coordinates are not finite)
    #[error("Degenerate eye geometry: horizontal corner separation is zero")]
    DegenerateGeometry,

    #[error("Landmark {index} missing from set of {len}")]
    LandmarkOutOfRange { index: usize, len: usize },
}

/// Per-eye and averaged openness for one face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeMetrics {
    pub left: f32,
    pub right: f32,
    pub average: f32,
}

/// Openness of one eye.
///
/// Never returns NaN or infinity.
pub fn compute_openness(landmarks: &LandmarkSet, eye: &EyeDefinition) -> Result<f32, GeometryError> {
    let mut p = [(0.0f32, 0.0f32); 6];
    for (slot, &index) in p.iter_mut().zip(eye.indices()) {
        *slot = landmarks.pixel(index).ok_or(GeometryError::LandmarkOutOfRange {
            index,
            len: landmarks.len(),
        })?;
    }

    let [p1, p2, p3, p4, p5, p6] = p;
    let vertical = (p2.1 - p6.1).abs() + (p3.1 - p5.1).abs();
    let horizontal = (p1.0 - p4.0).abs();

    if horizontal == 0.0 || !horizontal.is_finite() {
        return Err(GeometryError::DegenerateGeometry);
    }

    let ear = vertical / (2.0 * horizontal);
    if ear.is_finite() {
        Ok(ear)
    } else {
        Err(GeometryError::DegenerateGeometry)
    }
}

/// Mean of both eyes, so a transient occlusion of one eye does not dominate
pub fn average_openness(left: f32, right: f32) -> f32 {
    (left + right) / 2.0
}

/// Measure both eyes of a face. Fails if either eye cannot be measured.
pub fn measure_face(
    landmarks: &LandmarkSet,
    left_eye: &EyeDefinition,
    right_eye: &EyeDefinition,
) -> Result<EyeMetrics, GeometryError> {
    let left = compute_openness(landmarks, left_eye)?;
    let right = compute_openness(landmarks, right_eye)?;
    Ok(EyeMetrics {
        left,
        right,
        average: average_openness(left, right),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LandmarkPoint;
    use proptest::prelude::*;

    const EYE: EyeDefinition = EyeDefinition([0, 1, 2, 3, 4, 5]);

    /// Eye with corners at x0/x1 and lids `gap` apart around y = 0.5
    fn eye_points(x0: f32, x1: f32, gap: f32) -> Vec<LandmarkPoint> {
        let top = 0.5 - gap / 2.0;
        let bottom = 0.5 + gap / 2.0;
        let third = (x1 - x0) / 3.0;
        vec![
            LandmarkPoint::new(x0, 0.5),
            LandmarkPoint::new(x0 + third, top),
            LandmarkPoint::new(x0 + 2.0 * third, top),
            LandmarkPoint::new(x1, 0.5),
            LandmarkPoint::new(x0 + 2.0 * third, bottom),
            LandmarkPoint::new(x0 + third, bottom),
        ]
    }

    #[test]
    fn test_open_eye() {
        let set = LandmarkSet::new(eye_points(0.4, 0.6, 0.06));
        let ear = compute_openness(&set, &EYE).unwrap();
        // (0.06 + 0.06) / (2 * 0.2)
        assert!((ear - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_closed_eye_is_zero() {
        let set = LandmarkSet::new(eye_points(0.4, 0.6, 0.0));
        assert_eq!(compute_openness(&set, &EYE).unwrap(), 0.0);
    }

    #[test]
    fn test_degenerate_corners() {
        let set = LandmarkSet::new(eye_points(0.5, 0.5, 0.04));
        assert_eq!(
            compute_openness(&set, &EYE),
            Err(GeometryError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_non_finite_input_is_degenerate() {
        let mut points = eye_points(0.4, 0.6, 0.04);
        points[1].y = f32::NAN;
        let set = LandmarkSet::new(points);
        assert_eq!(
            compute_openness(&set, &EYE),
            Err(GeometryError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_missing_landmark() {
        let set = LandmarkSet::new(eye_points(0.4, 0.6, 0.04));
        let eye = EyeDefinition([0, 1, 2, 3, 4, 9]);
        assert_eq!(
            compute_openness(&set, &eye),
            Err(GeometryError::LandmarkOutOfRange { index: 9, len: 6 })
        );
    }

    #[test]
    fn test_frame_aspect_is_applied() {
        // Same normalized points on a 4:3 frame: vertical scales by 480,
        // horizontal by 640
        let set = LandmarkSet::new(eye_points(0.4, 0.6, 0.06)).with_frame_size(640, 480);
        let ear = compute_openness(&set, &EYE).unwrap();
        assert!((ear - 0.3 * 480.0 / 640.0).abs() < 1e-4);
    }

    #[test]
    fn test_measure_face_averages() {
        let mut points = eye_points(0.1, 0.3, 0.06);
        points.extend(eye_points(0.6, 0.8, 0.02));
        let set = LandmarkSet::new(points);
        let right = EyeDefinition([6, 7, 8, 9, 10, 11]);

        let metrics = measure_face(&set, &EYE, &right).unwrap();
        assert!((metrics.left - 0.3).abs() < 1e-5);
        assert!((metrics.right - 0.1).abs() < 1e-5);
        assert!((metrics.average - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_measure_face_fails_on_one_bad_eye() {
        let mut points = eye_points(0.1, 0.3, 0.06);
        points.extend(eye_points(0.7, 0.7, 0.02));
        let set = LandmarkSet::new(points);
        let right = EyeDefinition([6, 7, 8, 9, 10, 11]);
        assert!(measure_face(&set, &EYE, &right).is_err());
    }

    proptest! {
        #[test]
        fn prop_ear_is_finite_and_non_negative(
            coords in proptest::collection::vec((0.0f32..=1.0, 0.0f32..=1.0), 6)
        ) {
            let points = coords.into_iter().map(LandmarkPoint::from).collect();
            let set = LandmarkSet::new(points);
            match compute_openness(&set, &EYE) {
                Ok(ear) => prop_assert!(ear.is_finite() && ear >= 0.0),
                Err(e) => prop_assert_eq!(e, GeometryError::DegenerateGeometry),
            }
        }

        #[test]
        fn prop_uniform_scale_invariant(
            x0 in 0.0f32..0.45,
            width in 0.05f32..0.5,
            gap in 0.0f32..0.2,
            scale in 1u32..4000,
        ) {
            let points = eye_points(x0, x0 + width, gap);
            let unit = compute_openness(&LandmarkSet::new(points.clone()), &EYE).unwrap();
            let scaled = compute_openness(
                &LandmarkSet::new(points).with_frame_size(scale, scale),
                &EYE,
            ).unwrap();
            prop_assert!((unit - scaled).abs() <= 1e-3 * unit.max(1.0));
        }
    }
}
