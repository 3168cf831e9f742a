//! Face detection results and their mapping into the tracking signal.
//!
//! The detector itself is an external service. All this module knows is the
//! shape of its output: zero or more normalized bounding boxes with a score.

use crate::{
    constants::{DEFAULT_DEPTH_SCALE, DEFAULT_MIN_CONFIDENCE, DEPTH_PROXY_MAX, DEPTH_PROXY_MIN},
    smoother::TrackingSignal,
};
use serde::{Deserialize, Serialize};

/// Face bounding box in normalized image coordinates, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceBox {
    pub const fn new(x_center: f64, y_center: f64, width: f64, height: f64) -> Self {
        Self {
            x_center,
            y_center,
            width,
            height,
        }
    }

    /// Box area in normalized units
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Face detection result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Bounding box of the detected face
    pub bbox: FaceBox,
    /// Confidence score of the detection
    pub score: f32,
}

impl FaceDetection {
    pub const fn new(bbox: FaceBox, score: f32) -> Self {
        Self { bbox, score }
    }
}

/// Converts detector output into [`TrackingSignal`] values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionMapper {
    depth_scale: f64,
    depth_min: f64,
    depth_max: f64,
    min_confidence: f32,
    mirror: bool,
}

impl Default for DetectionMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_SCALE, DEPTH_PROXY_MIN, DEPTH_PROXY_MAX, DEFAULT_MIN_CONFIDENCE, true)
    }
}

impl DetectionMapper {
    /// # Panics
    ///
    /// Panics if `depth_min > depth_max`
    #[must_use]
    pub fn new(depth_scale: f64, depth_min: f64, depth_max: f64, min_confidence: f32, mirror: bool) -> Self {
        assert!(depth_min <= depth_max, "Depth bounds must satisfy min <= max");
        Self {
            depth_scale,
            depth_min,
            depth_max,
            min_confidence,
            mirror,
        }
    }

    /// Pick the detection that drives the camera: the first one the detector
    /// reported, provided it clears the confidence threshold.
    pub fn select_primary<'a>(&self, detections: &'a [FaceDetection]) -> Option<&'a FaceDetection> {
        detections
            .first()
            .filter(|detection| detection.score >= self.min_confidence)
    }

    /// Map one bounding box into head-position targets.
    ///
    /// Only the depth proxy is clamped. A zero-area box produces an infinite
    /// raw proxy which clamps to the upper bound.
    pub fn map(&self, bbox: &FaceBox) -> TrackingSignal {
        let sign = if self.mirror { -1.0 } else { 1.0 };
        let target_x = sign * (bbox.x_center - 0.5) * 2.0;
        let target_y = -(bbox.y_center - 0.5) * 2.0;

        let raw_depth = self.depth_scale / bbox.area().sqrt();
        let target_z = if raw_depth.is_nan() {
            self.depth_max
        } else {
            raw_depth.clamp(self.depth_min, self.depth_max)
        };

        TrackingSignal::new(target_x, target_y, target_z)
    }

    /// Select and map in one step; `None` means "no face this frame"
    pub fn process(&self, detections: &[FaceDetection]) -> Option<TrackingSignal> {
        self.select_primary(detections).map(|detection| self.map(&detection.bbox))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_face_is_neutral() {
        let mapper = DetectionMapper::default();
        let signal = mapper.map(&FaceBox::new(0.5, 0.5, 0.64, 1.0));
        assert_eq!(signal.target_x, 0.0);
        assert_eq!(signal.target_y, 0.0);
        assert!((signal.target_z - 1.0).abs() < 1e-12); // 0.8 / sqrt(0.64)
    }

    #[test]
    fn test_mirrored_axes() {
        let mapper = DetectionMapper::default();
        let signal = mapper.map(&FaceBox::new(0.25, 0.75, 0.3, 0.3));
        assert!((signal.target_x - 0.5).abs() < 1e-12);
        assert!((signal.target_y + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_depth_clamped() {
        let mapper = DetectionMapper::default();
        // Full-frame face: 0.8 / sqrt(1.0)
        assert!((mapper.map(&FaceBox::new(0.5, 0.5, 1.0, 1.0)).target_z - 0.8).abs() < 1e-12);
        // Tiny face is far away and clamps to the upper bound
        assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, 0.01, 0.01)).target_z, DEPTH_PROXY_MAX);
        // Zero-area box
        assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, 0.0, 0.0)).target_z, DEPTH_PROXY_MAX);
    }

    #[test]
    fn test_confidence_gate() {
        let mapper = DetectionMapper::default();
        let weak = FaceDetection::new(FaceBox::new(0.5, 0.5, 0.2, 0.2), 0.3);
        let strong = FaceDetection::new(FaceBox::new(0.2, 0.5, 0.2, 0.2), 0.9);

        assert!(mapper.process(&[]).is_none());
        assert!(mapper.process(&[weak]).is_none());
        // Only the first detection is considered
        assert!(mapper.process(&[weak, strong]).is_none());
        assert!(mapper.process(&[strong, weak]).is_some());
    }

    #[test]
    fn test_unmirrored() {
        let mapper = DetectionMapper::new(0.8, 0.5, 1.5, 0.0, false);
        let signal = mapper.map(&FaceBox::new(0.75, 0.5, 0.3, 0.3));
        assert!((signal.target_x - 0.5).abs() < 1e-12);
    }
}
