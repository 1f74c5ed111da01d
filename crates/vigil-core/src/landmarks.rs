//! Facial landmark observations as delivered by the external detection
//! pipeline.
//!
//! The core never produces or mutates these — it only reads them. All
//! coordinates are normalized to [0, 1] in the capture frame. The types
//! derive serde so captured sessions can be written out and replayed.

use serde::{Deserialize, Serialize};

/// A normalized 2D landmark point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Normalized face bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Box area in normalized units. Used as the zoom-trend signal.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// One detected face in one captured frame.
///
/// Point sequences follow the detector's region ordering: eye contours
/// are expected to carry 6+ points (EAR needs them), lips are ordered
/// corner-to-corner along the outer contour. Regions may be empty or
/// short on poor frames; every consumer degrades to "no classification"
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkObservation {
    pub left_eye: Vec<Point>,
    pub right_eye: Vec<Point>,
    pub nose: Vec<Point>,
    pub outer_lips: Vec<Point>,
    pub bounding_box: BoundingBox,
}

/// All face observations for a single captured frame.
///
/// The observation count doubles as the spoofing signal: more than one
/// face in frame is treated as a presentation attack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameBatch {
    pub observations: Vec<LandmarkObservation>,
}

impl FrameBatch {
    pub fn new(observations: Vec<LandmarkObservation>) -> Self {
        Self { observations }
    }

    /// A frame in which no face was detected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.observations.len()
    }
}
