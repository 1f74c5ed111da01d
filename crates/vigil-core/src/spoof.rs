//! Multi-face spoofing screen.
//!
//! Runs before any gesture evaluation. More than one detected face in a
//! frame is treated as a presentation attack, not a recoverable error.

use crate::landmarks::{FrameBatch, LandmarkObservation};

/// Outcome of screening one frame's observations.
#[derive(Debug, PartialEq)]
pub enum FacePresence<'a> {
    /// Exactly one face: safe to evaluate the gesture.
    Single(&'a LandmarkObservation),
    /// No face in frame: transient, reported via feedback only.
    Absent,
    /// Two or more faces: hard spoofing verdict.
    Spoofed,
}

/// Screen a frame batch by its face count.
pub fn screen(batch: &FrameBatch) -> FacePresence<'_> {
    match batch.observations.as_slice() {
        [] => FacePresence::Absent,
        [single] => FacePresence::Single(single),
        _ => FacePresence::Spoofed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::BoundingBox;

    fn obs() -> LandmarkObservation {
        LandmarkObservation {
            left_eye: Vec::new(),
            right_eye: Vec::new(),
            nose: Vec::new(),
            outer_lips: Vec::new(),
            bounding_box: BoundingBox {
                x: 0.2,
                y: 0.2,
                width: 0.3,
                height: 0.3,
            },
        }
    }

    #[test]
    fn empty_batch_is_absent() {
        assert_eq!(screen(&FrameBatch::empty()), FacePresence::Absent);
    }

    #[test]
    fn single_face_passes_through() {
        let batch = FrameBatch::new(vec![obs()]);
        assert!(matches!(screen(&batch), FacePresence::Single(_)));
    }

    #[test]
    fn two_or_more_faces_is_spoofed() {
        let batch = FrameBatch::new(vec![obs(), obs()]);
        assert_eq!(screen(&batch), FacePresence::Spoofed);

        let batch = FrameBatch::new(vec![obs(), obs(), obs()]);
        assert_eq!(screen(&batch), FacePresence::Spoofed);
    }
}
