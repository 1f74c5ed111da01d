//! Per-gesture evaluators.
//!
//! Each detector is a pure function from one [`LandmarkObservation`] to
//! an observed classification. A detector returns `Some` only on a
//! positive match; `None` uniformly means "this gesture was not
//! observed", whether because the geometry says so or because the
//! frame lacked the landmarks to decide. The session assigns the
//! result unconditionally, so a non-match always clears any previous
//! classification.

use crate::challenge::ChallengeType;
use crate::config::ChallengeConfig;
use crate::geometry::{angle_degrees, centroid, eye_aspect_ratio, midpoint};
use crate::landmarks::{LandmarkObservation, Point};

/// Classify a blink: both eyes' aspect ratios under the threshold.
pub fn detect_blink(obs: &LandmarkObservation, config: &ChallengeConfig) -> Option<ChallengeType> {
    let left_ear = eye_aspect_ratio(&obs.left_eye);
    let right_ear = eye_aspect_ratio(&obs.right_eye);

    if left_ear < config.blink_ear_threshold && right_ear < config.blink_ear_threshold {
        Some(ChallengeType::Blink)
    } else {
        None
    }
}

/// Classify a smile from the outer-lip contour: the middle point rises
/// above the lower of the two mouth corners by more than the threshold.
pub fn detect_smile(obs: &LandmarkObservation, config: &ChallengeConfig) -> Option<ChallengeType> {
    let lips = &obs.outer_lips;
    let (first, last) = match (lips.first(), lips.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return None,
    };
    let middle = lips[lips.len() / 2];

    let mouth_height = middle.y - first.y.min(last.y);
    if mouth_height > config.smile_height_threshold {
        Some(ChallengeType::Smile)
    } else {
        None
    }
}

/// Classify a left/right head turn from the angle of the nose relative
/// to the midpoint between the eyes.
///
/// Angle convention is `atan2(nose.y - mid.y, nose.x - mid.x)` in
/// degrees: beyond +threshold is a left turn, beyond -threshold a
/// right turn, anything in between no classification.
pub fn detect_yaw_turn(
    obs: &LandmarkObservation,
    config: &ChallengeConfig,
) -> Option<ChallengeType> {
    let (eye_mid, nose) = face_axis_points(obs)?;
    let angle = angle_degrees(eye_mid, nose);

    if angle < -config.turn_angle_threshold {
        Some(ChallengeType::RightTurn)
    } else if angle > config.turn_angle_threshold {
        Some(ChallengeType::LeftTurn)
    } else {
        None
    }
}

/// Classify an up/down head tilt from the vertical offset of the nose
/// relative to the midpoint between the eyes.
pub fn detect_pitch_turn(
    obs: &LandmarkObservation,
    config: &ChallengeConfig,
) -> Option<ChallengeType> {
    let (eye_mid, nose) = face_axis_points(obs)?;
    let vertical_diff = nose.y - eye_mid.y;

    if vertical_diff > config.vertical_tilt_threshold {
        Some(ChallengeType::DownTurn)
    } else if vertical_diff < -config.vertical_tilt_threshold {
        Some(ChallengeType::UpTurn)
    } else {
        None
    }
}

/// Eye-midpoint and nose centroid, or `None` when any region is empty.
fn face_axis_points(obs: &LandmarkObservation) -> Option<(Point, Point)> {
    if obs.left_eye.is_empty() || obs.right_eye.is_empty() || obs.nose.is_empty() {
        return None;
    }
    let eye_mid = midpoint(centroid(&obs.left_eye), centroid(&obs.right_eye));
    let nose = centroid(&obs.nose);
    Some((eye_mid, nose))
}
