//! Landmark geometry helpers.
//!
//! All functions operate on normalized (0..1) landmark coordinates as
//! delivered by the external detection pipeline. They are total over
//! their documented domains and carry no state.

use crate::landmarks::Point;

/// Eye aspect ratio reported when an eye region has too few points to
/// compute a real ratio. 1.0 reads as "wide open", so a degraded frame
/// can never register as a blink.
pub const OPEN_EYE_RATIO: f32 = 1.0;

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f32 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}

/// Eye aspect ratio from an ordered 6+ point eye contour:
/// `(|p1-p5| + |p2-p4|) / (2 * |p0-p3|)`.
///
/// Low values indicate a closed eye. Fewer than 6 points yields
/// [`OPEN_EYE_RATIO`] rather than an error — an under-resolved eye is
/// treated as open, never as a blink.
pub fn eye_aspect_ratio(eye: &[Point]) -> f32 {
    if eye.len() < 6 {
        return OPEN_EYE_RATIO;
    }

    let vertical1 = distance(eye[1], eye[5]);
    let vertical2 = distance(eye[2], eye[4]);
    let horizontal = distance(eye[0], eye[3]);

    (vertical1 + vertical2) / (2.0 * horizontal)
}

/// Mean point of a non-empty landmark region.
///
/// Callers screen out empty regions before calling; an empty slice has
/// no meaningful centroid.
pub fn centroid(points: &[Point]) -> Point {
    debug_assert!(!points.is_empty(), "centroid of empty point set");

    let n = points.len() as f32;
    let sum_x: f32 = points.iter().map(|p| p.x).sum();
    let sum_y: f32 = points.iter().map(|p| p.y).sum();

    Point {
        x: sum_x / n,
        y: sum_y / n,
    }
}

/// Midpoint of two points.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

/// Angle of the vector `from -> to`, in degrees, via `atan2(dy, dx)`.
/// Range is (-180, 180].
pub fn angle_degrees(from: Point, to: Point) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dy.atan2(dx).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    #[test]
    fn distance_is_euclidean() {
        // 3-4-5 triangle
        assert!((distance(p(0.0, 0.0), p(0.3, 0.4)) - 0.5).abs() < 1e-6);
        assert_eq!(distance(p(0.2, 0.7), p(0.2, 0.7)), 0.0);
    }

    #[test]
    fn ear_closed_eye_is_low() {
        // Nearly flat eye: vertical gaps 0.01, horizontal span 0.2
        let eye = [
            p(0.0, 0.5),
            p(0.05, 0.51),
            p(0.1, 0.51),
            p(0.2, 0.5),
            p(0.1, 0.50),
            p(0.05, 0.50),
        ];
        let ear = eye_aspect_ratio(&eye);
        assert!(ear < 0.2, "expected closed-eye ratio, got {ear}");
    }

    #[test]
    fn ear_open_eye_is_high() {
        // Vertical gaps 0.1 against horizontal span 0.2 -> EAR 0.5
        let eye = [
            p(0.0, 0.5),
            p(0.05, 0.55),
            p(0.1, 0.55),
            p(0.2, 0.5),
            p(0.1, 0.45),
            p(0.05, 0.45),
        ];
        let ear = eye_aspect_ratio(&eye);
        assert!((ear - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ear_degrades_to_open_on_short_input() {
        let eye = [p(0.0, 0.0), p(0.1, 0.1)];
        assert_eq!(eye_aspect_ratio(&eye), OPEN_EYE_RATIO);
        assert_eq!(eye_aspect_ratio(&[]), OPEN_EYE_RATIO);
    }

    #[test]
    fn centroid_is_mean_of_coordinates() {
        let points = [p(0.0, 0.0), p(0.4, 0.2), p(0.2, 0.7)];
        let c = centroid(&points);
        assert!((c.x - 0.2).abs() < 1e-6);
        assert!((c.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn angle_sign_convention() {
        let origin = p(0.5, 0.5);
        // Straight right: 0 degrees
        assert!((angle_degrees(origin, p(0.7, 0.5))).abs() < 1e-4);
        // Below origin (larger y): positive
        assert!(angle_degrees(origin, p(0.7, 0.7)) > 0.0);
        // Above origin (smaller y): negative
        assert!(angle_degrees(origin, p(0.7, 0.3)) < 0.0);
        // Straight left: 180 degrees
        assert!((angle_degrees(origin, p(0.3, 0.5)) - 180.0).abs() < 1e-4);
    }
}
