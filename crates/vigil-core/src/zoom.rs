//! Frame-to-frame face-area trend tracking for zoom challenges.

use crate::challenge::ChallengeType;

/// Tracks the face bounding-box area across evaluation ticks and
/// classifies the zoom direction of the most recent tick.
///
/// The trend is strictly tick-to-tick, not baseline-relative: the user
/// has to keep moving through every tick, a net displacement after a
/// pause does not count.
#[derive(Debug, Default)]
pub struct ZoomTracker {
    previous_area: f32,
}

impl ZoomTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `current_area` against the previous tick's area under
    /// the given zoom challenge.
    ///
    /// The first call with a non-zero area only establishes the
    /// baseline and classifies nothing. Calls with a zoom challenge
    /// that is not [`ChallengeType::ZoomIn`] or
    /// [`ChallengeType::ZoomOut`] classify nothing.
    pub fn observe_area(
        &mut self,
        current_area: f32,
        challenge: ChallengeType,
    ) -> Option<ChallengeType> {
        if self.previous_area == 0.0 {
            self.previous_area = current_area;
            return None;
        }

        let detection = match challenge {
            ChallengeType::ZoomIn if current_area > self.previous_area => {
                Some(ChallengeType::ZoomIn)
            }
            ChallengeType::ZoomOut if current_area < self.previous_area => {
                Some(ChallengeType::ZoomOut)
            }
            _ => None,
        };

        self.previous_area = current_area;
        detection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_establishes_baseline() {
        let mut tracker = ZoomTracker::new();
        assert_eq!(tracker.observe_area(0.10, ChallengeType::ZoomIn), None);
    }

    #[test]
    fn growing_area_classifies_zoom_in() {
        let mut tracker = ZoomTracker::new();
        tracker.observe_area(0.10, ChallengeType::ZoomIn);
        assert_eq!(
            tracker.observe_area(0.15, ChallengeType::ZoomIn),
            Some(ChallengeType::ZoomIn)
        );
    }

    #[test]
    fn shrinking_area_is_not_zoom_in() {
        let mut tracker = ZoomTracker::new();
        tracker.observe_area(0.10, ChallengeType::ZoomIn);
        assert_eq!(tracker.observe_area(0.08, ChallengeType::ZoomIn), None);
    }

    #[test]
    fn shrinking_area_classifies_zoom_out() {
        let mut tracker = ZoomTracker::new();
        tracker.observe_area(0.10, ChallengeType::ZoomOut);
        assert_eq!(
            tracker.observe_area(0.08, ChallengeType::ZoomOut),
            Some(ChallengeType::ZoomOut)
        );
        // Growth under a zoom-out challenge classifies nothing
        assert_eq!(tracker.observe_area(0.12, ChallengeType::ZoomOut), None);
    }

    #[test]
    fn trend_is_tick_to_tick_not_net() {
        let mut tracker = ZoomTracker::new();
        tracker.observe_area(0.10, ChallengeType::ZoomIn);
        assert_eq!(
            tracker.observe_area(0.15, ChallengeType::ZoomIn),
            Some(ChallengeType::ZoomIn)
        );
        // Holding still: still above the 0.10 baseline, but no
        // tick-to-tick growth, so no classification.
        assert_eq!(tracker.observe_area(0.15, ChallengeType::ZoomIn), None);
    }

    #[test]
    fn zero_area_keeps_waiting_for_baseline() {
        // No face seen yet: area stays 0 and never classifies.
        let mut tracker = ZoomTracker::new();
        assert_eq!(tracker.observe_area(0.0, ChallengeType::ZoomIn), None);
        assert_eq!(tracker.observe_area(0.0, ChallengeType::ZoomIn), None);
        // First real area is still just the baseline.
        assert_eq!(tracker.observe_area(0.10, ChallengeType::ZoomIn), None);
        assert_eq!(
            tracker.observe_area(0.12, ChallengeType::ZoomIn),
            Some(ChallengeType::ZoomIn)
        );
    }

    #[test]
    fn non_zoom_challenge_never_classifies() {
        let mut tracker = ZoomTracker::new();
        tracker.observe_area(0.10, ChallengeType::Smile);
        assert_eq!(tracker.observe_area(0.15, ChallengeType::Smile), None);
    }
}
