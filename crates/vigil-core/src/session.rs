//! The liveness challenge session state machine.
//!
//! A session owns all mutable challenge state and is driven by three
//! inputs: frame batches from the capture pipeline, evaluation ticks,
//! and timeout ticks. The caller is responsible for serializing those
//! inputs; the state machine itself is synchronous and allocation-free
//! on the hot path. Once a terminal verdict is set (or the session is
//! cancelled) every further input is an idempotent no-op.

use rand::Rng;

use crate::challenge::{ChallengeType, FrameFeedback, Verdict};
use crate::config::ChallengeConfig;
use crate::detectors;
use crate::landmarks::FrameBatch;
use crate::spoof::{self, FacePresence};
use crate::zoom::ZoomTracker;

/// Result of delivering one frame to a session.
#[derive(Debug, PartialEq)]
pub enum FrameOutcome {
    /// Frame processed; refresh the presentation layer.
    Feedback(FrameFeedback),
    /// Frame forced a terminal verdict (multi-face spoofing).
    Verdict(Verdict),
    /// Session already terminal; frame discarded.
    Ignored,
}

/// One liveness check: a randomly assigned gesture, evidence
/// accumulation, and a write-once terminal verdict.
#[derive(Debug)]
pub struct ChallengeSession {
    config: ChallengeConfig,
    challenge: ChallengeType,
    zoom: ZoomTracker,
    current_detection: Option<ChallengeType>,
    face_detected: bool,
    current_face_area: f32,
    stability_count: u32,
    elapsed_ticks: u32,
    verdict: Option<Verdict>,
    cancelled: bool,
}

impl ChallengeSession {
    /// Start a session with a challenge drawn uniformly from the
    /// standard pool.
    pub fn new<R: Rng + ?Sized>(config: ChallengeConfig, rng: &mut R) -> Self {
        let challenge = ChallengeType::random(rng);
        Self::with_challenge(config, challenge)
    }

    /// Start a session with an explicitly chosen challenge. This is the
    /// only way to run the up/down tilt gestures, which are outside the
    /// random pool.
    pub fn with_challenge(config: ChallengeConfig, challenge: ChallengeType) -> Self {
        Self {
            config,
            challenge,
            zoom: ZoomTracker::new(),
            current_detection: None,
            face_detected: false,
            current_face_area: 0.0,
            stability_count: 0,
            elapsed_ticks: 0,
            verdict: None,
            cancelled: false,
        }
    }

    /// The challenge assigned at construction. Never changes.
    pub fn challenge(&self) -> ChallengeType {
        self.challenge
    }

    /// The terminal verdict, once one has fired.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// True once a verdict has fired or the session was cancelled.
    pub fn is_terminal(&self) -> bool {
        self.verdict.is_some() || self.cancelled
    }

    /// Timeout ticks observed so far.
    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Consecutive matching evaluation ticks for the current gesture.
    pub fn stability_count(&self) -> u32 {
        self.stability_count
    }

    /// Process one captured frame's observations.
    ///
    /// Screens for spoofing first, then dispatches to the detector for
    /// the selected challenge family. The returned feedback is a
    /// best-effort UI hint; verdicts are the contract.
    pub fn deliver_frame(&mut self, batch: &FrameBatch) -> FrameOutcome {
        if self.is_terminal() {
            return FrameOutcome::Ignored;
        }

        match spoof::screen(batch) {
            FacePresence::Spoofed => {
                self.set_verdict(Verdict::SpoofingDetected);
                FrameOutcome::Verdict(Verdict::SpoofingDetected)
            }
            FacePresence::Absent => {
                self.face_detected = false;
                self.current_detection = None;
                FrameOutcome::Feedback(self.feedback())
            }
            FacePresence::Single(obs) => {
                self.face_detected = true;
                match self.challenge {
                    ChallengeType::Smile => {
                        self.current_detection = detectors::detect_smile(obs, &self.config);
                    }
                    ChallengeType::Blink => {
                        self.current_detection = detectors::detect_blink(obs, &self.config);
                    }
                    ChallengeType::LeftTurn | ChallengeType::RightTurn => {
                        self.current_detection = detectors::detect_yaw_turn(obs, &self.config);
                    }
                    ChallengeType::UpTurn | ChallengeType::DownTurn => {
                        self.current_detection = detectors::detect_pitch_turn(obs, &self.config);
                    }
                    ChallengeType::ZoomIn | ChallengeType::ZoomOut => {
                        // Zoom is a trend over ticks, not a per-frame
                        // classification: frames only sample the area.
                        self.current_face_area = obs.bounding_box.area();
                    }
                }
                FrameOutcome::Feedback(self.feedback())
            }
        }
    }

    /// One evaluation tick: run the zoom trend when relevant, then
    /// compare the current classification against the challenge and
    /// update the debounce counter. Returns the verdict if this tick
    /// made the session terminal.
    pub fn evaluation_tick(&mut self) -> Option<Verdict> {
        if self.is_terminal() {
            return None;
        }

        if self.challenge.is_zoom() {
            self.current_detection = self
                .zoom
                .observe_area(self.current_face_area, self.challenge);
        }

        if self.current_detection == Some(self.challenge) {
            if self.challenge == ChallengeType::Blink {
                // A blink is over before a debounce window could see
                // it twice: first matching tick wins.
                self.set_verdict(Verdict::Success);
            } else {
                self.stability_count += 1;
                if self.stability_count >= self.config.stability_threshold {
                    self.set_verdict(Verdict::Success);
                }
            }
        } else {
            self.stability_count = 0;
        }

        self.verdict
    }

    /// One overall-timeout tick. Returns the verdict if the session
    /// budget is exhausted on this tick.
    pub fn timeout_tick(&mut self) -> Option<Verdict> {
        if self.is_terminal() {
            return None;
        }

        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.config.timeout_ticks {
            self.set_verdict(Verdict::TimedOut);
        }

        self.verdict
    }

    /// External cancellation: the session becomes terminal without a
    /// verdict. All further inputs are no-ops and no verdict can fire.
    pub fn cancel(&mut self) {
        if self.verdict.is_none() {
            self.cancelled = true;
        }
    }

    fn feedback(&self) -> FrameFeedback {
        FrameFeedback {
            face_detected: self.face_detected,
            challenge: self.challenge,
        }
    }

    fn set_verdict(&mut self, verdict: Verdict) {
        debug_assert!(self.verdict.is_none(), "verdict is write-once");
        self.verdict = Some(verdict);
    }
}
