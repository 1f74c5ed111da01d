//! Vigil core — liveness challenge state machine.
//!
//! Verifies that a live person is in front of the camera by asking for
//! a randomly chosen head/face gesture and evaluating a stream of
//! per-frame facial landmark observations against geometric heuristics
//! for that gesture. Evidence accumulates over evaluation ticks; two
//! timers (overall timeout, per-gesture evaluation) bound the session;
//! a single terminal [`Verdict`] ends it.
//!
//! This crate is the pure, synchronous core: no camera, no landmark
//! extraction, no rendering, no async. Frame batches and timer ticks
//! arrive from the outside and must be serialized by the caller (the
//! `vigil-session` crate provides a tokio actor that does exactly
//! that).

pub mod challenge;
pub mod config;
pub mod detectors;
pub mod geometry;
pub mod landmarks;
pub mod session;
pub mod spoof;
pub mod zoom;

pub use challenge::{ChallengeType, FrameFeedback, Verdict, CHALLENGE_POOL};
pub use config::ChallengeConfig;
pub use landmarks::{BoundingBox, FrameBatch, LandmarkObservation, Point};
pub use session::{ChallengeSession, FrameOutcome};
pub use zoom::ZoomTracker;
