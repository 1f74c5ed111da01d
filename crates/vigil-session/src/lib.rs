//! Async runtime for liveness challenge sessions.
//!
//! Each session runs as one tokio task owning a [`ChallengeSession`]
//! from `vigil-core`. Frame deliveries arrive over an mpsc channel and
//! the two session timers are interval timers on the same task, so
//! every state mutation happens on a single execution context — frames
//! and ticks interleave but can never race.
//!
//! Producers hold a clone-safe [`SessionHandle`]: `deliver_frame` is
//! fire-and-forget (a full queue drops the frame, never blocks the
//! capture pipeline), `cancel` tears the session down without a
//! verdict. Outcomes flow back through a caller-supplied
//! [`SessionObserver`].

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant};
use tracing::Instrument;
use uuid::Uuid;

use vigil_core::session::FrameOutcome;
use vigil_core::{ChallengeConfig, ChallengeSession, ChallengeType, FrameBatch, FrameFeedback, Verdict};

/// Runtime configuration for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Gesture thresholds and tick budgets.
    pub challenge: ChallengeConfig,
    /// Wall-clock length of one timer tick (both timers share it).
    pub tick_interval: Duration,
    /// Frame queue depth; frames beyond it are dropped, not queued up.
    pub frame_queue_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            challenge: ChallengeConfig::default(),
            tick_interval: Duration::from_secs(1),
            frame_queue_depth: 8,
        }
    }
}

/// Receives session outcomes on the session task.
///
/// `on_verdict` fires at most once per session and never after
/// cancellation. `on_frame_feedback` fires after every processed frame
/// until the session is terminal; it is a best-effort UI hint.
pub trait SessionObserver: Send + 'static {
    fn on_verdict(&mut self, verdict: Verdict);
    fn on_frame_feedback(&mut self, feedback: FrameFeedback);
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session task has ended")]
    Ended,
}

/// Clone-safe handle to a running session task.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<FrameBatch>,
    cancel_tx: watch::Sender<bool>,
    challenge: ChallengeType,
}

impl SessionHandle {
    /// Push one captured frame's observations to the session.
    ///
    /// Never blocks. A full queue drops the frame (the next frame
    /// carries fresher evidence anyway); a session that already ended
    /// returns [`SessionError::Ended`].
    pub fn deliver_frame(&self, batch: FrameBatch) -> Result<(), SessionError> {
        match self.tx.try_send(batch) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::trace!("frame queue full — dropping frame");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SessionError::Ended),
        }
    }

    /// Tear the session down. No verdict fires after this.
    ///
    /// Cancellation travels on its own watch channel, not the frame
    /// queue, so it cannot be lost to backpressure and it takes effect
    /// before any still-queued frames are evaluated.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    /// The challenge assigned to this session.
    pub fn challenge(&self) -> ChallengeType {
        self.challenge
    }
}

/// Spawn a session with a randomly drawn challenge.
pub fn spawn_session<O: SessionObserver>(config: SessionConfig, observer: O) -> SessionHandle {
    let challenge = ChallengeType::random(&mut rand::thread_rng());
    spawn_session_with_challenge(config, challenge, observer)
}

/// Spawn a session with an explicitly chosen challenge.
pub fn spawn_session_with_challenge<O: SessionObserver>(
    config: SessionConfig,
    challenge: ChallengeType,
    mut observer: O,
) -> SessionHandle {
    let (tx, mut rx) = mpsc::channel::<FrameBatch>(config.frame_queue_depth.max(1));
    let (cancel_tx, mut cancel_rx) = watch::channel(false);
    let session_id = Uuid::new_v4();
    let span = tracing::info_span!("liveness_session", id = %session_id, challenge = ?challenge);

    let mut session = ChallengeSession::with_challenge(config.challenge, challenge);
    let tick = config.tick_interval;

    tokio::spawn(
        async move {
            tracing::info!("session started");

            // Both timers start together, first fire one interval from
            // now (interval()'s immediate first tick would count an
            // elapsed second that never passed).
            let start = Instant::now() + tick;
            let mut evaluation = time::interval_at(start, tick);
            let mut timeout = time::interval_at(start, tick);
            evaluation.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            timeout.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    // Cancellation wins over any backlog of frames or
                    // due ticks; a verdict must never fire after it.
                    biased;

                    _ = cancel_rx.changed() => {
                        session.cancel();
                        tracing::info!("session cancelled");
                        break;
                    }
                    msg = rx.recv() => match msg {
                        Some(batch) => {
                            match session.deliver_frame(&batch) {
                                FrameOutcome::Feedback(feedback) => {
                                    observer.on_frame_feedback(feedback);
                                }
                                FrameOutcome::Verdict(verdict) => {
                                    tracing::warn!(?verdict, faces = batch.face_count(), "spoofing detected");
                                    observer.on_verdict(verdict);
                                    break;
                                }
                                FrameOutcome::Ignored => {}
                            }
                        }
                        None => {
                            session.cancel();
                            tracing::info!("session cancelled");
                            break;
                        }
                    },
                    _ = evaluation.tick() => {
                        if let Some(verdict) = session.evaluation_tick() {
                            tracing::info!(?verdict, stability = session.stability_count(), "session terminal");
                            observer.on_verdict(verdict);
                            break;
                        }
                    }
                    _ = timeout.tick() => {
                        if let Some(verdict) = session.timeout_tick() {
                            tracing::info!(?verdict, elapsed = session.elapsed_ticks(), "session terminal");
                            observer.on_verdict(verdict);
                            break;
                        }
                    }
                }
            }
        }
        .instrument(span),
    );

    SessionHandle {
        tx,
        cancel_tx,
        challenge,
    }
}
