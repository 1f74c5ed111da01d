//! `vigil replay` — feeds a captured landmark stream into a session.
//!
//! The input is JSON lines, one [`FrameBatch`] per line, as serialized
//! by whatever recorded the capture pipeline's output. Frames are
//! delivered on a fixed cadence while the session's own timers run, so
//! a recorded capture reproduces the live timing behavior.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tokio::sync::mpsc;

use vigil_core::{ChallengeConfig, ChallengeType, FrameBatch, FrameFeedback, Verdict};
use vigil_session::{spawn_session_with_challenge, SessionConfig, SessionObserver};

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON-lines file of frame batches.
    input: PathBuf,

    /// Challenge to run. Random when omitted.
    #[arg(long, value_enum)]
    challenge: Option<ChallengeArg>,

    /// Optional TOML file of challenge thresholds; falls back to
    /// VIGIL_* environment variables, then defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Timer tick length in milliseconds.
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,

    /// Delay between delivered frames in milliseconds.
    #[arg(long, default_value_t = 100)]
    frame_ms: u64,
}

/// Prints presence transitions and forwards the verdict to the caller.
struct ConsoleObserver {
    last_face_detected: Option<bool>,
    verdict_tx: mpsc::UnboundedSender<Verdict>,
}

impl SessionObserver for ConsoleObserver {
    fn on_verdict(&mut self, verdict: Verdict) {
        let _ = self.verdict_tx.send(verdict);
    }

    fn on_frame_feedback(&mut self, feedback: FrameFeedback) {
        if self.last_face_detected != Some(feedback.face_detected) {
            println!("{}", feedback.prompt().replace('\n', " — "));
            self.last_face_detected = Some(feedback.face_detected);
        }
    }
}

/// `--challenge` values; clap derives the kebab-case names and help.
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum ChallengeArg {
    Smile,
    Blink,
    ZoomIn,
    ZoomOut,
    LeftTurn,
    RightTurn,
    UpTurn,
    DownTurn,
}

impl From<ChallengeArg> for ChallengeType {
    fn from(arg: ChallengeArg) -> Self {
        match arg {
            ChallengeArg::Smile => ChallengeType::Smile,
            ChallengeArg::Blink => ChallengeType::Blink,
            ChallengeArg::ZoomIn => ChallengeType::ZoomIn,
            ChallengeArg::ZoomOut => ChallengeType::ZoomOut,
            ChallengeArg::LeftTurn => ChallengeType::LeftTurn,
            ChallengeArg::RightTurn => ChallengeType::RightTurn,
            ChallengeArg::UpTurn => ChallengeType::UpTurn,
            ChallengeArg::DownTurn => ChallengeType::DownTurn,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ChallengeConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))
        }
        None => Ok(ChallengeConfig::from_env()),
    }
}

fn load_frames(path: &PathBuf) -> Result<Vec<FrameBatch>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{}: invalid frame batch on line {}", path.display(), i + 1))
        })
        .collect()
}

pub async fn run(args: ReplayArgs) -> Result<()> {
    let frames = load_frames(&args.input)?;
    let challenge_config = load_config(args.config.as_ref())?;
    tracing::debug!(frames = frames.len(), ?challenge_config, "capture loaded");

    let challenge = match args.challenge {
        Some(arg) => arg.into(),
        None => ChallengeType::random(&mut rand::thread_rng()),
    };

    println!("challenge: {challenge:?}");
    println!("{}", challenge.prompt().replace('\n', " — "));
    println!("replaying {} frame(s) from {}", frames.len(), args.input.display());

    let (verdict_tx, mut verdict_rx) = mpsc::unbounded_channel();
    let observer = ConsoleObserver {
        last_face_detected: None,
        verdict_tx,
    };

    let handle = spawn_session_with_challenge(
        SessionConfig {
            challenge: challenge_config,
            tick_interval: Duration::from_millis(args.tick_ms),
            ..SessionConfig::default()
        },
        challenge,
        observer,
    );

    let frame_interval = Duration::from_millis(args.frame_ms);
    let verdict = 'replay: {
        for batch in frames {
            if let Ok(verdict) = verdict_rx.try_recv() {
                break 'replay Some(verdict);
            }
            if handle.deliver_frame(batch).is_err() {
                // Session already ended; pick up the verdict below.
                break;
            }
            tokio::time::sleep(frame_interval).await;
        }
        // Out of frames: wait for the timers to finish the session.
        verdict_rx.recv().await
    };

    match verdict {
        Some(verdict) => {
            println!("verdict: {verdict:?}");
            if verdict != Verdict::Success {
                std::process::exit(1);
            }
            Ok(())
        }
        None => anyhow::bail!("session ended without a verdict"),
    }
}
