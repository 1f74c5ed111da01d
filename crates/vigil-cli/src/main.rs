use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vigil_core::ChallengeType;

mod replay;

#[derive(Parser)]
#[command(name = "vigil", about = "Liveness challenge session tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON-lines capture of landmark frame batches through a
    /// live session and report the verdict.
    Replay(replay::ReplayArgs),
    /// Draw a random challenge and print its user-facing prompt.
    Challenge,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => replay::run(args).await,
        Command::Challenge => {
            let challenge = ChallengeType::random(&mut rand::thread_rng());
            println!("{challenge:?}");
            println!("{}", challenge.prompt());
            Ok(())
        }
    }
}
