//! Clipper - cut a re-encoded clip out of an online video
//!
//! Asks for a URL, a quality and a time range, then lets yt-dlp fetch just
//! that section and ffmpeg re-encode it.

use anyhow::Result;
use clap::Parser;
use clipper::session::{Session, SessionOutcome, TerminalPrompter};
use clipper::utils::AppSettings;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clipper", version, about = "Cut a re-encoded clip out of an online video")]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    // Logs go to stderr and stay quiet unless RUST_LOG asks otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let settings = AppSettings::from_env();

    let rt = tokio::runtime::Runtime::new()?;
    let code = rt.block_on(run(settings));
    // a pending stdin read would hold up a normal shutdown
    rt.shutdown_background();

    std::process::exit(code);
}

async fn run(settings: AppSettings) -> i32 {
    let session = match Session::from_settings(settings) {
        Ok(session) => session,
        Err(e) => {
            println!("❌ {:#}", e);
            return 1;
        }
    };

    let mut prompter = TerminalPrompter::new();
    let outcome = tokio::select! {
        result = session.run(&mut prompter) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(SessionOutcome::Completed(_))) => {
            println!("\n🎉 All done! Enjoy your clip!");
            0
        }
        Some(Ok(SessionOutcome::Cancelled)) | None => {
            println!("\n\n👋 Interrupted by user");
            0
        }
        Some(Err(e)) => {
            error!("Session failed: {:#}", e);
            println!("\n❌ {:#}", e);
            1
        }
    }
}
