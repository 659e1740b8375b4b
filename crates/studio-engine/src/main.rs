//! CodeCraft Studio generation CLI.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use studio_engine::{EngineConfig, GenerationPipeline, StudioContext};
use studio_models::GenerationRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("studio=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let mut args = std::env::args().skip(1);
    let theme = args.next().context("usage: studio-engine <theme> [title]")?;
    let title = args.next();

    let config = EngineConfig::from_env();
    info!("Starting studio-engine (db: {})", config.database_path.display());

    let ctx = StudioContext::new(config)
        .await
        .context("failed to build studio context")?;

    let mut request = GenerationRequest::new(theme);
    if let Some(title) = title {
        request = request.with_title(title);
    }

    let outcome = GenerationPipeline::generate(&ctx, &request)
        .await
        .context("generation failed")?;

    println!("Generation {} completed", outcome.id);
    println!("  title:  {}", outcome.title);
    println!("  voice:  {}", outcome.voice_style);
    println!("  music:  {}", outcome.music_style);
    println!("  audio:  {}", outcome.audio_file.display());
    println!("  video:  {}", outcome.video_file.display());

    Ok(())
}
