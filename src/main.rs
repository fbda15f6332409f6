// studyforge - Explanation cache and content segmentation service
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use studyforge::cli::{Args, Command};
use studyforge::config::AppConfig;
use studyforge::content::ContentSegmenter;
use studyforge::generation::HttpGenerator;
use studyforge::server::{create_router, AppState};
use studyforge::utils::logging;
use tokio::signal;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting studyforge v{}", env!("CARGO_PKG_VERSION"));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(config.server.workers)
                .enable_all()
                .build()
                .context("failed to build Tokio runtime")?;
            runtime.block_on(serve(config))
        }
        Command::Segment {
            path,
            max_tokens,
            json,
        } => segment_file(config, &path, max_tokens, json),
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    // Phase 3: Build the generation client
    if config.generation.api_key.is_none() {
        warn!("No generation API key configured; upstream calls will be unauthenticated");
    }
    let generator = HttpGenerator::new(&config.generation, config.logging.sanitize_secrets)?;
    info!("Generation model: {}", generator.model());

    // Phase 4: Wire cache and services
    let state = AppState::new(config.clone(), Arc::new(generator))?;
    if config.cache.sweep_interval_seconds > 0 {
        spawn_cache_sweep(&state, Duration::from_secs(config.cache.sweep_interval_seconds));
    }

    // Phase 5: Build and start HTTP server
    let app = create_router(state);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Periodically drop expired explanations instead of waiting for reads
fn spawn_cache_sweep(state: &AppState, every: Duration) {
    let cache = state.cache.clone();
    info!("Explanation cache sweep every {}s", every.as_secs());
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = cache.purge_expired();
            if removed > 0 {
                info!("Cache sweep removed {} expired explanations", removed);
            }
        }
    });
}

fn segment_file(
    mut config: AppConfig,
    path: &Path,
    max_tokens: Option<usize>,
    json: bool,
) -> Result<()> {
    if let Some(max_tokens) = max_tokens {
        anyhow::ensure!(max_tokens > 0, "--max-tokens must be at least 1");
        config.segmenter.max_chunk_tokens = max_tokens;
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let segmenter = ContentSegmenter::new(config.segmenter);
    let (content, chunks) = segmenter.segment(&text);

    if json {
        let output = serde_json::json!({ "content": content, "chunks": chunks });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} sections, {} key terms, {} characters",
        content.sections.len(),
        content.key_terms.len(),
        content.total_length
    );
    for (index, chunk) in chunks.iter().enumerate() {
        println!(
            "chunk {:>3}  {:>5} tokens  {}",
            index + 1,
            chunk.token_count,
            chunk.topics.join(" | ")
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
