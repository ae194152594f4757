//! Logging setup and the stdio message loop.

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use pagescript_config::{ConfigLoader, LoggingConfig};
use pagescript_core::Service;

/// Initialize tracing with a stderr layer and an optional daily log file.
///
/// stdout carries the message protocol, so nothing else may write to it.
pub(crate) fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = if config.file {
        let dir = ConfigLoader::expand_path(&config.dir.to_string_lossy());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("pagescript")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keeps the writer thread flushing until exit.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Answer one JSON line per message line until stdin closes.
pub(crate) async fn serve_stdio(service: &Service) -> anyhow::Result<()> {
    info!("Serving messages on stdio");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_lines(service, stdin, stdout).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Message loop over any line reader and writer. Messages are handled one
/// at a time in arrival order; blank lines are skipped.
pub(crate) async fn serve_lines<R, W>(service: &Service, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("Received message ({} bytes)", line.len());

        let response = service.handle_json(line).await;
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
