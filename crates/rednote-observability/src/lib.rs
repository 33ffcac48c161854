use eyre::Context;
use std::env;
use tracing_error::ErrorLayer;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, Layer, Registry};

pub use tracing_subscriber::filter::LevelFilter;

fn targets(rust_log: Option<&str>, default_level: LevelFilter) -> Targets {
    rust_log
        .and_then(|targets| targets.parse().ok())
        .unwrap_or_else(|| Targets::default().with_default(default_level))
}

/// Install the global tracing subscriber
///
/// Logs are written to stderr and filtered through `RUST_LOG`, falling back to `default_level` for everything
pub fn initialise_logging(default_level: LevelFilter) -> eyre::Result<()> {
    let rust_log = env::var("RUST_LOG").ok();
    let env_filter = targets(rust_log.as_deref(), default_level);

    let subscriber = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .context("Couldn't install the global tracing subscriber")?;

    Ok(())
}
