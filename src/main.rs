use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
mod services;
mod settings;
mod utils;

use config::Config;
use services::{
    create_focus_tracker, create_input_observer, create_platform_probe, create_tablet_watcher,
    FocusContext, SharedFocusContext,
};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "shell-settings")]
#[command(about = "Observable UI settings service with platform capability probes")]
struct Args {
    /// Path to the configuration file (defaults to the per-user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dry-run mode (emulated probes and input, no real devices)
    #[arg(long)]
    dry_run: bool,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration first: it carries the default log level and format.
    let config = Arc::new(Config::load(args.config.as_deref())?);

    init_tracing(
        args.log_level.as_deref().unwrap_or(&config.logging.level),
        &config.logging.format,
    )?;

    info!("Starting shell-settings v{}", env!("CARGO_PKG_VERSION"));

    if args.dry_run {
        warn!("Dry-run mode - probes and input are emulated");
    }

    let input_access = args.dry_run || utils::permissions::check_input_access();

    let platform = create_platform_probe(config.clone(), args.dry_run).await;
    let settings = Settings::initialize(&config, platform.as_ref()).await;

    for line in settings.information() {
        info!("{}", line);
    }
    if let Some(icon) = settings.window_icon() {
        info!("Window icon: {:?}", icon);
    }

    // The service's own diagnostic subscriber; consumers register theirs
    // the same way.
    let _subscription = settings.subscribe(|event| {
        info!("Setting changed: {}", event);
    });

    let tablet_watcher = create_tablet_watcher(
        config.clone(),
        settings.clone(),
        platform.clone(),
        args.dry_run,
    )?;
    let tablet_handle = tokio::spawn(async move {
        if let Err(e) = tablet_watcher.run().await {
            error!("TabletWatcher error: {}", e);
        }
    });

    let mut observation_handles = Vec::new();
    if settings.has_touch_screen() && input_access {
        let focus: Arc<dyn FocusContext> = Arc::new(SharedFocusContext::new());

        let input_observer =
            create_input_observer(config.clone(), settings.clone(), focus.clone(), args.dry_run)?;
        let focus_tracker = create_focus_tracker(config.clone(), focus, args.dry_run)?;

        observation_handles.push(tokio::spawn(async move {
            if let Err(e) = input_observer.run().await {
                error!("InputObserver error: {}", e);
            }
        }));
        observation_handles.push(tokio::spawn(async move {
            if let Err(e) = focus_tracker.run().await {
                error!("FocusTracker error: {}", e);
            }
        }));
    } else if !settings.has_touch_screen() {
        info!("No touch screen, input observation not started");
    } else {
        warn!("No access to input devices, input observation not started");
    }

    info!("All services started");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Received shutdown signal (Ctrl+C)");
        }
        Err(err) => {
            error!("Failed to wait for shutdown signal: {}", err);
        }
    }

    info!("Shutting down...");

    tablet_handle.abort();
    for handle in &observation_handles {
        handle.abort();
    }

    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = tablet_handle.await;
        for handle in observation_handles {
            let _ = handle.await;
        }
    })
    .await;

    match shutdown_result {
        Ok(_) => info!("All services stopped cleanly"),
        Err(_) => warn!("Timed out waiting for services to stop"),
    }

    info!("shell-settings stopped");
    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init(),
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    Ok(())
}
