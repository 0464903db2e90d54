use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodmatch_server::catalog::load_catalog;
use moodmatch_server::server::{run_server, RequestsLoggingLevel};
use moodmatch_server::session::VisitStore;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a catalog JSON file. The built-in catalog is used when omitted.
    #[clap(long, value_parser = parse_path)]
    pub catalog_file: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Minutes an idle visit is kept in memory. Set to 0 to disable pruning.
    #[clap(long, default_value_t = 60)]
    pub visit_retention_minutes: u64,

    /// Interval in minutes between pruning runs. Only used if visit_retention_minutes > 0.
    #[clap(long, default_value_t = 10)]
    pub prune_interval_minutes: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    #[cfg(feature = "no_checks")]
    let check = false;
    #[cfg(not(feature = "no_checks"))]
    let check = true;

    let catalog = load_catalog(cli_args.catalog_file.as_ref(), check)?;
    info!("Catalog ready with {} mood entries.", catalog.entry_count());

    let visit_store = Arc::new(Mutex::new(VisitStore::new()));

    // Spawn background task for visit pruning if enabled
    if cli_args.visit_retention_minutes > 0 {
        let retention = Duration::from_secs(cli_args.visit_retention_minutes * 60);
        let interval = Duration::from_secs(cli_args.prune_interval_minutes * 60);
        let pruning_store = visit_store.clone();

        info!(
            "Visit pruning enabled: retaining {} minutes, pruning every {} minutes",
            cli_args.visit_retention_minutes, cli_args.prune_interval_minutes
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick, wait for the first interval
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let removed = pruning_store.lock().unwrap().prune_idle(retention);
                if removed > 0 {
                    info!("Pruned {} idle visits", removed);
                }
            }
        });
    }

    info!("Ready to serve at port {}!", cli_args.port);
    run_server(
        catalog,
        visit_store,
        cli_args.logging_level,
        cli_args.port,
        cli_args.frontend_dir_path,
    )
    .await
}
