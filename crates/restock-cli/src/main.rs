mod import;
mod probe;
mod warm_cache;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use restock_store::SupabaseStore;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "restock", version)]
#[command(about = "Bulk-load appliance inventory and photos into the storefront backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import items from a CSV and photos from `<PHOTOS_ROOT>/<sku>/`
    Import {
        csv: PathBuf,
        photos_root: PathBuf,
        /// Validate rows and list photos without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Request resized cover images for published items so the CDN caches them
    WarmCache {
        #[arg(default_value_t = 25)]
        limit: usize,
    },
    /// Upload one image to a throwaway path to check credentials and bucket access
    Probe { file: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Import {
            csv,
            photos_root,
            dry_run,
        } => {
            import::check_inputs(&csv, &photos_root)?;
            let (config, store) = connect()?;
            import::run_import(&store, &config, &csv, &photos_root, dry_run).await
        }
        Commands::WarmCache { limit } => {
            let (config, store) = connect()?;
            warm_cache::run_warm_cache(&store, &config, limit).await
        }
        Commands::Probe { file } => {
            let (config, store) = connect()?;
            probe::run_probe(&store, &config, &file).await
        }
    }
}

/// Loads configuration, installs the log subscriber, and builds the one
/// store client the command will use.
fn connect() -> anyhow::Result<(restock_core::AppConfig, SupabaseStore)> {
    let config = restock_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = SupabaseStore::new(
        &config.supabase_url,
        &config.service_role_key,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    tracing::debug!(?config, "configuration loaded");

    Ok((config, store))
}

#[cfg(test)]
mod tests;
