mod cli;
mod commands;
mod config;
mod notify;
mod scheduler;
mod watcher;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use hostmonitor::{ConfigStore, TomlConfigStore};
use tracing::debug;

use crate::cli::{CommandLine, Commands};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    logger::init_with_verbosity(cli.verbose);

    let config = Config::from_config(cli.config.as_ref()).context("Failed to load service config")?;
    debug!("{}", config);

    let store: Arc<dyn ConfigStore> = match &config.monitor.state_path {
        Some(path) => Arc::new(TomlConfigStore::new(path)),
        None => Arc::new(TomlConfigStore::at_default_path()?),
    };

    match cli.command {
        Commands::Run => commands::run(&config, store).await?,
        Commands::Check { connection_type } => {
            let report = commands::check(&config, store, connection_type).await?;
            print!("{}", commands::render_report(&report));
        }
        Commands::Add { host, port } => {
            if commands::add(store.as_ref(), &host, port).await? {
                println!("Monitoring {host}:{port}");
            } else {
                println!("{host}:{port} is already monitored");
            }
        }
        Commands::Remove { host, port } => {
            if commands::remove(store.as_ref(), &host, port).await? {
                println!("Stopped monitoring {host}:{port}");
            } else {
                println!("{host}:{port} was not monitored");
            }
        }
        Commands::Clear => {
            let count = commands::clear(store.as_ref()).await?;
            println!("Stopped monitoring {count} host(s)");
        }
        Commands::List => print!("{}", commands::list(store.as_ref()).await?),
    }

    Ok(())
}
