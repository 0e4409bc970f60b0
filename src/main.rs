#![deny(clippy::all)]
use brp_cli::cli::Cli;
use brp_cli::clap::Parser;
use brp_cli::config::ConfigStore;
use brp_cli::logging::init_logger;
use brp_cli::summary::{print_new_bot, print_summary};
use brp_common::log::{info, warn};
use brp_core::runner::Runner;
use color_eyre::eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    init_logger(args.log_file.as_deref())?;
    color_eyre::install()?;

    let store = ConfigStore::new(args.config_dir()?);

    if let Some(name) = &args.gen_config {
        let name = store.add_bot(name.as_deref()).await?;
        print_new_bot(&name, &store.config_path());
        return Ok(());
    }

    let defaults = store.load_defaults().await?;
    let mut entries = store.load_bots().await?;

    for name in &args.bots {
        if !entries.contains(name) {
            warn!("Bot {name} is not in {}", store.config_path().display());
        }
    }

    let selected = entries.iter().filter(|(name, _)| args.is_selected(name));
    let reports = Runner::http().run_all(selected, &defaults).await;

    if store.save_run(&mut entries, &reports).await? {
        info!("Saved bot state to {}", store.config_path().display());
    }

    print_summary(&reports);

    Ok(())
}
