//! bikeshare - Explore US bikeshare trip data from the terminal

use anyhow::Context;
use bikeshare::{
    VERSION, cli::Cli, data_loader::DataLoader, prompt::Prompter, session::Session,
};
use bikeshare_core::catalog::CityCatalog;
use bikeshare_terminal::get_formatter;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose; logs stay on stderr so prompts are clean
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.default_log_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let stdout = std::io::stdout();
    let interactive = stdout.is_terminal();

    let catalog = CityCatalog::new(&cli.data_dir);
    info!(
        "bikeshare {VERSION} reading city files from {} ({})",
        cli.data_dir.display(),
        catalog.display_list()
    );

    let loader = DataLoader::new().with_progress(interactive);
    let formatter = get_formatter(cli.use_color(interactive));
    let prompter = Prompter::new(std::io::stdin().lock(), stdout);

    let mut session = Session::new(catalog, loader, formatter, prompter);
    let iterations = session
        .run()
        .context("Interactive session failed while writing to the terminal")?;

    info!("Goodbye after {iterations} exploration(s)");
    Ok(())
}
