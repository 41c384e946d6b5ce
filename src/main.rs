use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = taskdeck::cli::Cli::parse();
    let config = taskdeck::AppConfig::discover(cli.data_dir.clone())?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    taskdeck::commands::execute(&config, cli.command, &mut handle)?;

    Ok(())
}
