use agro_api::AgroAPI;
use agro_infra::AgroEnvironment;
use agro_main::{Cli, UI};
use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let environment = AgroEnvironment::new(cwd).resolve();
    tracing::debug!(store_dir = %environment.store_dir.display(), ephemeral = cli.ephemeral, "Resolved environment");

    let stdout = std::io::stdout().lock();
    if cli.ephemeral {
        UI::new(AgroAPI::init_ephemeral(&environment)?, stdout).run(cli.command).await
    } else {
        UI::new(AgroAPI::init(&environment)?, stdout).run(cli.command).await
    }
}
