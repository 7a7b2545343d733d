use anyhow::Context;
use clap::{Parser, Subcommand};
use gamedex_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "gamedex", version, about = "Game catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API until interrupted
    Serve,
    /// Load settings and verify the game store is reachable
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load gamedex settings")?;
    gamedex_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => gamedex_app::run(settings).await,
        Command::Check => {
            gamedex_app::check(&settings).await?;
            tracing::info!(env = ?settings.environment, "configuration ok");
            Ok(())
        }
    }
}
