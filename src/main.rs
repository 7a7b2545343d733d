use anyhow::Context;
use gamedex_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load gamedex settings")?;
    gamedex_telemetry::init(&settings.telemetry)?;

    gamedex_app::run(settings).await
}
