use anyhow::Context;
use invsys_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load InvSys settings")?;
    invsys_telemetry::init(&settings.telemetry).context("failed to initialize telemetry")?;

    invsys_app::serve(&settings).await
}
