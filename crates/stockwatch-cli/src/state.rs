//! `stockwatch state`: inspect or reset the last known state.

use stockwatch_core::AppConfig;
use stockwatch_scraper::StateFile;

pub(crate) async fn run_state_show(config: &AppConfig) -> anyhow::Result<()> {
    let state = StateFile::new(&config.state_path);
    let last = state.read().await?;
    if last.is_empty() {
        println!("(empty) {}", state.path().display());
    } else {
        println!("{last}");
    }
    Ok(())
}

pub(crate) async fn run_state_clear(config: &AppConfig) -> anyhow::Result<()> {
    let state = StateFile::new(&config.state_path);
    state.clear().await?;
    tracing::info!(path = %state.path().display(), "state cleared");
    Ok(())
}
