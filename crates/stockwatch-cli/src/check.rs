//! One check cycle: fetch → decode → normalize → compare → notify.
//!
//! Fetch, extraction, parse, and notification failures end the cycle with a
//! log line rather than an error so a scheduler can keep invoking `check`.
//! State file failures do propagate: without a readable state every cycle
//! would re-notify.

use std::path::Path;

use stockwatch_core::{AppConfig, ResponseFormat, WatchConfig};
use stockwatch_scraper::{
    decode_document, has_changed, normalize_report, FulfillmentClient, ScraperError, StateFile,
};
use stockwatch_telegram::TelegramClient;

/// Where a changed report goes.
pub(crate) enum Sink<'a> {
    /// Print to stdout; leave state untouched.
    DryRun,
    Telegram(&'a TelegramClient),
}

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// Fetch, extraction, or parse failed.
    NoData,
    /// Report equals the last known state.
    Unchanged,
    /// Changed report sent and persisted.
    Notified,
    /// Changed report could not be sent; state left as it was.
    NotificationFailed,
    /// Stock disappeared; state cleared.
    SoldOut { notified: bool },
    DryRun,
}

pub(crate) struct CheckCycle<'a> {
    pub fetcher: &'a FulfillmentClient,
    pub sink: Sink<'a>,
    pub state: &'a StateFile,
    pub watch: &'a WatchConfig,
}

/// Entry point for `stockwatch check`.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, a client cannot be
/// built, or the state file cannot be read or written.
pub(crate) async fn run_check(
    config: &AppConfig,
    watch_path: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let watch = stockwatch_core::load_watch_config(watch_path)?;
    let fetcher = FulfillmentClient::new(config.request_timeout_secs, &config.user_agent)?;
    let state = StateFile::new(&config.state_path);

    let telegram;
    let sink = if dry_run {
        Sink::DryRun
    } else {
        let (Some(token), Some(chat_id)) = (
            config.telegram_bot_token.as_deref(),
            config.telegram_chat_id.as_deref(),
        ) else {
            anyhow::bail!(
                "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set unless --dry-run is given"
            );
        };
        telegram = TelegramClient::with_base_url(
            token,
            chat_id,
            config.notify_timeout_secs,
            &config.telegram_api_url,
        )?;
        Sink::Telegram(&telegram)
    };

    let cycle = CheckCycle {
        fetcher: &fetcher,
        sink,
        state: &state,
        watch: &watch,
    };
    let outcome = cycle.run().await?;
    tracing::info!(?outcome, "check cycle finished");
    Ok(())
}

impl CheckCycle<'_> {
    pub(crate) async fn run(&self) -> anyhow::Result<CycleOutcome> {
        let document = match self.fetch_document().await {
            Ok(document) => document,
            Err(e) => {
                log_skipped_cycle(&e, self.watch.response_format);
                return Ok(CycleOutcome::NoData);
            }
        };

        let report = normalize_report(&document, self.watch).render();
        let last = self.state.read().await?;

        if !has_changed(&report, &last) {
            tracing::info!("stock unchanged since last check; not notifying");
            return Ok(CycleOutcome::Unchanged);
        }

        if report.is_empty() {
            return self.sold_out().await;
        }

        let message = compose_message(&report, self.watch);
        match &self.sink {
            Sink::DryRun => {
                println!("{message}");
                Ok(CycleOutcome::DryRun)
            }
            Sink::Telegram(client) => match client.send_message(&message).await {
                Ok(_) => {
                    self.state.write(&report).await?;
                    Ok(CycleOutcome::Notified)
                }
                Err(e) => {
                    tracing::error!(error = %e, "notification failed; keeping previous state");
                    Ok(CycleOutcome::NotificationFailed)
                }
            },
        }
    }

    async fn fetch_document(&self) -> Result<serde_json::Value, ScraperError> {
        let body = self.fetcher.fetch(self.watch).await?;
        decode_document(&body, self.watch.response_format, &self.watch.markers)
    }

    async fn sold_out(&self) -> anyhow::Result<CycleOutcome> {
        let client = match &self.sink {
            Sink::DryRun => {
                println!("stock no longer available (state would be cleared)");
                return Ok(CycleOutcome::DryRun);
            }
            Sink::Telegram(client) => client,
        };

        let mut notified = false;
        if self.watch.notify_on_sellout {
            match client.send_message(&sellout_message(self.watch)).await {
                Ok(_) => notified = true,
                Err(e) => tracing::error!(error = %e, "sell-out notification failed"),
            }
        }

        self.state.write("").await?;
        tracing::info!(notified, "stock no longer available; state cleared");
        Ok(CycleOutcome::SoldOut { notified })
    }
}

/// Why a cycle produced no data: the fetch itself failed, or the response
/// carried no stock document.
pub(crate) fn skip_reason(e: &ScraperError) -> &'static str {
    if e.is_transport() {
        "fulfillment fetch failed; skipping cycle"
    } else if e.is_no_data() {
        "no stock data in response; skipping notification"
    } else {
        "fulfillment request could not be built; skipping cycle"
    }
}

fn log_skipped_cycle(e: &ScraperError, format: ResponseFormat) {
    tracing::warn!(error = %e, %format, "{}", skip_reason(e));
}

/// The report, followed by the product page link when one is configured.
pub(crate) fn compose_message(report: &str, watch: &WatchConfig) -> String {
    match &watch.product_url {
        Some(url) => format!("{report}\n\n{url}"),
        None => report.to_string(),
    }
}

fn sellout_message(watch: &WatchConfig) -> String {
    let names: Vec<String> = watch.model_specs().into_iter().map(|m| m.name).collect();
    format!("❌ No longer available: {}", names.join(", "))
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
