//! `stockwatch parse`: run the decode and normalize steps over a saved response.

use std::path::Path;

use anyhow::Context;
use stockwatch_core::ResponseFormat;
use stockwatch_scraper::{decode_document, normalize_report, StockReport};

/// Prints the report for a saved response body.
///
/// # Errors
///
/// Returns an error if the watch file or response file cannot be read, or if
/// the response holds no decodable stock document.
pub(crate) async fn run_parse(
    watch_path: &Path,
    file: &Path,
    embedded: bool,
    json: bool,
) -> anyhow::Result<()> {
    let watch = stockwatch_core::load_watch_config(watch_path)?;
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let format = if embedded {
        ResponseFormat::Embedded
    } else {
        watch.response_format
    };
    let document = decode_document(&raw, format, &watch.markers)
        .with_context(|| format!("no stock document in {}", file.display()))?;
    let report = normalize_report(&document, &watch);

    if json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else if report.is_empty() {
        println!("no stock");
    } else {
        println!("{}", report.render());
    }

    Ok(())
}

fn report_json(report: &StockReport) -> serde_json::Value {
    let models: Vec<serde_json::Value> = report
        .sections()
        .iter()
        .map(|(model, summary)| {
            serde_json::json!({
                "name": model.name,
                "id": model.id,
                "hits": summary.lines().len(),
                "summary": summary.render(),
            })
        })
        .collect();
    serde_json::json!({ "models": models })
}

#[cfg(test)]
mod tests {
    use stockwatch_core::ModelSpec;
    use stockwatch_scraper::{DeliveryAvailability, StockLine, StockSummary};

    use super::*;

    #[test]
    fn report_json_lists_every_model() {
        let report = StockReport::new(vec![
            (
                ModelSpec {
                    name: "A".to_string(),
                    id: "M1".to_string(),
                },
                StockSummary::default(),
            ),
            (
                ModelSpec {
                    name: "B".to_string(),
                    id: "M2".to_string(),
                },
                StockSummary::new(vec![StockLine::Delivery(DeliveryAvailability {
                    is_buyable: true,
                    estimated_date: Some("3 Oct".to_string()),
                })]),
            ),
        ]);
        let value = report_json(&report);
        let models = value["models"].as_array().unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0]["hits"], 0);
        assert_eq!(models[0]["summary"], "");
        assert_eq!(models[1]["id"], "M2");
        assert_eq!(
            models[1]["summary"],
            "📦 Delivery available, estimated arrival: 3 Oct"
        );
    }
}
