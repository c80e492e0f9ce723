//! Locating and decoding the fulfillment JSON document inside a raw response.

use stockwatch_core::{Markers, ResponseFormat};

use crate::error::{ExtractionError, ScraperError};

/// Returns the text strictly between the first `prefix` and the first
/// `suffix` that follows it.
///
/// The slice is not validated as JSON; see [`decode_document`].
///
/// # Errors
///
/// - [`ExtractionError::MarkerNotFound`] if `prefix` does not occur.
/// - [`ExtractionError::UnterminatedPayload`] if no `suffix` follows the prefix.
pub fn extract_payload<'a>(
    raw: &'a str,
    prefix: &str,
    suffix: &str,
) -> Result<&'a str, ExtractionError> {
    let start = raw
        .find(prefix)
        .map(|idx| idx + prefix.len())
        .ok_or(ExtractionError::MarkerNotFound)?;
    let rest = &raw[start..];
    let end = rest
        .find(suffix)
        .ok_or(ExtractionError::UnterminatedPayload)?;
    Ok(&rest[..end])
}

/// Turns a raw response body into a parsed JSON document.
///
/// For [`ResponseFormat::Embedded`] the payload is first cut out with
/// `markers`; for [`ResponseFormat::Json`] the whole body is parsed.
///
/// # Errors
///
/// - [`ScraperError::Extraction`] if the markers cannot be located.
/// - [`ScraperError::Parse`] if the payload is not valid JSON.
pub fn decode_document(
    raw: &str,
    format: ResponseFormat,
    markers: &Markers,
) -> Result<serde_json::Value, ScraperError> {
    let payload = match format {
        ResponseFormat::Json => raw,
        ResponseFormat::Embedded => extract_payload(raw, &markers.prefix, &markers.suffix)?,
    };

    serde_json::from_str(payload.trim()).map_err(|e| ScraperError::Parse {
        context: format!("{format} fulfillment payload"),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "var fulfillmentMessages = ";
    const SUFFIX: &str = ";</script>";

    #[test]
    fn extracts_payload_between_markers() {
        let raw = r#"<html><script>var fulfillmentMessages = {"a":1};</script></html>"#;
        assert_eq!(extract_payload(raw, PREFIX, SUFFIX).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn missing_prefix_is_marker_not_found() {
        let raw = "<html><body>Access denied</body></html>";
        assert_eq!(
            extract_payload(raw, PREFIX, SUFFIX),
            Err(ExtractionError::MarkerNotFound)
        );
    }

    #[test]
    fn empty_input_is_marker_not_found() {
        assert_eq!(
            extract_payload("", PREFIX, SUFFIX),
            Err(ExtractionError::MarkerNotFound)
        );
    }

    #[test]
    fn missing_suffix_is_unterminated() {
        let raw = r#"<script>var fulfillmentMessages = {"a":1}"#;
        assert_eq!(
            extract_payload(raw, PREFIX, SUFFIX),
            Err(ExtractionError::UnterminatedPayload)
        );
    }

    #[test]
    fn suffix_before_prefix_is_ignored() {
        let raw = r#";</script><script>var fulfillmentMessages = {"b":2};</script>"#;
        assert_eq!(extract_payload(raw, PREFIX, SUFFIX).unwrap(), r#"{"b":2}"#);
    }

    #[test]
    fn first_occurrences_win() {
        let raw = r#"var fulfillmentMessages = {"first":true};</script>var fulfillmentMessages = {"second":true};</script>"#;
        assert_eq!(
            extract_payload(raw, PREFIX, SUFFIX).unwrap(),
            r#"{"first":true}"#
        );
    }

    #[test]
    fn adjacent_markers_yield_empty_payload() {
        let raw = "var fulfillmentMessages = ;</script>";
        assert_eq!(extract_payload(raw, PREFIX, SUFFIX).unwrap(), "");
    }

    #[test]
    fn multibyte_text_around_markers_is_preserved() {
        let raw = "库存 var fulfillmentMessages = {\"name\":\"店\"};</script> 结束";
        assert_eq!(
            extract_payload(raw, PREFIX, SUFFIX).unwrap(),
            "{\"name\":\"店\"}"
        );
    }

    #[test]
    fn decode_json_body() {
        let doc = decode_document(
            r#" {"deliveryMessage":{}} "#,
            ResponseFormat::Json,
            &Markers::default(),
        )
        .unwrap();
        assert!(doc.get("deliveryMessage").is_some());
    }

    #[test]
    fn decode_embedded_body() {
        let raw = r#"<script>var fulfillmentMessages = {"pickupMessage":{"stores":[]}};</script>"#;
        let doc = decode_document(raw, ResponseFormat::Embedded, &Markers::default()).unwrap();
        assert!(doc["pickupMessage"]["stores"].is_array());
    }

    #[test]
    fn decode_embedded_without_marker_is_no_data() {
        let err = decode_document("<html></html>", ResponseFormat::Embedded, &Markers::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ScraperError::Extraction(ExtractionError::MarkerNotFound)
        ));
        assert!(err.is_no_data());
        assert_eq!(err.to_string(), "extraction failed: marker not found");
    }

    #[test]
    fn decode_malformed_json_is_parse_error() {
        let raw = "<script>var fulfillmentMessages = {not json};</script>";
        let err = decode_document(raw, ResponseFormat::Embedded, &Markers::default()).unwrap_err();
        assert!(matches!(err, ScraperError::Parse { .. }));
        assert!(err.is_no_data());
        assert!(!err.is_transport());
    }

    #[test]
    fn decode_html_as_json_is_parse_error() {
        let err = decode_document("<html>", ResponseFormat::Json, &Markers::default()).unwrap_err();
        assert!(matches!(err, ScraperError::Parse { .. }));
    }
}
