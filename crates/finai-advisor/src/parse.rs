//! Response cleaning and parsing

use finai_types::Analysis;

use crate::error::{AdvisorError, AdvisorResult};

/// Strip markdown code-fence markers and surrounding whitespace
///
/// Models often wrap JSON in ```` ```json ... ``` ```` despite being told not to.
pub fn clean_response(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse provider text into an [`Analysis`]
///
/// On failure the raw text is kept in the error for debugging.
pub fn parse_analysis(raw: &str) -> AdvisorResult<Analysis> {
    let cleaned = clean_response(raw);
    serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!(error = %e, raw = %raw, "Failed to parse AI response as JSON");
        AdvisorError::MalformedResponse {
            raw: raw.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
  "totalSpent": "294.74",
  "subscriptions": 6,
  "subscriptionCost": "72.94",
  "predictions": { "nextMonth": "309.48", "savings": "29.18" },
  "insights": ["one", "two", "three", "four"],
  "duplicates": [{ "name": "Streaming", "count": 4, "saving": 20.5 }]
}"#;

    #[test]
    fn test_fenced_and_plain_parse_identically() {
        let plain = parse_analysis(BODY).unwrap();

        let fenced_json = format!("```json\n{}\n```", BODY);
        let fenced_bare = format!("```\n{}\n```\n", BODY);
        let padded = format!("\n\n  {}  \n", BODY);

        assert_eq!(parse_analysis(&fenced_json).unwrap(), plain);
        assert_eq!(parse_analysis(&fenced_bare).unwrap(), plain);
        assert_eq!(parse_analysis(&padded).unwrap(), plain);
    }

    #[test]
    fn test_clean_response_strips_markers() {
        assert_eq!(clean_response("```json\n{}\n```"), "{}");
        assert_eq!(clean_response("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_malformed_keeps_raw_text() {
        let raw = "Sure! Here is your analysis: totally not JSON";
        match parse_analysis(raw) {
            Err(AdvisorError::MalformedResponse { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = parse_analysis(r#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(err, AdvisorError::MalformedResponse { .. }));
    }
}
