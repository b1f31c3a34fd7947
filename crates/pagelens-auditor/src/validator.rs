//! Validation of raw model output against the review schema

use crate::error::AuditError;
use pagelens_domain::Review;
use tracing::warn;

/// Parse raw model output into a validated [`Review`].
///
/// Processing order:
/// 1. strip leading/trailing code-fence markers (with or without a
///    language tag) the model may have wrapped the output in
/// 2. parse the remaining text as JSON into the typed `Review` shape;
///    out-of-enum category/severity values fail here
/// 3. range-check `ux_score`
///
/// Every failure carries the untouched raw text for diagnosis.
pub fn validate_review(raw: &str) -> Result<Review, AuditError> {
    let stripped = strip_code_fences(raw);

    let review: Review = serde_json::from_str(stripped).map_err(|e| {
        warn!("Model output failed schema validation: {}", e);
        AuditError::Schema {
            message: e.to_string(),
            raw: raw.to_string(),
        }
    })?;

    if !review.ux_score.is_finite() || !(0.0..=100.0).contains(&review.ux_score) {
        return Err(AuditError::Schema {
            message: format!("ux_score {} out of range [0, 100]", review.ux_score),
            raw: raw.to_string(),
        });
    }

    Ok(review)
}

/// Strip a leading/trailing markdown code fence, if any.
///
/// Handles ```` ```json ```` and bare ```` ``` ```` fences. Text without
/// fences passes through unchanged apart from outer whitespace.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the fence line, including any language tag.
        text = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => "",
        };
    }

    let trimmed = text.trim_end();
    if let Some(rest) = trimmed.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelens_domain::{IssueCategory, Severity};

    const VALID: &str = r#"{
        "ux_score": 82,
        "issues": [
            {
                "category": "Navigation",
                "issue": "Hidden menu",
                "severity": "High",
                "why": "Primary navigation is not discoverable",
                "proof": "Welcome"
            }
        ],
        "top_fixes": [
            {"issue": "Hidden menu", "before": "Hamburger only", "after": "Visible links"}
        ]
    }"#;

    #[test]
    fn test_valid_review() {
        let review = validate_review(VALID).unwrap();
        assert_eq!(review.ux_score, 82.0);
        assert_eq!(review.issues.len(), 1);
        assert_eq!(review.issues[0].category, IssueCategory::Navigation);
        assert_eq!(review.issues[0].severity, Severity::High);
        assert_eq!(review.top_fixes.len(), 1);
    }

    #[test]
    fn test_fenced_review_validates_identically() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert_eq!(validate_review(&fenced).unwrap(), validate_review(VALID).unwrap());

        let bare_fence = format!("```\n{}\n```", VALID);
        assert_eq!(
            validate_review(&bare_fence).unwrap(),
            validate_review(VALID).unwrap()
        );
    }

    #[test]
    fn test_unparsable_output_keeps_raw_text() {
        let raw = "Sorry, I cannot audit this page.";
        match validate_review(raw) {
            Err(AuditError::Schema { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected schema error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_fenced_garbage_keeps_original_raw_text() {
        let raw = "```json\nnot json at all\n```";
        match validate_review(raw) {
            Err(AuditError::Schema { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected schema error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_required_field_is_schema_error() {
        let raw = r#"{"ux_score": 50, "issues": []}"#;
        assert!(matches!(
            validate_review(raw),
            Err(AuditError::Schema { .. })
        ));
    }

    #[test]
    fn test_out_of_enum_category_rejected() {
        let raw = r#"{
            "ux_score": 50,
            "issues": [
                {"category": "Performance", "issue": "x", "severity": "Low", "why": "y", "proof": "z"}
            ],
            "top_fixes": []
        }"#;
        assert!(matches!(
            validate_review(raw),
            Err(AuditError::Schema { .. })
        ));
    }

    #[test]
    fn test_out_of_enum_severity_rejected() {
        let raw = r#"{
            "ux_score": 50,
            "issues": [
                {"category": "Clarity", "issue": "x", "severity": "Blocker", "why": "y", "proof": "z"}
            ],
            "top_fixes": []
        }"#;
        assert!(matches!(
            validate_review(raw),
            Err(AuditError::Schema { .. })
        ));
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let raw = r#"{"ux_score": 140, "issues": [], "top_fixes": []}"#;
        assert!(matches!(
            validate_review(raw),
            Err(AuditError::Schema { .. })
        ));

        let raw = r#"{"ux_score": -3, "issues": [], "top_fixes": []}"#;
        assert!(matches!(
            validate_review(raw),
            Err(AuditError::Schema { .. })
        ));
    }

    #[test]
    fn test_score_bounds_inclusive() {
        assert!(validate_review(r#"{"ux_score": 0, "issues": [], "top_fixes": []}"#).is_ok());
        assert!(validate_review(r#"{"ux_score": 100, "issues": [], "top_fixes": []}"#).is_ok());
    }

    #[test]
    fn test_strip_fences_passthrough() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fences_with_language_tag() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fences_empty_block() {
        assert_eq!(strip_code_fences("```json\n```"), "");
        assert_eq!(strip_code_fences("```"), "");
    }
}
