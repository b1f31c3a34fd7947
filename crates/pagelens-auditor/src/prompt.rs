//! Prompt rendering for review completions

use pagelens_domain::ContentSummary;

/// System instruction sent with every completion request.
///
/// Mandates pure JSON output with category and severity drawn from the
/// closed enumerations. The validator still re-checks everything.
pub const SYSTEM_INSTRUCTION: &str = "You are a strict UX auditor. Return ONLY valid JSON. \
No explanations outside JSON. \
\"category\" must be exactly one of: Clarity, Layout, Navigation, Accessibility, Trust. \
\"severity\" must be exactly one of: Low, Medium, High.";

const FORMAT_BLOCK: &str = r#"Return JSON in this exact format:

{
  "ux_score": number (0-100),
  "issues": [
    {
      "category": "Clarity | Layout | Navigation | Accessibility | Trust",
      "issue": "Short title",
      "severity": "Low | Medium | High",
      "why": "Short explanation",
      "proof": "Exact text from the page content above"
    }
  ],
  "top_fixes": [
    {
      "issue": "Issue title",
      "before": "Current state",
      "after": "Improved version"
    }
  ]
}

Provide 8-12 issues grouped across categories.
Be specific and realistic. "proof" must reference text actually present in the page content."#;

/// Render a content summary into the model prompt.
///
/// Pure, deterministic, total. The section order is fixed (title,
/// headings, buttons, links, paragraphs) and defines what context the
/// model receives in what priority; do not permute it.
pub fn build_prompt(summary: &ContentSummary) -> String {
    let mut prompt = String::new();

    prompt.push_str("Audit the user experience of a web page from this extracted content.\n\n");

    prompt.push_str(&format!("Page title: {}\n\n", summary.title));

    prompt.push_str("Headings:\n");
    for heading in &summary.headings {
        prompt.push_str(&format!("- {}\n", heading));
    }
    prompt.push('\n');

    prompt.push_str("Buttons:\n");
    for button in &summary.buttons {
        prompt.push_str(&format!("- {}\n", button));
    }
    prompt.push('\n');

    if !summary.links.is_empty() {
        prompt.push_str("Links:\n");
        for link in &summary.links {
            prompt.push_str(&format!("- {}\n", link));
        }
        prompt.push('\n');
    }

    prompt.push_str("Paragraphs:\n");
    for paragraph in &summary.paragraphs {
        prompt.push_str(&format!("- {}\n", paragraph));
    }
    prompt.push('\n');

    prompt.push_str(FORMAT_BLOCK);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> ContentSummary {
        ContentSummary {
            title: "Demo".to_string(),
            headings: vec!["Welcome".to_string(), "Pricing".to_string()],
            buttons: vec!["Sign up".to_string()],
            forms: vec!["Form detected".to_string()],
            links: vec!["Docs".to_string()],
            paragraphs: vec!["Hello".to_string()],
        }
    }

    #[test]
    fn test_prompt_includes_all_content() {
        let prompt = build_prompt(&sample_summary());

        assert!(prompt.contains("Page title: Demo"));
        assert!(prompt.contains("- Welcome"));
        assert!(prompt.contains("- Pricing"));
        assert!(prompt.contains("- Sign up"));
        assert!(prompt.contains("- Docs"));
        assert!(prompt.contains("- Hello"));
        assert!(prompt.contains("\"ux_score\""));
        assert!(prompt.contains("8-12 issues"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let prompt = build_prompt(&sample_summary());

        let title = prompt.find("Page title:").unwrap();
        let headings = prompt.find("Headings:").unwrap();
        let buttons = prompt.find("Buttons:").unwrap();
        let links = prompt.find("Links:").unwrap();
        let paragraphs = prompt.find("Paragraphs:").unwrap();

        assert!(title < headings);
        assert!(headings < buttons);
        assert!(buttons < links);
        assert!(links < paragraphs);
    }

    #[test]
    fn test_links_section_skipped_when_absent() {
        let mut summary = sample_summary();
        summary.links.clear();

        let prompt = build_prompt(&summary);
        assert!(!prompt.contains("Links:"));
        assert!(prompt.contains("Paragraphs:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let summary = sample_summary();
        assert_eq!(build_prompt(&summary), build_prompt(&summary));
    }

    #[test]
    fn test_prompt_is_total_on_empty_summary() {
        let prompt = build_prompt(&ContentSummary::default());
        assert!(prompt.contains("Page title: \n"));
        assert!(prompt.contains("Headings:"));
    }

    #[test]
    fn test_system_instruction_names_closed_enums() {
        assert!(SYSTEM_INSTRUCTION.contains("Clarity"));
        assert!(SYSTEM_INSTRUCTION.contains("Trust"));
        assert!(SYSTEM_INSTRUCTION.contains("High"));
        assert!(SYSTEM_INSTRUCTION.contains("ONLY valid JSON"));
    }
}
