//! Content summary - the structured extraction of a page's visible content

use serde::{Deserialize, Serialize};

/// Marker recorded for each detected form element.
///
/// Form internals are deliberately not inspected; only the presence of a
/// form is relevant to the critique.
pub const FORM_MARKER: &str = "Form detected";

/// Maximum number of paragraphs retained in a summary.
pub const MAX_PARAGRAPHS: usize = 10;

/// Structured summary of a page's visible content.
///
/// Produced by the extractor, consumed by the prompt builder. All text is
/// whitespace-trimmed and sequences preserve document order. Paragraphs are
/// truncated to the first [`MAX_PARAGRAPHS`] encountered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    /// Page title (`<title>` text)
    pub title: String,

    /// Text of all `h1`/`h2`/`h3` elements, document order
    pub headings: Vec<String>,

    /// Text of interactive button elements, document order
    pub buttons: Vec<String>,

    /// One [`FORM_MARKER`] per detected form element
    pub forms: Vec<String>,

    /// Text of anchor elements, empty anchors skipped
    pub links: Vec<String>,

    /// Text of paragraph elements, truncated to the first [`MAX_PARAGRAPHS`]
    pub paragraphs: Vec<String>,
}

impl ContentSummary {
    /// True when nothing visible was extracted from the page.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.headings.is_empty()
            && self.buttons.is_empty()
            && self.forms.is_empty()
            && self.links.is_empty()
            && self.paragraphs.is_empty()
    }
}
