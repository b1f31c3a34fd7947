//! Review - the model-produced UX critique

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of UX issue categories.
///
/// Serialization uses the exact variant names; any other value in model
/// output is a schema violation and is rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    /// Unclear copy, ambiguous labels, jargon
    Clarity,
    /// Visual hierarchy, spacing, alignment problems
    Layout,
    /// Wayfinding, menus, broken or confusing flows
    Navigation,
    /// Contrast, labels, keyboard and screen-reader support
    Accessibility,
    /// Credibility signals, social proof, data-handling cues
    Trust,
}

impl IssueCategory {
    /// All categories, in prompt order.
    pub const ALL: [IssueCategory; 5] = [
        IssueCategory::Clarity,
        IssueCategory::Layout,
        IssueCategory::Navigation,
        IssueCategory::Accessibility,
        IssueCategory::Trust,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Clarity => "Clarity",
            IssueCategory::Layout => "Layout",
            IssueCategory::Navigation => "Navigation",
            IssueCategory::Accessibility => "Accessibility",
            IssueCategory::Trust => "Trust",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of issue severities, case-sensitive like the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Cosmetic, low user impact
    Low,
    /// Noticeable friction for some users
    Medium,
    /// Blocks or seriously degrades a core task
    High,
}

impl Severity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single UX issue reported by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewIssue {
    /// Issue category, drawn from the closed enumeration
    pub category: IssueCategory,

    /// Short issue title
    pub issue: String,

    /// Severity, drawn from the closed enumeration
    pub severity: Severity,

    /// Short explanation of the user impact
    pub why: String,

    /// Text reference from the supplied page content. The model is asked
    /// to cite real text; this is not mechanically enforced.
    pub proof: String,
}

/// A concrete before/after fix suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopFix {
    /// Title of the issue being fixed
    pub issue: String,

    /// Current state
    pub before: String,

    /// Improved version
    pub after: String,
}

/// Validated model output: a UX score plus the issue and fix lists.
///
/// The model is asked for 8-12 issues; the cardinality is requested, not
/// enforced. `ux_score` is bounded to [0, 100] by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Overall UX score in [0, 100]
    pub ux_score: f64,

    /// Reported issues, model order preserved
    pub issues: Vec<ReviewIssue>,

    /// Highest-leverage fixes, model order preserved
    pub top_fixes: Vec<TopFix>,
}
