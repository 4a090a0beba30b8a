//! Rule schema used by the registry and the grading pass.
//!
//! Key components:
//! - `Category`: closed grouping used for filtering and documentation.
//! - `Severity`: advisory classification surfaced in reports. It never
//!   changes the scoring weight.
//! - `Rule`: id, metadata, weight, and the detector function pointer.

use crate::models::Violation;
use serde::Serialize;
use std::fmt;

/// Pure detector: inspects raw source text and reports zero or more violations.
pub type Detector = fn(&str) -> Vec<Violation>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Rule category for grouping related rules.
pub enum Category {
    Types,
    Styling,
    Accessibility,
    Composition,
    State,
    Naming,
}

impl Category {
    /// Every category in documentation order.
    pub const ALL: [Category; 6] = [
        Category::Types,
        Category::Styling,
        Category::Accessibility,
        Category::Composition,
        Category::State,
        Category::Naming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Types => "types",
            Category::Styling => "styling",
            Category::Accessibility => "accessibility",
            Category::Composition => "composition",
            Category::State => "state",
            Category::Naming => "naming",
        }
    }

    /// Section heading used by markdown renderers.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Types => "Types",
            Category::Styling => "Styling",
            Category::Accessibility => "Accessibility",
            Category::Composition => "Composition",
            Category::State => "State",
            Category::Naming => "Naming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "types" => Ok(Category::Types),
            "styling" => Ok(Category::Styling),
            "accessibility" | "a11y" => Ok(Category::Accessibility),
            "composition" => Ok(Category::Composition),
            "state" => Ok(Category::State),
            "naming" => Ok(Category::Naming),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity level shown next to a violation.
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Illustrative snippets rendered in rule documentation.
pub struct Example {
    pub bad: &'static str,
    pub good: &'static str,
}

#[derive(Clone, Copy, Serialize)]
/// A named, weighted detector plus its documentation.
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub weight: u32,
    #[serde(skip)]
    pub check: Detector,
    pub example: Example,
}

impl Rule {
    /// Run the detector against `code`.
    pub fn run(&self, code: &str) -> Vec<Violation> {
        (self.check)(code)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_roundtrip_and_unknown() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert_eq!("A11Y".parse::<Category>().unwrap(), Category::Accessibility);
        assert!("layout".parse::<Category>().is_err());
    }

    #[test]
    fn test_rule_serializes_without_detector() {
        fn never(_: &str) -> Vec<Violation> {
            Vec::new()
        }
        let rule = Rule {
            id: "demo",
            name: "Demo",
            description: "Demo rule.",
            category: Category::State,
            severity: Severity::Warning,
            weight: 2,
            check: never,
            example: Example { bad: "a", good: "b" },
        };
        let v = serde_json::to_value(rule).unwrap();
        assert_eq!(v["category"], "state");
        assert_eq!(v["severity"], "warning");
        assert!(v.get("check").is_none());
        assert!(rule.run("anything").is_empty());
    }
}
