//! Rule registry: the canonical, ordered catalogue of rules.
//!
//! The catalogue is assembled once on first use from the per-category
//! tables and is read-only afterwards, so lookups and grading can run from
//! any number of threads without coordination.
//!
//! Declaration order is significant only for output ordering: categories
//! follow `Category::ALL`, rules follow their table within a category.

mod accessibility;
mod composition;
mod naming;
mod state;
mod styling;
mod types;

use crate::models::rule::{Category, Rule};
use once_cell::sync::Lazy;
use std::fmt::Write as _;

static REGISTRY: Lazy<Vec<Rule>> = Lazy::new(|| {
    [
        types::RULES,
        styling::RULES,
        accessibility::RULES,
        composition::RULES,
        state::RULES,
        naming::RULES,
    ]
    .concat()
});

/// The full catalogue in declaration order.
pub fn all_rules() -> &'static [Rule] {
    REGISTRY.as_slice()
}

/// Rules whose category equals `category`, in declaration order.
pub fn rules_by_category(category: Category) -> Vec<&'static Rule> {
    all_rules()
        .iter()
        .filter(|r| r.category == category)
        .collect()
}

/// Exact id lookup.
pub fn rule_by_id(id: &str) -> Option<&'static Rule> {
    all_rules().iter().find(|r| r.id == id)
}

/// Case-insensitive substring search over id, name and description.
pub fn search_rules(query: &str) -> Vec<&'static Rule> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return all_rules().iter().collect();
    }
    all_rules()
        .iter()
        .filter(|r| {
            r.id.to_lowercase().contains(&needle)
                || r.name.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sum of all rule weights. Re-derived on every call.
pub fn total_weight() -> u32 {
    all_rules().iter().map(|r| r.weight).sum()
}

/// Render the catalogue grouped by category, with bad/good examples.
pub fn rules_to_markdown() -> String {
    let mut out = String::from("# Component Rules\n");
    for category in Category::ALL {
        let rules = rules_by_category(category);
        if rules.is_empty() {
            continue;
        }
        let _ = write!(out, "\n## {}\n", category.title());
        for rule in rules {
            out.push('\n');
            out.push_str(&rule_to_markdown(rule));
        }
    }
    out
}

/// Markdown section for a single rule.
pub fn rule_to_markdown(rule: &Rule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### {} (`{}`)", rule.name, rule.id);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Severity: {} | Weight: {}",
        rule.severity, rule.weight
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Bad:");
    let _ = writeln!(out);
    let _ = writeln!(out, "```tsx\n{}\n```", rule.example.bad);
    let _ = writeln!(out);
    let _ = writeln!(out, "Good:");
    let _ = writeln!(out);
    let _ = writeln!(out, "```tsx\n{}\n```", rule.example.good);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_weights_positive() {
        let mut seen = HashSet::new();
        for rule in all_rules() {
            assert!(seen.insert(rule.id), "duplicate rule id {}", rule.id);
            assert!(rule.weight > 0, "{} has zero weight", rule.id);
        }
        assert_eq!(all_rules().len(), 29);
        assert_eq!(total_weight(), 133);
    }

    #[test]
    fn test_every_category_is_populated_and_grouped_in_order() {
        let mut last = 0;
        for rule in all_rules() {
            let pos = Category::ALL
                .iter()
                .position(|c| *c == rule.category)
                .unwrap();
            assert!(pos >= last, "{} is out of category order", rule.id);
            last = pos;
        }
        for c in Category::ALL {
            assert!(!rules_by_category(c).is_empty(), "{} is empty", c);
        }
    }

    #[test]
    fn test_rule_by_id_hit_and_miss() {
        let rule = rule_by_id("button-type").unwrap();
        assert_eq!(rule.category, Category::Accessibility);
        assert!(rule_by_id("no-such-rule").is_none());
        assert!(rule_by_id("").is_none());
    }

    #[test]
    fn test_rules_by_category_filters_exactly() {
        let naming = rules_by_category(Category::Naming);
        assert!(naming.iter().all(|r| r.category == Category::Naming));
        let ids: Vec<_> = naming.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec!["component-pascal-case", "data-slot-kebab", "props-suffix", "handler-prefix"]
        );
    }

    #[test]
    fn test_search_rules() {
        let hits: Vec<_> = search_rules("ARIA-EXPANDED").iter().map(|r| r.id).collect();
        assert_eq!(hits, vec!["aria-expanded-controls"]);
        assert_eq!(search_rules("  ").len(), all_rules().len());
        assert!(search_rules("zzz-nothing").is_empty());
    }

    #[test]
    fn test_markdown_lists_every_rule_once_and_is_stable() {
        let md = rules_to_markdown();
        for rule in all_rules() {
            let heading = format!("(`{}`)", rule.id);
            assert_eq!(md.matches(&heading).count(), 1, "{}", rule.id);
        }
        assert!(md.find("## Types").unwrap() < md.find("## Naming").unwrap());
        assert_eq!(md, rules_to_markdown());
    }

    #[test]
    fn test_examples_match_rule_verdicts() {
        // Each documented bad example must trip its own rule; good examples
        // must not.
        for rule in all_rules() {
            assert!(
                !rule.run(rule.example.bad).is_empty(),
                "bad example of {} does not fire",
                rule.id
            );
            assert!(
                rule.run(rule.example.good).is_empty(),
                "good example of {} fires",
                rule.id
            );
        }
    }
}
