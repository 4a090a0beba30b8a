//! Composition rules: slots, prop forwarding, className merging, exports.

use crate::checks::{calls, classify_arg, tags, ArgKind};
use crate::models::rule::{Category, Example, Rule, Severity};
use crate::models::Violation;
use once_cell::sync::Lazy;
use regex::Regex;

static COMPONENT_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfunction\s+([A-Z]\w*)\s*\(|\bconst\s+([A-Z]\w*)\s*=\s*\(").expect("component fn")
});
/// Component whose first parameter destructures typed props.
static COMPONENT_PARAMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\bfunction\s+([A-Z]\w*)\s*|\bconst\s+([A-Z]\w*)\s*=\s*)\(\s*\{([^}]*)\}\s*:")
        .expect("component params")
});
static CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|[^\w$.\-"'])className\b"#).expect("class name"));
static AS_CHILD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\basChild\b").expect("as child"));
static SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bSlot\b").expect("slot"));
static EXPORT_DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexport\s+default\b").expect("export default"));

/// Lower-case names that show up in `<...>` positions but are type arguments.
const TYPE_ARGUMENTS: &[&str] = &[
    "string", "number", "boolean", "any", "unknown", "null", "undefined", "void", "never",
    "object", "typeof", "keyof",
];

pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "data-slot",
        name: "Mark parts with data-slot",
        description: "Rendered elements should carry a data-slot attribute so parents can target component parts in CSS.",
        category: Category::Composition,
        severity: Severity::Info,
        weight: 3,
        check: data_slot,
        example: Example {
            bad: "function CardHeader(props) {\n  return <div {...props} />\n}",
            good: "function CardHeader(props) {\n  return <div data-slot=\"card-header\" {...props} />\n}",
        },
    },
    Rule {
        id: "as-child-slot",
        name: "Implement asChild with Slot",
        description: "An asChild prop should switch rendering to Slot so props merge onto the child element.",
        category: Category::Composition,
        severity: Severity::Warning,
        weight: 3,
        check: as_child_slot,
        example: Example {
            bad: "function Button({ asChild, ...props }) {\n  return <button {...props} />\n}",
            good: "function Button({ asChild, ...props }) {\n  const Comp = asChild ? Slot : \"button\"\n  return <Comp {...props} />\n}",
        },
    },
    Rule {
        id: "spread-props",
        name: "Forward remaining props",
        description: "Components should spread the remaining props onto their root element so native attributes and handlers reach the DOM.",
        category: Category::Composition,
        severity: Severity::Warning,
        weight: 5,
        check: spread_props,
        example: Example {
            bad: "function Badge({ className }: BadgeProps) {\n  return <span className={cn(\"badge\", className)} />\n}",
            good: "function Badge({ className, ...props }: BadgeProps) {\n  return <span className={cn(\"badge\", className)} {...props} />\n}",
        },
    },
    Rule {
        id: "merge-classname",
        name: "Merge the className prop",
        description: "A destructured className must be merged into the root classes with cn(), otherwise caller styles are dropped.",
        category: Category::Composition,
        severity: Severity::Warning,
        weight: 5,
        check: merge_classname,
        example: Example {
            bad: "function Card({ className, ...props }: CardProps) {\n  return <div className=\"rounded-xl border\" {...props} />\n}",
            good: "function Card({ className, ...props }: CardProps) {\n  return <div className={cn(\"rounded-xl border\", className)} {...props} />\n}",
        },
    },
    Rule {
        id: "named-exports",
        name: "Prefer named exports",
        description: "Named exports keep import names consistent and let a file expose every part of a compound component.",
        category: Category::Composition,
        severity: Severity::Info,
        weight: 2,
        check: named_exports,
        example: Example {
            bad: "export default function Card() {}",
            good: "function Card() {}\nexport { Card }",
        },
    },
];

fn data_slot(code: &str) -> Vec<Violation> {
    let Some(component) = COMPONENT_FN.find(code) else {
        return Vec::new();
    };
    let renders_intrinsic = tags(code).any(|t| {
        t.name.starts_with(|c: char| c.is_ascii_lowercase()) && !TYPE_ARGUMENTS.contains(&t.name)
    });
    if !renders_intrinsic || code.contains("data-slot=") {
        return Vec::new();
    }
    vec![Violation::new(
        "data-slot",
        "Rendered elements have no data-slot attribute",
    )
    .located(code, component.as_str())
    .with_suggestion("Add data-slot=\"component-part\" to each component's root element")]
}

fn as_child_slot(code: &str) -> Vec<Violation> {
    let Some(m) = AS_CHILD.find(code) else {
        return Vec::new();
    };
    if SLOT.is_match(code) {
        return Vec::new();
    }
    vec![Violation::new(
        "as-child-slot",
        "asChild is accepted but Slot is never rendered",
    )
    .located(code, m.as_str())
    .with_suggestion("const Comp = asChild ? Slot : \"button\"")]
}

/// Component name and destructured parameter list for each typed component.
fn typed_components(code: &str) -> Vec<(&str, &str, &str)> {
    COMPONENT_PARAMS
        .captures_iter(code)
        .filter_map(|caps| {
            let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
            Some((name, caps.get(3)?.as_str(), caps.get(0)?.as_str()))
        })
        .collect()
}

fn destructures(params: &str, prop: &str) -> bool {
    params.split(',').any(|item| {
        item.trim()
            .split(|c: char| c == '=' || c == ':' || c.is_whitespace())
            .next()
            == Some(prop)
    })
}

fn spread_props(code: &str) -> Vec<Violation> {
    typed_components(code)
        .into_iter()
        .filter(|(_, params, _)| !params.contains("..."))
        .map(|(name, params, text)| {
            Violation::new(
                "spread-props",
                format!("`{}` does not collect and forward remaining props", name),
            )
            .located(code, text)
            .with_suggestion(format!("{{ {}, ...props }} and spread {{...props}} onto the root", params.trim()))
        })
        .collect()
}

fn merge_classname(code: &str) -> Vec<Violation> {
    // className may be passed straight to cn() or through a cva call inside it.
    let merged = calls(code, "cn").iter().any(|call| {
        call.args
            .iter()
            .any(|a| classify_arg(a) == ArgKind::Override || CLASS_NAME.is_match(a))
    });
    if merged {
        return Vec::new();
    }
    typed_components(code)
        .into_iter()
        .filter(|(_, params, _)| destructures(params, "className"))
        .map(|(name, _, text)| {
            Violation::new(
                "merge-classname",
                format!("`{}` destructures className but never merges it with cn()", name),
            )
            .located(code, text)
            .with_suggestion("className={cn(\"base classes\", className)}")
        })
        .collect()
}

fn named_exports(code: &str) -> Vec<Violation> {
    EXPORT_DEFAULT
        .find_iter(code)
        .map(|m| {
            Violation::new("named-exports", "Default export used")
                .located(code, m.as_str())
                .with_suggestion("Export the component by name: export { Component }")
        })
        .collect()
}
