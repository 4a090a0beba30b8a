//! Styling rules: class merging, class ordering, and design tokens.

use crate::checks::{calls, classify_arg, over_threshold, ArgKind, SYSTEMIC_THRESHOLD};
use crate::models::rule::{Category, Example, Rule, Severity};
use crate::models::Violation;
use once_cell::sync::Lazy;
use regex::Regex;

static INTERPOLATED_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"className=\{\s*(?:`[^`]*\$\{|["'][^"'\n]*["']\s*\+)"#).expect("interpolated class")
});
static INLINE_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bstyle=\{\{").expect("inline style"));
static ARBITRARY_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b[a-z][a-z0-9-]*-\[[^\]\s"'`]+\]"#).expect("arbitrary value")
});
static PALETTE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:bg|text|border|ring|fill|stroke|from|via|to|outline|divide|placeholder)-(?:slate|gray|zinc|neutral|stone|red|orange|amber|yellow|lime|green|emerald|teal|cyan|sky|blue|indigo|violet|purple|fuchsia|pink|rose)-\d{2,3}\b",
    )
    .expect("palette class")
});
static VARIANT_BRANCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:variant|size)\s*===?\s*["']"#).expect("variant branch")
});

pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "use-cn",
        name: "Merge classes with cn()",
        description: "Class names should be merged with cn() so conditional classes and Tailwind conflicts resolve predictably.",
        category: Category::Styling,
        severity: Severity::Warning,
        weight: 8,
        check: use_cn,
        example: Example {
            bad: "<div className={`rounded-md ${active ? \"bg-accent\" : \"\"}`} />",
            good: "<div className={cn(\"rounded-md\", active && \"bg-accent\")} />",
        },
    },
    Rule {
        id: "class-order",
        name: "Order cn() arguments",
        description: "Inside cn(), base class strings come first, conditional classes next, and the caller's className last so it can override.",
        category: Category::Styling,
        severity: Severity::Warning,
        weight: 8,
        check: class_order,
        example: Example {
            bad: "cn(className, isActive && \"bg-accent\", \"rounded-md px-3\")",
            good: "cn(\"rounded-md px-3\", isActive && \"bg-accent\", className)",
        },
    },
    Rule {
        id: "no-inline-styles",
        name: "Avoid inline styles",
        description: "Inline style objects bypass the design system and cannot be overridden by utility classes.",
        category: Category::Styling,
        severity: Severity::Warning,
        weight: 5,
        check: no_inline_styles,
        example: Example {
            bad: "<div style={{ padding: 16 }} />",
            good: "<div className=\"p-4\" />",
        },
    },
    Rule {
        id: "no-arbitrary-values",
        name: "Limit arbitrary values",
        description: "Frequent arbitrary Tailwind values signal that the spacing and sizing scale is being bypassed.",
        category: Category::Styling,
        severity: Severity::Info,
        weight: 3,
        check: no_arbitrary_values,
        example: Example {
            bad: "<div className=\"w-[37px] h-[13px] mt-[7px] gap-[3px]\" />",
            good: "<div className=\"size-9 mt-2 gap-1\" />",
        },
    },
    Rule {
        id: "semantic-colors",
        name: "Use semantic color tokens",
        description: "Raw palette colors do not follow themes; semantic tokens such as bg-primary adapt to light and dark modes.",
        category: Category::Styling,
        severity: Severity::Info,
        weight: 3,
        check: semantic_colors,
        example: Example {
            bad: "<p className=\"bg-white text-gray-900 border-gray-200 hover:bg-gray-100 ring-blue-500\" />",
            good: "<p className=\"bg-background text-foreground border-border hover:bg-accent\" />",
        },
    },
    Rule {
        id: "cva-for-variants",
        name: "Declare variants with cva",
        description: "Branching on variant or size in render logic should be replaced by a cva variant table.",
        category: Category::Styling,
        severity: Severity::Info,
        weight: 3,
        check: cva_for_variants,
        example: Example {
            bad: "variant === \"ghost\" ? \"bg-transparent\" : variant === \"outline\" ? \"border\" : \"bg-primary\"\nsize === \"sm\" ? \"h-8\" : size === \"lg\" ? \"h-10\" : \"h-9\"",
            good: "const buttonVariants = cva(\"...\", { variants: { variant: { ghost: \"...\", outline: \"...\" } } })",
        },
    },
];

fn use_cn(code: &str) -> Vec<Violation> {
    INTERPOLATED_CLASS
        .find_iter(code)
        .map(|m| {
            Violation::new(
                "use-cn",
                "className is assembled with string interpolation instead of cn()",
            )
            .located(code, m.as_str())
            .with_suggestion("className={cn(\"base classes\", condition && \"extra\", className)}")
        })
        .collect()
}

fn class_order(code: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    for call in calls(code, "cn") {
        let kinds: Vec<ArgKind> = call.args.iter().map(|a| classify_arg(a)).collect();
        let suggestion = reordered(&call.args, &kinds);

        if let Some(first_dynamic) = kinds.iter().position(|k| *k != ArgKind::Literal) {
            if kinds[first_dynamic + 1..].contains(&ArgKind::Literal) {
                out.push(
                    Violation::new(
                        "class-order",
                        "Base class strings should come before conditional classes in cn()",
                    )
                    .located(code, call.text)
                    .with_suggestion(suggestion.clone()),
                );
            }
        }
        if let Some(pos) = kinds.iter().position(|k| *k == ArgKind::Override) {
            if pos + 1 != kinds.len() {
                out.push(
                    Violation::new(
                        "class-order",
                        "className should be the last argument to cn() so callers can override",
                    )
                    .located(code, call.text)
                    .with_suggestion(suggestion),
                );
            }
        }
    }
    out
}

/// Stable reorder: literals, then computed expressions, then overrides.
fn reordered(args: &[&str], kinds: &[ArgKind]) -> String {
    let ordered: Vec<&str> = [ArgKind::Literal, ArgKind::Computed, ArgKind::Override]
        .iter()
        .flat_map(move |want| {
            args.iter()
                .zip(kinds)
                .filter(move |(_, k)| *k == want)
                .map(|(a, _)| *a)
        })
        .collect();
    format!("cn({})", ordered.join(", "))
}

fn no_inline_styles(code: &str) -> Vec<Violation> {
    let mut found = INLINE_STYLE.find_iter(code);
    let Some(first) = found.next() else {
        return Vec::new();
    };
    let total = 1 + found.count();
    vec![Violation::new(
        "no-inline-styles",
        format!("Inline style objects used {} time(s)", total),
    )
    .located(code, first.as_str())
    .with_suggestion("Move the styles into utility classes passed through cn()")]
}

fn no_arbitrary_values(code: &str) -> Vec<Violation> {
    over_threshold(&ARBITRARY_VALUE, code)
        .map(|(total, first)| {
            vec![Violation::new(
                "no-arbitrary-values",
                format!(
                    "{} arbitrary values found (more than {})",
                    total, SYSTEMIC_THRESHOLD
                ),
            )
            .located(code, first)
            .with_suggestion("Prefer the spacing and sizing scale, e.g. `size-9` over `w-[37px]`")]
        })
        .unwrap_or_default()
}

fn semantic_colors(code: &str) -> Vec<Violation> {
    over_threshold(&PALETTE_CLASS, code)
        .map(|(total, first)| {
            vec![Violation::new(
                "semantic-colors",
                format!(
                    "{} raw palette color classes found (more than {})",
                    total, SYSTEMIC_THRESHOLD
                ),
            )
            .located(code, first)
            .with_suggestion(
                "Use semantic tokens such as bg-background, text-muted-foreground, border-border",
            )]
        })
        .unwrap_or_default()
}

fn cva_for_variants(code: &str) -> Vec<Violation> {
    over_threshold(&VARIANT_BRANCH, code)
        .map(|(total, first)| {
            vec![Violation::new(
                "cva-for-variants",
                format!("{} inline variant/size comparisons found", total),
            )
            .located(code, first)
            .with_suggestion("Declare a cva() variant table and call it with the props")]
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_cn_flags_template_and_concat() {
        let code = "<div className={`a ${b}`} />\n<span className={\"x \" + y} />\n<p className={cn('a')} />";
        let v = use_cn(code);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].line, Some(1));
        assert_eq!(v[1].line, Some(2));
        assert!(use_cn("<div className={`static`} />").is_empty());
    }

    #[test]
    fn test_class_order_flags_literal_after_conditional() {
        let v = class_order("cn(isActive && 'active', 'base')");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule_id, "class-order");
        assert_eq!(
            v[0].suggestion.as_deref(),
            Some("cn('base', isActive && 'active')")
        );
    }

    #[test]
    fn test_class_order_flags_override_not_last() {
        let v = class_order("cn(\"base\", className, open && \"x\")");
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("last argument"));
        assert_eq!(
            v[0].suggestion.as_deref(),
            Some("cn(\"base\", open && \"x\", className)")
        );
    }

    #[test]
    fn test_class_order_reports_both_checks_separately() {
        let v = class_order("cn(className, 'base')");
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_class_order_accepts_canonical_order() {
        let code = "cn(\"a\", 'b', x && 'c', { d: e }, className)\ncn()\ncn(className)";
        assert!(class_order(code).is_empty());
    }

    #[test]
    fn test_inline_styles_single_violation() {
        let v = no_inline_styles("<a style={{ x: 1 }} />\n<b style={{ y: 2 }} />");
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("2 time(s)"));
    }

    #[test]
    fn test_threshold_rules_tolerate_three() {
        let three = "w-[1px] h-[2px] mt-[3px]";
        assert!(no_arbitrary_values(three).is_empty());
        let four = "w-[1px] h-[2px] mt-[3px]\ngap-[4px]";
        let v = no_arbitrary_values(four);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].line, Some(1));

        assert!(semantic_colors("bg-blue-500 text-gray-700 border-red-200").is_empty());
        assert_eq!(
            semantic_colors("bg-blue-500 text-gray-700 border-red-200 ring-sky-50").len(),
            1
        );
    }

    #[test]
    fn test_variant_branching() {
        let code = "variant === 'a' || variant === 'b' || size === 'sm' || size == \"lg\"";
        assert_eq!(cva_for_variants(code).len(), 1);
        assert!(cva_for_variants("variant === 'a'").is_empty());
    }
}
