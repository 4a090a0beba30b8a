//! Type-level rules: prop type shape, exports, and `any`.

use crate::checks::declaration_span;
use crate::models::rule::{Category, Example, Rule, Severity};
use crate::models::Violation;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static PROPS_ALIAS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\btype\s+(\w*Props)\s*(?:<[^>=\n]*>)?\s*=").expect("props alias")
});
static PROPS_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\binterface\s+(\w*Props)\b([^{]*)\{").expect("props interface"));
static HTML_PROPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:ComponentProps(?:WithoutRef|WithRef)?|\w*HTMLAttributes|HTMLProps)\s*<")
        .expect("html props")
});
static PROPS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(export\s+)?(?:declare\s+)?(?:type|interface)\s+(\w*Props)\b")
        .expect("props decl")
});
static EXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexport\s+(?:type\s+)?\{([^}]*)\}").expect("export list"));
static ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*any\b|\bas\s+any\b|<any>|\bany\[\]").expect("any"));
static CVA_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcva\s*\(").expect("cva call"));
static VARIANT_PROPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bVariantProps\s*<").expect("variant props"));

pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "extend-html-props",
        name: "Extend native element props",
        description: "Component prop types should extend the props of the element they render so every native attribute is accepted.",
        category: Category::Types,
        severity: Severity::Error,
        weight: 10,
        check: extend_html_props,
        example: Example {
            bad: "type CardProps = { variant?: string }",
            good: "type CardProps = React.ComponentProps<\"div\"> & { variant?: string }",
        },
    },
    Rule {
        id: "export-prop-types",
        name: "Export prop types",
        description: "Prop types should be exported so consumers can compose and wrap the component.",
        category: Category::Types,
        severity: Severity::Warning,
        weight: 5,
        check: export_prop_types,
        example: Example {
            bad: "type CardProps = React.ComponentProps<\"div\">",
            good: "export type CardProps = React.ComponentProps<\"div\">",
        },
    },
    Rule {
        id: "no-any",
        name: "Avoid any",
        description: "`any` disables type checking for everything it touches.",
        category: Category::Types,
        severity: Severity::Warning,
        weight: 5,
        check: no_any,
        example: Example {
            bad: "function Item({ data }: { data: any }) {}",
            good: "function Item({ data }: { data: ItemData }) {}",
        },
    },
    Rule {
        id: "cva-variant-props",
        name: "Derive variant props from cva",
        description: "When variants are declared with cva, their prop types should come from VariantProps instead of being restated by hand.",
        category: Category::Types,
        severity: Severity::Info,
        weight: 3,
        check: cva_variant_props,
        example: Example {
            bad: "const buttonVariants = cva(\"...\")\ntype ButtonProps = { variant?: \"default\" | \"ghost\" }",
            good: "const buttonVariants = cva(\"...\")\ntype ButtonProps = React.ComponentProps<\"button\"> & VariantProps<typeof buttonVariants>",
        },
    },
];

fn extend_html_props(code: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    for caps in PROPS_ALIAS.captures_iter(code) {
        let Some(head) = caps.get(0) else {
            continue;
        };
        let name = &caps[1];
        let rhs = declaration_span(code, head.end()).trim();
        if rhs.starts_with("VariantProps") || HTML_PROPS.is_match(rhs) {
            continue;
        }
        out.push(
            Violation::new(
                "extend-html-props",
                format!("`{}` does not extend native element props", name),
            )
            .located(code, head.as_str())
            .with_suggestion(format!(
                "type {} = React.ComponentProps<\"div\"> & {{ ... }}",
                name
            )),
        );
    }
    for caps in PROPS_INTERFACE.captures_iter(code) {
        let name = &caps[1];
        let heritage = &caps[2];
        if heritage.contains("extends") && HTML_PROPS.is_match(heritage) {
            continue;
        }
        out.push(
            Violation::new(
                "extend-html-props",
                format!("`{}` does not extend native element props", name),
            )
            .located(code, &caps[0])
            .with_suggestion(format!(
                "interface {} extends React.ComponentProps<\"div\"> {{ ... }}",
                name
            )),
        );
    }
    out
}

fn export_prop_types(code: &str) -> Vec<Violation> {
    let listed: HashSet<&str> = EXPORT_LIST
        .captures_iter(code)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| m.as_str().split(','))
        .filter_map(|item| {
            let item = item.trim();
            let item = item.strip_prefix("type ").unwrap_or(item).trim_start();
            item.split_whitespace().next()
        })
        .collect();

    PROPS_DECL
        .captures_iter(code)
        .filter(|caps| caps.get(1).is_none() && !listed.contains(&caps[2]))
        .map(|caps| {
            let decl = caps[0].trim();
            Violation::new(
                "export-prop-types",
                format!("`{}` is not exported", &caps[2]),
            )
            .located(code, decl)
            .with_suggestion(format!("export {}", decl))
        })
        .collect()
}

fn no_any(code: &str) -> Vec<Violation> {
    let mut found = ANY.find_iter(code);
    let Some(first) = found.next() else {
        return Vec::new();
    };
    let total = 1 + found.count();
    vec![Violation::new(
        "no-any",
        format!("`any` is used {} time(s)", total),
    )
    .located(code, first.as_str())
    .with_suggestion("Use a precise type, a generic parameter, or `unknown`")]
}

fn cva_variant_props(code: &str) -> Vec<Violation> {
    let Some(call) = CVA_CALL.find(code) else {
        return Vec::new();
    };
    if VARIANT_PROPS.is_match(code) {
        return Vec::new();
    }
    vec![Violation::new(
        "cva-variant-props",
        "Variants are declared with cva but prop types do not use VariantProps",
    )
    .located(code, call.as_str())
    .with_suggestion("type Props = React.ComponentProps<\"button\"> & VariantProps<typeof variants>")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object_props_alias_fires() {
        let v = extend_html_props("type FooProps = { variant?: string }");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rule_id, "extend-html-props");
        assert_eq!(v[0].line, Some(1));
        assert!(v[0].suggestion.as_deref().unwrap().contains("FooProps"));
    }

    #[test]
    fn test_component_props_alias_passes() {
        let code = "export type FooProps = React.ComponentProps<'div'> & { variant?: string }";
        assert!(extend_html_props(code).is_empty());
        assert!(export_prop_types(code).is_empty());
    }

    #[test]
    fn test_multiline_alias_and_html_attributes_pass() {
        let code = "type BarProps =\n  React.ButtonHTMLAttributes<HTMLButtonElement> & {\n  x: 1\n}";
        assert!(extend_html_props(code).is_empty());
    }

    #[test]
    fn test_intersection_order_does_not_matter() {
        let object_first = "export type FooProps = {\n  variant?: string\n} & React.ComponentProps<'div'>";
        assert!(extend_html_props(object_first).is_empty());
        let html_first = "export type FooProps = React.ComponentProps<'div'> & {\n  variant?: string\n}";
        assert!(extend_html_props(html_first).is_empty());
        let semicolons = "type FooProps = {\n  a: string;\n  b: number;\n} & React.HTMLAttributes<HTMLDivElement>;";
        assert!(extend_html_props(semicolons).is_empty());
    }

    #[test]
    fn test_alias_span_ends_at_next_statement() {
        let code = "type FooProps = {\n  variant?: string\n}\nconst x: React.ComponentProps<'div'> = {}";
        let v = extend_html_props(code);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].line, Some(1));
    }

    #[test]
    fn test_interface_without_extends_fires() {
        let code = "interface CardProps {\n  title: string\n}\ninterface RowProps extends React.ComponentPropsWithoutRef<'tr'> {}";
        let v = extend_html_props(code);
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("CardProps"));
    }

    #[test]
    fn test_variant_props_alias_is_ignored() {
        assert!(extend_html_props("type ButtonVariantProps = VariantProps<typeof b>").is_empty());
    }

    #[test]
    fn test_unexported_props_fire_unless_listed() {
        let code = "type AProps = {}\ninterface BProps {}\ntype CProps = {}\nexport type { CProps }";
        let v = export_prop_types(code);
        let names: Vec<_> = v.iter().map(|x| x.message.as_str()).collect();
        assert_eq!(names, vec!["`AProps` is not exported", "`BProps` is not exported"]);
        assert_eq!(v[1].line, Some(2));
    }

    #[test]
    fn test_no_any_reports_once_with_count() {
        let code = "let a: any\nconst b = c as any\nconst d: any[] = []";
        let v = no_any(code);
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("3 time(s)"));
        assert_eq!(v[0].line, Some(1));
        assert!(no_any("const company = 1").is_empty());
    }

    #[test]
    fn test_cva_without_variant_props() {
        assert_eq!(cva_variant_props("const v = cva('a')").len(), 1);
        assert!(cva_variant_props("const v = cva('a')\ntype P = VariantProps<typeof v>").is_empty());
        assert!(cva_variant_props("").is_empty());
    }
}
