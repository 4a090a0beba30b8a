//! Naming rules. Each suggestion carries the converted name.

use crate::checks::{is_kebab_case, to_kebab_case, to_pascal_case};
use crate::models::rule::{Category, Example, Rule, Severity};
use crate::models::Violation;
use once_cell::sync::Lazy;
use regex::Regex;

static LOWER_COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\bfunction\s+([a-z]\w*)\s*|\bconst\s+([a-z]\w*)\s*=\s*)\(\s*\{[^}]*\}\s*:\s*(?:React\.)?\w*Props\b",
    )
    .expect("lower component")
});
static DATA_SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-slot=["']([^"']*)["']"#).expect("data slot"));
static PROPS_TYPE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\bfunction\s+([A-Z]\w*)\s*|\bconst\s+([A-Z]\w*)\s*=\s*)\(\s*\{[^}]*\}\s*:\s*([A-Z]\w*)\s*[)<]",
    )
    .expect("props type ref")
});
static FUNCTION_PROP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|[{;,])[ \t]*(\w+)\??\s*:\s*\([^)\n]*\)\s*=>").expect("function prop")
});

pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "component-pascal-case",
        name: "PascalCase components",
        description: "JSX treats lower-case tags as DOM elements, so components must be PascalCase.",
        category: Category::Naming,
        severity: Severity::Error,
        weight: 5,
        check: component_pascal_case,
        example: Example {
            bad: "function cardHeader({ className, ...props }: CardHeaderProps) {}",
            good: "function CardHeader({ className, ...props }: CardHeaderProps) {}",
        },
    },
    Rule {
        id: "data-slot-kebab",
        name: "kebab-case data-slot values",
        description: "data-slot values are CSS selector hooks and follow the kebab-case convention.",
        category: Category::Naming,
        severity: Severity::Warning,
        weight: 3,
        check: data_slot_kebab,
        example: Example {
            bad: "<div data-slot=\"cardHeader\" />",
            good: "<div data-slot=\"card-header\" />",
        },
    },
    Rule {
        id: "props-suffix",
        name: "Props type suffix",
        description: "A component's props type is named after the component with a Props suffix.",
        category: Category::Naming,
        severity: Severity::Info,
        weight: 2,
        check: props_suffix,
        example: Example {
            bad: "function Card({ className }: CardOptions) {}",
            good: "function Card({ className }: CardProps) {}",
        },
    },
    Rule {
        id: "handler-prefix",
        name: "on-prefixed callback props",
        description: "Callback props are named onSomething; handleSomething is reserved for the implementation side.",
        category: Category::Naming,
        severity: Severity::Info,
        weight: 2,
        check: handler_prefix,
        example: Example {
            bad: "type TabsProps = { handleChange?: (value: string) => void }",
            good: "type TabsProps = { onValueChange?: (value: string) => void }",
        },
    },
];

fn component_pascal_case(code: &str) -> Vec<Violation> {
    LOWER_COMPONENT
        .captures_iter(code)
        .filter_map(|caps| {
            let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
            let fixed = to_pascal_case(name);
            Some(
                Violation::new(
                    "component-pascal-case",
                    format!("Component `{}` is not PascalCase", name),
                )
                .located(code, caps.get(0)?.as_str())
                .with_suggestion(format!("Rename to `{}`", fixed)),
            )
        })
        .collect()
}

fn data_slot_kebab(code: &str) -> Vec<Violation> {
    DATA_SLOT
        .captures_iter(code)
        .filter(|caps| !is_kebab_case(&caps[1]))
        .map(|caps| {
            let fixed = to_kebab_case(&caps[1]);
            Violation::new(
                "data-slot-kebab",
                format!("data-slot value `{}` is not kebab-case", &caps[1]),
            )
            .located(code, &caps[0])
            .with_suggestion(format!("data-slot=\"{}\"", fixed))
        })
        .collect()
}

fn props_suffix(code: &str) -> Vec<Violation> {
    PROPS_TYPE_REF
        .captures_iter(code)
        .filter_map(|caps| {
            let component = caps.get(1).or_else(|| caps.get(2))?.as_str();
            let ty = caps.get(3)?.as_str();
            if ty.ends_with("Props") {
                return None;
            }
            Some(
                Violation::new(
                    "props-suffix",
                    format!("Props type `{}` of `{}` does not end in Props", ty, component),
                )
                .located(code, caps.get(0)?.as_str())
                .with_suggestion(format!("Rename to `{}Props`", component)),
            )
        })
        .collect()
}

/// `handleClick` and `clickHandler` both become `onClick`.
fn on_prefixed(name: &str) -> Option<String> {
    let stem = match name.strip_prefix("handle") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest,
        _ => name.strip_suffix("Handler").filter(|s| !s.is_empty())?,
    };
    Some(format!("on{}", to_pascal_case(stem)))
}

fn handler_prefix(code: &str) -> Vec<Violation> {
    FUNCTION_PROP
        .captures_iter(code)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let fixed = on_prefixed(name)?;
            Some(
                Violation::new(
                    "handler-prefix",
                    format!("Callback prop `{}` should use the on prefix", name),
                )
                .located(
                    code,
                    caps.get(0)?.as_str().trim_start_matches(['{', ';', ',']).trim_start(),
                )
                .with_suggestion(format!("Rename to `{}`", fixed)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_pascal_case_suggests_conversion() {
        let code = "function cardHeader({ className }: CardHeaderProps) {}\nexport function cn(...inputs: ClassValue[]) {}";
        let v = component_pascal_case(code);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].suggestion.as_deref(), Some("Rename to `CardHeader`"));
        let arrow = "const menu_item = ({ a }: React.ComponentProps<'li'>) => null";
        let v = component_pascal_case(arrow);
        assert_eq!(v[0].suggestion.as_deref(), Some("Rename to `MenuItem`"));
    }

    #[test]
    fn test_data_slot_kebab() {
        let code = "<div data-slot=\"card-header\" />\n<div data-slot=\"cardTitle\" />\n<p data-slot='card_footer' />";
        let v = data_slot_kebab(code);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].suggestion.as_deref(), Some("data-slot=\"card-title\""));
        assert_eq!(v[0].line, Some(2));
        assert_eq!(v[1].suggestion.as_deref(), Some("data-slot=\"card-footer\""));
    }

    #[test]
    fn test_props_suffix() {
        let code = "function Card({ a }: CardOptions) {}\nfunction Row({ a }: RowProps) {}\nfunction Cell({ a }: React.ComponentProps<'td'>) {}";
        let v = props_suffix(code);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].suggestion.as_deref(), Some("Rename to `CardProps`"));
    }

    #[test]
    fn test_on_prefixed() {
        assert_eq!(on_prefixed("handleClick").as_deref(), Some("onClick"));
        assert_eq!(on_prefixed("clickHandler").as_deref(), Some("onClick"));
        assert_eq!(on_prefixed("onClick"), None);
        assert_eq!(on_prefixed("handler"), None);
        assert_eq!(on_prefixed("Handler"), None);
        assert_eq!(on_prefixed("render"), None);
    }

    #[test]
    fn test_handler_prefix() {
        let code = "type P = {\n  handleChange?: (v: string) => void\n  onOpenChange?: (o: boolean) => void\n  renderItem: (i: Item) => ReactNode\n}";
        let v = handler_prefix(code);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].line, Some(2));
        assert_eq!(v[0].suggestion.as_deref(), Some("Rename to `onChange`"));

        let inline = handler_prefix("type T = { a: string; clickHandler: () => void }");
        assert_eq!(inline.len(), 1);
        assert_eq!(inline[0].suggestion.as_deref(), Some("Rename to `onClick`"));
    }
}
