//! State rules: exposing state to styling, local state, DOM access.

use crate::checks::{over_threshold, props_declarations, tags, SYSTEMIC_THRESHOLD};
use crate::models::rule::{Category, Example, Rule, Severity};
use crate::models::Violation;
use once_cell::sync::Lazy;
use regex::Regex;

static USE_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\buseState\s*(?:<[^>\n]*>)?\s*\(").expect("use state"));
static DOM_QUERY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bdocument\.(?:getElementById|querySelector(?:All)?|getElementsBy\w+)\s*\(")
        .expect("dom query")
});

/// State props and the change handler each one needs. Declarations are
/// only looked for inside `*Props` types and interfaces.
static CONTROLLED_PROPS: Lazy<Vec<(&'static str, Regex, &'static str)>> = Lazy::new(|| {
    [
        ("open", "onOpenChange"),
        ("value", "onValueChange"),
        ("checked", "onCheckedChange"),
    ]
    .into_iter()
    .map(|(prop, handler)| {
        let decl = Regex::new(&format!(r"(?m)(?:^|[{{;,])[ \t]*{}\??\s*:", prop))
            .expect("controlled prop");
        (prop, decl, handler)
    })
    .collect()
});

const STATE_ATTRS: &[&str] = &["aria-expanded", "aria-checked", "aria-selected", "aria-pressed"];

pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "data-state",
        name: "Expose state with data-state",
        description: "Elements carrying ARIA state should mirror it in data-state so styles can target open/checked states.",
        category: Category::State,
        severity: Severity::Info,
        weight: 3,
        check: data_state,
        example: Example {
            bad: "<button type=\"button\" aria-expanded={open} aria-controls={id} />",
            good: "<button type=\"button\" aria-expanded={open} aria-controls={id} data-state={open ? \"open\" : \"closed\"} />",
        },
    },
    Rule {
        id: "excessive-local-state",
        name: "Limit local state",
        description: "Many independent useState hooks in one component usually belong in a reducer or a parent.",
        category: Category::State,
        severity: Severity::Warning,
        weight: 3,
        check: excessive_local_state,
        example: Example {
            bad: "const [a, setA] = useState()\nconst [b, setB] = useState()\nconst [c, setC] = useState()\nconst [d, setD] = useState()",
            good: "const [state, dispatch] = useReducer(reducer, initialState)",
        },
    },
    Rule {
        id: "no-direct-dom",
        name: "Avoid direct DOM queries",
        description: "Querying the document bypasses React's tree; use refs instead.",
        category: Category::State,
        severity: Severity::Warning,
        weight: 5,
        check: no_direct_dom,
        example: Example {
            bad: "document.getElementById(\"menu\")?.focus()",
            good: "const menuRef = React.useRef<HTMLDivElement>(null)\nmenuRef.current?.focus()",
        },
    },
    Rule {
        id: "controlled-pair",
        name: "Pair controlled props with handlers",
        description: "An open, value, or checked prop declared in a Props type needs its matching change callback.",
        category: Category::State,
        severity: Severity::Warning,
        weight: 3,
        check: controlled_pair,
        example: Example {
            bad: "type DialogProps = { open?: boolean }",
            good: "type DialogProps = { open?: boolean; onOpenChange?: (open: boolean) => void }",
        },
    },
];

fn data_state(code: &str) -> Vec<Violation> {
    tags(code)
        .filter(|t| STATE_ATTRS.iter().any(|a| t.has_attr(a)) && !t.has_attr("data-state"))
        .map(|t| {
            Violation::new(
                "data-state",
                format!("<{}> carries ARIA state but no data-state", t.name),
            )
            .located(code, t.text)
            .with_suggestion("data-state={open ? \"open\" : \"closed\"}")
        })
        .collect()
}

fn excessive_local_state(code: &str) -> Vec<Violation> {
    over_threshold(&USE_STATE, code)
        .map(|(total, first)| {
            vec![Violation::new(
                "excessive-local-state",
                format!(
                    "{} useState hooks found (more than {})",
                    total, SYSTEMIC_THRESHOLD
                ),
            )
            .located(code, first)
            .with_suggestion("Group related state with useReducer or lift it to a parent")]
        })
        .unwrap_or_default()
}

fn no_direct_dom(code: &str) -> Vec<Violation> {
    DOM_QUERY
        .find_iter(code)
        .map(|m| {
            Violation::new(
                "no-direct-dom",
                format!("Direct DOM query via `{}`", m.as_str().trim_end_matches('(').trim_end()),
            )
            .located(code, m.as_str())
            .with_suggestion("Use a ref (React.useRef) to reach the element")
        })
        .collect()
}

fn controlled_pair(code: &str) -> Vec<Violation> {
    let decls = props_declarations(code);
    CONTROLLED_PROPS
        .iter()
        .filter(|(_, _, handler)| !code.contains(handler))
        .filter_map(|(prop, decl, handler)| {
            let (offset, m) = decls
                .iter()
                .find_map(|(offset, body)| decl.find(body).map(|m| (*offset, m)))?;
            let text = m.as_str();
            let lead = text.len() - text.trim_start_matches(['{', ';', ',']).trim_start().len();
            Some(
                Violation::new(
                    "controlled-pair",
                    format!("`{}` is declared without `{}`", prop, handler),
                )
                .at_offset(code, offset + m.start() + lead)
                .with_suggestion(format!("Add `{}?: (...) => void` next to it", handler)),
            )
        })
        .collect()
}
