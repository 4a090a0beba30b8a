//! Accessibility rules built on opening-tag attribute pairing.

use crate::checks::{tags, tags_named};
use crate::models::rule::{Category, Example, Rule, Severity};
use crate::models::Violation;
use once_cell::sync::Lazy;
use regex::Regex;

static OUTLINE_NONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\boutline-none\b").expect("outline none"));

pub(super) const RULES: &[Rule] = &[
    Rule {
        id: "button-type",
        name: "Explicit button type",
        description: "Native buttons default to type=\"submit\" and submit surrounding forms unless a type is given.",
        category: Category::Accessibility,
        severity: Severity::Error,
        weight: 8,
        check: button_type,
        example: Example {
            bad: "<button onClick={toggle}>Toggle</button>",
            good: "<button type=\"button\" onClick={toggle}>Toggle</button>",
        },
    },
    Rule {
        id: "img-alt",
        name: "Image alternative text",
        description: "Images need an alt attribute; use alt=\"\" for decorative images.",
        category: Category::Accessibility,
        severity: Severity::Error,
        weight: 8,
        check: img_alt,
        example: Example {
            bad: "<img src={avatarUrl} />",
            good: "<img src={avatarUrl} alt={user.name} />",
        },
    },
    Rule {
        id: "icon-button-label",
        name: "Label icon-only buttons",
        description: "Icon-only buttons have no visible text, so they need an accessible name.",
        category: Category::Accessibility,
        severity: Severity::Error,
        weight: 5,
        check: icon_button_label,
        example: Example {
            bad: "<Button size=\"icon\"><XIcon /></Button>",
            good: "<Button size=\"icon\" aria-label=\"Close\"><XIcon /></Button>",
        },
    },
    Rule {
        id: "aria-expanded-controls",
        name: "Pair aria-expanded with aria-controls",
        description: "Disclosure triggers should reference the region they expand so assistive technology can follow it.",
        category: Category::Accessibility,
        severity: Severity::Warning,
        weight: 5,
        check: aria_expanded_controls,
        example: Example {
            bad: "<button type=\"button\" aria-expanded={open}>Menu</button>",
            good: "<button type=\"button\" aria-expanded={open} aria-controls={contentId}>Menu</button>",
        },
    },
    Rule {
        id: "clickable-div",
        name: "Interactive elements need roles",
        description: "Click handlers on non-interactive elements are unreachable by keyboard and invisible to screen readers without a role.",
        category: Category::Accessibility,
        severity: Severity::Error,
        weight: 5,
        check: clickable_div,
        example: Example {
            bad: "<div onClick={select}>Option</div>",
            good: "<button type=\"button\" onClick={select}>Option</button>",
        },
    },
    Rule {
        id: "focus-visible",
        name: "Keep a visible focus indicator",
        description: "Removing the outline must be paired with focus-visible styles so keyboard users can see focus.",
        category: Category::Accessibility,
        severity: Severity::Warning,
        weight: 5,
        check: focus_visible,
        example: Example {
            bad: "<button className=\"outline-none\" />",
            good: "<button className=\"outline-none focus-visible:ring-2 focus-visible:ring-ring\" />",
        },
    },
];

fn button_type(code: &str) -> Vec<Violation> {
    tags_named(code, &["button"])
        .filter(|t| !t.has_attr("type"))
        .map(|t| {
            Violation::new(
                "button-type",
                "<button> has no type attribute and defaults to submit",
            )
            .located(code, t.text)
            .with_suggestion("Add type=\"button\" (or type=\"submit\" inside forms)")
        })
        .collect()
}

fn img_alt(code: &str) -> Vec<Violation> {
    tags_named(code, &["img"])
        .filter(|t| !t.has_attr("alt"))
        .map(|t| {
            Violation::new("img-alt", "<img> has no alt attribute")
                .located(code, t.text)
                .with_suggestion("Add alt text, or alt=\"\" when the image is decorative")
        })
        .collect()
}

fn icon_button_label(code: &str) -> Vec<Violation> {
    tags_named(code, &["Button", "button"])
        .filter(|t| {
            t.attr_value("size").map_or(false, |v| v.starts_with("icon"))
                && !t.has_attr("aria-label")
                && !t.has_attr("aria-labelledby")
        })
        .map(|t| {
            Violation::new(
                "icon-button-label",
                format!("Icon-only <{}> has no accessible name", t.name),
            )
            .located(code, t.text)
            .with_suggestion("Add aria-label=\"...\" describing the action")
        })
        .collect()
}

fn aria_expanded_controls(code: &str) -> Vec<Violation> {
    tags(code)
        .filter(|t| t.has_attr("aria-expanded") && !t.has_attr("aria-controls"))
        .map(|t| {
            Violation::new(
                "aria-expanded-controls",
                format!("<{}> sets aria-expanded without aria-controls", t.name),
            )
            .located(code, t.text)
            .with_suggestion("Add aria-controls={contentId} pointing at the expanded region")
        })
        .collect()
}

fn clickable_div(code: &str) -> Vec<Violation> {
    tags_named(code, &["div", "span", "li"])
        .filter(|t| t.has_attr("onClick") && !t.has_attr("role"))
        .map(|t| {
            Violation::new(
                "clickable-div",
                format!("<{}> handles clicks but has no role", t.name),
            )
            .located(code, t.text)
            .with_suggestion(
                "Use <button type=\"button\">, or add role and tabIndex with keyboard handlers",
            )
        })
        .collect()
}

fn focus_visible(code: &str) -> Vec<Violation> {
    let Some(m) = OUTLINE_NONE.find(code) else {
        return Vec::new();
    };
    if code.contains("focus-visible:") {
        return Vec::new();
    }
    vec![Violation::new(
        "focus-visible",
        "outline-none is used without any focus-visible: styles",
    )
    .located(code, m.as_str())
    .with_suggestion("Add focus-visible:ring-2 focus-visible:ring-ring (or similar)")]
}
