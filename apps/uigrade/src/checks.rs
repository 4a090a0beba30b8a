//! Detector toolkit shared by every rule.
//!
//! The catalogue reuses a handful of matching shapes rather than bespoke
//! parsers:
//! - presence/absence of a trigger pattern and its companion,
//! - frequency counts compared with `SYSTEMIC_THRESHOLD`,
//! - argument ordering inside a call, via a one-level balanced scan,
//! - attribute pairing inside a single opening tag,
//! - casing checks with automatic conversion for suggestions.
//!
//! All matching is either `regex` (finite automata, linear in input) or a
//! single forward pass over the text, so adversarial input cannot blow up.

use once_cell::sync::Lazy;
use regex::Regex;

/// Counts above this value are treated as systemic rather than occasional.
pub const SYSTEMIC_THRESHOLD: usize = 3;

/// Opening JSX/HTML tag: name, then attributes. Quoted strings and brace
/// expressions are skipped so `>` inside them does not end the span.
///
/// Brace expressions may nest three levels deep, enough for an inline
/// handler with a block body containing one more block. A tag with deeper
/// nesting does not match at all and is invisible to attribute rules.
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<([A-Za-z][\w.]*)((?:"[^"]*"|'[^']*'|\{(?:[^{}]|\{(?:[^{}]|\{[^{}]*\})*\})*\}|[^<>{"'])*)>"#,
    )
    .expect("tag pattern")
});

/// Start of a `*Props` type alias (through `=`) or interface (through its name).
static PROPS_DECL_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:type\s+\w*Props\b\s*(?:<[^>=\n]*>)?\s*=|interface\s+\w*Props\b)")
        .expect("props decl head")
});

/// Words that open a new top-level statement.
const DECL_KEYWORDS: &[&str] = &[
    "export ", "type ", "interface ", "function ", "const ", "let ", "var ", "import ",
    "class ", "enum ", "declare ", "return ",
];

/// 1-based line of the first occurrence of `needle` in `code`.
///
/// Repeated substrings always resolve to the first occurrence.
pub fn line_of(code: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    code.find(needle)
        .map(|idx| code[..idx].matches('\n').count() + 1)
}

/// When `re` matches more than `SYSTEMIC_THRESHOLD` times, return the count
/// and the first matched text.
pub fn over_threshold<'a>(re: &Regex, code: &'a str) -> Option<(usize, &'a str)> {
    let mut matches = re.find_iter(code);
    let first = matches.next()?;
    let total = 1 + matches.count();
    (total > SYSTEMIC_THRESHOLD).then_some((total, first.as_str()))
}

/// Text from `start` to the end of the declaration it sits in.
///
/// The span ends at a `;` outside brackets, or at a newline outside brackets
/// followed by a blank line or a line opening another statement. Braces,
/// parentheses and square brackets are balanced so object types and
/// function types spanning several lines stay inside the span.
pub fn declaration_span(code: &str, start: usize) -> &str {
    let rest = &code[start..];
    let mut depth = 0usize;
    for (idx, c) in rest.char_indices() {
        match c {
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => return &rest[..idx],
            '\n' if depth == 0 => {
                let next = rest[idx + 1..].lines().next().unwrap_or("").trim_start();
                if next.is_empty() || DECL_KEYWORDS.iter().any(|k| next.starts_with(k)) {
                    return &rest[..idx];
                }
            }
            _ => {}
        }
    }
    rest
}

/// Every `*Props` type alias or interface, with its byte offset in `code`.
pub fn props_declarations(code: &str) -> Vec<(usize, &str)> {
    PROPS_DECL_HEAD
        .find_iter(code)
        .map(|m| {
            let body = declaration_span(code, m.end());
            (m.start(), &code[m.start()..m.end() + body.len()])
        })
        .collect()
}

/// An opening tag located in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
    pub text: &'a str,
}

impl<'a> Tag<'a> {
    pub fn has_attr(&self, attr: &str) -> bool {
        has_attr(self.attrs, attr)
    }

    pub fn attr_value(&self, attr: &str) -> Option<&'a str> {
        attr_value(self.attrs, attr)
    }
}

/// Every opening (or self-closing) tag in source order.
pub fn tags(code: &str) -> impl Iterator<Item = Tag<'_>> + '_ {
    TAG.captures_iter(code).filter_map(|caps| {
        Some(Tag {
            name: caps.get(1)?.as_str(),
            attrs: caps.get(2).map(|m| m.as_str()).unwrap_or(""),
            text: caps.get(0)?.as_str(),
        })
    })
}

/// Opening tags whose name is one of `names`.
pub fn tags_named<'a>(code: &'a str, names: &'a [&'a str]) -> impl Iterator<Item = Tag<'a>> + 'a {
    tags(code).filter(move |t| names.contains(&t.name))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn is_attr_char(c: char) -> bool {
    is_ident_char(c) || c == '-' || c == ':'
}

/// Byte offset right after `attr=` (whitespace allowed around `=`).
fn attr_offset(attrs: &str, attr: &str) -> Option<usize> {
    for (idx, _) in attrs.match_indices(attr) {
        let before_ok = attrs[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace());
        if !before_ok {
            continue;
        }
        let after = &attrs[idx + attr.len()..];
        if after.chars().next().map_or(false, is_attr_char) {
            continue;
        }
        let trimmed = after.trim_start();
        if let Some(rest) = trimmed.strip_prefix('=') {
            return Some(attrs.len() - rest.len());
        }
    }
    None
}

/// Whether the attribute span assigns `attr`.
pub fn has_attr(attrs: &str, attr: &str) -> bool {
    attr_offset(attrs, attr).is_some()
}

/// Raw value assigned to `attr`, with quotes and a single brace/quote
/// wrapping removed: `size="icon"` and `size={'icon'}` both yield `icon`.
pub fn attr_value<'a>(attrs: &'a str, attr: &str) -> Option<&'a str> {
    let start = attr_offset(attrs, attr)?;
    let rest = attrs[start..].trim_start();
    let inner = if let Some(body) = rest.strip_prefix('{') {
        body.split('}').next()?.trim()
    } else {
        rest
    };
    let mut chars = inner.chars();
    match chars.next()? {
        q @ ('"' | '\'' | '`') => chars.as_str().split(q).next(),
        _ => inner
            .split(|c: char| c.is_whitespace() || c == '/')
            .next(),
    }
}

/// One call expression found by `calls`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// Full text from the callee name through the closing parenthesis.
    pub text: &'a str,
    pub args: Vec<&'a str>,
}

/// Locate `callee(...)` calls and split their top-level arguments.
///
/// Arguments may contain one nested level of parentheses; deeper calls are
/// skipped rather than parsed. Commas inside strings, braces and brackets
/// do not split arguments.
pub fn calls<'a>(code: &'a str, callee: &str) -> Vec<Call<'a>> {
    let mut out = Vec::new();
    for (start, _) in code.match_indices(callee) {
        if code[..start].chars().next_back().map_or(false, is_ident_char) {
            continue;
        }
        let after = &code[start + callee.len()..];
        let open_rel = after.len() - after.trim_start().len();
        if !after[open_rel..].starts_with('(') {
            continue;
        }
        let body_start = start + callee.len() + open_rel + 1;
        if let Some(call) = scan_call(code, start, body_start) {
            out.push(call);
        }
    }
    out
}

fn scan_call(code: &str, start: usize, body_start: usize) -> Option<Call<'_>> {
    let mut args = Vec::new();
    let mut parens = 0usize;
    let mut nesting = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut arg_start = body_start;

    for (rel, c) in code[body_start..].char_indices() {
        let idx = body_start + rel;
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' => {
                parens += 1;
                if parens > 1 {
                    return None;
                }
            }
            ')' if parens == 0 => {
                push_arg(&mut args, &code[arg_start..idx]);
                return Some(Call {
                    text: &code[start..=idx],
                    args,
                });
            }
            ')' => parens -= 1,
            '{' | '[' => nesting += 1,
            '}' | ']' => nesting = nesting.saturating_sub(1),
            ',' if parens == 0 && nesting == 0 => {
                push_arg(&mut args, &code[arg_start..idx]);
                arg_start = idx + 1;
            }
            _ => {}
        }
    }
    None
}

fn push_arg<'a>(args: &mut Vec<&'a str>, raw: &'a str) {
    let arg = raw.trim();
    if !arg.is_empty() {
        args.push(arg);
    }
}

/// Role of a class-merging argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// A plain string literal: base styles.
    Literal,
    /// Conditional or computed expression.
    Computed,
    /// The caller-supplied `className`, which must win.
    Override,
}

pub fn classify_arg(arg: &str) -> ArgKind {
    let arg = arg.trim();
    if arg == "className" || arg == "props.className" {
        return ArgKind::Override;
    }
    let mut chars = arg.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if matches!(first, '"' | '\'' | '`') && first == last {
            let inner = chars.as_str();
            let interpolated = first == '`' && inner.contains("${");
            if !inner.contains(first) && !interpolated {
                return ArgKind::Literal;
            }
        }
    }
    ArgKind::Computed
}

/// Lower-case words joined by single hyphens, e.g. `dialog-content`.
pub fn is_kebab_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// `DialogContent`, `dialog_content` and `dialogContent` all become
/// `dialog-content`.
pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        } else if c.is_uppercase() {
            let boundary = prev.map_or(false, |p| p.is_lowercase() || p.is_ascii_digit());
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out.trim_end_matches('-').to_string()
}

/// `dialog-content`, `dialog_content` and `dialogContent` all become
/// `DialogContent`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_of_counts_newlines_before_first_occurrence() {
        let code = "one\ntwo\nneedle\nneedle\n";
        assert_eq!(line_of(code, "needle"), Some(3));
        assert_eq!(line_of(code, "one"), Some(1));
        assert_eq!(line_of(code, "missing"), None);
        assert_eq!(line_of(code, ""), None);
    }

    #[test]
    fn test_over_threshold_fires_only_above_three() {
        let re = Regex::new(r"x").unwrap();
        assert_eq!(over_threshold(&re, "x x x"), None);
        assert_eq!(over_threshold(&re, "x x x x"), Some((4, "x")));
        assert_eq!(over_threshold(&re, ""), None);
    }

    #[test]
    fn test_tags_skip_arrow_functions_and_quoted_gt() {
        let code = r#"<button className="[&>svg]:size-4" onClick={() => setOpen(!open)} type="button">x</button>"#;
        let found: Vec<_> = tags(code).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "button");
        assert!(found[0].has_attr("type"));
        assert!(found[0].has_attr("onClick"));
        assert!(!found[0].has_attr("role"));
    }

    #[test]
    fn test_tags_handle_double_brace_style() {
        let code = r#"<div style={{ color: "red" }} role="button" onClick={go}>"#;
        let t = tags(code).next().unwrap();
        assert_eq!(t.name, "div");
        assert!(t.has_attr("role"));
    }

    #[test]
    fn test_tags_allow_block_bodied_handlers() {
        let code = "<button onClick={() => { if (a) { b() } }}>x</button>";
        let found: Vec<_> = tags(code).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "button");
        assert!(found[0].has_attr("onClick"));
        assert!(!found[0].has_attr("type"));

        // One level past the supported depth: the tag is not seen.
        let deeper = "<button onClick={() => { if (a) { if (b) { c() } } }}>x</button>";
        assert_eq!(tags(deeper).count(), 0);
    }

    #[test]
    fn test_declaration_span_stops_at_statement_boundaries() {
        let code = "type A = {\n  x: string;\n  y: number\n} & Base\nconst z = 1";
        let start = code.find('=').unwrap() + 1;
        assert_eq!(
            declaration_span(code, start),
            " {\n  x: string;\n  y: number\n} & Base"
        );

        let code = "type B = C; const d = 1";
        assert_eq!(declaration_span(code, 8), " C");

        let code = "type E =\n  F & G\n\nfunction h() {}";
        assert_eq!(declaration_span(code, 8), "\n  F & G");
    }

    #[test]
    fn test_props_declarations_cover_aliases_and_interfaces() {
        let code = "const s = useState({ open: false })\ninterface DialogProps {\n  open?: boolean\n}\nexport type RowProps = { value: string }\nfunction Row() {}";
        let found = props_declarations(code);
        assert_eq!(found.len(), 2);
        assert!(found[0].1.starts_with("interface DialogProps"));
        assert!(found[0].1.ends_with('}'));
        assert_eq!(found[1].1, "type RowProps = { value: string }");
        assert_eq!(&code[found[1].0..found[1].0 + 4], "type");
    }

    #[test]
    fn test_has_attr_requires_assignment_and_whole_name() {
        assert!(has_attr(r#" aria-expanded={open}"#, "aria-expanded"));
        assert!(!has_attr(r#" aria-expanded-x={open}"#, "aria-expanded"));
        assert!(!has_attr(r#" className="a type b""#, "type"));
        assert!(!has_attr(r#" data-type="x""#, "type"));
    }

    #[test]
    fn test_attr_value_unwraps_quotes_and_braces() {
        assert_eq!(attr_value(r#" size="icon""#, "size"), Some("icon"));
        assert_eq!(attr_value(r#" size={'icon'}"#, "size"), Some("icon"));
        assert_eq!(attr_value(r#" size={size}"#, "size"), Some("size"));
        assert_eq!(attr_value(r#" variant="x""#, "size"), None);
    }

    #[test]
    fn test_calls_split_top_level_arguments() {
        let code = r#"const c = cn("a b", isOn && "on", { x: y, z: w }, className)"#;
        let found = calls(code, "cn");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].args,
            vec![r#""a b""#, r#"isOn && "on""#, "{ x: y, z: w }", "className"]
        );
        assert!(found[0].text.starts_with("cn("));
        assert!(found[0].text.ends_with("className)"));
    }

    #[test]
    fn test_calls_allow_one_nested_level_only() {
        assert_eq!(calls("cn('a', f(x))", "cn").len(), 1);
        assert!(calls("cn('a', f(g(x)))", "cn").is_empty());
        assert!(calls("cn('unterminated'", "cn").is_empty());
    }

    #[test]
    fn test_calls_ignore_longer_identifiers_and_quoted_commas() {
        assert!(calls("clsxcn('a')", "cn").is_empty());
        let found = calls("cn('a, b', \"c(\")", "cn");
        assert_eq!(found[0].args, vec!["'a, b'", "\"c(\""]);
    }

    #[test]
    fn test_classify_arg() {
        assert_eq!(classify_arg("'base'"), ArgKind::Literal);
        assert_eq!(classify_arg("\"px-2 py-1\""), ArgKind::Literal);
        assert_eq!(classify_arg("`static`"), ArgKind::Literal);
        assert_eq!(classify_arg("`a-${b}`"), ArgKind::Computed);
        assert_eq!(classify_arg("'a' + b + 'c'"), ArgKind::Computed);
        assert_eq!(classify_arg("isActive && 'active'"), ArgKind::Computed);
        assert_eq!(classify_arg("className"), ArgKind::Override);
        assert_eq!(classify_arg("props.className"), ArgKind::Override);
    }

    #[test]
    fn test_case_conversion() {
        assert!(is_kebab_case("dialog-content"));
        assert!(is_kebab_case("h2"));
        assert!(!is_kebab_case("dialogContent"));
        assert!(!is_kebab_case("dialog_content"));
        assert!(!is_kebab_case("-x"));
        assert!(!is_kebab_case(""));
        assert_eq!(to_kebab_case("DialogContent"), "dialog-content");
        assert_eq!(to_kebab_case("dialog_content"), "dialog-content");
        assert_eq!(to_kebab_case("menuItem2Label"), "menu-item2-label");
        assert_eq!(to_pascal_case("dialog-content"), "DialogContent");
        assert_eq!(to_pascal_case("buttonGroup"), "ButtonGroup");
        assert_eq!(to_pascal_case("card_header"), "CardHeader");
    }
}
