//! Output rendering for the grade and rules commands.
//!
//! Supports `human` (default), `json`, and `markdown`. The JSON form carries
//! per-file results and a top-level summary. Colors are used only for human
//! output and are disabled by `NO_COLOR`.

use crate::error::Error;
use crate::models::rule::{Rule, Severity};
use crate::models::{FileGrade, GradeResult};
use crate::rules::{rule_by_id, rule_to_markdown, rules_to_markdown};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fmt::Write as _;

fn use_colors(output: &str) -> bool {
    output == "human" && std::env::var_os("NO_COLOR").is_none()
}

fn severity_of(rule_id: &str) -> Severity {
    rule_by_id(rule_id)
        .map(|r| r.severity)
        .unwrap_or(Severity::Info)
}

fn severity_tag(sev: Severity, color: bool) -> String {
    let (icon, label) = match sev {
        Severity::Error => ("✖", "⟦error⟧"),
        Severity::Warning => ("▲", "⟦warn⟧"),
        Severity::Info => ("◆", "⟦info⟧"),
    };
    if !color {
        return format!("{} {}", icon, label);
    }
    match sev {
        Severity::Error => format!("{} {}", icon.red(), label.red().bold()),
        Severity::Warning => format!("{} {}", icon.yellow(), label.yellow().bold()),
        Severity::Info => format!("{} {}", icon.blue(), label.blue().bold()),
    }
}

/// Print grade results in the requested format. Boundary errors are listed
/// after the results (human, markdown) or inside the document (json).
pub fn print_grades(results: &[FileGrade], output: &str, errors: &[Error]) {
    match output {
        "json" => {
            let mut out = compose_grade_json(results);
            if !errors.is_empty() {
                out["errors"] = json!(errors.iter().map(|e| e.to_string()).collect::<Vec<_>>());
            }
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
        "markdown" => {
            for (i, r) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("<!-- {} -->", r.file);
                print!("{}", grade_to_markdown(&r.result));
            }
            for e in errors {
                eprintln!("{} {}", crate::utils::error_prefix(), e);
            }
        }
        _ => {
            let color = use_colors(output);
            for r in results {
                println!("{}", human_heading(r, color));
                for v in &r.result.violations {
                    let loc = v.line.map(|l| format!(":{}", l)).unwrap_or_default();
                    println!(
                        "  {} ❲{}{}❳ {}",
                        severity_tag(severity_of(v.rule_id), color),
                        v.rule_id,
                        loc,
                        v.message
                    );
                    if let Some(s) = &v.suggestion {
                        if color {
                            println!("      {} {}", "↳".bright_black(), s.bright_black());
                        } else {
                            println!("      ↳ {}", s);
                        }
                    }
                }
                println!("  {}", r.result.summary);
            }
            for e in errors {
                eprintln!("{} {}", crate::utils::error_prefix(), e);
            }
            let summary = batch_summary_line(results);
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn human_heading(r: &FileGrade, color: bool) -> String {
    let score = format!("{}/100 ({})", r.result.score, r.result.grade);
    let verdict = if r.compliant { "compliant" } else { "below threshold" };
    if !color {
        return format!("{} {} {}", r.file, score, verdict);
    }
    let score = if r.compliant {
        score.green().bold().to_string()
    } else {
        score.red().bold().to_string()
    };
    format!("{} {} {}", r.file.bold(), score, verdict.bright_black())
}

fn batch_summary_line(results: &[FileGrade]) -> String {
    let compliant = results.iter().filter(|r| r.compliant).count();
    let mean = mean_score(results)
        .map(|m| format!("{:.1}", m))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Summary: files={} compliant={} below={} mean_score={}",
        results.len(),
        compliant,
        results.len() - compliant,
        mean
    )
}

fn mean_score(results: &[FileGrade]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let sum: u32 = results.iter().map(|r| r.result.score).sum();
    Some((sum as f64 / results.len() as f64 * 10.0).round() / 10.0)
}

/// Render one grade as a markdown report.
pub fn grade_to_markdown(result: &GradeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Component Grade: {}/100 ({})", result.score, result.grade);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "## Violations ({})", result.violations.len());
    let _ = writeln!(out);
    if result.violations.is_empty() {
        let _ = writeln!(out, "None.");
    }
    for v in &result.violations {
        let (name, sev) = match rule_by_id(v.rule_id) {
            Some(rule) => (rule.name, rule.severity),
            None => (v.rule_id, Severity::Info),
        };
        let _ = write!(out, "- **{}** (`{}`, {})", name, v.rule_id, sev);
        if let Some(line) = v.line {
            let _ = write!(out, " line {}", line);
        }
        let _ = writeln!(out, ": {}", v.message);
        if let Some(s) = &v.suggestion {
            let _ = writeln!(out, "  - Suggestion: `{}`", s);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "## Passed ({})", result.passes.len());
    let _ = writeln!(out);
    for id in &result.passes {
        let _ = writeln!(out, "- `{}`", id);
    }
    out
}

/// Compose the grade JSON document (pure) for testing/snapshot purposes.
pub fn compose_grade_json(results: &[FileGrade]) -> JsonVal {
    let compliant = results.iter().filter(|r| r.compliant).count();
    let summary = json!({
        "files": results.len(),
        "compliant": compliant,
        "below": results.len() - compliant,
        "mean_score": mean_score(results),
    });
    json!({
        "results": serde_json::to_value(results).unwrap_or(JsonVal::Null),
        "summary": summary,
    })
}

/// Print a rule listing. `full` marks an unfiltered listing, which renders the
/// whole catalogue document in markdown mode.
pub fn print_rules(rules: &[&Rule], output: &str, full: bool) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(rules)).unwrap_or_default()
        ),
        "markdown" => {
            if full {
                print!("{}", rules_to_markdown());
            } else {
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print!("{}", rule_to_markdown(rule));
                }
            }
        }
        _ => {
            let color = use_colors(output);
            for rule in rules {
                let id = if color {
                    rule.id.bold().to_string()
                } else {
                    rule.id.to_string()
                };
                println!(
                    "{} {} [{}] w={} {}",
                    severity_tag(rule.severity, color),
                    id,
                    rule.category,
                    rule.weight,
                    rule.name
                );
            }
            let summary = format!("{} rule(s)", rules.len());
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the rule listing JSON (pure).
pub fn compose_rules_json(rules: &[&Rule]) -> JsonVal {
    json!({
        "rules": serde_json::to_value(rules).unwrap_or(JsonVal::Null),
        "total_weight": rules.iter().map(|r| r.weight).sum::<u32>(),
    })
}
