//! Grading pass: run the catalogue against source text and score it.
//!
//! `grade` is pure and synchronous. Every rule in the registry is run, a rule
//! with any violation forfeits its whole weight, and the remaining share of
//! the total weight becomes the 0..=100 score.
//!
//! `grade_sources` and `grade_files` fan out over rayon and keep input order,
//! so batch output does not depend on scheduling.

use crate::error::Error;
use crate::models::rule::Severity;
use crate::models::{FileGrade, Grade, GradeResult};
use crate::rules::{all_rules, rule_by_id, total_weight};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Grade one piece of component source text.
pub fn grade(code: &str) -> GradeResult {
    let total = total_weight();
    let mut violations = Vec::new();
    let mut passes = Vec::new();
    let mut lost_points: u32 = 0;

    for rule in all_rules() {
        let found = rule.run(code);
        if found.is_empty() {
            passes.push(rule.id);
        } else {
            log::trace!("{} fired {} time(s)", rule.id, found.len());
            lost_points += rule.weight;
            violations.extend(found);
        }
    }

    let score = score_of(total, lost_points);
    let grade = Grade::from_score(score);

    let mut errors = 0usize;
    let mut warnings = 0usize;
    for v in &violations {
        match rule_by_id(v.rule_id).map(|r| r.severity) {
            Some(Severity::Error) => errors += 1,
            Some(Severity::Warning) => warnings += 1,
            _ => {}
        }
    }
    let summary = format!(
        "Score: {}/100 ({}) - {} rules passed, {} errors, {} warnings",
        score,
        grade,
        passes.len(),
        errors,
        warnings
    );
    log::debug!("{}", summary);

    GradeResult {
        score,
        grade,
        violations,
        passes,
        summary,
    }
}

fn score_of(total: u32, lost: u32) -> u32 {
    if total == 0 {
        return 100;
    }
    let kept = total.saturating_sub(lost) as f64;
    (kept / total as f64 * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Grade labelled sources in parallel. Output order follows input order.
pub fn grade_sources(sources: &[(String, String)], threshold: u32) -> Vec<FileGrade> {
    sources
        .par_iter()
        .map(|(label, code)| file_grade(label.clone(), code, threshold))
        .collect()
}

/// Read and grade files in parallel.
///
/// Unreadable files are reported as errors without hiding the others. Both
/// vectors follow input order. `file` labels are relative to `root` when
/// possible.
pub fn grade_files(root: &Path, paths: &[PathBuf], threshold: u32) -> (Vec<FileGrade>, Vec<Error>) {
    let per_file: Vec<Result<FileGrade, Error>> = paths
        .par_iter()
        .map(|path| {
            let label = display_path(root, path);
            let code = fs::read_to_string(path).map_err(|source| Error::Read {
                path: label.clone(),
                source,
            })?;
            Ok(file_grade(label, &code, threshold))
        })
        .collect();

    let mut grades = Vec::with_capacity(per_file.len());
    let mut errors = Vec::new();
    for item in per_file {
        match item {
            Ok(g) => grades.push(g),
            Err(e) => {
                log::warn!("{}", e);
                errors.push(e);
            }
        }
    }
    (grades, errors)
}

fn file_grade(file: String, code: &str, threshold: u32) -> FileGrade {
    let result = grade(code);
    FileGrade {
        compliant: result.score >= threshold,
        file,
        result,
    }
}

fn display_path(root: &Path, path: &Path) -> String {
    let rel = if path.is_absolute() {
        pathdiff::diff_paths(path, root).filter(|p| !p.starts_with(".."))
    } else {
        None
    };
    rel.as_deref()
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
