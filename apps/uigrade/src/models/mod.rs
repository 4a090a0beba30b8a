//! Shared data models for grading outputs and the rule catalogue.

pub mod rule;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single rule failure with an optional location and remediation hint.
pub struct Violation {
    pub rule_id: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    pub fn new(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    /// Attach the line of the first occurrence of `needle` in `code`.
    pub fn located(mut self, code: &str, needle: &str) -> Self {
        self.line = crate::checks::line_of(code, needle);
        self
    }

    /// Attach the line containing byte `offset` of `code`.
    pub fn at_offset(mut self, code: &str, offset: usize) -> Self {
        let end = offset.min(code.len());
        self.line = Some(code[..end].matches('\n').count() + 1);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Letter band derived from a score, best first.
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
    F,
}

impl Grade {
    /// Map a 0..=100 score onto its band by descending threshold.
    pub fn from_score(score: u32) -> Self {
        match score {
            95.. => Grade::APlus,
            90..=94 => Grade::A,
            85..=89 => Grade::BPlus,
            80..=84 => Grade::B,
            75..=79 => Grade::CPlus,
            70..=74 => Grade::C,
            65..=69 => Grade::DPlus,
            60..=64 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Aggregate output of running the full catalogue against one input.
///
/// `violations` and `passes` both follow registry order.
pub struct GradeResult {
    pub score: u32,
    pub grade: Grade,
    pub violations: Vec<Violation>,
    pub passes: Vec<&'static str>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
/// Grade for one input file, plus the caller-side compliance verdict.
pub struct FileGrade {
    pub file: String,
    pub compliant: bool,
    #[serde(flatten)]
    pub result: GradeResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bands_at_boundaries() {
        let cases = [
            (100, Grade::APlus),
            (95, Grade::APlus),
            (94, Grade::A),
            (90, Grade::A),
            (89, Grade::BPlus),
            (85, Grade::BPlus),
            (84, Grade::B),
            (80, Grade::B),
            (79, Grade::CPlus),
            (75, Grade::CPlus),
            (70, Grade::C),
            (65, Grade::DPlus),
            (60, Grade::D),
            (59, Grade::F),
            (0, Grade::F),
        ];
        for (score, expected) in cases {
            assert_eq!(Grade::from_score(score), expected, "score {}", score);
        }
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        let v = serde_json::to_value(Grade::BPlus).unwrap();
        assert_eq!(v, "B+");
        assert_eq!(Grade::APlus.to_string(), "A+");
    }

    #[test]
    fn test_violation_location_and_optional_fields() {
        let code = "a\nb\nc target\n";
        let v = Violation::new("r", "msg").located(code, "target");
        assert_eq!(v.line, Some(3));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["line"], 3);
        assert!(json.get("suggestion").is_none());

        let code = "x\nx\nx";
        assert_eq!(Violation::new("r", "m").at_offset(code, 4).line, Some(3));
        assert_eq!(Violation::new("r", "m").at_offset(code, 99).line, Some(3));
    }
}
