//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "uigrade",
    version,
    about = "Grade UI component source against a weighted rule catalogue",
    long_about = "uigrade scores React/TSX component files from 0 to 100 against a fixed catalogue of typing, styling, accessibility, composition, state and naming rules.\n\nConfiguration precedence: CLI > uigrade.toml > defaults.",
    after_help = "Examples:\n  uigrade grade components/ui/button.tsx\n  uigrade grade --output json --threshold 90\n  cat card.tsx | uigrade grade -\n  uigrade rules --category accessibility",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current uigrade version.")]
    Version,
    /// Grade component files
    #[command(
        about = "Grade component files",
        long_about = "Run every rule against each input and print its score, grade, and violations. Files scoring below the threshold make the command exit 1.",
        after_help = "Examples:\n  uigrade grade components/ui/*.tsx\n  uigrade grade --output markdown card.tsx\n  uigrade grade - < card.tsx"
    )]
    Grade {
        #[arg(help = "Files to grade; '-' reads stdin (default: include patterns from config)")]
        paths: Vec<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, value_parser = ["human", "json", "markdown"], help = "Output mode: human|json|markdown (default: human)")]
        output: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100), help = "Minimum score counted as compliant, 0-100 (default: 80)")]
        threshold: Option<u32>,
    },
    /// List rules
    #[command(
        about = "List rules",
        long_about = "List the rule catalogue, optionally filtered by category, id, or a search term.",
        after_help = "Examples:\n  uigrade rules\n  uigrade rules --category naming --output json\n  uigrade rules --search aria --output markdown"
    )]
    Rules {
        #[arg(long, help = "Category: types|styling|accessibility|composition|state|naming")]
        category: Option<String>,
        #[arg(long, help = "Exact rule id")]
        id: Option<String>,
        #[arg(long, help = "Case-insensitive search over id, name and description")]
        search: Option<String>,
        #[arg(long, value_parser = ["human", "json", "markdown"], help = "Output mode: human|json|markdown (default: human)")]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade_with_stdin_and_flags() {
        let cli = Cli::try_parse_from([
            "uigrade", "grade", "-", "a.tsx", "--output", "json", "--threshold", "90",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Grade {
                paths,
                output,
                threshold,
                repo_root,
            } => {
                assert_eq!(paths, vec!["-", "a.tsx"]);
                assert_eq!(output.as_deref(), Some("json"));
                assert_eq!(threshold, Some(90));
                assert!(repo_root.is_none());
            }
            _ => panic!("expected grade"),
        }
    }

    #[test]
    fn test_rejects_out_of_range_threshold_and_unknown_output() {
        assert!(Cli::try_parse_from(["uigrade", "grade", "--threshold", "150"]).is_err());
        assert!(Cli::try_parse_from(["uigrade", "grade", "--threshold", "100"]).is_ok());
        assert!(Cli::try_parse_from(["uigrade", "grade", "--output", "xml"]).is_err());
        assert!(Cli::try_parse_from(["uigrade", "rules", "--output", "xml"]).is_err());
    }

    #[test]
    fn test_parse_rules_filters() {
        let cli = Cli::try_parse_from(["uigrade", "rules", "--category", "naming"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Commands::Rules { category: Some(ref c), id: None, .. } if c == "naming"
        ));
    }
}
