//! uigrade CLI binary entry point.
//! Resolves config, collects inputs, and delegates to the library.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use uigrade::cli::{Cli, Commands};
use uigrade::config;
use uigrade::error::Error;
use uigrade::grade::{grade_files, grade_sources};
use uigrade::models::rule::{Category, Rule};
use uigrade::output;
use uigrade::rules::{all_rules, search_rules};
use uigrade::utils::{error_prefix, info_prefix, note_prefix};

const STDIN_LABEL: &str = "<stdin>";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Grade {
            paths,
            repo_root,
            output,
            threshold,
        } => {
            let code = run_grade(&paths, repo_root.as_deref(), output.as_deref(), threshold);
            process::exit(code);
        }
        Commands::Rules {
            category,
            id,
            search,
            output,
        } => {
            let rules = select_rules(category.as_deref(), id.as_deref(), search.as_deref());
            let full = category.is_none() && id.is_none() && search.is_none();
            output::print_rules(&rules, output.as_deref().unwrap_or("human"), full);
        }
    }
}

fn fail(err: &Error) -> i32 {
    eprintln!("{} {}", error_prefix(), err);
    2
}

/// Grade the requested inputs and return the process exit code.
fn run_grade(
    paths: &[String],
    repo_root: Option<&str>,
    output: Option<&str>,
    threshold: Option<u32>,
) -> i32 {
    let eff = match config::resolve_effective(repo_root, output, threshold) {
        Ok(eff) => eff,
        Err(e) => return fail(&e),
    };
    let human = eff.output == "human";
    if human && eff.config_path.is_none() {
        eprintln!("{} No uigrade.toml found; using defaults.", note_prefix());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let mut stdin_at: Option<usize> = None;
    if paths.is_empty() {
        if human {
            eprintln!(
                "{} Using include patterns: [{}]",
                info_prefix(),
                eff.include.join(", ")
            );
        }
        files = match config::expand_include(&eff.repo_root, &eff.include) {
            Ok(f) => f,
            Err(e) => return fail(&e),
        };
    } else {
        for p in paths {
            if p == "-" {
                stdin_at.get_or_insert(files.len());
            } else {
                files.push(PathBuf::from(p));
            }
        }
    }

    let stdin_source = match stdin_at {
        Some(_) => match std::io::read_to_string(std::io::stdin()) {
            Ok(code) => Some((STDIN_LABEL.to_string(), code)),
            Err(e) => return fail(&Error::Stdin(e)),
        },
        None => None,
    };
    if files.is_empty() && stdin_source.is_none() {
        return fail(&Error::NoInputs);
    }
    log::info!("grading {} file(s)", files.len() + stdin_at.map_or(0, |_| 1));

    let (mut results, errors) = grade_files(&eff.repo_root, &files, eff.threshold);
    if let (Some(at), Some(source)) = (stdin_at, stdin_source) {
        let at = at.min(results.len());
        for (i, g) in grade_sources(&[source], eff.threshold).into_iter().enumerate() {
            results.insert(at + i, g);
        }
    }

    output::print_grades(&results, &eff.output, &errors);
    if !errors.is_empty() {
        2
    } else if results.iter().any(|r| !r.compliant) {
        1
    } else {
        0
    }
}

/// Apply the rules filters. An unknown category or id yields an empty list.
fn select_rules(category: Option<&str>, id: Option<&str>, search: Option<&str>) -> Vec<&'static Rule> {
    let category = match category.map(str::parse::<Category>) {
        Some(Ok(c)) => Some(c),
        Some(Err(e)) => {
            log::debug!("{}", e);
            return Vec::new();
        }
        None => None,
    };
    let base: Vec<&'static Rule> = match search {
        Some(q) => search_rules(q),
        None => all_rules().iter().collect(),
    };
    base.into_iter()
        .filter(|r| category.map_or(true, |c| r.category == c))
        .filter(|r| id.map_or(true, |id| r.id == id))
        .collect()
}
