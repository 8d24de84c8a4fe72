use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;

use archivetools::checker::{Finding, FindingKind, PathClassifier};
use archivetools::cli::{CheckArgs, Cli, ColorChoice, Commands, RenameArgs};
use archivetools::config::{RuleSet, RuleSetLoader};
use archivetools::output::{
    ApplyProgress, CliFormatter, ColorMode, CsvFormatter, OutputFormat, ReportFormatter,
};
use archivetools::planner::{Planner, RenamePlan};
use archivetools::report::Report;
use archivetools::scanner::{NodeId, PathTree, TreeScanner};
use archivetools::walker::{EmptyDirPruner, PlanExecutor, RealFileOps, current_path};
use archivetools::{EXIT_CONFIG_ERROR, EXIT_FINDINGS, EXIT_SUCCESS};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// `+e` cannot be expressed as a clap flag; rewrite it to its long spelling
/// before parsing.
fn preprocess_args(args: impl Iterator<Item = String>) -> Vec<String> {
    args.map(|arg| {
        if arg == "+e" {
            "--add-check-empty-dirs".to_string()
        } else {
            arg
        }
    })
    .collect()
}

fn main() {
    let cli = Cli::parse_from(preprocess_args(std::env::args()));

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Rename(args) => run_rename(args, &cli),
    };

    std::process::exit(exit_code);
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> archivetools::Result<i32> {
    // 1. Load configuration merged over the file system preset
    let loader = RuleSetLoader::new()?;
    let ruleset = loader.load(&args.fs, args.config.as_deref())?;

    // 2. Snapshot the tree
    let tree = TreeScanner.scan(&args.path)?;

    // 3. Classify every node for the selected checks
    let classifier = PathClassifier::new(&ruleset, args.active_checks());
    let findings = classifier.classify_tree(&tree);

    // 4. Report, read-only
    let report = Report::check(findings);
    let output = format_report(args.output, &report, color_choice_to_mode(cli.color), cli.verbose)?;
    if !cli.quiet {
        print!("{output}");
    }

    Ok(if report.has_findings() {
        EXIT_FINDINGS
    } else {
        EXIT_SUCCESS
    })
}

fn format_report(
    format: OutputFormat,
    report: &Report,
    color_mode: ColorMode,
    verbose: u8,
) -> archivetools::Result<String> {
    match format {
        OutputFormat::Cli => CliFormatter::with_verbose(color_mode, verbose).format(report),
        OutputFormat::Csv => CsvFormatter.format(report),
    }
}

fn run_rename(args: &RenameArgs, cli: &Cli) -> i32 {
    match run_rename_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_rename_impl(args: &RenameArgs, cli: &Cli) -> archivetools::Result<i32> {
    // 1. Load configuration merged over the file system preset
    let loader = RuleSetLoader::new()?;
    let ruleset = loader.load(&args.fs, args.config.as_deref())?;

    // 2. Snapshot the tree
    let tree = TreeScanner.scan(&args.path)?;
    let checks = args.active_checks();

    // 3. Plan character replacements and rule renames (`-e`-only runs skip this)
    let plan = if checks.invalid_characters {
        Planner::new(&ruleset).plan(&tree)
    } else {
        RenamePlan::default()
    };

    let collision_findings: Vec<Finding> = plan
        .collisions
        .iter()
        .map(|collision| Finding {
            path: collision.directory.clone(),
            kind: FindingKind::RenameCollision {
                target_name: collision.target_name.clone(),
            },
        })
        .collect();

    // 4. Apply, deepest entries first
    let ops = RealFileOps;
    let progress = ApplyProgress::new(plan.renames.len() as u64, cli.quiet);
    let outcome = PlanExecutor::new(&ops).apply(&plan, &progress);
    progress.finish();
    let new_names = outcome.new_names();

    // 5. Remove emptied directories
    let (removed_dirs, prune_failures) = if checks.empty_dirs {
        EmptyDirPruner::new(&ops).prune(&tree, &ruleset, &new_names)
    } else {
        (Vec::new(), Vec::new())
    };

    // 6. Re-validate path lengths against the post-rename paths
    let residual = if checks.path_length {
        residual_length_findings(&tree, &ruleset, &new_names, &removed_dirs)
    } else {
        Vec::new()
    };

    let mut failures = outcome.failures;
    failures.extend(prune_failures);

    let report = Report::rename(
        collision_findings,
        outcome.applied,
        removed_dirs,
        failures,
        residual,
    );
    let output = CliFormatter::with_verbose(color_choice_to_mode(cli.color), cli.verbose)
        .format(&report)?;
    if !cli.quiet {
        print!("{output}");
    }

    Ok(if report.has_findings() {
        EXIT_FINDINGS
    } else {
        EXIT_SUCCESS
    })
}

fn residual_length_findings(
    tree: &PathTree,
    ruleset: &RuleSet,
    new_names: &HashMap<NodeId, String>,
    removed_dirs: &[PathBuf],
) -> Vec<Finding> {
    tree.ids()
        .filter_map(|id| {
            if ruleset.is_excluded(&tree.path_of(id)) {
                return None;
            }

            let current = current_path(tree, new_names, id);
            if removed_dirs.iter().any(|dir| current.starts_with(dir)) {
                return None;
            }

            let length = current.display().to_string().chars().count();
            (length > ruleset.max_path_length).then(|| Finding {
                path: current,
                kind: FindingKind::PathTooLong {
                    length,
                    limit: ruleset.max_path_length,
                },
            })
        })
        .collect()
}
