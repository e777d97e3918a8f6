mod cli;
mod logging;
mod reporter;
mod utils;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use attic::{AppConfig, CleanupEngine, DuplicateKey, FileEntry, UndoOutcome};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use indicatif::HumanBytes;
use reporter::CliReporter;
use tracing::error;
use utils::prompt::{prompt_choice, prompt_confirm};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let mut config = match attic::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Scan(scan)) => {
            scan.apply(&mut config);
            run_scan(&config)
        }
        Some(Commands::Dupes(scan)) => {
            scan.apply(&mut config);
            run_dupes(&config)
        }
        Some(Commands::Review(review)) => {
            review.scan.apply(&mut config);
            run_review(&config, review.skip_duplicates)
        }
        Some(Commands::PrintConfig(scan)) => {
            scan.apply(&mut config);
            print_config(&config)
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run_scan(config: &AppConfig) -> Result<()> {
    let engine = CleanupEngine::new(config.clone());
    let report = engine.scan(&CliReporter::new())?;

    if report.files.is_empty() {
        println!("No old files found.");
        return Ok(());
    }

    for file in &report.files {
        print_file(file);
    }

    println!();
    println!(
        "{} old files, {} total, {} unreadable entries skipped",
        format!("{}", report.summary.files_included).bold(),
        format!("{}", HumanBytes(report.summary.total_bytes)).green(),
        report.summary.errors,
    );
    Ok(())
}

fn run_dupes(config: &AppConfig) -> Result<()> {
    let engine = CleanupEngine::new(config.clone());
    let report = engine.scan(&CliReporter::new())?;
    let groups = engine.group_duplicates(&report.files);

    if groups.is_empty() {
        println!("No duplicate files found.");
        return Ok(());
    }

    for key in sorted_keys(groups.keys()) {
        print_group(key, &groups[key]);
    }

    println!();
    println!(
        "{} duplicate groups, {} reclaimable",
        format!("{}", groups.len()).bold(),
        format!("{}", HumanBytes(attic::dupes::wasted_bytes(&groups))).red(),
    );
    Ok(())
}

fn print_config(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", rendered);
    println!("# effective trash_dir = {:?}", config.trash_dir());
    println!(
        "# effective excluded_roots = {:?}",
        config.effective_excluded_roots()
    );
    Ok(())
}

/// Interactive pass: duplicates first (unless skipped), then every remaining
/// old file from the largest down.
fn run_review(config: &AppConfig, skip_duplicates: bool) -> Result<()> {
    let engine = CleanupEngine::new(config.clone());
    let report = engine.scan(&CliReporter::new())?;

    if report.files.is_empty() {
        println!("No old files found.");
        return Ok(());
    }
    println!("Found {} old files.", report.files.len());

    let mut trashed: HashSet<PathBuf> = HashSet::new();

    let skip_duplicates = skip_duplicates
        || prompt_confirm(
            "Skip duplicates and go directly to the largest file?",
            Some(false),
        )?;
    if skip_duplicates {
        println!("\nSkipping duplicates...\n");
    } else {
        review_duplicates(&engine, &report.files, &mut trashed)?;
    }

    println!("\nProcessing remaining files...");
    for file in &report.files {
        if trashed.contains(&file.path) {
            continue;
        }

        println!();
        print_file(file);
        if let Some(last) = engine.action_log().peek() {
            println!("{}", format!("(u restores {})", last.original_path.display()).dimmed());
        }
        match prompt_choice("Action [k=keep, d=delete, u=undo, q=quit]", &['k', 'd', 'u', 'q'])? {
            'd' => trash_file(&engine, &file.path, &mut trashed),
            'u' => undo_last(&engine, &mut trashed),
            'q' => {
                println!("Exiting...");
                print_session_summary(&engine);
                return Ok(());
            }
            _ => println!("Kept: {}", file.path.display()),
        }
    }

    println!("Process complete.");
    print_session_summary(&engine);
    Ok(())
}

/// List what is still in the trash from this session, oldest first.
fn print_session_summary(engine: &CleanupEngine) {
    let actions = engine.action_log().snapshot();
    if actions.is_empty() {
        return;
    }
    println!(
        "\n{} files moved to {}:",
        actions.len(),
        engine.trash_dir().display()
    );
    for action in &actions {
        println!(
            " - {} -> {}",
            action.original_path.display(),
            action.trash_path.display()
        );
    }
}

fn review_duplicates(
    engine: &CleanupEngine,
    files: &[FileEntry],
    trashed: &mut HashSet<PathBuf>,
) -> Result<()> {
    let groups = engine.group_duplicates(files);
    if groups.is_empty() {
        println!("No duplicate files found.");
        return Ok(());
    }

    println!("\nFound duplicate files:");
    for key in sorted_keys(groups.keys()) {
        let paths = &groups[key];
        let name = key.name.to_string_lossy();
        print_group(key, paths);

        let prompt = format!("Action for {} [k=keep all, d=delete all, s=selective]", name);
        match prompt_choice(&prompt, &['k', 'd', 's'])? {
            'd' => {
                for path in paths {
                    trash_file(engine, path, trashed);
                }
            }
            's' => {
                for path in paths {
                    let prompt = format!("File: {}\nAction [k=keep, d=delete]", path.display());
                    match prompt_choice(&prompt, &['k', 'd'])? {
                        'd' => trash_file(engine, path, trashed),
                        _ => println!("Kept: {}", path.display()),
                    }
                }
            }
            _ => println!("Kept all copies of: {}", name),
        }
    }
    Ok(())
}

fn trash_file(engine: &CleanupEngine, path: &Path, trashed: &mut HashSet<PathBuf>) {
    match engine.soft_delete(path) {
        Ok(action) => {
            println!(
                "{} {}",
                "Moved to trash:".yellow(),
                action.original_path.display()
            );
            trashed.insert(action.original_path);
        }
        Err(err) => error!("{}", err),
    }
}

fn undo_last(engine: &CleanupEngine, trashed: &mut HashSet<PathBuf>) {
    match engine.undo_last() {
        Ok(UndoOutcome::Restored(action)) => {
            println!("{} {}", "Restored:".green(), action.original_path.display());
            trashed.remove(&action.original_path);
        }
        Ok(UndoOutcome::NoOpEmpty) => println!("No actions to undo."),
        Err(err) => error!("{}", err),
    }
}

fn print_file(file: &FileEntry) {
    println!(
        "{:>10}  {}  {}",
        format!("{}", HumanBytes(file.size)),
        utils::format_accessed(file.accessed).dimmed(),
        file.path.display()
    );
}

fn print_group(key: &DuplicateKey, paths: &[PathBuf]) {
    println!(
        "\nFile: {} | Size: {}",
        key.name.to_string_lossy().bold(),
        HumanBytes(key.size)
    );
    println!("Copies: {}", paths.len());
    for path in paths {
        println!(" - {}", path.display());
    }
}

/// Largest groups first so the biggest savings come up first.
fn sorted_keys<'a>(keys: impl Iterator<Item = &'a DuplicateKey>) -> Vec<&'a DuplicateKey> {
    let mut keys: Vec<_> = keys.collect();
    keys.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
    keys
}
