//! Command handlers: wire config, snapshot, catalog and scanner together.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::args::{Arguments, Command, CommonArgs, FindCommand, TypesCommand};
use super::exit_status::ExitStatus;
use super::progress::ConsoleProgress;
use super::report;
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json, load_config};
use crate::core::{
    AssetGraphProvider, MatchError, ProjectSnapshot, Scanner, SnapshotView, TypeCatalog,
    resolve_label,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Find(cmd)) => find(cmd),
        Some(Command::Types(cmd)) => types(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

/// Config merged with CLI overrides, plus the loaded snapshot.
struct Session {
    config: Config,
    snapshot: ProjectSnapshot,
}

impl Session {
    /// Load configuration (CLI args > config file > defaults) and the
    /// snapshot it points at.
    fn new(common: &CommonArgs) -> Result<Self> {
        let load_result = load_config(Path::new("."))?;
        if common.verbose && !load_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = load_result.config;
        if let Some(snapshot) = &common.snapshot {
            config.snapshot = snapshot.to_string_lossy().to_string();
        }
        if !common.roots.is_empty() {
            config.roots = common.roots.clone();
        }
        if !common.kinds.is_empty() {
            config.kinds = common.kinds.clone();
        }
        config.validate()?;

        let snapshot = ProjectSnapshot::load(Path::new(&config.snapshot))
            .with_context(|| format!("Failed to load snapshot '{}'", config.snapshot))?;

        Ok(Self { config, snapshot })
    }
}

fn types(cmd: TypesCommand) -> Result<ExitStatus> {
    let session = Session::new(&cmd.common)?;
    let registry = session
        .snapshot
        .type_registry()
        .context("Catalog build aborted")?;
    let catalog = TypeCatalog::build(&registry);

    let labels = catalog.filter(cmd.query.as_deref().unwrap_or(""));
    report::print_labels(&labels);
    Ok(ExitStatus::Success)
}

fn find(cmd: FindCommand) -> Result<ExitStatus> {
    let session = Session::new(&cmd.common)?;
    let registry = session
        .snapshot
        .type_registry()
        .context("Catalog build aborted")?;
    let catalog = TypeCatalog::build(&registry);

    let descriptor = match resolve_label(&cmd.label, catalog.descriptors()) {
        Ok(descriptor) => descriptor.clone(),
        Err(err @ MatchError::TypeNotFound { .. }) => {
            // User-correctable: report and skip the scan entirely.
            eprintln!("{} {}", "error:".bold().red(), err);
            return Ok(ExitStatus::Failure);
        }
        Err(err) => return Err(err.into()),
    };

    let view = SnapshotView::new(&session.snapshot, &registry);
    let corpus: Vec<String> = view
        .find_assets_by_kind(&session.config.kinds, &session.config.roots)
        .iter()
        .filter_map(|guid| view.resolve_path(guid))
        .collect();

    if cmd.common.verbose {
        eprintln!("Note: scanning {} assets", corpus.len());
    }

    let scanner = Scanner::new(&registry, &view, &view)
        .with_script_extension(&session.config.script_extension);
    let mut progress = ConsoleProgress::new();
    let matches = scanner
        .scan(&descriptor, &corpus, &mut progress)
        .context("Scan aborted")?;

    report::print_matches(&descriptor, &matches, corpus.len());
    Ok(ExitStatus::Success)
}

fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    println!(
        "{} {}",
        report::SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    Ok(ExitStatus::Success)
}
