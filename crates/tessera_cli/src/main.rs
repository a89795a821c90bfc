//! Tessera CLI
//!
//! Host for the Tessera theme engine: loads a project's token schema,
//! applies scripted edits and writes the generated stylesheet and export.
//!
//! - `tessera init` scaffolds tessera.toml and a seeded theme.json
//! - `tessera css` / `tessera export` write the generated artifacts
//! - `tessera vars` lists emitted variables with filters
//! - `tessera apply` runs a JSON command script against the schema
//! - `tessera import` replaces the schema with a schema or export payload
//! - `tessera alias` rebinds a light/dark slot
//! - `tessera check` validates alias bindings

mod config;
mod project;
mod store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tessera_theme::{
    import_json, list_variables, Command, Slot, State, ThemeScope, TokenKey, VariableFilter,
};
use tracing_subscriber::EnvFilter;

use crate::project::{create_project, Project};

/// Design-token schema tool
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(about = "Generate theme CSS and exports from a design-token schema")]
#[command(version)]
struct Cli {
    /// Project directory (or path to tessera.toml)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create tessera.toml and a seeded schema
    Init {
        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Write the generated stylesheet
    Css {
        /// Output path (defaults to output.css)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Write the JSON export of the aliased themes
    Export {
        /// Output path (defaults to output.export)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// List emitted CSS variables
    Vars {
        /// light, dark or both
        #[arg(long, default_value = "both", value_parser = parse_scope)]
        scope: ThemeScope,

        /// Control id, or `body`
        #[arg(long)]
        control: Option<String>,

        #[arg(long, value_parser = parse_state)]
        state: Option<State>,

        /// Token key, e.g. backgroundColor
        #[arg(long, value_parser = parse_key)]
        property: Option<TokenKey>,

        /// Case-insensitive substring of name or value
        #[arg(long)]
        search: Option<String>,

        /// Print JSON instead of `name: value` lines
        #[arg(long)]
        json: bool,
    },

    /// Apply a JSON array of commands and save the schema
    Apply {
        /// Command script
        script: PathBuf,

        /// Fail on the first command that cannot take effect
        #[arg(long)]
        strict: bool,
    },

    /// Replace the schema with a schema or export payload
    Import {
        file: PathBuf,
    },

    /// Bind a slot to a physical theme
    Alias {
        #[arg(value_parser = parse_slot)]
        slot: Slot,
        theme: String,
    },

    /// Validate alias bindings against the schema
    Check {
        /// Re-point dangling aliases at the first theme
        #[arg(long)]
        fix: bool,
    },
}

fn parse_scope(s: &str) -> Result<ThemeScope, String> {
    s.parse().map_err(|()| format!("unknown scope {s:?}"))
}

fn parse_state(s: &str) -> Result<State, String> {
    s.parse().map_err(|()| format!("unknown state {s:?}"))
}

fn parse_key(s: &str) -> Result<TokenKey, String> {
    s.parse().map_err(|()| format!("unknown token key {s:?}"))
}

fn parse_slot(s: &str) -> Result<Slot, String> {
    s.parse().map_err(|()| format!("unknown slot {s:?}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { name } => cmd_init(cli.dir, name),
        Commands::Css { out, stdout } => cmd_css(&Project::open(&cli.dir)?, out, stdout),
        Commands::Export { out, stdout } => cmd_export(&Project::open(&cli.dir)?, out, stdout),
        Commands::Vars {
            scope,
            control,
            state,
            property,
            search,
            json,
        } => {
            let filter = VariableFilter {
                scope,
                control,
                state,
                property,
                search,
            };
            cmd_vars(&Project::open(&cli.dir)?, &filter, json)
        }
        Commands::Apply { script, strict } => cmd_apply(&Project::open(&cli.dir)?, &script, strict),
        Commands::Import { file } => cmd_import(&Project::open(&cli.dir)?, &file),
        Commands::Alias { slot, theme } => cmd_alias(&Project::open(&cli.dir)?, slot, &theme),
        Commands::Check { fix } => cmd_check(&Project::open(&cli.dir)?, fix),
    }
}

fn cmd_init(dir: PathBuf, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "tessera-project".to_string()),
    };
    create_project(&dir, &name)?;
    println!("Created {} in {}", name, dir.display());
    Ok(())
}

fn cmd_css(project: &Project, out: Option<PathBuf>, stdout: bool) -> Result<()> {
    let mut doc = project.document()?;
    let css = doc.stylesheet();
    if stdout {
        print!("{css}");
        return Ok(());
    }
    let path = match out {
        Some(path) => path,
        None => project.resolve(&project.config.output.css),
    };
    write_file(&path, css)?;
    tracing::info!(path = %path.display(), bytes = css.len(), "Wrote stylesheet");
    Ok(())
}

fn cmd_export(project: &Project, out: Option<PathBuf>, stdout: bool) -> Result<()> {
    let doc = project.document()?;
    let json = doc.export_json().context("Failed to serialize export")?;
    if stdout {
        println!("{json}");
        return Ok(());
    }
    let path = match out {
        Some(path) => path,
        None => project.resolve(&project.config.output.export),
    };
    write_file(&path, &json)?;
    tracing::info!(path = %path.display(), "Wrote export");
    Ok(())
}

fn cmd_vars(project: &Project, filter: &VariableFilter, json: bool) -> Result<()> {
    let doc = project.document()?;
    let entries = list_variables(doc.schema(), doc.aliases(), filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{}: {}", entry.name, entry.value);
        }
    }
    tracing::debug!(count = entries.len(), "Listed variables");
    Ok(())
}

fn cmd_apply(project: &Project, script: &Path, strict: bool) -> Result<()> {
    let content = fs::read_to_string(script)
        .with_context(|| format!("Failed to read {}", script.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", script.display()))?;

    let mut doc = project.document()?;
    let mut changed = 0usize;
    for (index, command) in commands.iter().enumerate() {
        let applied = if strict {
            doc.try_dispatch(command)
                .with_context(|| format!("Command #{} ({}) failed", index + 1, command.name()))?
        } else {
            doc.dispatch(command)
        };
        if applied {
            changed += 1;
        } else {
            tracing::warn!(index = index + 1, op = command.name(), "Command had no effect");
        }
    }

    project.save(&mut doc)?;
    tracing::info!(total = commands.len(), changed, "Applied commands");
    Ok(())
}

fn cmd_import(project: &Project, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let imported = import_json(&content)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    let carried_aliases = imported.aliases.is_some();

    let mut doc = project.document()?;
    doc.import(imported);
    project.save(&mut doc)?;
    tracing::info!(
        themes = doc.schema().themes.len(),
        controls = doc.schema().components.len(),
        carried_aliases,
        "Imported schema"
    );
    Ok(())
}

fn cmd_alias(project: &Project, slot: Slot, theme: &str) -> Result<()> {
    let mut doc = project.document()?;
    if !doc.schema().has_theme(theme) {
        anyhow::bail!(
            "Theme {:?} does not exist (themes: {})",
            theme,
            doc.schema().themes.join(", ")
        );
    }
    doc.set_alias(slot, theme);
    project.save(&mut doc)?;
    println!("{slot} -> {theme}");
    Ok(())
}

fn cmd_check(project: &Project, fix: bool) -> Result<()> {
    let mut doc = project.document()?;
    let dangling = doc.aliases().dangling(doc.schema());
    if dangling.is_empty() {
        println!("Aliases OK: light -> {}, dark -> {}", doc.aliases().light, doc.aliases().dark);
        return Ok(());
    }

    for slot in &dangling {
        tracing::warn!(%slot, theme = doc.aliases().resolve(*slot), "Alias points at missing theme");
    }
    if !fix {
        anyhow::bail!("{} dangling alias(es); rerun with --fix to repair", dangling.len());
    }

    let repaired = doc.aliases().repair(doc.schema());
    let mut config = doc.config().clone();
    config.aliases = repaired;
    doc.set_config(config);
    project.save(&mut doc)?;
    println!("Repaired: light -> {}, dark -> {}", doc.aliases().light, doc.aliases().dark);
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
