//! Project creation and loading

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tessera_theme::{seed_schema, SchemaStore, ThemeDocument};

use crate::config::{TesseraConfig, CONFIG_FILE};
use crate::store::{JsonFileStore, TomlAliasStore};

/// Create a new Tessera project with a seeded schema
pub fn create_project(path: &Path, name: &str) -> Result<()> {
    if path.join(CONFIG_FILE).exists() {
        anyhow::bail!("{} already exists in {}", CONFIG_FILE, path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    // Create tessera.toml
    let config = TesseraConfig::new(name);
    fs::write(path.join(CONFIG_FILE), config.to_toml()?)?;

    // Seed the schema
    JsonFileStore::new(path.join(&config.schema.path))
        .save(&seed_schema())
        .context("Failed to write seeded schema")?;

    // Create .gitignore
    fs::write(
        path.join(".gitignore"),
        r#"# Tessera build artifacts
/dist/
*.tmp
"#,
    )?;

    // Create README
    fs::write(
        path.join("README.md"),
        format!(
            r#"# {}

Design tokens managed with Tessera.

## Generate

```bash
tessera css
tessera export
```

## Project Structure

```
{}/
├── tessera.toml     # Project configuration and light/dark aliases
├── theme.json       # Token schema
└── dist/            # Generated stylesheet and export
```
"#,
            name, name
        ),
    )?;

    tracing::info!(name, path = %path.display(), "Created project");
    Ok(())
}

/// An opened project: its root and parsed config
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: TesseraConfig,
}

impl Project {
    pub fn open(root: &Path) -> Result<Self> {
        let config = TesseraConfig::load_from_dir(root)?;
        let root = if root.is_file() {
            root.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            root.to_path_buf()
        };
        Ok(Self { root, config })
    }

    pub fn schema_store(&self) -> JsonFileStore {
        JsonFileStore::new(self.resolve(&self.config.schema.path))
    }

    pub fn alias_store(&self) -> TomlAliasStore {
        TomlAliasStore::new(self.root.join(CONFIG_FILE))
    }

    /// Project-relative path made absolute
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Load the schema and aliases into an editable document
    pub fn document(&self) -> Result<ThemeDocument> {
        // An unknown initial_slot is an error here, not a fallback to light
        self.config.alias_config()?;
        let doc = ThemeDocument::load(&self.schema_store(), &self.alias_store())
            .with_context(|| format!("Failed to load schema from {}", self.config.schema.path))?;
        Ok(doc.with_css_options(self.config.css_options()))
    }

    /// Persist a document if it has unsaved edits
    pub fn save(&self, doc: &mut ThemeDocument) -> Result<bool> {
        if !doc.needs_save() {
            return Ok(false);
        }
        doc.save(&mut self.schema_store(), &mut self.alias_store())
            .context("Failed to save project")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_theme::{Command, Slot, State, TokenSet};

    #[test]
    fn init_scaffolds_a_loadable_project() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), "acme").unwrap();
        assert!(create_project(dir.path(), "acme").is_err());

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.config.project.name, "acme");
        let mut doc = project.document().unwrap();
        assert_eq!(doc.schema(), &seed_schema());
        assert!(doc.stylesheet().contains("html[data-theme=\"dark\"]"));
    }

    #[test]
    fn edits_persist_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        create_project(dir.path(), "acme").unwrap();
        let project = Project::open(dir.path()).unwrap();

        let mut doc = project.document().unwrap();
        assert!(!project.save(&mut doc).unwrap());

        doc.dispatch(&Command::UpdateTokens {
            theme: "dark".into(),
            control: "card".into(),
            state: State::Hover,
            patch: TokenSet {
                opacity: Some(0.75),
                ..TokenSet::default()
            },
        });
        doc.set_alias(Slot::Light, "dark");
        assert!(project.save(&mut doc).unwrap());

        let reopened = Project::open(dir.path()).unwrap();
        let doc = reopened.document().unwrap();
        assert_eq!(doc.resolve("card", "dark", State::Hover).opacity, Some(0.75));
        assert_eq!(doc.aliases().light, "dark");
        assert_eq!(reopened.config.aliases.light, "dark");
    }
}
