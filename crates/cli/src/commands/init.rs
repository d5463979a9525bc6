//! roster init command

use clap::Args;
use shared::AppConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Write roster.yaml instead of roster.json
    #[arg(long)]
    pub yaml: bool,

    /// Overwrite an existing settings file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        println!("Initializing roster workspace in {:?}", self.directory);
        let path = self.init()?;
        println!("✓ Wrote {}", path.display());
        Ok(())
    }

    /// Create the data directory and settings file; returns the settings path
    pub fn init(&self) -> anyhow::Result<PathBuf> {
        let config = AppConfig::default();
        std::fs::create_dir_all(self.directory.join(&config.data_dir))?;

        let path = self.settings_path();
        if path.exists() && !self.force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }

        let content = if self.yaml {
            serde_yaml::to_string(&config)?
        } else {
            serde_json::to_string_pretty(&config)?
        };
        std::fs::write(&path, content)?;
        Ok(path)
    }

    fn settings_path(&self) -> PathBuf {
        let file = if self.yaml { "roster.yaml" } else { "roster.json" };
        Path::new(&self.directory).join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn command(dir: &Path, yaml: bool, force: bool) -> InitCommand {
        InitCommand {
            directory: dir.to_path_buf(),
            yaml,
            force,
        }
    }

    #[test]
    fn test_init_writes_loadable_settings() {
        let dir = TempDir::new().unwrap();

        let path = command(dir.path(), false, false).init().unwrap();

        assert_eq!(path, dir.path().join("roster.json"));
        assert_eq!(AppConfig::from_file(&path).unwrap(), AppConfig::default());
        assert!(dir.path().join(".roster").is_dir());
    }

    #[test]
    fn test_init_yaml() {
        let dir = TempDir::new().unwrap();

        let path = command(dir.path(), true, false).init().unwrap();

        assert_eq!(AppConfig::from_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        command(dir.path(), false, false).init().unwrap();

        assert!(command(dir.path(), false, false).init().is_err());
        assert!(command(dir.path(), false, true).init().is_ok());
    }
}
