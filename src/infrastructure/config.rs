use crate::domain::{config::BenchConfig, error::{BenchError, BenchResult}};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides scratch_root when set
pub const SCRATCH_ROOT_ENV: &str = "PHRASE_BENCH_SCRATCH_ROOT";
/// Overrides remote_root when set
pub const REMOTE_ROOT_ENV: &str = "PHRASE_BENCH_REMOTE_ROOT";

const CONFIG_DIR_NAME: &str = "phrase-bench";
const PROJECT_DIR_NAME: &str = ".phrase-bench";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> BenchResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Manager rooted at explicit locations, used when the home directory is not wanted
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration from files.
    ///
    /// The project file, when present, takes precedence over the global one.
    pub fn load_config(&self) -> BenchResult<BenchConfig> {
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                return self.load_config_from_path(project_path);
            }
        }

        if self.global_config_path.exists() {
            return self.load_config_from_path(&self.global_config_path);
        }

        Ok(BenchConfig::default())
    }

    /// Apply environment overrides on top of a loaded configuration
    pub fn apply_env_overrides(config: &mut BenchConfig) {
        Self::apply_overrides(
            config,
            std::env::var_os(SCRATCH_ROOT_ENV).map(PathBuf::from),
            std::env::var(REMOTE_ROOT_ENV).ok(),
        );
    }

    fn apply_overrides(config: &mut BenchConfig, scratch_root: Option<PathBuf>, remote_root: Option<String>) {
        if let Some(scratch_root) = scratch_root.filter(|p| !p.as_os_str().is_empty()) {
            config.scratch_root = scratch_root;
        }
        if let Some(remote_root) = remote_root.filter(|r| !r.is_empty()) {
            config.remote_root = remote_root;
        }
    }

    /// Get global configuration path
    fn get_global_config_path() -> BenchResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| BenchError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> BenchResult<BenchConfig> {
        let content = fs::read_to_string(path).map_err(|e| BenchError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| BenchError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &BenchConfig) -> BenchResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| BenchError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| BenchError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Write a default configuration file under `dir/.phrase-bench/`
    pub fn init_project_config(&self, dir: &Path) -> BenchResult<PathBuf> {
        let config_file = dir.join(PROJECT_DIR_NAME).join(CONFIG_FILE_NAME);
        self.init_config_at(&config_file)?;
        Ok(config_file)
    }

    /// Write a default configuration file at the global location
    pub fn init_global_config(&self) -> BenchResult<PathBuf> {
        self.init_config_at(&self.global_config_path)?;
        Ok(self.global_config_path.clone())
    }

    fn init_config_at(&self, config_file: &Path) -> BenchResult<()> {
        if config_file.exists() {
            return Err(BenchError::Config {
                message: format!("Configuration already exists at {}", config_file.display()),
            });
        }

        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).map_err(|e| BenchError::Config {
                message: format!("Failed to create config directory {}: {}", parent.display(), e),
            })?;
        }

        self.save_config_to_path(config_file, &BenchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_paths(temp_dir.path().join("missing.toml"), None);
        let config = manager.load_config().unwrap();

        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn test_project_config_wins_over_global() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let project = temp_dir.path().join("project.toml");
        fs::write(&global, "remote_root = \"s3://global\"\n").unwrap();
        fs::write(&project, "remote_root = \"s3://project\"\n").unwrap();

        let manager = ConfigManager::with_paths(global, Some(project));
        assert_eq!(manager.load_config().unwrap().remote_root, "s3://project");
    }

    #[test]
    fn test_init_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_paths(temp_dir.path().join("global.toml"), None);

        let config_file = manager.init_project_config(temp_dir.path()).unwrap();
        assert_eq!(config_file, temp_dir.path().join(".phrase-bench").join("config.toml"));

        let config = manager.load_config_from_path(&config_file).unwrap();
        assert_eq!(config, BenchConfig::default());

        let again = manager.init_project_config(temp_dir.path());
        assert!(matches!(again, Err(BenchError::Config { .. })));
    }

    #[test]
    fn test_unparsable_config_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "scratch_root = [").unwrap();

        let manager = ConfigManager::with_paths(path.clone(), None);
        let err = manager.load_config().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_overrides_are_ignored() {
        let mut config = BenchConfig::default();
        ConfigManager::apply_overrides(&mut config, Some(PathBuf::new()), Some(String::new()));
        assert_eq!(config, BenchConfig::default());

        ConfigManager::apply_overrides(&mut config, Some(PathBuf::from("/data")), Some("s3://other".into()));
        assert_eq!(config.scratch_root, PathBuf::from("/data"));
        assert_eq!(config.remote_root, "s3://other");
    }
}
