//! Configuration for dailydose paths, adapters, and credentials.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (DAILYDOSE_HOME, DAILYDOSE_CALENDAR)
//! 2. Config file (.dailydose/config.yaml)
//! 3. Defaults (~/.dailydose)
//!
//! Config file discovery:
//! - Searches current directory and parents for .dailydose/config.yaml
//! - Paths in config file are relative to the config file's parent directory
//!
//! The resolved configuration is an explicit value handed to the
//! orchestrator and CLI, not ambient process state; tests construct one
//! directly. Publish credentials sit behind [`CredentialProvider`] so tests
//! never have to touch the real environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the account username
pub const USERNAME_VAR: &str = "INSTAGRAM_USERNAME";

/// Environment variable holding the account password
pub const PASSWORD_VAR: &str = "INSTAGRAM_PASSWORD";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub renderer: Option<ToolConfig>,
    #[serde(default)]
    pub captioner: Option<ToolConfig>,
    #[serde(default)]
    pub publisher: Option<PublisherConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to config file)
    pub home: Option<String>,
    /// Calendar document (relative to project root)
    pub calendar: Option<String>,
    /// Output directory for artifacts and the caption side file
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    pub binary: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublisherConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Per-stage deadlines for the external collaborators
#[derive(Debug, Clone)]
pub struct StageTimeouts {
    pub render_seconds: u64,
    pub caption_seconds: u64,
    pub publish_seconds: u64,
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            render_seconds: 600,
            caption_seconds: 120,
            publish_seconds: 300,
        }
    }
}

impl StageTimeouts {
    pub fn render(&self) -> Duration {
        Duration::from_secs(self.render_seconds)
    }

    pub fn caption(&self) -> Duration {
        Duration::from_secs(self.caption_seconds)
    }

    pub fn publish(&self) -> Duration {
        Duration::from_secs(self.publish_seconds)
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to dailydose home (state directory)
    pub home: PathBuf,
    /// Calendar document path
    pub calendar: PathBuf,
    /// Output directory (artifacts + caption side file)
    pub output_dir: PathBuf,
    /// Execution ledger document path
    pub ledger_path: PathBuf,
    /// Log file directory
    pub log_dir: PathBuf,
    /// Renderer binary
    pub renderer_binary: String,
    /// Caption generator binary
    pub captioner_binary: String,
    /// Publishing bridge endpoint
    pub publisher_endpoint: String,
    /// External-call deadlines
    pub timeouts: StageTimeouts,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        // Default home directory
        let default_home = dirs::home_dir()
            .context("Failed to determine home directory")?
            .join(".dailydose");

        // Check for config file
        let config_file = find_config_file();

        let mut resolved = Self::defaults_in(default_home);

        if let Some(ref config_path) = config_file {
            let config = load_config_file(config_path)?;

            // Base directory is the parent of .dailydose/ (the project root)
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."))
                .to_path_buf();

            if let Some(ref home_path) = config.paths.home {
                // home is relative to the .dailydose/ directory
                let dose_dir = config_path.parent().unwrap_or(Path::new("."));
                resolved = Self::defaults_in(resolve_path(dose_dir, home_path));
            }

            if let Some(ref calendar_path) = config.paths.calendar {
                resolved.calendar = resolve_path(&base_dir, calendar_path);
            }

            if let Some(ref output_path) = config.paths.output {
                resolved.output_dir = resolve_path(&base_dir, output_path);
            }

            if let Some(ref renderer) = config.renderer {
                if let Some(ref binary) = renderer.binary {
                    resolved.renderer_binary = binary.clone();
                }
                if let Some(secs) = renderer.timeout_seconds {
                    resolved.timeouts.render_seconds = secs;
                }
            }

            if let Some(ref captioner) = config.captioner {
                if let Some(ref binary) = captioner.binary {
                    resolved.captioner_binary = binary.clone();
                }
                if let Some(secs) = captioner.timeout_seconds {
                    resolved.timeouts.caption_seconds = secs;
                }
            }

            if let Some(ref publisher) = config.publisher {
                if let Some(ref endpoint) = publisher.endpoint {
                    resolved.publisher_endpoint = endpoint.clone();
                }
                if let Some(secs) = publisher.timeout_seconds {
                    resolved.timeouts.publish_seconds = secs;
                }
            }
        }

        // Environment variables win over the file; DAILYDOSE_HOME re-roots
        // every home-derived path but leaves adapter settings alone
        if let Ok(env_home) = std::env::var("DAILYDOSE_HOME") {
            let home = PathBuf::from(env_home);
            resolved.calendar = home.join("content_calendar.json");
            resolved.output_dir = home.join("output");
            resolved.ledger_path = home.join("ledger.json");
            resolved.log_dir = home.join("logs");
            resolved.home = home;
        }
        if let Ok(env_calendar) = std::env::var("DAILYDOSE_CALENDAR") {
            resolved.calendar = PathBuf::from(env_calendar);
        }

        resolved.config_file = config_file;
        Ok(resolved)
    }

    /// Defaults rooted at the given home directory
    fn defaults_in(home: PathBuf) -> Self {
        Self {
            calendar: home.join("content_calendar.json"),
            output_dir: home.join("output"),
            ledger_path: home.join("ledger.json"),
            log_dir: home.join("logs"),
            renderer_binary: "dailydose-render".to_string(),
            captioner_binary: "dailydose-caption".to_string(),
            publisher_endpoint: "http://127.0.0.1:8787/publish".to_string(),
            timeouts: StageTimeouts::default(),
            config_file: None,
            home,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".dailydose").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

// ============================================================================
// Publish credentials
// ============================================================================

/// Account credentials for the publishing platform
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Credential lookup failures
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("publish credentials not configured: missing {var}")]
    Missing { var: String },
}

/// Capability for sourcing publish credentials.
///
/// The orchestrator resolves credentials through this trait before the
/// publisher is invoked, so a missing secret fails the run as a
/// configuration error without any publish attempt.
pub trait CredentialProvider: Send + Sync {
    fn publish_credentials(&self) -> Result<Credentials, CredentialError>;
}

/// Reads credentials from process environment variables
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    username_var: String,
    password_var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(USERNAME_VAR, PASSWORD_VAR)
    }
}

impl EnvCredentials {
    /// Use custom variable names (the defaults are the platform's)
    pub fn new(username_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username_var: username_var.into(),
            password_var: password_var.into(),
        }
    }

    fn read(var: &str) -> Result<String, CredentialError> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(CredentialError::Missing {
                var: var.to_string(),
            }),
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn publish_credentials(&self) -> Result<Credentials, CredentialError> {
        Ok(Credentials {
            username: Self::read(&self.username_var)?,
            password: Self::read(&self.password_var)?,
        })
    }
}

/// Fixed in-memory credentials, for tests and embedding
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn publish_credentials(&self) -> Result<Credentials, CredentialError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_rooted_at_home() {
        let config = ResolvedConfig::defaults_in(PathBuf::from("/srv/dailydose"));

        assert_eq!(config.home, PathBuf::from("/srv/dailydose"));
        assert_eq!(
            config.calendar,
            PathBuf::from("/srv/dailydose/content_calendar.json")
        );
        assert_eq!(config.output_dir, PathBuf::from("/srv/dailydose/output"));
        assert_eq!(config.ledger_path, PathBuf::from("/srv/dailydose/ledger.json"));
        assert_eq!(config.log_dir, PathBuf::from("/srv/dailydose/logs"));
        assert_eq!(config.renderer_binary, "dailydose-render");
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = StageTimeouts::default();

        assert_eq!(timeouts.render(), Duration::from_secs(600));
        assert_eq!(timeouts.caption(), Duration::from_secs(120));
        assert_eq!(timeouts.publish(), Duration::from_secs(300));
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dose_dir = temp.path().join(".dailydose");
        std::fs::create_dir_all(&dose_dir).unwrap();

        let config_path = dose_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./
  calendar: ../content_calendar.json
  output: ../output
renderer:
  binary: /opt/render/bin/render
  timeout_seconds: 900
publisher:
  endpoint: http://bridge:8787/publish
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(
            config.paths.calendar,
            Some("../content_calendar.json".to_string())
        );
        assert_eq!(
            config.renderer.as_ref().unwrap().binary,
            Some("/opt/render/bin/render".to_string())
        );
        assert_eq!(config.renderer.unwrap().timeout_seconds, Some(900));
        assert_eq!(
            config.publisher.unwrap().endpoint,
            Some("http://bridge:8787/publish".to_string())
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
        // Non-existent relative paths fall back to plain join
        assert_eq!(
            resolve_path(&base, "./subdir-that-does-not-exist"),
            PathBuf::from("/home/user/project/./subdir-that-does-not-exist")
        );
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials(Credentials {
            username: "dose".to_string(),
            password: "secret".to_string(),
        });

        let creds = provider.publish_credentials().unwrap();
        assert_eq!(creds.username, "dose");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_env_credentials_missing() {
        let provider = EnvCredentials::new(
            "DAILYDOSE_TEST_USER_UNSET",
            "DAILYDOSE_TEST_PASS_UNSET",
        );

        let result = provider.publish_credentials();

        assert!(matches!(
            result,
            Err(CredentialError::Missing { ref var }) if var == "DAILYDOSE_TEST_USER_UNSET"
        ));
    }

    #[test]
    fn test_env_credentials_present() {
        std::env::set_var("DAILYDOSE_TEST_USER_SET", "dose");
        std::env::set_var("DAILYDOSE_TEST_PASS_SET", "secret");

        let provider =
            EnvCredentials::new("DAILYDOSE_TEST_USER_SET", "DAILYDOSE_TEST_PASS_SET");
        let creds = provider.publish_credentials().unwrap();

        assert_eq!(creds.username, "dose");
        assert_eq!(creds.password, "secret");
    }
}
