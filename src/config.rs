use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the workspace root.
pub const ENV_WORKSPACE: &str = "MEMORYBOOK_WORKSPACE";
/// Environment variable overriding the listen host.
pub const ENV_HOST: &str = "MEMORYBOOK_HOST";
/// Environment variable overriding the listen port.
pub const ENV_PORT: &str = "MEMORYBOOK_PORT";

/// Immutable process configuration, constructed once at startup and passed
/// explicitly to every component. No ambient lookups after this point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace root containing the core files and the `memory/` subdir.
    pub workspace: PathBuf,
    pub host: String,
    pub port: u16,
    /// Core files resolved relative to the workspace root, in declaration
    /// order (always listed after the daily files).
    pub core_files: Vec<String>,
}

/// On-disk TOML shape. Every field is optional; env vars win over the file.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    workspace: Option<PathBuf>,
    #[serde(default)]
    server: ServerSection,
    core_files: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

fn default_workspace() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".openclaw").join("workspace")
}

impl Config {
    /// Builds the configuration from defaults, an optional TOML file, and
    /// the `MEMORYBOOK_*` environment variables (highest precedence).
    ///
    /// Fails if the workspace root does not exist — serving against a
    /// missing workspace is a startup error, not a degraded mode.
    pub fn load(config_path: Option<&Path>) -> Result<Config> {
        let file = match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&content).with_context(|| "Failed to parse config file")?
            }
            None => FileConfig::default(),
        };

        let workspace = match std::env::var(ENV_WORKSPACE) {
            Ok(val) => PathBuf::from(val),
            Err(_) => file.workspace.unwrap_or_else(default_workspace),
        };

        let host = std::env::var(ENV_HOST)
            .ok()
            .or(file.server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match std::env::var(ENV_PORT) {
            Ok(val) => val
                .parse::<u16>()
                .with_context(|| format!("{} must be a port number, got '{}'", ENV_PORT, val))?,
            Err(_) => file.server.port.unwrap_or(5577),
        };

        let core_files = file
            .core_files
            .unwrap_or_else(|| vec!["MEMORY.md".to_string()]);

        if !workspace.exists() {
            anyhow::bail!(
                "Workspace not found at {}. Set {} to your workspace path.",
                workspace.display(),
                ENV_WORKSPACE
            );
        }

        Ok(Config {
            workspace,
            host,
            port,
            core_files,
        })
    }

    /// The daily-notes directory. Always `workspace/memory`; may not exist,
    /// in which case the catalog lists only core files.
    pub fn memory_dir(&self) -> PathBuf {
        self.workspace.join("memory")
    }

    /// `host:port` string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_dir_is_fixed_subdir() {
        let config = Config {
            workspace: PathBuf::from("/tmp/ws"),
            host: "127.0.0.1".to_string(),
            port: 5577,
            core_files: vec!["MEMORY.md".to_string()],
        };
        assert_eq!(config.memory_dir(), PathBuf::from("/tmp/ws/memory"));
        assert_eq!(config.bind_addr(), "127.0.0.1:5577");
    }

    #[test]
    fn test_file_config_parses_partial_toml() {
        let parsed: FileConfig = toml::from_str(
            r#"
workspace = "/data/agent"

[server]
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(parsed.workspace, Some(PathBuf::from("/data/agent")));
        assert_eq!(parsed.server.port, Some(8080));
        assert_eq!(parsed.server.host, None);
        assert_eq!(parsed.core_files, None);
    }

    #[test]
    fn test_file_config_core_files_list() {
        let parsed: FileConfig =
            toml::from_str(r#"core_files = ["MEMORY.md", "SOUL.md"]"#).unwrap();
        assert_eq!(
            parsed.core_files,
            Some(vec!["MEMORY.md".to_string(), "SOUL.md".to_string()])
        );
    }
}
